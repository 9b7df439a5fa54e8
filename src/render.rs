//! HTML rendering behind the `Renderer` seam.
//!
//! The site builder does not care how HTML gets made: it hands a
//! [`Template`] id and a [`SiteContext`] to anything implementing
//! [`Renderer`] and trusts the string that comes back. This keeps the
//! rendering technology swappable — the provided [`MaudRenderer`] uses
//! [maud](https://maud.lambda.xyz/) compile-time templates, but a
//! Handlebars- or Tera-backed implementation could satisfy the same
//! contract.
//!
//! ## Safety split
//!
//! Maud auto-escapes every interpolation. `PreEscaped` appears only for
//! fields the context assembler has already sanitized (the about body, the
//! map iframe, legal bodies) — raw config values never reach it.
//!
//! ## Lifecycle
//!
//! A renderer is constructed once at startup and read-only thereafter;
//! rendering never mutates it.

use crate::config::StyleConfig;
use crate::context::SiteContext;
use crate::sanitize::sanitize_filename;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Identifies a renderable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// The landing page: hero, services, products, social proof, map.
    Home,
    /// The secondary informational page (authority story).
    About,
}

/// The template-rendering capability boundary.
///
/// Implementations receive a fully-assembled, sanitized context and return
/// HTML text. The caller performs no validation on the output.
pub trait Renderer {
    fn render(&self, template: Template, ctx: &SiteContext) -> String;
}

/// Compile-time-templated renderer. Stateless; safe to share.
#[derive(Debug, Default)]
pub struct MaudRenderer;

impl Renderer for MaudRenderer {
    fn render(&self, template: Template, ctx: &SiteContext) -> String {
        match template {
            Template::Home => render_home(ctx).into_string(),
            Template::About => render_about(ctx).into_string(),
        }
    }
}

/// Generate CSS custom properties from the styling tokens.
///
/// Tokens are opaque passthrough values; this is the single place they
/// become CSS, so a bad token degrades one custom property, not the build.
pub fn generate_style_css(style: &StyleConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --radius: {radius};
    --font-heading: "{heading_font}", sans-serif;
    --font-body: "{body_font}", sans-serif;
    --heading-weight: {weight};
    --letter-spacing: {spacing};
}}

body {{ margin: 0; font-family: var(--font-body); color: var(--color-primary); }}
h1, h2, h3 {{ font-family: var(--font-heading); font-weight: var(--heading-weight); letter-spacing: var(--letter-spacing); }}
a.cta {{ background: var(--color-accent); color: #fff; border-radius: var(--radius); padding: .75rem 1.5rem; text-decoration: none; display: inline-block; }}
.hero {{ background-size: cover; background-position: center; padding: 6rem 2rem; color: #fff; }}
.section {{ padding: 3rem 2rem; max-width: 72rem; margin: 0 auto; }}
.product-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; }}
.product-card {{ border: 1px solid #e5e7eb; border-radius: var(--radius); overflow: hidden; }}
.product-card img {{ width: 100%; aspect-ratio: 4 / 3; object-fit: cover; }}
.product-card > div {{ padding: 1rem; }}
blockquote {{ border-left: 3px solid var(--color-accent); margin: 1rem 0; padding-left: 1rem; }}
.map-embed iframe {{ width: 100%; min-height: 320px; border: 0; border-radius: var(--radius); }}
footer {{ background: var(--color-primary); color: #fff; padding: 2rem; }}"#,
        primary = style.primary_color,
        accent = style.accent_color,
        radius = style.corner_radius,
        heading_font = style.heading_font,
        body_font = style.body_font,
        weight = style.heading_weight,
        spacing = style.letter_spacing,
    )
}

// ============================================================================
// Document structure
// ============================================================================

/// Renders the base HTML document shell shared by home and about.
fn base_document(title: &str, ctx: &SiteContext, content: Markup) -> Markup {
    let css = generate_style_css(&ctx.style);
    let body_class = format!("layout-{}", sanitize_filename(&ctx.style.layout));
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !ctx.meta_description.is_empty() {
                    meta name="description" content=(ctx.meta_description);
                }
                @if !ctx.keywords.is_empty() {
                    meta name="keywords" content=(ctx.keywords);
                }
                @if !ctx.style.gsc_tag.is_empty() {
                    meta name="google-site-verification" content=(ctx.style.gsc_tag);
                }
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Renders the shared page header: logo, business name, category line.
fn site_header(ctx: &SiteContext) -> Markup {
    html! {
        header.site-header {
            @if !ctx.logo_url.is_empty() {
                img.logo src=(ctx.logo_url) alt=(ctx.name) width="56";
            }
            div {
                span.site-name { (ctx.name) }
                @if !ctx.category.is_empty() {
                    span.site-category { (ctx.category) }
                }
            }
            nav {
                a href="index.html" { "Home" }
                " "
                a href="about.html" { "About" }
                " "
                a href="contact.html" { "Contact" }
            }
        }
    }
}

/// Renders the shared footer: contact details, messaging link, legal links.
fn site_footer(ctx: &SiteContext) -> Markup {
    html! {
        footer {
            p.footer-name { (ctx.name) }
            @if !ctx.address.is_empty() {
                p.footer-address { (PreEscaped(ctx.address.clone())) }
            }
            @if !ctx.hours.is_empty() {
                p.footer-hours { (ctx.hours) }
            }
            p.footer-contact {
                @if !ctx.phone.is_empty() {
                    a href={ "tel:" (ctx.phone_digits) } { (ctx.phone) }
                    " · "
                }
                @if !ctx.phone_digits.is_empty() {
                    a href={ "https://wa.me/" (ctx.phone_digits) } { "WhatsApp" }
                    " · "
                }
                @if !ctx.email.is_empty() {
                    a href={ "mailto:" (ctx.email) } { (ctx.email) }
                }
            }
            p.footer-legal {
                a href="privacy.html" { "Privacy Policy" }
                " · "
                a href="terms.html" { "Terms & Conditions" }
            }
        }
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Renders the landing page.
fn render_home(ctx: &SiteContext) -> Markup {
    let hero_style = format!("background-image:url('{}')", ctx.hero_image);
    let content = html! {
        (site_header(ctx))
        section.hero style=(hero_style) {
            h1 { (ctx.hero_headline) }
            @if !ctx.category.is_empty() {
                p.hero-category { (ctx.category) }
            }
            @if !ctx.phone_digits.is_empty() {
                a.cta href={ "https://wa.me/" (ctx.phone_digits) } { "Message Us" }
            }
        }
        @if !ctx.services.is_empty() {
            section.section.services {
                h2 { "Our Services" }
                // One h3 per service: each listing is its own crawlable heading.
                @for service in &ctx.services {
                    h3 { (PreEscaped(service.clone())) }
                }
            }
        }
        @if !ctx.service_areas.is_empty() {
            section.section.areas {
                h2 { "Areas We Serve" }
                ul {
                    @for area in &ctx.service_areas {
                        li { (area) }
                    }
                }
            }
        }
        @if !ctx.products.is_empty() {
            section.section.products {
                h2 { "Our Collection" }
                div.product-grid {
                    @for product in &ctx.products {
                        div.product-card {
                            @if !product.image.is_empty() {
                                img src=(product.image) alt=(product.name) loading="lazy";
                            }
                            div {
                                h3 { (product.name) }
                                @if !product.price.is_empty() {
                                    p.price { (product.price) }
                                }
                                @if !product.description.is_empty() {
                                    p { (product.description) }
                                }
                            }
                        }
                    }
                }
            }
        }
        @if !ctx.testimonials.is_empty() {
            section.section.testimonials {
                h2 { "What Clients Say" }
                @for testimonial in &ctx.testimonials {
                    blockquote {
                        p { (PreEscaped(testimonial.quote.clone())) }
                        @if !testimonial.name.is_empty() {
                            cite { (PreEscaped(testimonial.name.clone())) }
                        }
                    }
                }
            }
        }
        @if !ctx.faqs.is_empty() {
            section.section.faqs {
                h2 { "Frequently Asked Questions" }
                @for faq in &ctx.faqs {
                    details {
                        summary { (PreEscaped(faq.question.clone())) }
                        @if !faq.answer.is_empty() {
                            p { (PreEscaped(faq.answer.clone())) }
                        }
                    }
                }
            }
        }
        @if !ctx.map_embed.is_empty() {
            section.section.map-embed {
                h2 { "Find Us" }
                (PreEscaped(ctx.map_embed.clone()))
            }
        }
        (site_footer(ctx))
    };

    base_document(&ctx.name, ctx, content)
}

/// Renders the informational page (authority story).
fn render_about(ctx: &SiteContext) -> Markup {
    let title = format!("About - {}", ctx.name);
    let content = html! {
        (site_header(ctx))
        section.section.about {
            h1 { "About " (ctx.name) }
            img.feature src=(ctx.feature_image) alt=(ctx.name) loading="lazy";
            @if !ctx.about.is_empty() {
                div.about-body { (PreEscaped(ctx.about.clone())) }
            }
            img.gallery src=(ctx.gallery_image) alt=(ctx.name) loading="lazy";
        }
        (site_footer(ctx))
    };

    base_document(&title, ctx, content)
}
