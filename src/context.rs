//! Context assembly: raw config in, render-safe context out.
//!
//! The bridge between the untrusted key/value config and the renderer.
//! [`assemble`] runs every free-text field through the sanitizer, explodes
//! the comma/newline-joined lists into ordered sequences, constrains the
//! map embed, derives the messaging phone number, pulls the product feed,
//! and fills fixed fallbacks — producing one [`SiteContext`] the renderer
//! can consume without a single defensive check.
//!
//! ## Determinism
//!
//! Assembly is a pure transformation apart from the feed fetch: identical
//! config plus identical remote feed state yields an identical context.
//! When no feed URL is configured, no network access happens at all.
//! [`assemble_with_products`] is the fully pure core, used directly by
//! tests and by the offline `check` command.
//!
//! ## Ownership
//!
//! A `SiteContext` is constructed fresh per build or preview and owned
//! exclusively by that call — no shared mutable state across builds.

use crate::config::{RawConfig, StyleConfig};
use crate::feed::{self, Product};
use crate::sanitize::{clean_html, clean_iframe, ensure_trailing_slash};
use serde::Serialize;

/// Fallback image URLs for blank hero/feature/gallery slots.
const FALLBACK_HERO: &str =
    "https://images.unsplash.com/photo-1519741497674-611481863552?auto=format&fit=crop&q=80&w=1600";
const FALLBACK_FEATURE: &str =
    "https://images.unsplash.com/photo-1511795409834-ef04bbd61622?auto=format&fit=crop&q=80&w=800";
const FALLBACK_GALLERY: &str =
    "https://images.unsplash.com/photo-1532712938310-34cb3982ef74?auto=format&fit=crop&q=80&w=1600";

/// Placeholder business name when the config leaves it blank.
const FALLBACK_NAME: &str = "Business Name";

/// A single client voice, parsed from a `Name | Quote` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub quote: String,
}

/// A question/answer pair, parsed from a `Question? ? Answer` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// The canonical, template-safe context consumed by rendering.
///
/// Every field is guaranteed present with a type-stable default (empty
/// string / empty vec), every text field is sanitized, and the map embed
/// is either empty or a single allow-listed iframe.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    // Identity
    pub name: String,
    pub phone: String,
    /// Digits-only phone for messaging links (`wa.me/<digits>`).
    pub phone_digits: String,
    pub email: String,
    pub category: String,
    pub hours: String,
    pub address: String,
    pub logo_url: String,
    /// Always empty or `/`-terminated.
    pub production_url: String,
    pub service_areas: Vec<String>,
    /// Empty, or a single sanitized `<iframe>` tag.
    pub map_embed: String,

    // Content
    pub hero_headline: String,
    pub meta_description: String,
    pub keywords: String,
    pub about: String,
    pub services: Vec<String>,

    // Images (never blank — fallbacks applied)
    pub hero_image: String,
    pub feature_image: String,
    pub gallery_image: String,

    // Commerce & social proof
    pub products: Vec<Product>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,

    // Legal
    pub privacy: String,
    pub terms: String,

    // Styling tokens, passed through untouched
    pub style: StyleConfig,
}

/// Assemble the canonical context, fetching the product feed when a feed
/// URL is configured. The fetch is the only side effect; it degrades to an
/// empty product list on any failure.
pub fn assemble(raw: &RawConfig) -> SiteContext {
    let feed_url = raw.feed.url.trim();
    let products = if feed_url.is_empty() {
        Vec::new()
    } else {
        feed::fetch_products(feed_url)
    };
    assemble_with_products(raw, products)
}

/// The pure assembly core: same as [`assemble`] but with the product list
/// supplied by the caller. No network access.
pub fn assemble_with_products(raw: &RawConfig, products: Vec<Product>) -> SiteContext {
    let name = clean_html(raw.business.name.trim());
    let name = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    };

    SiteContext {
        name,
        phone: raw.business.phone.trim().to_string(),
        phone_digits: phone_digits(&raw.business.phone),
        email: clean_html(raw.business.email.trim()),
        category: clean_html(raw.business.category.trim()),
        hours: clean_html(raw.business.hours.trim()),
        address: clean_html(raw.business.address.trim()),
        logo_url: raw.business.logo_url.trim().to_string(),
        production_url: ensure_trailing_slash(raw.business.production_url.trim()),
        service_areas: split_list(&raw.business.service_areas, ','),
        map_embed: clean_iframe(&raw.business.map_embed),

        hero_headline: clean_html(raw.content.hero_headline.trim()),
        meta_description: clean_html(raw.content.meta_description.trim()),
        keywords: clean_html(raw.content.keywords.trim()),
        about: clean_html(raw.content.about.trim()),
        services: split_lines_clean(&raw.content.services),

        hero_image: or_fallback(&raw.images.hero, FALLBACK_HERO),
        feature_image: or_fallback(&raw.images.feature, FALLBACK_FEATURE),
        gallery_image: or_fallback(&raw.images.gallery, FALLBACK_GALLERY),

        products,
        testimonials: parse_testimonials(&raw.social.testimonials),
        faqs: parse_faqs(&raw.social.faqs),

        privacy: clean_html(raw.legal.privacy.trim()),
        terms: clean_html(raw.legal.terms.trim()),

        style: raw.style.clone(),
    }
}

/// Split on a separator, trim each piece, drop empties, preserve order.
fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on line breaks, trim, drop blank lines, clean each survivor.
fn split_lines_clean(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(clean_html)
        .collect()
}

/// Digits-only phone value for messaging links. A leading `+` and all
/// separators are dropped.
fn phone_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn or_fallback(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse `Name | Quote` lines. A line without `|` keeps the whole line as
/// the quote with an empty name.
fn parse_testimonials(raw: &str) -> Vec<Testimonial> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('|') {
            Some((name, quote)) => Testimonial {
                name: clean_html(name.trim()),
                quote: clean_html(quote.trim()),
            },
            None => Testimonial {
                name: String::new(),
                quote: clean_html(line),
            },
        })
        .collect()
}

/// Parse `Question? ? Answer` lines, split on the standalone ` ? `
/// separator so the question keeps its own question mark. A line without
/// the separator becomes a question with an empty answer.
fn parse_faqs(raw: &str) -> Vec<Faq> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(" ? ") {
            Some((question, answer)) => Faq {
                question: clean_html(question.trim()),
                answer: clean_html(answer.trim()),
            },
            None => Faq {
                question: clean_html(line),
                answer: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfig;

    fn assemble_offline(raw: &RawConfig) -> SiteContext {
        assemble_with_products(raw, Vec::new())
    }

    // =========================================================================
    // List splitting
    // =========================================================================

    #[test]
    fn areas_split_trim_and_keep_order() {
        let mut raw = RawConfig::default();
        raw.business.service_areas = "A, B ,C".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.service_areas, vec!["A", "B", "C"]);
    }

    #[test]
    fn areas_drop_empty_pieces() {
        let mut raw = RawConfig::default();
        raw.business.service_areas = "A,,  ,B,".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.service_areas, vec!["A", "B"]);
    }

    #[test]
    fn services_split_on_lines_dropping_blanks() {
        let mut raw = RawConfig::default();
        raw.content.services = "Line1\n\nLine2".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.services, vec!["Line1", "Line2"]);
    }

    #[test]
    fn services_are_cleaned() {
        let mut raw = RawConfig::default();
        raw.content.services = "Decor<script>x()</script>\nLighting".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.services.len(), 2);
        assert!(!ctx.services[0].contains("script"));
    }

    // =========================================================================
    // Field normalization
    // =========================================================================

    #[test]
    fn production_url_gets_trailing_slash() {
        let mut raw = RawConfig::default();
        raw.business.production_url = "https://x.com".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.production_url, "https://x.com/");
    }

    #[test]
    fn empty_production_url_stays_empty() {
        let ctx = assemble_offline(&RawConfig::default());
        assert_eq!(ctx.production_url, "");
    }

    #[test]
    fn phone_digits_strips_formatting() {
        let mut raw = RawConfig::default();
        raw.business.phone = "+91 84540-02711".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.phone_digits, "918454002711");
        // The display value keeps its formatting.
        assert_eq!(ctx.phone, "+91 84540-02711");
    }

    #[test]
    fn free_text_fields_are_cleaned() {
        let mut raw = RawConfig::default();
        raw.content.about = "<p>Story</p><script>bad()</script>".to_string();
        raw.legal.privacy = "<h2>Policy</h2><embed src='x'>".to_string();
        let ctx = assemble_offline(&raw);
        assert!(ctx.about.contains("<p>Story</p>"));
        assert!(!ctx.about.contains("script"));
        assert!(ctx.privacy.contains("<h2>Policy</h2>"));
        assert!(!ctx.privacy.contains("embed"));
    }

    #[test]
    fn unsafe_map_embed_is_dropped() {
        let mut raw = RawConfig::default();
        raw.business.map_embed = r#"<iframe src="https://evil.example/x"></iframe>"#.to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.map_embed, "");
    }

    #[test]
    fn safe_map_embed_survives() {
        let mut raw = RawConfig::default();
        raw.business.map_embed =
            r#"<iframe src="https://www.google.com/maps/embed?pb=1" width="600"></iframe>"#
                .to_string();
        let ctx = assemble_offline(&raw);
        assert!(ctx.map_embed.starts_with("<iframe "));
        assert!(ctx.map_embed.contains("maps/embed"));
    }

    #[test]
    fn blank_name_falls_back() {
        let ctx = assemble_offline(&RawConfig::default());
        assert_eq!(ctx.name, "Business Name");
    }

    #[test]
    fn blank_image_slots_get_fallbacks() {
        let ctx = assemble_offline(&RawConfig::default());
        assert!(ctx.hero_image.starts_with("https://images.unsplash.com/"));
        assert!(ctx.feature_image.starts_with("https://images.unsplash.com/"));
        assert!(ctx.gallery_image.starts_with("https://images.unsplash.com/"));
    }

    #[test]
    fn provided_images_are_kept() {
        let mut raw = RawConfig::default();
        raw.images.hero = "https://cdn.example/hero.jpg".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.hero_image, "https://cdn.example/hero.jpg");
    }

    #[test]
    fn style_tokens_pass_through() {
        let mut raw = RawConfig::default();
        raw.style.primary_color = "#abcdef".to_string();
        raw.style.layout = "royal".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.style.primary_color, "#abcdef");
        assert_eq!(ctx.style.layout, "royal");
    }

    // =========================================================================
    // Social proof parsing
    // =========================================================================

    #[test]
    fn testimonials_parse_name_and_quote() {
        let mut raw = RawConfig::default();
        raw.social.testimonials = "Aramco | Reliable Partner.\nNEOM | Best in class.".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(
            ctx.testimonials,
            vec![
                Testimonial {
                    name: "Aramco".into(),
                    quote: "Reliable Partner.".into()
                },
                Testimonial {
                    name: "NEOM".into(),
                    quote: "Best in class.".into()
                },
            ]
        );
    }

    #[test]
    fn testimonial_without_pipe_is_quote_only() {
        let mut raw = RawConfig::default();
        raw.social.testimonials = "Just a kind word.".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.testimonials[0].name, "");
        assert_eq!(ctx.testimonials[0].quote, "Just a kind word.");
    }

    #[test]
    fn faqs_keep_question_mark() {
        let mut raw = RawConfig::default();
        raw.social.faqs = "Are you insured? ? Yes, fully.".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(
            ctx.faqs,
            vec![Faq {
                question: "Are you insured?".into(),
                answer: "Yes, fully.".into()
            }]
        );
    }

    #[test]
    fn faq_without_separator_has_empty_answer() {
        let mut raw = RawConfig::default();
        raw.social.faqs = "What areas do you cover".to_string();
        let ctx = assemble_offline(&raw);
        assert_eq!(ctx.faqs[0].answer, "");
    }

    // =========================================================================
    // Defaults never crash
    // =========================================================================

    #[test]
    fn empty_config_assembles_with_stable_defaults() {
        let ctx = assemble_offline(&RawConfig::default());
        assert!(ctx.service_areas.is_empty());
        assert!(ctx.services.is_empty());
        assert!(ctx.products.is_empty());
        assert!(ctx.testimonials.is_empty());
        assert!(ctx.faqs.is_empty());
        assert_eq!(ctx.map_embed, "");
        assert_eq!(ctx.phone_digits, "");
    }

    #[test]
    fn no_feed_url_means_no_products() {
        // assemble() with a blank feed URL must not attempt any fetch.
        let ctx = assemble(&RawConfig::default());
        assert!(ctx.products.is_empty());
    }

    #[test]
    fn context_serializes_to_json() {
        let ctx = assemble_offline(&RawConfig::default());
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"production_url\""));
        assert!(json.contains("\"products\""));
    }
}
