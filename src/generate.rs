//! Site generation and packaging.
//!
//! The final stage of a build. Takes the assembled [`SiteContext`] and a
//! [`Renderer`] and produces the complete document set, packaged as a
//! deflate zip archive held in memory.
//!
//! ## Generated Documents
//!
//! ```text
//! index.html      # Landing page (Template::Home)
//! about.html      # Informational page (Template::About)
//! contact.html    # Byte-identical copy of about.html — intentional reuse
//! privacy.html    # Minimal shell around the sanitized privacy body
//! terms.html      # Minimal shell around the sanitized terms body
//! 404.html        # Fixed placeholder
//! robots.txt      # Crawl policy + sitemap pointer
//! sitemap.xml     # Home and about URLs under the production URL
//! ```
//!
//! The contact page mirroring the about page is deliberate content reuse
//! carried over from the source site format, not a defect to fix.
//!
//! ## Packaging
//!
//! Documents are keyed by filename in a `BTreeMap`, so no two can collide
//! and archive entry order is stable. Each call builds into a fresh
//! buffer — nothing is shared across builds.

use crate::context::SiteContext;
use crate::render::{Renderer, Template};
use crate::sanitize::{clean_html, sanitize_filename};
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Build the full named document set.
///
/// Always exactly eight documents, whatever is or isn't filled in the
/// context — empty fields degrade to empty sections, never to missing
/// files.
pub fn build_site(ctx: &SiteContext, renderer: &dyn Renderer) -> BTreeMap<String, String> {
    let mut documents = BTreeMap::new();

    let home = renderer.render(Template::Home, ctx);
    let about = renderer.render(Template::About, ctx);
    // Intentional duplication: the contact page reuses the about page.
    let contact = about.clone();

    documents.insert("index.html".to_string(), home);
    documents.insert("about.html".to_string(), about);
    documents.insert("contact.html".to_string(), contact);
    documents.insert(
        "privacy.html".to_string(),
        wrap_basic("Privacy Policy", &ctx.privacy),
    );
    documents.insert(
        "terms.html".to_string(),
        wrap_basic("Terms & Conditions", &ctx.terms),
    );
    documents.insert(
        "404.html".to_string(),
        wrap_basic("404 - Not Found", "<h1>404</h1><p>Not Found</p>"),
    );
    documents.insert("robots.txt".to_string(), robots_txt(&ctx.production_url));
    documents.insert("sitemap.xml".to_string(), sitemap_xml(&ctx.production_url));

    documents
}

/// Render all documents and package them into an in-memory zip archive.
pub fn build_zip(ctx: &SiteContext, renderer: &dyn Renderer) -> Result<Vec<u8>, BuildError> {
    zip_documents(&build_site(ctx, renderer))
}

/// Package an already-built document set into a deflate zip archive.
pub fn zip_documents(documents: &BTreeMap<String, String>) -> Result<Vec<u8>, BuildError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (filename, body) in documents {
        writer.start_file(filename, options)?;
        writer.write_all(body.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Download filename for the packaged archive: `<name>_final.zip`.
pub fn archive_filename(ctx: &SiteContext) -> String {
    format!("{}_final.zip", sanitize_filename(&ctx.name))
}

/// Wrap an already-sanitized body in a minimal standalone HTML shell.
///
/// The body is cleaned again on the way in — idempotent for everything the
/// assembler produced, and a second fence for the fixed strings built here.
fn wrap_basic(title: &str, body_html: &str) -> String {
    let body_safe = clean_html(body_html);
    format!(
        r#"<!doctype html><html><head><meta charset="utf-8"><title>{title}</title></head><body><main><h1>{title}</h1><div>{body_safe}</div></main></body></html>"#
    )
}

/// Crawl policy pointing at the sitemap under the production URL.
fn robots_txt(prod_url: &str) -> String {
    format!("User-agent: *\nAllow: /\nSitemap: {prod_url}sitemap.xml")
}

/// Minimal sitemap-protocol document: home and about under the production
/// URL (which is either empty or `/`-terminated by assembly).
fn sitemap_xml(prod_url: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <urlset xmlns='http://www.sitemaps.org/schemas/sitemap/0.9'>\
         <url><loc>{prod_url}index.html</loc></url>\
         <url><loc>{prod_url}about.html</loc></url>\
         </urlset>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfig;
    use crate::context::assemble_with_products;
    use crate::render::MaudRenderer;
    use std::io::Read;

    const EXPECTED_FILES: &[&str] = &[
        "404.html",
        "about.html",
        "contact.html",
        "index.html",
        "privacy.html",
        "robots.txt",
        "sitemap.xml",
        "terms.html",
    ];

    fn empty_context() -> SiteContext {
        assemble_with_products(&RawConfig::default(), Vec::new())
    }

    fn full_context() -> SiteContext {
        let mut raw = RawConfig::default();
        raw.business.name = "Red Hippo".to_string();
        raw.business.production_url = "https://kani.github.io/site".to_string();
        raw.legal.privacy = "<p>We keep data safe.</p>".to_string();
        raw.legal.terms = "<p>Payment due on booking.</p>".to_string();
        assemble_with_products(&raw, Vec::new())
    }

    // =========================================================================
    // Document set
    // =========================================================================

    #[test]
    fn always_eight_documents() {
        for ctx in [empty_context(), full_context()] {
            let documents = build_site(&ctx, &MaudRenderer);
            let names: Vec<&str> = documents.keys().map(String::as_str).collect();
            assert_eq!(names, EXPECTED_FILES);
        }
    }

    #[test]
    fn contact_mirrors_about_exactly() {
        let documents = build_site(&full_context(), &MaudRenderer);
        assert_eq!(documents["contact.html"], documents["about.html"]);
    }

    #[test]
    fn legal_pages_wrap_sanitized_bodies() {
        let documents = build_site(&full_context(), &MaudRenderer);
        let privacy = &documents["privacy.html"];
        assert!(privacy.contains("<title>Privacy Policy</title>"));
        assert!(privacy.contains("<p>We keep data safe.</p>"));
        let terms = &documents["terms.html"];
        assert!(terms.contains("Payment due on booking."));
    }

    #[test]
    fn legal_shell_strips_scripts() {
        let mut raw = RawConfig::default();
        raw.legal.privacy = "<script>bad()</script><p>ok</p>".to_string();
        let ctx = assemble_with_products(&raw, Vec::new());
        let documents = build_site(&ctx, &MaudRenderer);
        assert!(!documents["privacy.html"].contains("<script"));
        assert!(documents["privacy.html"].contains("<p>ok</p>"));
    }

    #[test]
    fn not_found_page_is_fixed() {
        let documents = build_site(&empty_context(), &MaudRenderer);
        assert!(documents["404.html"].contains("<h1>404</h1>"));
    }

    // =========================================================================
    // SEO artifacts
    // =========================================================================

    #[test]
    fn robots_points_at_sitemap() {
        let documents = build_site(&full_context(), &MaudRenderer);
        assert_eq!(
            documents["robots.txt"],
            "User-agent: *\nAllow: /\nSitemap: https://kani.github.io/site/sitemap.xml"
        );
    }

    #[test]
    fn sitemap_lists_home_and_about() {
        let documents = build_site(&full_context(), &MaudRenderer);
        let sitemap = &documents["sitemap.xml"];
        assert!(sitemap.contains("<loc>https://kani.github.io/site/index.html</loc>"));
        assert!(sitemap.contains("<loc>https://kani.github.io/site/about.html</loc>"));
        assert!(sitemap.contains("http://www.sitemaps.org/schemas/sitemap/0.9"));
    }

    #[test]
    fn seo_artifacts_survive_empty_production_url() {
        let documents = build_site(&empty_context(), &MaudRenderer);
        assert!(documents["robots.txt"].contains("Sitemap: sitemap.xml"));
        assert!(documents["sitemap.xml"].contains("<loc>index.html</loc>"));
    }

    // =========================================================================
    // Archive
    // =========================================================================

    #[test]
    fn zip_contains_all_documents() {
        let bytes = build_zip(&full_context(), &MaudRenderer).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), EXPECTED_FILES.len());

        let mut names: Vec<String> = Vec::new();
        for i in 0..archive.len() {
            names.push(archive.by_index(i).unwrap().name().to_string());
        }
        names.sort();
        assert_eq!(names, EXPECTED_FILES);
    }

    #[test]
    fn zip_entries_round_trip() {
        let ctx = full_context();
        let documents = build_site(&ctx, &MaudRenderer);
        let bytes = build_zip(&ctx, &MaudRenderer).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut entry = archive.by_name("robots.txt").unwrap();
        let mut body = String::new();
        entry.read_to_string(&mut body).unwrap();
        assert_eq!(body, documents["robots.txt"]);
    }

    #[test]
    fn zip_of_empty_config_still_has_eight_entries() {
        let bytes = build_zip(&empty_context(), &MaudRenderer).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 8);
    }

    // =========================================================================
    // Archive filename
    // =========================================================================

    #[test]
    fn archive_filename_from_business_name() {
        let ctx = full_context();
        assert_eq!(archive_filename(&ctx), "red_hippo_final.zip");
    }

    #[test]
    fn archive_filename_fallback() {
        // Blank name assembles to the placeholder, which still yields a
        // usable token.
        let ctx = empty_context();
        assert_eq!(archive_filename(&ctx), "business_name_final.zip");
    }
}
