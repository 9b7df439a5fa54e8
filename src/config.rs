//! Site configuration module.
//!
//! Handles loading and merging the `site.toml` config file — the stand-in
//! for whatever form layer collects business data. The file is a plain
//! key/value structure: every field is an optional string, and an absent
//! field must never crash downstream processing. Values land here **raw**
//! — unsanitized, untrimmed; the context assembler owns normalization.
//!
//! ## Config File Shape
//!
//! ```toml
//! [business]
//! name = "Red Hippo Planners"
//! phone = "+91 84540 02711"
//! production_url = "https://example.github.io/site/"
//! service_areas = "Vasant Kunj, Chhatarpur, South Delhi"
//! map_embed = '<iframe src="https://www.google.com/maps/embed?pb=1"></iframe>'
//!
//! [content]
//! hero_headline = "Crafting Dream Weddings"
//! services = """
//! Floral Decor
//! Thematic Lighting
//! """
//!
//! [feed]
//! url = "https://docs.google.com/spreadsheets/d/abc/edit#gid=0"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — every section and key is optional, and user
//! values are merged over stock defaults. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The unvalidated key/value structure produced by the config file.
///
/// All fields are raw strings (or raw multi-value strings still in their
/// comma/newline-joined form). Sanitization, splitting, and defaulting
/// happen in the context assembler, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Core business identity (name, contact, address, map embed).
    pub business: BusinessConfig,
    /// Page content: headline, meta description, services, authority story.
    pub content: ContentConfig,
    /// Image slot URLs; blank slots get fixed fallbacks at assembly.
    pub images: ImagesConfig,
    /// Product feed source.
    pub feed: FeedConfig,
    /// Social proof: testimonials and FAQs.
    pub social: SocialConfig,
    /// Legal page bodies.
    pub legal: LegalConfig,
    /// Visual styling tokens — opaque to the core, passed through.
    pub style: StyleConfig,
}

/// Core business identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub category: String,
    pub hours: String,
    pub address: String,
    /// Direct link to a logo image file.
    pub logo_url: String,
    /// Where the generated site will be deployed; used for sitemap/robots.
    pub production_url: String,
    /// Raw comma-separated list of served areas.
    pub service_areas: String,
    /// Raw pasted `<iframe>` markup from a map provider.
    pub map_embed: String,
}

/// Content and SEO fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub hero_headline: String,
    pub meta_description: String,
    /// Raw comma-separated SEO keywords.
    pub keywords: String,
    /// Raw newline-separated service listing, one service per line.
    pub services: String,
    /// Authority-story body; may contain HTML.
    pub about: String,
}

/// Image slot URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub hero: String,
    pub feature: String,
    pub gallery: String,
}

/// Product feed source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Published CSV link or Google Sheets editor URL. Blank = no feed.
    pub url: String,
}

/// Social proof blocks, one entry per line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    /// Raw `Name | Quote` lines.
    pub testimonials: String,
    /// Raw `Question? ? Answer` lines.
    pub faqs: String,
}

/// Legal page bodies; may contain HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalConfig {
    pub privacy: String,
    pub terms: String,
}

/// Visual styling tokens.
///
/// Opaque to the sanitization/assembly core: these flow into the renderer
/// unchanged. Defaults mirror the stock look rather than empty strings so
/// a minimal config still renders a styled page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub primary_color: String,
    pub accent_color: String,
    pub corner_radius: String,
    pub heading_font: String,
    pub body_font: String,
    pub heading_weight: String,
    pub letter_spacing: String,
    /// Layout variant selector; the renderer maps it to a body class.
    pub layout: String,
    /// Search Console verification token, rendered as a meta tag when set.
    pub gsc_tag: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            primary_color: "#0f172a".to_string(),
            accent_color: "#0ea5a6".to_string(),
            corner_radius: "24px".to_string(),
            heading_font: "Montserrat".to_string(),
            body_font: "Inter".to_string(),
            heading_weight: "900".to_string(),
            letter_spacing: "-0.02em".to_string(),
            layout: "industrial".to_string(),
            gsc_tag: String::new(),
        }
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// The canonical representation of all default values, used as the base
/// layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RawConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist; `Err` if it exists but
/// contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RawConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RawConfig = merged.try_into()?;
    Ok(config)
}

/// Load the config file at `path`, merging user values over stock defaults
/// and rejecting unknown keys. A missing file yields pure defaults.
pub fn load_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys documented.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitesmith configuration
# =======================
# All settings are optional. Remove or comment out any you don't need —
# a missing key becomes an empty value and the build still succeeds.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
[business]
name = ""
phone = ""
email = ""
category = ""
hours = ""
address = ""

# Direct link to a PNG/SVG logo file.
logo_url = ""

# Where the generated site will be deployed (https://...). Used to build
# sitemap.xml and robots.txt; a trailing slash is added automatically.
production_url = ""

# Served areas, comma separated: "Vasant Kunj, Chhatarpur, South Delhi"
service_areas = ""

# Paste the <iframe> embed from Google Maps or OpenStreetMap here.
# Anything that is not a single iframe from a known map host is dropped.
map_embed = ""

# ---------------------------------------------------------------------------
# Content & SEO
# ---------------------------------------------------------------------------
[content]
hero_headline = ""

# Meta description (aim for ~160 characters).
meta_description = ""

# SEO keywords, comma separated.
keywords = ""

# Services, one per line:
# services = """
# Floral Decor
# Thematic Lighting
# """
services = ""

# Authority story / about text. Basic HTML formatting is allowed;
# scripts and event handlers are stripped.
about = ""

# ---------------------------------------------------------------------------
# Image slots (blank slots get stock fallback images)
# ---------------------------------------------------------------------------
[images]
hero = ""
feature = ""
gallery = ""

# ---------------------------------------------------------------------------
# Product feed
# ---------------------------------------------------------------------------
[feed]
# Published CSV link, or a Google Sheets editor URL (rewritten to CSV
# export automatically). Columns: Name | Price | Description | Image.
# Blank = no product section, no network access.
url = ""

# ---------------------------------------------------------------------------
# Social proof, one entry per line
# ---------------------------------------------------------------------------
[social]
# testimonials = """
# Aramco | Reliable Partner.
# NEOM | Best in class.
# """
testimonials = ""

# faqs = """
# Are you certified? ? Yes, we are ISO compliant.
# """
faqs = ""

# ---------------------------------------------------------------------------
# Legal pages
# ---------------------------------------------------------------------------
[legal]
privacy = ""
terms = ""

# ---------------------------------------------------------------------------
# Styling tokens (passed through to the renderer)
# ---------------------------------------------------------------------------
[style]
primary_color = "#0f172a"
accent_color = "#0ea5a6"
corner_radius = "24px"
heading_font = "Montserrat"
body_font = "Inter"
heading_weight = "900"
letter_spacing = "-0.02em"

# Layout variant; becomes a body class on every page.
layout = "industrial"

# Search Console verification content ("google-site-verification=..."),
# rendered as a meta tag when set.
gsc_tag = ""
"##
}
