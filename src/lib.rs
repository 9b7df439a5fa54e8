//! # sitesmith
//!
//! A minimal static site generator for small-business marketing sites.
//! Your config file is the data source: one TOML file of business identity,
//! content, an optional product feed URL, and styling tokens becomes a
//! ready-to-deploy zip archive of static pages plus SEO artifacts.
//!
//! # Architecture: Sanitize → Assemble → Build
//!
//! A build is one synchronous pipeline over a single context structure:
//!
//! ```text
//! 1. Load      site.toml  →  RawConfig      (raw key/value strings)
//! 2. Assemble  RawConfig  →  SiteContext    (sanitized + feed + defaults)
//! 3. Build     SiteContext → documents      (8 named files → zip archive)
//! ```
//!
//! The separation exists for three reasons:
//!
//! - **Safety**: everything untrusted is normalized in one place (stage 2);
//!   the renderer never sees a raw config value.
//! - **Determinism**: stage 2 is pure apart from the bounded feed fetch, so
//!   identical input yields an identical archive.
//! - **Testability**: every stage is a function from value to value; unit
//!   tests exercise pipeline logic without touching the network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading: raw string fields, stock defaults, merge, unknown-key rejection |
//! | [`sanitize`] | Total cleaning functions: HTML, iframe embeds, URLs, filenames |
//! | [`feed`] | Product feed ingestion: sheet-URL rewrite, dialect sniffing, schema normalization |
//! | [`context`] | Context assembly — merges config with sanitizer/ingester outputs |
//! | [`render`] | The `Renderer` seam and the Maud-backed implementation |
//! | [`generate`] | Document set construction and zip packaging |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Allow-Lists Over Block-Lists
//!
//! All content safety is allow-list based: a fixed tag/attribute set for
//! free text (via [ammonia](https://docs.rs/ammonia)), a fixed host and
//! attribute set for map iframes, a fixed scheme set for URLs. Unknown
//! input is dropped, not escaped around.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, behind the [`render::Renderer`] trait:
//!
//! - **Compile-time checking**: malformed HTML is a build error.
//! - **XSS-safe by default**: all interpolation is auto-escaped; raw
//!   insertion (`PreEscaped`) is reserved for fields this crate sanitized.
//! - **Swappable**: the builder depends only on the trait, so any engine
//!   satisfying `render(template, context) -> String` slots in.
//!
//! ## Feeds Fail Open
//!
//! The product feed is optional third-party data. Every failure mode —
//! unreachable host, non-success status, timeout, unparseable rows —
//! degrades to an empty product list. A build never breaks because a
//! spreadsheet moved.
//!
//! ## One Context, No Defensive Checks
//!
//! [`context::SiteContext`] guarantees every field is present with a
//! type-stable default. Templates read fields directly; there is no
//! null-checking layer between assembly and rendering.

pub mod config;
pub mod context;
pub mod feed;
pub mod generate;
pub mod output;
pub mod render;
pub mod sanitize;
