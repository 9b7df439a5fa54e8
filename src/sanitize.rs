//! Content sanitization for user-supplied markup.
//!
//! Everything a site owner types into the config file — the authority story,
//! legal bodies, the pasted map embed — is untrusted HTML. This module
//! normalizes all of it into a safe subset before the renderer ever sees it.
//!
//! ## Operations
//!
//! | Function | Input | Guarantee |
//! |----------|-------|-----------|
//! | [`clean_html`] | free-text HTML | no script-execution vectors, benign tags kept |
//! | [`clean_iframe`] | pasted embed markup | empty, or a single allow-listed `<iframe>` |
//! | [`validate_url`] | any string | true iff absolute http(s) URL with a host |
//! | [`ensure_trailing_slash`] | base URL | ends with `/` unless empty |
//! | [`sanitize_filename`] | display name | safe `[a-z0-9_-]` token, never empty |
//!
//! ## Totality
//!
//! Every function here is total: it has a defined output for every input
//! string — empty, whitespace-only, or adversarial — and none of them panic
//! or return errors. Malformed markup is recovered best-effort, never
//! surfaced to the caller.
//!
//! ## Idempotence
//!
//! `clean_html` is idempotent: cleaning an already-clean string returns it
//! unchanged. The context assembler depends on this — fields may pass
//! through the cleaner more than once (e.g. legal bodies are cleaned at
//! assembly and again when wrapped into their page shell).

use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use url::Url;

/// Tags that survive [`clean_html`]: structural and inline formatting only.
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "i", "img", "li", "ol", "p", "pre", "span", "strong", "u", "ul",
];

/// Tags removed together with their content (not just the tag itself).
const STRIPPED_CONTENT_TAGS: &[&str] = &["script", "style", "object", "embed"];

/// URL schemes permitted in `href`/`src` attributes. `javascript:` and
/// `data:` are not here, which is the point.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Hosts whose iframes are accepted by [`clean_iframe`]. Exact equality —
/// suffix matching would admit look-alike registrations.
const IFRAME_HOST_ALLOWLIST: &[&str] = &[
    "www.google.com",
    "maps.google.com",
    "google.com",
    "www.openstreetmap.org",
    "openstreetmap.org",
];

/// Attributes retained on a rebuilt iframe, in output order.
const IFRAME_ATTR_ALLOWLIST: &[&str] = &[
    "src",
    "width",
    "height",
    "style",
    "loading",
    "allowfullscreen",
    "referrerpolicy",
];

/// Fallback token for [`sanitize_filename`] when nothing survives.
const FILENAME_FALLBACK: &str = "site";

static HTML_CLEANER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .tags(HashSet::from_iter(ALLOWED_TAGS.iter().copied()))
        .clean_content_tags(HashSet::from_iter(STRIPPED_CONTENT_TAGS.iter().copied()))
        .tag_attributes(HashMap::from([
            ("a", HashSet::from(["href", "title"])),
            ("img", HashSet::from(["src", "alt"])),
        ]))
        .generic_attributes(HashSet::new())
        .url_schemes(HashSet::from_iter(ALLOWED_URL_SCHEMES.iter().copied()))
        .link_rel(None);
    builder
});

static IFRAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("iframe").expect("iframe selector is valid"));

/// Clean free-text HTML down to the allow-listed formatting subset.
///
/// Script-execution vectors — `<script>`/`<style>`/`<object>`/`<embed>`
/// tags (content included), `on*` event attributes, `javascript:` and
/// `data:` URIs — are removed. Headings, paragraphs, lists, emphasis, and
/// anchors with safe schemes are preserved. Malformed markup is recovered
/// best-effort; this never panics.
pub fn clean_html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    HTML_CLEANER.clean(input).to_string()
}

/// Constrain pasted embed markup to a single safe map iframe.
///
/// Returns the empty string when the input has no iframe, or when the
/// iframe's `src` host is not a known map provider — an unsafe embed is
/// rejected silently rather than surfaced. Otherwise a minimal iframe is
/// rebuilt carrying only the allow-listed attributes; sibling markup,
/// nested content, and script vectors are discarded.
pub fn clean_iframe(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(input);
    let Some(element) = fragment.select(&IFRAME_SELECTOR).next() else {
        return String::new();
    };

    let Some(src) = element.value().attr("src") else {
        return String::new();
    };
    if !host_is_allowed(src) {
        return String::new();
    }

    let mut out = String::from("<iframe");
    for name in IFRAME_ATTR_ALLOWLIST {
        if let Some(value) = element.value().attr(name) {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push_str("></iframe>");
    out
}

/// True iff the string parses as an absolute http(s) URL with a non-empty
/// host. No network access.
pub fn validate_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Normalize a base URL to end with exactly one `/`.
///
/// Empty input stays empty — never a bare separator.
pub fn ensure_trailing_slash(input: &str) -> String {
    if input.is_empty() || input.ends_with('/') {
        input.to_string()
    } else {
        format!("{input}/")
    }
}

/// Reduce a display name to a safe filename token.
///
/// Lowercases, collapses whitespace runs to `_`, and strips everything
/// outside `[a-z0-9_-]`. Falls back to `"site"` when nothing survives.
pub fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;
    for c in input.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        }
    }
    if out.is_empty() {
        FILENAME_FALLBACK.to_string()
    } else {
        out
    }
}

/// Check an iframe `src` against the map-provider host allow-list.
fn host_is_allowed(src: &str) -> bool {
    match Url::parse(src) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url
                    .host_str()
                    .is_some_and(|host| IFRAME_HOST_ALLOWLIST.contains(&host))
        }
        Err(_) => false,
    }
}

/// Escape a string for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
