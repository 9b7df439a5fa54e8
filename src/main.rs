use clap::{Parser, Subcommand};
use sitesmith::render::{MaudRenderer, Renderer, Template};
use sitesmith::{config, context, generate, output, sanitize};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(about = "Static site generator for small-business marketing sites")]
#[command(long_about = "\
Static site generator for small-business marketing sites

Your config file is the data source. Fill in business identity, content,
an optional product feed, and styling tokens; sitesmith sanitizes every
field, pulls the feed, and packages a ready-to-deploy site.

Generated archive contents:

  index.html      Landing page (hero, services, products, social proof)
  about.html      Authority story
  contact.html    Mirror of the about page
  privacy.html    Legal shell
  terms.html      Legal shell
  404.html        Placeholder
  robots.txt      Crawl policy + sitemap pointer
  sitemap.xml     Home and about URLs

Content safety:
  Free text:   script tags, event handlers, and javascript:/data: URIs
               are stripped; formatting tags survive.
  Map embed:   only a single iframe from a known map host survives.
  Feed:        CSV or pipe-delimited, dialect auto-detected, header
               auto-skipped; an unreachable feed never fails the build.

Run 'sitesmith gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site and package it as a zip archive
    Build {
        /// Archive output path (default: <business-name>_final.zip)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the landing page only, without packaging
    Preview {
        /// Output path for the rendered page
        #[arg(long, default_value = "index.html")]
        out: PathBuf,
        /// Dump the assembled context as JSON instead of rendering
        #[arg(long)]
        context: bool,
    },
    /// Validate the config and report assembled content, without building
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { out } => {
            let raw = config::load_config(&cli.config)?;
            warn_invalid_production_url(&raw);

            let ctx = context::assemble(&raw);
            let renderer = MaudRenderer;
            let documents = generate::build_site(&ctx, &renderer);
            let archive = generate::zip_documents(&documents)?;

            let archive_path =
                out.unwrap_or_else(|| PathBuf::from(generate::archive_filename(&ctx)));
            std::fs::write(&archive_path, &archive)?;

            output::print_build_output(
                &documents,
                &archive_path.display().to_string(),
                archive.len(),
            );
        }
        Command::Preview { out, context: dump } => {
            let raw = config::load_config(&cli.config)?;
            warn_invalid_production_url(&raw);

            let ctx = context::assemble(&raw);
            if dump {
                println!("{}", serde_json::to_string_pretty(&ctx)?);
            } else {
                let renderer = MaudRenderer;
                let html = renderer.render(Template::Home, &ctx);
                std::fs::write(&out, html)?;
                println!("Preview written to {}", out.display());
            }
        }
        Command::Check => {
            let raw = config::load_config(&cli.config)?;
            warn_invalid_production_url(&raw);

            // Check is offline: products are never fetched here.
            let feed_configured = !raw.feed.url.trim().is_empty();
            let ctx = context::assemble_with_products(&raw, Vec::new());
            output::print_check_output(&ctx, feed_configured);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Warn (without failing) when the production URL doesn't parse as an
/// absolute http(s) URL. The build proceeds with the value as given.
fn warn_invalid_production_url(raw: &config::RawConfig) {
    let url = raw.business.production_url.trim();
    if !url.is_empty() && !sanitize::validate_url(url) {
        eprintln!("Warning: production URL looks invalid — check the scheme (https://...)");
    }
}
