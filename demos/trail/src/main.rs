use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crumbtrail::memory::{MemoryQuery, MemorySite};
use crumbtrail::{Breadcrumb, RenderConfigOverride};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Renders the breadcrumb trail for a request against a site described in TOML.
#[derive(Parser, Debug)]
#[command(name = "crumbtrail-demo", version)]
struct Cli {
    /// A fixture with `[site]`, `[request]` and an optional `[config]` table.
    fixture: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    site: MemorySite,
    request: MemoryQuery,
    #[serde(default)]
    config: RenderConfigOverride,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "crumbtrail=info",
        1 => "crumbtrail=debug",
        _ => "crumbtrail=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = fs::read_to_string(&cli.fixture)
        .with_context(|| format!("failed to read {}", cli.fixture.display()))?;
    let fixture: Fixture = toml::from_str(&text)
        .with_context(|| format!("failed to parse {}", cli.fixture.display()))?;

    let breadcrumb = Breadcrumb::with_overrides(fixture.config);
    breadcrumb.config().validate()?;

    let breadcrumb = breadcrumb.generate(&fixture.request, &fixture.site);
    info!(kind = ?breadcrumb.page_kind(), crumbs = breadcrumb.trail().len(), "generated trail");

    let mut stdout = io::stdout().lock();

    match cli.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, breadcrumb.trail())?;
        }
        Format::Html => {
            if let Some(html) = breadcrumb.render(&mut stdout)? {
                stdout.write_all(html.as_bytes())?;
            }
        }
    }

    writeln!(stdout)?;

    Ok(())
}
