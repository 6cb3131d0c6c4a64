use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plotty_postcard::config::PostcardConfig;
use plotty_postcard::normalize::Alignment;
use plotty_postcard::postcard::{Content, PostcardSketch};
use plotty_postcard::route::{load_route, RouteSelector};

#[derive(Parser, Debug)]
#[command(name = "plotty-postcard")]
#[command(about = "Draw a route, and optionally a postcard, as plotter-ready SVG", long_about = None)]
#[command(version)]
struct Cli {
    /// Directions response or GeoJSON file holding the route
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    route: PathBuf,

    /// RON config file; defaults are used for anything it leaves out
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory holding header.txt, message.txt and addresses.txt
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    assets: PathBuf,

    /// Where to write the SVG
    #[arg(short, long, default_value = "postcard.svg", value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Recipient address to use
    #[arg(long)]
    addr_id: Option<usize>,

    /// Where the route sits in its rectangle
    #[arg(long)]
    alignment: Option<Alignment>,

    /// Only draw the recipient address on the card
    #[arg(long)]
    address_only: bool,

    /// Pick the route by name
    #[arg(long, conflicts_with = "route_index")]
    route_name: Option<String>,

    /// Pick the route by position in the file
    #[arg(long)]
    route_index: Option<usize>,

    /// Draw the postcard layout as well as the route
    #[arg(long, conflicts_with = "no_postcard")]
    postcard: bool,

    /// Draw only the route
    #[arg(long)]
    no_postcard: bool,

    /// Write strokes in drawing order
    #[arg(long)]
    no_optimize: bool,
}

impl Cli {
    fn selector(&self) -> RouteSelector {
        match (&self.route_name, self.route_index) {
            (Some(name), _) => RouteSelector::Name(name.clone()),
            (None, Some(index)) => RouteSelector::Index(index),
            (None, None) => RouteSelector::default(),
        }
    }

    fn apply(&self, config: &mut PostcardConfig) {
        if let Some(addr_id) = self.addr_id {
            config.addr_id = addr_id;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
        if self.address_only {
            config.address_only = true;
        }
        if self.postcard {
            config.draw_postcard = true;
        }
        if self.no_postcard {
            config.draw_postcard = false;
        }
        if self.no_optimize {
            config.optimize = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level is overridden by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => PostcardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PostcardConfig::default(),
    };
    cli.apply(&mut config);
    config.validate().context("checking config")?;

    let content = Content::load(&cli.assets)
        .with_context(|| format!("loading text from {}", cli.assets.display()))?;

    let selector = cli.selector();
    let route = load_route(&cli.route, &selector)
        .with_context(|| format!("loading route {} from {}", selector, cli.route.display()))?;

    let sketch = PostcardSketch::new(config, content)
        .draw(Some(&route))
        .context("drawing")?;
    sketch
        .save(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("Done");
    Ok(())
}
