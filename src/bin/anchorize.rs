//! anchorize - convert Markdown to HTML with permalink anchors on headings.

use anyhow::{Context, Result};
use clap::Parser as _;
use pulldown_cmark::Options;
use pulldown_cmark_anchor::anchor::{AnchorConfig, Extender, Position};
use pulldown_cmark_anchor::{Markdown, Parser, ast};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert Markdown to HTML, adding an anchor link to every heading.
#[derive(clap::Parser, Debug)]
#[command(name = "anchorize", author, version, about)]
struct Cli {
    /// Markdown file to read. Reads stdin when omitted or `-`.
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Place anchors before or after the heading text.
    #[arg(long, value_name = "POSITION", value_parser = parse_position)]
    position: Option<Position>,

    /// Anchor text.
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Attribute to put on every anchor, as NAME=VALUE. Repeatable.
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// Put no attributes on anchors.
    #[arg(long, conflicts_with = "attrs")]
    no_attributes: bool,

    /// Do not escape the anchor text.
    #[arg(long = "unsafe")]
    unsafe_text: bool,

    /// YAML or JSON file with anchor settings. Flags override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the transformed tree instead of HTML.
    #[arg(long)]
    dump: bool,

    /// More diagnostics on stderr. Repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_position(s: &str) -> Result<Position, String> {
    s.parse().map_err(|e: pulldown_cmark_anchor::Error| e.to_string())
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {:?}", s)),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl Cli {
    fn anchor_config(&self) -> Result<AnchorConfig> {
        let mut cfg = match &self.config {
            Some(path) => AnchorConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AnchorConfig::default(),
        };
        if let Some(position) = self.position {
            cfg.position = Some(position);
        }
        if let Some(text) = &self.text {
            cfg.text = Some(text.clone());
        }
        if self.no_attributes {
            cfg.attributes = Some(BTreeMap::new());
        } else if !self.attrs.is_empty() {
            cfg.attributes = Some(self.attrs.iter().cloned().collect());
        }
        cfg.unsafe_text |= self.unsafe_text;
        Ok(cfg)
    }

    fn read_input(&self) -> Result<String> {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            _ => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                Ok(buf)
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = cli.anchor_config()?;
    tracing::debug!(?cfg, "anchor settings");
    let src = cli.read_input()?;

    let parser = Parser::new()
        .with_options(Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_TABLES)
        .with_auto_heading_id(true);
    let md = Markdown::new()
        .with_parser(parser)
        .with_extension(&Extender::from(cfg));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.dump {
        out.write_all(ast::dump(&md.parse(&src)).as_bytes())?;
    } else {
        md.convert(&src, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
