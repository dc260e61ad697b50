// src/cli.rs
use std::{fs, path::{Path, PathBuf}};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::{info, warn};

use crate::config::consts::{CONFIG_FILE, COOKIE_ENV, STORE_DIR};
use crate::config::load;
use crate::config::options::{AppOptions, ExportFormat, Target};
use crate::core::net::HttpFetcher;
use crate::data::{Datasets, Identity};
use crate::progress::Progress;
use crate::{file, log, scrape, store};

/// Export your own IMDb reviews and ratings.
#[derive(Debug, Parser)]
#[command(name = "imdb_scrape", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (TOML). Missing file means defaults.
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// A saved IMDb page (HTML) from your signed-in session; checked for identity first.
    #[arg(long, global = true, value_name = "FILE")]
    pub page: Option<PathBuf>,

    /// Skip profile lookup and use this reviewer id (ur…).
    #[arg(long, global = true)]
    pub reviewer_id: Option<String>,

    /// Display name to go with --reviewer-id.
    #[arg(long, global = true, requires = "reviewer_id")]
    pub reviewer_name: Option<String>,

    /// Session cookie header for the signed-in account.
    #[arg(long, global = true, env = COOKIE_ENV, hide_env_values = true)]
    pub cookie: Option<String>,

    /// Reuse (and refresh) the identity cached in .store/.
    #[arg(long, global = true)]
    pub cached_identity: bool,

    /// Output path: `dir/`, or `dir/stem` (extension follows --format).
    #[arg(short, long, global = true)]
    pub out: Option<String>,

    /// json | csv | tsv
    #[arg(long, global = true, value_parser = parse_format)]
    pub format: Option<ExportFormat>,

    /// Leave the header row out of CSV/TSV.
    #[arg(long, global = true)]
    pub no_headers: bool,

    /// -v debug, -vv trace (written to .store/debug.log)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// All reviews, following the pager to the end.
    Reviews,
    /// Ratings, from the CSV export.
    Ratings,
    /// Both, as one export.
    All,
}

impl From<Command> for Target {
    fn from(c: Command) -> Self {
        match c {
            Command::Reviews => Target::Reviews,
            Command::Ratings => Target::Ratings,
            Command::All => Target::All,
        }
    }
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(s).ok_or_else(|| format!("unknown format '{s}' (json, csv, tsv)"))
}

/// Progress lines straight to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Defaults, then the config file, then flags.
pub fn build_options(cli: &Cli) -> Result<AppOptions> {
    let mut opts = AppOptions::default();

    load::load(&cli.config)
        .and_then(|cfg| cfg.apply(&mut opts))
        .map_err(|e| eyre!("{e}"))?;

    opts.scrape.target = cli.command.into();

    if let Some(c) = cli.cookie.as_deref().and_then(|c| opt_s!(c)) {
        opts.net.cookie = Some(c);
    }
    if let Some(p) = &cli.page {
        let html = fs::read_to_string(p)
            .wrap_err_with(|| format!("reading page {}", p.display()))?;
        opts.scrape.local_page = Some(html);
    }
    if let Some(id) = &cli.reviewer_id {
        opts.scrape.identity = Some(Identity::new(id.trim(), cli.reviewer_name.clone()));
    } else if cli.cached_identity {
        opts.scrape.identity = store::load_identity(Path::new(STORE_DIR));
    }

    if let Some(out) = &cli.out {
        opts.export.set_path(out);
    }
    if let Some(f) = cli.format {
        opts.export.format = f;
    }
    if cli.no_headers {
        opts.export.include_headers = false;
    }
    Ok(opts)
}

pub async fn run(cli: Cli) -> Result<()> {
    let opts = build_options(&cli)?;

    let level = log::level_for(cli.verbose, &opts.log_level.0);
    if let Err(e) = log::init(&level, Path::new(STORE_DIR)) {
        eprintln!("Warning: file logging disabled: {e}");
    }
    info!("target {:?}, site {}", opts.scrape.target, opts.scrape.site);

    let fetcher = HttpFetcher::new(&opts.net)?;
    let mut progress = CliProgress;

    let sets = scrape::retrieve_all(&fetcher, &opts.scrape, &mut progress).await?;

    if cli.cached_identity {
        if let Some(id) = head_of(&sets) {
            // best-effort
            if let Err(e) = store::save_identity(Path::new(STORE_DIR), id) {
                warn!("could not cache identity: {e}");
            }
        }
    }

    // a single subcommand exports its result set alone; `all` exports the combined object
    let written = match (opts.scrape.target, sets.iter().next()) {
        (Target::Reviews | Target::Ratings, Some((kind, result))) => {
            file::export_result(&opts.export, kind, result).map(|p| vec![p])
        }
        _ => file::export_datasets(&opts.export, &sets),
    }
    .map_err(|e| eyre!("export failed: {e}"))?;
    for p in written {
        println!("{}", p.display());
    }
    Ok(())
}

fn head_of(sets: &Datasets) -> Option<&Identity> {
    sets.iter().next().map(|(_, r)| &r.head)
}
