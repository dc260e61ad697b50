// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::consts::*;
use crate::data::Identity;
use crate::file::{looks_like_dir_hint, normalize_separators};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub net: NetOptions,
    pub export: ExportOptions,
    pub log_level: LogLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLevel(pub String);

impl Default for LogLevel {
    fn default() -> Self { Self(s!(DEFAULT_LOG_LEVEL)) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Reviews,
    Ratings,
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub target: Target,
    /// Root of the site; every other URL is built from it.
    pub site: Url,
    /// A page the user already has (saved HTML). Checked for sign-in and identity first.
    pub local_page: Option<String>,
    /// Known identity (flag or cache). Skips profile resolution entirely.
    pub identity: Option<Identity>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            target: Target::All,
            site: default_site(),
            local_page: None,
            identity: None,
        }
    }
}

pub fn default_site() -> Url {
    // SITE_URL is a constant, known-good URL
    Url::parse(SITE_URL).expect("SITE_URL parses")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Raw `Cookie` header for the signed-in session.
    pub cookie: Option<String>,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            cookie: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
    /// Field separator for the tabular formats.
    pub fn delim(&self) -> Option<u8> {
        match self {
            ExportFormat::Json => None,
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
        }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// JSON: one file `<dir>/<stem>.json`.
    pub fn json_path(&self) -> PathBuf {
        self.out_path.dir.join(join!(self.out_path.file_stem.as_str(), ".json"))
    }

    /// Tabular: one file per dataset, `<dir>/<stem>_<kind>.<ext>`.
    pub fn table_path(&self, kind_name: &str) -> PathBuf {
        let name = join!(self.out_path.file_stem.as_str(), "_", kind_name, ".", self.format.ext());
        self.out_path.dir.join(name)
    }

    /// Parse user text into dir + stem. Any extension is ignored; format controls it.
    /// A trailing separator means "this directory, keep the stem".
    pub fn set_path(&mut self, text: &str) {
        let text = text.trim();
        if looks_like_dir_hint(text) {
            self.out_path.dir = PathBuf::from(normalize_separators(text));
            return;
        }
        let norm = normalize_separators(text);
        let p = std::path::Path::new(&norm);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_string_lossy().into_owned();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    pub dir: PathBuf,
    pub file_stem: String, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE),
        }
    }
}
