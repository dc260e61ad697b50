// src/config/load.rs
//
// Optional `imdb_scrape.toml`. Every key is optional; a missing file means
// defaults. CLI flags are applied on top by the caller.
//
//   site = "http://www.imdb.com/"
//   cookie = "id=...; sid=..."
//   user_agent = "..."
//   timeout_secs = 30
//   log_level = "info"
//
//   [export]
//   format = "csv"          # json | csv | tsv
//   out = "out/imdb"
//   include_headers = true

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::options::{AppOptions, ExportFormat};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub site: Option<String>,
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub export: ExportSection,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub format: Option<String>,
    pub out: Option<String>,
    pub include_headers: Option<bool>,
}

/// Read the config file if it exists.
pub fn load(path: &Path) -> Result<FileConfig, Box<dyn Error>> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    parse(&text).map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e).into())
}

pub fn parse(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}

impl FileConfig {
    /// Overlay onto `opts`. Validation errors are collected and reported together.
    pub fn apply(self, opts: &mut AppOptions) -> Result<(), Box<dyn Error>> {
        let mut errors: Vec<String> = Vec::new();

        if let Some(site) = self.site {
            match Url::parse(&site) {
                Ok(u) if u.cannot_be_a_base() => errors.push(format!("site is not a base URL: {site}")),
                Ok(mut u) => {
                    // keep joins relative to the root, not the last segment
                    if !u.path().ends_with('/') {
                        let p = join!(u.path(), "/");
                        u.set_path(&p);
                    }
                    opts.scrape.site = u;
                }
                Err(e) => errors.push(format!("site: {e}")),
            }
        }
        if let Some(c) = self.cookie {
            opts.net.cookie = opt_s!(c);
        }
        if let Some(ua) = self.user_agent {
            opts.net.user_agent = ua;
        }
        match self.timeout_secs {
            Some(0) => errors.push(s!("timeout_secs must be positive")),
            Some(t) => opts.net.timeout = Duration::from_secs(t),
            None => {}
        }
        if let Some(level) = self.log_level {
            opts.log_level.0 = level;
        }

        if let Some(f) = self.export.format {
            match ExportFormat::parse(&f) {
                Some(fmt) => opts.export.format = fmt,
                None => errors.push(format!("unknown export format: {f}")),
            }
        }
        if let Some(out) = self.export.out {
            opts.export.set_path(&out);
        }
        if let Some(h) = self.export.include_headers {
            opts.export.include_headers = h;
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(format!("Invalid configuration: {}", errors.join("; ")).into())
        }
    }
}
