// src/store.rs
//
// Local cache under `.store/`. Only the resolved identity lives here; it lets a
// later run skip the profile probe (`--cached-identity`).

use std::{fs, io, path::{Path, PathBuf}};

use crate::config::consts::IDENTITY_FILE;
use crate::data::Identity;

fn identity_path(store_dir: &Path) -> PathBuf {
    store_dir.join(IDENTITY_FILE)
}

pub fn save_identity(store_dir: &Path, identity: &Identity) -> io::Result<()> {
    fs::create_dir_all(store_dir)?;
    let json = serde_json::to_string_pretty(identity)?;
    fs::write(identity_path(store_dir), json)
}

/// `None` when there's no cache or it can't be read; the caller falls back to resolving.
pub fn load_identity(store_dir: &Path) -> Option<Identity> {
    let txt = fs::read_to_string(identity_path(store_dir)).ok()?;
    serde_json::from_str(&txt).ok()
}
