// src/config/consts.rs

// Site
pub const SITE_URL: &str = "http://www.imdb.com/";
pub const REVIEWS_FIRST_PAGE: &str = "comments-expanded";
pub const RATINGS_EXPORT_PATH: &str = "list/export";

// Net config
pub const USER_AGENT: &str = "imdb_scrape/0.2";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const COOKIE_ENV: &str = "IMDB_COOKIE";

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const IDENTITY_FILE: &str = "identity.json";
pub const CONFIG_FILE: &str = "imdb_scrape.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "imdb";
pub const SCHEMA_KEY: &str = "imdb";
pub const SCHEMA_VERSION: &str = "1.0.0";
