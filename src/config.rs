use std::env;
use std::path::PathBuf;
use clap::Parser;

use crate::model::DEFAULT_SEARCH_LIMIT;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_SEARCH_URL: &str = "https://v1.nocodeapi.com/bhawana_ydv/spotify/fxxAcPsnsMBcOXtN/search";
pub const DEFAULT_TRENDING_QUERY: &str = "trending 2024";
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Command line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "melody-rs", version, about = "Terminal client for searching music and keeping favorites and playlists")]
pub struct Args {
    /// Create a new account instead of signing in
    #[arg(long)]
    pub signup: bool,

    /// Forget the cached session and exit
    #[arg(long)]
    pub logout: bool,

    /// Account email (prompted when missing)
    #[arg(long, env = "MELODY_EMAIL")]
    pub email: Option<String>,

    /// Display name for --signup (prompted when missing)
    #[arg(long)]
    pub name: Option<String>,

    /// Backend base url, overrides MELODY_API_URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Search endpoint, overrides MELODY_SEARCH_URL
    #[arg(long)]
    pub search_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub search_url: String,
    pub trending_query: String,
    pub search_limit: usize,
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            trending_query: DEFAULT_TRENDING_QUERY.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl Config {
    /// Read configuration from the environment (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let search_limit = match env::var("MELODY_SEARCH_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("MELODY_SEARCH_LIMIT must be a positive integer: {}", e))?,
            Err(_) => DEFAULT_SEARCH_LIMIT,
        };
        if search_limit == 0 {
            return Err(anyhow::anyhow!("MELODY_SEARCH_LIMIT must be at least 1"));
        }

        Ok(Config {
            api_url: env::var("MELODY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            search_url: env::var("MELODY_SEARCH_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string()),
            trending_query: env::var("MELODY_TRENDING_QUERY")
                .unwrap_or_else(|_| DEFAULT_TRENDING_QUERY.to_string()),
            search_limit,
            cache_dir: env::var("MELODY_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_DIR)),
        })
    }

    /// Apply command line overrides
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.api_url {
            self.api_url = url.clone();
        }
        if let Some(url) = &args.search_url {
            self.search_url = url.clone();
        }
        self
    }
}
