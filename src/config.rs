use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";
pub const DEFAULT_MAX_FETCH_BATCHES: u32 = 250;

const CREDENTIALS_URL: &str = "https://console.cloud.google.com/apis/credentials";
const YOUTUBE_API_URL: &str = "https://console.cloud.google.com/apis/api/youtube.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub home: PathBuf,
    pub api_key_file: PathBuf,
    pub api_url: String,
    pub max_fetch_batches: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let home = match non_empty(lookup("YT_COMMENTS_HOME")) {
            Some(home) => PathBuf::from(home),
            None => std::env::current_dir().context("resolve current directory")?,
        };
        let api_key_file = non_empty(lookup("YT_COMMENTS_API_KEY_FILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join("secrets").join("google-api-key"));
        let api_url = non_empty(lookup("YT_COMMENTS_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let max_fetch_batches = match non_empty(lookup("YT_COMMENTS_MAX_FETCH_BATCHES")) {
            Some(raw) => parse_max_fetch_batches(&raw)?,
            None => DEFAULT_MAX_FETCH_BATCHES,
        };

        Ok(Self {
            home,
            api_key_file,
            api_url,
            max_fetch_batches,
        })
    }

    pub fn raw_output_dir(&self) -> PathBuf {
        self.home.join("output").join("raw")
    }

    pub fn parsed_output_dir(&self) -> PathBuf {
        self.home.join("output").join("parsed")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_max_fetch_batches(raw: &str) -> anyhow::Result<u32> {
    let value: u32 = raw
        .parse()
        .with_context(|| format!("parse YT_COMMENTS_MAX_FETCH_BATCHES: {raw:?}"))?;
    if value == 0 {
        anyhow::bail!("YT_COMMENTS_MAX_FETCH_BATCHES must be at least 1");
    }
    Ok(value)
}

/// Reads the Google API key. A missing or empty key file is a configuration
/// error that explains where the key should live and how to get one.
pub fn load_api_key(path: &Path) -> anyhow::Result<String> {
    let secret = match std::fs::read_to_string(path) {
        Ok(secret) => secret,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!(missing_key_message(path));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read API key: {}", path.display()));
        }
    };

    let secret = secret.trim();
    if secret.is_empty() {
        anyhow::bail!(missing_key_message(path));
    }
    Ok(secret.to_owned())
}

fn missing_key_message(path: &Path) -> String {
    format!(
        "Google API key is missing, it should be stored in {}\n\
         If you do not have one, you can make one here: {CREDENTIALS_URL}\n\
         You also need to enable YouTube Data API: {YOUTUBE_API_URL}",
        path.display()
    )
}
