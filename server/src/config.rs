use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use completion::CompletionConfig;
use pipeline::DEFAULT_MAX_COMMENTS;
use youtube_client::YouTubeClientConfig;

#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Process-wide settings, read once at start-up
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_address: String,
    pub youtube: YouTubeClientConfig,
    pub completion: CompletionConfig,
    pub max_comments: NonZeroUsize,
    pub tls: Option<TlsConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{} must be set", key))
        };

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let mut youtube = YouTubeClientConfig::new(required("YOUTUBE_API_KEY")?);
        if let Some(base_url) = lookup("YOUTUBE_API_BASE_URL") {
            youtube.base_url = base_url;
        }

        let mut completion = CompletionConfig::new(required("DEEPSEEK_API_KEY")?);
        if let Some(base_url) = lookup("COMPLETION_API_BASE_URL") {
            completion.base_url = base_url;
        }
        if let Some(model) = lookup("COMPLETION_MODEL") {
            completion.model = model;
        }

        let max_comments = match lookup("MAX_COMMENTS") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| anyhow!("MAX_COMMENTS must be a positive integer, got {:?}", v))?,
            None => DEFAULT_MAX_COMMENTS,
        };
        let Some(max_comments) = NonZeroUsize::new(max_comments) else {
            bail!("MAX_COMMENTS must be greater than zero");
        };

        let tls = match (lookup("TLS_CERT_PATH"), lookup("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => bail!("TLS_CERT_PATH and TLS_KEY_PATH must be set together"),
        };

        Ok(Self {
            bind_address,
            youtube,
            completion,
            max_comments,
            tls,
        })
    }
}
