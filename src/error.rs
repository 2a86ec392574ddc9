use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid proxy URL `{url}`: {source}")]
    InvalidUrl {
        url:    String,
        source: url::ParseError,
    },

    #[error("Unsupported proxy scheme `{scheme}` in `{url}` (expected http, https, socks5 or socks5h)")]
    UnsupportedProxyScheme {
        url:    String,
        scheme: String,
    },

    #[error("Failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Missing configuration value: {0}")]
    MissingConfiguration(&'static str),
}
