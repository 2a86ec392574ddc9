//! Client configuration for OpenAI-compatible and Azure OpenAI endpoints:
//! credentials, endpoint, API flavour and the HTTP transport, including
//! routing that transport through an HTTP or SOCKS5 proxy.

pub mod api_type;
pub mod client_config;
pub mod config;
pub mod error;

pub use api_type::{Api, ApiType, AzureDeployment};
pub use client_config::{AuthToken, ClientConfig, ConfigSummary};
pub use config::Args;
pub use error::ConfigError;
