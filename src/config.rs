use clap::Parser;

use crate::{
    api_type::{Api, ApiType, AzureDeployment, DEFAULT_AZURE_API_VERSION},
    client_config::{ClientConfig, DEFAULT_EMPTY_MESSAGES_LIMIT},
    error::ConfigError,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name    = "openai-config",
    about   = "Resolve and inspect an OpenAI / Azure OpenAI client configuration",
    version
)]
pub struct Args {
    /// API key (OpenAI) or resource key (Azure).
    /// Can also be set via the OPENAI_API_KEY environment variable.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "OPENAI_API_TYPE", value_enum, ignore_case = true, default_value_t = ApiType::OpenAi)]
    pub api_type: ApiType,

    /// Endpoint root. Defaults to the public OpenAI endpoint; required for Azure.
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "OPENAI_ORG_ID")]
    pub org_id: Option<String>,

    /// Azure deployment name.
    #[arg(long, env = "AZURE_OPENAI_ENGINE")]
    pub engine: Option<String>,

    /// Azure API version. Defaults to 2023-03-15-preview.
    #[arg(long, env = "AZURE_OPENAI_API_VERSION")]
    pub api_version: Option<String>,

    /// Proxy URL, e.g. http://127.0.0.1:8080 or socks5://127.0.0.1:1080.
    #[arg(long, env = "OPENAI_PROXY", conflicts_with = "socks5_host")]
    pub proxy: Option<String>,

    /// SOCKS5 proxy host, shorthand for --proxy socks5://HOST:PORT.
    #[arg(long)]
    pub socks5_host: Option<String>,

    #[arg(long, default_value_t = 1080, requires = "socks5_host")]
    pub socks5_port: u16,

    #[arg(long, env = "OPENAI_EMPTY_MESSAGES_LIMIT", default_value_t = DEFAULT_EMPTY_MESSAGES_LIMIT)]
    pub empty_messages_limit: u32,
}

impl Args {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingConfiguration("api_key"));
        }

        let mut config = match self.api_type {
            ApiType::OpenAi => {
                if self.engine.is_some() || self.api_version.is_some() {
                    tracing::warn!("--engine and --api-version only apply to Azure; ignoring them");
                }
                let mut config = ClientConfig::new(&self.api_key);
                if let Some(base_url) = &self.base_url {
                    config.base_url = base_url.clone();
                }
                config
            }
            ApiType::Azure | ApiType::AzureAd => {
                let base_url = self
                    .base_url
                    .as_deref()
                    .ok_or(ConfigError::MissingConfiguration("base_url"))?;
                let engine = self
                    .engine
                    .as_deref()
                    .ok_or(ConfigError::MissingConfiguration("engine"))?;

                let mut config = ClientConfig::azure(&self.api_key, base_url, engine);
                let deployment = AzureDeployment::new(engine).with_api_version(
                    self.api_version.as_deref().unwrap_or(DEFAULT_AZURE_API_VERSION),
                );
                config.api = match self.api_type {
                    ApiType::AzureAd => Api::AzureAd(deployment),
                    _                => Api::Azure(deployment),
                };
                config
            }
        };

        if let Some(org_id) = &self.org_id {
            config.org_id = org_id.clone();
        }
        config.empty_messages_limit = self.empty_messages_limit;
        config.validate()?;

        if let Some(proxy) = &self.proxy {
            config.use_proxy(proxy)?;
        } else if let Some(host) = &self.socks5_host {
            config.use_socks5_proxy(host, self.socks5_port)?;
        }

        Ok(config)
    }
}
