use std::fmt;

use reqwest::{Client, Proxy, Url};
use serde::Serialize;

use crate::{
    api_type::{Api, ApiType, AzureDeployment, AZURE_API_PREFIX, AZURE_DEPLOYMENTS_PREFIX},
    error::ConfigError,
};

pub const OPENAI_API_URL_V1: &str = "https://api.openai.com/v1";

/// How many empty stream messages a consumer should tolerate before giving up.
pub const DEFAULT_EMPTY_MESSAGES_LIMIT: u32 = 300;

const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// API key or bearer token. Formatting never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Everything an API client needs to know about where and how to send
/// requests: endpoint, credentials, API flavour and the HTTP transport.
///
/// The transport is a `reqwest::Client`, which is reference-counted
/// internally, so cloning a config shares its connection pool.
#[derive(Clone)]
pub struct ClientConfig {
    auth_token: AuthToken,

    pub base_url: String,
    pub org_id:   String,
    pub api:      Api,

    http_client: Client,
    proxy:       Option<Url>,

    pub empty_messages_limit: u32,
}

impl ClientConfig {
    /// Config for the public OpenAI endpoint.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: AuthToken::new(auth_token),
            base_url:   OPENAI_API_URL_V1.to_string(),
            org_id:     String::new(),
            api:        Api::OpenAi,

            http_client: Client::new(),
            proxy:       None,

            empty_messages_limit: DEFAULT_EMPTY_MESSAGES_LIMIT,
        }
    }

    /// Config for an Azure OpenAI resource at `base_url`, addressing the
    /// deployment named `engine` with the default API version.
    pub fn azure(
        api_key:  impl Into<String>,
        base_url: impl Into<String>,
        engine:   impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api:      Api::Azure(AzureDeployment::new(engine)),
            ..Self::new(api_key)
        }
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    pub fn api_type(&self) -> ApiType {
        self.api.api_type()
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// The proxy the current transport was built for by [`use_proxy`].
    /// `None` after [`use_proxy_client`], since a caller-built client is opaque.
    ///
    /// [`use_proxy`]: Self::use_proxy
    /// [`use_proxy_client`]: Self::use_proxy_client
    pub fn proxy_url(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// Replace the HTTP transport used for every subsequent request.
    pub fn use_proxy_client(&mut self, client: Client) {
        tracing::debug!("Replacing HTTP transport with caller-supplied client");
        self.http_client = client;
        self.proxy = None;
    }

    /// Route all traffic through the proxy at `proxy_url`. The scheme must
    /// be one of `http`, `https`, `socks5`, `socks5h`.
    pub fn use_proxy(&mut self, proxy_url: &str) -> Result<(), ConfigError> {
        let url = Url::parse(proxy_url).map_err(|source| ConfigError::InvalidUrl {
            url: proxy_url.to_string(),
            source,
        })?;
        // `host:port` without a scheme parses with the host as the scheme.
        if !PROXY_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::UnsupportedProxyScheme {
                url:    proxy_url.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        let client = Client::builder()
            .proxy(Proxy::all(url.clone())?)
            .build()?;

        self.use_proxy_client(client);

        tracing::debug!(proxy = %redact_credentials(&url), "HTTP transport now routed through proxy");
        self.proxy = Some(url);
        Ok(())
    }

    /// Shorthand for `use_proxy("socks5://host:port")`. Bare IPv6 hosts are
    /// bracketed.
    pub fn use_socks5_proxy(&mut self, host: &str, port: u16) -> Result<(), ConfigError> {
        if host.contains(':') && !host.starts_with('[') {
            self.use_proxy(&format!("socks5://[{host}]:{port}"))
        } else {
            self.use_proxy(&format!("socks5://{host}:{port}"))
        }
    }

    /// Full URL for an API path such as `/chat/completions`. Azure resources
    /// address a deployment and carry the API version in the query string.
    pub fn endpoint_url(&self, suffix: &str) -> String {
        match self.api.deployment() {
            None => format!("{}{}", self.base_url, suffix),
            Some(deployment) => format!(
                "{}/{}/{}/{}{}?api-version={}",
                self.base_url.trim_end_matches('/'),
                AZURE_API_PREFIX,
                AZURE_DEPLOYMENTS_PREFIX,
                deployment.engine,
                suffix,
                deployment.api_version,
            ),
        }
    }

    /// Reject blank values the request path would otherwise trip over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingConfiguration("base_url"));
        }
        if let Some(deployment) = self.api.deployment() {
            if deployment.engine.trim().is_empty() {
                return Err(ConfigError::MissingConfiguration("engine"));
            }
            if deployment.api_version.trim().is_empty() {
                return Err(ConfigError::MissingConfiguration("api_version"));
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> ConfigSummary {
        let deployment = self.api.deployment();
        ConfigSummary {
            api_type:             self.api_type(),
            base_url:             self.base_url.clone(),
            org_id:               self.org_id.clone(),
            api_version:          deployment.map(|d| d.api_version.clone()),
            engine:               deployment.map(|d| d.engine.clone()),
            proxy:                self.proxy.as_ref().map(|url| redact_credentials(url).to_string()),
            empty_messages_limit: self.empty_messages_limit,
        }
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<OpenAI API ClientConfig>")
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_token", &self.auth_token)
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("api", &self.api)
            .field("proxy", &self.proxy.as_ref().map(redact_credentials))
            .field("empty_messages_limit", &self.empty_messages_limit)
            .finish_non_exhaustive()
    }
}

/// Printable view of a [`ClientConfig`] without the token or proxy credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub api_type:             ApiType,
    pub base_url:             String,
    pub org_id:               String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine:               Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy:                Option<String>,
    pub empty_messages_limit: u32,
}

fn redact_credentials(url: &Url) -> Url {
    let mut url = url.clone();
    // Only fails for cannot-be-a-base URLs, which carry no credentials anyway.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url
}
