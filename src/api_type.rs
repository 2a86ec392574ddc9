use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Header carrying the key for Azure-hosted deployments.
pub const AZURE_API_KEY_HEADER: &str = "api-key";

pub const DEFAULT_AZURE_API_VERSION: &str = "2023-03-15-preview";

pub const AZURE_API_PREFIX:         &str = "openai";
pub const AZURE_DEPLOYMENTS_PREFIX: &str = "deployments";

/// Which flavour of the API a config targets. The string forms are the
/// discriminators other OpenAI clients use (`OPEN_AI`, `AZURE`, `AZURE_AD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum ApiType {
    #[serde(rename = "OPEN_AI")]
    #[value(name = "open_ai", alias = "openai")]
    OpenAi,

    #[serde(rename = "AZURE")]
    #[value(name = "azure")]
    Azure,

    #[serde(rename = "AZURE_AD")]
    #[value(name = "azure_ad")]
    AzureAd,
}

impl ApiType {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiType::OpenAi  => "OPEN_AI",
            ApiType::Azure   => "AZURE",
            ApiType::AzureAd => "AZURE_AD",
        }
    }

    pub fn is_azure(self) -> bool {
        matches!(self, ApiType::Azure | ApiType::AzureAd)
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Azure deployment coordinates. Both fields are needed to address a
/// deployment, so they only exist on the Azure variants of [`Api`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureDeployment {
    pub api_version: String,
    /// Deployment name.
    pub engine:      String,
}

impl AzureDeployment {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            engine:      engine.into(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Api {
    OpenAi,
    Azure(AzureDeployment),
    AzureAd(AzureDeployment),
}

impl Api {
    pub fn api_type(&self) -> ApiType {
        match self {
            Api::OpenAi     => ApiType::OpenAi,
            Api::Azure(_)   => ApiType::Azure,
            Api::AzureAd(_) => ApiType::AzureAd,
        }
    }

    pub fn deployment(&self) -> Option<&AzureDeployment> {
        match self {
            Api::OpenAi => None,
            Api::Azure(d) | Api::AzureAd(d) => Some(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_match_wire_strings() {
        assert_eq!(ApiType::OpenAi.as_str(), "OPEN_AI");
        assert_eq!(ApiType::Azure.to_string(), "AZURE");
        assert_eq!(
            serde_json::to_value(ApiType::AzureAd).unwrap(),
            serde_json::json!("AZURE_AD")
        );
    }

    #[test]
    fn value_enum_accepts_discriminators_ignoring_case() {
        assert_eq!(ApiType::from_str("OPEN_AI", true), Ok(ApiType::OpenAi));
        assert_eq!(ApiType::from_str("openai", true), Ok(ApiType::OpenAi));
        assert_eq!(ApiType::from_str("AZURE_AD", true), Ok(ApiType::AzureAd));
        assert!(ApiType::from_str("bedrock", true).is_err());
    }

    #[test]
    fn only_azure_variants_carry_a_deployment() {
        assert_eq!(Api::OpenAi.deployment(), None);

        let api = Api::AzureAd(AzureDeployment::new("gpt-35").with_api_version("2024-02-01"));
        assert_eq!(api.api_type(), ApiType::AzureAd);
        assert!(api.api_type().is_azure());

        let deployment = api.deployment().unwrap();
        assert_eq!(deployment.engine, "gpt-35");
        assert_eq!(deployment.api_version, "2024-02-01");
    }
}
