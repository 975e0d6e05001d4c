use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{ProviderError, TranslationProvider};
use crate::config::ProviderConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Keeps the key out of the URL, which reqwest echoes in its errors.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Google Cloud Translation (v2, API key auth).
pub struct GoogleTranslateProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslateProvider {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from config, reading the API key from the configured variable.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).with_context(|| {
            format!(
                "Environment variable {} is not set.\n\
                 Hint: export {}=<your Google Cloud Translation API key>",
                config.api_key_env, config.api_key_env
            )
        })?;
        Self::new(&config.endpoint, api_key)
    }
}

impl TranslationProvider for GoogleTranslateProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = TranslateRequest {
            q: texts,
            source: source_locale,
            target: target_locale,
            format: "text",
        };
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status, message));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.without_url().to_string()))?;
        let translations: Vec<String> = parsed
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect();

        if translations.len() != texts.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} translations, got {}",
                texts.len(),
                translations.len()
            )));
        }
        Ok(translations)
    }
}

fn classify_reqwest_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(error.without_url().to_string())
    }
}

/// Google reports quota problems as 429, or as 403 with a `*LimitExceeded` reason.
fn classify_status(status: StatusCode, message: String) -> ProviderError {
    let quota = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && message.contains("LimitExceeded"));
    if quota {
        ProviderError::Quota(message)
    } else {
        ProviderError::Service {
            status: status.as_u16(),
            message,
        }
    }
}
