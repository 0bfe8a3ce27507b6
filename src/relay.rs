//! Summarizer relay.
//!
//! Takes extracted article content and the user's settings, sends one
//! request to the selected LLM provider, and returns the normalized result.
//! One request per invocation: no retries, no streaming, no caching.

use crate::extractor::{ExtractedContent, REQUEST_TIMEOUT};
use crate::provider;
use crate::settings::{Settings, SettingsError};
use crate::summary::{time_saved, SummaryResult};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or blank API key; surfaced before any network I/O
    #[error(transparent)]
    Config(#[from] SettingsError),
    /// The provider answered with a non-success status
    #[error("provider error: {0}")]
    Provider(String),
    /// The request never completed
    #[error("network error: {0}")]
    Network(String),
    #[error("request to the provider timed out")]
    Timeout,
    /// 2xx response whose body did not match the provider's envelope
    #[error("unexpected response format from {0}")]
    MalformedResponse(&'static str),
}

/// Summarise extracted content with the configured provider.
///
/// Provider, model, length tier and summary type all resolve from settings
/// with their documented defaults. Fails with a config error before any
/// request is made if no API key is set for the selected provider.
pub async fn summarize(
    client: &Client,
    content: &ExtractedContent,
    settings: &Settings,
) -> Result<SummaryResult, RelayError> {
    let adapter = provider::adapter(settings.api_provider);
    let api_key = settings.api_key()?;
    let model = settings
        .model()
        .unwrap_or_else(|| adapter.default_model())
        .to_string();

    let prompt = crate::prompt::build_prompt(
        &content.title,
        &content.content,
        settings.summary_length,
        settings.summary_type,
    );
    let request = adapter.build_request(api_key, &model, &prompt);

    let mut http_request = client
        .post(request.url)
        .timeout(REQUEST_TIMEOUT)
        .json(&request.body);
    for (name, value) in &request.headers {
        http_request = http_request.header(*name, value);
    }

    let response = http_request.send().await.map_err(|e| {
        if e.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RelayError::Network(e.to_string()))?;
    // Error bodies are not always JSON; fall back to the status text then
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    if !status.is_success() {
        let status_text = status.canonical_reason().unwrap_or("request failed");
        return Err(RelayError::Provider(provider::error_message(
            &body,
            status_text,
        )));
    }

    let summary = adapter.parse_response(&body)?;

    Ok(SummaryResult {
        title: content.title.clone(),
        summary,
        url: content.url.clone(),
        time_saved: time_saved(content.reading_time),
        provider: settings.api_provider,
        summary_type: settings.summary_type,
        model,
    })
}
