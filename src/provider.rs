//! Provider adapters for the summarizer relay.
//!
//! The prompt is provider-neutral; only the request shape (endpoint, auth
//! headers, message roles) and the response envelope differ. Each adapter
//! builds the wire request and picks the text payload out of the response,
//! so both sides can be tested without touching the network.

use crate::prompt::Prompt;
use crate::relay::RelayError;
use crate::settings::Provider;
use serde_json::{json, Value};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sampling temperature used for every summarization request
const TEMPERATURE: f64 = 0.3;
/// Ceiling on generated tokens
const MAX_TOKENS: u32 = 1500;

/// A fully shaped HTTP request, ready to send
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Request/response shaping for one provider
pub trait ProviderAdapter {
    fn name(&self) -> &'static str;

    /// Model used when settings carry no override
    fn default_model(&self) -> &'static str;

    /// Shape the chat/completion request for this provider
    fn build_request(&self, api_key: &str, model: &str, prompt: &Prompt) -> ProviderRequest;

    /// Pick the summary text out of the provider's response envelope
    fn parse_response(&self, body: &Value) -> Result<String, RelayError>;
}

pub struct OpenAi;
pub struct Anthropic;

impl ProviderAdapter for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &'static str {
        "gpt-4.1"
    }

    fn build_request(&self, api_key: &str, model: &str, prompt: &Prompt) -> ProviderRequest {
        ProviderRequest {
            url: OPENAI_API_URL,
            headers: vec![("Authorization", format!("Bearer {}", api_key))],
            body: json!({
                "model": model,
                "messages": [
                    { "role": "system", "content": prompt.system },
                    { "role": "user", "content": prompt.user },
                ],
                "temperature": TEMPERATURE,
                "max_tokens": MAX_TOKENS,
            }),
        }
    }

    fn parse_response(&self, body: &Value) -> Result<String, RelayError> {
        text_at(body, "/choices/0/message/content", self.name())
    }
}

impl ProviderAdapter for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn default_model(&self) -> &'static str {
        "claude-3-7-sonnet-20250219"
    }

    fn build_request(&self, api_key: &str, model: &str, prompt: &Prompt) -> ProviderRequest {
        // Anthropic has no system role in the messages array; the persona is
        // folded into the single user message.
        ProviderRequest {
            url: ANTHROPIC_API_URL,
            headers: vec![
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            body: json!({
                "model": model,
                "messages": [
                    { "role": "user", "content": format!("{}\n\n{}", prompt.system, prompt.user) },
                ],
                "max_tokens": MAX_TOKENS,
                "temperature": TEMPERATURE,
            }),
        }
    }

    fn parse_response(&self, body: &Value) -> Result<String, RelayError> {
        text_at(body, "/content/0/text", self.name())
    }
}

/// Look up the adapter for a configured provider
pub fn adapter(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::OpenAi => &OpenAi,
        Provider::Anthropic => &Anthropic,
    }
}

/// Error message from a non-success response body, falling back to the HTTP
/// status text. Both providers use the `error.message` shape.
pub fn error_message(body: &Value, status_text: &str) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status_text.to_string())
}

fn text_at(body: &Value, pointer: &str, provider: &'static str) -> Result<String, RelayError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or(RelayError::MalformedResponse(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_prompt;
    use crate::settings::{SummaryLength, SummaryType};

    fn sample_prompt() -> Prompt {
        build_prompt(
            "A Title",
            "Body text.",
            SummaryLength::Medium,
            SummaryType::Full,
        )
    }

    #[test]
    fn openai_request_shape() {
        let request = OpenAi.build_request("sk-test", "gpt-4.1", &sample_prompt());

        assert_eq!(request.url, OPENAI_API_URL);
        assert_eq!(
            request.headers,
            vec![("Authorization", "Bearer sk-test".to_string())]
        );
        assert_eq!(request.body["model"], "gpt-4.1");
        assert_eq!(request.body["temperature"], 0.3);
        assert_eq!(request.body["max_tokens"], 1500);
        assert_eq!(request.body["messages"][0]["role"], "system");
        assert_eq!(request.body["messages"][1]["role"], "user");
    }

    #[test]
    fn anthropic_request_shape() {
        let request = Anthropic.build_request("sk-ant", "claude-3-7-sonnet-20250219", &sample_prompt());

        assert_eq!(request.url, ANTHROPIC_API_URL);
        assert!(request
            .headers
            .contains(&("x-api-key", "sk-ant".to_string())));
        assert!(request
            .headers
            .contains(&("anthropic-version", "2023-06-01".to_string())));
        // Single user message, persona folded in
        assert_eq!(request.body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(request.body["messages"][0]["role"], "user");
        assert_eq!(request.body["max_tokens"], 1500);
    }

    #[test]
    fn openai_response_text_is_trimmed() {
        let body = serde_json::json!({
            "choices": [{ "message": { "content": " Hello " } }]
        });
        assert_eq!(OpenAi.parse_response(&body).unwrap(), "Hello");
    }

    #[test]
    fn anthropic_response_text_is_extracted() {
        let body = serde_json::json!({
            "content": [{ "type": "text", "text": "A summary." }]
        });
        assert_eq!(Anthropic.parse_response(&body).unwrap(), "A summary.");
    }

    #[test]
    fn unexpected_envelope_is_an_error() {
        let body = serde_json::json!({ "choices": [] });
        assert!(matches!(
            OpenAi.parse_response(&body),
            Err(RelayError::MalformedResponse("openai"))
        ));
    }

    #[test]
    fn error_message_prefers_the_body() {
        let body = serde_json::json!({ "error": { "message": "invalid key" } });
        assert_eq!(error_message(&body, "Unauthorized"), "invalid key");
    }

    #[test]
    fn error_message_falls_back_to_status_text() {
        assert_eq!(
            error_message(&Value::Null, "Bad Gateway"),
            "Bad Gateway"
        );
    }
}
