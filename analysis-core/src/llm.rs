use crate::upload::ImageUpload;
use crate::AnalysisError;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PREAMBLE: &str = "You are an emergency incident analyst reviewing a single photo.";

pub const ANALYSIS_PROMPT: &str = "Analyze the incident photo and return JSON only.\n\
Schema: {\"predictions\":{\"earthquake\":bool,\"fog\":bool,\"heavy_rain\":bool,\"on_fire\":bool},\
\"primaryPrediction\":\"earthquake|fog|heavy_rain|on_fire\",\"confidence\":number,\
\"summary\":\"string\",\"details\":\"string\",\"severity\":\"Low|Medium|High|Critical\"}\n\
confidence is a percentage from 0 to 100. primaryPrediction names the most likely category.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            base_url: "https://api.openai.com/v1".into(),
            temperature: 0.2,
        }
    }
}

/// A multimodal model that answers a text prompt about one image.
pub trait VisionModel: Send + Sync + 'static {
    fn describe<'a>(
        &'a self,
        image: &'a ImageUpload,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, AnalysisError>>;
}

pub struct OpenAiVisionClient {
    http: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl OpenAiVisionClient {
    pub fn from_config(config: LlmConfig) -> Result<Self, AnalysisError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AnalysisError::Config(format!("missing env var {}", config.api_key_env)))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: LlmConfig, api_key: String) -> Result<Self, AnalysisError> {
        if config.provider.to_lowercase() != "openai" {
            return Err(AnalysisError::Config(format!(
                "unsupported llm provider '{}'",
                config.provider
            )));
        }
        if api_key.trim().is_empty() {
            return Err(AnalysisError::Config("api key is empty".into()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, image: &ImageUpload, prompt: &str) -> Result<String, AnalysisError> {
        let body = build_request_body(&self.config, image, prompt);
        tracing::debug!(model = %self.config.model, bytes = image.bytes.len(), "sending image to llm");

        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AnalysisError::Request(format!("failed to read llm response: {e}")))?;
        if !status.is_success() {
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }
        extract_message_content(&text)
    }
}

impl VisionModel for OpenAiVisionClient {
    fn describe<'a>(
        &'a self,
        image: &'a ImageUpload,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, AnalysisError>> {
        self.send(image, prompt).boxed()
    }
}

pub fn build_request_body(config: &LlmConfig, image: &ImageUpload, prompt: &str) -> Value {
    json!({
        "model": config.model,
        "temperature": config.temperature,
        "messages": [
            { "role": "system", "content": PREAMBLE },
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image.to_data_url() } }
                ]
            }
        ]
    })
}

/// Text of `choices[0].message.content` from a chat-completions response.
pub fn extract_message_content(raw: &str) -> Result<String, AnalysisError> {
    let v: Value = serde_json::from_str(raw)
        .map_err(|e| AnalysisError::Parse(format!("invalid llm response json: {e}")))?;
    v.get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| AnalysisError::Parse("llm response missing choices[0].message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_prompt_and_data_url() {
        let image = ImageUpload::new("scene.jpg", "image/jpeg", vec![0xff, 0xd8]);
        let body = build_request_body(&LlmConfig::default(), &image, ANALYSIS_PROMPT);
        assert_eq!(body["model"], "gpt-4o-mini");
        let content = &body["messages"][1]["content"];
        assert_eq!(content[0]["text"], ANALYSIS_PROMPT);
        assert_eq!(content[1]["image_url"]["url"], "data:image/jpeg;base64,/9g=");
    }

    #[test]
    fn extracts_message_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"severity\":\"High\"}"}}]}"#;
        assert_eq!(
            extract_message_content(raw).expect("content"),
            "{\"severity\":\"High\"}"
        );
    }

    #[test]
    fn missing_content_is_a_parse_error() {
        assert!(matches!(
            extract_message_content(r#"{"choices":[]}"#),
            Err(AnalysisError::Parse(_))
        ));
    }

    #[test]
    fn rejects_unsupported_provider() {
        let config = LlmConfig {
            provider: "gemini".into(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            OpenAiVisionClient::with_api_key(config, "key".into()),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = LlmConfig {
            base_url: "http://localhost:9000/v1/".into(),
            ..LlmConfig::default()
        };
        let client = OpenAiVisionClient::with_api_key(config, "key".into()).expect("client");
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
    }
}
