//! Query interpreter
//!
//! Turns a free-text query into `SearchParams` by asking a text-generation
//! model for a JSON object. Anything that goes wrong on the way (call error,
//! timeout, empty or malformed response) produces the fallback params, so
//! `interpret` always returns something usable.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{LlmConfig, LlmProvider};
use crate::models::{ContentKind, Interpretation, SearchParams};

/// A text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` with the given model identifier
    async fn generate(&self, prompt: &str, model: &str) -> Result<String>;
}

/// Build the instruction sent to the model for `query`
pub fn build_prompt(query: &str) -> String {
    format!(
        "Analyze this search query and extract relevant search parameters: \"{query}\"\n\n\
         Please respond with a JSON object containing:\n\
         - \"keywords\": array of relevant keywords to search for\n\
         - \"categories\": array of likely categories (tools, repositories, models)\n\
         - \"tags\": array of relevant tags\n\
         - \"intent\": brief description of what the user is looking for\n\n\
         Example query: \"machine learning models for image classification\"\n\
         Example response: {{\n  \
           \"keywords\": [\"machine learning\", \"image classification\", \"computer vision\"],\n  \
           \"categories\": [\"models\"],\n  \
           \"tags\": [\"ml\", \"vision\", \"classification\", \"deep learning\"],\n  \
           \"intent\": \"Looking for AI models that can classify images\"\n\
         }}"
    )
}

/// Loose shape of the model's answer; validated by `parse_response`
#[derive(Deserialize)]
struct ModelResponse {
    keywords: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    categories: Vec<serde_json::Value>,
    #[serde(default)]
    tags: Vec<serde_json::Value>,
    #[serde(default)]
    intent: Option<String>,
}

fn strings(values: Vec<serde_json::Value>) -> impl Iterator<Item = String> {
    values.into_iter().filter_map(|value| match value {
        serde_json::Value::String(s) => {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        }
        _ => None,
    })
}

/// Extract and validate search params from a model response
fn parse_response(query: &str, content: &str) -> Result<SearchParams> {
    let start = content.find('{').context("no JSON object in response")?;
    let end = content.rfind('}').context("unterminated JSON object in response")?;
    if end < start {
        anyhow::bail!("no JSON object in response");
    }

    let response: ModelResponse =
        serde_json::from_str(&content[start..=end]).context("response is not valid JSON")?;

    let keywords: Vec<String> = strings(response.keywords.context("missing keywords")?).collect();
    if keywords.is_empty() {
        anyhow::bail!("keywords are empty");
    }

    let mut categories = Vec::new();
    for kind in strings(response.categories).filter_map(|c| ContentKind::from_str(&c)) {
        if !categories.contains(&kind) {
            categories.push(kind);
        }
    }

    let intent = response
        .intent
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| query.to_string());

    Ok(SearchParams {
        keywords,
        categories,
        tags: strings(response.tags).collect(),
        intent,
    })
}

/// Query interpreter backed by a `TextGenerator`
pub struct QueryInterpreter {
    generator: Arc<dyn TextGenerator>,
    model: String,
    timeout: Duration,
}

impl QueryInterpreter {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            generator,
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &LlmConfig) -> Self {
        Self::new(generator, config.model.clone(), config.timeout())
    }

    /// Interpret `query`. Never fails; see the module docs.
    pub async fn interpret(&self, query: &str) -> Interpretation {
        let prompt = build_prompt(query);

        let content = match tokio::time::timeout(
            self.timeout,
            self.generator.generate(&prompt, &self.model),
        )
        .await
        {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                tracing::warn!("Query interpretation failed, using keyword fallback: {:#}", e);
                return Interpretation::fallback(query, format!("generation failed: {e}"));
            }
            Err(_) => {
                tracing::warn!(
                    "Query interpretation timed out after {:?}, using keyword fallback",
                    self.timeout
                );
                return Interpretation::fallback(query, "generation timed out");
            }
        };

        if content.trim().is_empty() {
            tracing::warn!("Empty interpretation response, using keyword fallback");
            return Interpretation::fallback(query, "empty response");
        }

        match parse_response(query, &content) {
            Ok(params) => {
                tracing::debug!(
                    keywords = ?params.keywords,
                    intent = %params.intent,
                    "Interpreted search query"
                );
                Interpretation::from_model(params)
            }
            Err(e) => {
                tracing::warn!("Unusable interpretation response: {:#}. Raw: {}", e, content);
                Interpretation::fallback(query, format!("invalid response: {e}"))
            }
        }
    }
}

// ─── HTTP generator ─────────────────────────────────────

/// `TextGenerator` over an Ollama or OpenAI-compatible chat endpoint
pub struct HttpTextGenerator {
    client: reqwest::Client,
    provider: LlmProvider,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTextGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            provider: config.provider,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        match self.provider {
            LlmProvider::Ollama => self.call_ollama(prompt, model).await,
            LlmProvider::Openai => self.call_openai(prompt, model).await,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

impl HttpTextGenerator {
    async fn call_ollama(&self, prompt: &str, model: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let req = OllamaChatRequest {
            model,
            messages: vec![ChatMessage::user(prompt)],
            stream: false,
        };

        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .context("Failed to call Ollama chat API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Ollama chat API returned {status}: {body}");
        }

        let body: OllamaChatResponse = resp
            .json()
            .await
            .context("Failed to decode Ollama chat response")?;
        Ok(body.message.content)
    }

    async fn call_openai(&self, prompt: &str, model: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let req = OpenAiChatRequest {
            model,
            messages: vec![ChatMessage::user(prompt)],
            temperature: 0.2,
        };

        let mut request = self.client.post(&url).json(&req);
        if let Some(api_key) = self.api_key.as_deref() {
            request = request.bearer_auth(api_key);
        }

        let resp = request
            .send()
            .await
            .context("Failed to call OpenAI chat API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI chat API returned {status}: {body}");
        }

        let body: OpenAiChatResponse = resp
            .json()
            .await
            .context("Failed to decode OpenAI chat response")?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockGenerator;
    use super::*;
    use crate::models::InterpretationSource;

    const QUERY: &str = "machine learning models for text analysis";

    fn interpreter(generator: Arc<MockGenerator>) -> QueryInterpreter {
        QueryInterpreter::new(generator, "gpt-4o-mini", Duration::from_millis(200))
    }

    #[test]
    fn test_prompt_embeds_query_and_example() {
        let prompt = build_prompt("vector databases");
        assert!(prompt.starts_with(
            "Analyze this search query and extract relevant search parameters: \"vector databases\""
        ));
        assert!(prompt.contains("\"intent\": \"Looking for AI models that can classify images\""));
    }

    #[test]
    fn test_parse_clean_object() {
        let params = parse_response(
            QUERY,
            r#"{"keywords":["text analysis","nlp"],"categories":["models"],"tags":["nlp"],"intent":"Find NLP models"}"#,
        )
        .unwrap();
        assert_eq!(params.keywords, vec!["text analysis", "nlp"]);
        assert_eq!(params.categories, vec![ContentKind::Models]);
        assert_eq!(params.tags, vec!["nlp"]);
        assert_eq!(params.intent, "Find NLP models");
    }

    #[test]
    fn test_parse_object_in_markdown_fence() {
        let content = "Sure!\n```json\n{\"keywords\": [\"ocr\"]}\n```\nLet me know.";
        let params = parse_response("read text from images", content).unwrap();
        assert_eq!(params.keywords, vec!["ocr"]);
        assert!(params.categories.is_empty());
        assert!(params.tags.is_empty());
        assert_eq!(params.intent, "read text from images");
    }

    #[test]
    fn test_parse_filters_unknown_categories() {
        let params = parse_response(
            QUERY,
            r#"{"keywords":["x"],"categories":["Models","datasets","models",7]}"#,
        )
        .unwrap();
        assert_eq!(params.categories, vec![ContentKind::Models]);
    }

    #[test]
    fn test_parse_rejects_invalid_structures() {
        assert!(parse_response(QUERY, "no json here").is_err());
        assert!(parse_response(QUERY, "} backwards {").is_err());
        assert!(parse_response(QUERY, r#"{"categories":["tools"]}"#).is_err());
        assert!(parse_response(QUERY, r#"{"keywords":[]}"#).is_err());
        assert!(parse_response(QUERY, r#"{"keywords":["  ", 3]}"#).is_err());
        assert!(parse_response(QUERY, r#"{"keywords":"nlp"}"#).is_err());
        assert!(parse_response(QUERY, r#"{"keywords":["nlp"],"#).is_err());
    }

    #[tokio::test]
    async fn test_interpret_uses_model_response() {
        let generator = MockGenerator::replying(
            r#"{"keywords":["machine learning","text analysis"],"categories":["models"],"tags":["nlp"],"intent":"NLP models"}"#,
        );
        let interpretation = interpreter(generator.clone()).interpret(QUERY).await;

        assert_eq!(interpretation.source, InterpretationSource::Model);
        assert_eq!(
            interpretation.params.keywords,
            vec!["machine learning", "text analysis"]
        );
        assert_eq!(generator.calls(), 1);
        assert_eq!(generator.last_model().as_deref(), Some("gpt-4o-mini"));
        assert!(generator.last_prompt().unwrap().contains(QUERY));
    }

    #[tokio::test]
    async fn test_interpret_falls_back_on_call_error() {
        let generator = MockGenerator::failing("503 Service Unavailable");
        let interpretation = interpreter(generator).interpret(QUERY).await;

        assert!(interpretation.is_fallback());
        assert_eq!(interpretation.params, SearchParams::fallback(QUERY));
    }

    #[tokio::test]
    async fn test_interpret_falls_back_on_timeout() {
        let generator = MockGenerator::hanging();
        let interpretation = interpreter(generator).interpret(QUERY).await;

        assert_eq!(
            interpretation.source,
            InterpretationSource::Fallback("generation timed out".to_string())
        );
        assert_eq!(interpretation.params, SearchParams::fallback(QUERY));
    }

    #[tokio::test]
    async fn test_interpret_falls_back_on_empty_or_malformed_response() {
        for content in ["", "   ", "I'm not sure what you mean.", r#"{"keywords": []}"#] {
            let interpretation = interpreter(MockGenerator::replying(content))
                .interpret(QUERY)
                .await;
            assert!(interpretation.is_fallback(), "content: {:?}", content);
            assert_eq!(interpretation.params.keywords, vec![QUERY.to_string()]);
            assert_eq!(interpretation.params.categories, ContentKind::ALL.to_vec());
            assert!(interpretation.params.tags.is_empty());
            assert_eq!(interpretation.params.intent, QUERY);
        }
    }

    #[test]
    fn test_zero_timeout_from_config_is_raised() {
        let config = LlmConfig {
            timeout_secs: 0,
            ..LlmConfig::default()
        };
        let interpreter = QueryInterpreter::from_config(MockGenerator::replying("{}"), &config);
        assert_eq!(interpreter.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_http_generator_trims_base_url() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/".to_string(),
            ..LlmConfig::default()
        };
        let generator = HttpTextGenerator::new(&config).unwrap();
        assert_eq!(generator.base_url, "http://localhost:11434");
        assert_eq!(generator.provider, LlmProvider::Ollama);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(20))]

            #[test]
            fn parse_never_panics(content in ".*") {
                let _ = parse_response(QUERY, &content);
            }
        }
    }
}
