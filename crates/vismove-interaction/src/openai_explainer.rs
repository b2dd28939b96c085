//! OpenAIExplainer - Move function explanations from the OpenAI Chat Completions API.
//!
//! The model is asked for a JSON object carrying every view of the explanation
//! (plain explanation, coin flow, sequence diagram, concepts), so the caller can
//! switch views without asking again.
//!
//! Configuration: `OPENAI_API_KEY` (required), `OPENAI_MODEL_NAME` (default `gpt-4o`).

use async_trait::async_trait;
use minijinja::{Environment, context};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use vismove_core::error::{Result, VisMoveError};
use vismove_core::explainer::{Explainer, ExplanationRequest, FunctionExplanation};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL_NAME: &str = "OPENAI_MODEL_NAME";

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You explain Sui Move smart contracts to developers and users. \
Answer with a single JSON object and nothing else.";

const PROMPT_TEMPLATE: &str = r#"Explain the function `{{ function_name }}` of the Sui Move module below.

Return a JSON object with exactly these keys:
- "explanation": what the function does, step by step, in plain language.
- "coinFlow": how coins and objects move between the caller, shared objects and other parties. Say "No coin flow" when nothing moves.
- "umlSequenceDiagram": a PlantUML sequence diagram (@startuml ... @enduml) of the calls the function makes.
- "conceptsToExplain": a list of Move or Sui concepts a newcomer needs to understand this function.

Module source:
```move
{{ contract_code }}
```"#;

/// [`Explainer`] that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIExplainer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl OpenAIExplainer {
    /// Creates a new explainer with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            max_tokens: None,
        }
    }

    /// Loads the API key and model from the process environment.
    pub fn try_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the API key and model through `lookup`.
    ///
    /// Model name defaults to `gpt-4o` if not specified.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| VisMoveError::config(format!("{ENV_API_KEY} is not set")))?;
        let model = lookup(ENV_MODEL_NAME)
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the explainer at an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &ExplanationRequest) -> Result<ChatCompletionRequest> {
        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: render_prompt(request)?,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            max_tokens: self.max_tokens,
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| VisMoveError::http(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            VisMoveError::explainer(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl Explainer for OpenAIExplainer {
    async fn explain(&self, request: ExplanationRequest) -> Result<FunctionExplanation> {
        tracing::info!(
            "[OpenAIExplainer] Explaining {} with {}",
            request.function_name,
            self.model
        );
        let body = self.build_request(&request)?;
        let text = self.send_request(&body).await?;
        parse_explanation(&text)
    }
}

/// Renders the user prompt for `request`.
pub fn render_prompt(request: &ExplanationRequest) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("explain", PROMPT_TEMPLATE)
        .map_err(|e| VisMoveError::explainer(format!("invalid prompt template: {e}")))?;
    let template = env
        .get_template("explain")
        .map_err(|e| VisMoveError::explainer(format!("missing prompt template: {e}")))?;
    template
        .render(context! {
            function_name => &request.function_name,
            contract_code => &request.contract_code,
        })
        .map_err(|e| VisMoveError::explainer(format!("failed to render prompt: {e}")))
}

/// Parses the model output, tolerating a surrounding markdown code fence.
pub fn parse_explanation(text: &str) -> Result<FunctionExplanation> {
    let json = strip_code_fence(text);
    let explanation: FunctionExplanation = serde_json::from_str(json).map_err(|e| {
        VisMoveError::explainer(format!("model returned a malformed explanation: {e}"))
    })?;
    if explanation.explanation.trim().is_empty() {
        return Err(VisMoveError::explainer("model returned an empty explanation"));
    }
    Ok(explanation)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| VisMoveError::explainer("OpenAI API returned no content in the response"))
}

fn map_http_error(status: StatusCode, body: String) -> VisMoveError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            VisMoveError::config(format!("OpenAI rejected the API key: {message}"))
        }
        _ => VisMoveError::explainer(format!(
            "OpenAI API returned {}: {}",
            status.as_u16(),
            message
        )),
    }
}
