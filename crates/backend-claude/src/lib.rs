//! Anthropic-backed collaborators.
//!
//! Provides the `PerceptionBackend` and `NameGenerator` traits and their
//! Claude implementation. Both traits return typed errors; callers decide
//! how to degrade when the service is unavailable.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use namecast_model::{Memorability, PerceptionResult};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Viewpoints the perception prompt role-plays, most general first.
const PERSONAS: [&str; 8] = [
    "a startup founder shopping for tools",
    "a procurement manager at a large enterprise",
    "a university student",
    "a retired schoolteacher",
    "a brand strategist at a design agency",
    "a software engineer",
    "a small business owner",
    "a journalist covering technology",
];

/// Errors from AI collaborator calls.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Trait for perception analysis services.
#[async_trait]
pub trait PerceptionBackend: Send + Sync {
    /// Assess how a name comes across, as seen by up to `personas` viewpoints.
    async fn analyze(
        &self,
        name: &str,
        mission: Option<&str>,
        personas: usize,
    ) -> Result<PerceptionResult, AiError>;

    fn name(&self) -> &'static str;
}

/// Trait for candidate name generators.
#[async_trait]
pub trait NameGenerator: Send + Sync {
    /// Propose up to `count` names for the described project.
    async fn generate(&self, description: &str, count: usize) -> Result<Vec<String>, AiError>;

    fn name(&self) -> &'static str;
}

/// Claude client configuration.
#[derive(Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl ClaudeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: ANTHROPIC_API_URL.to_string(),
            timeout_secs: 30,
            max_tokens: 1024,
        }
    }
}

impl fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

impl ChatResponse {
    fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Claude Messages API backend.
#[derive(Debug, Clone)]
pub struct ClaudeBackend {
    config: ClaudeConfig,
    http: reqwest::Client,
}

impl ClaudeBackend {
    pub fn new(config: ClaudeConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::Config("empty API key".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn headers(&self) -> Result<HeaderMap, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key)
                .map_err(|e| AiError::Config(e.to_string()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Single-turn completion returning the reply text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![WireMessage {
                role: "user",
                content: user,
            }],
            temperature: 0.7,
        };

        tracing::debug!(model = %self.config.model, "Claude chat request");

        let response = self
            .http
            .post(format!("{}/messages", self.config.base_url))
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let response: ChatResponse = response.json().await?;
        response
            .text()
            .ok_or_else(|| AiError::InvalidResponse("no text in Claude response".to_string()))
    }
}

#[async_trait]
impl PerceptionBackend for ClaudeBackend {
    async fn analyze(
        &self,
        name: &str,
        mission: Option<&str>,
        personas: usize,
    ) -> Result<PerceptionResult, AiError> {
        let mission = mission.filter(|m| !m.trim().is_empty());
        let user = perception_prompt(name, mission, personas);
        let reply = self.complete(PERCEPTION_SYSTEM, &user).await?;
        parse_perception(&reply, mission.is_some())
    }

    fn name(&self) -> &'static str {
        "claude"
    }
}

#[async_trait]
impl NameGenerator for ClaudeBackend {
    async fn generate(&self, description: &str, count: usize) -> Result<Vec<String>, AiError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let user = format!(
            "Project description:\n{description}\n\n\
             Propose {count} distinct brand names for this project. \
             Prefer short, pronounceable, single-word names likely to have a free .com or .io. \
             Reply with a JSON array of strings and nothing else."
        );
        let reply = self.complete(GENERATION_SYSTEM, &user).await?;
        parse_names(&reply, count)
    }

    fn name(&self) -> &'static str {
        "claude"
    }
}

const PERCEPTION_SYSTEM: &str = "You are a panel of consumer personas evaluating brand names. \
    Answer with a single JSON object and no prose.";

const GENERATION_SYSTEM: &str = "You are a naming consultant. Answer with JSON only.";

fn perception_prompt(name: &str, mission: Option<&str>, personas: usize) -> String {
    let panel = PERSONAS
        .iter()
        .take(personas.clamp(1, PERSONAS.len()))
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mission_line = match mission {
        Some(m) => format!(
            "The company's mission: \"{m}\". Rate how well the name fits it as \
             \"mission_alignment\", a number from 0 to 10."
        ),
        None => "Set \"mission_alignment\" to null.".to_string(),
    };

    format!(
        "Brand name: \"{name}\"\n\nPanel:\n{panel}\n\n\
         Combine the panel's first impressions into one verdict with the keys \
         \"evokes\" (short phrase), \"industry_association\" (array of industries), \
         \"memorability\" (\"high\", \"medium\" or \"low\"). {mission_line}"
    )
}

#[derive(Debug, Deserialize)]
struct PerceptionVerdict {
    evokes: String,
    #[serde(default)]
    industry_association: Vec<String>,
    memorability: Memorability,
    #[serde(default)]
    mission_alignment: Option<f64>,
}

/// Slice out the outermost JSON value delimited by `open`/`close`.
fn extract_json(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn parse_perception(reply: &str, has_mission: bool) -> Result<PerceptionResult, AiError> {
    let json = extract_json(reply, '{', '}')
        .ok_or_else(|| AiError::InvalidResponse("no JSON object in reply".to_string()))?;
    let verdict: PerceptionVerdict =
        serde_json::from_str(json).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    if verdict.evokes.trim().is_empty() {
        return Err(AiError::InvalidResponse("empty evokes".to_string()));
    }

    Ok(PerceptionResult {
        evokes: verdict.evokes.trim().to_string(),
        industry_association: verdict.industry_association,
        memorability: verdict.memorability,
        mission_alignment: if has_mission {
            verdict.mission_alignment.map(|a| a.clamp(0.0, 10.0))
        } else {
            None
        },
    })
}

fn parse_names(reply: &str, count: usize) -> Result<Vec<String>, AiError> {
    let json = extract_json(reply, '[', ']')
        .ok_or_else(|| AiError::InvalidResponse("no JSON array in reply".to_string()))?;
    let names: Vec<String> =
        serde_json::from_str(json).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    Ok(names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| n.chars().count() >= 2)
        .take(count)
        .collect())
}
