//! Gemini `generateContent` client for metadata suggestions
//!
//! Structured suggestions degrade to fallbacks instead of failing: a
//! missing API key is the only error the caller sees from `analyze_url`.

use crate::domain::{Category, DailyPlan, MaterialType};
use crate::error::{EmbedLinkError, Result};
use anyhow::{anyhow, Context};
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

const MAX_TAGS: usize = 5;
const NO_DESCRIPTION: &str = "No description";
const FALLBACK_DESCRIPTION: &str =
    "Could not generate a description automatically; please enter one manually.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(prompt: String, schema: Option<Value>) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: schema.map(|s| GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(s),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    pub fn text(&self) -> Option<String> {
        let content = &self.candidates.first()?.content;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        Some(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Suggested bookmark metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlAnalysis {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
}

impl UrlAnalysis {
    pub fn fallback(input: &str) -> Self {
        UrlAnalysis {
            title: input.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            category: Category::Other,
            tags: Vec::new(),
        }
    }
}

/// Suggested material metadata; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialAnalysis {
    pub description: Option<String>,
    pub kind: Option<MaterialType>,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawUrlAnalysis {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMaterialAnalysis {
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    tags: Option<Vec<String>>,
}

fn url_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "category": {
                "type": "STRING",
                "enum": ["EMBEDDED", "LINUX", "HARDWARE", "TOOLS", "LEARNING", "AI", "OTHER"]
            }
        },
        "required": ["title", "description", "category", "tags"]
    })
}

fn material_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "type": {
                "type": "STRING",
                "enum": ["pdf", "doc", "zip", "code", "image", "other"]
            },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Interpret the model's JSON answer for a bookmark suggestion.
pub fn interpret_url_analysis(input: &str, text: &str) -> anyhow::Result<UrlAnalysis> {
    let raw: RawUrlAnalysis =
        serde_json::from_str(text).context("model returned malformed JSON")?;

    let mut tags = raw.tags.unwrap_or_default();
    tags.truncate(MAX_TAGS);

    Ok(UrlAnalysis {
        title: non_blank(raw.title).unwrap_or_else(|| input.to_string()),
        description: non_blank(raw.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        category: raw
            .category
            .as_deref()
            .map(Category::from_key_lossy)
            .unwrap_or(Category::Other),
        tags,
    })
}

/// Interpret the model's JSON answer for a material suggestion.
pub fn interpret_material_analysis(text: &str) -> anyhow::Result<MaterialAnalysis> {
    let raw: RawMaterialAnalysis =
        serde_json::from_str(text).context("model returned malformed JSON")?;

    let mut tags = raw.tags.unwrap_or_default();
    tags.truncate(MAX_TAGS);

    Ok(MaterialAnalysis {
        description: non_blank(raw.description),
        kind: raw.kind.as_deref().and_then(|k| k.parse().ok()),
        tags,
    })
}

/// Strip Markdown code fences around a generated commit message
pub fn clean_commit_message(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn day_summary_prompt(plan: &DailyPlan) -> String {
    let schedule: Vec<String> = plan
        .schedule
        .iter()
        .map(|b| format!("{}-{}: {}", b.start_time, b.end_time, b.title))
        .collect();
    format!(
        "Based on today's schedule and tasks, write a concise daily summary.\n\
         Schedule: {}\n\
         Completed tasks: {}\n\
         Tone: professional yet personal. At most 80 words.",
        schedule.join(", "),
        plan.completed_todos().join(", ")
    )
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(EmbedLinkError::Ai("API key is missing".to_string()));
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(GeminiClient {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: model.to_string(),
        })
    }

    /// Client for the key in `GEMINI_API_KEY` (or `API_KEY`)
    pub fn from_env(model: &str) -> Result<Self> {
        let key = crate::infrastructure::Config::gemini_api_key()
            .ok_or_else(|| EmbedLinkError::Ai("API key is missing".to_string()))?;
        GeminiClient::new(key, model)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The key travels in a header so it never shows up in a URL.
    fn generate_request(&self, prompt: String, schema: Option<Value>) -> RequestBuilder {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        self.client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::new(prompt, schema))
    }

    fn generate(&self, prompt: String, schema: Option<Value>) -> anyhow::Result<String> {
        tracing::debug!(model = %self.model, "Gemini generate_content");

        let response = self
            .generate_request(prompt, schema)
            .send()
            .map_err(|e| e.without_url())
            .context("request to Gemini failed")?;

        let status = response.status();
        let body = response.text().context("failed to read Gemini response")?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(anyhow!("Gemini returned {}: {}", status, message));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).context("unexpected Gemini response shape")?;
        parsed
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("Gemini returned no text"))
    }

    /// Suggest title, description, category and tags for a link or name.
    pub fn analyze_url(&self, input: &str) -> UrlAnalysis {
        let prompt = format!(
            "I have a website link or name: \"{}\".\n\
             Analyze it for an embedded systems engineer and provide:\n\
             1. A concise title (max 30 chars).\n\
             2. A brief description (max 100 chars).\n\
             3. The most fitting category.\n\
             4. 3-5 short tags relevant to the technology (e.g. \"STM32\", \"Driver\", \"PCB\").",
            input
        );

        match self
            .generate(prompt, Some(url_schema()))
            .and_then(|text| interpret_url_analysis(input, &text))
        {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Gemini analysis failed");
                UrlAnalysis::fallback(input)
            }
        }
    }

    /// Suggest description, type and tags for a stored file.
    pub fn analyze_material(&self, name: &str, context: &str) -> Option<MaterialAnalysis> {
        let prompt = format!(
            "I am an embedded developer storing a file named \"{}\".\n\
             Context/notes provided: \"{}\".\n\
             Return a JSON object with a short professional \"description\" (max 80 chars), \
             3-5 technical \"tags\" and a suggested \"type\".",
            name, context
        );

        self.generate(prompt, Some(material_schema()))
            .and_then(|text| interpret_material_analysis(&text))
            .map_err(|e| tracing::warn!(error = %format!("{:#}", e), "Gemini material analysis failed"))
            .ok()
    }

    pub fn summarize_day(&self, plan: &DailyPlan) -> Result<String> {
        self.generate(day_summary_prompt(plan), None)
            .map(|t| t.trim().to_string())
            .map_err(|e| EmbedLinkError::Ai(format!("{:#}", e)))
    }

    /// Conventional Commits message for the given completed tasks
    pub fn commit_message(&self, completed: &[&str]) -> Result<String> {
        if completed.is_empty() {
            return Err(EmbedLinkError::InvalidInput(
                "Complete at least one task before generating a commit message".to_string(),
            ));
        }
        let prompt = format!(
            "Based on these completed tasks: {}.\n\
             Generate a concise, standard Git commit message (Conventional Commits format).\n\
             Only return the commit message.",
            completed.join(", ")
        );
        self.generate(prompt, None)
            .map(|t| clean_commit_message(&t))
            .map_err(|e| EmbedLinkError::Ai(format!("{:#}", e)))
    }
}
