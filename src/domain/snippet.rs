//! Reusable code snippets

use crate::domain::ids::{generate_id, now_millis};
use crate::domain::tags::{any_tag_contains, contains_ci};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnippetLanguage {
    #[default]
    C,
    Cpp,
    Python,
    Bash,
}

impl fmt::Display for SnippetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SnippetLanguage::C => "c",
            SnippetLanguage::Cpp => "cpp",
            SnippetLanguage::Python => "python",
            SnippetLanguage::Bash => "bash",
        };
        f.pad(s)
    }
}

impl FromStr for SnippetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" => Ok(SnippetLanguage::C),
            "cpp" | "c++" => Ok(SnippetLanguage::Cpp),
            "python" | "py" => Ok(SnippetLanguage::Python),
            "bash" | "sh" | "shell" => Ok(SnippetLanguage::Bash),
            _ => Err(format!(
                "Invalid language: '{}'. Valid languages are: c, cpp, python, bash",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub id: String,
    pub title: String,
    pub code: String,
    pub language: SnippetLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SnippetDraft {
    pub title: String,
    pub code: String,
    pub language: SnippetLanguage,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<SnippetLanguage>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub platform: Option<String>,
}

impl CodeSnippet {
    pub fn create(draft: SnippetDraft) -> Self {
        CodeSnippet {
            id: generate_id("s"),
            title: draft.title,
            code: draft.code,
            language: draft.language,
            description: draft.description,
            tags: draft.tags,
            platform: draft.platform,
            created_at: now_millis(),
        }
    }

    pub fn apply(&mut self, patch: SnippetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(platform) = patch.platform {
            self.platform = Some(platform);
        }
    }

    /// Query over title, tags and platform
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        contains_ci(&self.title, &q)
            || any_tag_contains(&self.tags, &q)
            || self.platform.as_deref().is_some_and(|p| contains_ci(p, &q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> CodeSnippet {
        CodeSnippet::create(SnippetDraft {
            title: "Ring buffer".to_string(),
            code: "typedef struct { uint8_t *buf; } ring_t;".to_string(),
            language: SnippetLanguage::C,
            tags: vec!["FIFO".to_string()],
            platform: Some("STM32F4".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_matches_platform() {
        let s = snippet();
        assert!(s.matches("stm32"));
        assert!(s.matches("fifo"));
        assert!(s.matches("ring"));
        // code body is not searched
        assert!(!s.matches("uint8_t"));
    }

    #[test]
    fn test_apply_keeps_other_fields() {
        let mut s = snippet();
        s.apply(SnippetPatch {
            language: Some(SnippetLanguage::Cpp),
            ..Default::default()
        });
        assert_eq!(s.language, SnippetLanguage::Cpp);
        assert_eq!(s.title, "Ring buffer");
        assert_eq!(s.platform.as_deref(), Some("STM32F4"));
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!("C++".parse::<SnippetLanguage>().unwrap(), SnippetLanguage::Cpp);
        assert_eq!("sh".parse::<SnippetLanguage>().unwrap(), SnippetLanguage::Bash);
        assert!("rust".parse::<SnippetLanguage>().is_err());
    }
}
