//! Bookmarks and their resource categories

use crate::domain::ids::{generate_id, now_millis};
use crate::domain::tags::{any_tag_contains, contains_ci};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource category of a bookmark.
///
/// Serialized as the display label so backups stay readable by older
/// exports, parsed from either the key or the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[serde(rename = "嵌入式/MCU")]
    #[default]
    Embedded,
    #[serde(rename = "Linux/驱动")]
    Linux,
    #[serde(rename = "硬件/PCB")]
    Hardware,
    #[serde(rename = "工具/软件")]
    Tools,
    #[serde(rename = "教程/博客")]
    Learning,
    #[serde(rename = "AI/算法")]
    Ai,
    #[serde(rename = "其他资源")]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Embedded,
        Category::Linux,
        Category::Hardware,
        Category::Tools,
        Category::Learning,
        Category::Ai,
        Category::Other,
    ];

    /// Upper-case key used by the AI response schema
    pub fn key(&self) -> &'static str {
        match self {
            Category::Embedded => "EMBEDDED",
            Category::Linux => "LINUX",
            Category::Hardware => "HARDWARE",
            Category::Tools => "TOOLS",
            Category::Learning => "LEARNING",
            Category::Ai => "AI",
            Category::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Embedded => "嵌入式/MCU",
            Category::Linux => "Linux/驱动",
            Category::Hardware => "硬件/PCB",
            Category::Tools => "工具/软件",
            Category::Learning => "教程/博客",
            Category::Ai => "AI/算法",
            Category::Other => "其他资源",
        }
    }

    /// Map an AI-suggested key to a category; unknown keys become `Other`.
    pub fn from_key_lossy(key: &str) -> Category {
        Category::from_str(key).unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(trimmed) || c.label() == trimmed)
            .ok_or_else(|| {
                format!(
                    "Invalid category: '{}'. Valid categories are: embedded, linux, hardware, tools, learning, ai, other",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub created_at: i64,
}

/// Fields accepted when creating a bookmark
#[derive(Debug, Clone, Default)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
}

/// Prefix `https://` unless the url already starts with `http`.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

impl Bookmark {
    pub fn create(draft: BookmarkDraft) -> Self {
        Bookmark {
            id: generate_id(""),
            title: draft.title,
            url: normalize_url(&draft.url),
            description: draft.description,
            category: draft.category,
            tags: draft.tags,
            created_at: now_millis(),
        }
    }

    pub fn apply(&mut self, patch: BookmarkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Category filter (None = all) plus free-text query over title,
    /// description and tags.
    pub fn matches(&self, category: Option<Category>, query: &str) -> bool {
        if let Some(c) = category {
            if self.category != c {
                return false;
            }
        }
        let q = query.to_lowercase();
        contains_ci(&self.title, &q)
            || contains_ci(&self.description, &q)
            || any_tag_contains(&self.tags, &q)
    }
}
