//! Materials library: datasheets, archives, repositories and other files

use crate::domain::ids::{generate_id, now_millis};
use crate::domain::tags::{any_tag_contains, contains_ci};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Pdf,
    Doc,
    Zip,
    Code,
    Image,
    Git,
    #[default]
    Other,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Pdf => "pdf",
            MaterialType::Doc => "doc",
            MaterialType::Zip => "zip",
            MaterialType::Code => "code",
            MaterialType::Image => "image",
            MaterialType::Git => "git",
            MaterialType::Other => "other",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(MaterialType::Pdf),
            "doc" => Ok(MaterialType::Doc),
            "zip" => Ok(MaterialType::Zip),
            "code" => Ok(MaterialType::Code),
            "image" => Ok(MaterialType::Image),
            "git" => Ok(MaterialType::Git),
            "other" => Ok(MaterialType::Other),
            _ => Err(format!(
                "Invalid material type: '{}'. Valid types are: pdf, doc, zip, code, image, git, other",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub size: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub description: String,
    pub kind: MaterialType,
    pub tags: Vec<String>,
    pub link: Option<String>,
}

impl Material {
    /// Repositories have no meaningful size; everything else is stored
    /// locally by the user.
    pub fn create(draft: MaterialDraft) -> Self {
        let size = if draft.kind == MaterialType::Git {
            "-"
        } else {
            "Local"
        };
        Material {
            id: generate_id("m"),
            name: draft.name,
            description: draft.description,
            kind: draft.kind,
            size: size.to_string(),
            tags: draft.tags,
            created_at: now_millis(),
            link: draft.link.filter(|l| !l.is_empty()),
        }
    }

    /// Query over name and tags
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        contains_ci(&self.name, &q) || any_tag_contains(&self.tags, &q)
    }
}
