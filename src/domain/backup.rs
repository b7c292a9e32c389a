//! Backup document shared by file export/import and Gist sync
//!
//! The export shape has one top-level key per collection plus a
//! `version` integer. Imports accept that shape, where every present key
//! replaces its collection, or a bare array, which older releases produced
//! and which only ever held bookmarks.

use crate::domain::{Bookmark, CodeSnippet, DailyPlan, Material, Note, Project};
use crate::error::{EmbedLinkError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BACKUP_VERSION: u32 = 6;

/// Full snapshot of every exported collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub bookmarks: Vec<Bookmark>,
    pub notes: Vec<Note>,
    pub projects: Vec<Project>,
    pub snippets: Vec<CodeSnippet>,
    pub materials: Vec<Material>,
    pub plans: Vec<DailyPlan>,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Collections found in an import; `None` means "leave as is"
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub bookmarks: Option<Vec<Bookmark>>,
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub snippets: Option<Vec<CodeSnippet>>,
    #[serde(default)]
    pub materials: Option<Vec<Material>>,
    #[serde(default)]
    pub plans: Option<Vec<DailyPlan>>,
}

impl ImportPayload {
    /// Names of the collections this payload replaces
    pub fn replaced(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.bookmarks.is_some() {
            names.push("bookmarks");
        }
        if self.notes.is_some() {
            names.push("notes");
        }
        if self.projects.is_some() {
            names.push("projects");
        }
        if self.snippets.is_some() {
            names.push("snippets");
        }
        if self.materials.is_some() {
            names.push("materials");
        }
        if self.plans.is_some() {
            names.push("plans");
        }
        names
    }
}

impl From<BackupDocument> for ImportPayload {
    fn from(doc: BackupDocument) -> Self {
        ImportPayload {
            bookmarks: Some(doc.bookmarks),
            notes: Some(doc.notes),
            projects: Some(doc.projects),
            snippets: Some(doc.snippets),
            materials: Some(doc.materials),
            plans: Some(doc.plans),
        }
    }
}

/// Parse import text: an export document or a legacy bookmark array.
pub fn parse_import(text: &str) -> Result<ImportPayload> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| EmbedLinkError::Backup(format!("Failed to parse backup file: {}", e)))?;
    payload_from_value(value)
}

pub fn payload_from_value(value: Value) -> Result<ImportPayload> {
    match value {
        Value::Array(_) => {
            let bookmarks: Vec<Bookmark> = serde_json::from_value(value).map_err(|e| {
                EmbedLinkError::Backup(format!("Invalid bookmark array: {}", e))
            })?;
            Ok(ImportPayload {
                bookmarks: Some(bookmarks),
                ..Default::default()
            })
        }
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| EmbedLinkError::Backup(format!("Invalid backup document: {}", e))),
        _ => Err(EmbedLinkError::Backup(
            "Backup must be a JSON object or an array of bookmarks".to_string(),
        )),
    }
}

/// `embedlink_backup_YYYY-MM-DD.json`
pub fn export_filename(date: NaiveDate) -> String {
    format!("embedlink_backup_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookmarkDraft, Category};

    fn bookmark() -> Bookmark {
        Bookmark::create(BookmarkDraft {
            title: "DigiKey".into(),
            url: "digikey.com".into(),
            category: Category::Hardware,
            ..Default::default()
        })
    }

    #[test]
    fn test_export_filename() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(export_filename(d), "embedlink_backup_2025-01-07.json");
    }

    #[test]
    fn test_bare_array_is_bookmarks_only() {
        let text = serde_json::to_string(&vec![bookmark()]).unwrap();
        let payload = parse_import(&text).unwrap();
        assert_eq!(payload.bookmarks.unwrap().len(), 1);
        assert!(payload.notes.is_none());
        assert!(payload.plans.is_none());
    }

    #[test]
    fn test_partial_document_only_replaces_present_keys() {
        let payload = parse_import(r#"{"notes": [], "version": 6}"#).unwrap();
        assert_eq!(payload.replaced(), vec!["notes"]);
        assert_eq!(payload.notes, Some(vec![]));
    }

    #[test]
    fn test_null_key_is_ignored() {
        let payload = parse_import(r#"{"bookmarks": null}"#).unwrap();
        assert!(payload.bookmarks.is_none());
    }

    #[test]
    fn test_rejects_scalars_and_garbage() {
        assert!(parse_import("42").is_err());
        assert!(parse_import("{not json").is_err());
        assert!(parse_import(r#"[{"title": 1}]"#).is_err());
    }

    #[test]
    fn test_document_round_trip_through_payload() {
        let doc = BackupDocument {
            bookmarks: vec![bookmark()],
            notes: vec![],
            projects: vec![],
            snippets: vec![],
            materials: vec![],
            plans: vec![],
            version: BACKUP_VERSION,
            timestamp: None,
        };
        let text = serde_json::to_string_pretty(&doc).unwrap();
        assert!(!text.contains("timestamp"));
        let payload = parse_import(&text).unwrap();
        assert_eq!(payload, ImportPayload::from(doc));
    }
}
