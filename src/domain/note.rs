//! Notes

use crate::domain::ids::{generate_id, now_millis};
use crate::domain::tags::{any_tag_contains, contains_ci};
use pulldown_cmark::{Event, Parser as MdParser, TagEnd};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Note {
    pub fn create(title: String, content: String, tags: Vec<String>) -> Self {
        let now = now_millis();
        Note {
            id: generate_id("n"),
            title,
            content,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit; always refreshes `updated_at`.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = now_millis().max(self.updated_at);
    }

    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        contains_ci(&self.title, &q)
            || contains_ci(&self.content, &q)
            || any_tag_contains(&self.tags, &q)
    }

    /// First tag, used to cluster notes in the mind map
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Plain-text excerpt of the Markdown content, at most `max_chars`
    /// characters (an ellipsis is appended when truncated).
    pub fn preview(&self, max_chars: usize) -> String {
        let plain = markdown_to_plain(&self.content);
        let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut cut: String = collapsed.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

fn markdown_to_plain(content: &str) -> String {
    let mut out = String::new();
    for event in MdParser::new(content) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => out.push(' '),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(content: &str) -> Note {
        Note::create(
            "I2C debugging".to_string(),
            content.to_string(),
            vec!["I2C".to_string(), "STM32".to_string()],
        )
    }

    #[test]
    fn test_create_sets_both_timestamps() {
        let n = note("body");
        assert!(n.id.starts_with('n'));
        assert_eq!(n.created_at, n.updated_at);
    }

    #[test]
    fn test_apply_refreshes_updated_at_only() {
        let mut n = note("body");
        n.updated_at -= 10_000;
        n.created_at -= 10_000;
        let created = n.created_at;
        let old_updated = n.updated_at;

        n.apply(NotePatch {
            content: Some("new body".to_string()),
            ..Default::default()
        });

        assert_eq!(n.content, "new body");
        assert_eq!(n.title, "I2C debugging");
        assert_eq!(n.created_at, created);
        assert!(n.updated_at > old_updated);
    }

    #[test]
    fn test_matches_content_and_tags() {
        let n = note("SCL stuck low after reset");
        assert!(n.matches("scl"));
        assert!(n.matches("stm"));
        assert!(!n.matches("spi"));
    }

    #[test]
    fn test_preview_strips_markdown() {
        let n = note("# Symptom\n\nSCL is **held low**.\n\n- toggle `GPIO` nine times");
        assert_eq!(n.preview(200), "Symptom SCL is held low. toggle GPIO nine times");
    }

    #[test]
    fn test_preview_truncates() {
        let n = note("abcdefghij");
        assert_eq!(n.preview(4), "abcd…");
    }

    #[test]
    fn test_primary_tag() {
        assert_eq!(note("x").primary_tag(), Some("I2C"));
        let untagged = Note::create("t".into(), "c".into(), vec![]);
        assert_eq!(untagged.primary_tag(), None);
    }
}
