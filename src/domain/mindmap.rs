//! Tag mind map: notes grouped by primary tag on a radial layout

use crate::domain::note::Note;
use std::f64::consts::PI;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const CENTER: (f64, f64) = (400.0, 300.0);
pub const RADIUS: f64 = 180.0;
const LABEL_CHARS: usize = 10;

/// Notes sharing one primary tag
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    pub tag: String,
    pub notes: Vec<&'a Note>,
}

/// Placed tag node
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub tag: String,
    pub label: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Group notes by their first tag in first-seen order.
pub fn cluster_notes(notes: &[Note]) -> Vec<Cluster<'_>> {
    let mut clusters: Vec<Cluster<'_>> = Vec::new();
    for note in notes {
        let tag = note.primary_tag().unwrap_or(UNCATEGORIZED);
        match clusters.iter_mut().find(|c| c.tag == tag) {
            Some(cluster) => cluster.notes.push(note),
            None => clusters.push(Cluster {
                tag: tag.to_string(),
                notes: vec![note],
            }),
        }
    }
    clusters
}

/// Place clusters evenly on a circle around the centre node.
pub fn layout(clusters: &[Cluster<'_>]) -> Vec<TagNode> {
    let n = clusters.len();
    clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            let angle = (i as f64 / n as f64) * 2.0 * PI;
            let count = cluster.notes.len();
            TagNode {
                tag: cluster.tag.clone(),
                label: cluster.tag.chars().take(LABEL_CHARS).collect(),
                count,
                x: CENTER.0 + RADIUS * angle.cos(),
                y: CENTER.1 + RADIUS * angle.sin(),
                radius: f64::max(20.0, 15.0 + count as f64 * 2.0),
            }
        })
        .collect()
}

/// Notes shown for a selection: the cluster's notes, or every note when
/// nothing is selected. Unknown tags select nothing.
pub fn select<'a>(notes: &'a [Note], clusters: &[Cluster<'a>], tag: Option<&str>) -> Vec<&'a Note> {
    match tag {
        None => notes.iter().collect(),
        Some(t) => clusters
            .iter()
            .find(|c| c.tag == t)
            .map(|c| c.notes.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, tags: &[&str]) -> Note {
        Note::create(
            title.to_string(),
            String::new(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_cluster_by_first_tag() {
        let notes = vec![
            note("a", &["Linux", "Driver"]),
            note("b", &[]),
            note("c", &["Linux"]),
            note("d", &["Driver"]),
        ];
        let clusters = cluster_notes(&notes);
        let tags: Vec<&str> = clusters.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["Linux", UNCATEGORIZED, "Driver"]);
        assert_eq!(clusters[0].notes.len(), 2);
    }

    #[test]
    fn test_layout_positions_and_radius() {
        let mut notes: Vec<Note> = (0..5).map(|i| note(&i.to_string(), &["STM32"])).collect();
        notes.push(note("x", &["VeryLongTagName"]));
        let clusters = cluster_notes(&notes);
        let nodes = layout(&clusters);

        assert_eq!(nodes.len(), 2);
        // first node at angle 0
        assert!((nodes[0].x - 580.0).abs() < 1e-9);
        assert!((nodes[0].y - 300.0).abs() < 1e-9);
        assert_eq!(nodes[0].radius, 25.0);
        // second node at angle pi
        assert!((nodes[1].x - 220.0).abs() < 1e-9);
        assert_eq!(nodes[1].radius, 20.0);
        assert_eq!(nodes[1].label, "VeryLongTa");
    }

    #[test]
    fn test_select() {
        let notes = vec![note("a", &["I2C"]), note("b", &["SPI"])];
        let clusters = cluster_notes(&notes);
        assert_eq!(select(&notes, &clusters, None).len(), 2);
        let spi = select(&notes, &clusters, Some("SPI"));
        assert_eq!(spi.len(), 1);
        assert_eq!(spi[0].title, "b");
        assert!(select(&notes, &clusters, Some("CAN")).is_empty());
    }
}
