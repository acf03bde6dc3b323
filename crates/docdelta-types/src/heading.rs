use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// How a heading changed between the two document versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingType {
    /// Unchanged heading.
    #[default]
    Normal,
    /// Heading present only in the target version.
    Inserted,
    /// Heading present only in the source version.
    Deleted,
    /// Heading text was rewritten (old and new text both present).
    Replaced,
}

impl fmt::Display for HeadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Inserted => write!(f, "inserted"),
            Self::Deleted => write!(f, "deleted"),
            Self::Replaced => write!(f, "replaced"),
        }
    }
}

/// A node in the change-aware heading outline.
///
/// Children always have a strictly greater `level` than their parent, and
/// appear in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// The rendered heading's `id` attribute, used as an anchor.
    pub id: String,
    /// Cleaned display title.
    pub title: String,
    /// Change classification.
    #[serde(rename = "type")]
    pub kind: HeadingType,
    /// Heading level, 1..=6.
    pub level: u8,
    /// Nested sub-headings.
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Create a leaf node, validating the level.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: HeadingType,
        level: u8,
    ) -> Result<Self, TypeError> {
        if !(1..=6).contains(&level) {
            return Err(TypeError::InvalidHeadingLevel(level));
        }
        Ok(Self {
            id: id.into(),
            title: title.into(),
            kind,
            level,
            children: Vec::new(),
        })
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(HeadingNode::subtree_len).sum::<usize>()
    }

    /// Pre-order iterator over this subtree.
    pub fn iter(&self) -> impl Iterator<Item = &HeadingNode> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            pending.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, level: u8) -> HeadingNode {
        HeadingNode::new(id, id, HeadingType::Normal, level).unwrap()
    }

    #[test]
    fn rejects_out_of_range_levels() {
        assert_eq!(
            HeadingNode::new("x", "x", HeadingType::Normal, 0).unwrap_err(),
            TypeError::InvalidHeadingLevel(0)
        );
        assert!(HeadingNode::new("x", "x", HeadingType::Normal, 7).is_err());
        assert!(HeadingNode::new("x", "x", HeadingType::Normal, 6).is_ok());
    }

    #[test]
    fn serializes_kind_as_type() {
        let n = HeadingNode::new("heading-a", "A", HeadingType::Replaced, 2).unwrap();
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "replaced");
        assert_eq!(value["level"], 2);
        assert!(value["children"].as_array().unwrap().is_empty());
    }

    #[test]
    fn preorder_iteration() {
        let mut root = node("a", 1);
        let mut b = node("b", 2);
        b.children.push(node("c", 3));
        root.children.push(b);
        root.children.push(node("d", 2));

        let ids: Vec<&str> = root.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(root.subtree_len(), 4);
    }
}
