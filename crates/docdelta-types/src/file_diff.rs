use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of change a single document went through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The document did not exist in the source version.
    Add,
    /// The document no longer exists in the target version.
    Delete,
    /// The document moved (possibly with edits).
    Rename,
    /// The document was edited in place.
    #[default]
    Change,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 4] = [Action::Add, Action::Delete, Action::Rename, Action::Change];

    /// Wire name, as used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Rename => "rename",
            Self::Change => "change",
        }
    }

    /// Human-readable label shown on diff cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "hinzugefügt",
            Self::Delete => "gelöscht",
            Self::Rename => "umbenannt",
            Self::Change => "geändert",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| TypeError::UnknownAction(s.to_string()))
    }
}

/// One changed document: its display title, change kind and rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Breadcrumb title derived from the document path.
    pub title: String,
    /// What happened to the document.
    pub action: Action,
    /// Rendered HTML with `<ins>`/`<del>` annotations.
    pub content: String,
}

impl FileDiff {
    pub fn new(title: impl Into<String>, action: Action, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_lowercase() {
        let json = serde_json::to_string(&Action::Rename).unwrap();
        assert_eq!(json, "\"rename\"");
        let back: Action = serde_json::from_str("\"add\"").unwrap();
        assert_eq!(back, Action::Add);
    }

    #[test]
    fn action_parse_roundtrip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert_eq!(
            "moved".parse::<Action>().unwrap_err(),
            TypeError::UnknownAction("moved".into())
        );
    }

    #[test]
    fn action_labels() {
        assert_eq!(Action::Add.label(), "hinzugefügt");
        assert_eq!(Action::Change.label(), "geändert");
        assert_eq!(Action::default(), Action::Change);
    }

    #[test]
    fn file_diff_json_shape() {
        let diff = FileDiff::new("Einführung", Action::Change, "<p>x</p>");
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(value["title"], "Einführung");
        assert_eq!(value["action"], "change");
        assert_eq!(value["content"], "<p>x</p>");
    }
}
