//! Breadcrumb titles from document paths.
//!
//! Document trees are laid out as `1_Einfuehrung/1_3_Geltungsbereich/1_3_Geltungsbereich.md`:
//! numeric ordering prefixes, ASCII-transliterated umlauts, and a file named
//! like its directory. The title for that path is `Einführung > Geltungsbereich`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rules applied by [`beautify_filename`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleRules {
    /// Segment substitutions applied after prefix and extension stripping.
    pub replacements: BTreeMap<String, String>,
    /// Segments starting with any of these are build or temp artifacts.
    pub artifact_prefixes: Vec<String>,
    /// Joins the remaining segments.
    pub separator: String,
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            replacements: BTreeMap::from([("Einfuehrung".to_string(), "Einführung".to_string())]),
            artifact_prefixes: vec!["tmp".into()],
            separator: " > ".into(),
        }
    }
}

impl TitleRules {
    fn is_artifact(&self, segment: &str) -> bool {
        self.artifact_prefixes.iter().any(|p| segment.starts_with(p.as_str()))
    }

    fn substitute<'a>(&'a self, segment: &'a str) -> &'a str {
        self.replacements.get(segment).map(String::as_str).unwrap_or(segment)
    }
}

/// Turn a repository-relative path into a display title.
///
/// Returns an empty string when every segment is dropped.
pub fn beautify_filename(path: &str, rules: &TitleRules) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let last = segments.len().saturating_sub(1);

    let mut parts: Vec<&str> = Vec::with_capacity(segments.len());
    for (i, &segment) in segments.iter().enumerate() {
        let name = if i == last { strip_extension(segment) } else { segment };
        let name = rules.substitute(strip_ordering_prefix(name));
        if name.is_empty() || rules.is_artifact(name) {
            continue;
        }
        parts.push(name);
    }

    parts.dedup();
    parts.join(&rules.separator)
}

/// `1_3_Geltungsbereich` -> `Geltungsbereich`.
fn strip_ordering_prefix(segment: &str) -> &str {
    segment.trim_start_matches(|c: char| c.is_ascii_digit() || c == '_')
}

/// `Geltungsbereich.md` -> `Geltungsbereich`; dotfiles are left alone.
fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    }
}
