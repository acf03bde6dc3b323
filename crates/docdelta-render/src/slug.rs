//! GitHub-style heading slugs.

use std::collections::HashSet;

/// Produces unique, GitHub-compatible slugs for one rendered document.
///
/// A slugger remembers every slug it has handed out; a repeated heading text
/// gets `-1`, `-2`, ... appended. Create a fresh slugger per document.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text`, disambiguating against earlier slugs from this slugger.
    pub fn slug(&mut self, text: &str) -> String {
        self.claim(&slugify(text))
    }

    /// Reserve `id` as is, or with the first free `-N` suffix if taken.
    pub fn claim(&mut self, id: &str) -> String {
        let base = id.to_string();
        let mut candidate = base.clone();
        let mut n = 1;
        while self.seen.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }
}

/// Lowercase `text`, drop punctuation and symbols, turn spaces into `-`.
///
/// Letters and digits of any script are kept, so `Einführung` stays
/// `einführung`.
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_keeps_ids_verbatim_and_suffixes_repeats() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim("heading-Ziele"), "heading-Ziele");
        assert_eq!(slugger.claim("heading-Ziele"), "heading-Ziele-1");
        assert_eq!(slugger.slug("Ziele"), "ziele");
    }

    #[test]
    fn basic_slugs() {
        assert_eq!(slugify("Geltungsbereich"), "geltungsbereich");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  AV-01 Konformität  "), "av-01-konformität");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn punctuation_only_yields_empty_slug() {
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn duplicates_are_numbered() {
        let mut s = Slugger::new();
        assert_eq!(s.slug("Intro"), "intro");
        assert_eq!(s.slug("Intro"), "intro-1");
        assert_eq!(s.slug("Intro"), "intro-2");
        assert_eq!(s.slug("Other"), "other");
    }

    #[test]
    fn numbered_collision_with_literal_heading() {
        let mut s = Slugger::new();
        assert_eq!(s.slug("a-1"), "a-1");
        assert_eq!(s.slug("a"), "a");
        assert_eq!(s.slug("a"), "a-2");
    }
}
