//! Partial, case-insensitive name search

use serde::Deserialize;

/// Submitted search form (`search_term` field)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Trimmed search term. An empty term matches every name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ILIKE pattern with LIKE metacharacters in the term matched literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Substring match regardless of case or position.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl From<SearchForm> for SearchTerm {
    fn from(form: SearchForm) -> Self {
        Self::new(&form.search_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_case_any_position() {
        let name = "The Musical Hop";
        assert!(SearchTerm::new("Hop").matches(name));
        assert!(SearchTerm::new("hop").matches(name));
        assert!(SearchTerm::new("MUSIC").matches(name));
        assert!(SearchTerm::new("").matches(name));
        assert!(!SearchTerm::new("Xyzzy").matches(name));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(SearchTerm::new("hop").like_pattern(), "%hop%");
        assert_eq!(SearchTerm::new("100%_\\").like_pattern(), "%100\\%\\_\\\\%");
        assert_eq!(SearchTerm::new("  band ").like_pattern(), "%band%");
    }
}
