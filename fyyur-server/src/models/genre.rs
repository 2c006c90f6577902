//! Genre tags attached to venues and artists

use serde::Serialize;

use super::ValidationError;

/// Maximum length of a single genre (join table column width)
pub const MAX_GENRE_LEN: usize = 50;

/// Ordered set of free-text genres.
///
/// Built from the values of a multi-select: entries are trimmed, blanks are
/// dropped and repeats collapse onto the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    pub fn from_selected<I, S>(selected: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres: Vec<String> = Vec::new();
        for raw in selected {
            let genre = raw.as_ref().trim();
            if genre.is_empty() {
                continue;
            }
            if genre.chars().count() > MAX_GENRE_LEN {
                return Err(ValidationError::TooLong {
                    field: "genres",
                    max: MAX_GENRE_LEN,
                });
            }
            if !genres.iter().any(|g| g == genre) {
                genres.push(genre.to_owned());
            }
        }
        Ok(Self(genres))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Genres {
    /// Wrap genres already stored in the database (unique per owner).
    fn from(genres: Vec<String>) -> Self {
        Self(genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_tolerated_and_collapsed() {
        let genres = Genres::from_selected(["Jazz", "Swing", "Jazz", " Swing "]).unwrap();
        assert_eq!(genres.as_slice(), ["Jazz", "Swing"]);
    }

    #[test]
    fn blanks_are_dropped() {
        let genres = Genres::from_selected(["", "  ", "Folk"]).unwrap();
        assert_eq!(genres.len(), 1);
        assert!(Genres::from_selected(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn rejects_overlong_genre() {
        let long = "x".repeat(MAX_GENRE_LEN + 1);
        let err = Genres::from_selected([long]).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "genres", .. }));
    }
}
