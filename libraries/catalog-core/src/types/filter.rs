//! Album list filtering

use super::Album;
use serde::{Deserialize, Serialize};

/// Case-insensitive substring filters for listing albums
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl AlbumFilter {
    /// Build a filter from raw search inputs, dropping blank ones
    pub fn from_inputs(band: &str, genre: &str) -> Self {
        Self {
            band: trimmed(band),
            genre: trimmed(genre),
        }
    }

    pub fn is_empty(&self) -> bool {
        active(self.band.as_deref()).is_none() && active(self.genre.as_deref()).is_none()
    }

    /// Whether an album passes both filters. Empty filters match everything.
    pub fn matches(&self, album: &Album) -> bool {
        contains_ci(&album.band, active(self.band.as_deref()))
            && contains_ci(&album.genre, active(self.genre.as_deref()))
    }
}

fn trimmed(input: &str) -> Option<String> {
    let input = input.trim();
    (!input.is_empty()).then(|| input.to_string())
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(band: &str, genre: &str) -> Album {
        Album {
            id: 1,
            band: band.into(),
            title: "t".into(),
            year: 1990,
            genre: genre.into(),
            cover: None,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = AlbumFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&album("AC/DC", "Hard Rock")));
    }

    #[test]
    fn test_band_match_is_case_insensitive_substring() {
        let filter = AlbumFilter {
            band: Some("metal".into()),
            genre: None,
        };
        assert!(filter.matches(&album("Metallica", "Thrash Metal")));
        assert!(!filter.matches(&album("AC/DC", "Hard Rock")));
    }

    #[test]
    fn test_both_filters_must_match() {
        let filter = AlbumFilter {
            band: Some("METALLICA".into()),
            genre: Some("rock".into()),
        };
        assert!(!filter.matches(&album("Metallica", "Thrash Metal")));
        assert!(filter.matches(&album("Metallica", "Hard Rock")));
    }

    #[test]
    fn test_from_inputs_drops_blank_values() {
        let filter = AlbumFilter::from_inputs("  ", " thrash ");
        assert_eq!(filter.band, None);
        assert_eq!(filter.genre.as_deref(), Some("thrash"));
    }

    #[test]
    fn test_empty_string_filter_is_ignored() {
        let filter = AlbumFilter {
            band: Some(String::new()),
            genre: None,
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&album("Anything", "Any")));
    }
}
