//! Album types

use crate::cover::cover_url;
use crate::error::{CatalogError, Result};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

pub type AlbumId = u64;

/// An album as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub band: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    /// Filename of an uploaded cover
    pub cover: Option<String>,
}

impl Album {
    /// Attach the cover URL derived from `origin`
    pub fn with_cover_url(self, origin: &str) -> AlbumView {
        let cover_url = cover_url(origin, self.cover.as_deref());
        AlbumView {
            album: self,
            cover_url,
        }
    }
}

/// An album as it appears on the wire: stored fields plus `coverUrl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    #[serde(flatten)]
    pub album: Album,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl AlbumView {
    pub fn id(&self) -> AlbumId {
        self.album.id
    }

    /// Fill in a missing `coverUrl` from the stored filename against
    /// `origin`. A URL the server already sent is kept as is.
    pub fn normalized(self, origin: &str) -> Self {
        if self.cover_url.is_some() {
            return self;
        }
        self.album.with_cover_url(origin)
    }
}

/// Data for creating a new album.
///
/// Every field is optional on the wire so that missing input can be reported
/// as a single validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAlbum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "year_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl CreateAlbum {
    /// Build the stored album, failing if a required field is absent.
    ///
    /// Empty strings and a zero year count as absent. An empty cover is
    /// stored as `None`.
    pub fn into_album(self, id: AlbumId) -> Result<Album> {
        match (
            non_empty(self.band),
            non_empty(self.title),
            self.year.filter(|year| *year != 0),
            non_empty(self.genre),
        ) {
            (Some(band), Some(title), Some(year), Some(genre)) => Ok(Album {
                id,
                band,
                title,
                year,
                genre,
                cover: non_empty(self.cover),
            }),
            _ => Err(CatalogError::MissingFields),
        }
    }
}

/// Partial update of an album.
///
/// `cover` distinguishes "not supplied" (`None`) from an explicit clear
/// (`Some(None)`, sent as `null` or `""`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAlbum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "year_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover: Option<Option<String>>,
}

impl UpdateAlbum {
    /// Update only the title
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Overwrite the fields that were supplied
    pub fn apply_to(self, album: &mut Album) {
        if let Some(band) = non_empty(self.band) {
            album.band = band;
        }
        if let Some(title) = non_empty(self.title) {
            album.title = title;
        }
        if let Some(year) = self.year.filter(|year| *year != 0) {
            album.year = year;
        }
        if let Some(genre) = non_empty(self.genre) {
            album.genre = genre;
        }
        if let Some(cover) = self.cover {
            album.cover = non_empty(cover);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Number(i64),
    Text(String),
}

// Form inputs send the year as text. A blank string counts as absent.
fn year_field<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(year)) => i32::try_from(year)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("year {} is out of range", year))),
        Some(YearInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("year must be a number, got {:?}", text)))
        }
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present_field<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn master_of_puppets() -> Album {
        Album {
            id: 1,
            band: "Metallica".into(),
            title: "Master of Puppets".into(),
            year: 1986,
            genre: "Thrash Metal".into(),
            cover: Some("1_master.jpg".into()),
        }
    }

    #[test]
    fn test_view_serializes_cover_url_in_camel_case() {
        let view = master_of_puppets().with_cover_url("http://localhost:5000");
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["band"], "Metallica");
        assert_eq!(value["cover"], "1_master.jpg");
        assert_eq!(
            value["coverUrl"],
            "http://localhost:5000/covers/1_master.jpg"
        );
    }

    #[test]
    fn test_view_without_cover_has_null_url() {
        let mut album = master_of_puppets();
        album.cover = None;
        let value = serde_json::to_value(album.with_cover_url("http://x")).unwrap();
        assert!(value["coverUrl"].is_null());
        assert!(value["cover"].is_null());
    }

    #[test]
    fn test_create_requires_all_fields() {
        let request: CreateAlbum = serde_json::from_value(json!({
            "band": "Slayer",
            "title": "Reign in Blood",
            "year": 1986
        }))
        .unwrap();

        assert_eq!(request.into_album(4), Err(CatalogError::MissingFields));
    }

    #[test]
    fn test_create_treats_empty_and_zero_as_absent() {
        let empty_band = CreateAlbum {
            band: Some(String::new()),
            title: Some("T".into()),
            year: Some(2000),
            genre: Some("G".into()),
            cover: None,
        };
        assert!(empty_band.into_album(1).is_err());

        let zero_year = CreateAlbum {
            band: Some("B".into()),
            title: Some("T".into()),
            year: Some(0),
            genre: Some("G".into()),
            cover: None,
        };
        assert!(zero_year.into_album(1).is_err());
    }

    #[test]
    fn test_create_stores_empty_cover_as_none() {
        let request = CreateAlbum {
            band: Some("B".into()),
            title: Some("T".into()),
            year: Some(2000),
            genre: Some("G".into()),
            cover: Some(String::new()),
        };
        let album = request.into_album(7).unwrap();
        assert_eq!(album.id, 7);
        assert_eq!(album.cover, None);
    }

    #[test]
    fn test_update_distinguishes_missing_and_null_cover() {
        let missing: UpdateAlbum = serde_json::from_value(json!({ "title": "X" })).unwrap();
        assert_eq!(missing.cover, None);

        let null: UpdateAlbum = serde_json::from_value(json!({ "cover": null })).unwrap();
        assert_eq!(null.cover, Some(None));

        let blank: UpdateAlbum = serde_json::from_value(json!({ "cover": "" })).unwrap();
        assert_eq!(blank.cover, Some(Some(String::new())));
    }

    #[test]
    fn test_title_only_update_leaves_other_fields() {
        let mut album = master_of_puppets();
        UpdateAlbum::title("Master of Puppets (Remastered)").apply_to(&mut album);

        assert_eq!(album.title, "Master of Puppets (Remastered)");
        assert_eq!(album.band, "Metallica");
        assert_eq!(album.year, 1986);
        assert_eq!(album.genre, "Thrash Metal");
        assert_eq!(album.cover.as_deref(), Some("1_master.jpg"));
    }

    #[test]
    fn test_explicit_blank_cover_clears_it() {
        let mut album = master_of_puppets();
        let update: UpdateAlbum = serde_json::from_value(json!({ "cover": "" })).unwrap();
        update.apply_to(&mut album);
        assert_eq!(album.cover, None);
    }

    #[test]
    fn test_year_accepts_numbers_and_numeric_text() {
        let number: CreateAlbum = serde_json::from_value(json!({ "year": 1986 })).unwrap();
        assert_eq!(number.year, Some(1986));

        let text: CreateAlbum = serde_json::from_value(json!({ "year": " 1986 " })).unwrap();
        assert_eq!(text.year, Some(1986));

        let blank: CreateAlbum = serde_json::from_value(json!({ "year": "" })).unwrap();
        assert_eq!(blank.year, None);

        let update: UpdateAlbum = serde_json::from_value(json!({ "year": "1991" })).unwrap();
        assert_eq!(update.year, Some(1991));

        assert!(serde_json::from_value::<CreateAlbum>(json!({ "year": "soon" })).is_err());
        assert!(serde_json::from_value::<CreateAlbum>(json!({ "year": 1e12 })).is_err());
    }

    #[test]
    fn test_year_serializes_as_number() {
        let request = CreateAlbum {
            year: Some(1986),
            ..CreateAlbum::default()
        };
        assert_eq!(serde_json::to_value(request).unwrap(), json!({ "year": 1986 }));
    }

    #[test]
    fn test_title_update_serializes_without_other_keys() {
        let value = serde_json::to_value(UpdateAlbum::title("New")).unwrap();
        assert_eq!(value, json!({ "title": "New" }));
    }
}
