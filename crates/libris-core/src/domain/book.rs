//! Book record domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a book record.
///
/// Assigned when a record is normalized from a fetch or added locally, and
/// never reused, so edits and deletes keep addressing the same record no
/// matter how the visible list has been filtered or paged since.
pub type BookId = Uuid;

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const USER_ADDED_DESCRIPTION: &str = "A new book added by the user.";

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    /// Contributor names joined with `", "`
    pub author: String,
    /// Free text: a bare year, a locale date, or whatever the user typed
    pub date: String,
    pub genre: String,
    /// Remote cover URL, placeholder URL, or `data:` URI
    pub image: String,
    pub description: String,
}

impl BookRecord {
    /// Create a record with a fresh id and sentinel values for every
    /// field except the title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: UNKNOWN_AUTHOR.to_string(),
            date: UNKNOWN_DATE.to_string(),
            genre: UNKNOWN_GENRE.to_string(),
            image: crate::cover::PLACEHOLDER_IMAGE.to_string(),
            description: NO_DESCRIPTION.to_string(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Apply the non-empty fields of `patch`. Returns true if anything changed.
    pub fn apply(&mut self, patch: &BookPatch) -> bool {
        let mut changed = false;
        for (slot, value) in [
            (&mut self.title, &patch.title),
            (&mut self.author, &patch.author),
            (&mut self.date, &patch.date),
            (&mut self.genre, &patch.genre),
            (&mut self.description, &patch.description),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                if slot.as_str() != value {
                    *slot = value.to_string();
                    changed = true;
                }
            }
        }
        changed
    }
}

/// A partial edit of a book record.
///
/// `None` and `Some("")` both mean "leave this field alone", the same as a
/// cancelled or blank edit prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
}

impl BookPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Whether applying this patch would leave any record unchanged.
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.author,
            &self.date,
            &self.genre,
            &self.description,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

/// Input of the add-book form.
///
/// `image` must already be a fully materialized URI (see
/// [`crate::cover::data_uri_from_file`]); no field is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub date: String,
    pub genre: Option<String>,
    pub image: String,
}

impl NewBook {
    pub fn into_record(self) -> BookRecord {
        BookRecord {
            id: Uuid::new_v4(),
            title: self.title,
            author: self.author,
            date: self.date,
            genre: self
                .genre
                .filter(|g| !g.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
            image: self.image,
            description: USER_ADDED_DESCRIPTION.to_string(),
        }
    }
}

impl From<NewBook> for BookRecord {
    fn from(book: NewBook) -> Self {
        book.into_record()
    }
}
