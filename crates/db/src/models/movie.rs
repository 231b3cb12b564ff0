//! The movie entity and its persisted document form.

use mongodb::bson::oid::ObjectId;
use movies_core::types::DocumentId;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// API-facing entity
// ---------------------------------------------------------------------------

/// A movie as it travels over HTTP.
///
/// Every field is optional on input so partial payloads (a delete request
/// carrying only `id`, a create request without one) still decode. A
/// missing, `null` or empty `id` decodes as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i64,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            year,
        }
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<DocumentId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

/// A document in the `movies` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub year: i64,
}

impl MovieDocument {
    /// Build the document for `movie` stored under `id`.
    pub fn with_id(id: DocumentId, movie: &Movie) -> Self {
        Self {
            id: id.object_id(),
            title: movie.title.clone(),
            year: movie.year,
        }
    }
}

impl From<MovieDocument> for Movie {
    fn from(doc: MovieDocument) -> Self {
        Self {
            id: Some(doc.id.into()),
            title: doc.title,
            year: doc.year,
        }
    }
}
