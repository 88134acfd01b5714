//! Open Library source plugin for subject listings
//!
//! API docs: https://openlibrary.org/dev/docs/api/subjects
//! Rate limit: no published limit, keep it polite (~1 req/sec)

use std::time::Duration;

use super::traits::{SourceError, SourceMetadata, SubjectSource};
use crate::config::SourceConfig;
use crate::cover::cover_or_placeholder;
use crate::dates::locale_date;
use crate::domain::{BookRecord, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_DATE, UNKNOWN_GENRE};
use crate::http::HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Which upstream field a record's display date comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// Bare `first_publish_year`, falling back to the `created` timestamp
    #[default]
    PublishYear,
    /// Locale-formatted `created` timestamp, falling back to the year
    Created,
}

/// Deserialize any JSON value and keep it only if it has the expected shape.
///
/// Upstream works are loosely typed; a malformed optional field must degrade
/// to `None` instead of failing the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
struct SubjectResponse {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    works: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryWork {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    authors: Option<Vec<serde_json::Value>>,
    #[serde(default, deserialize_with = "lenient")]
    cover_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    created: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    first_sentence: Option<SentenceField>,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryAuthor {
    name: Option<String>,
}

/// Open Library writes some text fields either bare or as `{type, value}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Plain(String),
    Typed { value: String },
}

impl TextValue {
    fn as_str(&self) -> &str {
        match self {
            TextValue::Plain(s) => s,
            TextValue::Typed { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentenceField {
    Many(Vec<TextValue>),
    One(TextValue),
}

impl SentenceField {
    fn first(&self) -> Option<&str> {
        let sentences: &[TextValue] = match self {
            SentenceField::Many(list) => list,
            SentenceField::One(one) => std::slice::from_ref(one),
        };
        sentences
            .iter()
            .map(|s| s.as_str().trim())
            .find(|s| !s.is_empty())
    }
}

pub struct OpenLibrarySource {
    client: HttpClient,
    base_url: String,
    result_limit: u32,
    date_style: DateStyle,
}

impl OpenLibrarySource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = HttpClient::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            result_limit: config.result_limit,
            date_style: config.date_style,
        })
    }

    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "openlibrary",
            name: "Open Library",
            description: "Open, editable library catalog from the Internet Archive",
            base_url: "https://openlibrary.org",
            rate_limit_per_second: 1.0,
            requires_api_key: false,
        }
    }

    pub fn subject_url(&self, subject: &str) -> Result<String, SourceError> {
        Ok(format!(
            "{}/subjects/{}.json",
            self.base_url,
            subject_slug(subject)?
        ))
    }

    /// Fetch and normalize one subject listing, reporting what went wrong.
    pub async fn try_fetch_by_subject(
        &self,
        subject: &str,
    ) -> Result<Vec<BookRecord>, SourceError> {
        let url = self.subject_url(subject)?;
        let limit = self.result_limit.to_string();

        tracing::debug!("Fetching {} (limit {})", url, limit);
        let response = self
            .client
            .get_query(&url, &[("limit", limit.as_str())])
            .await?;

        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }

        parse_subject_response(&response.body, subject, self.date_style)
    }
}

impl SubjectSource for OpenLibrarySource {
    /// Fetch one subject listing. Never fails: empty results, transport and
    /// parse errors all come back as an empty list with a warning logged.
    async fn fetch_by_subject(&self, subject: &str) -> Vec<BookRecord> {
        match self.try_fetch_by_subject(subject).await {
            Ok(books) if books.is_empty() => {
                tracing::warn!("No books found for subject {:?}", subject);
                books
            }
            Ok(books) => {
                tracing::info!("Fetched {} books for subject {:?}", books.len(), subject);
                books
            }
            Err(e) => {
                tracing::warn!("Error fetching books for subject {:?}: {}", subject, e);
                Vec::new()
            }
        }
    }
}

/// Path segment for a subject: `"Science Fiction"` → `science_fiction`.
pub fn subject_slug(subject: &str) -> Result<String, SourceError> {
    let slug = subject
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if slug.is_empty() {
        return Err(SourceError::InvalidQuery("empty subject".to_string()));
    }

    Ok(urlencoding::encode(&slug).into_owned())
}

/// Parse a subject listing and normalize every work into a book record.
///
/// Missing or empty `works` is not an error. Works that are not JSON objects
/// are skipped; any other missing or malformed field falls back to its
/// sentinel value.
pub fn parse_subject_response(
    json: &str,
    requested_subject: &str,
    date_style: DateStyle,
) -> Result<Vec<BookRecord>, SourceError> {
    let response: SubjectResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::Parse(format!("Invalid Open Library JSON: {}", e)))?;

    let genre = subject_label(response.name.as_deref(), requested_subject);

    Ok(response
        .works
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OpenLibraryWork>(value) {
            Ok(work) => Some(normalize_work(work, &genre, date_style)),
            Err(e) => {
                tracing::debug!("Skipping malformed work: {}", e);
                None
            }
        })
        .collect())
}

fn subject_label(name: Option<&str>, requested_subject: &str) -> String {
    [name.unwrap_or_default(), requested_subject]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_GENRE)
        .to_string()
}

fn normalize_work(work: OpenLibraryWork, genre: &str, date_style: DateStyle) -> BookRecord {
    let names: Vec<String> = work
        .authors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| serde_json::from_value::<OpenLibraryAuthor>(a).ok()?.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    let author = if names.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        names.join(", ")
    };

    let year = work.first_publish_year.map(|y| y.to_string());
    let created = work.created.as_ref().and_then(|c| locale_date(c.as_str()));
    let date = match date_style {
        DateStyle::PublishYear => year.or(created),
        DateStyle::Created => created.or(year),
    }
    .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let description = work
        .first_sentence
        .as_ref()
        .and_then(SentenceField::first)
        .unwrap_or(NO_DESCRIPTION)
        .to_string();

    BookRecord {
        id: Uuid::new_v4(),
        title: work.title.unwrap_or_default(),
        author,
        date,
        genre: genre.to_string(),
        image: cover_or_placeholder(work.cover_id),
        description,
    }
}
