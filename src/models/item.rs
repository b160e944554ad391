//! Catalog title (book) model and related types

use serde::{Deserialize, Serialize};

/// Media type codes used by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "u")]
    Unknown,
    #[serde(rename = "b")]
    PrintedText,
    #[serde(rename = "bc")]
    Comics,
    #[serde(rename = "p")]
    Periodic,
    #[serde(rename = "v")]
    Video,
    #[serde(rename = "a")]
    Audio,
    #[serde(rename = "m")]
    Multimedia,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MediaType::Unknown | MediaType::Other => "Unknown",
            MediaType::PrintedText => "Book",
            MediaType::Comics => "Comics",
            MediaType::Periodic => "Periodical",
            MediaType::Video => "Video",
            MediaType::Audio => "Audio",
            MediaType::Multimedia => "Multimedia",
        };
        write!(f, "{}", label)
    }
}

/// Author as embedded in catalog payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorName {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.firstname, &self.lastname) {
            (Some(first), Some(last)) => write!(f, "{} {}", first, last),
            (None, Some(name)) | (Some(name), None) => write!(f, "{}", name),
            (None, None) => write!(f, "Anonymous"),
        }
    }
}

/// Catalog title for lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub publisher: Option<String>,
    /// Publication date as entered in the catalog (often just a year)
    #[serde(default, alias = "date")]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<AuthorName>,
    #[serde(default)]
    pub nb_specimens: Option<i16>,
    #[serde(default)]
    pub nb_available: Option<i16>,
}

impl Book {
    pub fn title_or_placeholder(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    /// At least one copy can be borrowed right now
    pub fn is_available(&self) -> bool {
        self.nb_available.unwrap_or(0) > 0
    }
}

/// Minimal title embedded in copies and loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookShort {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
}

/// Catalog search parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freesearch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

/// Paginated list wrapper used by collection endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub per_page: i64,
}
