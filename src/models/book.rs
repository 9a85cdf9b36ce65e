use crate::error::ValidationError;
use crate::models::volumes::Volume;
use crate::utils::text::{extract_year, join_names, or_placeholder, PLACEHOLDER};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub cover_url: String,
    pub ebook_available: bool,
    pub publish_year: String,
    pub rating: Option<f64>,
}

impl BookRecord {
    /// Rating used for ordering; a book nobody rated sorts as 0.
    pub fn sort_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Zero and missing ratings both read as unknown.
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) if rating != 0.0 => rating.to_string(),
            _ => PLACEHOLDER.to_string(),
        }
    }

    pub fn ebook_label(&self) -> &'static str {
        if self.ebook_available {
            "E-book Access: Available"
        } else {
            "E-book Access: Unavailable"
        }
    }
}

impl From<Volume> for BookRecord {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info.unwrap_or_default();

        let author = info
            .authors
            .as_deref()
            .and_then(join_names)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let isbn = info
            .industry_identifiers
            .as_deref()
            .and_then(|ids| ids.first())
            .and_then(|id| id.identifier.as_deref());

        let cover_url = info
            .image_links
            .and_then(|links| links.thumbnail)
            .unwrap_or_default();

        let publish_year = info
            .published_date
            .as_deref()
            .and_then(extract_year)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let ebook_available = volume
            .access_info
            .and_then(|access| access.is_ebook)
            .unwrap_or(false);

        BookRecord {
            title: or_placeholder(info.title.as_deref()),
            author,
            isbn: or_placeholder(isbn),
            cover_url,
            ebook_available,
            publish_year,
            rating: info.average_rating,
        }
    }
}

/// Field a search term is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Subject,
    Publisher,
    Isbn,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::Subject,
        SearchField::Publisher,
        SearchField::Isbn,
    ];

    pub fn token(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Subject => "subject",
            SearchField::Publisher => "publisher",
            SearchField::Isbn => "isbn",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SearchField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SearchField::ALL
            .into_iter()
            .find(|field| field.token() == wanted)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}
