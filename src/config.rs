use crate::services::catalog::DEFAULT_CATALOG_URL;
use crate::services::controller::SearchOrdering;
use tracing::warn;

pub const DEFAULT_PORT: &str = "7004";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: String,
    pub catalog_url: String,
    pub ordering: SearchOrdering,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            ordering: SearchOrdering::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT").unwrap_or(defaults.port);
        let catalog_url = lookup("CATALOG_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.catalog_url);
        let ordering = match lookup("SEARCH_ORDERING") {
            Some(value) => parse_ordering(&value).unwrap_or_else(|| {
                warn!(
                    "Unknown SEARCH_ORDERING '{}', using last-resolved ordering",
                    value
                );
                defaults.ordering
            }),
            None => defaults.ordering,
        };

        Self {
            port,
            catalog_url,
            ordering,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_ordering(value: &str) -> Option<SearchOrdering> {
    match value.trim().to_lowercase().as_str() {
        "resolved" | "last-resolved" => Some(SearchOrdering::LastResolved),
        "submitted" | "last-submitted" => Some(SearchOrdering::LastSubmitted),
        _ => None,
    }
}
