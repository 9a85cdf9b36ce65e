use thiserror::Error;

/// User input the controller refuses before touching any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search query cannot be empty.")]
    EmptyQuery,
    #[error("Unknown search field: {0}")]
    UnknownField(String),
    #[error("No book at position {index} (list has {len})")]
    NoSuchRecord { index: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Catalog responded with status: {0}")]
    Status(reqwest::StatusCode),
    /// The body arrived but is not a volumes response.
    #[error("Parse error: {0}")]
    Parse(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
#[error("Render error: {0}")]
pub struct RenderError(#[from] minijinja::Error);

/// Failure of a controller transition that takes user input.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
