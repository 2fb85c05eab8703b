//! Error types for Starry Core

use thiserror::Error;

/// Result type alias for catalog and player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error types
#[derive(Error, Debug)]
pub enum Error {
    // API errors
    #[error("{body}")]
    Http { status: u16, body: String },

    #[error("Token expired, get fresh token using current token")]
    TokenExpired,

    #[error("Couldn't read body!")]
    UnreadableBody,

    #[error("Failed to parse video details: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Player errors
    #[error("Failed to create player: {0}")]
    PlayerConstruction(String),

    #[error("Engine error: {0}")]
    Engine(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if the caller can recover by retrying (possibly with a fresh token)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network(_)
                | Error::TokenExpired
                | Error::PlayerConstruction(_)
                | Error::Engine(_)
        )
    }

    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Http { .. } => "HTTP_STATUS",
            Error::TokenExpired => "TOKEN_EXPIRED",
            Error::UnreadableBody => "UNREADABLE_BODY",
            Error::Parse(_) => "PARSE",
            Error::Json(_) => "JSON",
            Error::Network(_) => "NETWORK",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::PlayerConstruction(_) => "PLAYER_CONSTRUCTION",
            Error::Engine(_) => "ENGINE",
            Error::Internal(_) => "INTERNAL",
        }
    }
}

/// A required key was absent while walking the details document.
///
/// There is one variant per step of the hero path so callers can tell
/// exactly where the response shape diverged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing success object")]
    MissingSuccess,

    #[error("Missing page object")]
    MissingPage,

    #[error("Missing spaces object")]
    MissingSpaces,

    #[error("Missing hero space")]
    MissingHero,

    #[error("Missing hero widget_wrappers")]
    MissingWidgetWrappers,

    #[error("Missing hero widget")]
    MissingWidget,

    #[error("Missing widget data")]
    MissingWidgetData,

    #[error("Missing content_info")]
    MissingContentInfo,

    #[error("Missing title")]
    MissingTitle,

    #[error("Missing description")]
    MissingDescription,

    #[error("Missing hero image")]
    MissingHeroImage,
}

impl ParseError {
    /// Name of the key that was missing
    pub fn key(&self) -> &'static str {
        match self {
            ParseError::MissingSuccess => "success",
            ParseError::MissingPage => "page",
            ParseError::MissingSpaces => "spaces",
            ParseError::MissingHero => "hero",
            ParseError::MissingWidgetWrappers => "widget_wrappers",
            ParseError::MissingWidget => "widget",
            ParseError::MissingWidgetData => "data",
            ParseError::MissingContentInfo => "content_info",
            ParseError::MissingTitle => "title",
            ParseError::MissingDescription => "description",
            ParseError::MissingHeroImage => "hero_img",
        }
    }
}
