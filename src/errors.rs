//! # Error Types Module
//!
//! Errors raised around the parser: configuration, restaurant lookup and
//! seeding. Parsing itself never fails; it drops what it cannot read.

/// Custom error types for menu seeding operations
#[derive(Debug, Clone, PartialEq)]
pub enum MenuError {
    /// Invalid or missing configuration
    Config(String),
    /// A restaurant slug that matches none of the built-in menus
    UnknownRestaurant(String),
    /// Two records share an id, either within one menu or across restaurants
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
    /// Database access errors
    Database(String),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuError::Config(msg) => write!(f, "Configuration error: {msg}"),
            MenuError::UnknownRestaurant(slug) => write!(f, "Unknown restaurant: {slug}"),
            MenuError::DuplicateId { id, first, second } => {
                write!(f, "Duplicate menu item id '{id}' in {first} and {second}")
            }
            MenuError::Database(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<sqlx::Error> for MenuError {
    fn from(err: sqlx::Error) -> Self {
        MenuError::Database(err.to_string())
    }
}
