//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year_published: Option<i32>,
    pub genre: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// A book can be loaned while at least one copy is on the shelf.
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Copies currently out on loan.
    pub fn borrowed_copies(&self) -> i32 {
        self.total_copies - self.available_copies
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub year_published: Option<i32>,
    pub genre: Option<String>,
    #[validate(range(min = 0, message = "Number of copies cannot be negative"))]
    pub total_copies: i32,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub year_published: Option<i32>,
    pub genre: Option<String>,
    #[validate(range(min = 0, message = "Number of copies cannot be negative"))]
    pub total_copies: i32,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: i32,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Exact ISBN match
    pub isbn: Option<String>,
    /// Case-insensitive substring match on title
    pub title: Option<String>,
    /// Case-insensitive substring match on author
    pub author: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(total: i32, available: i32) -> Book {
        Book {
            id: 1,
            isbn: "978-0-00-000000-0".to_string(),
            title: "Test".to_string(),
            author: "Author".to_string(),
            year_published: None,
            genre: None,
            total_copies: total,
            available_copies: available,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn availability_follows_available_copies() {
        assert!(book(3, 1).is_available());
        assert!(!book(3, 0).is_available());
        assert!(!book(0, 0).is_available());
    }

    #[test]
    fn borrowed_copies_is_the_difference() {
        assert_eq!(book(3, 1).borrowed_copies(), 2);
        assert_eq!(book(3, 3).borrowed_copies(), 0);
    }
}
