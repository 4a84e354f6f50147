//! API handlers for Libris REST endpoints

pub mod books;
pub mod export;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;
pub mod stats;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Book, Member};

/// Paginated book list
#[derive(Serialize, ToSchema)]
pub struct BookPage {
    /// Books on this page
    pub items: Vec<Book>,
    /// Total number of books matching the query
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Paginated member list
#[derive(Serialize, ToSchema)]
pub struct MemberPage {
    /// Members on this page
    pub items: Vec<Member>,
    /// Total number of members matching the query
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}
