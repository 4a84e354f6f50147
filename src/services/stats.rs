//! Statistics service

use std::sync::Arc;

use crate::{
    api::stats::StatsResponse,
    error::AppResult,
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Get library-wide counters
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let (total_books, total_copies, available_copies): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(total_copies), 0)::bigint,
                   COALESCE(SUM(available_copies), 0)::bigint
            FROM books
            "#,
        )
        .fetch_one(pool)
        .await?;

        let (total_members, active_members): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE active) FROM members",
        )
        .fetch_one(pool)
        .await?;

        let active_loans = self.repository.loans.count_active().await?;
        let overdue_loans = self.repository.loans.count_overdue(self.clock.today()).await?;

        Ok(StatsResponse {
            total_books,
            total_copies,
            available_copies,
            total_members,
            active_members,
            active_loans,
            overdue_loans,
        })
    }
}
