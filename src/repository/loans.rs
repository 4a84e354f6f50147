//! Loans repository for database operations
//!
//! Loan creation and return each mutate two tables (the loan row and the
//! book's stock). Both run inside a single transaction: the book row is
//! locked before the eligibility checks so a concurrent caller cannot
//! double-book the last copy, and any failure path drops the transaction
//! uncommitted, rolling everything back.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan::{fine_for, Loan, LoanStatus, MAX_ACTIVE_LOANS},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Get all loans, newest first
    pub async fn find_all(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY loan_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Get loans that have not been returned yet
    pub async fn find_active(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE status = 'ACTIVE' ORDER BY due_date, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Get active loans whose due date is strictly before `today`
    pub async fn find_overdue(&self, today: NaiveDate) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE status = 'ACTIVE' AND due_date < $1 ORDER BY due_date, id",
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Get all loans of one member, newest first
    pub async fn find_by_member(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE member_id = $1 ORDER BY loan_date DESC, id DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Count a member's active loans
    pub async fn count_active_by_member(&self, member_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE member_id = $1 AND status = 'ACTIVE'",
        )
        .bind(member_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count active loans across all members
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE status = 'ACTIVE'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count overdue loans
    pub async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE status = 'ACTIVE' AND due_date < $1",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Create a loan and take one copy off the shelf, atomically.
    ///
    /// Eligibility checks run in a fixed order, first failure wins:
    /// book available, member active, member under the active-loan cap.
    pub async fn create(
        &self,
        book_id: i32,
        member_id: i32,
        loan_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row so the availability check and the stock
        // decrement cannot race with a concurrent loan.
        let available: Option<i32> =
            sqlx::query_scalar("SELECT available_copies FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        match available {
            Some(n) if n > 0 => {}
            _ => {
                return Err(AppError::Conflict(
                    "The book is not available for loan".to_string(),
                ))
            }
        }

        let active: Option<bool> = sqlx::query_scalar("SELECT active FROM members WHERE id = $1")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?;

        if !active.unwrap_or(false) {
            return Err(AppError::Conflict("The member is not active".to_string()));
        }

        let active_loans: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE member_id = $1 AND status = 'ACTIVE'",
        )
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        if active_loans >= MAX_ACTIVE_LOANS {
            return Err(AppError::Conflict(format!(
                "The member already has the maximum of {} active loans",
                MAX_ACTIVE_LOANS
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, member_id, loan_date, due_date, status, fine_amount)
            VALUES ($1, $2, $3, $4, 'ACTIVE', 0)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(loan_date)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET available_copies = available_copies - 1 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Return a loan and put the copy back on the shelf, atomically.
    ///
    /// The fine is computed from the due date and frozen on the loan row.
    pub async fn return_loan(&self, loan_id: i32, today: NaiveDate) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.status != LoanStatus::Active {
            return Err(AppError::Conflict(
                "The loan has already been returned".to_string(),
            ));
        }

        let fine = fine_for(loan.due_date, today);

        let returned = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET return_date = $1, status = 'RETURNED', fine_amount = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(today)
        .bind(fine)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET available_copies = available_copies + 1 WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(returned)
    }
}
