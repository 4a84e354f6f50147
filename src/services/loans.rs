//! Loan lifecycle service

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LOAN_PERIOD_DAYS},
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Due date for a loan issued on `loan_date`
    pub fn due_date_for(loan_date: NaiveDate) -> NaiveDate {
        loan_date + Duration::days(LOAN_PERIOD_DAYS)
    }

    /// Issue a loan: the book must be available, the member active and under
    /// the active-loan cap. Loan insert and stock decrement are atomic.
    pub async fn create_loan(&self, request: CreateLoan) -> AppResult<Loan> {
        let loan_date = self.clock.today();
        let due_date = Self::due_date_for(loan_date);

        let loan = self
            .repository
            .loans
            .create(request.book_id, request.member_id, loan_date, due_date)
            .await?;

        tracing::info!(
            "Loan created: id={} book_id={} member_id={} due={}",
            loan.id,
            loan.book_id,
            loan.member_id,
            loan.due_date
        );
        Ok(loan)
    }

    /// Process a return: freezes the fine and puts the copy back in stock.
    /// Not idempotent; a second return of the same loan is a conflict.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self
            .repository
            .loans
            .return_loan(loan_id, self.clock.today())
            .await?;

        tracing::info!(
            "Return processed: loan_id={} fine={}",
            loan.id,
            loan.fine_amount
        );
        Ok(loan)
    }

    /// Get loan by ID
    pub async fn get_loan(&self, id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await
    }

    /// Get all loans
    pub async fn get_all_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.find_all().await
    }

    /// Get loans that have not been returned yet
    pub async fn get_active_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.find_active().await
    }

    /// Get active loans past their due date
    pub async fn get_overdue_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.find_overdue(self.clock.today()).await
    }

    /// Get loans for a member
    pub async fn get_loans_by_member(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        // Verify member exists
        self.repository.members.get_by_id(member_id).await?;
        self.repository.loans.find_by_member(member_id).await
    }

    /// Count a member's active loans
    pub async fn count_active_loans(&self, member_id: i32) -> AppResult<i64> {
        self.repository.loans.count_active_by_member(member_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::{Clock, FixedClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn due_date_is_loan_date_plus_loan_period() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let due = LoansService::due_date_for(clock.today());
        assert_eq!(due, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn due_date_rolls_over_month_end() {
        let loan_date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(
            LoansService::due_date_for(loan_date),
            NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
        );
    }
}
