//! Loan model, lifecycle policy and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};

/// Number of days a loan runs before it is due
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Maximum number of simultaneously active loans per member
pub const MAX_ACTIVE_LOANS: i64 = 3;

/// Fine per overdue calendar day, in cents (5.00 currency units)
pub const FINE_PER_DAY_CENTS: i64 = 500;

/// Fine per overdue calendar day
pub fn fine_per_day() -> Decimal {
    Decimal::new(FINE_PER_DAY_CENTS, 2)
}

/// Fine owed when a loan due on `due_date` is returned on `returned_on`.
///
/// Plain calendar-day difference, not business-day aware. Returning on or
/// before the due date costs nothing.
pub fn fine_for(due_date: NaiveDate, returned_on: NaiveDate) -> Decimal {
    let days_overdue = (returned_on - due_date).num_days();
    if days_overdue > 0 {
        Decimal::from(days_overdue) * fine_per_day()
    } else {
        Decimal::ZERO
    }
}

/// Loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "ACTIVE",
            LoanStatus::Returned => "RETURNED",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(LoanStatus::Active),
            "RETURNED" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

// SQLx conversion for LoanStatus (stored as TEXT)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub fine_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// An active loan becomes overdue strictly after its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == LoanStatus::Active && self.due_date < today
    }
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub book_id: i32,
    pub member_id: i32,
}

/// Loan list status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanFilter {
    Active,
    Overdue,
}

/// Loan list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    /// Restrict to active or overdue loans
    pub status: Option<LoanFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(due: NaiveDate, status: LoanStatus) -> Loan {
        Loan {
            id: 1,
            book_id: 1,
            member_id: 1,
            loan_date: due - Duration::days(LOAN_PERIOD_DAYS),
            due_date: due,
            return_date: None,
            status,
            fine_amount: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fine_is_zero_on_or_before_due_date() {
        let due = date(2024, 3, 15);
        assert_eq!(fine_for(due, due), Decimal::ZERO);
        assert_eq!(fine_for(due, date(2024, 3, 10)), Decimal::ZERO);
    }

    #[test]
    fn fine_accrues_per_overdue_day() {
        let due = date(2024, 3, 15);
        assert_eq!(fine_for(due, date(2024, 3, 16)), Decimal::new(500, 2));
        assert_eq!(fine_for(due, date(2024, 3, 20)), Decimal::new(2500, 2));
    }

    #[test]
    fn fine_crosses_month_boundaries_by_calendar_days() {
        // Feb 27 -> Mar 2 in a leap year: 4 calendar days
        let due = date(2024, 2, 27);
        assert_eq!(fine_for(due, date(2024, 3, 2)), Decimal::new(2000, 2));
    }

    #[test]
    fn overdue_is_strictly_after_due_date() {
        let due = date(2024, 3, 15);
        let l = loan(due, LoanStatus::Active);
        assert!(!l.is_overdue(due));
        assert!(!l.is_overdue(date(2024, 3, 14)));
        assert!(l.is_overdue(date(2024, 3, 16)));
    }

    #[test]
    fn returned_loans_are_never_overdue() {
        let due = date(2024, 3, 15);
        let l = loan(due, LoanStatus::Returned);
        assert!(!l.is_overdue(date(2024, 4, 1)));
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("ACTIVE".parse::<LoanStatus>().unwrap(), LoanStatus::Active);
        assert_eq!("RETURNED".parse::<LoanStatus>().unwrap(), LoanStatus::Returned);
        assert!("OVERDUE".parse::<LoanStatus>().is_err());
        assert_eq!(LoanStatus::Active.to_string(), "ACTIVE");
    }
}
