//! CSV export service
//!
//! Renders query results as CSV for reporting. Fields containing the
//! delimiter, quotes or line breaks are quoted, with inner quotes doubled.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{Book, Loan, Member},
    repository::Repository,
    services::clock::Clock,
};

const BOOKS_HEADER: &str = "id,isbn,title,author,year_published,genre,total_copies,available_copies\n";
const MEMBERS_HEADER: &str = "id,id_number,first_name,last_name,email,phone,membership_date,active\n";
const OVERDUE_LOANS_HEADER: &str = "id,book_id,member_id,loan_date,due_date,days_overdue\n";

/// A generated export: filename plus CSV body
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

#[derive(Clone)]
pub struct ExportService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ExportService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn filename(&self, prefix: &str) -> String {
        format!("{}_{}.csv", prefix, self.clock.now().format("%Y%m%d_%H%M%S"))
    }

    /// Export the whole catalog
    pub async fn export_books(&self) -> AppResult<CsvExport> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title, id")
            .fetch_all(&self.repository.pool)
            .await?;

        let body = render_books(&books);
        tracing::info!("Exported {} books to CSV", books.len());
        Ok(CsvExport {
            filename: self.filename("books_export"),
            body,
        })
    }

    /// Export all members
    pub async fn export_members(&self) -> AppResult<CsvExport> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members ORDER BY last_name, first_name, id",
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let body = render_members(&members);
        tracing::info!("Exported {} members to CSV", members.len());
        Ok(CsvExport {
            filename: self.filename("members_export"),
            body,
        })
    }

    /// Export currently overdue loans
    pub async fn export_overdue_loans(&self) -> AppResult<CsvExport> {
        let today = self.clock.today();
        let loans = self.repository.loans.find_overdue(today).await?;

        let body = render_overdue_loans(&loans, today);
        tracing::info!("Exported {} overdue loans to CSV", loans.len());
        Ok(CsvExport {
            filename: self.filename("overdue_loans_export"),
            body,
        })
    }
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_books(books: &[Book]) -> String {
    let mut out = String::from(BOOKS_HEADER);
    for b in books {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            b.id,
            escape(&b.isbn),
            escape(&b.title),
            escape(&b.author),
            b.year_published.map(|y| y.to_string()).unwrap_or_default(),
            escape(b.genre.as_deref().unwrap_or("")),
            b.total_copies,
            b.available_copies,
        ));
    }
    out
}

fn render_members(members: &[Member]) -> String {
    let mut out = String::from(MEMBERS_HEADER);
    for m in members {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            m.id,
            escape(&m.id_number),
            escape(&m.first_name),
            escape(&m.last_name),
            escape(m.email.as_deref().unwrap_or("")),
            escape(m.phone.as_deref().unwrap_or("")),
            m.membership_date,
            m.active,
        ));
    }
    out
}

fn render_overdue_loans(loans: &[Loan], today: NaiveDate) -> String {
    let mut out = String::from(OVERDUE_LOANS_HEADER);
    for l in loans {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            l.id,
            l.book_id,
            l.member_id,
            l.loan_date,
            l.due_date,
            (today - l.due_date).num_days(),
        ));
    }
    out
}
