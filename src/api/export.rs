//! CSV export endpoints

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::AppResult, services::export::CsvExport};

fn csv_response(export: CsvExport) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.body,
    )
        .into_response()
}

/// Export the book catalog as CSV
#[utoipa::path(
    get,
    path = "/export/books.csv",
    tag = "export",
    responses(
        (status = 200, description = "CSV file with all books", body = String, content_type = "text/csv")
    )
)]
pub async fn export_books(State(state): State<crate::AppState>) -> AppResult<Response> {
    let export = state.services.export.export_books().await?;
    Ok(csv_response(export))
}

/// Export all members as CSV
#[utoipa::path(
    get,
    path = "/export/members.csv",
    tag = "export",
    responses(
        (status = 200, description = "CSV file with all members", body = String, content_type = "text/csv")
    )
)]
pub async fn export_members(State(state): State<crate::AppState>) -> AppResult<Response> {
    let export = state.services.export.export_members().await?;
    Ok(csv_response(export))
}

/// Export currently overdue loans as CSV
#[utoipa::path(
    get,
    path = "/export/overdue-loans.csv",
    tag = "export",
    responses(
        (status = 200, description = "CSV file with overdue loans", body = String, content_type = "text/csv")
    )
)]
pub async fn export_overdue_loans(State(state): State<crate::AppState>) -> AppResult<Response> {
    let export = state.services.export.export_overdue_loans().await?;
    Ok(csv_response(export))
}
