//! Business logic services

pub mod catalog;
pub mod clock;
pub mod export;
pub mod loans;
pub mod members;
pub mod stats;

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
    pub export: export::ExportService,
}

impl Services {
    /// Create all services with the given repository and time source
    pub fn new(repository: Repository, clock: Arc<dyn clock::Clock>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone(), clock.clone()),
            loans: loans::LoansService::new(repository.clone(), clock.clone()),
            stats: stats::StatsService::new(repository.clone(), clock.clone()),
            export: export::ExportService::new(repository, clock),
        }
    }
}

/// Required text fields must contain something other than whitespace
pub(crate) fn require_non_blank(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_non_blank("", "required").is_err());
        assert!(require_non_blank("   ", "required").is_err());
        assert!(require_non_blank("\t\n", "required").is_err());
        assert!(require_non_blank("x", "required").is_ok());
    }
}
