//! Member management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberQuery, UpdateMember},
    repository::Repository,
    services::{clock::Clock, require_non_blank},
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl MembersService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Search members with filters
    pub async fn search_members(&self, query: &MemberQuery) -> AppResult<(Vec<Member>, i64)> {
        self.repository.members.search(query).await
    }

    /// Get member by ID
    pub async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// Find member by identification number
    pub async fn find_by_id_number(&self, id_number: &str) -> AppResult<Option<Member>> {
        self.repository.members.find_by_id_number(id_number).await
    }

    /// Register a new member; membership starts today and the member is active
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_non_blank(&member.id_number, "Identification number is required")?;
        require_non_blank(&member.first_name, "First name is required")?;
        require_non_blank(&member.last_name, "Last name is required")?;

        if self
            .repository
            .members
            .id_number_exists(&member.id_number, None)
            .await?
        {
            return Err(AppError::Duplicate(format!(
                "Identification number already exists in the system: {}",
                member.id_number
            )));
        }

        let created = self
            .repository
            .members
            .create(&member, self.clock.today())
            .await?;
        tracing::info!(
            "Member created: id={} id_number={}",
            created.id,
            created.id_number
        );
        Ok(created)
    }

    /// Update an existing member's identity fields
    pub async fn update_member(&self, id: i32, member: UpdateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_non_blank(&member.id_number, "Identification number is required")?;
        require_non_blank(&member.first_name, "First name is required")?;
        require_non_blank(&member.last_name, "Last name is required")?;

        if self
            .repository
            .members
            .id_number_exists(&member.id_number, Some(id))
            .await?
        {
            return Err(AppError::Duplicate(format!(
                "Identification number already exists in the system: {}",
                member.id_number
            )));
        }

        self.repository.members.update(id, &member).await
    }

    /// Deactivate a member. Blocked while they still hold active loans;
    /// there is no reactivation path.
    pub async fn deactivate_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.get_by_id(id).await?;

        let active_loans = self.repository.loans.count_active_by_member(id).await?;
        if active_loans > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot deactivate member because they have {} active loans",
                active_loans
            )));
        }

        self.repository.members.deactivate(id).await?;
        tracing::info!("Member deactivated: id={}", id);
        Ok(())
    }

    /// True iff the member exists and is active
    pub async fn is_active(&self, member_id: i32) -> AppResult<bool> {
        match self.repository.members.get_by_id(member_id).await {
            Ok(member) => Ok(member.active),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
