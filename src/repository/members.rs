//! Members repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberQuery, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Find member by identification number
    pub async fn find_by_id_number(&self, id_number: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id_number = $1")
            .bind(id_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    /// Check if an identification number is already taken, optionally excluding one record
    pub async fn id_number_exists(&self, id_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM members WHERE id_number = $1 AND id != $2)",
            )
            .bind(id_number)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id_number = $1)")
                .bind(id_number)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, query: &'a MemberQuery) {
        if let Some(ref name) = query.name {
            let pattern = format!("%{}%", name);
            qb.push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(ref id_number) = query.id_number {
            qb.push(" AND id_number = ").push_bind(id_number.as_str());
        }
        if query.active == Some(true) {
            qb.push(" AND active = TRUE");
        }
    }

    /// Search members with optional filters, paginated. Returns (members, total).
    pub async fn search(&self, query: &MemberQuery) -> AppResult<(Vec<Member>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM members WHERE 1=1");
        Self::push_filters(&mut count_qb, query);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new("SELECT * FROM members WHERE 1=1");
        Self::push_filters(&mut qb, query);
        qb.push(" ORDER BY last_name, first_name, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind((page - 1) * per_page);

        let members = qb.build_query_as::<Member>().fetch_all(&self.pool).await?;

        Ok((members, total))
    }

    /// Create a new member (active, membership starting today)
    pub async fn create(&self, member: &CreateMember, membership_date: NaiveDate) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id_number, first_name, last_name, email, phone, membership_date, active)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING *
            "#,
        )
        .bind(&member.id_number)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(membership_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing member (identity fields only; membership date and
    /// active flag are not writable here)
    pub async fn update(&self, id: i32, member: &UpdateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET id_number = $1, first_name = $2, last_name = $3, email = $4, phone = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&member.id_number)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Deactivate a member (soft delete, irreversible)
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE members SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }
        Ok(())
    }
}
