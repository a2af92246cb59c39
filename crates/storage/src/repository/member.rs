use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::merge_optional;
use crate::dto::member::{CreateMemberRequest, UpdateMemberRequest};
use crate::error::{Result, StorageError};
use crate::models::Member;

const COLUMNS: &str = "member_id, full_name, email, phone, created_at";

/// Repository for Member database operations
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {COLUMNS} FROM members ORDER BY full_name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Member> {
        sqlx::query_as::<_, Member>(&format!("SELECT {COLUMNS} FROM members WHERE member_id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Case-insensitive lookup by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {COLUMNS} FROM members WHERE LOWER(email) = LOWER($1) ORDER BY created_at LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(member)
    }

    /// Whether another member already uses `email`
    pub async fn email_taken(&self, email: &str, excluding: Option<Uuid>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM members
                WHERE LOWER(email) = LOWER($1)
                  AND ($2::uuid IS NULL OR member_id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(excluding)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    pub async fn create(&self, req: &CreateMemberRequest) -> Result<Member> {
        if self.email_taken(&req.email, None).await? {
            return Err(StorageError::ConstraintViolation(format!(
                "A member with email {} already exists",
                req.email
            )));
        }

        let member = sqlx::query_as::<_, Member>(&format!(
            r#"
            INSERT INTO members (full_name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(self.pool)
        .await?;

        Ok(member)
    }

    pub async fn update(&self, existing: &Member, req: &UpdateMemberRequest) -> Result<Member> {
        if let Some(email) = &req.email {
            if self.email_taken(email, Some(existing.member_id)).await? {
                return Err(StorageError::ConstraintViolation(format!(
                    "A member with email {} already exists",
                    email
                )));
            }
        }

        let full_name = req.full_name.as_ref().unwrap_or(&existing.full_name);
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let phone = merge_optional(
            req.phone.as_deref(),
            req.clear_phone,
            existing.phone.as_deref(),
        );

        sqlx::query_as::<_, Member>(&format!(
            r#"
            UPDATE members
            SET full_name = $2, email = $3, phone = $4
            WHERE member_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(existing.member_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a member together with their appointments
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM appointments WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
