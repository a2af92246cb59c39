use sqlx::PgPool;
use storage::{
    dto::member::{CreateMemberRequest, UpdateMemberRequest},
    error::Result,
    models::Member,
    repository::member::MemberRepository,
};
use uuid::Uuid;

pub async fn list_members(pool: &PgPool) -> Result<Vec<Member>> {
    let repo = MemberRepository::new(pool);
    repo.list().await
}

pub async fn get_member(pool: &PgPool, id: Uuid) -> Result<Member> {
    let repo = MemberRepository::new(pool);
    repo.find_by_id(id).await
}

/// Register a member; the email must not belong to anyone else
pub async fn register_member(pool: &PgPool, request: &CreateMemberRequest) -> Result<Member> {
    let repo = MemberRepository::new(pool);
    let member = repo.create(request).await?;
    tracing::info!(member_id = %member.member_id, "Member registered");
    Ok(member)
}

pub async fn update_member(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateMemberRequest,
) -> Result<Member> {
    let repo = MemberRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a member together with their appointments
pub async fn delete_member(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = MemberRepository::new(pool);
    repo.delete(id).await
}
