use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use storage::repository::member::MemberRepository;
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

/// Header a member authenticates with when no admin key is presented.
pub const MEMBER_EMAIL_HEADER: &str = "x-member-email";

/// Guards admin-only routes: the request must carry a known bearer key.
pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    match bearer_token(request.headers()) {
        Some(token) if api_keys.is_valid(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempt");
            Err(WebError::Unauthorized)
        }
        None => Err(WebError::Unauthorized),
    }
}

#[derive(Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Admin,
    Member(Uuid),
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin)
    }

    /// Admins may act on any appointment, members only on their own.
    pub fn may_access(&self, owner_id: Uuid) -> bool {
        match self {
            Caller::Admin => true,
            Caller::Member(member_id) => *member_id == owner_id,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(&parts.headers) {
            if state.api_keys.is_valid(token) {
                return Ok(Caller::Admin);
            }
            tracing::warn!("Invalid API key attempt");
            return Err(WebError::Unauthorized);
        }

        let email = parts
            .headers
            .get(MEMBER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(WebError::Unauthorized)?;

        let member = MemberRepository::new(state.db.pool())
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::debug!("No member registered for the presented email");
                WebError::Unauthorized
            })?;

        Ok(Caller::Member(member.member_id))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_api_keys_ignore_blank_entries() {
        let keys = ApiKeys::from_comma_separated(" alpha, ,beta,,");
        assert!(keys.is_valid("alpha"));
        assert!(keys.is_valid("beta"));
        assert!(!keys.is_valid(""));
        assert!(!keys.is_valid("gamma"));
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn test_members_only_reach_their_own_records() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(Caller::Admin.may_access(other));
        assert!(Caller::Member(own).may_access(own));
        assert!(!Caller::Member(own).may_access(other));
    }
}
