//! PostgreSQL implementation of RefreshTokenRepository

use async_trait::async_trait;
use tracing::instrument;

use roster_core::entities::{NewRefreshToken, RefreshToken};
use roster_core::traits::{RefreshTokenRepository, RepoResult};
use roster_core::value_objects::MemberId;

use crate::models::RefreshTokenModel;
use crate::pool::Database;

use super::error::map_db_error;

/// PostgreSQL implementation of RefreshTokenRepository
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    db: Database,
}

impl PgRefreshTokenRepository {
    /// Create a new PgRefreshTokenRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(skip(self, token), fields(member_id = %token.member_id))]
    async fn create(&self, token: &NewRefreshToken) -> RepoResult<RefreshToken> {
        let mut conn = self.db.acquire("refresh_token.create").await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            INSERT INTO refresh_tokens (token, member_id, member_email, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, member_id, member_email, expires_at, created_at
            ",
        )
        .bind(&token.token)
        .bind(token.member_id.into_inner())
        .bind(&token.member_email)
        .bind(token.expires_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(RefreshToken::from(model))
    }

    // Single statement, so two concurrent refreshes with the same token
    // cannot both get the row back.
    #[instrument(skip(self, token))]
    async fn consume(&self, token: &str, member_email: &str) -> RepoResult<Option<RefreshToken>> {
        let mut conn = self.db.acquire("refresh_token.consume").await.map_err(map_db_error)?;

        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            DELETE FROM refresh_tokens
            WHERE token = $1 AND member_email = $2
            RETURNING token, member_id, member_email, expires_at, created_at
            ",
        )
        .bind(token)
        .bind(member_email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }

    #[instrument(skip(self))]
    async fn revoke_for_member(&self, member_id: MemberId) -> RepoResult<u64> {
        let mut conn = self
            .db
            .acquire("refresh_token.revoke_for_member")
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM refresh_tokens WHERE member_id = $1")
            .bind(member_id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
