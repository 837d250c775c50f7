//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::instrument;

use roster_core::entities::{Member, NewMember};
use roster_core::traits::{MemberQuery, MemberRepository, RepoResult};
use roster_core::value_objects::MemberId;

use crate::models::{MemberModel, MEMBER_COLUMNS};
use crate::pool::Database;

use super::error::{map_db_error, map_unique_violation, member_conflict, member_not_found};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    db: Database,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards in user input and wrap it for a substring match
fn contains_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escaped.push('%');
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Build the filtered, paged listing query
fn list_query(query: &MemberQuery) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {MEMBER_COLUMNS} FROM members WHERE TRUE"));

    if let Some(name) = query.name_filter() {
        let pattern = contains_pattern(name);
        qb.push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR (first_name || ' ' || last_name) ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(email) = query.email_filter() {
        qb.push(" AND email ILIKE ").push_bind(contains_pattern(email));
    }

    if let Some(privilege) = query.privilege {
        qb.push(" AND privilege = ").push_bind(privilege.as_str());
    }

    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(query.per_page)
        .push(" OFFSET ")
        .push_bind(query.offset());

    qb
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let mut conn = self.db.acquire("member.find_by_id").await.map_err(map_db_error)?;

        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let mut conn = self.db.acquire("member.find_by_email").await.map_err(map_db_error)?;

        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &MemberQuery) -> RepoResult<Vec<Member>> {
        let mut conn = self.db.acquire("member.list").await.map_err(map_db_error)?;

        let rows = list_query(query)
            .build_query_as::<MemberModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Member::try_from).collect()
    }

    #[instrument(skip(self, member), fields(email = %member.profile.email))]
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let mut conn = self.db.acquire("member.create").await.map_err(map_db_error)?;

        let p = &member.profile;
        let sql = format!(
            r"
            INSERT INTO members (student_id, first_name, last_name, email, password_hash,
                                 year, github, linkedin, personal_website, stack_overflow,
                                 portfolium, handshake, slack, discord, thumbnail,
                                 active, banned, privilege)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {MEMBER_COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(&p.student_id)
            .bind(&p.first_name)
            .bind(&p.last_name)
            .bind(&p.email)
            .bind(&member.password_hash)
            .bind(&p.year)
            .bind(&p.github)
            .bind(&p.linkedin)
            .bind(&p.personal_website)
            .bind(&p.stack_overflow)
            .bind(&p.portfolium)
            .bind(&p.handshake)
            .bind(&p.slack)
            .bind(&p.discord)
            .bind(&p.thumbnail)
            .bind(member.active)
            .bind(member.banned)
            .bind(member.privilege.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_unique_violation(e, member_conflict))?;

        Member::try_from(model)
    }

    #[instrument(skip(self, member), fields(id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<Member> {
        let mut conn = self.db.acquire("member.update").await.map_err(map_db_error)?;

        let p = &member.profile;
        let sql = format!(
            r"
            UPDATE members
            SET student_id = $2, first_name = $3, last_name = $4, email = $5, password_hash = $6,
                year = $7, github = $8, linkedin = $9, personal_website = $10,
                stack_overflow = $11, portfolium = $12, handshake = $13, slack = $14,
                discord = $15, thumbnail = $16, active = $17, banned = $18, privilege = $19,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MEMBER_COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(member.id.into_inner())
            .bind(&p.student_id)
            .bind(&p.first_name)
            .bind(&p.last_name)
            .bind(&p.email)
            .bind(&member.password_hash)
            .bind(&p.year)
            .bind(&p.github)
            .bind(&p.linkedin)
            .bind(&p.personal_website)
            .bind(&p.stack_overflow)
            .bind(&p.portfolium)
            .bind(&p.handshake)
            .bind(&p.slack)
            .bind(&p.discord)
            .bind(&p.thumbnail)
            .bind(member.active)
            .bind(member.banned)
            .bind(member.privilege.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_unique_violation(e, member_conflict))?
            .ok_or_else(|| member_not_found(member.id))?;

        Member::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MemberId) -> RepoResult<()> {
        let mut conn = self.db.acquire("member.delete").await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Privilege;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMemberRepository>();
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ada"), "%ada%");
        assert_eq!(contains_pattern("100%_x\\"), "%100\\%\\_x\\\\%");
    }

    #[test]
    fn test_list_query_without_filters() {
        let query = MemberQuery::default();
        let sql = list_query(&query).into_sql();

        assert!(sql.contains("WHERE TRUE ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"));
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_list_query_with_all_filters() {
        let mut query = MemberQuery::new(2, 10);
        query.name = Some("ada".to_string());
        query.email = Some("club.edu".to_string());
        query.privilege = Some(Privilege::Admin);
        let sql = list_query(&query).into_sql();

        assert!(sql.contains("first_name ILIKE $1"));
        assert!(sql.contains("(first_name || ' ' || last_name) ILIKE $3"));
        assert!(sql.contains("email ILIKE $4"));
        assert!(sql.contains("privilege = $5"));
        assert!(sql.ends_with("LIMIT $6 OFFSET $7"));
    }

    #[test]
    fn test_list_query_skips_blank_filters() {
        let mut query = MemberQuery::default();
        query.name = Some("  ".to_string());
        let sql = list_query(&query).into_sql();

        assert!(!sql.contains("first_name ILIKE"));
    }
}
