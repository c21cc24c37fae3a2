use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::matches::{Match, MatchChanges, NewMatch};
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::repositories::{
    LeagueFilter, MatchRepository, RepositoryError, RepositoryResult,
};
use crate::infrastructure::repositories::conflict_or_database;

const DISTINCT_TEAMS_CHECK: &str = "matches_distinct_teams_check";

const MATCH_COLUMNS: &str =
    "id, league_id, host_id, visitor_id, host_score, visitor_score, address, datetime";

#[derive(Debug, FromRow)]
struct MatchRow {
    id: i64,
    league_id: i64,
    host_id: Option<i64>,
    visitor_id: Option<i64>,
    host_score: Option<i32>,
    visitor_score: Option<i32>,
    address: Option<String>,
    datetime: Option<DateTime<Utc>>,
}

impl From<MatchRow> for Match {
    fn from(row: MatchRow) -> Self {
        Self {
            id: row.id,
            league_id: row.league_id,
            host_id: row.host_id,
            visitor_id: row.visitor_id,
            host_score: row.host_score,
            visitor_score: row.visitor_score,
            address: row.address,
            datetime: row.datetime,
        }
    }
}

/// PostgreSQL implementation of MatchRepository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Check violations become `Conflict` with a message naming the broken rule
fn constraint_error(err: sqlx::Error) -> RepositoryError {
    let message = match &err {
        sqlx::Error::Database(db) if db.constraint() == Some(DISTINCT_TEAMS_CHECK) => {
            "host and visitor must be different teams"
        }
        _ => "scores cannot be negative",
    };
    conflict_or_database(err, || message.to_string())
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn create(&self, fixture: &NewMatch) -> RepositoryResult<Match> {
        let sql = format!(
            r#"
            INSERT INTO matches (league_id, host_id, visitor_id, host_score, visitor_score, address, datetime)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MATCH_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(fixture.league_id)
            .bind(fixture.host_id)
            .bind(fixture.visitor_id)
            .bind(fixture.host_score)
            .bind(fixture.visitor_score)
            .bind(fixture.address.as_deref())
            .bind(fixture.datetime)
            .fetch_one(&self.pool)
            .await
            .map_err(constraint_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Match>> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1");
        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Match::from))
    }

    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Match>> {
        let sql = format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE cardinality($1::BIGINT[]) = 0 OR league_id = ANY($1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(filter.ids())
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM matches
            WHERE cardinality($1::BIGINT[]) = 0 OR league_id = ANY($1)
            "#,
        )
        .bind(filter.ids())
        .fetch_one(&self.pool)
        .await?;

        Ok(Paginated {
            items: rows.into_iter().map(Match::from).collect(),
            total,
        })
    }

    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Match>> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE league_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(league_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn update(&self, id: i64, changes: &MatchChanges) -> RepositoryResult<Match> {
        // Each nullable column takes a "was sent" flag plus the value, so an
        // explicit null clears the column while an absent field keeps it
        let sql = format!(
            r#"
            UPDATE matches
            SET host_id = CASE WHEN $2 THEN $3 ELSE host_id END,
                visitor_id = CASE WHEN $4 THEN $5 ELSE visitor_id END,
                host_score = CASE WHEN $6 THEN $7 ELSE host_score END,
                visitor_score = CASE WHEN $8 THEN $9 ELSE visitor_score END,
                address = CASE WHEN $10 THEN $11 ELSE address END,
                datetime = CASE WHEN $12 THEN $13 ELSE datetime END
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .bind(changes.host_id.is_some())
            .bind(changes.host_id.flatten())
            .bind(changes.visitor_id.is_some())
            .bind(changes.visitor_id.flatten())
            .bind(changes.host_score.is_some())
            .bind(changes.host_score.flatten())
            .bind(changes.visitor_score.is_some())
            .bind(changes.visitor_score.flatten())
            .bind(changes.address.is_some())
            .bind(changes.address.clone().flatten())
            .bind(changes.datetime.is_some())
            .bind(changes.datetime.flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(constraint_error)?;

        row.map(Match::from)
            .ok_or_else(|| RepositoryError::not_found("match", id))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("match", id));
        }

        Ok(())
    }
}
