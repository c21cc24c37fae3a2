use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::conflict_or_database;
use crate::domain::league::{League, LeagueChanges, NewLeague};
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::repositories::{LeagueRepository, RepositoryError, RepositoryResult};

#[derive(Debug, FromRow)]
struct LeagueRow {
    id: i64,
    name: String,
    owner_id: Uuid,
}

impl From<LeagueRow> for League {
    fn from(row: LeagueRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
        }
    }
}

/// PostgreSQL implementation of LeagueRepository
///
/// Teams and matches are removed with their league by `ON DELETE CASCADE`.
#[derive(Clone)]
pub struct PostgresLeagueRepository {
    pool: PgPool,
}

impl PostgresLeagueRepository {
    /// Creates a new PostgresLeagueRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeagueRepository for PostgresLeagueRepository {
    async fn create(&self, league: &NewLeague) -> RepositoryResult<League> {
        let row = sqlx::query_as::<_, LeagueRow>(
            r#"
            INSERT INTO leagues (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id
            "#,
        )
        .bind(league.name())
        .bind(league.owner_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_database(e, || {
                format!("league with name {} already exists", league.name())
            })
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<League>> {
        let row = sqlx::query_as::<_, LeagueRow>(
            r#"
            SELECT id, name, owner_id
            FROM leagues
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(League::from))
    }

    async fn list(&self, window: LimitOffset) -> RepositoryResult<Paginated<League>> {
        let rows = sqlx::query_as::<_, LeagueRow>(
            r#"
            SELECT id, name, owner_id
            FROM leagues
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leagues")
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated {
            items: rows.into_iter().map(League::from).collect(),
            total,
        })
    }

    async fn update(&self, id: i64, changes: &LeagueChanges) -> RepositoryResult<League> {
        let row = sqlx::query_as::<_, LeagueRow>(
            r#"
            UPDATE leagues
            SET name = COALESCE($2, name)
            WHERE id = $1
            RETURNING id, name, owner_id
            "#,
        )
        .bind(id)
        .bind(changes.name())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_database(e, || {
                format!(
                    "league with name {} already exists",
                    changes.name().unwrap_or_default()
                )
            })
        })?;

        row.map(League::from)
            .ok_or_else(|| RepositoryError::not_found("league", id))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM leagues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("league", id));
        }

        Ok(())
    }
}
