use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::conflict_or_database;
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::repositories::{
    LeagueFilter, RepositoryError, RepositoryResult, TeamRepository,
};
use crate::domain::team::{NewTeam, Team, TeamChanges};

#[derive(Debug, FromRow)]
struct TeamRow {
    id: i64,
    league_id: i64,
    name: String,
    city: String,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            league_id: row.league_id,
            name: row.name,
            city: row.city,
        }
    }
}

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, team: &NewTeam) -> RepositoryResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO teams (league_id, name, city)
            VALUES ($1, $2, $3)
            RETURNING id, league_id, name, city
            "#,
        )
        .bind(team.league_id())
        .bind(team.name())
        .bind(team.city())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_database(e, || format!("team with name {} already exists", team.name()))
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, league_id, name, city
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Team::from))
    }

    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, league_id, name, city
            FROM teams
            WHERE cardinality($1::BIGINT[]) = 0 OR league_id = ANY($1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.ids())
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM teams
            WHERE cardinality($1::BIGINT[]) = 0 OR league_id = ANY($1)
            "#,
        )
        .bind(filter.ids())
        .fetch_one(&self.pool)
        .await?;

        Ok(Paginated {
            items: rows.into_iter().map(Team::from).collect(),
            total,
        })
    }

    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, league_id, name, city
            FROM teams
            WHERE league_id = $1
            ORDER BY id
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn update(&self, id: i64, changes: &TeamChanges) -> RepositoryResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                city = COALESCE($3, city)
            WHERE id = $1
            RETURNING id, league_id, name, city
            "#,
        )
        .bind(id)
        .bind(changes.name())
        .bind(changes.city())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_database(e, || {
                format!(
                    "team with name {} already exists",
                    changes.name().unwrap_or_default()
                )
            })
        })?;

        row.map(Team::from)
            .ok_or_else(|| RepositoryError::not_found("team", id))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        // Matches outlive their teams; only the slot is cleared
        sqlx::query("UPDATE matches SET host_id = NULL WHERE host_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE matches SET visitor_id = NULL WHERE visitor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("team", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
