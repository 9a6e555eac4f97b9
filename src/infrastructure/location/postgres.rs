//! PostgreSQL record store
//!
//! Reads from a pre-populated `geo_data` table:
//! `id BIGINT, lat DOUBLE PRECISION, lng DOUBLE PRECISION, city TEXT,
//! county_name TEXT, state_name TEXT, state_id TEXT, zip INTEGER`.
//! Schema creation and data loading happen outside this crate.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use crate::domain::location::{
    KeywordQuery, LocationId, LocationPoint, LocationRecord, LocationRepository, StateSummary,
};
use crate::domain::DomainError;

const FULL_COLUMNS: &str = "id, lat, lng, city, county_name, state_name, state_id, zip";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/geocode".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// Record store over the `geo_data` table
///
/// Each query checks a connection out of the pool for the duration of that
/// call only; dropping the handle returns it to the pool.
#[derive(Debug, Clone)]
pub struct PostgresLocationRepository {
    pool: PgPool,
}

impl PostgresLocationRepository {
    /// Creates a repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and creates the repository
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::new(pool))
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>, DomainError> {
        self.pool.acquire().await.map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire connection: {}", e))
        })
    }

    async fn fetch_records(
        &self,
        query: Query<'_, Postgres, PgArguments>,
        context: &str,
    ) -> Result<Vec<LocationRecord>, DomainError> {
        let mut conn = self.acquire().await?;

        let rows = query
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to {}: {}", context, e)))?;

        rows.iter().map(row_to_record).collect()
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn find_by_keyword(
        &self,
        query: &KeywordQuery,
        limit: usize,
    ) -> Result<Vec<LocationRecord>, DomainError> {
        let sql = format!(
            r#"
            SELECT {FULL_COLUMNS}
            FROM geo_data
            WHERE city ILIKE '%' || $1 || '%' ESCAPE '\'
               OR LOWER(state_name) = $2
               OR LOWER(county_name) = $2
               OR zip = $3
            ORDER BY id
            LIMIT $4
            "#
        );

        let statement = sqlx::query(&sql)
            .bind(escape_like(query.keyword()))
            .bind(query.keyword())
            .bind(query.postal_code())
            .bind(limit as i64);

        self.fetch_records(statement, "search by keyword").await
    }

    async fn find_by_postal_code(&self, zip: i32) -> Result<Vec<LocationRecord>, DomainError> {
        let sql = format!("SELECT {FULL_COLUMNS} FROM geo_data WHERE zip = $1 ORDER BY id");
        let statement = sqlx::query(&sql).bind(zip);

        self.fetch_records(statement, "search by postal code").await
    }

    async fn find_by_state_code(
        &self,
        state_code: &str,
    ) -> Result<Vec<LocationRecord>, DomainError> {
        let sql = format!("SELECT {FULL_COLUMNS} FROM geo_data WHERE state_id = $1 ORDER BY id");
        let statement = sqlx::query(&sql).bind(state_code);

        self.fetch_records(statement, "search by state code").await
    }

    async fn find_by_ids(&self, ids: &[LocationId]) -> Result<Vec<LocationRecord>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(LocationId::value).collect();
        let sql = format!("SELECT {FULL_COLUMNS} FROM geo_data WHERE id = ANY($1) ORDER BY id");
        let statement = sqlx::query(&sql).bind(raw_ids);

        self.fetch_records(statement, "fetch records by id").await
    }

    async fn state_name_by_postal_code(&self, zip: i32) -> Result<Option<String>, DomainError> {
        let mut conn = self.acquire().await?;

        let row = sqlx::query("SELECT state_name FROM geo_data WHERE zip = $1 ORDER BY id LIMIT 1")
            .bind(zip)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to get state by zip: {}", e))
            })?;

        row.map(|row| column(&row, "state_name")).transpose()
    }

    async fn project_points(&self) -> Result<Vec<LocationPoint>, DomainError> {
        let mut conn = self.acquire().await?;

        let rows = sqlx::query("SELECT id, lat, lng FROM geo_data ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to scan coordinates: {}", e))
            })?;

        rows.iter()
            .map(|row| -> Result<LocationPoint, DomainError> {
                Ok(LocationPoint {
                    id: LocationId::new(column(row, "id")?),
                    lat: column(row, "lat")?,
                    lng: column(row, "lng")?,
                })
            })
            .collect()
    }

    async fn distinct_states(&self) -> Result<Vec<StateSummary>, DomainError> {
        let mut conn = self.acquire().await?;

        let rows = sqlx::query(
            "SELECT DISTINCT state_id, state_name FROM geo_data ORDER BY state_id, state_name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| DomainError::store_unavailable(format!("Failed to list states: {}", e)))?;

        rows.iter()
            .map(|row| -> Result<StateSummary, DomainError> {
                Ok(StateSummary::new(
                    column::<String>(row, "state_id")?,
                    column::<String>(row, "state_name")?,
                ))
            })
            .collect()
    }

    async fn project_all(&self) -> Result<Vec<LocationRecord>, DomainError> {
        let statement = sqlx::query(
            "SELECT id, lat, lng, city, NULL::TEXT AS county_name, state_name, state_id, zip \
             FROM geo_data ORDER BY id",
        );

        self.fetch_records(statement, "dump records").await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let mut conn = self.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM geo_data")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to count records: {}", e)))?;

        Ok(count as usize)
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::store_unavailable(format!("Failed to read column '{}': {}", name, e))
    })
}

fn row_to_record(row: &PgRow) -> Result<LocationRecord, DomainError> {
    let record = LocationRecord::new(
        column::<i64>(row, "id")?,
        column(row, "lat")?,
        column(row, "lng")?,
        column::<String>(row, "city")?,
        column::<String>(row, "state_id")?,
        column::<String>(row, "state_name")?,
        column(row, "zip")?,
    );

    Ok(match column::<Option<String>>(row, "county_name")? {
        Some(county) => record.with_county(county),
        None => record,
    })
}

/// Escapes LIKE wildcards so the keyword matches literally
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());

    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("springfield"), "springfield");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_postgres_config_builders() {
        let config = PostgresConfig::new("postgres://db/geo")
            .with_max_connections(4)
            .with_connect_timeout(3);

        assert_eq!(config.url, "postgres://db/geo");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.connect_timeout_secs, 3);
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL instance with a populated geo_data table"]
    async fn test_postgres_count() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let repo = PostgresLocationRepository::connect(&PostgresConfig::new(url))
            .await
            .unwrap();

        assert!(repo.count().await.unwrap() > 0);
    }
}
