//! PostgreSQL-backed document store.
//!
//! Every document lives in a single `documents` table as a JSONB body keyed by
//! `(collection, id)`. Filters use JSONB containment, which covers both scalar
//! equality and array membership.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, types::Json, Pool, Postgres, QueryBuilder};

use super::{
    query::{Filter, Query, SortDirection},
    store::DocumentStore,
};
use crate::{config::DatabaseConfig, error::AppResult};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body JSONB NOT NULL,
        PRIMARY KEY (collection, id)
    )
"#;

#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Connect and make sure the documents table exists
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
        for (field, value) in &filter.conditions {
            // A missing key reads as JSON null, as in `Filter::matches`
            builder.push(" AND COALESCE(body -> ");
            builder.push_bind(field.clone());
            builder.push(", 'null'::jsonb) @> ");
            builder.push_bind(Json(value.clone()));
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(body)| body))
    }

    async fn find(&self, collection: &str, query: &Query) -> AppResult<Vec<Value>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        Self::push_filter(&mut builder, &query.filter);

        if let Some(sort) = &query.sort {
            builder.push(" ORDER BY body ->> ");
            builder.push_bind(sort.field.clone());
            builder.push(match sort.direction {
                SortDirection::Ascending => " ASC NULLS FIRST",
                SortDirection::Descending => " DESC NULLS LAST",
            });
        }

        let rows = builder
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(body)| body).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        Self::push_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool> {
        let result = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, collection: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
