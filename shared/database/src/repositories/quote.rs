//! Quote Repository
//!
//! Loads saved builds and stores the latest compatibility analysis on them.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use buildcheck_models::{BuildAnalysis, BuildStatus, Quote, QuoteAnalysis};

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find quote by ID, including its product ids and last analysis
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, name, status, estimated_wattage, issues, analyzed_at,
                   created_at, updated_at
            FROM quotes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch quote by ID")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let product_ids = self.product_ids(id).await?;
        Ok(Some(row.into_quote(product_ids)))
    }

    /// Product ids in a quote, in the order they were added
    pub async fn product_ids(&self, quote_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT product_id
            FROM quote_items
            WHERE quote_id = $1
            ORDER BY added_at, product_id
            "#,
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch quote items")?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Overwrite the stored analysis of a quote.
    ///
    /// Returns `false` when no quote has the given id.
    pub async fn save_analysis(&self, quote_id: Uuid, analysis: &BuildAnalysis) -> Result<bool> {
        let issues = serde_json::to_value(&analysis.issues)?;

        let result = sqlx::query(
            r#"
            UPDATE quotes SET
                status = $2,
                estimated_wattage = $3,
                issues = $4,
                analyzed_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(quote_id)
        .bind(analysis.status.as_str())
        .bind(analysis.estimated_wattage as i32)
        .bind(&issues)
        .bind(analysis.analyzed_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to save quote analysis")?;

        let saved = result.rows_affected() > 0;
        if saved {
            tracing::info!(quote_id = %quote_id, status = %analysis.status, "Saved quote analysis");
        }
        Ok(saved)
    }
}

#[derive(Debug, FromRow)]
struct QuoteRow {
    id: Uuid,
    name: String,
    status: Option<String>,
    estimated_wattage: Option<i32>,
    issues: Option<serde_json::Value>,
    analyzed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuoteRow {
    fn into_quote(self, product_ids: Vec<Uuid>) -> Quote {
        let status = self.status.as_deref().map(str::parse::<BuildStatus>);
        let analysis = match (status, self.analyzed_at) {
            (Some(Ok(status)), Some(analyzed_at)) => Some(QuoteAnalysis {
                status,
                estimated_wattage: self.estimated_wattage.unwrap_or(0).max(0) as u32,
                issues: self
                    .issues
                    .and_then(|issues| serde_json::from_value(issues).ok())
                    .unwrap_or_default(),
                analyzed_at,
            }),
            _ => None,
        };

        Quote {
            id: self.id,
            name: self.name,
            product_ids,
            analysis,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
