//! Product Repository
//!
//! Resolves product ids into the components map the compatibility engine
//! consumes. Uses runtime SQL queries (unchecked) to avoid requiring
//! DATABASE_URL at compile time.

use anyhow::{Context, Result};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use buildcheck_models::{ComponentCategory, ComponentsMap, Product, ProductSpecs};
use buildcheck_utils::BuildCheckError;

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find products by ID, skipping rows whose category is not a build slot.
    ///
    /// Every id must exist in the products table.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(ComponentCategory, Product)>> {
        let rows = self.fetch_rows(ids).await?;

        if let Some(missing) = unresolved_id(ids, &rows) {
            return Err(BuildCheckError::not_found(format!("product {}", missing)).into());
        }

        Ok(rows.into_iter().filter_map(ProductRow::into_entry).collect())
    }

    /// Build a components map from product ids.
    ///
    /// No two products may share a category.
    pub async fn components_map(&self, ids: &[Uuid]) -> Result<ComponentsMap> {
        let mut components = ComponentsMap::new();
        for (category, product) in self.find_by_ids(ids).await? {
            components
                .try_insert(category, product)
                .map_err(|message| BuildCheckError::validation("product_ids", message))?;
        }

        tracing::debug!(
            requested = ids.len(),
            categories = components.len(),
            "Resolved components map"
        );
        Ok(components)
    }

    async fn fetch_rows(&self, ids: &[Uuid]) -> Result<Vec<ProductRow>> {
        sqlx::query_as(
            r#"
            SELECT id, name, category, specs
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch products by IDs")
    }
}

/// First requested id with no matching row.
fn unresolved_id(ids: &[Uuid], rows: &[ProductRow]) -> Option<Uuid> {
    ids.iter().copied().find(|id| !rows.iter().any(|row| row.id == *id))
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    specs: serde_json::Value,
}

impl ProductRow {
    fn into_entry(self) -> Option<(ComponentCategory, Product)> {
        let category = match self.category.parse::<ComponentCategory>() {
            Ok(category) => category,
            Err(error) => {
                tracing::warn!(
                    product_id = %self.id,
                    error = %error,
                    "Skipping product with unknown category"
                );
                return None;
            }
        };

        let specs: ProductSpecs = serde_json::from_value(self.specs).unwrap_or_else(|error| {
            tracing::warn!(
                product_id = %self.id,
                error = %error,
                "Product specs are not an object"
            );
            ProductSpecs::default()
        });

        Some((category, Product::new(self.name, specs).with_id(self.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(category: &str, specs: serde_json::Value) -> ProductRow {
        ProductRow {
            id: Uuid::new_v4(),
            name: "RM750e".to_string(),
            category: category.to_string(),
            specs,
        }
    }

    #[test]
    fn test_row_into_entry() {
        let row = row("psu", json!({"power_output": "750W"}));
        let id = row.id;

        let (category, product) = row.into_entry().unwrap();
        assert_eq!(category, ComponentCategory::Psu);
        assert_eq!(product.id, Some(id));
        assert_eq!(product.specs.text("power_output").as_deref(), Some("750W"));
    }

    #[test]
    fn test_row_with_unknown_category_is_skipped() {
        assert!(row("keyboard", json!({})).into_entry().is_none());
    }

    #[test]
    fn test_row_with_malformed_specs_keeps_product() {
        let (_, product) = row("cpu", json!(["not", "an", "object"])).into_entry().unwrap();
        assert!(product.specs.is_empty());
    }

    #[test]
    fn test_unresolved_id() {
        let known = row("keyboard", json!({}));
        let missing = Uuid::new_v4();

        // a row in an unknown category still counts as found
        assert_eq!(unresolved_id(&[known.id], std::slice::from_ref(&known)), None);
        assert_eq!(unresolved_id(&[known.id, missing], &[known]), Some(missing));
    }
}
