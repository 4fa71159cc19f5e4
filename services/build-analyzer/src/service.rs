//! Analysis service
//!
//! Glue between the compatibility engine and its inputs: JSON files, product
//! ids and saved quotes.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use buildcheck_database::{ProductRepository, QuoteRepository};
use buildcheck_models::{BuildAnalysis, ComponentsMap};
use buildcheck_utils::{
    validate_components_map, BuildCheckError, BuildCheckResult, CompatibilityEngine,
};

#[derive(Clone)]
pub struct AnalyzerService {
    engine: Arc<CompatibilityEngine>,
}

impl AnalyzerService {
    /// Freezes the engine; its rule set can no longer change.
    pub fn new(engine: CompatibilityEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn active_rules(&self) -> Vec<&str> {
        self.engine.active_rules()
    }

    /// Validates the products and runs every active rule.
    pub fn analyze(&self, components: &ComponentsMap) -> BuildCheckResult<BuildAnalysis> {
        validate_components_map(components)?;
        Ok(self.engine.run(components))
    }

    pub fn analyze_json(&self, json: &str) -> BuildCheckResult<BuildAnalysis> {
        let components = parse_components(json)?;
        self.analyze(&components)
    }

    pub fn analyze_file(&self, path: &Path) -> Result<BuildAnalysis> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read components file {}", path.display()))?;
        Ok(self.analyze_json(&json)?)
    }

    /// Ad-hoc analysis of stored products; nothing is persisted.
    pub async fn analyze_products(
        &self,
        products: &ProductRepository,
        ids: &[Uuid],
    ) -> Result<BuildAnalysis> {
        let components = products.components_map(ids).await?;
        Ok(self.analyze(&components)?)
    }

    /// Re-analyzes a saved quote, overwriting its stored analysis unless
    /// `dry_run` is set.
    pub async fn analyze_quote(
        &self,
        products: &ProductRepository,
        quotes: &QuoteRepository,
        quote_id: Uuid,
        dry_run: bool,
    ) -> Result<BuildAnalysis> {
        let quote = quotes
            .find_by_id(quote_id)
            .await?
            .ok_or_else(|| BuildCheckError::not_found(format!("quote {}", quote_id)))?;

        let components = if quote.product_ids.is_empty() {
            ComponentsMap::new()
        } else {
            products.components_map(&quote.product_ids).await?
        };
        let analysis = self.analyze(&components)?;

        if dry_run {
            info!(quote_id = %quote_id, "Dry run, analysis not saved");
        } else if !quotes.save_analysis(quote_id, &analysis).await? {
            return Err(BuildCheckError::not_found(format!("quote {}", quote_id)).into());
        }

        Ok(analysis)
    }
}

/// Parses a components map from JSON, e.g.
/// `{"cpu": {"name": "Ryzen 5 7600", "specs": {"socket": "AM5"}}}`.
pub fn parse_components(json: &str) -> BuildCheckResult<ComponentsMap> {
    serde_json::from_str(json).map_err(|error| {
        BuildCheckError::validation("components", format!("Invalid components map: {}", error))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcheck_models::{issue_codes, BuildStatus};
    use buildcheck_utils::EngineConfig;

    const MISMATCHED: &str = r#"{
        "cpu": {"name": "Ryzen 7 7700X", "specs": {"socket": "AM5", "tdp": "105W"}},
        "motherboard": {"name": "B760M DS3H", "specs": {"socket": "LGA1700", "memory_type": "DDR5"}},
        "ram": {"name": "Fury Beast 32GB", "specs": {"memory_type": "DDR5"}}
    }"#;

    #[test]
    fn test_analyze_json() {
        let service = AnalyzerService::new(CompatibilityEngine::new());
        let analysis = service.analyze_json(MISMATCHED).unwrap();

        assert_eq!(analysis.status, BuildStatus::Incompatible);
        assert!(analysis.has_code(issue_codes::SOCKET_MISMATCH));
        assert_eq!(analysis.estimated_wattage, 160);
    }

    #[test]
    fn test_config_driven_rules() {
        let config = EngineConfig {
            disabled_rules: vec!["SocketCompatibility".to_string()],
        };
        let service = AnalyzerService::new(CompatibilityEngine::from_config(&config));

        assert!(!service.active_rules().contains(&"SocketCompatibility"));
        assert_eq!(service.analyze_json(MISMATCHED).unwrap().status, BuildStatus::Valid);
    }

    #[test]
    fn test_rejects_unknown_category() {
        let service = AnalyzerService::new(CompatibilityEngine::new());
        let error = service
            .analyze_json(r#"{"keyboard": {"name": "K70"}}"#)
            .unwrap_err();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rejects_unnamed_product() {
        let service = AnalyzerService::new(CompatibilityEngine::new());
        let error = service
            .analyze_json(r#"{"gpu": {"name": "", "specs": {"tdp": 200}}}"#)
            .unwrap_err();
        assert!(matches!(error, BuildCheckError::Validation { ref field, .. } if field == "gpu"));
    }

    #[test]
    fn test_empty_build() {
        let service = AnalyzerService::new(CompatibilityEngine::new());
        let analysis = service.analyze_json("{}").unwrap();
        assert_eq!(analysis.status, BuildStatus::Valid);
        assert_eq!(analysis.estimated_wattage, 50);
    }
}
