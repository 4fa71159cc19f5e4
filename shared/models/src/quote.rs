//! Saved quote models.
//!
//! A quote is a user's saved build. The latest compatibility analysis is
//! stored on the quote itself and replaced every time the build is re-analyzed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{BuildAnalysis, BuildStatus, ValidationIssue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Quote {
    pub id: Uuid,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Quote name must be between 1 and 200 characters"
    ))]
    pub name: String,
    pub product_ids: Vec<Uuid>,
    pub analysis: Option<QuoteAnalysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The persisted subset of a [`BuildAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    pub status: BuildStatus,
    pub estimated_wattage: u32,
    pub issues: Vec<ValidationIssue>,
    pub analyzed_at: DateTime<Utc>,
}

impl From<&BuildAnalysis> for QuoteAnalysis {
    fn from(analysis: &BuildAnalysis) -> Self {
        Self {
            status: analysis.status,
            estimated_wattage: analysis.estimated_wattage,
            issues: analysis.issues.clone(),
            analyzed_at: analysis.analyzed_at,
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            product_ids: Vec::new(),
            analysis: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl Quote {
    pub fn new(name: String, product_ids: Vec<Uuid>) -> Self {
        let mut quote = Self::default();
        quote.name = name;
        quote.product_ids = product_ids;
        quote
    }

    /// Replaces any previous analysis with `analysis`.
    pub fn record_analysis(&mut self, analysis: &BuildAnalysis) {
        self.analysis = Some(QuoteAnalysis::from(analysis));
        self.updated_at = Utc::now();
    }

    pub fn status(&self) -> Option<BuildStatus> {
        self.analysis.as_ref().map(|a| a.status)
    }

    /// Adds a product to the quote if it isn't already there.
    pub fn add_product(&mut self, product_id: Uuid) {
        if !self.product_ids.contains(&product_id) {
            self.product_ids.push(product_id);
            self.updated_at = Utc::now();
        }
    }

    pub fn remove_product(&mut self, product_id: Uuid) {
        if let Some(pos) = self.product_ids.iter().position(|id| *id == product_id) {
            self.product_ids.remove(pos);
            self.updated_at = Utc::now();
        }
    }
}
