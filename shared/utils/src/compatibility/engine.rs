//! Compatibility Engine
//!
//! Runs every registered rule over a components map, collects their issues in
//! registration order, estimates power draw and derives the build status.
//!
//! `run` borrows the engine immutably and `add_rule`/`remove_rule` need a
//! mutable borrow, so rules cannot change under an in-flight analysis. To
//! share one engine between threads, register rules up front and freeze it
//! behind an `Arc`; callers that really need to change rules on a shared
//! instance must wrap it in their own lock.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use buildcheck_models::{issue_codes, BuildAnalysis, ComponentsMap, ValidationIssue};
use tracing::{debug, info, warn};

use super::power::estimate_wattage;
use super::rule::ValidationRule;
use super::rules::default_rules;
use crate::config::EngineConfig;

pub struct CompatibilityEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompatibilityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompatibilityEngine")
            .field("rules", &self.active_rules())
            .finish()
    }
}

impl CompatibilityEngine {
    /// Engine with the five built-in rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Engine with no rules; analyses only estimate wattage.
    pub fn empty() -> Self {
        Self::with_rules(Vec::new())
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    /// Built-in rules minus the ones disabled in configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new();
        for name in &config.disabled_rules {
            if engine.remove_rule(name) == 0 {
                warn!(rule = %name, "Disabled rule is not registered");
            }
        }
        engine
    }

    /// Analyzes a build. Never fails: a rule that errors or panics is
    /// reported as an `INTERNAL_VALIDATION_ERROR` warning and the remaining
    /// rules still run.
    pub fn run(&self, components: &ComponentsMap) -> BuildAnalysis {
        let mut issues = Vec::new();

        for rule in &self.rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.validate(components)));

            match outcome {
                Ok(Ok(found)) => {
                    debug!(rule = rule.name(), issues = found.len(), "Rule executed");
                    issues.extend(found);
                }
                Ok(Err(error)) => {
                    warn!(rule = rule.name(), error = %error, "Rule failed");
                    issues.push(rule_failure(rule.name(), error.to_string()));
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(rule = rule.name(), error = %message, "Rule panicked");
                    issues.push(rule_failure(rule.name(), message));
                }
            }
        }

        let analysis = BuildAnalysis::new(estimate_wattage(components), issues);

        info!(
            status = %analysis.status,
            estimated_wattage = analysis.estimated_wattage,
            issues = analysis.issues.len(),
            components = components.len(),
            "Build analyzed"
        );

        analysis
    }

    /// Appends a rule; it runs after every rule already registered.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        debug!(rule = rule.name(), "Registering rule");
        self.rules.push(rule);
    }

    /// Removes every rule called `name`, returning how many were removed.
    pub fn remove_rule(&mut self, name: &str) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.name() != name);
        let removed = before - self.rules.len();
        if removed > 0 {
            debug!(rule = name, removed, "Removed rule");
        }
        removed
    }

    /// Names of the registered rules in execution order.
    pub fn active_rules(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

fn rule_failure(rule: &str, details: String) -> ValidationIssue {
    ValidationIssue::warning(
        issue_codes::INTERNAL_VALIDATION_ERROR,
        format!("Validation rule '{}' failed to run", rule),
    )
    .with_details(details)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}
