use buildcheck_models::{issue_codes, ComponentCategory, ComponentsMap, ValidationIssue};

use crate::compatibility::rule::{spec_text, ValidationRule};
use crate::error::BuildCheckResult;

const RAM_TYPE_KEYS: [&str; 2] = ["memory_type", "type"];
const BOARD_SUPPORT_KEYS: [&str; 2] = ["memory_type", "memory_support"];

/// The motherboard's supported memory must include the RAM's generation.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryTypeRule;

impl MemoryTypeRule {
    pub const NAME: &'static str = "MemoryType";
}

/// Uppercase with spaces and hyphens removed: "ddr-5" -> "DDR5".
pub fn normalize_memory_type(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

impl ValidationRule for MemoryTypeRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>> {
        let Some((ram, motherboard)) =
            components.pair(ComponentCategory::Ram, ComponentCategory::Motherboard)
        else {
            return Ok(Vec::new());
        };

        let ram_type = spec_text(ram, &RAM_TYPE_KEYS).map(|t| (normalize_memory_type(&t), t));
        let supported =
            spec_text(motherboard, &BOARD_SUPPORT_KEYS).map(|t| (normalize_memory_type(&t), t));

        let ((ram_norm, ram_raw), (board_norm, board_raw)) = match (ram_type, supported) {
            (Some(r), Some(b)) if !r.0.is_empty() && !b.0.is_empty() => (r, b),
            _ => {
                return Ok(vec![ValidationIssue::warning(
                    issue_codes::UNKNOWN_MEMORY_TYPE,
                    "Could not determine memory compatibility",
                )
                .with_details(format!(
                    "Memory type is missing for '{}' or '{}'. \
                     Verify manually that the motherboard supports this RAM.",
                    ram.name, motherboard.name
                ))
                .between(&ram.name, &motherboard.name)]);
            }
        };

        if board_norm.contains(&ram_norm) {
            return Ok(Vec::new());
        }

        Ok(vec![ValidationIssue::error(
            issue_codes::MEMORY_TYPE_MISMATCH,
            format!(
                "RAM type {} is not supported by the motherboard ({})",
                ram_raw, board_raw
            ),
        )
        .with_details(format!(
            "'{}' only supports {}. Choose {} memory or a motherboard that supports {}.",
            motherboard.name, board_raw, board_raw, ram_raw
        ))
        .between(&ram.name, &motherboard.name)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::rules::test_fixtures::product;
    use buildcheck_models::Severity;

    fn build(ram_type: Option<&str>, board_type: Option<&str>) -> ComponentsMap {
        ComponentsMap::new()
            .with(ComponentCategory::Ram, product("Fury Beast 32GB", &[("memory_type", ram_type)]))
            .with(ComponentCategory::Motherboard, product("B760M", &[("memory_type", board_type)]))
    }

    #[test]
    fn test_supported_memory() {
        assert!(MemoryTypeRule.validate(&build(Some("DDR5"), Some("DDR5"))).unwrap().is_empty());
        assert!(MemoryTypeRule.validate(&build(Some("ddr-5"), Some("DDR 5"))).unwrap().is_empty());
    }

    #[test]
    fn test_support_string_containment() {
        // boards listing several generations accept any of them
        for (ram, board) in [("DDR4", "DDR4 / DDR5"), ("DDR5", "DDR4, DDR5")] {
            let issues = MemoryTypeRule.validate(&build(Some(ram), Some(board))).unwrap();
            assert!(issues.is_empty(), "{} on {}", ram, board);
        }
    }

    #[test]
    fn test_containment_is_one_directional() {
        // "DDR5" does not contain "DDR5-6000"
        let issues = MemoryTypeRule.validate(&build(Some("DDR5-6000"), Some("DDR5"))).unwrap();
        assert_eq!(issues[0].code, issue_codes::MEMORY_TYPE_MISMATCH);
    }

    #[test]
    fn test_mismatch_is_error() {
        let issues = MemoryTypeRule.validate(&build(Some("DDR4"), Some("DDR5"))).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, issue_codes::MEMORY_TYPE_MISMATCH);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].component_a.as_deref(), Some("Fury Beast 32GB"));
    }

    #[test]
    fn test_support_field_fallback() {
        let components = ComponentsMap::new()
            .with(ComponentCategory::Ram, product("Vengeance", &[("type", Some("DDR5"))]))
            .with(
                ComponentCategory::Motherboard,
                product("X670E", &[("memory_support", Some("DDR5"))]),
            );
        assert!(MemoryTypeRule.validate(&components).unwrap().is_empty());
    }

    #[test]
    fn test_missing_type_is_warning() {
        for (ram, board) in [(None, Some("DDR5")), (Some("DDR5"), None), (Some(""), Some("DDR5"))] {
            let issues = MemoryTypeRule.validate(&build(ram, board)).unwrap();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, issue_codes::UNKNOWN_MEMORY_TYPE);
            assert_eq!(issues[0].severity, Severity::Warning);
        }
    }

    #[test]
    fn test_skips_partial_build() {
        let ram_only = ComponentsMap::new()
            .with(ComponentCategory::Ram, product("Fury Beast", &[("memory_type", Some("DDR5"))]));
        assert!(MemoryTypeRule.validate(&ram_only).unwrap().is_empty());
    }
}
