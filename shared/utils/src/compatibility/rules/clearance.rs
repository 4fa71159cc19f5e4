//! Physical fit of parts inside the case.
//!
//! Both rules stay silent when either measurement is missing or unparseable.

use buildcheck_models::{issue_codes, ComponentCategory, ComponentsMap, ValidationIssue};

use crate::compatibility::rule::ValidationRule;
use crate::error::BuildCheckResult;

/// Measurements in mm of a part and the case limit it has to fit under.
fn measurements(
    components: &ComponentsMap,
    part: ComponentCategory,
    part_key: &str,
    case_key: &str,
) -> Option<(String, f64, String, f64)> {
    let (part, case) = components.pair(part, ComponentCategory::Case)?;
    let size = part.specs.numeric(part_key);
    let limit = case.specs.numeric(case_key);

    if size <= 0.0 || limit <= 0.0 {
        return None;
    }
    Some((part.name.clone(), size, case.name.clone(), limit))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GpuClearanceRule;

impl GpuClearanceRule {
    pub const NAME: &'static str = "GpuClearance";
}

impl ValidationRule for GpuClearanceRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>> {
        let Some((gpu, length, case, max_length)) =
            measurements(components, ComponentCategory::Gpu, "length", "max_gpu_length")
        else {
            return Ok(Vec::new());
        };

        if length <= max_length {
            return Ok(Vec::new());
        }

        Ok(vec![ValidationIssue::error(
            issue_codes::GPU_TOO_LONG,
            format!(
                "Graphics card is {} mm long but the case fits at most {} mm",
                length, max_length
            ),
        )
        .with_details(format!(
            "'{}' exceeds the clearance of '{}' by {} mm. Choose a shorter card or a larger case.",
            gpu,
            case,
            length - max_length
        ))
        .between(gpu, case)])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CoolerClearanceRule;

impl CoolerClearanceRule {
    pub const NAME: &'static str = "CoolerClearance";
}

impl ValidationRule for CoolerClearanceRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>> {
        let Some((cooler, height, case, max_height)) =
            measurements(components, ComponentCategory::CpuCooler, "height", "max_cooler_height")
        else {
            return Ok(Vec::new());
        };

        if height <= max_height {
            return Ok(Vec::new());
        }

        Ok(vec![ValidationIssue::error(
            issue_codes::COOLER_TOO_TALL,
            format!(
                "CPU cooler is {} mm tall but the case fits at most {} mm",
                height, max_height
            ),
        )
        .with_details(format!(
            "'{}' exceeds the clearance of '{}' by {} mm. \
             Choose a lower-profile cooler or a wider case.",
            cooler,
            case,
            height - max_height
        ))
        .between(cooler, case)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::rules::test_fixtures::product;
    use buildcheck_models::Severity;

    fn gpu_build(length: Option<&str>, max: Option<&str>) -> ComponentsMap {
        ComponentsMap::new()
            .with(ComponentCategory::Gpu, product("RTX 4090 Gaming OC", &[("length", length)]))
            .with(ComponentCategory::Case, product("NR200P", &[("max_gpu_length", max)]))
    }

    fn cooler_build(height: Option<&str>, max: Option<&str>) -> ComponentsMap {
        ComponentsMap::new()
            .with(ComponentCategory::CpuCooler, product("NH-D15", &[("height", height)]))
            .with(ComponentCategory::Case, product("NR200P", &[("max_cooler_height", max)]))
    }

    fn check_gpu(length: Option<&str>, max: Option<&str>) -> Vec<ValidationIssue> {
        GpuClearanceRule.validate(&gpu_build(length, max)).unwrap()
    }

    fn check_cooler(height: Option<&str>, max: Option<&str>) -> Vec<ValidationIssue> {
        CoolerClearanceRule.validate(&cooler_build(height, max)).unwrap()
    }

    #[test]
    fn test_gpu_fits() {
        assert!(check_gpu(Some("300 mm"), Some("330mm")).is_empty());
        assert!(check_gpu(Some("330"), Some("330")).is_empty());
    }

    #[test]
    fn test_gpu_too_long() {
        let issues = check_gpu(Some("336 mm"), Some("330 mm"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, issue_codes::GPU_TOO_LONG);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].details.as_deref().unwrap().contains("by 6 mm"));
        assert_eq!(issues[0].component_a.as_deref(), Some("RTX 4090 Gaming OC"));
        assert_eq!(issues[0].component_b.as_deref(), Some("NR200P"));
    }

    #[test]
    fn test_gpu_unparseable_is_silent() {
        assert!(check_gpu(None, Some("330 mm")).is_empty());
        assert!(check_gpu(Some("336 mm"), Some("N/A")).is_empty());
    }

    #[test]
    fn test_cooler_too_tall() {
        let issues = check_cooler(Some("165mm"), Some("155mm"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, issue_codes::COOLER_TOO_TALL);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_cooler_fits_or_unknown() {
        assert!(check_cooler(Some("155"), Some("155")).is_empty());
        assert!(check_cooler(Some("165mm"), None).is_empty());
    }

    #[test]
    fn test_skips_without_case() {
        let gpu_only = ComponentsMap::new()
            .with(ComponentCategory::Gpu, product("RTX 4090", &[("length", Some("336"))]));
        assert!(GpuClearanceRule.validate(&gpu_only).unwrap().is_empty());

        let cooler_only = ComponentsMap::new()
            .with(ComponentCategory::CpuCooler, product("NH-D15", &[("height", Some("165"))]));
        assert!(CoolerClearanceRule.validate(&cooler_only).unwrap().is_empty());
    }
}
