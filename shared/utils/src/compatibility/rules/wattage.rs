use buildcheck_models::{issue_codes, ComponentCategory, ComponentsMap, ValidationIssue};

use crate::compatibility::power::{
    has_headroom, psu_rating, recommended_psu_watts, required_wattage,
};
use crate::compatibility::rule::ValidationRule;
use crate::error::BuildCheckResult;

/// The PSU must cover CPU + GPU + baseline, ideally with 20% to spare.
///
/// Fires whenever a PSU is in the build. CPU and GPU are optional; a PSU on
/// its own is still checked against the baseline draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct WattageRule;

impl WattageRule {
    pub const NAME: &'static str = "Wattage";
}

impl ValidationRule for WattageRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>> {
        let Some(psu) = components.get(ComponentCategory::Psu) else {
            return Ok(Vec::new());
        };
        let load = components
            .get(ComponentCategory::Gpu)
            .or_else(|| components.get(ComponentCategory::Cpu));
        let attach = |issue: ValidationIssue| match load {
            Some(load) => issue.between(&psu.name, &load.name),
            None => issue.involving(&psu.name),
        };

        let required = required_wattage(components);
        let recommended = recommended_psu_watts(required);
        let rated = psu_rating(psu);

        if rated <= 0.0 {
            return Ok(vec![ValidationIssue::warning(
                issue_codes::UNKNOWN_POWER,
                "Could not determine the power supply's rated wattage",
            )
            .with_details(format!(
                "The build needs about {} W; a {} W unit leaves 20% headroom. \
                 Check the rating of '{}' manually.",
                required.round(),
                recommended,
                psu.name
            ))
            .involving(&psu.name)]);
        }

        if rated < required {
            return Ok(vec![attach(ValidationIssue::error(
                issue_codes::INSUFFICIENT_WATTAGE,
                format!(
                    "Power supply provides {} W but the build requires {} W (recommended: {} W)",
                    rated.round(),
                    required.round(),
                    recommended
                ),
            )
            .with_details(format!(
                "Choose a power supply of at least {} W to run the build with a 20% safety margin.",
                recommended
            )))]);
        }

        if !has_headroom(rated, required) {
            return Ok(vec![attach(ValidationIssue::warning(
                issue_codes::LOW_WATTAGE_HEADROOM,
                format!(
                    "Power supply provides {} W for a {} W build, less than 20% headroom",
                    rated.round(),
                    required.round()
                ),
            )
            .with_details(format!(
                "A {} W power supply is recommended for stable operation and future upgrades.",
                recommended
            )))]);
        }

        Ok(Vec::new())
    }
}
