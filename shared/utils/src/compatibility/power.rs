//! Power draw model.
//!
//! TDP stands in for electrical draw. The motherboard baseline is always
//! counted, whether or not a motherboard has been picked yet, and no idle draw
//! beyond TDP is added for the CPU or GPU.

use buildcheck_models::{ComponentCategory, ComponentsMap, Product};

/// Chipset, VRM and miscellaneous board draw.
pub const BASELINE_WATTS: f64 = 50.0;
pub const RAM_WATTS: f64 = 5.0;
pub const SSD_WATTS: f64 = 5.0;
pub const HDD_WATTS: f64 = 8.0;
pub const CPU_COOLER_WATTS: f64 = 5.0;
pub const CASE_FAN_WATTS: f64 = 5.0;

/// PSU rating keys, in lookup order.
pub const PSU_RATING_KEYS: [&str; 3] = ["power_output", "watts", "wattage"];

const FIXED_DRAW: [(ComponentCategory, f64); 5] = [
    (ComponentCategory::Ram, RAM_WATTS),
    (ComponentCategory::Ssd, SSD_WATTS),
    (ComponentCategory::Hdd, HDD_WATTS),
    (ComponentCategory::CpuCooler, CPU_COOLER_WATTS),
    (ComponentCategory::CaseFan, CASE_FAN_WATTS),
];

/// TDP of the product in `category`, never negative.
pub fn tdp(components: &ComponentsMap, category: ComponentCategory) -> f64 {
    components
        .get(category)
        .map(|product| product.specs.numeric("tdp").max(0.0))
        .unwrap_or(0.0)
}

/// CPU TDP + GPU TDP + baseline: what the PSU has to deliver.
pub fn required_wattage(components: &ComponentsMap) -> f64 {
    tdp(components, ComponentCategory::Cpu)
        + tdp(components, ComponentCategory::Gpu)
        + BASELINE_WATTS
}

/// Whole-system estimate shown alongside every analysis.
pub fn estimate_wattage(components: &ComponentsMap) -> u32 {
    let fixed: f64 = FIXED_DRAW
        .iter()
        .filter(|(category, _)| components.contains(*category))
        .map(|(_, watts)| watts)
        .sum();

    (required_wattage(components) + fixed).round() as u32
}

/// Rated output of a PSU, or 0 when it can't be determined.
pub fn psu_rating(psu: &Product) -> f64 {
    buildcheck_models::parse_numeric(psu.specs.first_present(&PSU_RATING_KEYS))
}

/// PSU size giving 20% headroom over `required`, rounded up to a whole watt.
pub fn recommended_psu_watts(required: f64) -> u32 {
    // x * 12 / 10 keeps whole-watt inputs exact, unlike x * 1.2
    (required * 12.0 / 10.0).ceil() as u32
}

pub fn has_headroom(rated: f64, required: f64) -> bool {
    rated * 10.0 >= required * 12.0
}
