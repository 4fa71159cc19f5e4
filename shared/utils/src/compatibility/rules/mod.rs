//! Built-in compatibility rules.

pub mod clearance;
pub mod memory;
pub mod socket;
pub mod wattage;

pub use clearance::{CoolerClearanceRule, GpuClearanceRule};
pub use memory::MemoryTypeRule;
pub use socket::SocketCompatibilityRule;
pub use wattage::WattageRule;

use super::rule::ValidationRule;

/// The rules every engine starts with, in execution order.
pub fn default_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(SocketCompatibilityRule),
        Box::new(WattageRule),
        Box::new(MemoryTypeRule),
        Box::new(GpuClearanceRule),
        Box::new(CoolerClearanceRule),
    ]
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use buildcheck_models::{Product, ProductSpecs};

    /// A product with only the given string specs; `None` leaves the key out.
    pub fn product(name: &str, specs: &[(&str, Option<&str>)]) -> Product {
        let specs: ProductSpecs = specs
            .iter()
            .filter_map(|(key, value)| value.map(|v| (*key, v)))
            .collect();
        Product::new(name, specs)
    }
}
