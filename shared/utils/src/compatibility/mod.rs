//! Build Compatibility Engine
//!
//! Rule-based checks over a partial PC build: socket, power supply, memory
//! generation and case clearance. Rules only speak up once both parts they
//! compare are present, so a build can be analyzed at every step.

pub mod engine;
pub mod power;
pub mod rule;
pub mod rules;


pub use engine::CompatibilityEngine;
pub use power::estimate_wattage;
pub use rule::ValidationRule;
pub use rules::{
    default_rules, CoolerClearanceRule, GpuClearanceRule, MemoryTypeRule,
    SocketCompatibilityRule, WattageRule,
};
