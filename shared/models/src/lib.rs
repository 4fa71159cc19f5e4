//! # Build Check Core Domain Models
//!
//! Domain models shared by the compatibility engine, the persistence layer and
//! the command-line analyzer. All models serialize with serde; user-supplied
//! records validate with the validator crate.
//!
//! ## Key Models
//!
//! - **ComponentCategory**: The closed set of PC part slots (cpu, gpu, motherboard, ...)
//! - **Product**: A purchasable part with a display name and a weakly-typed spec bag
//! - **ComponentsMap**: A partial build holding at most one product per category
//! - **ValidationIssue**: A graded problem found by a compatibility rule
//! - **BuildAnalysis**: Engine output with status, estimated wattage and issues
//! - **Quote**: A saved build carrying its latest analysis
//!
//! ## Spec values
//!
//! Retailer spec sheets are inconsistent, so `specs` is a string-keyed map of
//! [`SpecValue`]s. [`parse_numeric`] pulls a number out of values like `"650W"`.

pub mod analysis;
pub mod component;
pub mod quote;


pub use analysis::*;
pub use component::*;
pub use quote::*;
