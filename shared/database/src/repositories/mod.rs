//! Repository module for database operations
//!
//! Resolves stored products into components maps and persists build
//! analyses onto saved quotes.

pub mod product;
pub mod quote;

pub use product::ProductRepository;
pub use quote::QuoteRepository;
