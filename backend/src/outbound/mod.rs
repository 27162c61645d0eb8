//! Outbound adapters implementing domain ports.
//!
//! - **memory**: mutex-guarded user and purchase stores
//! - **product_file**: product catalogue mirrored to a JSON file
//! - **registration**: reqwest client posting identities to a registration
//!   endpoint
//!
//! Adapters translate between domain types and their storage or wire
//! representation. They contain no business rules.

pub mod memory;
pub mod product_file;
pub mod registration;
