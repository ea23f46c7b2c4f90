//! Dealership domain logic.
//!
//! Everything in this crate is pure (no I/O) so it can be shared by the
//! repository layer, the API server and tests alike.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod content;
pub mod error;
pub mod geo;
pub mod pricing;
pub mod slug;
pub mod types;
