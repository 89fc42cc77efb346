//! Shoplokalt Core - Shared domain types.
//!
//! This crate provides the typed field values used across the Shoplokalt
//! components:
//! - `server` - The marketplace web application
//! - `cli` - Command-line tools for migrations and postcode seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Every raw form input has a corresponding parse-validated newtype
//! here; the server's validation layer builds on these.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, CVR numbers, phone
//!   numbers, postcodes, prices, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
