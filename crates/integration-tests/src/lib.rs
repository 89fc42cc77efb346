//! Integration tests for Shoplokalt.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database, migrate, seed the postcode registry
//! slk-cli migrate && slk-cli seed postcodes
//!
//! # Start the server
//! cargo run -p shoplokalt-server
//!
//! # Run the ignored end-to-end tests
//! cargo test -p shoplokalt-integration-tests -- --ignored
//! ```
//!
//! The tests under `tests/` talk to a running server over HTTP and are
//! `#[ignore]`d by default; `SERVER_BASE_URL` overrides the target.
