//! # public-nodes Test Suite
//!
//! End-to-end health check flows, driven through the scripted RPC double
//! from `pn_monitor::test_utils`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Poll, classify, summarize, render
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pn-tests
//! ```

pub mod integration;
