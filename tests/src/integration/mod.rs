//! Integration tests across the monitor's layers.

pub mod flows;
