//! Integration tests for cgkit crates.
//!
//! End-to-end checks across `cg-math` and `cg-scene`, with `glam` as an
//! independent reference for the matrix conventions.
