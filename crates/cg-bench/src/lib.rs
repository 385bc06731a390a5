//! Benchmarks for cgkit. Run with `cargo bench -p cg-bench`.
