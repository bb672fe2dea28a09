//! Tracing/logging setup shared by the client crates and their test suites.

/// Initialize process-wide tracing (JSON logs).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing for tests: human-readable output captured by the test harness.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Subscriber construction (filters, formatting).
pub mod tracing;
