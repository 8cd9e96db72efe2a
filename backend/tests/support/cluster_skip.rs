//! Skip policy for suites that need an embedded PostgreSQL cluster.
//!
//! Cluster bootstrap downloads binaries and writes under `target/`, which some
//! sandboxes forbid. Setting `SKIP_TEST_CLUSTER` turns a bootstrap failure into
//! a visible skip; without it the failure fails the test.

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Print a skip marker and return `None`, or panic when skipping is not allowed.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("embedded PostgreSQL did not start: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
