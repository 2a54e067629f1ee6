//! Runs in its own binary so the process-wide default is seeded here.

use odbc_diag::{default_config, Collector, DiagnosticStore, DELAY_ENV_VAR};
use std::time::Duration;

#[test]
fn delay_env_var_seeds_process_default() {
    std::env::set_var(DELAY_ENV_VAR, "0");

    assert_eq!(default_config().stabilization_delay, Duration::ZERO);
    let store = DiagnosticStore::new();
    let collector = Collector::new(&store);
    assert_eq!(collector.config().stabilization_delay, Duration::ZERO);
}
