//! Property-based tests for status classification and error rendering.

use odbc_diag::types::*;
use odbc_diag::{
    classify, is_error, Collector, CollectorConfig, DiagRecord, DiagnosticStore, HandleKind,
    OdbcError, StatusClass,
};
use proptest::prelude::*;
use std::time::Duration;

fn arb_state() -> impl Strategy<Value = String> {
    "[0-9A-Z]{5}".prop_filter("not a link failure", |s| s != "08S01")
}

fn arb_message() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .'\\[\\]-]{0,80}"
}

fn arb_record() -> impl Strategy<Value = DiagRecord> {
    (arb_state(), any::<i32>(), arb_message())
        .prop_map(|(state, native_error, message)| DiagRecord::new(state, native_error, message))
}

proptest! {
    #[test]
    fn only_success_codes_are_not_errors(ret in any::<i16>()) {
        let success = ret == SQL_SUCCESS || ret == SQL_SUCCESS_WITH_INFO;
        prop_assert_eq!(is_error(ret), !success);
        prop_assert_eq!(classify(ret) == StatusClass::Success, success);
    }

    #[test]
    fn rendering_joins_records(api in "SQL[A-Za-z]{1,20}", records in prop::collection::vec(arb_record(), 0..6)) {
        let err = OdbcError::new(api.clone(), records.clone());
        let expected = format!(
            "{}: {}",
            api,
            records
                .iter()
                .map(|r| format!("{{{}}} {}", r.state, r.message))
                .collect::<Vec<_>>()
                .join("\n")
        );
        prop_assert_eq!(err.to_string(), expected.clone());
        prop_assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn collector_copies_any_chain(records in prop::collection::vec(arb_record(), 0..8)) {
        let store = DiagnosticStore::new();
        let stmt = store.alloc(HandleKind::Stmt);
        for rec in &records {
            store.post(stmt, rec.clone());
        }
        let config = CollectorConfig::default().with_stabilization_delay(Duration::ZERO);
        let err = Collector::with_config(&store, config).collect("SQLExecute", stmt).unwrap();
        prop_assert_eq!(err.records(), records.as_slice());
    }
}
