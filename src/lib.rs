//! Diagnostic retrieval for ODBC client code.
//!
//! After a native call returns a failing [`SQLRETURN`](types::SQLRETURN),
//! hand the handle to a [`Collector`]. It walks the handle's diagnostic
//! chain with `SQLGetDiagRecW` and produces either an [`OdbcError`] with
//! every record, or [`Error::BadConnection`] when the driver reports a
//! communication link failure (SQLSTATE 08S01) so the caller can drop the
//! connection and reconnect.
//!
//! ```
//! use odbc_diag::{Collector, CollectorConfig, DiagRecord, DiagnosticStore, HandleKind};
//! use odbc_diag::types::SQL_ERROR;
//! use std::time::Duration;
//!
//! let store = DiagnosticStore::new();
//! let stmt = store.alloc(HandleKind::Stmt);
//! store.post(stmt, DiagRecord::new("42000", 207, "Invalid column name"));
//!
//! let config = CollectorConfig::default().with_stabilization_delay(Duration::ZERO);
//! let collector = Collector::with_config(&store, config);
//! let err = collector.check("SQLExecute", SQL_ERROR, stmt).unwrap_err();
//! assert_eq!(err.to_string(), "SQLExecute: {42000} Invalid column name");
//! ```

mod collector;
mod config;
mod diagnostics;
#[cfg(feature = "driver-manager")]
mod driver_manager;
mod error;
mod handle;
mod status;
mod store;
pub mod types;

pub use collector::{Collector, DiagApi};
pub use config::{
    default_config, set_default_config, CollectorConfig, DEFAULT_STABILIZATION_DELAY,
    DELAY_ENV_VAR,
};
pub use diagnostics::{DiagRecord, OdbcError};
#[cfg(feature = "driver-manager")]
pub use driver_manager::DriverManager;
pub use error::{Error, Result};
pub use handle::{AsHandle, HandleKind, RawHandle};
pub use status::{classify, is_error, StatusClass};
pub use store::DiagnosticStore;

/// Build the error for a failed `api_name` call on `handle`, querying the
/// system driver manager with the process-wide default configuration.
#[cfg(feature = "driver-manager")]
pub fn new_error(api_name: &str, handle: impl AsHandle) -> Error {
    Collector::new(DriverManager).new_error(api_name, handle)
}
