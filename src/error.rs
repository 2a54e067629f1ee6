use crate::diagnostics::OdbcError;
use crate::handle::HandleKind;
use crate::types::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} handle is null")]
    NullHandle { kind: HandleKind },

    #[error("unknown handle type {0}")]
    UnknownHandleType(SQLSMALLINT),

    /// `SQLGetDiagRec` itself failed, so no diagnostic text is available.
    #[error("SQLGetDiagRec failed: ret={ret}")]
    DiagRecFailed { ret: SQLRETURN },

    /// SQLSTATE 08S01 was reported. The connection must be discarded.
    #[error("driver: bad connection")]
    BadConnection,

    #[error(transparent)]
    Odbc(#[from] OdbcError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn is_bad_connection(&self) -> bool {
        matches!(self, Error::BadConnection)
    }

    /// The diagnostic aggregate, when this is an ordinary diagnosed failure.
    pub fn as_odbc(&self) -> Option<&OdbcError> {
        match self {
            Error::Odbc(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagRecord;

    #[test]
    fn diag_rec_failure_carries_raw_code() {
        let err = Error::DiagRecFailed {
            ret: SQL_INVALID_HANDLE,
        };
        assert_eq!(err.to_string(), "SQLGetDiagRec failed: ret=-2");
    }

    #[test]
    fn bad_connection_sentinel() {
        assert!(Error::BadConnection.is_bad_connection());
        assert_eq!(Error::BadConnection.to_string(), "driver: bad connection");
        assert!(!Error::UnknownHandleType(9).is_bad_connection());
    }

    #[test]
    fn odbc_error_is_transparent() {
        let err: Error = OdbcError::new(
            "SQLPrepare",
            vec![DiagRecord::new("42S02", 208, "Invalid object name 'nope'.")],
        )
        .into();
        assert_eq!(
            err.to_string(),
            "SQLPrepare: {42S02} Invalid object name 'nope'."
        );
        assert_eq!(err.as_odbc().and_then(|e| e.sql_state()), Some("42S02"));
    }

    #[test]
    fn null_handle_names_the_kind() {
        let err = Error::NullHandle {
            kind: HandleKind::Stmt,
        };
        assert_eq!(err.to_string(), "statement handle is null");
    }
}
