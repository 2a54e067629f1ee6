use crate::types::*;

/// Coarse outcome of a native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `SQL_SUCCESS` or `SQL_SUCCESS_WITH_INFO`.
    Success,
    /// `SQL_NO_DATA`: nothing left, not a failure.
    NoData,
    /// Anything else. Diagnostics should be consulted.
    Failure,
}

/// True unless `ret` is `SQL_SUCCESS` or `SQL_SUCCESS_WITH_INFO`.
pub fn is_error(ret: SQLRETURN) -> bool {
    !(ret == SQL_SUCCESS || ret == SQL_SUCCESS_WITH_INFO)
}

pub fn classify(ret: SQLRETURN) -> StatusClass {
    match ret {
        SQL_SUCCESS | SQL_SUCCESS_WITH_INFO => StatusClass::Success,
        SQL_NO_DATA => StatusClass::NoData,
        _ => StatusClass::Failure,
    }
}
