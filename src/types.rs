//! Native ODBC type aliases, return codes and limits, at the widths the
//! driver manager expects.

#![allow(non_camel_case_types)]

use std::ffi::c_void;

pub type SQLSMALLINT = i16;
pub type SQLINTEGER = i32;
pub type SQLRETURN = SQLSMALLINT;
pub type SQLWCHAR = u16;

pub type SQLHANDLE = *mut c_void;
pub type SQLHENV = SQLHANDLE;
pub type SQLHDBC = SQLHANDLE;
pub type SQLHSTMT = SQLHANDLE;
pub type SQLHDESC = SQLHANDLE;

// ── Return codes ────────────────────────────────────────────────────

pub const SQL_SUCCESS: SQLRETURN = 0;
pub const SQL_SUCCESS_WITH_INFO: SQLRETURN = 1;
pub const SQL_STILL_EXECUTING: SQLRETURN = 2;
pub const SQL_NEED_DATA: SQLRETURN = 99;
pub const SQL_NO_DATA: SQLRETURN = 100;
pub const SQL_PARAM_DATA_AVAILABLE: SQLRETURN = 101;
pub const SQL_ERROR: SQLRETURN = -1;
pub const SQL_INVALID_HANDLE: SQLRETURN = -2;

/// Every return code an ODBC 3.8 call can produce.
pub const STATUS_CODES: [SQLRETURN; 8] = [
    SQL_SUCCESS,
    SQL_SUCCESS_WITH_INFO,
    SQL_STILL_EXECUTING,
    SQL_NEED_DATA,
    SQL_NO_DATA,
    SQL_PARAM_DATA_AVAILABLE,
    SQL_ERROR,
    SQL_INVALID_HANDLE,
];

// ── Handle types ────────────────────────────────────────────────────

pub const SQL_HANDLE_ENV: SQLSMALLINT = 1;
pub const SQL_HANDLE_DBC: SQLSMALLINT = 2;
pub const SQL_HANDLE_STMT: SQLSMALLINT = 3;
pub const SQL_HANDLE_DESC: SQLSMALLINT = 4;

// ── Limits ──────────────────────────────────────────────────────────

pub const SQL_MAX_MESSAGE_LENGTH: SQLSMALLINT = 512;
pub const SQL_SQLSTATE_SIZE: usize = 5;
/// SQLSTATE plus the NUL terminator.
pub const SQLSTATE_BUFFER_LEN: usize = SQL_SQLSTATE_SIZE + 1;

/// Communication link failure.
pub const SQLSTATE_COMMUNICATION_LINK_FAILURE: &str = "08S01";

// ── Wide strings ────────────────────────────────────────────────────

/// Decode a NUL-terminated (or full-slice) UTF-16 buffer. Unpaired
/// surrogates become U+FFFD.
pub fn utf16_to_string(buf: &[SQLWCHAR]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

pub fn string_to_utf16(s: &str) -> Vec<SQLWCHAR> {
    s.encode_utf16().collect()
}
