//! `SQLGetDiagRecW` from the system ODBC driver manager.

use crate::collector::DiagApi;
use crate::types::*;
use odbc_sys::{HandleType, SQLGetDiagRecW};
use std::ptr;

/// Queries diagnostics through the linked driver manager (unixODBC,
/// iODBC or odbc32.dll).
#[derive(Debug, Default, Clone, Copy)]
pub struct DriverManager;

fn handle_type(tag: SQLSMALLINT) -> Option<HandleType> {
    match tag {
        SQL_HANDLE_ENV => Some(HandleType::Env),
        SQL_HANDLE_DBC => Some(HandleType::Dbc),
        SQL_HANDLE_STMT => Some(HandleType::Stmt),
        SQL_HANDLE_DESC => Some(HandleType::Desc),
        _ => None,
    }
}

impl DiagApi for DriverManager {
    fn get_diag_rec(
        &self,
        handle_type_tag: SQLSMALLINT,
        handle: SQLHANDLE,
        rec_number: SQLSMALLINT,
        state: &mut [SQLWCHAR; SQLSTATE_BUFFER_LEN],
        native_error: &mut SQLINTEGER,
        message: &mut [SQLWCHAR],
        text_length: Option<&mut SQLSMALLINT>,
    ) -> SQLRETURN {
        let Some(ht) = handle_type(handle_type_tag) else {
            return SQL_INVALID_HANDLE;
        };
        let buffer_length = SQLSMALLINT::try_from(message.len()).unwrap_or(SQLSMALLINT::MAX);
        let text_length = match text_length {
            Some(len) => len as *mut SQLSMALLINT,
            None => ptr::null_mut(),
        };
        // The handle is a live ODBC handle of kind `ht` for the duration of
        // this call; `RawHandle` borrowers guarantee it.
        let ret = unsafe {
            SQLGetDiagRecW(
                ht,
                handle as odbc_sys::Handle,
                rec_number,
                state.as_mut_ptr(),
                native_error,
                message.as_mut_ptr(),
                buffer_length,
                text_length,
            )
        };
        ret.0
    }
}
