//! Walks a handle's diagnostic chain after a failed call and turns it into
//! an [`Error`].

use crate::config::{default_config, CollectorConfig};
use crate::diagnostics::{DiagRecord, OdbcError};
use crate::error::{Error, Result};
use crate::handle::{AsHandle, RawHandle};
use crate::status::{classify, is_error, StatusClass};
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// The `SQLGetDiagRecW` primitive over caller-owned buffers.
///
/// `state` receives five UTF-16 code units plus a terminator. `message` is
/// written NUL-terminated and truncated to its length; `text_length`, when
/// given, receives the untruncated message length in characters.
pub trait DiagApi {
    #[allow(clippy::too_many_arguments)]
    fn get_diag_rec(
        &self,
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        rec_number: SQLSMALLINT,
        state: &mut [SQLWCHAR; SQLSTATE_BUFFER_LEN],
        native_error: &mut SQLINTEGER,
        message: &mut [SQLWCHAR],
        text_length: Option<&mut SQLSMALLINT>,
    ) -> SQLRETURN;
}

impl<T: DiagApi + ?Sized> DiagApi for &T {
    fn get_diag_rec(
        &self,
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        rec_number: SQLSMALLINT,
        state: &mut [SQLWCHAR; SQLSTATE_BUFFER_LEN],
        native_error: &mut SQLINTEGER,
        message: &mut [SQLWCHAR],
        text_length: Option<&mut SQLSMALLINT>,
    ) -> SQLRETURN {
        (**self).get_diag_rec(
            handle_type,
            handle,
            rec_number,
            state,
            native_error,
            message,
            text_length,
        )
    }
}

impl<T: DiagApi + ?Sized> DiagApi for Arc<T> {
    fn get_diag_rec(
        &self,
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        rec_number: SQLSMALLINT,
        state: &mut [SQLWCHAR; SQLSTATE_BUFFER_LEN],
        native_error: &mut SQLINTEGER,
        message: &mut [SQLWCHAR],
        text_length: Option<&mut SQLSMALLINT>,
    ) -> SQLRETURN {
        (**self).get_diag_rec(
            handle_type,
            handle,
            rec_number,
            state,
            native_error,
            message,
            text_length,
        )
    }
}

pub struct Collector<A> {
    api: A,
    config: CollectorConfig,
}

impl<A: DiagApi> Collector<A> {
    /// Collector using the process-wide default configuration.
    pub fn new(api: A) -> Self {
        Self::with_config(api, default_config())
    }

    pub fn with_config(api: A, config: CollectorConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Read every diagnostic record of `handle` after `api_name` failed.
    ///
    /// Returns `Err(Error::BadConnection)` if any record carries SQLSTATE
    /// 08S01, and `Err(Error::DiagRecFailed)` if the query itself fails.
    /// Blocks the calling thread for the stabilization delay.
    pub fn collect(&self, api_name: &str, handle: impl AsHandle) -> Result<OdbcError> {
        let raw = handle.to_handle_and_type()?;
        let delay = self.config.stabilization_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.drain(api_name, raw)
    }

    /// Like [`Collector::collect`], but suspends on the tokio timer instead
    /// of blocking the thread.
    pub async fn collect_async(&self, api_name: &str, handle: impl AsHandle) -> Result<OdbcError> {
        let raw = handle.to_handle_and_type()?;
        let delay = self.config.stabilization_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.drain(api_name, raw)
    }

    /// The error to surface for a failed `api_name` call on `handle`.
    pub fn new_error(&self, api_name: &str, handle: impl AsHandle) -> Error {
        match self.collect(api_name, handle) {
            Ok(e) => Error::Odbc(e),
            Err(e) => e,
        }
    }

    pub async fn new_error_async(&self, api_name: &str, handle: impl AsHandle) -> Error {
        match self.collect_async(api_name, handle).await {
            Ok(e) => Error::Odbc(e),
            Err(e) => e,
        }
    }

    /// Pass `ret` through when it is a success code, otherwise build the
    /// error for it. `SQL_SUCCESS_WITH_INFO` records stay on the handle
    /// unread; call [`Collector::collect`] to fetch them.
    pub fn check(&self, api_name: &str, ret: SQLRETURN, handle: impl AsHandle) -> Result<SQLRETURN> {
        if is_error(ret) {
            return Err(self.new_error(api_name, handle));
        }
        Ok(ret)
    }

    fn drain(&self, api_name: &str, raw: RawHandle) -> Result<OdbcError> {
        let mut diag = Vec::new();
        let mut state = [0 as SQLWCHAR; SQLSTATE_BUFFER_LEN];
        let mut message = vec![0 as SQLWCHAR; self.config.max_message_length.max(1) as usize];

        // A fresh SQLSMALLINT per pass; never widen or reuse a counter here.
        for rec_number in 1..=SQLSMALLINT::MAX {
            state.fill(0);
            message.fill(0);
            let mut native_error: SQLINTEGER = 0;

            trace!(target: "odbc_diag", api = api_name, handle = %raw.kind(), rec_number, "SQLGetDiagRec");
            let ret = self.api.get_diag_rec(
                raw.handle_type(),
                raw.as_ptr(),
                rec_number,
                &mut state,
                &mut native_error,
                &mut message,
                None,
            );
            match classify(ret) {
                StatusClass::NoData => return Ok(OdbcError::new(api_name, diag)),
                StatusClass::Failure => {
                    error!(target: "odbc_diag", api = api_name, rec_number, ret, "SQLGetDiagRec failed");
                    return Err(Error::DiagRecFailed { ret });
                }
                StatusClass::Success => {}
            }

            let record = DiagRecord {
                state: utf16_to_string(&state),
                native_error,
                message: utf16_to_string(&message),
            };
            if record.state == SQLSTATE_COMMUNICATION_LINK_FAILURE {
                warn!(target: "odbc_diag", api = api_name, detail = %record.message, "communication link failure");
                return Err(Error::BadConnection);
            }
            debug!(target: "odbc_diag", api = api_name, rec_number, %record, native_error, "diagnostic record");
            diag.push(record);
        }

        warn!(target: "odbc_diag", api = api_name, "diagnostic chain exceeds SQLSMALLINT range");
        Ok(OdbcError::new(api_name, diag))
    }
}
