//! Per-handle diagnostic chains held in memory, served through [`DiagApi`]
//! with the same buffer contract as `SQLGetDiagRecW`.

use crate::collector::DiagApi;
use crate::diagnostics::DiagRecord;
use crate::handle::{HandleKind, RawHandle};
use crate::types::*;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Chain {
    kind: HandleKind,
    records: Vec<DiagRecord>,
    fail_at: Option<(SQLSMALLINT, SQLRETURN)>,
}

/// Diagnostic chains keyed by handle.
///
/// Handles issued by [`DiagnosticStore::alloc`] are opaque tokens, never
/// dereferenced.
pub struct DiagnosticStore {
    chains: Mutex<HashMap<usize, Chain>>,
    next_id: AtomicUsize,
}

impl Default for DiagnosticStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self {
            chains: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn alloc(&self, kind: HandleKind) -> RawHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.chains.lock().insert(
            id,
            Chain {
                kind,
                records: Vec::new(),
                fail_at: None,
            },
        );
        RawHandle::issued(kind, id)
    }

    pub fn free(&self, handle: RawHandle) {
        self.chains.lock().remove(&(handle.as_ptr() as usize));
    }

    /// Append a record to the handle's chain.
    pub fn post(&self, handle: RawHandle, record: DiagRecord) {
        if let Some(chain) = self.chains.lock().get_mut(&(handle.as_ptr() as usize)) {
            chain.records.push(record);
        }
    }

    /// Drop all records, as a driver does at the start of every call.
    pub fn clear(&self, handle: RawHandle) {
        if let Some(chain) = self.chains.lock().get_mut(&(handle.as_ptr() as usize)) {
            chain.records.clear();
            chain.fail_at = None;
        }
    }

    /// Make the query for record `rec_number` return `ret`.
    pub fn fail_at(&self, handle: RawHandle, rec_number: SQLSMALLINT, ret: SQLRETURN) {
        if let Some(chain) = self.chains.lock().get_mut(&(handle.as_ptr() as usize)) {
            chain.fail_at = Some((rec_number, ret));
        }
    }

    pub fn len(&self, handle: RawHandle) -> usize {
        self.chains
            .lock()
            .get(&(handle.as_ptr() as usize))
            .map_or(0, |c| c.records.len())
    }

    pub fn is_empty(&self, handle: RawHandle) -> bool {
        self.len(handle) == 0
    }
}

impl DiagApi for DiagnosticStore {
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
        if handle.is_null() {
            return SQL_INVALID_HANDLE;
        }

        let chains = self.chains.lock();
        let chain = match chains.get(&(handle as usize)) {
            Some(c) if c.kind.sql_type() == handle_type => c,
            _ => return SQL_INVALID_HANDLE,
        };

        if let Some((at, ret)) = chain.fail_at {
            if at == rec_number {
                return ret;
            }
        }
        if rec_number < 1 {
            return SQL_ERROR;
        }

        let idx = (rec_number - 1) as usize;
        let rec = match chain.records.get(idx) {
            Some(r) => r,
            None => return SQL_NO_DATA,
        };

        // SQLSTATE (5 chars + null)
        let state_wide = string_to_utf16(&rec.state);
        let copy_len = state_wide.len().min(SQL_SQLSTATE_SIZE);
        state[..copy_len].copy_from_slice(&state_wide[..copy_len]);
        for c in &mut state[copy_len..] {
            *c = 0;
        }

        *native_error = rec.native_error;

        let msg_wide = string_to_utf16(&rec.message);
        if let Some(len) = text_length {
            *len = SQLSMALLINT::try_from(msg_wide.len()).unwrap_or(SQLSMALLINT::MAX);
        }

        if message.is_empty() {
            return if msg_wide.is_empty() {
                SQL_SUCCESS
            } else {
                SQL_SUCCESS_WITH_INFO
            };
        }
        let copy_len = msg_wide.len().min(message.len() - 1);
        message[..copy_len].copy_from_slice(&msg_wide[..copy_len]);
        message[copy_len] = 0;

        if copy_len < msg_wide.len() {
            SQL_SUCCESS_WITH_INFO
        } else {
            SQL_SUCCESS
        }
    }
}
