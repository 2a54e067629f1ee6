use crate::error::{Error, Result};
use crate::types::*;
use std::fmt;

/// The four ODBC handle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Env,
    Dbc,
    Stmt,
    Desc,
}

impl HandleKind {
    pub fn sql_type(self) -> SQLSMALLINT {
        match self {
            HandleKind::Env => SQL_HANDLE_ENV,
            HandleKind::Dbc => SQL_HANDLE_DBC,
            HandleKind::Stmt => SQL_HANDLE_STMT,
            HandleKind::Desc => SQL_HANDLE_DESC,
        }
    }

    pub fn from_sql_type(handle_type: SQLSMALLINT) -> Result<Self> {
        match handle_type {
            SQL_HANDLE_ENV => Ok(HandleKind::Env),
            SQL_HANDLE_DBC => Ok(HandleKind::Dbc),
            SQL_HANDLE_STMT => Ok(HandleKind::Stmt),
            SQL_HANDLE_DESC => Ok(HandleKind::Desc),
            other => Err(Error::UnknownHandleType(other)),
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::Env => "environment",
            HandleKind::Dbc => "connection",
            HandleKind::Stmt => "statement",
            HandleKind::Desc => "descriptor",
        })
    }
}

/// A native handle paired with its kind.
///
/// This is a borrowed token: the handle is allocated and freed elsewhere,
/// and nothing holding a `RawHandle` may outlive it. Copying the token does
/// not duplicate the underlying resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHandle {
    handle: SQLHANDLE,
    kind: HandleKind,
}

// SAFETY: `RawHandle` never dereferences, frees or owns the handle; it only
// names it. ODBC handles may be used from any thread as long as calls on one
// handle are not concurrent, which the owner of the handle guarantees.
unsafe impl Send for RawHandle {}

impl RawHandle {
    pub fn new(kind: HandleKind, handle: SQLHANDLE) -> Result<Self> {
        if handle.is_null() {
            return Err(Error::NullHandle { kind });
        }
        Ok(Self { handle, kind })
    }

    /// Token for an in-memory handle id. Ids start at 1, so it is never null.
    pub(crate) fn issued(kind: HandleKind, id: usize) -> Self {
        debug_assert!(id != 0);
        Self {
            handle: id as SQLHANDLE,
            kind,
        }
    }

    pub fn env(handle: SQLHENV) -> Result<Self> {
        Self::new(HandleKind::Env, handle)
    }

    pub fn dbc(handle: SQLHDBC) -> Result<Self> {
        Self::new(HandleKind::Dbc, handle)
    }

    pub fn stmt(handle: SQLHSTMT) -> Result<Self> {
        Self::new(HandleKind::Stmt, handle)
    }

    pub fn desc(handle: SQLHDESC) -> Result<Self> {
        Self::new(HandleKind::Desc, handle)
    }

    pub fn as_ptr(&self) -> SQLHANDLE {
        self.handle
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn handle_type(&self) -> SQLSMALLINT {
        self.kind.sql_type()
    }
}

/// Anything that can name a native handle for diagnostic retrieval.
pub trait AsHandle {
    fn to_handle_and_type(&self) -> Result<RawHandle>;
}

impl AsHandle for RawHandle {
    fn to_handle_and_type(&self) -> Result<RawHandle> {
        Ok(*self)
    }
}

/// `(handle_type, handle)` as received across the C boundary.
impl AsHandle for (SQLSMALLINT, SQLHANDLE) {
    fn to_handle_and_type(&self) -> Result<RawHandle> {
        let kind = HandleKind::from_sql_type(self.0)?;
        RawHandle::new(kind, self.1)
    }
}

impl<T: AsHandle + ?Sized> AsHandle for &T {
    fn to_handle_and_type(&self) -> Result<RawHandle> {
        (**self).to_handle_and_type()
    }
}
