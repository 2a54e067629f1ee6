use std::fmt;

/// One entry of a handle's diagnostic chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagRecord {
    pub state: String, // 5-char SQLSTATE e.g. "HY000"
    pub native_error: i32,
    pub message: String,
}

impl DiagRecord {
    pub fn new(state: impl Into<String>, native_error: i32, message: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            native_error,
            message: message.into(),
        }
    }
}

impl fmt::Display for DiagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} {}", self.state, self.message)
    }
}

/// Error raised by a failing ODBC call, with the diagnostic records the
/// driver attached to the handle, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdbcError {
    api_name: String,
    diag: Vec<DiagRecord>,
}

impl OdbcError {
    pub fn new(api_name: impl Into<String>, diag: Vec<DiagRecord>) -> Self {
        Self {
            api_name: api_name.into(),
            diag,
        }
    }

    /// Name of the native call that failed, e.g. `SQLExecute`.
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn records(&self) -> &[DiagRecord] {
        &self.diag
    }

    /// SQLSTATE of the first record.
    pub fn sql_state(&self) -> Option<&str> {
        self.diag.first().map(|r| r.state.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    pub fn into_records(self) -> Vec<DiagRecord> {
        self.diag
    }
}

impl fmt::Display for OdbcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.api_name)?;
        for (i, rec) in self.diag.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{rec}")?;
        }
        Ok(())
    }
}

impl std::error::Error for OdbcError {}
