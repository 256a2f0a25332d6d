use serde::Serialize;
use serde_json::Value;

use super::error::Error;

/// The single structured result every command emits: printed to stdout as
/// one pretty-printed JSON object, and the source of the process exit code.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub success: bool,
    pub status: u16,
    pub data: Value,
}

impl Report {
    pub fn success(status: u16, data: Value) -> Self {
        Self {
            success: true,
            status,
            data,
        }
    }

    pub fn failure(status: u16, data: Value) -> Self {
        Self {
            success: false,
            status,
            data,
        }
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(rendered) => println!("{rendered}"),
            // A Report is plain bool/int/Value data; serialization cannot
            // fail in practice, but the contract is that something structured
            // always reaches stdout.
            Err(e) => println!(
                "{{\"success\": false, \"status\": 0, \"data\": {{\"message\": \"failed to render report: {e}\"}}}}"
            ),
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}

impl From<&Error> for Report {
    fn from(error: &Error) -> Self {
        Report::failure(error.status(), error.data())
    }
}
