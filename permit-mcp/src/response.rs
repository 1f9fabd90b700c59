//! Tool result envelopes.
//!
//! Every tool answers with exactly one text block: pretty-printed JSON on
//! success, `Error: <message>` with the error flag set on failure.

use permit_sdk::PermitError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Message used when a failure carries no text of its own
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Convert an API result into the envelope returned to the caller
pub fn into_call_result<T: Serialize>(result: Result<T, PermitError>) -> CallToolResult {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
        },
        Err(e) => {
            tracing::warn!(error = %e, "tool call failed");
            error_result(&e.to_string())
        }
    }
}

/// An error envelope with the given message
pub fn error_result(message: &str) -> CallToolResult {
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR
    } else {
        message
    };
    CallToolResult::error(vec![Content::text(format!("Error: {}", message))])
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
