use std::io;

use plates_core::{CommandEvent, Error, OutputSink, Snapshot};

/// Map an error to a stable coarse-grained error code string.
fn error_code(e: &Error) -> &'static str {
    match e {
        Error::Io(io) if io.kind() == io::ErrorKind::InvalidInput => "invalid_input",
        other => other.kind().into(),
    }
}

/// JSONL output sink for plates-json.
///
/// Results go to stdout as JSONL, the completion record goes to stderr.
/// Confirmation always returns true (trust mode).
pub struct JsonOutputSink;

impl OutputSink for JsonOutputSink {
    fn emit_event(&self, event: CommandEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("failed to serialize event: {e}"),
        }
    }

    fn emit_snapshot(&self, snapshot: &Snapshot) {
        let json = serde_json::json!({
            "type": "snapshot",
            "untagged": snapshot.untagged,
            "tagged": snapshot.tagged,
        });
        println!("{}", json);
    }

    fn confirm(&self, _prompt: &str) -> bool {
        true // trust mode -- programmatic callers have already decided
    }

    fn emit_done(&self, result: &Result<(), Error>) {
        let json = match result {
            Ok(()) => serde_json::json!({"type": "done", "ok": true}),
            Err(e) => serde_json::json!({
                "type": "done",
                "ok": false,
                "code": error_code(e),
                "message": e.to_string(),
            }),
        };
        eprintln!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plates_core::error::{InsertError, SearchError};

    #[test]
    fn error_code_follows_kind() {
        let e: Error = InsertError::DuplicateFound("1ABC-123".into()).into();
        assert_eq!(error_code(&e), "duplicate_found");
        let e: Error = SearchError::BothPartitionsEmpty.into();
        assert_eq!(error_code(&e), "both_partitions_empty");
    }

    #[test]
    fn error_code_io() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "x").into();
        assert_eq!(error_code(&e), "io");
    }

    #[test]
    fn error_code_invalid_input() {
        let e: Error = io::Error::new(io::ErrorKind::InvalidInput, "bad json").into();
        assert_eq!(error_code(&e), "invalid_input");
    }
}
