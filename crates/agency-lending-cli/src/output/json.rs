use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the envelope to stdout.
///
/// A closed pipe (`lend schedule ... | head`) is not an error worth
/// reporting; anything else is logged.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            tracing::error!(error = %e, "failed to write output");
        }
    }
}

/// Write `value` as indented JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}
