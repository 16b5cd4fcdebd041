use serde_json::Value;
use std::io::Read;

/// Read piped JSON from stdin, if any. Interactive sessions (TTY)
/// yield None so flag-based input can take over.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(buffer.trim())
        .map_err(|e| format!("Failed to parse stdin as JSON: {}", e))?;
    Ok(Some(value))
}
