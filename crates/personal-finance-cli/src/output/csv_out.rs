use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. Nested result sections flatten into
/// dotted field names (payroll.net_salary, delta.annual_winner, ...).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let _ = wtr.write_record(["field", "value"]);
    write_flattened(&mut wtr, "", result);
    let _ = wtr.flush();
}

fn write_flattened(wtr: &mut csv::Writer<io::StdoutLock<'_>>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let field = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                write_flattened(wtr, &field, val);
            }
        }
        _ => {
            let _ = wtr.write_record([prefix, &format_csv_value(value)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
