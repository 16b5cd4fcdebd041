use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as sectioned tables using the tabled crate. Each
/// nested object in the result (payroll, contractor, delta, ...) gets
/// its own two-column table under a heading.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_sections(result);
                print_envelope_trailer(map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_sections(result: &Value) {
    let Value::Object(res_map) = result else {
        println!("{}", result);
        return;
    };

    // Scalar fields first, as a summary table.
    let scalars: Vec<(&String, &Value)> = res_map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &scalars {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }

    // Then one table per nested section.
    for (key, val) in res_map {
        if let Value::Object(section) = val {
            println!("\n{}:", heading(key));
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (field, field_val) in section {
                builder.push_record([field.as_str(), &format_value(field_val)]);
            }
            println!("{}", Table::from(builder));
        }
    }
}

fn print_envelope_trailer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn heading(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
