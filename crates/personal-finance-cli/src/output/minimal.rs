use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: search the result depth-first for well-known answer
/// fields in priority order, then fall back to the first scalar field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields across the calculators.
    let priority_keys = [
        "headline",
        "annual_winner",
        "total_monthly_cost",
        "first_installment",
        "months_to_complete",
        "target_amount",
    ];

    for key in &priority_keys {
        if let Some(found) = find_key(result, key) {
            if !found.is_null() {
                println!("{}", format_minimal(found));
                return;
            }
        }
    }

    // Fall back to the first scalar field.
    if let Some((key, val)) = first_scalar(result) {
        println!("{}: {}", key, format_minimal(val));
        return;
    }

    println!("{}", format_minimal(result));
}

fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    if let Some(found) = map.get(key) {
        return Some(found);
    }
    map.values().find_map(|v| find_key(v, key))
}

fn first_scalar(value: &Value) -> Option<(&String, &Value)> {
    let map = value.as_object()?;
    map.iter().find(|(_, v)| !v.is_object() && !v.is_array())
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
