use serde_json::{Value, json};

/// Derives renderable rows from whatever JSON the `/hosts` endpoint returned.
///
/// The payload shape is not enforced anywhere, so this is best-effort:
/// shapes we do not recognize degrade to nothing rather than an error.
pub fn host_rows(data: &Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items.iter().map(normalize).collect(),
        Value::Object(map) => match map.get("hosts") {
            Some(Value::Array(items)) => items.iter().map(normalize).collect(),
            Some(Value::Object(hosts)) => hosts
                .iter()
                .map(|(name, detail)| json!({ "hostname": name, "detail": detail }))
                .collect(),
            _ => vec![data.clone()],
        },
        _ => Vec::new(),
    }
}

// Bare hostname strings become objects so row templates can address them
fn normalize(item: &Value) -> Value {
    match item {
        Value::String(s) => json!({ "hostname": s }),
        other => other.clone(),
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
