use regex::Regex;
use serde_json::Value;

/// Resolves delimited expressions inside row templates against a JSON value.
///
/// Payloads coming back from the server may themselves contain `{{ }}`
/// markers left over from server-side template engines; with the bracket
/// delimiters installed at bootstrap those stay literal text.
pub struct Interpolator {
    pattern: Regex,
}

impl Interpolator {
    pub fn new(start: &str, end: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"{}\s*([\w.]+)\s*{}",
            regex::escape(start),
            regex::escape(end)
        ))
        .expect("escaped delimiters always form a valid pattern");
        Self { pattern }
    }

    /// The `[[ ]]` pair the application installs instead of the default
    /// `{{ }}`, so server-originated curly markers are never bound.
    pub fn brackets() -> Self {
        Self::new("[[", "]]")
    }

    /// Replaces every delimited expression with the value its dotted path
    /// resolves to inside `bindings`. Text outside delimiters is untouched.
    pub fn render(&self, template: &str, bindings: &Value) -> String {
        self.pattern
            .replace_all(template, |caps: &regex::Captures| lookup(bindings, &caps[1]))
            .into_owned()
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// Walks a dot-separated path through objects and arrays. A path that leads
/// nowhere renders as an empty string, like an undefined expression in the
/// old web UI.
fn lookup(bindings: &Value, path: &str) -> String {
    let mut current = bindings;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(value) => value,
                None => return String::new(),
            },
            Value::Array(items) => {
                match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(value) => value,
                    None => return String::new(),
                }
            }
            _ => return String::new(),
        };
    }
    match current {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
