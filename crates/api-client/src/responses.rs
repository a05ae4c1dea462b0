use serde::Serialize;
use serde_json::Value;

/// An upstream reply after sanitisation: the status code and a parsed JSON body.
///
/// The proxy endpoint passes both through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A short description of the body's shape for the logs.
    pub fn shape(&self) -> String {
        match &self.body {
            Value::Array(items) => format!("list with {} items", items.len()),
            Value::Object(map) => format!(
                "object with keys [{}]",
                map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
            ),
            other => format!("scalar {other}"),
        }
    }
}
