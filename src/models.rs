use serde::{Deserialize, Serialize};

pub const ANONYMOUS: &str = "anonymous";

// Attempt request - used by both check and reset
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AttemptRequest {
    pub action: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl AttemptRequest {
    // Callers without an id share the anonymous bucket
    pub fn identifier(&self) -> &str {
        match self.identifier.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => ANONYMOUS,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AttemptResponse {
    pub key: String,
    pub allowed: bool,
    pub decision: String,
}
