//! Outbound wire envelopes.
//!
//! Every message is a JSON object with a `type` discriminator and a `data`
//! payload:
//!
//! ```json
//! {"type":"hello","data":{"device_name":"pixel","client_version":1,"app_version":100,"app_version_code":"0.1.0"}}
//! {"type":"clip","data":{"text":"copied text"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::clipboard::ClipChangeEvent;
use crate::device::ClientIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    pub device_name: String,
    pub client_version: u32,
    pub app_version: u32,
    pub app_version_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipPayload {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OutboundEnvelope {
    Hello(HelloPayload),
    Clip(ClipPayload),
}

impl OutboundEnvelope {
    pub fn hello(identity: &ClientIdentity) -> Self {
        OutboundEnvelope::Hello(HelloPayload {
            device_name: identity.device_name.clone(),
            client_version: identity.client_version,
            app_version: identity.app_version,
            app_version_code: identity.app_version_code.clone(),
        })
    }

    pub fn clip(text: impl Into<String>) -> Self {
        OutboundEnvelope::Clip(ClipPayload { text: text.into() })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEnvelope::Hello(_) => "hello",
            OutboundEnvelope::Clip(_) => "clip",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<ClipChangeEvent> for OutboundEnvelope {
    fn from(event: ClipChangeEvent) -> Self {
        OutboundEnvelope::clip(event.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn hello_matches_wire_shape() {
        let identity = ClientIdentity {
            device_name: "pixel".to_string(),
            client_version: 1,
            app_version: 102,
            app_version_code: "0.1.2".to_string(),
        };

        let value: Value =
            serde_json::from_str(&OutboundEnvelope::hello(&identity).to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "hello",
                "data": {
                    "device_name": "pixel",
                    "client_version": 1,
                    "app_version": 102,
                    "app_version_code": "0.1.2"
                }
            })
        );
    }

    #[test]
    fn clip_matches_wire_shape() {
        let value: Value =
            serde_json::from_str(&OutboundEnvelope::clip("héllo\n").to_json().unwrap()).unwrap();

        assert_eq!(value, json!({"type": "clip", "data": {"text": "héllo\n"}}));
    }

    #[test]
    fn kind_names_the_discriminator() {
        assert_eq!(OutboundEnvelope::clip("x").kind(), "clip");
    }
}
