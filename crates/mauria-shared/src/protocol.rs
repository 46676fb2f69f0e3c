use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Messages exchanged with an embedding host over window-level messaging.
///
/// The host owns the authoritative copy of server-derived state (credentials
/// and friends) and pushes it to the app during the bootstrap handshake.  On
/// the wire each message is a JSON object tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// Host announces it is ready to answer data requests.
    #[serde(rename = "PARENT_READY")]
    ParentReady,

    /// App asks the host for everything it has.
    #[serde(rename = "REQUEST_ALL_DATA")]
    RequestAllData,

    /// Host pushes a single key/value pair.
    #[serde(rename = "DATA_RESPONSE")]
    DataResponse { key: String, payload: String },

    /// Host pushes its full state.  Only accepted when the payload carries a
    /// non-empty `email` entry.
    #[serde(rename = "ALL_DATA_RESPONSE")]
    AllDataResponse { payload: BTreeMap<String, String> },

    /// App tells the host to switch to the preprod environment.
    #[serde(rename = "MODE_BETA")]
    ModeBeta { payload: String },
}

impl HostMessage {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from the JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_message_roundtrip() {
        let msg = HostMessage::AllDataResponse {
            payload: BTreeMap::from([
                ("email".to_string(), "prenom.nom@example.fr".to_string()),
                ("theme".to_string(), "dark".to_string()),
            ]),
        };

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"type\":\"ALL_DATA_RESPONSE\""));

        let restored = HostMessage::from_json(&json).unwrap();
        assert_eq!(restored, msg);
    }

    #[test]
    fn unit_variants_carry_only_their_tag() {
        assert_eq!(
            HostMessage::ParentReady.to_json().unwrap(),
            r#"{"type":"PARENT_READY"}"#
        );
        assert_eq!(
            HostMessage::from_json(r#"{"type":"REQUEST_ALL_DATA"}"#).unwrap(),
            HostMessage::RequestAllData
        );
    }
}
