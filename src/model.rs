use serde::{Deserialize, Serialize};
use base64::Engine;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::RegisterError;

/// Wire values for `target_state`. Registration always writes `Unknown`;
/// the prober owns every transition after that.
#[repr(i8)]
#[allow(dead_code)]
pub enum TargetState {
    Unknown = 0,
    Up = 1,
    Down = 2,
    Timeout = 3,
}

pub const PING_TYPE_HTTP: &str = "HTTP";

/// Validated probe configuration. This is the transient input of the
/// metadata codec, never stored directly.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub method: String,
    pub success_min: u16,
    pub success_max: u16,
    pub insecure: bool,
    // None means no redirects
    pub follow_redirects: Option<u32>,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout: Option<u32>,
}

/// Compact key-coded form of the optional probe configuration, stored in
/// `target_metadata` and parsed back by the prober. Field order fixes the
/// key order of the encoded blob; absent options stay out of it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpMetadata {
    #[serde(rename = "m")]
    pub method: String,
    #[serde(rename = "mi")]
    pub success_min: u16,
    #[serde(rename = "mx")]
    pub success_max: u16,
    #[serde(rename = "i")]
    pub insecure: bool,
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<u32>,
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "h", skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl HttpMetadata {
    /// Packs a validated configuration. The body is base64-encoded whenever
    /// it is present; an empty header set is omitted rather than stored.
    pub fn from_config(config: &ProbeConfig) -> Self {
        HttpMetadata {
            method: config.method.clone(),
            success_min: config.success_min,
            success_max: config.success_max,
            insecure: config.insecure,
            follow_redirects: config.follow_redirects,
            body: config
                .body
                .as_ref()
                .map(|body| base64::prelude::BASE64_STANDARD.encode(body.as_bytes())),
            headers: if config.headers.is_empty() {
                None
            } else {
                Some(config.headers.clone())
            },
            timeout: config.timeout,
        }
    }

    pub fn encode(&self) -> Result<String, RegisterError> {
        serde_json::to_string(self).map_err(RegisterError::Encoding)
    }

    /// Parses a stored blob. Unrecognized keys are ignored so newer tools
    /// can add fields without breaking older readers.
    pub fn decode(raw: &str) -> Result<Self, RegisterError> {
        serde_json::from_str(raw).map_err(RegisterError::Encoding)
    }
}

/// Splits one `NAME=VALUE` token on the first `=` only, so values may
/// themselves contain `=`. Both sides are trimmed.
pub fn parse_header(token: &str) -> Result<(String, String), RegisterError> {
    let (name, value) = token.split_once('=').ok_or_else(|| {
        RegisterError::validation("--header", format!("'{token}' is not NAME=VALUE"))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(RegisterError::validation(
            "--header",
            format!("'{token}' has an empty header name"),
        ));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// One row of the `target` table.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: Uuid,
    pub enabled: bool,
    pub name: String,
    pub address: String,
    pub ping_type: &'static str,
    pub interval: i32,
    pub state: i8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: String,
}

impl Target {
    /// Assembles a fresh record: new random id, one timestamp shared by
    /// created/updated, enabled, state Unknown. Identical inputs never
    /// share an id.
    pub fn create(name: String, address: String, interval: i32, metadata: String) -> Self {
        let now = Utc::now();

        Target {
            id: Uuid::new_v4(),
            enabled: true,
            name,
            address,
            ping_type: PING_TYPE_HTTP,
            interval,
            state: TargetState::Unknown as i8,
            created_at: now,
            updated_at: now,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ProbeConfig {
        ProbeConfig {
            method: "GET".to_string(),
            success_min: 200,
            success_max: 299,
            insecure: false,
            follow_redirects: None,
            body: None,
            headers: HashMap::new(),
            timeout: None,
        }
    }

    #[test]
    fn minimal_config_encodes_only_required_keys() {
        let encoded = HttpMetadata::from_config(&base_config()).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["m"], "GET");
        assert_eq!(object["mi"], 200);
        assert_eq!(object["mx"], 299);
        assert_eq!(object["i"], false);
    }

    #[test]
    fn body_is_encoded_whenever_present() {
        let mut config = base_config();
        config.body = Some("ping".to_string());

        let metadata = HttpMetadata::from_config(&config);
        assert_eq!(metadata.body.as_deref(), Some("cGluZw=="));
        assert!(metadata.follow_redirects.is_none());
    }

    #[test]
    fn redirect_alone_does_not_store_a_body() {
        let mut config = base_config();
        config.follow_redirects = Some(5);

        let encoded = HttpMetadata::from_config(&config).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["r"], 5);
        assert!(value.get("b").is_none());
    }

    #[test]
    fn two_headers_store_two_entries() {
        let mut config = base_config();
        config.headers.insert("A".to_string(), "1".to_string());
        config.headers.insert("B".to_string(), "2".to_string());

        let metadata = HttpMetadata::from_config(&config);
        let headers = metadata.headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["A"], "1");
        assert_eq!(headers["B"], "2");
    }

    #[test]
    fn full_config_round_trips() {
        let mut config = base_config();
        config.method = "POST".to_string();
        config.insecure = true;
        config.follow_redirects = Some(3);
        config.body = Some("{\"check\":true}".to_string());
        config
            .headers
            .insert("X-Token".to_string(), "abc=def".to_string());
        config.timeout = Some(10);

        let metadata = HttpMetadata::from_config(&config);
        let decoded = HttpMetadata::decode(&metadata.encode().unwrap()).unwrap();

        assert_eq!(decoded, metadata);
        let body = base64::prelude::BASE64_STANDARD
            .decode(decoded.body.unwrap())
            .unwrap();
        assert_eq!(body, b"{\"check\":true}");
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let decoded =
            HttpMetadata::decode(r#"{"m":"GET","mi":200,"mx":299,"i":false,"z":"future"}"#)
                .unwrap();

        assert_eq!(decoded.method, "GET");
        assert!(decoded.timeout.is_none());
    }

    #[test]
    fn header_token_splits_on_first_equals() {
        let (name, value) = parse_header("X-Token=abc=def").unwrap();
        assert_eq!(name, "X-Token");
        assert_eq!(value, "abc=def");
    }

    #[test]
    fn header_token_is_trimmed() {
        let (name, value) = parse_header("  Accept = application/json ").unwrap();
        assert_eq!(name, "Accept");
        assert_eq!(value, "application/json");
    }

    #[test]
    fn header_token_without_equals_is_rejected() {
        assert!(parse_header("Accept application/json").is_err());
    }

    #[test]
    fn header_token_with_empty_name_is_rejected() {
        assert!(parse_header("=oops").is_err());
    }

    #[test]
    fn fresh_records_never_share_an_id() {
        let a = Target::create(
            "Ping".to_string(),
            "https://example.com/health".to_string(),
            30,
            "{}".to_string(),
        );
        let b = Target::create(
            "Ping".to_string(),
            "https://example.com/health".to_string(),
            30,
            "{}".to_string(),
        );

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn fresh_record_initial_fields() {
        let target = Target::create(
            "Ping".to_string(),
            "https://example.com/health".to_string(),
            30,
            "{}".to_string(),
        );

        assert!(target.enabled);
        assert_eq!(target.state, TargetState::Unknown as i8);
        assert_eq!(target.ping_type, "HTTP");
        assert_eq!(target.created_at, target.updated_at);
    }
}
