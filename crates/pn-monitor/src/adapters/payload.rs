//! Decoding of the node service's JSON replies.
//!
//! grpcurl prints protobuf messages in the canonical JSON mapping: 64-bit
//! integers arrive as strings, 32-bit ones as numbers, and zero values are
//! omitted entirely.

use serde::{Deserialize, Deserializer};

use crate::domain::RawStatus;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: StatusBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    #[serde(default, deserialize_with = "flex_u64")]
    connected_peers: Option<u64>,
    #[serde(default)]
    synced_layer: Option<LayerNumber>,
    #[serde(default)]
    top_layer: Option<LayerNumber>,
    #[serde(default)]
    verified_layer: Option<LayerNumber>,
}

#[derive(Debug, Deserialize)]
struct LayerNumber {
    #[serde(default, deserialize_with = "flex_u64")]
    number: Option<u64>,
}

impl LayerNumber {
    // An empty layer object is layer 0.
    fn value(&self) -> u64 {
        self.number.unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionResponse {
    version_string: Option<VersionValue>,
}

#[derive(Debug, Deserialize)]
struct VersionValue {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn flex_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Decode a `NodeService.Status` reply.
pub fn decode_status(bytes: &[u8]) -> Result<RawStatus, String> {
    let response: StatusResponse = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    let body = response.status;

    Ok(RawStatus {
        connected_peers: body.connected_peers,
        top_layer: body.top_layer.as_ref().map(LayerNumber::value),
        synced_layer: body.synced_layer.as_ref().map(LayerNumber::value),
        verified_layer: body.verified_layer.as_ref().map(LayerNumber::value),
    })
}

/// Decode a `NodeService.Version` reply into its version string.
pub fn decode_version(bytes: &[u8]) -> Result<String, String> {
    let response: VersionResponse = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    match response.version_string {
        Some(v) if !v.value.trim().is_empty() => Ok(v.value.trim().to_string()),
        _ => Err("reply carries no version string".to_string()),
    }
}
