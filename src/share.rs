// 🔗 Share Links - portable schema + files payload as a URL token
//
// A share token is the JSON payload encoded as URL-safe base64 (no padding),
// carried in a `share=` fragment or query parameter. Foreign or versioned
// payloads we do not understand decode to None.

use crate::schema::{JsonFileEntry, SchemaInfo};
use anyhow::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload format version we read and write
pub const SHARE_VERSION: u8 = 1;

/// Application tag embedded in every payload
pub const SHARE_APP: &str = "manyjson";

// ============================================================================
// PAYLOAD TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareFileItem {
    pub name: String,
    pub content: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSchema {
    pub name: String,
    pub content: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePayload {
    pub v: u8,
    pub app: String,
    pub schema: ShareSchema,
    pub files: Vec<ShareFileItem>,
}

// ============================================================================
// ENCODING
// ============================================================================

/// Build a payload from a schema and the files to share with it
pub fn create_share_payload(schema: &SchemaInfo, files: &[JsonFileEntry]) -> SharePayload {
    SharePayload {
        v: SHARE_VERSION,
        app: SHARE_APP.to_string(),
        schema: ShareSchema {
            name: schema.name.clone(),
            content: schema.content.clone(),
        },
        files: files
            .iter()
            .map(|f| ShareFileItem {
                name: f.name.clone(),
                content: f.content.clone(),
            })
            .collect(),
    }
}

/// Encode a payload as a URL-safe token
pub fn encode_payload(payload: &SharePayload) -> Result<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Wrap a token for embedding in a link fragment
pub fn build_share_link_token(token: &str) -> String {
    format!("share={}", token)
}

/// Pull a share token out of a URL, a bare fragment, or a raw pasted token
pub fn extract_share_token(input: &str) -> Option<String> {
    // Fragment style: ...#share=<token>
    if let Some(idx) = input.find('#') {
        let hash = &input[idx + 1..];
        if let Some(token) = hash.strip_prefix("share=") {
            return Some(token.to_string());
        }
    }

    // Query style: ...?share=<token> or ...&share=<token>
    if let Some(idx) = input.find('?') {
        let query = &input[idx + 1..];
        let query = query.split('#').next().unwrap_or(query);
        for pair in query.split('&') {
            if let Some(token) = pair.strip_prefix("share=") {
                return Some(token.to_string());
            }
        }
    }

    // Raw token pasted without a URL
    if let Some(token) = input.strip_prefix("share=") {
        return Some(token.to_string());
    }

    None
}

/// Decode a token back into a payload, verifying it is ours
pub fn decode_token(token: &str) -> Option<SharePayload> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    let payload: SharePayload = serde_json::from_slice(&bytes).ok()?;

    if payload.app == SHARE_APP && payload.v == SHARE_VERSION {
        Some(payload)
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
