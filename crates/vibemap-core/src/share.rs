//! Base64 share tokens for stateless grid sharing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::grid::{GridError, GridSnapshot};

/// Encode a snapshot as a share token: base64 over the JSON serialization.
#[must_use]
pub fn share_token(snapshot: &GridSnapshot) -> String {
    let json = serde_json::to_string(snapshot).expect("snapshot serialization is infallible");
    STANDARD.encode(json)
}

/// Decode a share token back into a snapshot.
///
/// # Errors
///
/// Returns [`GridError::CorruptToken`] if the token is not base64 or the
/// decoded payload is not a valid snapshot. Callers are expected to fall
/// back to the default grid rather than abort.
pub fn parse_share_token(token: &str) -> Result<GridSnapshot, GridError> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| GridError::CorruptToken {
            reason: format!("invalid base64: {e}"),
        })?;
    serde_json::from_slice(&bytes).map_err(|e| GridError::CorruptToken {
        reason: format!("invalid snapshot payload: {e}"),
    })
}

/// Build a shareable URL embedding `token` as the `state` query parameter.
///
/// The token is percent-encoded: standard base64 carries `+`, `/`, and `=`,
/// none of which survive a query string unescaped.
#[must_use]
pub fn share_url(base_url: &str, token: &str) -> String {
    let encoded = utf8_percent_encode(token, NON_ALPHANUMERIC);
    format!("{}?state={encoded}", base_url.trim_end_matches('/'))
}
