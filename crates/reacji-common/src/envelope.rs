use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{ApiError, ClientResult, DecodeError};

/// The fields every Web API response carries, whatever the method.
///
/// Method-specific fields live alongside these in the same JSON object and
/// are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the call succeeded
    #[serde(default)]
    pub ok: bool,
    /// Error code, present when `ok` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SmolStr>,
    /// Non-fatal warning attached to a successful call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<SmolStr>,
}

impl Envelope {
    /// Parse the envelope out of a response body.
    pub fn parse(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Turn a failed envelope into an [`ApiError`].
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.ok {
            Ok(self)
        } else {
            Err(ApiError {
                error: self
                    .error
                    .unwrap_or_else(|| SmolStr::new_static("unknown_error")),
            })
        }
    }

    /// Parse and check a response body in one step.
    pub fn check(body: &[u8]) -> ClientResult<Self> {
        let envelope = Self::parse(body)?.into_result()?;
        #[cfg(feature = "tracing")]
        if let Some(warning) = &envelope.warning {
            tracing::warn!(warning = %warning, "server attached a warning to the response");
        }
        Ok(envelope)
    }
}
