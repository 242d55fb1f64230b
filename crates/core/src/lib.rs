//! Core types for Order Track: the inbound webhook order model and the
//! outbound analytics track event.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod order;
pub mod track;

/// A JSON value carried through the transform unchanged.
///
/// Webhook sources are inconsistent about ids, codes and money fields (`20`,
/// `"20.00"`, `{"amount": "20.00"}`), so they are kept in whichever form they
/// arrived. Objects and arrays land in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
    Other(serde_json::Value),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => match n.as_f64() {
                // Integral floats print without a fraction: `55.0` is "55".
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e21 => {
                    if v == 0.0 {
                        f.write_str("0")
                    } else {
                        write!(f, "{v:.0}")
                    }
                }
                _ => fmt::Display::fmt(n, f),
            },
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => fmt::Display::fmt(b, f),
            Scalar::Other(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// Inbound wrapper as delivered by the webhook dispatcher: `{ payload: { body } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookEnvelope<T> {
    pub payload: WebhookPayload<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookPayload<T> {
    pub body: T,
}

impl<T: Serialize> WebhookEnvelope<T> {
    pub fn new(body: T) -> Self {
        Self { payload: WebhookPayload { body } }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
