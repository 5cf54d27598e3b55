// API response payload types

use serde::Serialize;

use crate::compute::Parity;

/// Welcome payload for `GET /`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub mensaje: &'static str,
    pub uso: &'static str,
    pub ejemplo: &'static str,
}

/// Success payload for `GET /factorial/{numero}`.
///
/// `factorial` is carried as a `serde_json::Number` built from the exact
/// decimal digits, so it serializes as a raw JSON integer of any width
/// (the `arbitrary_precision` feature keeps it lossless past 64 bits).
#[derive(Debug, Serialize)]
pub struct FactorialResponse {
    pub numero: i64,
    pub factorial: serde_json::Number,
    pub tipo: Parity,
}

/// Error payload for every failure response the service emits.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
