// Endpoint handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::json_response;
use super::types::{ApiError, FactorialResponse, WelcomeResponse};
use crate::compute;

/// Error message for negative inputs (the factorial is undefined below 0).
pub const NEGATIVE_INPUT_ERROR: &str = "El número debe ser mayor o igual a 0";

/// Fixed welcome payload served on `GET /`.
const WELCOME: WelcomeResponse = WelcomeResponse {
    mensaje: "Microservicio de Factorial",
    uso: "Accede a /factorial/<numero> para obtener el factorial de un número",
    ejemplo: "/factorial/5",
};

/// `GET /`: welcome and usage instructions. Always 200.
pub fn handle_welcome() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &WELCOME)
}

/// `GET /factorial/{numero}`: factorial and parity of the input.
///
/// Negative inputs are rejected with 400 before any computation. The
/// computation step returns a `Result`; an `Err` surfaces as 500 with the
/// failure message embedded, so no request ever takes the process down.
pub fn handle_factorial(numero: i64) -> Response<Full<Bytes>> {
    if numero < 0 {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ApiError::new(NEGATIVE_INPUT_ERROR),
        );
    }

    match factorial_payload(numero) {
        Ok(payload) => json_response(StatusCode::OK, &payload),
        Err(e) => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ApiError::new(format!("Error al calcular: {e}")),
        ),
    }
}

/// Build the success payload for a validated (non-negative) input.
fn factorial_payload(numero: i64) -> Result<FactorialResponse, String> {
    let n = u64::try_from(numero).map_err(|e| e.to_string())?;
    let factorial = compute::factorial(n)
        .to_string()
        .parse::<serde_json::Number>()
        .map_err(|e| e.to_string())?;

    Ok(FactorialResponse {
        numero,
        factorial,
        tipo: compute::parity(numero),
    })
}
