//! Computation core module
//!
//! Pure functions behind the factorial endpoint: exact factorial over
//! arbitrary-precision integers and parity of the input number.

use num_bigint::BigUint;
use serde::Serialize;

/// Parity of an integer, serialized as `"par"` / `"impar"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Par,
    Impar,
}

/// Compute `n!` with exact arbitrary-precision arithmetic.
///
/// `0!` and `1!` are both 1 (empty product). Results grow without bound,
/// so no fixed-width integer is involved at any point.
pub fn factorial(n: u64) -> BigUint {
    (2..=n).map(BigUint::from).product()
}

/// Parity of the input number itself, not of its factorial.
pub const fn parity(numero: i64) -> Parity {
    if numero % 2 == 0 {
        Parity::Par
    } else {
        Parity::Impar
    }
}
