//! NIST P-256 elliptic curve primitives
//!
//! This module implements the P-256 curve operations in constant time.
//! The curve equation is y² = x³ - 3x + b over the prime field F_p where:
//! - p = 2^256 - 2^224 + 2^192 + 2^96 - 1 (NIST P-256 prime)
//! - The curve order n = 0xFFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551
//!
//! The implementation uses:
//! - Solinas fast reduction for field arithmetic
//! - Jacobian projective coordinates for group operations
//! - Fixed-pattern scalar multiplication with constant-time point selection

mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{
    FIELD_ELEMENT_SIZE, POINT_UNCOMPRESSED_SIZE, SCALAR_SIZE, SHARED_SECRET_SIZE,
};
pub use field::FieldElement;
pub use point::Point;
pub use scalar::Scalar;

use crate::error::Result;
use crate::params::SECP256R1;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Get the standard base point G of the P-256 curve
///
/// Returns the generator point specified in the NIST P-256 standard.
pub fn base_point_g() -> Point {
    Point::new_uncompressed(&SECP256R1.g_x, &SECP256R1.g_y)
        .expect("standard base point must be valid")
}

/// Scalar multiplication with the base point: scalar * G
///
/// This is the core operation for deriving public keys from private keys.
pub fn scalar_mult_base_g(scalar: &Scalar) -> Result<Point> {
    let g = base_point_g();
    g.mul(scalar)
}

/// General scalar multiplication: compute scalar * point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Result<Point> {
    if point.is_identity() {
        // scalar * O = O
        return Ok(Point::identity());
    }

    point.mul(scalar)
}

/// Generate a P-256 keypair from the supplied generator
///
/// Uses rejection sampling so the private scalar is uniformly distributed
/// in [1, n-1]: candidates are reduced modulo the curve order and a zero
/// result is redrawn. The public key is private_key * G.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let mut scalar_bytes = Zeroizing::new([0u8; SCALAR_SIZE]);

    loop {
        rng.fill_bytes(&mut *scalar_bytes);

        match Scalar::new(*scalar_bytes) {
            Ok(private_key) => {
                let public_key = scalar_mult_base_g(&private_key)?;
                return Ok((private_key, public_key));
            }
            Err(_) => {
                // Zero after reduction, retry with fresh bytes
                continue;
            }
        }
    }
}
