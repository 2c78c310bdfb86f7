//! P-256 key generation and Diffie-Hellman key agreement
//!
//! The two operations this crate exists for. Both are stateless single-shot
//! calls: key generation acquires entropy, seeds a private generator,
//! computes, and erases its intermediates; secret derivation is fully
//! deterministic for fixed inputs and consumes no entropy.
//!
//! # Security Features
//!
//! - Every remote point is validated (on curve, not the identity) before
//!   any arithmetic uses it, blocking invalid-curve attacks
//! - A degenerate all-zero shared secret is reported as an error, never
//!   returned silently
//! - No direct byte access to secrets; exports are zeroizing copies

use crate::drbg::{ChaChaDrbg, EntropySource};
use crate::ec::{self, Point, Scalar};
use crate::ec::{FIELD_ELEMENT_SIZE, POINT_UNCOMPRESSED_SIZE, SCALAR_SIZE, SHARED_SECRET_SIZE};
use crate::error::{validate, Error, Result};
use crate::security::SecretBuffer;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Personalization string for key-generation DRBG instances
const KEYGEN_PERSONALIZATION: &[u8] = b"p256-ecdh keypair generation";

/// Public key for P-256 key agreement (uncompressed EC point)
#[derive(Clone, Debug, Zeroize)]
pub struct PublicKey([u8; POINT_UNCOMPRESSED_SIZE]);

/// Secret key for P-256 key agreement (scalar in [1, n-1])
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(SecretBuffer<SCALAR_SIZE>);

/// Raw shared secret: the x-coordinate of the Diffie-Hellman product
///
/// Not passed through a key-derivation function; callers must run it
/// through a KDF before using it as a symmetric key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(SecretBuffer<SHARED_SECRET_SIZE>);

impl PublicKey {
    /// Create a public key from its affine coordinates
    ///
    /// Both coordinates must be exactly 32 bytes, big-endian. The point is
    /// validated against the curve equation before the key is accepted.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self> {
        validate::length("public key x-coordinate", x.len(), FIELD_ELEMENT_SIZE)?;
        validate::length("public key y-coordinate", y.len(), FIELD_ELEMENT_SIZE)?;

        let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
        let mut y_bytes = [0u8; FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(x);
        y_bytes.copy_from_slice(y);

        let point = Point::new_uncompressed(&x_bytes, &y_bytes)?;
        Ok(Self(point.serialize_uncompressed()))
    }

    /// Create a public key from the uncompressed wire format: 0x04 || x || y
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "uncompressed public key",
            bytes.len(),
            POINT_UNCOMPRESSED_SIZE,
        )?;

        let point = Point::deserialize_uncompressed(bytes)?;
        if point.is_identity() {
            return Err(Error::InvalidPoint {
                context: "public key",
                reason: "public key cannot be the identity point",
            });
        }
        Ok(Self(point.serialize_uncompressed()))
    }

    /// The x-coordinate as 32 big-endian bytes
    pub fn x(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; FIELD_ELEMENT_SIZE];
        out.copy_from_slice(&self.0[1..33]);
        out
    }

    /// The y-coordinate as 32 big-endian bytes
    pub fn y(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; FIELD_ELEMENT_SIZE];
        out.copy_from_slice(&self.0[33..65]);
        out
    }

    /// Export the key in uncompressed wire format (65 bytes)
    pub fn to_uncompressed_bytes(&self) -> [u8; POINT_UNCOMPRESSED_SIZE] {
        self.0
    }

    fn to_point(&self) -> Result<Point> {
        Point::deserialize_uncompressed(&self.0)
    }
}

impl SecretKey {
    /// Create a secret key from a 32-byte big-endian scalar
    ///
    /// The scalar is reduced into [1, n-1]; zero (before or after
    /// reduction) is rejected. The input should be treated as sensitive
    /// and zeroized by the caller after use.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("secret key", bytes.len(), SCALAR_SIZE)?;

        let mut buffer_bytes = [0u8; SCALAR_SIZE];
        buffer_bytes.copy_from_slice(bytes);
        let buffer = SecretBuffer::new(buffer_bytes);
        buffer_bytes.zeroize();

        // Stores the reduced form, so the range invariant holds from here on
        let scalar = Scalar::from_secret_buffer(buffer)?;
        Ok(Self(scalar.as_secret_buffer().clone()))
    }

    /// Export the scalar as a zeroizing copy
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        let mut out = Zeroizing::new([0u8; SCALAR_SIZE]);
        out.copy_from_slice(self.0.as_ref());
        out
    }

    fn to_scalar(&self) -> Result<Scalar> {
        Scalar::from_secret_buffer(self.0.clone())
    }
}

impl SharedSecret {
    /// Export the shared secret as a zeroizing copy
    ///
    /// Minimize the lifetime of the returned value, and derive working keys
    /// from it with a KDF rather than using it directly.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SHARED_SECRET_SIZE]> {
        let mut out = Zeroizing::new([0u8; SHARED_SECRET_SIZE]);
        out.copy_from_slice(self.0.as_ref());
        out
    }
}

/// Generate a P-256 key pair
///
/// Seeds a fresh generator from `entropy`, draws a private scalar by
/// rejection sampling, and computes the matching public point. The
/// generator and every intermediate secret are erased before returning,
/// on success and on every error path.
///
/// Fails with [`Error::Entropy`] if the source cannot supply seed material.
pub fn generate_keypair<E: EntropySource>(entropy: &mut E) -> Result<(PublicKey, SecretKey)> {
    let mut drbg = ChaChaDrbg::from_entropy_source(entropy, KEYGEN_PERSONALIZATION)?;

    let (sk_scalar, pk_point) = ec::generate_keypair(&mut drbg)?;

    let public_key = PublicKey(pk_point.serialize_uncompressed());
    let secret_key = SecretKey(sk_scalar.as_secret_buffer().clone());

    // Both zeroize on drop
    drop(sk_scalar);
    drop(drbg);

    Ok((public_key, secret_key))
}

/// Derive the shared secret from a local secret key and a remote public key
///
/// Computes Z = secret · remote and returns the big-endian x-coordinate of
/// Z. The remote point was validated on construction and is re-checked
/// here before any arithmetic touches it. A product at the point at
/// infinity (a degenerate or small-subgroup input) is an error, never an
/// all-zero secret.
///
/// Deterministic for fixed inputs; consumes no entropy.
pub fn derive_shared_secret(
    secret_key: &SecretKey,
    remote_public: &PublicKey,
) -> Result<SharedSecret> {
    let local_scalar = secret_key.to_scalar()?;
    let remote_point = remote_public.to_point()?;

    if remote_point.is_identity() {
        return Err(Error::InvalidPoint {
            context: "shared secret derivation",
            reason: "remote public key cannot be the identity point",
        });
    }

    let shared_point = ec::scalar_mult(&local_scalar, &remote_point)?;

    if shared_point.is_identity() {
        return Err(Error::IdentityResult {
            context: "shared secret derivation",
        });
    }

    let mut x_bytes = shared_point.x_coordinate_bytes();
    let secret = SharedSecret(SecretBuffer::new(x_bytes));
    x_bytes.zeroize();

    Ok(secret)
}

#[cfg(test)]
mod tests;
