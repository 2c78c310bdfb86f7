//! Self-contained NIST P-256 key generation and ECDH agreement
//!
//! This crate implements the two operations a key-agreement endpoint needs,
//! key-pair generation and Diffie-Hellman shared-secret derivation over
//! SECP256R1, together with all of their supporting arithmetic, in pure Rust
//! with no FFI. The implementation favors constant-time operations and
//! guaranteed zeroization of secret material over raw speed.
//!
//! # Security Features
//!
//! - Constant-time field arithmetic and fixed-pattern scalar multiplication
//! - On-curve validation of every externally supplied point before use
//! - Secure memory handling with automatic zeroization on every exit path
//! - Per-call deterministic random-bit generator seeded from an injected
//!   entropy capability, never shared or persisted
//!
//! # Example
//!
//! ```
//! use p256_ecdh::{derive_shared_secret, generate_keypair, OsEntropy};
//!
//! let (alice_pk, alice_sk) = generate_keypair(&mut OsEntropy)?;
//! let (bob_pk, bob_sk) = generate_keypair(&mut OsEntropy)?;
//!
//! let alice_view = derive_shared_secret(&alice_sk, &bob_pk)?;
//! let bob_view = derive_shared_secret(&bob_sk, &alice_pk)?;
//! assert_eq!(*alice_view.to_bytes(), *bob_view.to_bytes());
//! # Ok::<(), p256_ecdh::Error>(())
//! ```
//!
//! The shared secret is the raw x-coordinate of the Diffie-Hellman product.
//! It is not passed through a key-derivation function; run it through a KDF
//! before using it as a symmetric key.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Secure memory containers
pub mod security;
pub use security::{EphemeralSecret, SecretBuffer};

// SECP256R1 domain parameters
pub mod params;

// Elliptic curve primitives
pub mod ec;
pub use ec::{FieldElement, Point, Scalar};

// Deterministic random bit generation
pub mod drbg;
pub use drbg::{ChaChaDrbg, EntropySource};
#[cfg(feature = "std")]
pub use drbg::OsEntropy;

// Key generation and key agreement
pub mod ecdh;
pub use ecdh::{derive_shared_secret, generate_keypair, PublicKey, SecretKey, SharedSecret};
