//! P-256 scalar values for private keys and multipliers

use crate::ec::constants::SCALAR_SIZE;
use crate::error::{validate, Error, Result};
use crate::params::SECP256R1;
use crate::security::SecretBuffer;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// P-256 scalar value for use in elliptic curve operations
///
/// Represents integers in [1, n-1] where n is the curve order. Used for
/// private keys and scalar multiplication. Automatically zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Debug)]
pub struct Scalar(SecretBuffer<SCALAR_SIZE>);

impl Scalar {
    /// Create a scalar from raw bytes with modular reduction
    ///
    /// Performs modular reduction if the input is >= n and rejects a zero
    /// result; the caller redraws on rejection rather than retrying here.
    pub fn new(mut data: [u8; SCALAR_SIZE]) -> Result<Self> {
        Self::reduce_scalar_bytes(&mut data)?;
        Ok(Scalar(SecretBuffer::new(data)))
    }

    /// Create a scalar from an existing SecretBuffer
    ///
    /// Performs the same validation and reduction as `new()` but starts
    /// from a SecretBuffer instead of a raw byte array.
    pub fn from_secret_buffer(buffer: SecretBuffer<SCALAR_SIZE>) -> Result<Self> {
        let mut bytes = [0u8; SCALAR_SIZE];
        bytes.copy_from_slice(buffer.as_ref());

        Self::reduce_scalar_bytes(&mut bytes)?;
        Ok(Scalar(SecretBuffer::new(bytes)))
    }

    /// Access the underlying SecretBuffer containing the scalar value
    pub fn as_secret_buffer(&self) -> &SecretBuffer<SCALAR_SIZE> {
        &self.0
    }

    /// Serialize the scalar to big-endian bytes
    pub fn serialize(&self) -> [u8; SCALAR_SIZE] {
        let mut result = [0u8; SCALAR_SIZE];
        result.copy_from_slice(self.0.as_ref());
        result
    }

    /// Deserialize a scalar from bytes with validation
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        validate::length("P-256 Scalar", bytes.len(), SCALAR_SIZE)?;

        let mut scalar_bytes = [0u8; SCALAR_SIZE];
        scalar_bytes.copy_from_slice(bytes);

        Self::new(scalar_bytes)
    }

    /// Check if the scalar represents zero
    pub fn is_zero(&self) -> bool {
        self.0.as_ref().iter().all(|&b| b == 0)
    }

    /// Reduce scalar bytes modulo the curve order n
    ///
    /// Algorithm:
    /// 1. Reject a zero input
    /// 2. Compare with the curve order without early exit
    /// 3. Conditionally subtract n if input >= n
    /// 4. Reject a zero result
    fn reduce_scalar_bytes(bytes: &mut [u8; SCALAR_SIZE]) -> Result<()> {
        let order = &SECP256R1.n;

        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::param("P-256 Scalar", "Scalar cannot be zero"));
        }

        // Lexicographic comparison with the order, scanning every byte
        let mut gt = 0u8; // set if bytes > order
        let mut lt = 0u8; // set if bytes < order

        for i in 0..SCALAR_SIZE {
            let x = bytes[i];
            let y = order[i];
            gt |= ((x > y) as u8) & (!lt);
            lt |= ((x < y) as u8) & (!gt);
        }
        let ge = gt | ((!lt) & 1); // not less ⇒ greater or equal

        if ge == 1 {
            // One subtraction suffices since the input is < 2n
            let mut borrow = 0u16;
            let mut reduced = *bytes;

            for i in (0..SCALAR_SIZE).rev() {
                let diff = (reduced[i] as i16) - (order[i] as i16) - (borrow as i16);
                if diff < 0 {
                    reduced[i] = (diff + 256) as u8;
                    borrow = 1;
                } else {
                    reduced[i] = diff as u8;
                    borrow = 0;
                }
            }

            *bytes = reduced;
        }

        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::param(
                "P-256 Scalar",
                "Reduction resulted in zero scalar",
            ));
        }

        Ok(())
    }
}
