//! Deterministic random bit generation for key material
//!
//! The generator state is a 32-byte seed key plus a block counter; output is
//! the ChaCha20 keystream for that key, as defined in RFC 8439. After every
//! request the seed key is ratcheted forward from the keystream itself, so a
//! captured state cannot reconstruct earlier outputs. Entropy comes in
//! through the [`EntropySource`] capability, which keeps the hardware hook
//! out of the core and makes the whole pipeline deterministic under test.
//!
//! Every top-level operation that needs randomness builds its own generator
//! from a fresh entropy draw and drops it before returning; instances are
//! never shared, reused across calls, or persisted.

use crate::error::{validate, Error, Result};
use crate::security::{EphemeralSecret, SecretBuffer};
use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Seed length consumed from the entropy source, and the minimum entropy
/// accepted by [`ChaChaDrbg::seed`]
pub const DRBG_SEED_SIZE: usize = 32;

/// Maximum number of bytes a single `next_bytes` call may request
pub const DRBG_MAX_REQUEST: usize = 1024;

/// Number of requests served before the generator demands a reseed
pub const DRBG_RESEED_INTERVAL: u64 = 10_000;

/// Size of one ChaCha20 keystream block in bytes
const BLOCK_SIZE: usize = 64;

/// The generator runs with a fixed zero nonce; freshness comes from the
/// seed key, which is unique per instance and ratcheted per request.
const ZERO_NONCE: [u8; 12] = [0u8; 12];

/// A source of cryptographically suitable random bytes
///
/// Implementations wrap whatever the platform provides (an OS syscall, a
/// hardware TRNG). Tests inject fixed-output sources to make key
/// generation reproducible.
pub trait EntropySource {
    /// Fill `dest` with entropy, or report why the source cannot
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Entropy source backed by the operating system RNG
#[cfg(feature = "std")]
pub struct OsEntropy;

#[cfg(feature = "std")]
impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        use rand::RngCore;

        rand::rngs::OsRng
            .try_fill_bytes(dest)
            .map_err(|_| Error::Entropy {
                context: "OS entropy source",
                reason: "operating system RNG unavailable",
            })
    }
}

/// Deterministic random bit generator over the ChaCha20 block function
///
/// State is (seed key, block counter, request count). The state is owned by
/// exactly one caller and zeroized on drop.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct ChaChaDrbg {
    key: SecretBuffer<DRBG_SEED_SIZE>,
    counter: u32,
    requests: u64,
}

impl ChaChaDrbg {
    /// Initialize the generator from caller-supplied entropy
    ///
    /// Requires at least [`DRBG_SEED_SIZE`] bytes of entropy; all supplied
    /// entropy is folded into the seed key, and the personalization string
    /// separates the output streams of otherwise identically seeded
    /// instances.
    pub fn seed(entropy: &[u8], personalization: &[u8]) -> Result<Self> {
        if entropy.len() < DRBG_SEED_SIZE {
            return Err(Error::Entropy {
                context: "DRBG seeding",
                reason: "at least 32 bytes of entropy are required",
            });
        }

        let mut key = [0u8; DRBG_SEED_SIZE];
        for (i, byte) in entropy.iter().enumerate() {
            key[i % DRBG_SEED_SIZE] ^= byte;
        }
        // Personalization lands rotated half a key apart from the entropy
        // so a pathological caller cannot cancel its own seed material.
        for (i, byte) in personalization.iter().enumerate() {
            key[(i + DRBG_SEED_SIZE / 2) % DRBG_SEED_SIZE] ^= byte;
        }

        let state = ChaChaDrbg {
            key: SecretBuffer::new(key),
            counter: 0,
            requests: 0,
        };
        key.zeroize();
        Ok(state)
    }

    /// Initialize the generator from an injected entropy source
    ///
    /// Draws a fresh [`DRBG_SEED_SIZE`]-byte seed; source failure surfaces
    /// as an entropy error.
    pub fn from_entropy_source<E: EntropySource>(
        source: &mut E,
        personalization: &[u8],
    ) -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; DRBG_SEED_SIZE]);
        source.fill(&mut *seed)?;
        Self::seed(&*seed, personalization)
    }

    /// Fill `dest` with deterministically generated bytes
    ///
    /// Fails once the reseed interval is reached (create a fresh instance
    /// or reseed) and for requests beyond [`DRBG_MAX_REQUEST`] bytes. On
    /// success the seed key is ratcheted forward so this output can never
    /// be regenerated from the surviving state.
    pub fn next_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        if self.requests >= DRBG_RESEED_INTERVAL {
            return Err(Error::Exhausted {
                context: "ChaCha DRBG",
            });
        }
        validate::max_length("DRBG request", dest.len(), DRBG_MAX_REQUEST)?;

        let mut block = EphemeralSecret::new([0u8; BLOCK_SIZE]);
        for chunk in dest.chunks_mut(BLOCK_SIZE) {
            Self::keystream_block(&self.key, self.counter, &ZERO_NONCE, block.as_mut());
            self.counter = self.counter.wrapping_add(1);
            chunk.copy_from_slice(&block.as_ref()[..chunk.len()]);
        }

        // Ratchet: the next keystream block becomes the new seed key
        Self::keystream_block(&self.key, self.counter, &ZERO_NONCE, block.as_mut());
        let mut new_key = [0u8; DRBG_SEED_SIZE];
        new_key.copy_from_slice(&block.as_ref()[..DRBG_SEED_SIZE]);
        self.key = SecretBuffer::new(new_key);
        new_key.zeroize();

        self.counter = 0;
        self.requests += 1;
        Ok(())
    }

    /// Number of requests served since seeding
    pub fn requests_served(&self) -> u64 {
        self.requests
    }

    /// The ChaCha20 quarter round function
    #[inline]
    fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
        state[a] = state[a].wrapping_add(state[b]);
        state[d] ^= state[a];
        state[d] = state[d].rotate_left(16);

        state[c] = state[c].wrapping_add(state[d]);
        state[b] ^= state[c];
        state[b] = state[b].rotate_left(12);

        state[a] = state[a].wrapping_add(state[b]);
        state[d] ^= state[a];
        state[d] = state[d].rotate_left(8);

        state[c] = state[c].wrapping_add(state[d]);
        state[b] ^= state[c];
        state[b] = state[b].rotate_left(7);
    }

    /// Generate one ChaCha20 keystream block (RFC 8439 state layout)
    fn keystream_block(
        key: &SecretBuffer<DRBG_SEED_SIZE>,
        counter: u32,
        nonce: &[u8; 12],
        out: &mut [u8; BLOCK_SIZE],
    ) {
        let mut state = EphemeralSecret::new([0u32; 16]);

        // "expand 32-byte k" in little-endian
        state[0] = 0x61707865;
        state[1] = 0x3320646e;
        state[2] = 0x79622d32;
        state[3] = 0x6b206574;

        // Key (8 words)
        let key_bytes = key.as_ref();
        for i in 0..8 {
            state[4 + i] = LittleEndian::read_u32(&key_bytes[i * 4..]);
        }

        // Counter (1 word)
        state[12] = counter;

        // Nonce (3 words)
        state[13] = LittleEndian::read_u32(&nonce[0..4]);
        state[14] = LittleEndian::read_u32(&nonce[4..8]);
        state[15] = LittleEndian::read_u32(&nonce[8..12]);

        let mut working_state = EphemeralSecret::new(*state.as_ref());

        // 20 rounds: 10 column rounds, 10 diagonal rounds
        for _ in 0..10 {
            Self::quarter_round(working_state.as_mut(), 0, 4, 8, 12);
            Self::quarter_round(working_state.as_mut(), 1, 5, 9, 13);
            Self::quarter_round(working_state.as_mut(), 2, 6, 10, 14);
            Self::quarter_round(working_state.as_mut(), 3, 7, 11, 15);

            Self::quarter_round(working_state.as_mut(), 0, 5, 10, 15);
            Self::quarter_round(working_state.as_mut(), 1, 6, 11, 12);
            Self::quarter_round(working_state.as_mut(), 2, 7, 8, 13);
            Self::quarter_round(working_state.as_mut(), 3, 4, 9, 14);
        }

        // Add the working state to the input state and serialize
        for i in 0..16 {
            let word = working_state[i].wrapping_add(state[i]);
            LittleEndian::write_u32(&mut out[i * 4..], word);
        }
    }
}

impl rand::RngCore for ChaChaDrbg {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        // A fresh per-call generator cannot reach its reseed interval, and
        // keypair draws stay far below the request cap.
        self.next_bytes(dest)
            .expect("generator must be reseeded before further output");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::CryptoRng for ChaChaDrbg {}
