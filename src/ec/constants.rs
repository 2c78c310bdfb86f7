//! Shared constants for P-256 operations

/// Size of a P-256 scalar in bytes (32 bytes = 256 bits)
pub const SCALAR_SIZE: usize = 32;

/// Size of a P-256 field element in bytes (32 bytes = 256 bits)
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an uncompressed P-256 point in bytes: format byte (0x04) + x-coordinate + y-coordinate
pub const POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * FIELD_ELEMENT_SIZE; // 65 bytes: 0x04 || x || y

/// Size of a raw ECDH shared secret in bytes (the x-coordinate)
pub const SHARED_SECRET_SIZE: usize = FIELD_ELEMENT_SIZE;
