//! Base58check identifiers for principals, records, and authorities
//!
//! Identifier = Base58(version || SHA256(data)[..20] || checksum), where the
//! checksum is the first 4 bytes of double SHA-256 over version + payload.
//! Each identifier class carries its own version byte, so a principal id can
//! never parse as an authority id and vice versa. That disjointness is what
//! lets the host treat authority identifiers as "provably not a key": nothing
//! outside the engine can present one as a signing identity.

use crate::crypto::hash::{double_sha256, sha256};
use rand::RngCore;
use thiserror::Error;

/// Version byte for principal (owner/successor/target) identifiers
pub const VERSION_PRINCIPAL: u8 = 0x00;
/// Version byte for group and proposal record identifiers
pub const VERSION_RECORD: u8 = 0x0c;
/// Version byte for engine-derived authority identifiers
pub const VERSION_AUTHORITY: u8 = 0x23;

/// Length of the hashed payload inside an identifier
const PAYLOAD_LEN: usize = 20;
/// Length of the base58check checksum suffix
const CHECKSUM_LEN: usize = 4;

/// Errors from identifier parsing
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid base58 encoding")]
    InvalidEncoding,
    #[error("Invalid identifier length: {0}")]
    InvalidLength(usize),
    #[error("Checksum mismatch")]
    ChecksumMismatch,
}

/// Encode arbitrary bytes into an identifier under the given version byte
pub fn encode_id(version: u8, data: &[u8]) -> String {
    let digest = sha256(data);

    let mut bytes = Vec::with_capacity(1 + PAYLOAD_LEN + CHECKSUM_LEN);
    bytes.push(version);
    bytes.extend_from_slice(&digest[..PAYLOAD_LEN]);

    let checksum = double_sha256(&bytes);
    bytes.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    bs58::encode(bytes).into_string()
}

/// Decode an identifier, returning its version byte and payload
pub fn decode_id(id: &str) -> Result<(u8, Vec<u8>), IdError> {
    let bytes = bs58::decode(id)
        .into_vec()
        .map_err(|_| IdError::InvalidEncoding)?;

    if bytes.len() != 1 + PAYLOAD_LEN + CHECKSUM_LEN {
        return Err(IdError::InvalidLength(bytes.len()));
    }

    let (body, checksum) = bytes.split_at(1 + PAYLOAD_LEN);
    if double_sha256(body)[..CHECKSUM_LEN] != *checksum {
        return Err(IdError::ChecksumMismatch);
    }

    Ok((body[0], body[1..].to_vec()))
}

/// Version byte of an identifier, if it parses at all
pub fn id_version(id: &str) -> Option<u8> {
    decode_id(id).ok().map(|(version, _)| version)
}

/// Generate a fresh random principal identifier
///
/// Stands in for host-side key generation. The engine never sees the key
/// material behind a principal, only this identifier.
pub fn random_principal() -> String {
    let mut seed = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    encode_id(VERSION_PRINCIPAL, &seed)
}

/// Generate a random derivation salt for a new group
pub fn random_salt() -> Vec<u8> {
    let mut salt = vec![0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
