//! Hashing and identifier primitives for the multisig engine
//!
//! All records and principals in the engine are addressed by compact
//! base58check identifiers derived from SHA-256 digests. No signature
//! verification happens here: the host environment vouches for which
//! principals authorized a call, so this module only deals in identities,
//! never in keys.

pub mod hash;
pub mod ids;

pub use hash::{double_sha256, sha256, sha256_hex};
pub use ids::{
    decode_id, encode_id, id_version, random_principal, random_salt, IdError, VERSION_AUTHORITY,
    VERSION_PRINCIPAL, VERSION_RECORD,
};
