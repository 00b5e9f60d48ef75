//! Derived signing authority
//!
//! Every group has exactly one authority identifier, derived from its record
//! id and salt. The derivation is pure and collision-resistant, and the
//! authority version byte is disjoint from the principal id space, so an
//! authority can never be presented as an independently-controlled key.
//! Control over it is therefore gated entirely by the engine's execution
//! path: the executor is the only code that ever acts under this identity.

use crate::crypto::{encode_id, id_version, VERSION_AUTHORITY};
use crate::engine::group::Group;

/// Domain separation tag for authority derivation
const AUTHORITY_TAG: &[u8] = b"quorumsig/authority/v1";

/// Derive the authority identifier for a group id and salt
pub fn derive_authority(group_id: &str, salt: &[u8]) -> String {
    let mut data = AUTHORITY_TAG.to_vec();
    data.extend_from_slice(group_id.as_bytes());
    data.extend_from_slice(salt);
    encode_id(VERSION_AUTHORITY, &data)
}

/// Authority identifier for a group record
pub fn authority_for(group: &Group) -> String {
    derive_authority(&group.id, &group.salt)
}

/// Check whether an identifier lies in the authority id space
pub fn is_authority_id(id: &str) -> bool {
    id_version(id) == Some(VERSION_AUTHORITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{random_principal, VERSION_PRINCIPAL};

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_authority("group-id", b"salt");
        let b = derive_authority("group-id", b"salt");
        assert_eq!(a, b);
    }

    #[test]
    fn test_derivation_varies_with_inputs() {
        let base = derive_authority("group-id", b"salt");
        assert_ne!(base, derive_authority("other-id", b"salt"));
        assert_ne!(base, derive_authority("group-id", b"other salt"));
    }

    #[test]
    fn test_authority_space_disjoint_from_principals() {
        let authority = derive_authority("group-id", b"salt");
        let principal = random_principal();

        assert!(is_authority_id(&authority));
        assert!(!is_authority_id(&principal));
        assert_eq!(id_version(&principal), Some(VERSION_PRINCIPAL));
    }

    #[test]
    fn test_authority_for_group() {
        let owners = vec![random_principal(), random_principal()];
        let group = Group::new(owners, 1, vec![5; 16]).unwrap();

        let authority = authority_for(&group);
        assert_eq!(authority, derive_authority(&group.id, &group.salt));
    }
}
