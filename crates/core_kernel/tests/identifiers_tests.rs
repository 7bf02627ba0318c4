//! Tests for strongly-typed identifiers

use core_kernel::ClaimId;
use proptest::prelude::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_claim_id_display_includes_prefix() {
    let id = ClaimId::new();
    let display = id.to_string();
    assert!(display.starts_with("CLM-"));
}

#[test]
fn test_claim_id_parse_with_prefix() {
    let id = ClaimId::new();
    let parsed = ClaimId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_claim_id_parse_bare_uuid() {
    let uuid = Uuid::new_v4();
    let parsed = ClaimId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_claim_id_v7_is_time_ordered() {
    // v7 identifiers sort by creation time, which the claim list relies on
    let a = ClaimId::new_v7();
    let b = ClaimId::new_v7();
    assert!(b.as_uuid() >= a.as_uuid());
}

#[test]
fn test_claim_id_serde_transparent() {
    let id = ClaimId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));

    let back: ClaimId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn test_claim_id_uuid_round_trip() {
    let uuid = Uuid::new_v4();
    let id = ClaimId::from_uuid(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

proptest! {
    #[test]
    fn prop_display_parses_back_for_any_uuid(bytes in any::<[u8; 16]>()) {
        let id = ClaimId::from_uuid(Uuid::from_bytes(bytes));
        let parsed = ClaimId::from_str(&id.to_string()).unwrap();
        prop_assert_eq!(id, parsed);
    }
}
