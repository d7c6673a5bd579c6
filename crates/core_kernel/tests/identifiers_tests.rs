//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, ordering and display
//! formatting of the integer identifiers.

use core_kernel::{ClaimId, ClaimLineId, DocumentId, LecturerId};

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_value_round_trips_through_from() {
        let id = ClaimId::from(17u64);
        let raw: u64 = id.into();
        assert_eq!(raw, 17);
        assert_eq!(id.value(), 17);
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(ClaimId::new(2) > ClaimId::new(1));
        let mut ids = vec![ClaimId::new(3), ClaimId::new(1), ClaimId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ClaimId::new(1), ClaimId::new(2), ClaimId::new(3)]);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        assert_eq!("CLM-9".parse::<ClaimId>().unwrap(), ClaimId::new(9));
        assert_eq!("9".parse::<ClaimId>().unwrap(), ClaimId::new(9));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("CLM-abc".parse::<ClaimId>().is_err());
        assert!("".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ClaimId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: ClaimId = serde_json::from_str("5").unwrap();
        assert_eq!(back, ClaimId::new(5));
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn test_each_identifier_has_distinct_prefix() {
        let prefixes = [
            ClaimId::prefix(),
            ClaimLineId::prefix(),
            DocumentId::prefix(),
            LecturerId::prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(DocumentId::new(3).to_string(), "DOC-3");
        assert_eq!(LecturerId::new(12).to_string(), "LEC-12");
        assert_eq!(ClaimLineId::new(1).to_string(), "CLML-1");
    }
}
