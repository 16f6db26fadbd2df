//! Normalization tests
//!
//! Covers alias resolution, cleaning, honeypot detection, required-field
//! enforcement, and defaulting across the payload shapes the landing pages
//! actually send.

use domain_intake::normalize::{
    DEFAULT_BUSINESS_NAME, DEFAULT_GOAL, DEFAULT_PREFERRED_FOLLOWUP, DEFAULT_SOURCE,
};
use domain_intake::{clean, is_honeypot, normalize, ValidationError};
use serde_json::json;

mod alias_resolution {
    use super::*;

    /// Every aliased field resolves from its camelCase spelling
    #[test]
    fn camel_case_variants_are_accepted() {
        let payload = json!({
            "firstName": "Ana",
            "lastName": "Reyes",
            "email": "ana@example.com",
            "phone": "+1 555 0100",
            "businessName": "Reyes Consulting",
            "goal": "Answer after-hours calls",
            "otherInfo": "Referred by a client",
            "preferredFollowup": "call",
        });

        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.first_name, "Ana");
        assert_eq!(normalized.last_name, "Reyes");
        assert_eq!(normalized.business_name, "Reyes Consulting");
        assert_eq!(normalized.other_info, "Referred by a client");
        assert_eq!(normalized.preferred_followup, "call");
    }

    /// Mixed-convention payloads resolve each field independently
    #[test]
    fn snake_and_camel_can_mix() {
        let payload = json!({
            "first_name": "Ana",
            "lastName": "Reyes",
            "email": "ana@example.com",
        });

        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.first_name, "Ana");
        assert_eq!(normalized.last_name, "Reyes");
    }
}

mod validation {
    use super::*;

    #[test]
    fn missing_first_name_is_rejected() {
        let payload = json!({"email": "a@x.com"});
        assert_eq!(
            normalize(&payload),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn missing_email_is_rejected() {
        let payload = json!({"first_name": "Ana"});
        assert_eq!(
            normalize(&payload),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let payload = json!({"first_name": "", "email": "a@x.com"});
        assert_eq!(
            normalize(&payload),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn values_are_trimmed() {
        let payload = json!({
            "first_name": "  Ana  ",
            "email": " a@x.com ",
            "phone": "\t555-0100\n",
        });
        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.first_name, "Ana");
        assert_eq!(normalized.email, "a@x.com");
        assert_eq!(normalized.phone, "555-0100");
    }
}

mod defaults {
    use super::*;

    /// Optional-but-expected fields get sentinel placeholders, not blanks
    #[test]
    fn sentinels_for_omitted_fields() {
        let normalized = normalize(&json!({"first_name": "Ana", "email": "a@x.com"})).unwrap();
        assert_eq!(normalized.business_name, DEFAULT_BUSINESS_NAME);
        assert_eq!(normalized.goal, DEFAULT_GOAL);
        assert_eq!(normalized.preferred_followup, DEFAULT_PREFERRED_FOLLOWUP);
        assert_eq!(normalized.source, DEFAULT_SOURCE);
    }

    #[test]
    fn supplied_values_override_sentinels() {
        let payload = json!({
            "first_name": "Ana",
            "email": "a@x.com",
            "business_name": "Acme",
            "goal": "Book appointments",
            "preferred_followup": "email",
            "source": "landing:variant-b",
        });
        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.business_name, "Acme");
        assert_eq!(normalized.goal, "Book appointments");
        assert_eq!(normalized.preferred_followup, "email");
        assert_eq!(normalized.source, "landing:variant-b");
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[ -~]{0,24}".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
                prop::collection::hash_map("[a-zA-Z_]{1,12}", inner, 0..4)
                    .prop_map(|m| serde_json::Value::from(serde_json::Map::from_iter(m))),
            ]
        })
    }

    proptest! {
        /// Cleaning and honeypot checks are total over arbitrary JSON
        #[test]
        fn normalize_never_panics(payload in arbitrary_json()) {
            let _ = normalize(&payload);
            let _ = is_honeypot(&payload);
        }

        /// Cleaned values never carry surrounding whitespace
        #[test]
        fn clean_always_trims(s in "[ -~]{0,32}") {
            let value = serde_json::Value::from(s);
            let cleaned = clean(Some(&value));
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }

        /// A payload with non-blank required fields always normalizes
        #[test]
        fn required_fields_suffice(first in "[A-Za-z]{1,16}", email in "[a-z]{1,8}@[a-z]{1,8}\\.com") {
            let payload = serde_json::json!({"first_name": first, "email": email});
            prop_assert!(normalize(&payload).is_ok());
        }
    }
}

#[test]
fn clean_handles_scalar_variants() {
    assert_eq!(clean(None), "");
    assert_eq!(clean(Some(&json!(null))), "");
    assert_eq!(clean(Some(&json!(42))), "42");
    assert_eq!(clean(Some(&json!(true))), "true");
    assert_eq!(clean(Some(&json!("  padded  "))), "padded");
}
