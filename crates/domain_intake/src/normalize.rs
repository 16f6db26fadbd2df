//! Inbound payload normalization
//!
//! Landing page variants submit the same form with different field casing,
//! so each contact field accepts a snake_case canonical name and a camelCase
//! alias. Normalization resolves the aliases once into a fixed struct.
//!
//! # Rules
//!
//! - Canonical name wins when both spellings are present; JSON `null` counts
//!   as absent.
//! - Every value is cleaned: stringified and whitespace-trimmed, with
//!   null/absent becoming the empty string.
//! - `website_hp` is a honeypot; any truthy value means the submission came
//!   from an automated submitter and must be silently discarded.
//! - `first_name` and `email` are required to be non-empty after cleaning.
//! - `business_name`, `goal`, and `preferred_followup` receive sentinel
//!   defaults when empty; some landing pages intentionally omit them.

use serde_json::Value;

use crate::error::ValidationError;

/// Honeypot field name; hidden on the form, so only bots fill it
pub const HONEYPOT_FIELD: &str = "website_hp";

/// Default origin tag when the payload carries no `source`
pub const DEFAULT_SOURCE: &str = "web:intake";

/// Sentinel for submissions without a business name
pub const DEFAULT_BUSINESS_NAME: &str = "(personal)";

/// Sentinel for submissions without a stated goal
pub const DEFAULT_GOAL: &str = "Inbound interest";

/// Default follow-up channel
pub const DEFAULT_PREFERRED_FOLLOWUP: &str = "text";

/// Canonical field name to accepted camelCase alias, in resolution order
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("business_name", "businessName"),
    ("other_info", "otherInfo"),
    ("preferred_followup", "preferredFollowup"),
];

/// A submission payload after alias resolution, cleaning, and defaulting
///
/// All fields are plain strings; optional fields that the payload omitted
/// hold either the empty string or their sentinel default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub goal: String,
    pub other_info: String,
    pub preferred_followup: String,
    pub source: String,
}

/// Cleans a raw JSON value into a trimmed string
///
/// Absent and `null` values become the empty string. Non-string scalars are
/// stringified, matching how loosely-typed form clients submit numbers and
/// booleans.
pub fn clean(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Returns true when the honeypot field carries any truthy value
pub fn is_honeypot(payload: &Value) -> bool {
    payload.get(HONEYPOT_FIELD).is_some_and(is_truthy)
}

/// JSON truthiness as form clients understand it
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Looks a field up by canonical name, falling back to its alias
///
/// `null` is treated as absent in both positions.
fn field<'a>(payload: &'a Value, canonical: &str) -> Option<&'a Value> {
    let direct = payload.get(canonical).filter(|v| !v.is_null());
    direct.or_else(|| {
        FIELD_ALIASES
            .iter()
            .find(|(name, _)| *name == canonical)
            .and_then(|(_, alias)| payload.get(alias))
            .filter(|v| !v.is_null())
    })
}

/// Normalizes an inbound payload into a [`NormalizedSubmission`]
///
/// # Errors
///
/// Returns [`ValidationError::MissingRequiredFields`] when `first_name` or
/// `email` is empty after cleaning. A non-object payload has no fields and
/// fails the same check.
pub fn normalize(payload: &Value) -> Result<NormalizedSubmission, ValidationError> {
    let first_name = clean(field(payload, "first_name"));
    let email = clean(field(payload, "email"));

    if first_name.is_empty() || email.is_empty() {
        return Err(ValidationError::MissingRequiredFields);
    }

    let mut business_name = clean(field(payload, "business_name"));
    if business_name.is_empty() {
        business_name = DEFAULT_BUSINESS_NAME.to_string();
    }

    let mut goal = clean(field(payload, "goal"));
    if goal.is_empty() {
        goal = DEFAULT_GOAL.to_string();
    }

    let mut preferred_followup = clean(field(payload, "preferred_followup"));
    if preferred_followup.is_empty() {
        preferred_followup = DEFAULT_PREFERRED_FOLLOWUP.to_string();
    }

    let mut source = clean(field(payload, "source"));
    if source.is_empty() {
        source = DEFAULT_SOURCE.to_string();
    }

    Ok(NormalizedSubmission {
        first_name,
        last_name: clean(field(payload, "last_name")),
        email,
        phone: clean(field(payload, "phone")),
        business_name,
        goal,
        other_info: clean(field(payload, "other_info")),
        preferred_followup,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_name_wins_over_alias() {
        let payload = json!({
            "first_name": "Ana",
            "firstName": "Ignored",
            "email": "a@x.com",
        });
        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.first_name, "Ana");
    }

    #[test]
    fn null_canonical_falls_back_to_alias() {
        let payload = json!({
            "first_name": null,
            "firstName": "Ana",
            "email": "a@x.com",
        });
        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.first_name, "Ana");
    }

    #[test]
    fn honeypot_truthiness() {
        assert!(is_honeypot(&json!({"website_hp": "1"})));
        assert!(is_honeypot(&json!({"website_hp": true})));
        assert!(is_honeypot(&json!({"website_hp": 1})));
        assert!(is_honeypot(&json!({"website_hp": {"filled": "by bot"}})));
        assert!(!is_honeypot(&json!({"website_hp": ""})));
        assert!(!is_honeypot(&json!({"website_hp": 0})));
        assert!(!is_honeypot(&json!({"website_hp": null})));
        assert!(!is_honeypot(&json!({"first_name": "Ana"})));
    }

    #[test]
    fn whitespace_only_required_field_is_rejected() {
        let payload = json!({"first_name": "   ", "email": "a@x.com"});
        assert_eq!(
            normalize(&payload),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert_eq!(
            normalize(&json!("just a string")),
            Err(ValidationError::MissingRequiredFields)
        );
        assert_eq!(
            normalize(&json!(["first_name", "Ana"])),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn defaults_applied_to_optional_fields() {
        let payload = json!({"first_name": "Ana", "email": "a@x.com"});
        let normalized = normalize(&payload).unwrap();
        assert_eq!(normalized.business_name, DEFAULT_BUSINESS_NAME);
        assert_eq!(normalized.goal, DEFAULT_GOAL);
        assert_eq!(normalized.preferred_followup, DEFAULT_PREFERRED_FOLLOWUP);
        assert_eq!(normalized.source, DEFAULT_SOURCE);
        assert_eq!(normalized.last_name, "");
        assert_eq!(normalized.phone, "");
    }
}
