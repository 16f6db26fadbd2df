//! Intake DTOs

use serde::Serialize;

/// Success envelope for the intake endpoint
///
/// Honeypot submissions answer with the bare `{ok:true}` form; real
/// submissions carry the stored id and the external contact id.
#[derive(Debug, Serialize)]
pub struct IntakeAccepted {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "contactId", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

impl IntakeAccepted {
    /// Submission stored and synced
    pub fn synced(id: String, contact_id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            contact_id: Some(contact_id),
        }
    }

    /// Honeypot no-op: success with nothing persisted, so automated
    /// submitters learn nothing
    pub fn discarded() -> Self {
        Self {
            ok: true,
            id: None,
            contact_id: None,
        }
    }
}
