use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::Doctor;
use crate::error::ApiError;

/// Body for create and update. Update replaces the whole mutable field
/// set, so the two share one shape; callers resend everything they want
/// to keep.
#[derive(Debug, Deserialize)]
pub struct DoctorPayload {
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl DoctorPayload {
    /// Trim required fields and collapse blank optionals to absent.
    pub fn validate(&mut self) -> Result<(), ApiError> {
        self.name = self.name.trim().to_string();
        self.specialty = self.specialty.trim().to_string();
        if self.name.is_empty() || self.specialty.is_empty() {
            return Err(ApiError::validation("Name and specialty are required"));
        }
        self.phone = normalize_optional(self.phone.take());
        self.email = normalize_optional(self.email.take());
        self.address = normalize_optional(self.address.take());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Doctor> for DoctorView {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            name: d.name,
            specialty: d.specialty,
            phone: d.phone,
            email: d.email,
            address: d.address,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResponse {
    pub success: bool,
    pub doctor: DoctorView,
}

#[derive(Debug, Serialize)]
pub struct DoctorListResponse {
    pub success: bool,
    pub doctors: Vec<DoctorView>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, specialty: &str) -> DoctorPayload {
        DoctorPayload {
            name: name.into(),
            specialty: specialty.into(),
            phone: None,
            email: None,
            address: None,
        }
    }

    #[test]
    fn validate_requires_name_and_specialty() {
        assert!(payload("", "Cardiology").validate().is_err());
        assert!(payload("Dr. X", "   ").validate().is_err());
        assert!(payload("Dr. X", "Cardiology").validate().is_ok());
    }

    #[test]
    fn validate_trims_required_fields() {
        let mut p = payload("  Dr. X ", " Cardiology ");
        p.validate().unwrap();
        assert_eq!(p.name, "Dr. X");
        assert_eq!(p.specialty, "Cardiology");
    }

    #[test]
    fn blank_optionals_become_absent() {
        let mut p = payload("Dr. X", "Cardiology");
        p.phone = Some("   ".into());
        p.email = Some(String::new());
        p.address = Some("12 Main St".into());
        p.validate().unwrap();
        assert_eq!(p.phone, None);
        assert_eq!(p.email, None);
        assert_eq!(p.address.as_deref(), Some("12 Main St"));
    }

    #[test]
    fn missing_optionals_deserialize_as_none() {
        let p: DoctorPayload =
            serde_json::from_str(r#"{"name":"Dr. X","specialty":"Cardiology"}"#).unwrap();
        assert_eq!(p.phone, None);
        assert_eq!(p.email, None);
        assert_eq!(p.address, None);
    }

    #[test]
    fn doctor_view_serializes_camel_case() {
        let view = DoctorView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Dr. Smith".into(),
            specialty: "Cardiology".into(),
            phone: None,
            email: None,
            address: None,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
