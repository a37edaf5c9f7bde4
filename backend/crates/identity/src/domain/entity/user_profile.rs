//! User Profile Entity
//!
//! The profile the mock provider issues on login. Every login starts from
//! the same template with the submitted identifier substituted in.
//!
//! Field names on the wire follow the provider's attribute names
//! (`firstname`, `lastnameEn`, `idn`, `uaepassUuid`, `dob`, ...).

use serde::{Deserialize, Serialize};

/// User profile entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastnameEn")]
    pub last_name_en: String,
    #[serde(rename = "fullnameEn")]
    pub full_name_en: String,
    pub email: String,
    pub mobile: String,
    #[serde(rename = "nationalityEn")]
    pub nationality_en: String,
    #[serde(rename = "nationalityAr")]
    pub nationality_ar: String,
    /// National ID number, as submitted by the user
    pub idn: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    /// Identifier assigned by the identity provider
    #[serde(rename = "uaepassUuid")]
    pub provider_uuid: String,
    pub gender: String,
    /// ISO date, `YYYY-MM-DD`
    #[serde(rename = "dob")]
    pub date_of_birth: String,
}

impl UserProfile {
    /// Canonical template profile
    pub fn template() -> Self {
        Self {
            first_name: "Ahmed".to_string(),
            last_name_en: "Al Mansoori".to_string(),
            full_name_en: "Ahmed Khalid Al Mansoori".to_string(),
            email: "ahmed.mansoori@email.ae".to_string(),
            mobile: "971501234567".to_string(),
            nationality_en: "United Arab Emirates".to_string(),
            nationality_ar: "الإمارات العربية المتحدة".to_string(),
            idn: "784-1990-1234567-1".to_string(),
            user_type: "SOP1".to_string(),
            provider_uuid: "uaepass-a1b2c3d4-e5f6-7890-abcd-ef1234567890".to_string(),
            gender: "Male".to_string(),
            date_of_birth: "1990-03-15".to_string(),
        }
    }

    /// Fresh profile for a login with `identifier`
    pub fn issue_for(identifier: &str) -> Self {
        Self {
            idn: identifier.to_string(),
            ..Self::template()
        }
    }
}
