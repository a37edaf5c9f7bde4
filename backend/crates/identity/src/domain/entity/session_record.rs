//! Session Record Entity
//!
//! Persisted proof of login: profile, token and timestamps.
//!
//! `expires_at` is descriptive only. Nothing expires a record; it lives until
//! logout or until the slot is cleared by hand.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::value_object::session_token::SessionToken;

/// Session record entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub profile: UserProfile,
    pub token: SessionToken,
    #[serde(with = "iso_millis")]
    pub login_time: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record logged in now
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(profile: UserProfile, token: SessionToken, ttl: Duration) -> Self {
        Self::issued_at(profile, token, Utc::now(), ttl)
    }

    /// Create a record logged in at `login_time` (truncated to milliseconds)
    pub fn issued_at(
        profile: UserProfile,
        token: SessionToken,
        login_time: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let login_time = login_time.trunc_subsecs(3);

        Self {
            profile,
            token,
            login_time,
            expires_at: login_time + ttl,
        }
    }

    /// Token and timestamp projection
    pub fn info(&self) -> SessionInfo {
        SessionInfo::from(self)
    }
}

/// Session info projection (no profile)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub token: SessionToken,
    #[serde(with = "iso_millis")]
    pub login_time: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub expires_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Lifetime the record was issued with
    pub fn ttl(&self) -> Duration {
        self.expires_at - self.login_time
    }

    /// Time left before the descriptive expiry, floored at zero
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    /// Display hint only; the session stays valid
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

impl From<&SessionRecord> for SessionInfo {
    fn from(record: &SessionRecord) -> Self {
        Self {
            token: record.token.clone(),
            login_time: record.login_time,
            expires_at: record.expires_at,
        }
    }
}

/// RFC 3339 UTC with exactly three fractional digits, e.g. `2026-10-17T08:00:00.000Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_record() -> SessionRecord {
        let login_time = Utc
            .with_ymd_and_hms(2026, 10, 17, 8, 0, 0)
            .single()
            .unwrap();
        SessionRecord::issued_at(
            UserProfile::template(),
            SessionToken::from_string("mock_jwt_abc"),
            login_time,
            Duration::hours(1),
        )
    }

    #[test]
    fn test_expiry_is_login_time_plus_ttl() {
        let record = SessionRecord::new(
            UserProfile::template(),
            SessionToken::from_string("mock_jwt_abc"),
            Duration::hours(1),
        );
        assert_eq!(record.expires_at - record.login_time, Duration::hours(1));
        assert_eq!(record.login_time.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_persisted_layout() {
        let json = serde_json::to_value(fixed_record()).unwrap();

        assert_eq!(json["token"], "mock_jwt_abc");
        assert_eq!(json["loginTime"], "2026-10-17T08:00:00.000Z");
        assert_eq!(json["expiresAt"], "2026-10-17T09:00:00.000Z");
        assert_eq!(json["profile"]["idn"], "784-1990-1234567-1");
    }

    #[test]
    fn test_reads_browser_written_record() {
        let raw = r#"{
            "profile": {
                "firstname": "Ahmed", "lastnameEn": "Al Mansoori",
                "fullnameEn": "Ahmed Khalid Al Mansoori", "email": "ahmed.mansoori@email.ae",
                "mobile": "971501234567", "nationalityEn": "United Arab Emirates",
                "nationalityAr": "الإمارات العربية المتحدة", "idn": "784-1990-1234567-1",
                "userType": "SOP1", "uaepassUuid": "uaepass-a1b2c3d4-e5f6-7890-abcd-ef1234567890",
                "gender": "Male", "dob": "1990-03-15"
            },
            "token": "mock_jwt_0123456789abcdefABCDEF0123456789",
            "loginTime": "2026-10-17T08:00:00.250Z",
            "expiresAt": "2026-10-17T09:00:00.250Z"
        }"#;

        let record: SessionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.profile, UserProfile::template());
        assert_eq!(record.info().ttl(), Duration::hours(1));
    }

    #[test]
    fn test_session_info_remaining() {
        let info = fixed_record().info();

        let half_way = info.login_time + Duration::minutes(30);
        assert_eq!(info.remaining(half_way), Duration::minutes(30));
        assert!(!info.is_past_expiry(half_way));

        let later = info.expires_at + Duration::minutes(5);
        assert_eq!(info.remaining(later), Duration::zero());
        assert!(info.is_past_expiry(later));
    }
}
