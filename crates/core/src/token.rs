use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A validated skill credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillToken {
    /// Never empty
    pub token_id: String,
    pub skill_name: String,
    /// Minted within 1..=100, not enforced on read
    pub skill_level: u64,
    pub owner: String,
    pub endorsements: u64,
    /// Milliseconds since the epoch, string encoded
    pub created_at: String,
}

impl SkillToken {
    /// `created_at` as milliseconds, when it parses
    pub fn created_at_millis(&self) -> Option<i64> {
        self.created_at.trim().parse().ok()
    }

    /// `created_at` as a UTC timestamp
    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_at_millis()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(created_at: &str) -> SkillToken {
        SkillToken {
            token_id: "1".into(),
            skill_name: "Rust".into(),
            skill_level: 5,
            owner: "0xabc".into(),
            endorsements: 0,
            created_at: created_at.into(),
        }
    }

    #[test]
    fn test_created_date() {
        let date = token("1700000000000").created_date().unwrap();
        assert_eq!(date.timestamp(), 1_700_000_000);
        assert!(token("yesterday").created_date().is_none());
    }
}
