//! Validation of untrusted ledger responses.
//!
//! The view call returns loosely typed JSON. Records are validated one by one:
//! a record without an id is dropped with a warning and never takes its siblings
//! down with it. Only a response that is not a list at all is an error.

use crate::error::{Error, Result};
use crate::token::SkillToken;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single record was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("record is not an object")]
    NotAnObject,

    #[error("record has no token id")]
    MissingTokenId,
}

/// Validates the raw `get_user_tokens` response.
///
/// `null` is an empty collection; anything that is not a list is
/// `InvalidResponseFormat`.
pub fn validate_response(raw: &Value) -> Result<Vec<SkillToken>> {
    log_shape(raw);

    let records = match raw {
        Value::Null => return Ok(Vec::new()),
        Value::Array(records) => records,
        other => {
            warn!(target: "skilltoken", response = %other, "unexpected response format");
            return Err(Error::InvalidResponseFormat);
        }
    };

    let tokens: Vec<SkillToken> = records
        .iter()
        .filter(|record| !record.is_null())
        .filter_map(|record| match validate_token(record) {
            Ok(token) => Some(token),
            Err(reason) => {
                warn!(target: "skilltoken", %reason, %record, "rejected token record");
                None
            }
        })
        .collect();

    debug!(
        target: "skilltoken",
        received = records.len(),
        accepted = tokens.len(),
        "validated token records"
    );
    Ok(tokens)
}

/// Validates one raw record.
///
/// Only a missing id rejects a record. A count that is not a non-negative
/// integer is read as 0.
pub fn validate_token(raw: &Value) -> std::result::Result<SkillToken, RejectReason> {
    let record = raw.as_object().ok_or(RejectReason::NotAnObject)?;

    let token_id = field(record, "token_id").map(coerce_string).unwrap_or_default();
    if token_id.is_empty() {
        return Err(RejectReason::MissingTokenId);
    }

    Ok(SkillToken {
        skill_name: field(record, "skill_name").map(coerce_string).unwrap_or_default(),
        skill_level: numeric_field(record, "skill_level", &token_id),
        owner: field(record, "owner").map(coerce_string).unwrap_or_default(),
        endorsements: numeric_field(record, "endorsements", &token_id),
        // a present `null` is kept as written
        created_at: record
            .get("created_at")
            .map(coerce_string)
            .unwrap_or_else(now_millis),
        token_id,
    })
}

/// A field counts as present unless missing or `null`
fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

fn numeric_field(record: &Map<String, Value>, key: &str, token_id: &str) -> u64 {
    let Some(value) = field(record, key) else {
        return 0;
    };
    coerce_u64(value).unwrap_or_else(|| {
        warn!(target: "skilltoken", token_id, field = key, %value, "malformed count read as 0");
        0
    })
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(0);
            }
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    }
}

fn integral(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

fn now_millis() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn log_shape(raw: &Value) {
    match raw {
        Value::Array(items) => debug!(
            target: "skilltoken",
            kind = "array",
            len = items.len(),
            first = ?items.first(),
            "token response shape"
        ),
        Value::Null => debug!(target: "skilltoken", kind = "null", "token response shape"),
        other => debug!(target: "skilltoken", kind = value_kind(other), "token response shape"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
