use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::to_base36;
use crate::{Error, Result};

const PREFIX: &str = "session_";
const TOKEN_LEN: usize = 9;

/// Identifier of one page visit: `session_<epoch millis>_<9 base36 chars>`.
///
/// Unique enough to tell visits apart in one browser profile; not a security token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id for a visit that started at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self::from_parts(now.timestamp_millis(), &random_token())
    }

    pub fn from_parts(epoch_millis: i64, token: &str) -> Self {
        Self(format!("{}{}_{}", PREFIX, epoch_millis, token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Epoch millis encoded in the id, if the id has the generated shape.
    pub fn epoch_millis(&self) -> Option<i64> {
        let rest = self.0.strip_prefix(PREFIX)?;
        let (millis, _) = rest.split_once('_')?;
        millis.parse().ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let valid = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.split_once('_'))
            .is_some_and(|(millis, token)| {
                !millis.is_empty()
                    && millis.chars().all(|c| c.is_ascii_digit())
                    && !token.is_empty()
                    && token.chars().all(|c| c.is_ascii_alphanumeric())
            });

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidSessionId(s.to_string()))
        }
    }
}

fn random_token() -> String {
    let digits = to_base36(Uuid::new_v4().as_u128());
    // 122 random bits render to ~24 base36 digits; keep the low-order tail.
    let start = digits.len().saturating_sub(TOKEN_LEN);
    format!("{:0>width$}", &digits[start..], width = TOKEN_LEN)
}
