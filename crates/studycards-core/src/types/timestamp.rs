// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 0001-01-01T00:00:00.000Z in milliseconds.
pub const MIN_MILLIS: i64 = -62_135_596_800_000;

/// 9999-12-31T23:59:59.999Z in milliseconds. Later years would be written
/// with a sign and more than four digits, which RFC 3339 cannot parse back.
pub const MAX_MILLIS: i64 = 253_402_300_799_999;

/// A UTC timestamp with millisecond precision, clamped to years 1 to 9999.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(dt: DateTime<Utc>) -> Self {
        let millis = dt.timestamp_millis().clamp(MIN_MILLIS, MAX_MILLIS);
        match DateTime::from_timestamp_millis(millis) {
            Some(clamped) => Self(clamped),
            None => Self(dt.trunc_subsecs(3)),
        }
    }

    /// The latest timestamp, 9999-12-31T23:59:59.999Z.
    pub fn latest() -> Self {
        Self::new(DateTime::<Utc>::MAX_UTC)
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// The current time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self::new)
    }

    pub fn millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Saturates at [`Timestamp::latest`].
    pub fn plus_days(self, days: u32) -> Self {
        let dt = self
            .0
            .checked_add_signed(Duration::days(days as i64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(dt)
    }

    /// Saturates at year 1.
    pub fn minus_days(self, days: u32) -> Self {
        let dt = self
            .0
            .checked_sub_signed(Duration::days(days as i64))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::new(dt)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let dt = DateTime::parse_from_rfc3339(&value).map_err(|_| {
            ErrorReport::validation(format!("Failed to parse timestamp: '{value}'."))
        })?;
        Ok(Timestamp::new(dt.with_timezone(&Utc)))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_timestamp_to_string() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123Z".to_string())?;
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123Z");
        Ok(())
    }

    #[test]
    fn test_truncates_to_millis() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123456789Z".to_string())?;
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123Z");
        Ok(())
    }

    #[test]
    fn test_offset_is_converted_to_utc() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.000-03:00".to_string())?;
        assert_eq!(ts.to_string(), "2023-10-05T17:30:15.000Z");
        Ok(())
    }

    #[test]
    fn test_invalid() {
        assert!(Timestamp::try_from("yesterday".to_string()).is_err());
        assert!(Timestamp::try_from("2023-10-05 14:30:15".to_string()).is_err());
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123Z".to_string())?;
        let serialized = serde_json::to_string(&ts)?;
        assert_eq!(serialized, "\"2023-10-05T14:30:15.123Z\"");
        let back: Timestamp = serde_json::from_str(&serialized)?;
        assert_eq!(back, ts);
        Ok(())
    }

    #[test]
    fn test_day_arithmetic() -> Fallible<()> {
        let ts = Timestamp::try_from("2024-02-28T08:00:00.000Z".to_string())?;
        assert_eq!(ts.plus_days(2).to_string(), "2024-03-01T08:00:00.000Z");
        assert_eq!(ts.minus_days(7).to_string(), "2024-02-21T08:00:00.000Z");
        assert!(ts.plus_days(1) > ts);
        assert!(ts.plus_days(u32::MAX) > ts);
        Ok(())
    }

    #[test]
    fn test_far_future_is_clamped() -> Fallible<()> {
        let ts = Timestamp::try_from("2024-01-01T12:00:00.000Z".to_string())?;
        let far = ts.plus_days(7_747_736);
        assert_eq!(far, Timestamp::latest());
        assert_eq!(far.to_string(), "9999-12-31T23:59:59.999Z");
        assert_eq!(Timestamp::try_from(far.to_string())?, far);
        assert_eq!(ts.plus_days(u32::MAX), far);
        Ok(())
    }

    #[test]
    fn test_far_past_is_clamped() -> Fallible<()> {
        let ts = Timestamp::try_from("2024-01-01T12:00:00.000Z".to_string())?;
        let early = ts.minus_days(u32::MAX);
        assert_eq!(early.to_string(), "0001-01-01T00:00:00.000Z");
        assert_eq!(Timestamp::try_from(early.to_string())?, early);
        Ok(())
    }

    #[test]
    fn test_extreme_millis_round_trip() -> Fallible<()> {
        for millis in [MIN_MILLIS, MAX_MILLIS, MAX_MILLIS + 1_000_000] {
            let ts = Timestamp::from_millis(millis).unwrap();
            assert!(ts.millis() <= MAX_MILLIS);
            assert_eq!(Timestamp::try_from(ts.to_string())?, ts);
        }
        Ok(())
    }

    #[test]
    fn test_millis() {
        let ts = Timestamp::from_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.millis(), 1_700_000_000_123);
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.123Z");
    }
}
