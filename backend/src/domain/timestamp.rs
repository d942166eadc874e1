//! Wire timestamps for defect records.
//!
//! Parsing and formatting are stateless and re-entrant; the wire format is
//! `yyyy-MM-dd HH:mm:ss` at second resolution.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A malformed timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {input}")]
pub struct ParseTimestampError {
    /// The rejected input, verbatim.
    pub input: String,
}

/// Point in time as exchanged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a timestamp from its wire representation.
    pub fn parse(value: &str) -> Result<Self, ParseTimestampError> {
        NaiveDateTime::parse_from_str(value, WIRE_FORMAT)
            .map(Self)
            .map_err(|_| ParseTimestampError {
                input: value.to_owned(),
            })
    }

    /// Render the wire representation.
    pub fn format(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.format()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ParseTimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn round_trips_through_the_wire_format() {
        let ts = Timestamp::parse("2015-10-03 12:34:56").expect("valid timestamp");
        assert_eq!(ts.format(), "2015-10-03 12:34:56");
        assert_eq!(Timestamp::parse(&ts.format()), Ok(ts));
    }

    #[test]
    fn orders_chronologically() {
        let earlier = Timestamp::parse("2001-01-15 03:01:01").expect("valid timestamp");
        let later = Timestamp::parse("2015-10-03 12:34:56").expect("valid timestamp");
        assert!(earlier < later);
    }

    #[rstest]
    #[case("2015-10-03")]
    #[case("2015-10-03T12:34:56")]
    #[case("03/10/2015 12:34:56")]
    #[case("not a date")]
    #[case("")]
    fn rejects_other_formats(#[case] raw: &str) {
        let err = Timestamp::parse(raw).expect_err("malformed timestamp");
        assert_eq!(err.input, raw);
    }
}
