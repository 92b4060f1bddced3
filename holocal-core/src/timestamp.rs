//! Conversion between the store's wire timestamps and epoch milliseconds.
//!
//! The store encodes instants as `[seconds, nanoseconds]`. Everything above
//! the zome layer works in milliseconds since the Unix epoch, and this module
//! is the only place that constructs or interprets a [`RemoteTimestamp`].

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{CalendarError, CalendarResult};

const MILLIS_PER_SEC: i64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Wire timestamp: whole seconds since the epoch plus a nanosecond offset.
///
/// Both halves are kept as raw JSON numbers so that out-of-range values sent
/// by the store reach [`from_wire`] and fail there as decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTimestamp(Number, Number);

impl RemoteTimestamp {
    pub fn new(secs: i64, nanos: u32) -> Self {
        RemoteTimestamp(Number::from(secs), Number::from(nanos))
    }
}

/// Encode epoch milliseconds for the wire. Total over `i64`.
pub fn to_wire(ms: i64) -> RemoteTimestamp {
    let secs = ms.div_euclid(MILLIS_PER_SEC);
    // rem_euclid is always in 0..1000
    let millis = ms.rem_euclid(MILLIS_PER_SEC) as u32;
    RemoteTimestamp::new(secs, millis * NANOS_PER_MILLI as u32)
}

/// Decode a wire timestamp into epoch milliseconds.
///
/// Fails rather than truncating when either half is not an integer in range,
/// when the nanosecond part carries sub-millisecond precision, or when the
/// instant does not fit `i64`.
pub fn from_wire(t: &RemoteTimestamp) -> CalendarResult<i64> {
    let RemoteTimestamp(secs, nanos) = t;

    let Some(secs) = secs.as_i64() else {
        return Err(CalendarError::Decode(format!(
            "seconds field {secs} is not a 64-bit integer"
        )));
    };
    let nanos = match nanos.as_u64() {
        Some(n) if n < NANOS_PER_SEC => n,
        _ => {
            return Err(CalendarError::Decode(format!(
                "nanosecond field {nanos} is not in 0..1000000000"
            )));
        }
    };
    if nanos % NANOS_PER_MILLI != 0 {
        return Err(CalendarError::Decode(format!(
            "timestamp [{secs}, {nanos}] has sub-millisecond precision"
        )));
    }

    let ms = i128::from(secs) * i128::from(MILLIS_PER_SEC) + i128::from(nanos / NANOS_PER_MILLI);
    i64::try_from(ms).map_err(|_| {
        CalendarError::Decode(format!(
            "timestamp [{secs}, {nanos}] is outside the millisecond range"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> RemoteTimestamp {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_round_trip_exact() {
        for ms in [
            0,
            1,
            999,
            1_000,
            1_700_000_000_000,
            1_700_003_600_123,
            -1,
            -999,
            -1_001,
            i64::MAX,
            i64::MIN,
        ] {
            assert_eq!(from_wire(&to_wire(ms)).unwrap(), ms, "round trip of {ms}");
        }
    }

    #[test]
    fn test_to_wire_splits_seconds_and_nanos() {
        assert_eq!(to_wire(1_700_000_000_250), RemoteTimestamp::new(1_700_000_000, 250_000_000));
        // Negative instants floor towards the past
        assert_eq!(to_wire(-1), RemoteTimestamp::new(-1, 999_000_000));
    }

    #[test]
    fn test_from_wire_rejects_sub_millisecond_precision() {
        let err = from_wire(&RemoteTimestamp::new(10, 1_500_000)).unwrap_err();
        assert!(matches!(err, CalendarError::Decode(_)));
    }

    #[test]
    fn test_from_wire_rejects_nanos_overflow() {
        let err = from_wire(&RemoteTimestamp::new(10, 1_000_000_000)).unwrap_err();
        assert!(matches!(err, CalendarError::Decode(_)));
    }

    #[test]
    fn test_from_wire_rejects_out_of_range_seconds() {
        let err = from_wire(&RemoteTimestamp::new(i64::MAX, 0)).unwrap_err();
        assert!(matches!(err, CalendarError::Decode(_)));
    }

    #[test]
    fn test_from_wire_rejects_values_outside_the_integer_domain() {
        for value in [
            json!([0, -1]),
            json!([1e20, 0]),
            json!([1.5, 0]),
            json!([0, 4_294_967_296u64]),
            json!([18_446_744_073_709_551_615u64, 0]),
        ] {
            let err = from_wire(&wire(value.clone())).unwrap_err();
            assert!(matches!(err, CalendarError::Decode(_)), "{value} gave {err:?}");
        }
    }

    #[test]
    fn test_wire_format_is_a_pair() {
        let json = serde_json::to_value(RemoteTimestamp::new(1_700_000_000, 0)).unwrap();
        assert_eq!(json, json!([1_700_000_000i64, 0]));
        assert_eq!(wire(json!([1_700_000_000i64, 0])), to_wire(1_700_000_000_000));
    }
}
