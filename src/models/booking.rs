use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub name: String,
    pub contact: String,
    pub status: BookingStatus,
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Wall-clock instant of the booked slot, if the stored strings parse.
    pub fn slot(&self) -> Option<NaiveDateTime> {
        parse_slot(&self.date, &self.time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

/// Body of `POST /api/bookings`. Fields are kept as raw JSON so that a
/// missing or falsy value of any type surfaces as a validation error
/// rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBooking {
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub guests: Option<Value>,
    pub name: Option<Value>,
    pub contact: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingFilter {
    #[default]
    All,
    Today,
    Upcoming,
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM[:SS]` time.
pub fn parse_slot(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}

fn serialize_millis<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_slot_accepts_minutes_and_seconds() {
        let a = parse_slot("2030-01-01", "19:00").unwrap();
        let b = parse_slot("2030-01-01", "19:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.format("%Y-%m-%d %H:%M").to_string(), "2030-01-01 19:00");
    }

    #[test]
    fn test_parse_slot_rejects_garbage() {
        assert!(parse_slot("2030-13-01", "19:00").is_none());
        assert!(parse_slot("2030-01-01", "25:00").is_none());
        assert!(parse_slot("tomorrow", "7pm").is_none());
    }

    #[test]
    fn test_booking_json_shape() {
        let booking = Booking {
            id: "abc".to_string(),
            date: "2030-01-01".to_string(),
            time: "19:00".to_string(),
            guests: 4,
            name: "Ada".to_string(),
            contact: "+44 1234 567890".to_string(),
            status: BookingStatus::Confirmed,
            created_at: Utc.with_ymd_and_hms(2029, 12, 1, 8, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["createdAt"], "2029-12-01T08:30:00.000Z");
        assert_eq!(json["guests"], 4);
        assert!(json.get("created_at").is_none());
    }
}
