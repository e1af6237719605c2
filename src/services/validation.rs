use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{parse_slot, NewBooking};
use crate::store::BookingStore;

pub const MIN_GUESTS: i64 = 1;
pub const MAX_GUESTS: i64 = 20;

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s-]{10,}$").expect("contact pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Number of guests must be between 1 and 20")]
    GuestsOutOfRange,

    #[error("Invalid contact number format")]
    InvalidContact,

    #[error("Booking must be for a future date and time")]
    NotInFuture,

    #[error("This time slot is already booked")]
    SlotTaken,
}

/// A request that passed every check, with `guests` coerced to a count.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub name: String,
    pub contact: String,
}

/// Runs the checks in a fixed order and stops at the first failure:
/// required fields, guest bounds, contact format, future slot, conflict.
pub fn validate_new_booking(
    req: &NewBooking,
    store: &BookingStore,
    now: NaiveDateTime,
) -> Result<ValidBooking, ValidationError> {
    let (date, time, guests, name, contact) = match (
        present(&req.date),
        present(&req.time),
        present(&req.guests),
        present(&req.name),
        present(&req.contact),
    ) {
        (Some(d), Some(t), Some(g), Some(n), Some(c)) => (d, t, g, n, c),
        _ => return Err(ValidationError::MissingField),
    };

    let guests = check_guests(guests)?;
    let contact = text_of(contact);
    check_contact(&contact)?;
    let (date, time) = (text_of(date), text_of(time));
    check_future(&date, &time, now)?;
    check_conflict(store, &date, &time)?;

    Ok(ValidBooking {
        date,
        time,
        guests,
        name: text_of(name),
        contact,
    })
}

pub fn check_guests(value: &Value) -> Result<u32, ValidationError> {
    let n = coerce_guests(value).ok_or(ValidationError::GuestsOutOfRange)?;
    if !(MIN_GUESTS..=MAX_GUESTS).contains(&n) {
        return Err(ValidationError::GuestsOutOfRange);
    }
    u32::try_from(n).map_err(|_| ValidationError::GuestsOutOfRange)
}

pub fn check_contact(contact: &str) -> Result<(), ValidationError> {
    if CONTACT_RE.is_match(contact) {
        Ok(())
    } else {
        Err(ValidationError::InvalidContact)
    }
}

/// The slot must be strictly after `now`; an unparseable slot never is.
pub fn check_future(date: &str, time: &str, now: NaiveDateTime) -> Result<(), ValidationError> {
    match parse_slot(date, time) {
        Some(slot) if slot > now => Ok(()),
        _ => Err(ValidationError::NotInFuture),
    }
}

pub fn check_conflict(store: &BookingStore, date: &str, time: &str) -> Result<(), ValidationError> {
    if store.slot_taken(date, time) {
        Err(ValidationError::SlotTaken)
    } else {
        Ok(())
    }
}

fn present(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|v| is_truthy(v))
}

/// String form of a JSON scalar, with whole numbers printed without a
/// fractional part.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Accepts whole numbers given either as JSON numbers or numeric strings.
fn coerce_guests(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingStatus};
    use chrono::Utc;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        parse_slot("2029-06-01", "12:00").unwrap()
    }

    fn request() -> NewBooking {
        NewBooking {
            date: Some(json!("2030-01-01")),
            time: Some(json!("19:00")),
            guests: Some(json!(4)),
            name: Some(json!("Ada")),
            contact: Some(json!("+1 555-123-4567")),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let store = BookingStore::new();
        let valid = validate_new_booking(&request(), &store, now()).unwrap();
        assert_eq!(valid.guests, 4);
        assert_eq!(valid.date, "2030-01-01");
        assert_eq!(valid.time, "19:00");
    }

    #[test]
    fn test_missing_fields() {
        let store = BookingStore::new();
        let cases = [
            NewBooking { date: None, ..request() },
            NewBooking { time: Some(json!("")), ..request() },
            NewBooking { guests: Some(json!(0)), ..request() },
            NewBooking { guests: Some(json!("")), ..request() },
            NewBooking { guests: Some(Value::Null), ..request() },
            NewBooking { name: None, ..request() },
            NewBooking { contact: Some(json!("")), ..request() },
            NewBooking { name: Some(json!(0)), ..request() },
            NewBooking { contact: Some(json!(false)), ..request() },
        ];
        for req in cases {
            assert_eq!(
                validate_new_booking(&req, &store, now()),
                Err(ValidationError::MissingField)
            );
        }
    }

    #[test]
    fn test_guest_bounds() {
        assert_eq!(check_guests(&json!(1)), Ok(1));
        assert_eq!(check_guests(&json!(20)), Ok(20));
        assert_eq!(check_guests(&json!("7")), Ok(7));
        assert_eq!(check_guests(&json!(21)), Err(ValidationError::GuestsOutOfRange));
        assert_eq!(check_guests(&json!(-3)), Err(ValidationError::GuestsOutOfRange));
        assert_eq!(check_guests(&json!(2.5)), Err(ValidationError::GuestsOutOfRange));
        assert_eq!(check_guests(&json!("many")), Err(ValidationError::GuestsOutOfRange));
    }

    #[test]
    fn test_contact_format() {
        assert!(check_contact("0123456789").is_ok());
        assert!(check_contact("+44 20 7946-0958").is_ok());
        assert_eq!(check_contact("12345"), Err(ValidationError::InvalidContact));
        assert_eq!(check_contact("abcdefghij"), Err(ValidationError::InvalidContact));
        assert_eq!(check_contact("++0123456789"), Err(ValidationError::InvalidContact));
        assert_eq!(check_contact("012345678x9"), Err(ValidationError::InvalidContact));
    }

    #[test]
    fn test_future_check_is_strict() {
        let now = now();
        assert!(check_future("2029-06-01", "12:01", now).is_ok());
        assert_eq!(
            check_future("2029-06-01", "12:00", now),
            Err(ValidationError::NotInFuture)
        );
        assert_eq!(
            check_future("2029-05-31", "23:59", now),
            Err(ValidationError::NotInFuture)
        );
        assert_eq!(
            check_future("not-a-date", "12:00", now),
            Err(ValidationError::NotInFuture)
        );
    }

    #[test]
    fn test_conflict_detected() {
        let mut store = BookingStore::new();
        store.insert(Booking {
            id: "existing".to_string(),
            date: "2030-01-01".to_string(),
            time: "19:00".to_string(),
            guests: 2,
            name: "Bob".to_string(),
            contact: "0123456789".to_string(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        });

        assert_eq!(
            validate_new_booking(&request(), &store, now()),
            Err(ValidationError::SlotTaken)
        );

        let next_minute = NewBooking { time: Some(json!("19:01")), ..request() };
        assert!(validate_new_booking(&next_minute, &store, now()).is_ok());
    }

    #[test]
    fn test_checks_run_in_order() {
        let store = BookingStore::new();
        // bad guests, bad contact and past date: guests is reported first
        let req = NewBooking {
            date: Some(json!("2000-01-01")),
            guests: Some(json!(50)),
            contact: Some(json!("nope")),
            ..request()
        };
        assert_eq!(
            validate_new_booking(&req, &store, now()),
            Err(ValidationError::GuestsOutOfRange)
        );

        let req = NewBooking { guests: Some(json!(2)), ..req };
        assert_eq!(
            validate_new_booking(&req, &store, now()),
            Err(ValidationError::InvalidContact)
        );
    }

    #[test]
    fn test_numeric_contact_is_read_as_digits() {
        let store = BookingStore::new();
        let req = NewBooking { contact: Some(json!(1234567890)), ..request() };
        let valid = validate_new_booking(&req, &store, now()).unwrap();
        assert_eq!(valid.contact, "1234567890");

        let req = NewBooking { contact: Some(json!(12345)), ..request() };
        assert_eq!(
            validate_new_booking(&req, &store, now()),
            Err(ValidationError::InvalidContact)
        );
    }

    #[test]
    fn test_text_of_scalars() {
        assert_eq!(text_of(&json!("x")), "x");
        assert_eq!(text_of(&json!(1234567890)), "1234567890");
        assert_eq!(text_of(&json!(1234567890.0)), "1234567890");
        assert_eq!(text_of(&json!(2.5)), "2.5");
        assert_eq!(text_of(&json!(true)), "true");
    }
}
