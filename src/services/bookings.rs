use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingFilter, BookingStatus, NewBooking};
use crate::services::validation::{validate_new_booking, ValidationError};
use crate::store::BookingStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Booking not found")]
    NotFound,

    #[error("Cannot delete past bookings")]
    PastBooking,
}

/// Validates `req` against the current contents of `store` and appends the
/// resulting booking. Callers must hold the store exclusively for the whole
/// call so the conflict check and the append cannot interleave.
pub fn create_booking(
    store: &mut BookingStore,
    req: &NewBooking,
    now: NaiveDateTime,
) -> Result<Booking, BookingError> {
    let valid = validate_new_booking(req, store, now)?;

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        date: valid.date,
        time: valid.time,
        guests: valid.guests,
        name: valid.name,
        contact: valid.contact,
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    };
    store.insert(booking.clone());

    Ok(booking)
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: BookingFilter,
    pub search: Option<String>,
}

pub fn list_bookings(store: &BookingStore, opts: &ListOptions, today: NaiveDate) -> Vec<Booking> {
    let today = today.format("%Y-%m-%d").to_string();
    let needle = opts
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    store
        .sorted_by_slot()
        .into_iter()
        .filter(|b| match opts.filter {
            BookingFilter::All => true,
            BookingFilter::Today => b.date == today,
            BookingFilter::Upcoming => b.date.as_str() > today.as_str(),
        })
        .filter(|b| needle.map_or(true, |q| matches_search(b, q)))
        .collect()
}

pub fn get_booking(store: &BookingStore, id: &str) -> Result<Booking, BookingError> {
    store.get(id).cloned().ok_or(BookingError::NotFound)
}

/// Removes the booking unless its slot is already strictly in the past.
pub fn delete_booking(
    store: &mut BookingStore,
    id: &str,
    now: NaiveDateTime,
) -> Result<Booking, BookingError> {
    let idx = store.position(id).ok_or(BookingError::NotFound)?;

    let is_past = store
        .iter()
        .nth(idx)
        .and_then(Booking::slot)
        .is_some_and(|slot| slot < now);
    if is_past {
        return Err(BookingError::PastBooking);
    }

    Ok(store.remove_at(idx))
}

fn matches_search(booking: &Booking, query: &str) -> bool {
    booking
        .name
        .to_lowercase()
        .contains(&query.to_lowercase())
        || booking.contact.contains(query)
}
