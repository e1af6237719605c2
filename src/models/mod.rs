pub mod booking;

pub use booking::{parse_slot, Booking, BookingFilter, BookingStatus, NewBooking};
