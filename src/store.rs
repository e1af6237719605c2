use crate::models::Booking;

/// Process-local booking collection, kept in insertion order.
#[derive(Debug, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn insert(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.bookings.iter().position(|b| b.id == id)
    }

    pub fn remove_at(&mut self, index: usize) -> Booking {
        self.bookings.remove(index)
    }

    /// Exact string match on both date and time.
    pub fn slot_taken(&self, date: &str, time: &str) -> bool {
        self.bookings
            .iter()
            .any(|b| b.date == date && b.time == time)
    }

    /// Snapshot ordered by slot instant. Ties keep insertion order.
    pub fn sorted_by_slot(&self) -> Vec<Booking> {
        let mut sorted = self.bookings.clone();
        sorted.sort_by_key(|b| b.slot());
        sorted
    }
}
