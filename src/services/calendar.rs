use chrono::Duration;

use crate::models::Booking;

/// Renders a single-event iCalendar document for a booking. Returns `None`
/// if the stored slot does not parse or the seating end is out of range.
pub fn generate_ics(booking: &Booking, restaurant_name: &str, seating_minutes: i64) -> Option<String> {
    let start = booking.slot()?;
    let end = Duration::try_minutes(seating_minutes).and_then(|d| start.checked_add_signed(d))?;
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = end.format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = booking.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = format!("{}@table-booking", booking.id);

    let summary = format!(
        "Table for {} at {}",
        booking.guests,
        escape_text(restaurant_name)
    );
    let description = format!(
        "Reservation for {} ({})",
        escape_text(&booking.name),
        escape_text(&booking.contact)
    );

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Table Booking//Reservations//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         STATUS:CONFIRMED\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

/// Escapes a value for an RFC 5545 TEXT property. Line breaks become a
/// literal `\n` so free text can never start a new content line.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
