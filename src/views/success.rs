use std::fmt::Write;

use crate::models::BookingReceipt;

use super::format_datetime;

pub fn render(receipt: &BookingReceipt) -> String {
    let mut out = String::new();
    out.push_str("── Booking Created Successfully ──\n");
    let _ = writeln!(out, "  Booking ID: {}", receipt.booking_id);
    let _ = writeln!(out, "  Reference:  {}", receipt.booking_reference);
    let _ = writeln!(out, "  Created:    {}", format_datetime(&receipt.created_at));
    out.push_str("Your booking has been confirmed.\n");
    out.push_str("Commands: home (back to search) | another (create another booking)\n");
    out
}
