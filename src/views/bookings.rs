use std::fmt::Write;

use crate::models::{available_actions, BookingSummary, BookingsQueryResult};

use super::{action_key, format_date};

fn summary_lines(out: &mut String, summary: &BookingSummary) {
    let _ = writeln!(out, "  ID:     {}", summary.booking_id);
    let _ = writeln!(out, "  Test:   {}", summary.test_name);
    let _ = writeln!(
        out,
        "  When:   {} at {}",
        format_date(&summary.appointment_date),
        summary.appointment_time
    );
    let _ = writeln!(out, "  Type:   {}", summary.booking_type.label());
    let _ = writeln!(out, "  Status: {}", summary.effective_status().label());
}

pub fn render(result: &BookingsQueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── Your Bookings ({}) ──", result.total_bookings);

    if let Some(latest) = &result.latest_booking {
        out.push_str("Latest Booking\n");
        summary_lines(&mut out, latest);
        let mut commands = vec![format!("view {}", latest.booking_id)];
        for action in available_actions(latest.effective_status()) {
            commands.push(action_key(action).to_string());
        }
        let _ = writeln!(out, "  Commands: {}", commands.join(" | "));
    }

    if result.bookings.len() > 1 {
        out.push_str("All Bookings\n");
        for summary in &result.bookings {
            summary_lines(&mut out, summary);
            let _ = writeln!(out, "  Commands: view {}", summary.booking_id);
            out.push('\n');
        }
    }

    out.push_str("Commands: view <id> | back\n");
    out
}
