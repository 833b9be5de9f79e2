use std::fmt::Write;

use crate::models::{available_actions, Booking, BookingType};

use super::{action_key, format_date, format_datetime};

pub fn render(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "── Booking Details ── [{}]",
        booking.booking_status.label()
    );
    let _ = writeln!(out, "  Booking ID:     {}", booking.booking_id);
    let _ = writeln!(out, "  Customer Name:  {}", booking.customer_name);
    let _ = writeln!(out, "  Phone Number:   {}", booking.phone_number);
    if let Some(email) = &booking.customer_email {
        let _ = writeln!(out, "  Email:          {email}");
    }
    let _ = writeln!(
        out,
        "  Test:           {} ({})",
        booking.test_name, booking.test_code
    );
    let _ = writeln!(out, "  Price:          ₹{}", booking.total_price);
    let _ = writeln!(
        out,
        "  Appointment:    {} at {}",
        format_date(&booking.appointment_date),
        booking.appointment_time
    );
    let _ = writeln!(out, "  Booking Type:   {}", booking.booking_type.label());
    if booking.booking_type == BookingType::HomeCollection {
        if let Some(address) = &booking.address {
            let _ = writeln!(out, "  Address:        {address}");
        }
        if let Some(phlebotomist) = &booking.phlebotomist_id {
            let _ = writeln!(out, "  Phlebotomist:   {phlebotomist}");
        }
    }
    if booking.booking_type == BookingType::WalkInLab {
        if let Some(lab) = &booking.lab_id {
            let _ = writeln!(out, "  Lab ID:         {lab}");
        }
    }
    if let Some(created) = &booking.created_at {
        let _ = writeln!(out, "  Created:        {}", format_datetime(created));
        if let Some(updated) = &booking.updated_at {
            if updated != created {
                let _ = writeln!(out, "  Last Updated:   {}", format_datetime(updated));
            }
        }
    }

    let mut commands: Vec<String> = available_actions(booking.booking_status)
        .into_iter()
        .map(|a| format!("{} ({})", action_key(a), a.label()))
        .collect();
    commands.push("back".to_string());
    let _ = writeln!(out, "Commands: {}", commands.join(" | "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;

    fn booking() -> Booking {
        Booking {
            booking_id: "BK42".to_string(),
            phone_number: "9998887777".to_string(),
            customer_name: "Asha Rao".to_string(),
            customer_email: None,
            booking_type: BookingType::WalkInLab,
            test_code: "CBC".to_string(),
            test_name: "Complete Blood Count".to_string(),
            total_price: 450.0,
            appointment_date: "2025-06-15".to_string(),
            appointment_time: "10:30".to_string(),
            booking_status: BookingStatus::Completed,
            address: None,
            phlebotomist_id: None,
            lab_id: Some("LAB001".to_string()),
            created_at: Some("2025-06-10T08:00:00Z".to_string()),
            updated_at: Some("2025-06-15T11:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_completed_booking_renders_no_status_commands() {
        let out = render(&booking());
        assert!(!out.contains("start"));
        assert!(!out.contains("done"));
        assert!(!out.contains("cancel"));
        assert!(out.contains("back"));
    }

    #[test]
    fn test_conditional_fields_follow_booking_type() {
        let out = render(&booking());
        assert!(out.contains("Lab ID"));
        assert!(!out.contains("Address"));
        assert!(!out.contains("Phlebotomist"));
    }
}
