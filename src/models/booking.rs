use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    HomeCollection,
    WalkInLab,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::HomeCollection => "home_collection",
            BookingType::WalkInLab => "walk_in_lab",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingType::HomeCollection => "home collection",
            BookingType::WalkInLab => "walk in lab",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Unknown wire values fall back to `Confirmed`, matching how the
    /// backend treats a booking with no explicit status.
    pub fn from_str(s: &str) -> Self {
        match s {
            "in_progress" => BookingStatus::InProgress,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Confirmed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// The single permitted forward step: confirmed → in_progress →
    /// completed. Completed and cancelled bookings have no next step.
    pub fn next(&self) -> Option<BookingStatus> {
        match self {
            BookingStatus::Confirmed => Some(BookingStatus::InProgress),
            BookingStatus::InProgress => Some(BookingStatus::Completed),
            BookingStatus::Completed | BookingStatus::Cancelled => None,
        }
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Confirmed
    }
}

// Inbound statuses go through `BookingStatus::from_str` so a value this
// client does not know about degrades to `Confirmed` instead of failing
// the whole response.
fn lenient_status<'de, D>(deserializer: D) -> Result<BookingStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(BookingStatus::from_str(&raw))
}

fn lenient_opt_status<'de, D>(deserializer: D) -> Result<Option<BookingStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| BookingStatus::from_str(&s)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    StartProcessing,
    MarkComplete,
    Cancel,
}

impl StatusAction {
    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::StartProcessing => "Start Processing",
            StatusAction::MarkComplete => "Mark Complete",
            StatusAction::Cancel => "Cancel",
        }
    }
}

/// Which controls a booking card or detail page offers for its current
/// status. Invalid transitions are never offered, so they cannot be
/// attempted.
pub fn available_actions(status: BookingStatus) -> Vec<StatusAction> {
    let mut actions = Vec::new();
    match status {
        BookingStatus::Confirmed => actions.push(StatusAction::StartProcessing),
        BookingStatus::InProgress => actions.push(StatusAction::MarkComplete),
        BookingStatus::Completed | BookingStatus::Cancelled => {}
    }
    if status.can_cancel() {
        actions.push(StatusAction::Cancel);
    }
    actions
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub booking_id: String,
    pub phone_number: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub booking_type: BookingType,
    pub test_code: String,
    pub test_name: String,
    pub total_price: f64,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub booking_status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phlebotomist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Booking {
    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            booking_id: self.booking_id.clone(),
            test_name: self.test_name.clone(),
            appointment_date: self.appointment_date.clone(),
            appointment_time: self.appointment_time.clone(),
            booking_type: self.booking_type,
            status: Some(self.booking_status),
        }
    }
}

/// The list-item shape returned by the phone lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSummary {
    pub booking_id: String,
    pub test_name: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub booking_type: BookingType,
    #[serde(default, deserialize_with = "lenient_opt_status")]
    pub status: Option<BookingStatus>,
}

impl BookingSummary {
    /// A summary with no status renders and behaves as confirmed.
    pub fn effective_status(&self) -> BookingStatus {
        self.status.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingsQueryResult {
    pub total_bookings: u64,
    #[serde(default)]
    pub latest_booking: Option<BookingSummary>,
    #[serde(default)]
    pub bookings: Vec<BookingSummary>,
}

/// Payload echoed back after a successful create; shown verbatim on the
/// success screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub booking_reference: String,
    pub created_at: String,
}

/// Outbound body for booking creation. Optional fields are omitted from
/// the JSON entirely rather than sent as null or empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBookingPayload {
    pub phone_number: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub booking_type: BookingType,
    pub test_code: String,
    pub test_name: String,
    pub total_price: f64,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phlebotomist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_advances_one_step_at_a_time() {
        assert_eq!(BookingStatus::Confirmed.next(), Some(BookingStatus::InProgress));
        assert_eq!(BookingStatus::InProgress.next(), Some(BookingStatus::Completed));
        assert_eq!(BookingStatus::Completed.next(), None);
        assert_eq!(BookingStatus::Cancelled.next(), None);
    }

    #[test]
    fn test_cancel_allowed_until_completed_or_cancelled() {
        assert!(BookingStatus::Confirmed.can_cancel());
        assert!(BookingStatus::InProgress.can_cancel());
        assert!(!BookingStatus::Completed.can_cancel());
        assert!(!BookingStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_terminal_statuses_offer_no_actions() {
        assert!(available_actions(BookingStatus::Completed).is_empty());
        assert!(available_actions(BookingStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_confirmed_offers_start_and_cancel() {
        assert_eq!(
            available_actions(BookingStatus::Confirmed),
            vec![StatusAction::StartProcessing, StatusAction::Cancel]
        );
    }

    #[test]
    fn test_in_progress_offers_complete_and_cancel() {
        assert_eq!(
            available_actions(BookingStatus::InProgress),
            vec![StatusAction::MarkComplete, StatusAction::Cancel]
        );
    }

    #[test]
    fn test_status_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&BookingType::WalkInLab).unwrap(),
            "\"walk_in_lab\""
        );
    }

    #[test]
    fn test_summary_without_status_defaults_to_confirmed() {
        let json = r#"{
            "booking_id": "B1",
            "test_name": "CBC",
            "appointment_date": "2025-06-01",
            "appointment_time": "10:00",
            "booking_type": "walk_in_lab"
        }"#;
        let summary: BookingSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.effective_status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_unknown_wire_status_degrades_to_confirmed() {
        let json = r#"{
            "booking_id": "B1",
            "test_name": "CBC",
            "appointment_date": "2025-06-01",
            "appointment_time": "10:00",
            "booking_type": "walk_in_lab",
            "status": "pending"
        }"#;
        let summary: BookingSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.status, Some(BookingStatus::Confirmed));
    }

    #[test]
    fn test_booking_with_unknown_status_still_decodes() {
        let json = r#"{
            "booking_id": "B1",
            "phone_number": "9998887777",
            "customer_name": "Asha",
            "booking_type": "walk_in_lab",
            "test_code": "CBC",
            "test_name": "Complete Blood Count",
            "total_price": 450.0,
            "appointment_date": "2025-06-01",
            "appointment_time": "10:00",
            "booking_status": "pending",
            "lab_id": "LAB001"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.booking_status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_query_result_tolerates_missing_lists() {
        let json = r#"{"total_bookings": 0}"#;
        let result: BookingsQueryResult = serde_json::from_str(json).unwrap();
        assert!(result.latest_booking.is_none());
        assert!(result.bookings.is_empty());
    }

    #[test]
    fn test_payload_omits_absent_optional_fields() {
        let payload = NewBookingPayload {
            phone_number: "9998887777".to_string(),
            customer_name: "Asha".to_string(),
            customer_email: None,
            booking_type: BookingType::WalkInLab,
            test_code: "CBC".to_string(),
            test_name: "Complete Blood Count".to_string(),
            total_price: 450.0,
            appointment_date: "2025-06-01".to_string(),
            appointment_time: "10:00".to_string(),
            address: None,
            phlebotomist_id: None,
            lab_id: Some("LAB001".to_string()),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("customer_email").is_none());
        assert!(json.get("address").is_none());
        assert!(json.get("phlebotomist_id").is_none());
        assert_eq!(json["lab_id"], "LAB001");
        assert_eq!(json["total_price"], 450.0);
    }
}
