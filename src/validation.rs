use chrono::NaiveDate;

use crate::models::{BookingType, NewBookingPayload};

/// Candidate booking form exactly as typed by the user. Every field is a
/// raw string; `validate_form` decides what it means.
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub phone_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub booking_type: BookingType,
    pub test_code: String,
    pub test_name: String,
    pub total_price: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub address: String,
    pub phlebotomist_id: String,
    pub lab_id: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            customer_name: String::new(),
            customer_email: String::new(),
            booking_type: BookingType::HomeCollection,
            test_code: String::new(),
            test_name: String::new(),
            total_price: String::new(),
            appointment_date: String::new(),
            appointment_time: String::new(),
            address: String::new(),
            phlebotomist_id: String::new(),
            lab_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingPhone,
    InvalidPhone,
    MissingName,
    InvalidEmail,
    MissingTestCode,
    MissingTestName,
    InvalidPrice,
    MissingDate,
    DateInPast,
    MissingTime,
    MissingAddress,
    MissingPhlebotomist,
    MissingLabId,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ValidationError::MissingPhone => "Please enter a phone number",
            ValidationError::InvalidPhone => "Please enter a valid phone number (10-12 digits)",
            ValidationError::MissingName => "Customer name is required",
            ValidationError::InvalidEmail => "Please enter a valid email address",
            ValidationError::MissingTestCode => "Test code is required",
            ValidationError::MissingTestName => "Test name is required",
            ValidationError::InvalidPrice => "Please enter a valid price",
            ValidationError::MissingDate => "Appointment date is required",
            ValidationError::DateInPast => "Appointment date must be today or in the future",
            ValidationError::MissingTime => "Appointment time is required",
            ValidationError::MissingAddress => "Address is required for home collection",
            ValidationError::MissingPhlebotomist => {
                "Phlebotomist ID is required for home collection"
            }
            ValidationError::MissingLabId => "Lab ID is required for walk-in lab booking",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ValidationError {}

fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}

fn phone_is_valid(phone: &str) -> bool {
    (10..=12).contains(&digit_count(phone))
}

fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs a dot with at least one character on either side.
    match domain.rfind('.') {
        Some(i) => i > 0 && i + 1 < domain.len(),
        None => false,
    }
}

/// Phone check for the search flow: presence first, then the same
/// 10-12 digit rule the create form uses.
pub fn validate_search_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !phone_is_valid(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Checks the form field by field in a fixed order and stops at the first
/// failure, so the user sees exactly one actionable message per attempt.
pub fn validate_form(form: &BookingForm, today: NaiveDate) -> Result<(), ValidationError> {
    if !phone_is_valid(&form.phone_number) {
        return Err(ValidationError::InvalidPhone);
    }
    if form.customer_name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !form.customer_email.is_empty() && !email_is_valid(&form.customer_email) {
        return Err(ValidationError::InvalidEmail);
    }
    if form.test_code.trim().is_empty() {
        return Err(ValidationError::MissingTestCode);
    }
    if form.test_name.trim().is_empty() {
        return Err(ValidationError::MissingTestName);
    }
    match form.total_price.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => {}
        _ => return Err(ValidationError::InvalidPrice),
    }
    if form.appointment_date.trim().is_empty() {
        return Err(ValidationError::MissingDate);
    }
    match NaiveDate::parse_from_str(form.appointment_date.trim(), "%Y-%m-%d") {
        Ok(date) if date >= today => {}
        // Same-day is allowed; anything earlier or unparseable is rejected.
        _ => return Err(ValidationError::DateInPast),
    }
    if form.appointment_time.trim().is_empty() {
        return Err(ValidationError::MissingTime);
    }
    match form.booking_type {
        BookingType::HomeCollection => {
            if form.address.trim().is_empty() {
                return Err(ValidationError::MissingAddress);
            }
            if form.phlebotomist_id.trim().is_empty() {
                return Err(ValidationError::MissingPhlebotomist);
            }
        }
        BookingType::WalkInLab => {
            if form.lab_id.trim().is_empty() {
                return Err(ValidationError::MissingLabId);
            }
        }
    }
    Ok(())
}

/// Normalize a validated form into the outbound payload: price becomes a
/// number, an empty email is omitted, and the conditional field group that
/// does not apply to the chosen booking type is dropped entirely.
pub fn to_payload(form: &BookingForm) -> NewBookingPayload {
    let (address, phlebotomist_id, lab_id) = match form.booking_type {
        BookingType::HomeCollection => {
            (Some(form.address.clone()), Some(form.phlebotomist_id.clone()), None)
        }
        BookingType::WalkInLab => (None, None, Some(form.lab_id.clone())),
    };
    let customer_email = if form.customer_email.is_empty() {
        None
    } else {
        Some(form.customer_email.clone())
    };
    NewBookingPayload {
        phone_number: form.phone_number.clone(),
        customer_name: form.customer_name.clone(),
        customer_email,
        booking_type: form.booking_type,
        test_code: form.test_code.clone(),
        test_name: form.test_name.clone(),
        total_price: form.total_price.trim().parse().unwrap_or(0.0),
        appointment_date: form.appointment_date.clone(),
        appointment_time: form.appointment_time.clone(),
        address,
        phlebotomist_id,
        lab_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn valid_home_form() -> BookingForm {
        BookingForm {
            phone_number: "9998887777".to_string(),
            customer_name: "Asha Rao".to_string(),
            customer_email: "asha@example.com".to_string(),
            booking_type: BookingType::HomeCollection,
            test_code: "CBC".to_string(),
            test_name: "Complete Blood Count".to_string(),
            total_price: "450".to_string(),
            appointment_date: "2025-06-15".to_string(),
            appointment_time: "10:30".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
            phlebotomist_id: "PHL123".to_string(),
            lab_id: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_form(&valid_home_form(), today()).is_ok());
    }

    #[test]
    fn test_phone_counts_digits_after_stripping_punctuation() {
        let mut form = valid_home_form();
        form.phone_number = "999-888-7777".to_string();
        assert!(validate_form(&form, today()).is_ok());

        form.phone_number = "12345".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::InvalidPhone)
        );

        form.phone_number = "1234567890123".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_search_phone_requires_presence_before_shape() {
        assert_eq!(
            validate_search_phone("   "),
            Err(ValidationError::MissingPhone)
        );
        assert_eq!(
            validate_search_phone("12345"),
            Err(ValidationError::InvalidPhone)
        );
        assert!(validate_search_phone("999-888-7777").is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut form = valid_home_form();
        form.phone_number = "12".to_string();
        form.customer_name = "  ".to_string();
        // Phone is checked before name, so its message is the one surfaced.
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut form = valid_home_form();
        form.customer_name = "   ".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn test_email_is_optional_but_checked_when_present() {
        let mut form = valid_home_form();
        form.customer_email = String::new();
        assert!(validate_form(&form, today()).is_ok());

        for bad in ["plainaddress", "no@dot", "two@@at.com", "a b@c.com", "x@.com", "x@com."] {
            form.customer_email = bad.to_string();
            assert_eq!(
                validate_form(&form, today()),
                Err(ValidationError::InvalidEmail),
                "expected {bad:?} to fail"
            );
        }

        form.customer_email = "a@b.co".to_string();
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_price_must_be_a_positive_number() {
        let mut form = valid_home_form();
        for bad in ["0", "-5", "abc", ""] {
            form.total_price = bad.to_string();
            assert_eq!(
                validate_form(&form, today()),
                Err(ValidationError::InvalidPrice),
                "expected {bad:?} to fail"
            );
        }
        form.total_price = "0.01".to_string();
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_appointment_date_rules() {
        let mut form = valid_home_form();
        form.appointment_date = String::new();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingDate)
        );

        form.appointment_date = "2025-06-09".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::DateInPast)
        );

        // Same-day booking is allowed.
        form.appointment_date = "2025-06-10".to_string();
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_missing_time_rejected() {
        let mut form = valid_home_form();
        form.appointment_time = "  ".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingTime)
        );
    }

    #[test]
    fn test_home_collection_requires_address_and_phlebotomist() {
        let mut form = valid_home_form();
        form.address = " ".to_string();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingAddress)
        );

        form.address = "12 MG Road".to_string();
        form.phlebotomist_id = String::new();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingPhlebotomist)
        );
    }

    #[test]
    fn test_walk_in_requires_lab_id() {
        let mut form = valid_home_form();
        form.booking_type = BookingType::WalkInLab;
        form.lab_id = String::new();
        assert_eq!(
            validate_form(&form, today()),
            Err(ValidationError::MissingLabId)
        );

        form.lab_id = "LAB001".to_string();
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_payload_drops_non_matching_field_group() {
        let mut form = valid_home_form();
        form.lab_id = "LAB001".to_string();
        let payload = to_payload(&form);
        assert_eq!(payload.address.as_deref(), Some("12 MG Road, Bengaluru"));
        assert_eq!(payload.phlebotomist_id.as_deref(), Some("PHL123"));
        assert!(payload.lab_id.is_none());

        form.booking_type = BookingType::WalkInLab;
        let payload = to_payload(&form);
        assert!(payload.address.is_none());
        assert!(payload.phlebotomist_id.is_none());
        assert_eq!(payload.lab_id.as_deref(), Some("LAB001"));
    }

    #[test]
    fn test_payload_converts_price_and_omits_empty_email() {
        let mut form = valid_home_form();
        form.total_price = "450.50".to_string();
        form.customer_email = String::new();
        let payload = to_payload(&form);
        assert_eq!(payload.total_price, 450.50);
        assert!(payload.customer_email.is_none());
    }
}
