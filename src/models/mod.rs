pub mod booking;

pub use booking::{
    available_actions, Booking, BookingReceipt, BookingStatus, BookingSummary, BookingType,
    BookingsQueryResult, NewBookingPayload, StatusAction,
};
