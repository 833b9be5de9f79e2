use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::errors::ApiError;
use crate::models::{Booking, BookingReceipt, BookingStatus, BookingsQueryResult};
use crate::services::api::BookingApi;
use crate::validation::{self, BookingForm};

pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Transient notice. At most one is visible; showing a new one replaces
/// the old. Dismissed explicitly or once `TOAST_TTL` has elapsed.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Bookings,
    Create,
    Details,
    Success,
}

/// Lifecycle of the most recent network-touching action. `InFlight` doubles
/// as the re-entrancy guard against duplicate submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Client-side application state: the active view, the selections that view
/// needs, and the current toast. The API provider is injected so the whole
/// machine runs against a mock in tests.
pub struct App {
    api: Box<dyn BookingApi>,
    pub view: View,
    pub query_result: Option<BookingsQueryResult>,
    pub searched_phone: Option<String>,
    pub selected: Option<Booking>,
    pub receipt: Option<BookingReceipt>,
    pub toast: Option<Toast>,
    pub phase: ActionPhase,
}

impl App {
    pub fn new(api: Box<dyn BookingApi>) -> Self {
        Self {
            api,
            view: View::Search,
            query_result: None,
            searched_phone: None,
            selected: None,
            receipt: None,
            toast: None,
            phase: ActionPhase::Idle,
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(message.into(), kind));
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn drop_expired_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    fn begin(&mut self) -> bool {
        if self.phase == ActionPhase::InFlight {
            tracing::warn!("action ignored, another request is in flight");
            return false;
        }
        self.phase = ActionPhase::InFlight;
        true
    }

    fn finish(&mut self, ok: bool) {
        self.phase = if ok {
            ActionPhase::Succeeded
        } else {
            ActionPhase::Failed
        };
    }

    // ── Search ──

    pub async fn search_phone(&mut self, input: &str) {
        if let Err(err) = validation::validate_search_phone(input) {
            self.show_toast(err.to_string(), ToastKind::Error);
            return;
        }
        if !self.begin() {
            return;
        }
        let phone = input.trim().to_string();
        match self.api.get_bookings_by_phone(&phone).await {
            Ok(reply) => {
                tracing::info!(%phone, total = reply.data.total_bookings, "bookings found");
                self.query_result = Some(reply.data);
                self.searched_phone = Some(phone);
                let message = reply.message.unwrap_or_else(|| "Bookings found".to_string());
                self.show_toast(message, ToastKind::Success);
                self.view = View::Bookings;
                self.finish(true);
            }
            Err(ApiError::NotFound) => {
                // Expected absence: offer the create flow instead of failing.
                tracing::info!(%phone, "no bookings for phone");
                self.show_toast("No bookings found for this phone number", ToastKind::Info);
                self.view = View::Create;
                self.finish(true);
            }
            Err(err) => {
                tracing::warn!(error = %err, "phone lookup failed");
                self.show_toast(err.user_message("Error searching bookings"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    pub fn create_new(&mut self) {
        self.view = View::Create;
    }

    // ── Create ──

    pub async fn submit_booking(&mut self, form: &BookingForm, today: NaiveDate) {
        if let Err(err) = validation::validate_form(form, today) {
            // Blocks submission; no request leaves the client.
            self.show_toast(err.to_string(), ToastKind::Error);
            return;
        }
        if !self.begin() {
            return;
        }
        let payload = validation::to_payload(form);
        match self.api.create_booking(&payload).await {
            Ok(reply) => {
                tracing::info!(booking_id = %reply.data.booking_id, "booking created");
                let message = reply
                    .message
                    .unwrap_or_else(|| "Booking created successfully".to_string());
                self.show_toast(message, ToastKind::Success);
                self.receipt = Some(reply.data);
                self.view = View::Success;
                self.finish(true);
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking creation failed");
                self.show_toast(err.user_message("Error creating booking"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    // ── Details ──

    pub async fn view_details(&mut self, id: &str) {
        if !self.begin() {
            return;
        }
        match self.api.get_booking_by_id(id).await {
            Ok(reply) => {
                self.selected = Some(reply.data);
                self.view = View::Details;
                self.finish(true);
            }
            Err(err) => {
                // A stale or unknown id is fatal to the details view: stay
                // on the list and say why.
                tracing::warn!(%id, error = %err, "details fetch failed");
                self.show_toast(
                    err.user_message("Error fetching booking details"),
                    ToastKind::Error,
                );
                self.selected = None;
                self.view = View::Bookings;
                self.finish(false);
            }
        }
    }

    /// Advance the selected booking one step along
    /// confirmed → in_progress → completed, then re-fetch just that booking
    /// so the details view reflects the server's view of it.
    pub async fn advance_status(&mut self) {
        let Some(current) = self.selected.as_ref() else {
            return;
        };
        let Some(next) = current.booking_status.next() else {
            tracing::warn!("no forward transition from {}", current.booking_status.as_str());
            return;
        };
        let id = current.booking_id.clone();
        if !self.begin() {
            return;
        }
        match self.api.update_booking_status(&id, next).await {
            Ok(_) => {
                self.show_toast("Booking status updated successfully", ToastKind::Success);
                self.refresh_selected(&id).await;
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "status update failed");
                self.show_toast(err.user_message("Error updating booking"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    async fn refresh_selected(&mut self, id: &str) {
        match self.api.get_booking_by_id(id).await {
            Ok(reply) => {
                self.selected = Some(reply.data);
                self.finish(true);
            }
            Err(err) => {
                self.show_toast(
                    err.user_message("Error fetching booking details"),
                    ToastKind::Error,
                );
                self.selected = None;
                self.view = View::Bookings;
                self.finish(false);
            }
        }
    }

    /// Cancel the selected booking and return to the list.
    pub async fn cancel_selected(&mut self) {
        let Some(current) = self.selected.as_ref() else {
            return;
        };
        if !current.booking_status.can_cancel() {
            tracing::warn!("cancel not permitted from {}", current.booking_status.as_str());
            return;
        }
        let id = current.booking_id.clone();
        if !self.begin() {
            return;
        }
        match self.api.cancel_booking_by_id(&id).await {
            Ok(_) => {
                self.show_toast("Booking cancelled successfully", ToastKind::Success);
                self.selected = None;
                self.view = View::Bookings;
                self.finish(true);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "cancel failed");
                self.show_toast(err.user_message("Error cancelling booking"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    // ── Bookings list ──

    fn list_status_of(&self, id: &str) -> Option<BookingStatus> {
        let result = self.query_result.as_ref()?;
        if let Some(latest) = result.latest_booking.as_ref() {
            if latest.booking_id == id {
                return Some(latest.effective_status());
            }
        }
        result
            .bookings
            .iter()
            .find(|b| b.booking_id == id)
            .map(|b| b.effective_status())
    }

    /// Same forward-step rule as `advance_status`, driven from the list
    /// card. The updated booking is re-fetched and merged back into the
    /// query result rather than reloading the whole list.
    pub async fn advance_status_in_list(&mut self, id: &str) {
        let Some(status) = self.list_status_of(id) else {
            return;
        };
        let Some(next) = status.next() else {
            tracing::warn!("no forward transition from {}", status.as_str());
            return;
        };
        if !self.begin() {
            return;
        }
        match self.api.update_booking_status(id, next).await {
            Ok(_) => {
                self.show_toast("Booking status updated successfully", ToastKind::Success);
                self.refresh_list_entry(id).await;
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "status update failed");
                self.show_toast(err.user_message("Error updating booking"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    async fn refresh_list_entry(&mut self, id: &str) {
        match self.api.get_booking_by_id(id).await {
            Ok(reply) => {
                let fresh = reply.data.summary();
                if let Some(result) = self.query_result.as_mut() {
                    if let Some(latest) = result.latest_booking.as_mut() {
                        if latest.booking_id == fresh.booking_id {
                            *latest = fresh.clone();
                        }
                    }
                    if let Some(entry) = result
                        .bookings
                        .iter_mut()
                        .find(|b| b.booking_id == fresh.booking_id)
                    {
                        *entry = fresh;
                    }
                }
                self.finish(true);
            }
            Err(err) => {
                // The update itself went through; the list just keeps its
                // previous snapshot of this entry.
                tracing::warn!(%id, error = %err, "list refresh failed");
                self.finish(false);
            }
        }
    }

    pub async fn cancel_in_list(&mut self, id: &str) {
        let Some(status) = self.list_status_of(id) else {
            return;
        };
        if !status.can_cancel() {
            tracing::warn!("cancel not permitted from {}", status.as_str());
            return;
        }
        if !self.begin() {
            return;
        }
        match self.api.cancel_booking_by_id(id).await {
            Ok(_) => {
                self.show_toast("Booking cancelled successfully", ToastKind::Success);
                self.query_result = None;
                self.searched_phone = None;
                self.view = View::Search;
                self.finish(true);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "cancel failed");
                self.show_toast(err.user_message("Error cancelling booking"), ToastKind::Error);
                self.finish(false);
            }
        }
    }

    // ── Navigation ──

    pub fn back(&mut self) {
        match self.view {
            View::Search => {}
            View::Bookings => {
                self.query_result = None;
                self.searched_phone = None;
                self.view = View::Search;
            }
            View::Create => {
                self.view = View::Search;
            }
            View::Details => {
                self.selected = None;
                self.view = View::Bookings;
            }
            View::Success => {
                // "Back to home" resets every auxiliary selection.
                self.receipt = None;
                self.query_result = None;
                self.searched_phone = None;
                self.selected = None;
                self.view = View::Search;
            }
        }
    }

    pub fn create_another(&mut self) {
        self.receipt = None;
        self.view = View::Create;
    }
}
