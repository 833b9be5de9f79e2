use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::models::{
    Booking, BookingReceipt, BookingStatus, BookingsQueryResult, NewBookingPayload,
};

/// Successful backend response: the payload plus the server's own message,
/// which the UI shows verbatim when present.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub message: Option<String>,
    pub data: T,
}

pub type ApiResult<T> = Result<ApiReply<T>, ApiError>;

/// The booking backend as seen by the client. One method per endpoint,
/// single request/response each, no retry or caching. The last two
/// operations are part of the backend contract even though no view
/// currently drives them.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, payload: &NewBookingPayload) -> ApiResult<BookingReceipt>;
    async fn get_bookings_by_phone(&self, phone: &str) -> ApiResult<BookingsQueryResult>;
    async fn get_booking_by_id(&self, id: &str) -> ApiResult<Booking>;
    async fn update_booking_status(&self, id: &str, status: BookingStatus) -> ApiResult<Booking>;
    async fn cancel_booking_by_id(&self, id: &str) -> ApiResult<()>;
    async fn update_booking_by_phone(
        &self,
        phone: &str,
        payload: &NewBookingPayload,
    ) -> ApiResult<Booking>;
    async fn cancel_booking_by_phone(&self, phone: &str) -> ApiResult<()>;
}

/// `{ message, data }` envelope every backend response uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    message: Option<String>,
    data: T,
}

/// Acknowledgement body for deletes; `data` may be absent entirely.
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    booking_status: BookingStatus,
}

pub struct HttpBookingApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookingApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Backend {
                message: extract_message(&body)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            });
        }
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(ApiReply {
            message: envelope.message,
            data: envelope.data,
        })
    }

    async fn read_ack(response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Backend {
                message: extract_message(&body)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            });
        }
        let message = serde_json::from_str::<Ack>(&body)
            .ok()
            .and_then(|ack| ack.message);
        Ok(ApiReply { message, data: () })
    }
}

/// Best-effort `message` field from an error body.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn create_booking(&self, payload: &NewBookingPayload) -> ApiResult<BookingReceipt> {
        let url = format!("{}/bookings", self.base_url);
        tracing::debug!(%url, booking_type = payload.booking_type.as_str(), "creating booking");
        let response = self.client.post(&url).json(payload).send().await?;
        Self::read_reply(response).await
    }

    async fn get_bookings_by_phone(&self, phone: &str) -> ApiResult<BookingsQueryResult> {
        let url = format!("{}/bookings/phone/{phone}", self.base_url);
        tracing::debug!(%url, "looking up bookings by phone");
        let response = self.client.get(&url).send().await?;
        Self::read_reply(response).await
    }

    async fn get_booking_by_id(&self, id: &str) -> ApiResult<Booking> {
        let url = format!("{}/bookings/{id}", self.base_url);
        tracing::debug!(%url, "fetching booking");
        let response = self.client.get(&url).send().await?;
        Self::read_reply(response).await
    }

    async fn update_booking_status(&self, id: &str, status: BookingStatus) -> ApiResult<Booking> {
        let url = format!("{}/bookings/{id}", self.base_url);
        tracing::debug!(%url, status = status.as_str(), "updating booking status");
        let response = self
            .client
            .put(&url)
            .json(&StatusUpdate {
                booking_status: status,
            })
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn cancel_booking_by_id(&self, id: &str) -> ApiResult<()> {
        let url = format!("{}/bookings/{id}", self.base_url);
        tracing::debug!(%url, "cancelling booking");
        let response = self.client.delete(&url).send().await?;
        Self::read_ack(response).await
    }

    async fn update_booking_by_phone(
        &self,
        phone: &str,
        payload: &NewBookingPayload,
    ) -> ApiResult<Booking> {
        let url = format!("{}/bookings/phone/{phone}", self.base_url);
        tracing::debug!(%url, "updating booking by phone");
        let response = self.client.put(&url).json(payload).send().await?;
        Self::read_reply(response).await
    }

    async fn cancel_booking_by_phone(&self, phone: &str) -> ApiResult<()> {
        let url = format!("{}/bookings/phone/{phone}", self.base_url);
        tracing::debug!(%url, "cancelling booking by phone");
        let response = self.client.delete(&url).send().await?;
        Self::read_ack(response).await
    }
}
