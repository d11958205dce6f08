use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, ScheduleId},
    payment::PaymentMethod,
    reservation::{event::PaymentIntent, Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookBatchRequest {
    #[garde(skip)]
    pub schedule_id: ScheduleId,
    #[garde(length(min = 1))]
    pub dates: Vec<NaiveDate>,
    #[garde(skip)]
    pub payment: Option<PaymentRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub method: PaymentMethodName,
    pub notes: Option<String>,
}

impl From<PaymentRequest> for PaymentIntent {
    fn from(value: PaymentRequest) -> Self {
        let PaymentRequest { method, notes } = value;
        PaymentIntent {
            method: method.into(),
            notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethodName {
    Cash,
    Card,
    Transfer,
}

impl From<PaymentMethodName> for PaymentMethod {
    fn from(value: PaymentMethodName) -> Self {
        match value {
            PaymentMethodName::Cash => Self::Cash,
            PaymentMethodName::Card => Self::Card,
            PaymentMethodName::Transfer => Self::Transfer,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookBatchResponse {
    pub reservation_ids: Vec<ReservationId>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseBatchRequest {
    #[garde(length(min = 1))]
    pub reservation_ids: Vec<ReservationId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseBatchResponse {
    pub released: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub status: ReservationStatus,
    pub is_paid: bool,
    pub amount: i64,
    pub refund_pending: bool,
    pub notes: Option<String>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            schedule_id,
            date,
            status,
            is_paid,
            amount,
            refund_pending,
            notes,
            ..
        } = value;
        Self {
            reservation_id: id,
            schedule_id,
            date,
            status,
            is_paid,
            amount,
            refund_pending,
            notes,
        }
    }
}
