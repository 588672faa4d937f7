//! HTTP handlers for the reservation endpoints.
//!
//! These connect axum routes to the application layer command/query
//! handlers and map domain errors onto HTTP statuses.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::reservation::{
    CancelReservationCommand, CancelReservationHandler, CreateReservationCommand,
    CreateReservationHandler, ExpirePendingReservationCommand, ExpirePendingReservationHandler,
    GetReservationHandler, GetReservationQuery, HandlePaymentEventHandler,
    ListAvailableTimesHandler, ListAvailableTimesQuery, ListReservationsHandler,
    ListReservationsQuery, PaymentEventCommand, PaymentOutcome,
};
use crate::domain::foundation::ReservationId;
use crate::domain::reservation::ReservationError;
use crate::ports::{EventPublisher, ProductCatalog, ReservationRepository, SlotLedger};

use super::dto::{
    AvailableTimesParams, AvailableTimesResponse, CreateReservationRequest, ErrorResponse,
    ListReservationsParams, PaymentEventRequest, PaymentEventStatus, ProductResponse,
    ReservationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all port implementations.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct ReservationsAppState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub ledger: Arc<dyn SlotLedger>,
    pub repository: Arc<dyn ReservationRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl ReservationsAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_reservation_handler(&self) -> CreateReservationHandler {
        CreateReservationHandler::new(
            self.catalog.clone(),
            self.ledger.clone(),
            self.repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn cancel_reservation_handler(&self) -> CancelReservationHandler {
        CancelReservationHandler::new(
            self.repository.clone(),
            self.ledger.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_reservation_handler(&self) -> GetReservationHandler {
        GetReservationHandler::new(self.repository.clone())
    }

    pub fn list_reservations_handler(&self) -> ListReservationsHandler {
        ListReservationsHandler::new(self.repository.clone())
    }

    pub fn list_available_times_handler(&self) -> ListAvailableTimesHandler {
        ListAvailableTimesHandler::new(self.ledger.clone())
    }

    pub fn payment_event_handler(&self) -> HandlePaymentEventHandler {
        HandlePaymentEventHandler::new(self.repository.clone(), self.event_publisher.clone())
    }

    pub fn expire_pending_handler(&self) -> ExpirePendingReservationHandler {
        ExpirePendingReservationHandler::new(
            self.repository.clone(),
            self.ledger.clone(),
            self.event_publisher.clone(),
        )
    }
}

/// Grace period between a failed-payment notice and the pending sweep.
const FAILED_PAYMENT_GRACE: std::time::Duration = std::time::Duration::from_secs(15 * 60);

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/products - list the catalog
pub async fn list_products(
    State(state): State<ReservationsAppState>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let products = state
        .catalog
        .list_all()
        .await
        .map_err(ReservationError::from)?;

    let response: Vec<ProductResponse> =
        products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/available-times?date= - free start times for a day
pub async fn list_available_times(
    State(state): State<ReservationsAppState>,
    Query(params): Query<AvailableTimesParams>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let handler = state.list_available_times_handler();
    let times = handler
        .handle(ListAvailableTimesQuery { date: params.date })
        .await?;

    let response = AvailableTimesResponse {
        times: times.iter().map(|t| t.to_string()).collect(),
    };
    Ok(Json(response))
}

/// GET /api/reservations?email= - a customer's reservations
pub async fn list_reservations(
    State(state): State<ReservationsAppState>,
    Query(params): Query<ListReservationsParams>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let email = params.email.unwrap_or_default();

    let handler = state.list_reservations_handler();
    let reservations = handler.handle(ListReservationsQuery { email }).await?;

    let response: Vec<ReservationResponse> = reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Ok(Json(response))
}

/// GET /api/reservations/:id - one reservation
pub async fn get_reservation(
    State(state): State<ReservationsAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let handler = state.get_reservation_handler();
    let reservation = handler
        .handle(GetReservationQuery {
            reservation_id: ReservationId::from_uuid(id),
        })
        .await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/reservations - book a slot
pub async fn create_reservation(
    State(state): State<ReservationsAppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let (customer, slot_date, start_time, items, payment_method, currency, storm_insurance) =
        request.into_parts()?;

    let handler = state.create_reservation_handler();
    let result = handler
        .handle(CreateReservationCommand {
            customer,
            slot_date,
            start_time,
            items,
            payment_method,
            currency,
            storm_insurance,
        })
        .await?;

    let response = ReservationResponse::from(result.reservation);
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/reservations/:id/cancel - cancel a booking
pub async fn cancel_reservation(
    State(state): State<ReservationsAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let handler = state.cancel_reservation_handler();
    let result = handler
        .handle(CancelReservationCommand {
            reservation_id: ReservationId::from_uuid(id),
        })
        .await?;

    Ok(Json(ReservationResponse::from(result.reservation)))
}

/// POST /api/payment-events - gateway notification intake
pub async fn handle_payment_event(
    State(state): State<ReservationsAppState>,
    Json(request): Json<PaymentEventRequest>,
) -> Result<impl IntoResponse, ReservationApiError> {
    let outcome = match request.status {
        PaymentEventStatus::Succeeded => {
            let transaction_id = request.transaction_id.ok_or_else(|| {
                ReservationError::validation(
                    "transaction_id",
                    "a successful payment carries a transaction id",
                )
            })?;
            let amount_paid = request.amount_paid.ok_or_else(|| {
                ReservationError::validation(
                    "amount_paid",
                    "a successful payment carries the amount paid",
                )
            })?;
            PaymentOutcome::Succeeded {
                transaction_id,
                amount_paid,
            }
        }
        PaymentEventStatus::Failed => PaymentOutcome::Failed,
    };

    let reservation_id = ReservationId::from_uuid(request.reservation_id);
    let failed = matches!(outcome, PaymentOutcome::Failed);

    let handler = state.payment_event_handler();
    handler
        .handle(PaymentEventCommand {
            reservation_id,
            outcome,
        })
        .await?;

    // A failed payment leaves the reservation holding its slot for a grace
    // period; sweep it afterwards if the customer never paid.
    if failed {
        let sweeper = state.expire_pending_handler();
        tokio::spawn(async move {
            tokio::time::sleep(FAILED_PAYMENT_GRACE).await;
            if let Err(err) = sweeper
                .handle(ExpirePendingReservationCommand { reservation_id })
                .await
            {
                tracing::warn!(%reservation_id, %err, "pending sweep failed");
            }
        });
    }

    Ok(StatusCode::OK)
}

/// GET /health - liveness probe
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub struct ReservationApiError(ReservationError);

impl From<ReservationError> for ReservationApiError {
    fn from(err: ReservationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReservationApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ReservationError::BookingWindowExceeded
            | ReservationError::CapacityExceeded { .. }
            | ReservationError::SafetyEquipmentMissing { .. }
            | ReservationError::CancellationWindowViolation { .. }
            | ReservationError::Validation { .. } => StatusCode::BAD_REQUEST,
            ReservationError::SlotUnavailable { .. }
            | ReservationError::AlreadyCancelled(_)
            | ReservationError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ReservationError::NotFound(_) | ReservationError::ProductNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ReservationError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
