//! GetReservationHandler - query handler for a single reservation.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::{Reservation, ReservationError};
use crate::ports::ReservationRepository;

/// Query for one reservation by id.
#[derive(Debug, Clone)]
pub struct GetReservationQuery {
    pub reservation_id: ReservationId,
}

/// Handler returning a reservation by id.
pub struct GetReservationHandler {
    repository: Arc<dyn ReservationRepository>,
}

impl GetReservationHandler {
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetReservationQuery,
    ) -> Result<Reservation, ReservationError> {
        self.repository
            .find_by_id(&query.reservation_id)
            .await?
            .ok_or_else(|| ReservationError::not_found(query.reservation_id))
    }
}
