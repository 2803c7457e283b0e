use chrono::{SubsecRound, Utc};
use rusqlite::TransactionBehavior;
use tracing::info;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, OwnerBooking, Service};
use crate::state::AppState;

pub fn get_service(state: &AppState, service_id: i64) -> Result<Service, AppError> {
    let conn = state.conn()?;
    queries::get_service(&conn, service_id)?
        .ok_or_else(|| AppError::NotFound(format!("service {service_id}")))
}

/// Records a booking for `service_id`, timestamped with the server clock.
///
/// The service must exist; otherwise [`AppError::NotFound`] is returned and
/// no row is written.
pub fn create_booking(
    state: &AppState,
    service_id: i64,
    user_email: &str,
) -> Result<Booking, AppError> {
    let user_email = user_email.trim();
    if user_email.is_empty() {
        return Err(AppError::Validation("email is required".into()));
    }

    let datetime = Utc::now().naive_utc().trunc_subsecs(0);

    let mut conn = state.conn()?;
    let tx = conn.transaction()?;

    if queries::get_service(&tx, service_id)?.is_none() {
        return Err(AppError::NotFound(format!("service {service_id}")));
    }

    let id = queries::insert_booking(&tx, service_id, user_email, &datetime)?;
    tx.commit()?;

    info!(booking_id = id, service_id, "booking created");
    Ok(Booking {
        id,
        service_id,
        user_email: user_email.to_string(),
        datetime,
        seen: false,
    })
}

/// Number of bookings, across all owners, nobody has looked at yet.
pub fn count_unseen_bookings(state: &AppState) -> Result<i64, AppError> {
    let conn = state.conn()?;
    Ok(queries::count_unseen_bookings(&conn)?)
}

/// Lists the bookings made for services owned by `owner_id`, newest first,
/// **and marks all of them as seen**.
///
/// This is a read with a side effect: each returned booking carries the
/// `seen` flag it had before the call, while the stored flag is flipped to
/// `true`. Both steps run in one immediate transaction, so a booking that
/// arrives concurrently is either listed and marked, or neither.
pub fn list_owner_bookings(state: &AppState, owner_id: i64) -> Result<Vec<OwnerBooking>, AppError> {
    let mut conn = state.conn()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let bookings = queries::get_owner_bookings(&tx, owner_id)?;
    let marked = queries::mark_owner_bookings_seen(&tx, owner_id)?;
    tx.commit()?;

    if marked > 0 {
        info!(owner_id, marked, "bookings acknowledged");
    }
    Ok(bookings)
}
