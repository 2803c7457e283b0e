use tracing::{info, warn};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Price, ServiceListing};
use crate::state::AppState;

/// Every service with its owner's name, oldest first.
pub fn list_services(state: &AppState) -> Result<Vec<ServiceListing>, AppError> {
    let conn = state.conn()?;
    Ok(queries::list_services_with_owner(&conn)?)
}

/// Creates a service owned by `owner_id` and returns its id.
///
/// The owner must still exist; a session pointing at a missing user is
/// rejected as [`AppError::Unauthorized`].
pub fn add_service(
    state: &AppState,
    owner_id: i64,
    name: &str,
    description: &str,
    price: &str,
) -> Result<i64, AppError> {
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(AppError::Validation("name and description are required".into()));
    }
    let price: Price = price.parse()?;

    let mut conn = state.conn()?;
    let tx = conn.transaction()?;

    if queries::get_user_by_id(&tx, owner_id)?.is_none() {
        warn!(owner_id, "service creation for unknown user");
        return Err(AppError::Unauthorized);
    }

    let id = queries::insert_service(&tx, owner_id, name, description, price)?;
    tx.commit()?;

    info!(service_id = id, owner_id, "service added");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth;

    #[test]
    fn test_add_and_list() {
        let state = AppState::in_memory();
        let owner = auth::register(&state, "Dimitra", "d@example.com", "pw").unwrap();

        let first = add_service(&state, owner, "Yoga", "Morning class", "12,50").unwrap();
        let second = add_service(&state, owner, "Pilates", "Evening class", "20").unwrap();

        let listings = list_services(&state).unwrap();
        let ids: Vec<i64> = listings.iter().map(|l| l.service.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(listings[0].owner_fullname, "Dimitra");
        assert_eq!(listings[0].service.price.value(), 12.5);
    }

    #[test]
    fn test_invalid_price_creates_nothing() {
        let state = AppState::in_memory();
        let owner = auth::register(&state, "Dimitra", "d@example.com", "pw").unwrap();

        for bad in ["-1", "free", ""] {
            let err = add_service(&state, owner, "Yoga", "Class", bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidPrice(_)), "{bad}: {err}");
        }

        let conn = state.conn().unwrap();
        assert_eq!(queries::count_services(&conn).unwrap(), 0);
    }

    #[test]
    fn test_unknown_owner_rejected() {
        let state = AppState::in_memory();
        let err = add_service(&state, 42, "Yoga", "Class", "10").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let conn = state.conn().unwrap();
        assert_eq!(queries::count_services(&conn).unwrap(), 0);
    }
}
