use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::booking::DATETIME_FORMAT;
use crate::models::{Booking, OwnerBooking, Price, Service, ServiceListing, User};

// ── Users ──

pub fn insert_user(
    conn: &Connection,
    fullname: &str,
    email: &str,
    password_hash: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (fullname, email, password) VALUES (?1, ?2, ?3)",
        params![fullname, email, password_hash],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, fullname, email, password FROM users WHERE email = ?1",
        params![email],
        parse_user_row,
    )
    .optional()
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, fullname, email, password FROM users WHERE id = ?1",
        params![id],
        parse_user_row,
    )
    .optional()
}

/// Row count. Not used by request handling; tests assert writes with it.
pub fn count_users(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

fn parse_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        fullname: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

// ── Services ──

pub fn insert_service(
    conn: &Connection,
    user_id: i64,
    name: &str,
    description: &str,
    price: Price,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO services (user_id, name, description, price) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, name, description, price.value()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_service(conn: &Connection, id: i64) -> rusqlite::Result<Option<Service>> {
    conn.query_row(
        "SELECT id, user_id, name, description, price FROM services WHERE id = ?1",
        params![id],
        parse_service_row,
    )
    .optional()
}

pub fn list_services_with_owner(conn: &Connection) -> rusqlite::Result<Vec<ServiceListing>> {
    let mut stmt = conn.prepare(
        "SELECT services.id, services.user_id, services.name, services.description, services.price,
                users.fullname
         FROM services
         JOIN users ON services.user_id = users.id
         ORDER BY services.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ServiceListing {
            service: parse_service_row(row)?,
            owner_fullname: row.get(5)?,
        })
    })?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

/// Row count. Not used by request handling; tests assert writes with it.
pub fn count_services(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM services", [], |row| row.get(0))
}

fn parse_service_row(row: &Row) -> rusqlite::Result<Service> {
    let raw_price: f64 = row.get(4)?;
    let price = Price::new(raw_price)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Real, Box::new(e)))?;

    Ok(Service {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        price,
    })
}

// ── Bookings ──

pub fn insert_booking(
    conn: &Connection,
    service_id: i64,
    user_email: &str,
    datetime: &NaiveDateTime,
) -> rusqlite::Result<i64> {
    let datetime = datetime.format(DATETIME_FORMAT).to_string();
    conn.execute(
        "INSERT INTO bookings (service_id, user_email, datetime, seen) VALUES (?1, ?2, ?3, 0)",
        params![service_id, user_email, datetime],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
pub fn get_booking(conn: &Connection, id: i64) -> rusqlite::Result<Option<Booking>> {
    conn.query_row(
        "SELECT id, service_id, user_email, datetime, seen FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    )
    .optional()
}

/// Row count. Not used by request handling; tests assert writes with it.
pub fn count_bookings(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
}

pub fn count_unseen_bookings(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM bookings WHERE seen = 0", [], |row| {
        row.get(0)
    })
}

pub fn get_owner_bookings(conn: &Connection, owner_id: i64) -> rusqlite::Result<Vec<OwnerBooking>> {
    let mut stmt = conn.prepare(
        "SELECT bookings.id, bookings.service_id, bookings.user_email, bookings.datetime, bookings.seen,
                services.name AS service_name, users.fullname AS owner_name
         FROM bookings
         JOIN services ON bookings.service_id = services.id
         JOIN users ON services.user_id = users.id
         WHERE services.user_id = ?1
         ORDER BY bookings.datetime DESC, bookings.id DESC",
    )?;

    let rows = stmt.query_map(params![owner_id], |row| {
        Ok(OwnerBooking {
            booking: parse_booking_row(row)?,
            service_name: row.get(5)?,
            owner_name: row.get(6)?,
        })
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn mark_owner_bookings_seen(conn: &Connection, owner_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE bookings SET seen = 1
         WHERE seen = 0 AND service_id IN (SELECT id FROM services WHERE user_id = ?1)",
        params![owner_id],
    )
}

fn parse_booking_row(row: &Row) -> rusqlite::Result<Booking> {
    let datetime_str: String = row.get(3)?;
    let datetime = NaiveDateTime::parse_from_str(&datetime_str, DATETIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        user_email: row.get(2)?,
        datetime,
        seen: row.get::<_, i32>(4)? != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn seeded() -> (Connection, i64, i64) {
        let conn = db::init_db(":memory:").unwrap();
        let owner = insert_user(&conn, "Maria Papadopoulou", "maria@example.com", "hash").unwrap();
        let service = insert_service(
            &conn,
            owner,
            "Haircut",
            "Classic cut",
            Price::new(15.0).unwrap(),
        )
        .unwrap();
        (conn, owner, service)
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap()
    }

    #[test]
    fn test_user_lookup() {
        let (conn, owner, _) = seeded();
        let by_email = get_user_by_email(&conn, "maria@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, owner);
        assert_eq!(by_email.fullname, "Maria Papadopoulou");
        assert!(get_user_by_email(&conn, "nobody@example.com").unwrap().is_none());
        assert!(get_user_by_id(&conn, owner + 100).unwrap().is_none());
    }

    #[test]
    fn test_email_is_unique() {
        let (conn, _, _) = seeded();
        let err = insert_user(&conn, "Other", "maria@example.com", "hash").unwrap_err();
        assert_eq!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        );
        assert_eq!(count_users(&conn).unwrap(), 1);
    }

    #[test]
    fn test_services_joined_with_owner() {
        let (conn, owner, service) = seeded();
        insert_service(&conn, owner, "Shave", "Hot towel", Price::new(8.5).unwrap()).unwrap();

        let listings = list_services_with_owner(&conn).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].service.id, service);
        assert_eq!(listings[0].owner_fullname, "Maria Papadopoulou");
        assert_eq!(listings[1].service.name, "Shave");
        assert_eq!(listings[1].service.price.value(), 8.5);
    }

    #[test]
    fn test_owner_bookings_ordered_newest_first() {
        let (conn, owner, service) = seeded();
        insert_booking(&conn, service, "old@example.com", &at("2025-01-01 09:00:00")).unwrap();
        insert_booking(&conn, service, "new@example.com", &at("2025-03-01 09:00:00")).unwrap();
        insert_booking(&conn, service, "mid@example.com", &at("2025-02-01 09:00:00")).unwrap();

        let bookings = get_owner_bookings(&conn, owner).unwrap();
        let emails: Vec<_> = bookings.iter().map(|b| b.booking.user_email.as_str()).collect();
        assert_eq!(emails, ["new@example.com", "mid@example.com", "old@example.com"]);
        assert_eq!(bookings[0].service_name, "Haircut");
        assert_eq!(bookings[0].owner_name, "Maria Papadopoulou");
    }

    #[test]
    fn test_mark_seen_only_touches_owner_services() {
        let (conn, owner, service) = seeded();
        let other = insert_user(&conn, "Nikos", "nikos@example.com", "hash").unwrap();
        let other_service =
            insert_service(&conn, other, "Massage", "60 min", Price::new(40.0).unwrap()).unwrap();
        let now = at("2025-05-05 10:00:00");
        insert_booking(&conn, service, "a@example.com", &now).unwrap();
        let foreign = insert_booking(&conn, other_service, "b@example.com", &now).unwrap();

        assert_eq!(count_unseen_bookings(&conn).unwrap(), 2);
        assert_eq!(mark_owner_bookings_seen(&conn, owner).unwrap(), 1);
        assert_eq!(count_unseen_bookings(&conn).unwrap(), 1);
        assert!(!get_booking(&conn, foreign).unwrap().unwrap().seen);
    }
}
