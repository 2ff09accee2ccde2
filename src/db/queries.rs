use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    BlockKind, BlockedInterval, Booking, BookingStatus, BusinessHoursEntry, Service,
};
use crate::services::time_math;

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Business hours ──

pub fn get_business_hours(
    conn: &Connection,
    provider_id: &str,
) -> anyhow::Result<Vec<BusinessHoursEntry>> {
    let mut stmt = conn.prepare(
        "SELECT provider_id, day_of_week, is_open, open_time, close_time
         FROM business_hours WHERE provider_id = ?1 ORDER BY day_of_week ASC",
    )?;

    let rows = stmt.query_map(params![provider_id], parse_hours_row)?;

    let mut hours = vec![];
    for row in rows {
        hours.push(row?);
    }
    Ok(hours)
}

pub fn get_business_hours_for_day(
    conn: &Connection,
    provider_id: &str,
    day_of_week: u8,
) -> anyhow::Result<Option<BusinessHoursEntry>> {
    let result = conn.query_row(
        "SELECT provider_id, day_of_week, is_open, open_time, close_time
         FROM business_hours WHERE provider_id = ?1 AND day_of_week = ?2",
        params![provider_id, day_of_week],
        parse_hours_row,
    );

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace the provider's whole weekly template in one transaction.
pub fn replace_business_hours(
    conn: &Connection,
    provider_id: &str,
    entries: &[BusinessHoursEntry],
) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM business_hours WHERE provider_id = ?1",
        params![provider_id],
    )?;
    for entry in entries {
        tx.execute(
            "INSERT INTO business_hours (provider_id, day_of_week, is_open, open_time, close_time)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                provider_id,
                entry.day_of_week,
                entry.is_open as i32,
                entry.open_time,
                entry.close_time,
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn parse_hours_row(row: &rusqlite::Row) -> rusqlite::Result<BusinessHoursEntry> {
    Ok(BusinessHoursEntry {
        provider_id: row.get(0)?,
        day_of_week: row.get::<_, i64>(1)? as u8,
        is_open: row.get::<_, i32>(2)? != 0,
        open_time: row.get(3)?,
        close_time: row.get(4)?,
    })
}

// ── Services ──

pub fn insert_service(conn: &Connection, service: &Service) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO services (id, provider_id, name, category, duration_minutes, price, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            service.id,
            service.provider_id,
            service.name,
            service.category,
            service.duration_minutes,
            service.price,
            service.active as i32,
            service.created_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_service(conn: &Connection, id: &str) -> anyhow::Result<Option<Service>> {
    let result = conn.query_row(
        "SELECT id, provider_id, name, category, duration_minutes, price, active, created_at
         FROM services WHERE id = ?1",
        params![id],
        parse_service_row,
    );

    match result {
        Ok(service) => Ok(Some(service)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_services(conn: &Connection, provider_id: &str) -> anyhow::Result<Vec<Service>> {
    let mut stmt = conn.prepare(
        "SELECT id, provider_id, name, category, duration_minutes, price, active, created_at
         FROM services WHERE provider_id = ?1 ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map(params![provider_id], parse_service_row)?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

pub fn update_service(conn: &Connection, service: &Service) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET name = ?1, category = ?2, duration_minutes = ?3, price = ?4, active = ?5
         WHERE id = ?6 AND provider_id = ?7",
        params![
            service.name,
            service.category,
            service.duration_minutes,
            service.price,
            service.active as i32,
            service.id,
            service.provider_id,
        ],
    )?;
    Ok(count > 0)
}

fn parse_service_row(row: &rusqlite::Row) -> rusqlite::Result<Service> {
    let created_at_str: String = row.get(7)?;
    Ok(Service {
        id: row.get(0)?,
        provider_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        duration_minutes: row.get(4)?,
        price: row.get(5)?,
        active: row.get::<_, i32>(6)? != 0,
        created_at: NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, provider_id, service_id, date, start_time, duration_minutes,
                               customer_name, customer_email, customer_phone,
                               service_price, platform_fee, total_amount, confirmation_number,
                               status, provider_notes, customer_notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            booking.id,
            booking.provider_id,
            booking.service_id,
            booking.date.format(DATE_FMT).to_string(),
            booking.start_time,
            booking.duration_minutes,
            booking.customer_name,
            booking.customer_email,
            booking.customer_phone,
            booking.service_price,
            booking.platform_fee,
            booking.total_amount,
            booking.confirmation_number,
            booking.status.as_str(),
            booking.provider_notes,
            booking.customer_notes,
            booking.created_at.format(DATETIME_FMT).to_string(),
            booking.updated_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("{BOOKING_SELECT} WHERE id = ?1"),
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_bookings_for_date(
    conn: &Connection,
    provider_id: &str,
    date: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT}
         WHERE provider_id = ?1 AND date = ?2
         ORDER BY start_time ASC"
    ))?;

    let rows = stmt.query_map(
        params![provider_id, date.format(DATE_FMT).to_string()],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_bookings_in_range(
    conn: &Connection,
    provider_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT}
         WHERE provider_id = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY date ASC, start_time ASC"
    ))?;

    let rows = stmt.query_map(
        params![
            provider_id,
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string(),
        ],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_bookings_since(
    conn: &Connection,
    provider_id: &str,
    since: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT} WHERE provider_id = ?1 AND date >= ?2 ORDER BY date ASC"
    ))?;

    let rows = stmt.query_map(
        params![provider_id, since.format(DATE_FMT).to_string()],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
    provider_notes: Option<String>,
    now: NaiveDateTime,
) -> anyhow::Result<bool> {
    let count = match provider_notes {
        Some(notes) => conn.execute(
            "UPDATE bookings SET status = ?1, provider_notes = ?2, updated_at = ?3 WHERE id = ?4",
            params![status.as_str(), notes, now.format(DATETIME_FMT).to_string(), id],
        )?,
        None => conn.execute(
            "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), now.format(DATETIME_FMT).to_string(), id],
        )?,
    };
    Ok(count > 0)
}

const BOOKING_SELECT: &str =
    "SELECT id, provider_id, service_id, date, start_time, duration_minutes,
            customer_name, customer_email, customer_phone,
            service_price, platform_fee, total_amount, confirmation_number,
            status, provider_notes, customer_notes, created_at, updated_at
     FROM bookings";

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let date_str: String = row.get(3)?;
    let status_str: String = row.get(13)?;
    let created_at_str: String = row.get(16)?;
    let updated_at_str: String = row.get(17)?;

    Ok(Booking {
        id: row.get(0)?,
        provider_id: row.get(1)?,
        service_id: row.get(2)?,
        date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
            .unwrap_or_else(|_| Utc::now().date_naive()),
        start_time: row.get(4)?,
        duration_minutes: row.get(5)?,
        customer_name: row.get(6)?,
        customer_email: row.get(7)?,
        customer_phone: row.get(8)?,
        service_price: row.get(9)?,
        platform_fee: row.get(10)?,
        total_amount: row.get(11)?,
        confirmation_number: row.get(12)?,
        status: BookingStatus::parse(&status_str).unwrap_or(BookingStatus::Pending),
        provider_notes: row.get(14)?,
        customer_notes: row.get(15)?,
        created_at: NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
        updated_at: NaiveDateTime::parse_from_str(&updated_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}

// ── Blocked intervals ──

/// Insert a batch of expanded rows atomically: a recurrence either lands
/// fully or not at all.
pub fn insert_blocks(conn: &Connection, blocks: &[BlockedInterval]) -> anyhow::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for block in blocks {
        let start = time_math::to_minutes(&block.start_time).map_err(anyhow::Error::new)?;
        let end = time_math::to_minutes(&block.end_time).map_err(anyhow::Error::new)?;
        tx.execute(
            "INSERT INTO blocked_intervals (id, provider_id, date, start_hour, start_minute,
                                            end_hour, end_minute, kind, title, recurrence_pattern)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                block.id,
                block.provider_id,
                block.date.format(DATE_FMT).to_string(),
                start / 60,
                start % 60,
                end / 60,
                end % 60,
                block.kind.as_str(),
                block.title,
                block.recurrence_pattern,
            ],
        )?;
    }
    tx.commit()?;
    Ok(blocks.len())
}

pub fn get_blocks_for_date(
    conn: &Connection,
    provider_id: &str,
    date: NaiveDate,
) -> anyhow::Result<Vec<BlockedInterval>> {
    let mut stmt = conn.prepare(&format!(
        "{BLOCK_SELECT} WHERE provider_id = ?1 AND date = ?2 ORDER BY start_hour, start_minute"
    ))?;

    let rows = stmt.query_map(
        params![provider_id, date.format(DATE_FMT).to_string()],
        parse_block_row,
    )?;

    let mut blocks = vec![];
    for row in rows {
        blocks.push(row?);
    }
    Ok(blocks)
}

pub fn get_blocks_in_range(
    conn: &Connection,
    provider_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<BlockedInterval>> {
    let mut stmt = conn.prepare(&format!(
        "{BLOCK_SELECT}
         WHERE provider_id = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY date, start_hour, start_minute"
    ))?;

    let rows = stmt.query_map(
        params![
            provider_id,
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string(),
        ],
        parse_block_row,
    )?;

    let mut blocks = vec![];
    for row in rows {
        blocks.push(row?);
    }
    Ok(blocks)
}

pub fn delete_block(conn: &Connection, provider_id: &str, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM blocked_intervals WHERE id = ?1 AND provider_id = ?2",
        params![id, provider_id],
    )?;
    Ok(count > 0)
}

const BLOCK_SELECT: &str =
    "SELECT id, provider_id, date, start_hour, start_minute, end_hour, end_minute,
            kind, title, recurrence_pattern
     FROM blocked_intervals";

/// Normalization boundary: hour/minute integer columns come out as
/// canonical "HH:MM" strings.
fn parse_block_row(row: &rusqlite::Row) -> rusqlite::Result<BlockedInterval> {
    let date_str: String = row.get(2)?;
    let kind_str: String = row.get(7)?;
    let start_hour: i32 = row.get(3)?;
    let start_minute: i32 = row.get(4)?;
    let end_hour: i32 = row.get(5)?;
    let end_minute: i32 = row.get(6)?;

    Ok(BlockedInterval {
        id: row.get(0)?,
        provider_id: row.get(1)?,
        date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
            .unwrap_or_else(|_| Utc::now().date_naive()),
        start_time: format!("{start_hour:02}:{start_minute:02}"),
        end_time: format!("{end_hour:02}:{end_minute:02}"),
        kind: BlockKind::parse(&kind_str),
        title: row.get(8)?,
        recurrence_pattern: row.get(9)?,
    })
}
