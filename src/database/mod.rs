pub mod seed;

use crate::DbPool;
use anyhow::Context;
use diesel::connection::SimpleConnection;
use diesel::r2d2::ConnectionManager;
use diesel::SqliteConnection;
use r2d2::PooledConnection;

/// Applied to every pooled connection. Foreign keys are off by default in
/// SQLite; the attendee cascade and the appointment/medical-record restrict
/// rules depend on them.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .context("failed to create DB pool")
}

pub fn get_db_conn(
    pool: &DbPool,
) -> anyhow::Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    pool.get().context("DB connection")
}

const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    date_of_birth DATE NOT NULL,
    gender TEXT NOT NULL,
    address TEXT NOT NULL,
    emergency_contact TEXT NOT NULL,
    emergency_contact_phone TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_patients_email ON patients (email);

CREATE TABLE IF NOT EXISTS doctors (
    id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    specialization TEXT NOT NULL,
    license_number TEXT NOT NULL,
    years_of_experience INTEGER NOT NULL,
    department TEXT NOT NULL,
    is_available BOOLEAN NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_doctors_email ON doctors (email);
CREATE UNIQUE INDEX IF NOT EXISTS idx_doctors_license ON doctors (license_number);

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY NOT NULL,
    patient_id TEXT NOT NULL REFERENCES patients (id) ON DELETE RESTRICT,
    doctor_id TEXT NOT NULL REFERENCES doctors (id) ON DELETE RESTRICT,
    scheduled_at TIMESTAMP NOT NULL,
    duration_minutes INTEGER NOT NULL DEFAULT 30,
    status TEXT NOT NULL,
    reason TEXT NOT NULL,
    notes TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS medical_records (
    id TEXT PRIMARY KEY NOT NULL,
    patient_id TEXT NOT NULL REFERENCES patients (id) ON DELETE RESTRICT,
    doctor_id TEXT NOT NULL REFERENCES doctors (id) ON DELETE RESTRICT,
    diagnosis TEXT NOT NULL,
    treatment TEXT NOT NULL,
    medications TEXT NOT NULL,
    notes TEXT NOT NULL,
    visit_date TIMESTAMP NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    start_time TIMESTAMP NOT NULL,
    end_time TIMESTAMP NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS attendees (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email_address TEXT NOT NULL,
    status TEXT NOT NULL,
    event_id TEXT NOT NULL REFERENCES events (id) ON DELETE CASCADE,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_attendees_event_email
    ON attendees (event_id, email_address);
"#;

/// Creates the tables on first start. The schema is small enough that a
/// migration tool would be overkill; `CREATE TABLE IF NOT EXISTS` keeps
/// restarts idempotent.
pub fn init_schema(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = get_db_conn(pool)?;
    conn.batch_execute(DDL).context("schema bootstrap")?;
    Ok(())
}

/// In-memory pool for tests. Capped at one connection so that every round
/// trip sees the same `:memory:` database.
#[cfg(test)]
pub fn test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .expect("test pool");
    init_schema(&pool).expect("test schema");
    pool
}
