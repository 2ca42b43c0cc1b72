use sqlx::Executor;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    apply_schema(&pool)
        .await
        .expect("Failed to apply database schema");

    pool
}

/// Embedded DDL, applied at startup. Idempotent: every statement is
/// CREATE ... IF NOT EXISTS, and the weekend lookup is only seeded when empty.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(SCHEMA_SQL).await?;

    let weekend_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weekends")
        .fetch_one(pool)
        .await?;
    if weekend_count == 0 {
        sqlx::query(
            r#"
            INSERT INTO weekends (day) VALUES
            ('Saturday'), ('Sunday'), ('Monday'), ('Tuesday'),
            ('Wednesday'), ('Thursday'), ('Friday')
            "#,
        )
        .execute(pool)
        .await?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS departments (
    department_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    department_name TEXT NOT NULL,
    created_by      INTEGER NOT NULL,
    created_at      INTEGER DEFAULT (strftime('%s','now')),
    updated_by      INTEGER,
    updated_at      INTEGER
);

CREATE TABLE IF NOT EXISTS designations (
    designation_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    designation_name TEXT NOT NULL,
    created_by       INTEGER NOT NULL,
    created_at       INTEGER DEFAULT (strftime('%s','now')),
    updated_by       INTEGER,
    updated_at       INTEGER
);

CREATE TABLE IF NOT EXISTS employee_types (
    employee_type_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_type_name TEXT NOT NULL,
    created_by         INTEGER NOT NULL,
    created_at         INTEGER DEFAULT (strftime('%s','now')),
    updated_by         INTEGER,
    updated_at         INTEGER
);

CREATE TABLE IF NOT EXISTS weekends (
    weekend_id INTEGER PRIMARY KEY AUTOINCREMENT,
    day        TEXT NOT NULL CHECK (day IN
        ('Saturday','Sunday','Monday','Tuesday','Wednesday','Thursday','Friday'))
);

CREATE TABLE IF NOT EXISTS office_timing (
    office_timing_id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time       TEXT NOT NULL,
    end_time         TEXT NOT NULL,
    created_by       INTEGER NOT NULL,
    created_at       INTEGER DEFAULT (strftime('%s','now')),
    updated_by       INTEGER,
    updated_at       INTEGER
);

CREATE TABLE IF NOT EXISTS office_timing_weekends (
    office_timing_weekend_id INTEGER PRIMARY KEY AUTOINCREMENT,
    office_timing_id INTEGER NOT NULL
        REFERENCES office_timing (office_timing_id) ON DELETE CASCADE,
    weekend_id       INTEGER NOT NULL
        REFERENCES weekends (weekend_id) ON DELETE CASCADE,
    created_by       INTEGER NOT NULL,
    created_at       INTEGER DEFAULT (strftime('%s','now')),
    updated_by       INTEGER,
    updated_at       INTEGER
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id             INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name               TEXT NOT NULL,
    email                   TEXT NOT NULL UNIQUE,
    official_phone          TEXT NOT NULL UNIQUE,
    personal_phone          TEXT,
    present_address         TEXT NOT NULL,
    permanent_address       TEXT,
    emergency_contact_name  TEXT,
    emergency_contact_phone TEXT,
    photo_url               TEXT,
    cv_url                  TEXT,
    dob                     TEXT NOT NULL,
    doj                     TEXT NOT NULL,
    gender                  TEXT NOT NULL CHECK (gender IN ('Male','Female')),
    blood_group             TEXT CHECK (blood_group IN
        ('A+','A-','B+','B-','AB+','AB-','O+','O-')),
    basic_salary            REAL,
    gross_salary            REAL NOT NULL,
    is_active               INTEGER NOT NULL DEFAULT 1,
    emp_code                TEXT NOT NULL UNIQUE,
    department_id           INTEGER NOT NULL
        REFERENCES departments (department_id),
    designation_id          INTEGER NOT NULL
        REFERENCES designations (designation_id),
    employee_type_id        INTEGER NOT NULL
        REFERENCES employee_types (employee_type_id),
    office_timing_id        INTEGER
        REFERENCES office_timing (office_timing_id) ON DELETE SET NULL,
    created_by              INTEGER NOT NULL,
    created_at              INTEGER DEFAULT (strftime('%s','now')),
    updated_by              INTEGER,
    updated_at              INTEGER
);

CREATE TABLE IF NOT EXISTS leave_types (
    leave_type_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    leave_type_name TEXT NOT NULL,
    total_leaves    INTEGER NOT NULL,
    created_by      INTEGER NOT NULL,
    created_at      INTEGER DEFAULT (strftime('%s','now')),
    updated_by      INTEGER,
    updated_at      INTEGER
);

CREATE TABLE IF NOT EXISTS employee_leave_types (
    employee_leave_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id   INTEGER NOT NULL
        REFERENCES employees (employee_id) ON DELETE CASCADE,
    leave_type_id INTEGER NOT NULL
        REFERENCES leave_types (leave_type_id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS holidays (
    holiday_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    holiday_name TEXT NOT NULL,
    start_date   TEXT NOT NULL,
    end_date     TEXT NOT NULL,
    no_of_days   INTEGER NOT NULL,
    description  TEXT,
    created_by   INTEGER NOT NULL,
    created_at   INTEGER DEFAULT (strftime('%s','now')),
    updated_by   INTEGER,
    updated_at   INTEGER
);

CREATE TABLE IF NOT EXISTS employee_attendances (
    employee_attendance_id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id       INTEGER NOT NULL
        REFERENCES employees (employee_id) ON DELETE CASCADE,
    attendance_date   TEXT NOT NULL,
    in_time           TEXT NOT NULL,
    out_time          TEXT NOT NULL,
    late_in_minutes   INTEGER NOT NULL DEFAULT 0,
    early_out_minutes INTEGER NOT NULL DEFAULT 0,
    created_by        INTEGER NOT NULL,
    created_at        INTEGER DEFAULT (strftime('%s','now')),
    updated_by        INTEGER,
    updated_at        INTEGER,
    UNIQUE (employee_id, attendance_date)
);

CREATE TABLE IF NOT EXISTS salaries (
    salary_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id    INTEGER NOT NULL
        REFERENCES employees (employee_id),
    salary_month   INTEGER NOT NULL,
    salary_year    INTEGER NOT NULL,
    basic_salary   REAL NOT NULL,
    gross_salary   REAL NOT NULL,
    net_salary     REAL NOT NULL,
    doj            TEXT,
    department_id  INTEGER REFERENCES departments (department_id),
    designation_id INTEGER REFERENCES designations (designation_id),
    created_by     INTEGER NOT NULL,
    created_at     INTEGER DEFAULT (strftime('%s','now')),
    updated_by     INTEGER,
    updated_at     INTEGER
);

CREATE TABLE IF NOT EXISTS other_salary_components (
    other_salary_component_id INTEGER PRIMARY KEY AUTOINCREMENT,
    component_name TEXT NOT NULL,
    component_type TEXT NOT NULL,
    created_by     INTEGER NOT NULL,
    created_at     INTEGER DEFAULT (strftime('%s','now')),
    updated_by     INTEGER,
    updated_at     INTEGER
);

CREATE TABLE IF NOT EXISTS employee_other_salary_components (
    employee_other_salary_component_id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id               INTEGER NOT NULL
        REFERENCES employees (employee_id) ON DELETE CASCADE,
    other_salary_component_id INTEGER NOT NULL
        REFERENCES other_salary_components (other_salary_component_id),
    salary_month INTEGER NOT NULL,
    salary_year  INTEGER NOT NULL,
    amount       REAL NOT NULL,
    created_by   INTEGER NOT NULL,
    created_at   INTEGER DEFAULT (strftime('%s','now')),
    updated_by   INTEGER,
    updated_at   INTEGER
);
"#;
