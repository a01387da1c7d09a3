//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    // Customer table
    db.query(CUSTOMER_SCHEMA).await?;

    // Device table
    db.query(DEVICE_SCHEMA).await?;

    // Job table
    db.query(JOB_SCHEMA).await?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Customer table schema.
///
/// The unique phone index is load-bearing: it is what makes
/// resolve-or-create by phone atomic under concurrent intake.
const CUSTOMER_SCHEMA: &str = r#"
-- Customer table, one record per person
DEFINE TABLE IF NOT EXISTS customer SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS name ON customer TYPE string;
DEFINE FIELD IF NOT EXISTS phone ON customer TYPE string;
DEFINE FIELD IF NOT EXISTS email ON customer TYPE option<string>;
DEFINE FIELD IF NOT EXISTS created_at ON customer TYPE datetime DEFAULT time::now();

-- Natural-key dedupe
DEFINE INDEX IF NOT EXISTS customer_phone ON customer FIELDS phone UNIQUE;
"#;

/// Device table schema.
const DEVICE_SCHEMA: &str = r#"
-- Device table, one record per physical unit
DEFINE TABLE IF NOT EXISTS device SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS serial_number ON device TYPE string;
DEFINE FIELD IF NOT EXISTS model ON device TYPE string;
DEFINE FIELD IF NOT EXISTS device_type ON device TYPE string DEFAULT "other";
DEFINE FIELD IF NOT EXISTS customer_id ON device TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON device TYPE datetime DEFAULT time::now();

-- Natural-key dedupe plus owner lookup
DEFINE INDEX IF NOT EXISTS device_serial ON device FIELDS serial_number UNIQUE;
DEFINE INDEX IF NOT EXISTS device_customer ON device FIELDS customer_id;
"#;

/// Job table schema.
const JOB_SCHEMA: &str = r#"
-- Job table for repair work orders
DEFINE TABLE IF NOT EXISTS job SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS customer_id ON job TYPE string;
DEFINE FIELD IF NOT EXISTS device_id ON job TYPE string;
DEFINE FIELD IF NOT EXISTS description ON job TYPE string;
DEFINE FIELD IF NOT EXISTS status ON job TYPE string DEFAULT "to_do";
DEFINE FIELD IF NOT EXISTS urgency ON job TYPE string DEFAULT "medium";
DEFINE FIELD IF NOT EXISTS tags ON job TYPE array<string> DEFAULT [];
DEFINE FIELD IF NOT EXISTS cost ON job TYPE float DEFAULT 0.0;
DEFINE FIELD IF NOT EXISTS created_at ON job TYPE datetime DEFAULT time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON job TYPE datetime DEFAULT time::now();

-- Indexes for board and detail queries
DEFINE INDEX IF NOT EXISTS job_status ON job FIELDS status;
DEFINE INDEX IF NOT EXISTS job_customer ON job FIELDS customer_id;
DEFINE INDEX IF NOT EXISTS job_created ON job FIELDS created_at;
"#;
