use std::sync::LazyLock;

use tokio::runtime::Runtime;
use tokio::sync::{Mutex, MutexGuard};

use db::{DbConfig, DbError};

static TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// A dedicated runtime that outlives every `#[tokio::test]` runtime.
///
/// The embedded SurrealDB engine spawns a background router task on
/// whichever runtime first connects. Each `#[tokio::test]` builds and then
/// drops its own runtime, so pinning the one-time connection to this
/// long-lived runtime keeps the global handle usable across all tests
/// instead of the channel closing when the first test's runtime is torn
/// down.
static DB_RT: LazyLock<Runtime> = LazyLock::new(|| Runtime::new().expect("build dedicated DB runtime"));

pub async fn setup_db() -> Result<MutexGuard<'static, ()>, DbError> {
    let guard = TEST_LOCK.lock().await;
    DB_RT
        .spawn(async { db::init(DbConfig::memory()).await })
        .await
        .expect("db init task panicked")?;
    let db_conn = db::get_db()?;
    db_conn.query("DELETE job; DELETE device; DELETE customer;").await?;
    Ok(guard)
}
