#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use cafedb_core::usecases as uc;
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{cell::RefCell, ops::Deref, sync::Arc, time::Duration};

mod models;
mod repo_impl;
mod schema;


const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database wide settings, applied once when the pool is created.
const DATABASE_PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA wal_checkpoint(TRUNCATE);
PRAGMA encoding = 'UTF-8';
";

/// A pooled connection that holds a lock on the pool while it lives.
///
/// Use [`DbReadOnly`] for queries and [`DbReadWrite`] for changes.
pub struct PooledDb<G> {
    _pool_guard: G,
    conn: RefCell<PooledConnection>,
}

pub type DbReadOnly<'a> = PooledDb<RwLockReadGuard<'a, ConnectionPool>>;
pub type DbReadWrite<'a> = PooledDb<RwLockWriteGuard<'a, ConnectionPool>>;

fn checkout<G>(pool_guard: G, access: &str) -> Fallible<PooledDb<G>>
where
    G: Deref<Target = ConnectionPool>,
{
    let conn = pool_guard.get().inspect_err(|err| {
        log::error!("No pooled database connection available for {access} access: {err}");
    })?;
    Ok(PooledDb {
        _pool_guard: pool_guard,
        conn: RefCell::new(conn),
    })
}

/// A connection inside of a transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbReadWrite<'a> {
    /// Run `f` inside of a transaction that is rolled back if `f` fails.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        let mut failed: Option<uc::Error> = None;
        let res = self.conn.get_mut().transaction(|conn| {
            let conn: &mut SqliteConnection = conn;
            let db = DbConnection {
                conn: RefCell::new(conn),
            };
            f(&db).map_err(|err| {
                failed = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        match (res, failed) {
            (Ok(value), _) => Ok(value),
            // Diesel only reports the rollback
            (Err(_), Some(err)) => Err(err),
            (Err(err), None) => Err(uc::Error::Repo(repo_impl::from_diesel_err(err))),
        }
    }
}

/// Shared access to the connection pool.
///
/// Read connections may be used concurrently while a write
/// connection is exclusive. Serializing writers this way keeps
/// SQLite from failing with `SQLITE_LOCKED`.
#[derive(Clone)]
pub struct Connections {
    pool: SharedConnectionPool,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        use diesel::Connection as _;
        // r2d2 keeps retrying on an inaccessible database file
        // instead of returning an error.
        let mut conn = SqliteConnection::establish(url)?;
        conn.batch_execute(DATABASE_PRAGMAS)?;
        drop(conn);
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
            }))
            .build(ConnectionManager::new(url))?;
        log::debug!("Created a pool with up to {pool_size} connection(s) for {url}");
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        checkout(self.pool.read(), "read-only")
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        checkout(self.pool.write(), "read/write")
    }
}

/// Settings that SQLite only keeps per connection.
///
/// Cascading deletes of votes and comments depend on
/// enforced foreign keys.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        let sql = format!(
            "PRAGMA foreign_keys = ON; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        conn.batch_execute(&sql).map_err(r2d2::Error::QueryError)
    }
}

pub fn run_embedded_database_migrations(mut db: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let applied = db
        .conn
        .get_mut()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    for version in applied {
        log::debug!("Applied database migration {version}");
    }
    Ok(())
}
