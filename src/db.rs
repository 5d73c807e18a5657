use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

/// A pool of SQLite connections shared by every handler.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Creates a connection pool for the database at `database_url`.
pub fn init_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager).expect("Failed to create pool.")
}
