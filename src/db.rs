use actix_web::{HttpResponse, ResponseError};
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::PgConnection;
use std::fmt;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Raised when no pooled connection can be checked out; answered as a
/// plain 500 so callers never see pool internals.
#[derive(Debug)]
pub struct DbError;

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Database connection error")
    }
}

impl ResponseError for DbError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().body("Database connection error")
    }
}

/// Checks a connection out of the pool; the connection returns to the
/// pool on drop whatever the handler's outcome.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, DbError> {
    pool.get().map_err(|_| DbError)
}
