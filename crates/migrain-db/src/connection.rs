use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

/// Open an existing database without the ability to create or modify it.
pub(crate) fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(path, flags)
}

/// Open (creating if needed) a database for writing.
pub(crate) fn open_read_write(
    path: &Path,
    busy_timeout: Option<Duration>,
) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    if let Some(timeout) = busy_timeout {
        conn.busy_timeout(timeout)?;
    }
    Ok(conn)
}
