use parking_lot::Mutex;
use redis::{Commands, Connection, ConnectionLike, RedisError};
use tracing::debug;

use crate::error::StoreError;
use crate::ports::ListStore;

/// Elements pushed per RPUSH while creating a list
const CREATE_CHUNK: u64 = 4096;

/// `ListStore` over an already-connected Redis client
///
/// Maps the port onto `LLEN`, `DEL`, `RPUSH`, `LSET` and `LINDEX`. The
/// connection is used as handed in; connecting, authenticating and
/// reconnecting stay with the caller. Commands from filters sharing one store
/// are serialized on the connection.
pub struct RedisListStore<C = Connection> {
    conn: Mutex<C>,
}

impl<C: ConnectionLike> RedisListStore<C> {
    pub fn new(conn: C) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Take the connection back
    pub fn into_inner(self) -> C {
        self.conn.into_inner()
    }
}

fn command_error(command: &'static str) -> impl Fn(RedisError) -> StoreError {
    move |err| {
        if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
            StoreError::ConnectionError(format!("{}: {}", command, err))
        } else {
            StoreError::CommandFailed {
                command,
                message: err.to_string(),
            }
        }
    }
}

fn list_index(command: &'static str, index: u64) -> Result<isize, StoreError> {
    isize::try_from(index).map_err(|_| StoreError::CommandFailed {
        command,
        message: format!("index {} exceeds list index range", index),
    })
}

impl<C: ConnectionLike + Send> ListStore for RedisListStore<C> {
    fn length(&self, key: &str) -> Result<u64, StoreError> {
        self.conn.lock().llen(key).map_err(command_error("LLEN"))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _: u64 = self.conn.lock().del(key).map_err(command_error("DEL"))?;
        Ok(())
    }

    fn create(&self, key: &str, len: u64, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.lock();
        let mut remaining = len;
        while remaining > 0 {
            let chunk = remaining.min(CREATE_CHUNK);
            let values: Vec<&[u8]> = vec![value; chunk as usize];
            let _: u64 = conn.rpush(key, values).map_err(command_error("RPUSH"))?;
            remaining -= chunk;
        }
        debug!(key = %key, len, "Created remote list");
        Ok(())
    }

    fn set_at(&self, key: &str, index: u64, value: &[u8]) -> Result<(), StoreError> {
        let index = list_index("LSET", index)?;
        let _: () = self
            .conn
            .lock()
            .lset(key, index, value)
            .map_err(command_error("LSET"))?;
        Ok(())
    }

    fn get_at(&self, key: &str, index: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let index = list_index("LINDEX", index)?;
        self.conn
            .lock()
            .lindex(key, index)
            .map_err(command_error("LINDEX"))
    }
}
