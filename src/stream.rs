// src/stream.rs
use std::io::{self, Read};
use std::net::TcpStream;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("stream read failed: {0}")]
    Read(#[from] io::Error),
}

/// Client side of the local RGB capture socket.
///
/// One blocking connection for the life of the process, opened eagerly at
/// construction. `read_chunk` is a single `read` of up to `read_cap` bytes
/// returning whatever the transport has right now: no framing, no length
/// guarantee, no alignment to the 4-byte pixel groups the sender emits.
/// There is no timeout either, so a connected-but-silent peer blocks the
/// caller indefinitely; that is why the engine loop owns this, not the GUI.
///
/// Generic over the underlying reader so tests can feed it an in-memory
/// byte source instead of a live socket.
pub struct StreamClient<S = TcpStream> {
    stream: S,
    read_cap: usize,
    peer: String,
}

impl StreamClient<TcpStream> {
    /// Opens the connection. Fails immediately if the endpoint is
    /// unreachable; there is no retry.
    pub fn connect(host: &str, port: u16, read_cap: usize) -> Result<Self, StreamError> {
        let addr = format!("{host}:{port}");
        let stream = TcpStream::connect(&addr).map_err(|source| StreamError::Connect {
            addr: addr.clone(),
            source,
        })?;
        log::info!("connected to capture socket at {addr}");
        Ok(Self {
            stream,
            read_cap,
            peer: addr,
        })
    }
}

impl<S: Read> StreamClient<S> {
    /// Wraps an arbitrary byte source (tests, replay files).
    pub fn from_reader(stream: S, read_cap: usize) -> Self {
        Self {
            stream,
            read_cap,
            peer: "<reader>".to_owned(),
        }
    }

    /// Returns the address in use (for logging).
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// One blocking receive of up to `read_cap` bytes.
    ///
    /// An empty result means the peer closed the connection; callers must
    /// treat that explicitly rather than averaging a zero-length chunk.
    pub fn read_chunk(&mut self) -> Result<Vec<u8>, StreamError> {
        let mut buf = vec![0u8; self.read_cap];
        let n = self.stream.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_chunk_caps_at_read_cap() {
        let data = vec![7u8; 250];
        let mut client = StreamClient::from_reader(Cursor::new(data), 100);
        let chunk = client.read_chunk().unwrap();
        assert_eq!(chunk.len(), 100);
        assert!(chunk.iter().all(|&b| b == 7));
    }

    #[test]
    fn short_read_returned_as_is() {
        let mut client = StreamClient::from_reader(Cursor::new(vec![1, 2, 3]), 100);
        assert_eq!(client.read_chunk().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn closed_peer_yields_empty_chunk() {
        let mut client = StreamClient::from_reader(Cursor::new(Vec::new()), 100);
        assert!(client.read_chunk().unwrap().is_empty());
    }
}
