//! Shared networking constants and helpers used by client and server.
use std::io::{BufRead, Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::QuoteError;

/// TCP port of the remote quote endpoint.
pub const SYNC_PORT: u16 = 8080;

/// Upper bound for a single framed message, in bytes.
pub const MAX_MESSAGE_LEN: usize = 1024 * 1024;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Writes `message` as a single JSON line and flushes.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<(), QuoteError> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    Ok(())
}

/// Reads one JSON line and decodes it.
///
/// Fails with `Protocol` if the peer closed the connection before sending a line
/// or the line exceeds [`MAX_MESSAGE_LEN`].
pub fn read_message<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> Result<T, QuoteError> {
    let mut line = String::new();
    let size = Read::take(&mut *reader, MAX_MESSAGE_LEN as u64 + 1).read_line(&mut line)?;
    if size == 0 {
        return Err(QuoteError::Protocol("connection closed before a message".into()));
    }
    if size > MAX_MESSAGE_LEN {
        return Err(QuoteError::Protocol(format!(
            "message exceeds {} bytes",
            MAX_MESSAGE_LEN
        )));
    }
    Ok(serde_json::from_str(line.trim_end())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Request;
    use crate::quote::Quote;
    use std::io::Cursor;

    #[test]
    fn framed_messages_are_read_one_per_line() {
        let mut buf = Vec::new();
        write_message(&mut buf, &Request::Fetch).unwrap();
        let post = Request::Post {
            quote: Quote::new("a", "b").unwrap(),
        };
        write_message(&mut buf, &post).unwrap();

        let mut reader = Cursor::new(buf);
        let first: Request = read_message(&mut reader).unwrap();
        let second: Request = read_message(&mut reader).unwrap();
        assert_eq!(first, Request::Fetch);
        assert_eq!(second, post);
    }

    #[test]
    fn oversized_line_is_a_protocol_error() {
        let mut payload = vec![b'a'; MAX_MESSAGE_LEN + 10];
        payload.push(b'\n');
        let mut reader = Cursor::new(payload);
        let err = read_message::<_, Request>(&mut reader).unwrap_err();
        assert!(matches!(err, QuoteError::Protocol(_)));
    }

    #[test]
    fn empty_stream_is_a_protocol_error() {
        let mut reader = Cursor::new(Vec::<u8>::new());
        let err = read_message::<_, Request>(&mut reader).unwrap_err();
        assert!(matches!(err, QuoteError::Protocol(_)));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let mut reader = Cursor::new(b"not json\n".to_vec());
        let err = read_message::<_, Request>(&mut reader).unwrap_err();
        assert!(matches!(err, QuoteError::SerdeJson(_)));
    }
}
