//! TCP client for the remote quote endpoint.
//!
//! Every call opens a fresh connection, writes one request line and reads one
//! response line. There is no retry: a failed call is reported to the caller and
//! the next polling round simply tries again.
use log::{debug, info};
use quote_common::net::{read_message, write_message};
use quote_common::{Quote, QuoteError, Request, Response, Result};
use std::io::BufReader;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Default connect/read/write timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of remote quote records.
pub trait RemoteSource {
    /// Returns the full remote record set.
    fn fetch_remote(&self) -> Result<Vec<Quote>>;
}

/// Client for a single endpoint address.
#[derive(Debug, Clone)]
pub struct SyncClient {
    server_addr: String,
    timeout: Duration,
}

impl SyncClient {
    pub fn new(server_addr: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn connect(&self) -> Result<TcpStream> {
        let mut last_err = None;
        for addr in self.server_addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.timeout))?;
                    stream.set_write_timeout(Some(self.timeout))?;
                    return Ok(stream);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(match last_err {
            Some(e) => QuoteError::Io(e),
            None => QuoteError::Format(format!(
                "Address {} did not resolve",
                self.server_addr
            )),
        })
    }

    fn exchange(&self, request: &Request) -> Result<Response> {
        let stream = self.connect()?;
        debug!("Sending {:?} to {}", request, self.server_addr);
        let mut writer = &stream;
        write_message(&mut writer, request)?;
        let response = read_message(&mut BufReader::new(&stream))?;
        match response {
            Response::Error { message } => Err(QuoteError::Protocol(message)),
            response => Ok(response),
        }
    }

    /// Submits `quote` and returns the endpoint's echo.
    pub fn post_quote(&self, quote: &Quote) -> Result<Quote> {
        let request = Request::Post {
            quote: quote.clone(),
        };
        match self.exchange(&request)? {
            Response::Created { quote } => {
                info!("Server accepted quote as {:?}", quote.id);
                Ok(quote)
            }
            other => Err(QuoteError::Protocol(format!(
                "unexpected response to POST: {:?}",
                other
            ))),
        }
    }
}

impl RemoteSource for SyncClient {
    fn fetch_remote(&self) -> Result<Vec<Quote>> {
        match self.exchange(&Request::Fetch)? {
            Response::Quotes { quotes } => {
                debug!("Fetched {} remote quotes", quotes.len());
                Ok(quotes)
            }
            other => Err(QuoteError::Protocol(format!(
                "unexpected response to FETCH: {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// Serves one connection with a canned response.
    fn one_shot_server(response: Response) -> (String, thread::JoinHandle<Request>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let request: Request = read_message(&mut BufReader::new(&stream)).unwrap();
            let mut writer = &stream;
            write_message(&mut writer, &response).unwrap();
            request
        });
        (addr, handle)
    }

    #[test]
    fn fetch_returns_remote_quotes() {
        let quotes = vec![Quote::new("remote", "R").unwrap().with_id(1)];
        let (addr, server) = one_shot_server(Response::Quotes {
            quotes: quotes.clone(),
        });
        let fetched = SyncClient::new(addr).fetch_remote().unwrap();
        assert_eq!(fetched, quotes);
        assert_eq!(server.join().unwrap(), Request::Fetch);
    }

    #[test]
    fn post_returns_echo() {
        let echoed = Quote::new("posted", "P").unwrap().with_id(101);
        let (addr, server) = one_shot_server(Response::Created {
            quote: echoed.clone(),
        });
        let sent = Quote::new("posted", "P").unwrap();
        assert_eq!(SyncClient::new(addr).post_quote(&sent).unwrap(), echoed);
        assert_eq!(server.join().unwrap(), Request::Post { quote: sent });
    }

    #[test]
    fn server_error_becomes_protocol_error() {
        let (addr, server) = one_shot_server(Response::Error {
            message: "nope".into(),
        });
        let err = SyncClient::new(addr).fetch_remote().unwrap_err();
        assert!(matches!(err, QuoteError::Protocol(ref m) if m == "nope"));
        server.join().unwrap();
    }

    #[test]
    fn mismatched_response_is_rejected() {
        let (addr, server) = one_shot_server(Response::Quotes { quotes: Vec::new() });
        let quote = Quote::new("x", "y").unwrap();
        let err = SyncClient::new(addr).post_quote(&quote).unwrap_err();
        assert!(matches!(err, QuoteError::Protocol(_)));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_server_is_io_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);
        let client = SyncClient::new(addr).with_timeout(Duration::from_millis(200));
        assert!(matches!(client.fetch_remote(), Err(QuoteError::Io(_))));
    }
}
