//! TCP front of the mock endpoint: accepts connections and answers one request each.
use crossbeam_channel::Sender;
use log::{debug, error, info, warn};
use quote_common::net::{read_message, write_message};
use quote_common::{Quote, QuoteError, Request, Response, Result};
use std::io::BufReader;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::model::remote_store::RemoteStore;

/// How long a connection may stay silent before it is dropped.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP receiver serving the remote quote set.
///
/// Each accepted connection carries one `Request` line and gets one `Response`
/// line back. Connections are served on their own threads so a slow or broken
/// client never blocks the others.
pub struct QuoteReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
}

impl QuoteReceiver {
    /// Bind a new TCP receiver to the provided `bind_addr` (e.g., `0.0.0.0:8080`).
    pub fn new(bind_addr: &str) -> Result<Self> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self { socket })
    }

    /// Address the listener is actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking accept loop.
    ///
    /// Every served post is also reported on `posted_tx`, when given. Errors from a
    /// single connection are logged and do not stop the loop.
    pub fn serve(self, store: Arc<RemoteStore>, posted_tx: Option<Sender<Quote>>) -> Result<()> {
        info!("Quote endpoint is started on {}", self.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let store = Arc::clone(&store);
                    let posted_tx = posted_tx.clone();
                    thread::spawn(move || {
                        let peer = stream.peer_addr().ok();
                        if let Err(e) = handle_connection(stream, &store, posted_tx.as_ref()) {
                            warn!("Connection {:?} failed: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}

/// Reads one request from `stream`, answers it and closes the connection.
fn handle_connection(
    stream: TcpStream,
    store: &RemoteStore,
    posted_tx: Option<&Sender<Quote>>,
) -> Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let peer = stream.peer_addr()?;
    let mut reader = BufReader::new(&stream);
    let mut writer = &stream;

    let response = match read_message::<_, Request>(&mut reader) {
        Ok(request) => {
            debug!("Received {:?} from {}", request, peer);
            handle_request(store, request, posted_tx)
        }
        Err(e @ (QuoteError::SerdeJson(_) | QuoteError::Protocol(_))) => Response::Error {
            message: e.to_string(),
        },
        Err(e) => return Err(e),
    };

    write_message(&mut writer, &response)
}

/// Maps a request onto the store.
pub fn handle_request(
    store: &RemoteStore,
    request: Request,
    posted_tx: Option<&Sender<Quote>>,
) -> Response {
    let result = match request {
        Request::Fetch => store.snapshot().map(|quotes| Response::Quotes { quotes }),
        Request::Post { quote } => store.echo_post(quote).map(|quote| {
            info!("Accepted posted quote {:?}: \"{}\"", quote.id, quote.text);
            if let Some(tx) = posted_tx {
                if let Err(e) = tx.send(quote.clone()) {
                    debug!("Post listener gone: {}", e);
                }
            }
            Response::Created { quote }
        }),
    };
    result.unwrap_or_else(|e| Response::Error {
        message: e.to_string(),
    })
}
