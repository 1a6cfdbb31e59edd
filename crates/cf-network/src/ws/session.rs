use std::sync::Arc;
use std::time::Duration;

use cf_core::network::{ConnectionEvent, Endpoint, InboundMessage, OutboundEnvelope};
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, info_span, Instrument};

use super::client::ClientInner;
use crate::error::ConnectionError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub(super) enum SessionCommand {
    Send(String),
    Close,
}

const NORMAL_CLOSURE: u16 = 1000;
const NO_STATUS: u16 = 1005;

/// Dial `endpoint` and pump frames until the connection ends.
pub(super) async fn run_session(
    inner: Arc<ClientInner>,
    endpoint: Endpoint,
    generation: u64,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
) {
    let span = info_span!(
        "ws.session",
        endpoint = %endpoint,
        secure = endpoint.is_secure(),
        generation
    );
    async move {
        let connect_timeout = inner.options.connect_timeout;
        info!("Connecting");

        let stream = match timeout(connect_timeout, connect_async(endpoint.as_str())).await {
            Ok(Ok((stream, _response))) => stream,
            Ok(Err(err)) => {
                inner.fail(generation, ConnectionError::Connect(err.to_string()));
                return;
            }
            Err(_) => {
                inner.fail(generation, ConnectionError::Timeout(connect_timeout));
                return;
            }
        };

        if !inner.mark_open(generation) {
            debug!("Session superseded before open, dropping stream");
            return;
        }
        info!("Connected");

        if let Err(err) = pump(&inner, generation, stream, commands).await {
            inner.fail(generation, err);
        }
    }
    .instrument(span)
    .await
}

async fn pump(
    inner: &Arc<ClientInner>,
    generation: u64,
    stream: WsStream,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
) -> Result<(), ConnectionError> {
    let (mut write, mut read) = stream.split();

    // First action of every open, ahead of anything queued by send().
    let hello = OutboundEnvelope::hello(&inner.options.identity)
        .to_json()
        .map_err(|e| ConnectionError::Protocol(e.to_string()))?;
    write.send(Message::Text(hello)).await?;
    debug!("Hello sent");

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    info!(message = %text, "Inbound text message");
                    inner.on_message(generation, ConnectionEvent::Message(InboundMessage::Text(text)));
                }
                Some(Ok(Message::Binary(bytes))) => {
                    info!(len = bytes.len(), "Inbound binary message");
                    inner.on_message(generation, ConnectionEvent::Message(InboundMessage::Binary(bytes)));
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = describe_close(frame.as_ref());
                    info!(code, reason = %reason, "Peer is closing the connection");
                    inner.mark_closing(generation, code, &reason);
                    drain(&mut read, inner.options.close_grace).await;
                    inner.mark_closed(generation, code, &reason);
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => {
                    return Err(ConnectionError::Transport(
                        "connection ended without a close frame".to_string(),
                    ))
                }
            },
            command = commands.recv() => match command {
                Some(SessionCommand::Send(json)) => write.send(Message::Text(json)).await?,
                Some(SessionCommand::Close) | None => {
                    let frame = CloseFrame {
                        code: CloseCode::Normal,
                        reason: "closed by client".into(),
                    };
                    if let Err(err) = write.send(Message::Close(Some(frame))).await {
                        debug!(error = %err, "Close frame could not be sent");
                    }
                    drain(&mut read, inner.options.close_grace).await;
                    inner.mark_closed(generation, NORMAL_CLOSURE, "closed by client");
                    return Ok(());
                }
            },
        }
    }
}

/// Read until the peer finishes the close handshake or `grace` runs out.
async fn drain(read: &mut SplitStream<WsStream>, grace: Duration) {
    let finished = timeout(grace, async {
        while let Some(frame) = read.next().await {
            if frame.is_err() {
                break;
            }
        }
    })
    .await;
    if finished.is_err() {
        debug!(grace_ms = grace.as_millis() as u64, "Peer did not finish close handshake");
    }
}

fn describe_close(frame: Option<&CloseFrame<'_>>) -> (u16, String) {
    match frame {
        Some(frame) => (u16::from(frame.code), frame.reason.to_string()),
        None => (NO_STATUS, String::new()),
    }
}
