//! # Push Price Feed
//!
//! Socket.IO (Engine.IO v4) client over a plain WebSocket, subscribed to
//! `priceUpdate` events on the default namespace:
//!
//! ```text
//! server: 0{"sid":"...","pingInterval":25000,"pingTimeout":20000}
//! client: 40{"token":"<jwt>"}
//! server: 40{"sid":"..."}
//! server: 42["priceUpdate",{"symbol":"BTCUSDT","price":45210.5,"change24h":1.2}]
//! server: 2        client: 3
//! ```
//!
//! Other events are ignored and malformed frames are logged and skipped.
//! The connection is retried with exponential backoff (1 s doubling up to
//! 60 s); after [`MAX_CONNECTION_ATTEMPTS`] consecutive failures the feed
//! reports [`PriceFeedStatus::Disabled`] and the REST poll carries on alone.
//! A handshake the server rejects (`44`) counts as a failure.
//!
//! The stream runs as a spawned task whose `JoinHandle` is owned by the app
//! and aborted on logout or when the price screens are left.

use std::time::Duration;

use async_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::dto::trading::LivePrice;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

use crate::app::AppEvent;

/// Consecutive failed connection attempts before the feed gives up.
pub const MAX_CONNECTION_ATTEMPTS: u32 = 5;

const INITIAL_RECONNECT_DELAY: Duration = Duration::from_secs(1);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Event name carrying price updates.
pub const PRICE_UPDATE_EVENT: &str = "priceUpdate";

/// Push channel connection state, mirrored into `AppState` for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFeedStatus {
    /// Not connected and not trying
    #[default]
    Disconnected,
    /// First connection attempt in flight
    Connecting,
    Connected,
    /// Waiting to retry after a failure
    Reconnecting { attempt: u32 },
    /// Gave up after repeated failures
    Disabled,
}

impl PriceFeedStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, PriceFeedStatus::Connected)
    }

    pub fn label(&self) -> String {
        match self {
            PriceFeedStatus::Disconnected => "Live feed offline".to_string(),
            PriceFeedStatus::Connecting => "Connecting...".to_string(),
            PriceFeedStatus::Connected => "Live".to_string(),
            PriceFeedStatus::Reconnecting { attempt } => {
                format!("Reconnecting ({}/{})", attempt, MAX_CONNECTION_ATTEMPTS)
            }
            PriceFeedStatus::Disabled => "Live feed disabled (polling)".to_string(),
        }
    }
}

/// Engine.IO open packet payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

impl Handshake {
    /// How long the server may stay silent before the link counts as dead.
    pub fn silence_limit(&self) -> Duration {
        Duration::from_millis(self.ping_interval + self.ping_timeout)
    }
}

/// One Engine.IO text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Message(SocketPacket),
    Noop,
}

/// The Socket.IO packet carried by an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event { name: String, data: Value },
    ConnectError(String),
    /// Acks and binary packets; the feed never uses them.
    Other(char),
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("empty frame")]
    Empty,
    #[error("unknown packet type '{0}'")]
    UnknownType(char),
    #[error("event packet without a name")]
    MissingEventName,
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one Engine.IO text frame.
pub fn parse_frame(text: &str) -> Result<EnginePacket, FrameError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(FrameError::Empty)?;
    let body = chars.as_str();
    match kind {
        '0' => Ok(EnginePacket::Open(serde_json::from_str(body)?)),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping),
        '3' => Ok(EnginePacket::Pong),
        '4' => parse_socket_packet(body).map(EnginePacket::Message),
        '6' => Ok(EnginePacket::Noop),
        other => Err(FrameError::UnknownType(other)),
    }
}

fn parse_socket_packet(text: &str) -> Result<SocketPacket, FrameError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(FrameError::Empty)?;
    let mut rest = chars.as_str();

    // Optional "/namespace," prefix, then an optional numeric ack id.
    if rest.starts_with('/') {
        rest = rest.split_once(',').map_or("", |(_, tail)| tail);
    }
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());

    match kind {
        '0' => Ok(SocketPacket::Connect),
        '1' => Ok(SocketPacket::Disconnect),
        '2' => {
            let mut args = match serde_json::from_str::<Value>(rest)? {
                Value::Array(args) => args.into_iter(),
                _ => return Err(FrameError::MissingEventName),
            };
            let name = match args.next() {
                Some(Value::String(name)) => name,
                _ => return Err(FrameError::MissingEventName),
            };
            let data = args.next().unwrap_or(Value::Null);
            Ok(SocketPacket::Event { name, data })
        }
        '4' => {
            let reason = match serde_json::from_str::<Value>(rest) {
                Ok(Value::Object(map)) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("connection refused")
                    .to_string(),
                Ok(Value::String(message)) => message,
                _ => "connection refused".to_string(),
            };
            Ok(SocketPacket::ConnectError(reason))
        }
        '3' | '5' | '6' => Ok(SocketPacket::Other(kind)),
        other => Err(FrameError::UnknownType(other)),
    }
}

/// Default-namespace CONNECT carrying the auth payload.
pub fn connect_packet(token: &str) -> String {
    format!("40{}", json!({ "token": token }))
}

/// Decode a price tick; `Ok(None)` for other events.
pub fn price_from_event(name: &str, data: Value) -> Result<Option<LivePrice>, serde_json::Error> {
    if name != PRICE_UPDATE_EVENT {
        return Ok(None);
    }
    serde_json::from_value(data).map(Some)
}

/// Delay before retry number `attempt` (1-based).
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    INITIAL_RECONNECT_DELAY
        .saturating_mul(1u32 << exponent)
        .min(MAX_RECONNECT_DELAY)
}

/// Spawn the price stream task on the current tokio runtime.
pub fn spawn_price_stream(url: String, token: String, event_tx: Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(run_price_stream(url, token, event_tx))
}

async fn send_status(event_tx: &Sender<AppEvent>, status: PriceFeedStatus) {
    if event_tx.send(AppEvent::PriceFeedStatus(status)).await.is_err() {
        debug!("Event channel closed, dropping price feed status");
    }
}

#[derive(Debug, PartialEq)]
enum SessionEnd {
    Lost,
    Rejected(String),
    ChannelClosed,
}

/// Connect, forward price ticks and reconnect until disabled or aborted.
pub async fn run_price_stream(url: String, token: String, event_tx: Sender<AppEvent>) {
    info!(url = %url, "Connecting to price stream");
    send_status(&event_tx, PriceFeedStatus::Connecting).await;

    let mut failed_attempts = 0u32;

    loop {
        let joined = match connect_async(&url).await {
            Ok((ws_stream, response)) => {
                debug!(url = %url, status = ?response.status(), "WebSocket transport open");
                let (joined, end) = run_session(ws_stream, &token, &event_tx).await;
                match end {
                    SessionEnd::ChannelClosed => {
                        debug!("Event channel closed, stopping price stream");
                        return;
                    }
                    SessionEnd::Rejected(reason) => {
                        error!(reason = %reason, "Price stream handshake rejected");
                    }
                    SessionEnd::Lost => {}
                }
                joined
            }
            Err(e) => {
                error!(
                    url = %url,
                    error = %e,
                    attempt = failed_attempts + 1,
                    max_attempts = MAX_CONNECTION_ATTEMPTS,
                    "Failed to connect to price stream"
                );
                false
            }
        };

        if joined {
            failed_attempts = 0;
            warn!("Price stream connection lost, reconnecting");
            send_status(&event_tx, PriceFeedStatus::Disconnected).await;
        } else {
            failed_attempts += 1;
            if failed_attempts >= MAX_CONNECTION_ATTEMPTS {
                error!(
                    attempts = failed_attempts,
                    "Maximum connection attempts reached. Disabling price stream."
                );
                send_status(&event_tx, PriceFeedStatus::Disabled).await;
                return;
            }
        }

        let attempt = failed_attempts.max(1);
        let delay = backoff_delay(attempt);
        send_status(&event_tx, PriceFeedStatus::Reconnecting { attempt }).await;
        info!(delay_secs = delay.as_secs(), attempt, "Reconnecting price stream");
        sleep(delay).await;
    }
}

/// Drive one transport connection. Returns whether the namespace was joined.
async fn run_session(
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    token: &str,
    event_tx: &Sender<AppEvent>,
) -> (bool, SessionEnd) {
    let (mut write, mut read) = ws_stream.split();
    let mut joined = false;
    let mut silence_limit = Duration::from_millis(default_ping_interval() + default_ping_timeout());
    let mut message_count = 0u64;

    loop {
        let next = match timeout(silence_limit, read.next()).await {
            Ok(next) => next,
            Err(_) => {
                warn!(message_count, "No traffic from price stream server, dropping connection");
                return (joined, SessionEnd::Lost);
            }
        };

        let text = match next {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Ping(data))) => {
                if let Err(e) = write.send(Message::Pong(data)).await {
                    error!(error = %e, "Failed to send pong response");
                    return (joined, SessionEnd::Lost);
                }
                continue;
            }
            Some(Ok(Message::Close(frame))) => {
                info!(frame = ?frame, message_count, "Price stream closed by server");
                return (joined, SessionEnd::Lost);
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                error!(error = %e, message_count, "Price stream read error");
                return (joined, SessionEnd::Lost);
            }
            None => return (joined, SessionEnd::Lost),
        };

        let reply = match parse_frame(&text) {
            Ok(EnginePacket::Open(handshake)) => {
                debug!(sid = %handshake.sid, ping_interval = handshake.ping_interval, "Engine.IO handshake");
                silence_limit = handshake.silence_limit();
                Some(connect_packet(token))
            }
            Ok(EnginePacket::Ping) => Some("3".to_string()),
            Ok(EnginePacket::Close) | Ok(EnginePacket::Message(SocketPacket::Disconnect)) => {
                info!(message_count, "Price stream disconnected by server");
                return (joined, SessionEnd::Lost);
            }
            Ok(EnginePacket::Message(SocketPacket::Connect)) => {
                info!("Price stream connected");
                joined = true;
                send_status(event_tx, PriceFeedStatus::Connected).await;
                None
            }
            Ok(EnginePacket::Message(SocketPacket::ConnectError(reason))) => {
                return (joined, SessionEnd::Rejected(reason));
            }
            Ok(EnginePacket::Message(SocketPacket::Event { name, data })) => {
                match price_from_event(&name, data) {
                    Ok(Some(price)) => {
                        message_count += 1;
                        trace!(symbol = %price.symbol, price = price.price, "Price tick");
                        if event_tx.send(AppEvent::PriceTick(price)).await.is_err() {
                            return (joined, SessionEnd::ChannelClosed);
                        }
                    }
                    Ok(None) => trace!(event = %name, "Ignoring non-price event"),
                    Err(e) => warn!(error = %e, "Malformed price update, skipping"),
                }
                None
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, frame_length = text.len(), "Unreadable frame, skipping");
                None
            }
        };

        if let Some(reply) = reply {
            if let Err(e) = write.send(Message::Text(reply)).await {
                error!(error = %e, "Failed to write to price stream");
                return (joined, SessionEnd::Lost);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(frame: &str) -> (String, Value) {
        match parse_frame(frame).unwrap() {
            EnginePacket::Message(SocketPacket::Event { name, data }) => (name, data),
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_open_handshake() {
        let packet = parse_frame(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":5000}"#).unwrap();
        match packet {
            EnginePacket::Open(handshake) => {
                assert_eq!(handshake.sid, "abc");
                assert_eq!(handshake.silence_limit(), Duration::from_millis(30_000));
            }
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[test]
    fn test_parse_control_packets() {
        assert_eq!(parse_frame("2").unwrap(), EnginePacket::Ping);
        assert_eq!(parse_frame("3").unwrap(), EnginePacket::Pong);
        assert_eq!(parse_frame("1").unwrap(), EnginePacket::Close);
        assert_eq!(parse_frame(r#"40{"sid":"x"}"#).unwrap(), EnginePacket::Message(SocketPacket::Connect));
        assert_eq!(parse_frame("41").unwrap(), EnginePacket::Message(SocketPacket::Disconnect));
    }

    #[test]
    fn test_parse_price_update() {
        let (name, data) = event(r#"42["priceUpdate",{"symbol":"BTCUSDT","price":45210.5,"change24h":1.2}]"#);
        let price = price_from_event(&name, data).unwrap().unwrap();
        assert_eq!(price.symbol, "BTCUSDT");
        assert_eq!(price.price, 45210.5);
        assert_eq!(price.change_24h, Some(1.2));
    }

    #[test]
    fn test_namespace_and_ack_id_are_skipped() {
        let (name, data) = event(r#"42/prices,17["priceUpdate",{"symbol":"ETHUSDT","price":3100}]"#);
        let price = price_from_event(&name, data).unwrap().unwrap();
        assert_eq!(price.symbol, "ETHUSDT");
        assert_eq!(price.change_24h, None);
    }

    #[test]
    fn test_other_events_are_ignored() {
        let (name, data) = event(r#"42["tradeUpdate",{"id":"1"}]"#);
        assert_eq!(price_from_event(&name, data).unwrap(), None);
    }

    #[test]
    fn test_connect_error_reason() {
        assert_eq!(
            parse_frame(r#"44{"message":"Authentication error"}"#).unwrap(),
            EnginePacket::Message(SocketPacket::ConnectError("Authentication error".to_string()))
        );
    }

    #[test]
    fn test_malformed_frames_are_errors() {
        assert!(parse_frame("").is_err());
        assert!(parse_frame("9").is_err());
        assert!(parse_frame("42not json").is_err());
        assert!(matches!(parse_frame(r#"42[1,2]"#), Err(FrameError::MissingEventName)));
        let (name, data) = event(r#"42["priceUpdate",{"symbol":"BTCUSDT"}]"#);
        assert!(price_from_event(&name, data).is_err());
    }

    #[test]
    fn test_connect_packet_carries_token() {
        assert_eq!(connect_packet("abc"), r#"40{"token":"abc"}"#);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(4), Duration::from_secs(8));
        assert_eq!(backoff_delay(7), Duration::from_secs(60));
        assert_eq!(backoff_delay(40), Duration::from_secs(60));
    }

    #[test]
    fn test_status_labels() {
        assert!(PriceFeedStatus::Connected.is_connected());
        assert_eq!(PriceFeedStatus::Reconnecting { attempt: 2 }.label(), "Reconnecting (2/5)");
    }
}
