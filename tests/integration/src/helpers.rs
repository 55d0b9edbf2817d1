//! Test helpers for integration tests
//!
//! Provides a test server wrapping the real gateway app and a typed
//! WebSocket client speaking the gateway protocol.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use collab_common::AppConfig;
use collab_gateway::protocol::{ClientEvent, JoinPayload, ServerEvent};
use collab_gateway::server::{create_app, GatewayState};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected frame before failing the test
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen when asserting that no frame arrives
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    /// The server's state, kept so tests can inspect the registry directly
    pub state: GatewayState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::default()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = GatewayState::new(config);
        let app = create_app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("binding test listener")?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Base URL for HTTP requests
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// WebSocket endpoint URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a WebSocket client against this server
    pub async fn connect(&self) -> Result<WsClient> {
        WsClient::connect(&self.ws_url()).await
    }
}

/// A typed WebSocket client speaking the gateway protocol
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Connect to a gateway WebSocket endpoint
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(url)
            .await
            .context("connecting websocket")?;
        Ok(Self { stream })
    }

    /// Send a client event as a JSON text frame
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = event.to_json()?;
        self.stream.send(Message::Text(json)).await?;
        Ok(())
    }

    /// Send a `join` and wait for the membership snapshot it triggers
    pub async fn join(&mut self, room: &str, user: &str) -> Result<Vec<String>> {
        self.send(&ClientEvent::Join(JoinPayload {
            room_id: room.into(),
            user_name: user.into(),
        }))
        .await?;
        self.expect_user_joined().await
    }

    /// Receive the next server event, skipping transport-level frames
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        timeout(RECV_TIMEOUT, async {
            while let Some(msg) = self.stream.next().await {
                match msg? {
                    Message::Text(text) => {
                        return ServerEvent::from_json(&text).context("decoding server event");
                    }
                    Message::Close(_) => bail!("connection closed by server"),
                    _ => {}
                }
            }
            bail!("connection ended")
        })
        .await
        .context("timed out waiting for server event")?
    }

    /// Receive and require a `userJoined` snapshot, returned as plain strings
    pub async fn expect_user_joined(&mut self) -> Result<Vec<String>> {
        match self.recv().await? {
            ServerEvent::UserJoined(members) => {
                Ok(members.into_iter().map(|m| m.as_str().to_string()).collect())
            }
            other => bail!("expected userJoined, got {other}"),
        }
    }

    /// Assert that no server event arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.stream.next()).await {
            Err(_elapsed) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("expected silence, received: {text}"),
            Ok(Some(Ok(_))) => Ok(()),
            Ok(Some(Err(e))) => bail!("websocket error while expecting silence: {e}"),
            Ok(None) => bail!("connection ended while expecting silence"),
        }
    }

    /// Send a raw text frame, bypassing the typed protocol
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Gracefully close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Poll `predicate` until it holds or the timeout elapses; returns whether
/// it ever held. Used for effects that trail a transport-level disconnect.
pub async fn wait_until(predicate: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}
