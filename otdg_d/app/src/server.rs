use crate::advertise;
use crate::session::SessionController;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use common::{Orientation, OrientationCell, ParserConfig};
use log::{error, info, warn};
use std::net::TcpListener;
use std::time::{Duration, Instant};

/// Shared state for the websocket endpoint.
#[derive(Clone)]
pub struct WsState {
    pub orientation: OrientationCell,
    pub controller: SessionController,
    pub keepalive: Duration,
}

pub fn router(state: WsState) -> Router {
    Router::new().route("/", get(ws_handler)).with_state(state)
}

async fn ws_handler(State(state): State<WsState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state))
}

/// One client session: start sampling, feed inbound orientation frames
/// into the cell, probe the peer for liveness, and stop sampling when the
/// channel ends for any reason.
async fn handle_session(mut socket: WebSocket, state: WsState) {
    match state.controller.start() {
        Ok(true) => info!("client session [STARTED]"),
        Ok(false) => {
            warn!("refusing extra client: a session is already active");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
        Err(e) => {
            error!("session not started: {}", e);
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    }

    let mut probe = tokio::time::interval(state.keepalive / 2);
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            frame = socket.recv() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<Orientation>(&text) {
                            Ok(o) => {
                                state.orientation.set(o);
                                last_seen = Instant::now();
                            }
                            Err(e) => {
                                error!("orientation decode failed: {}", e);
                                let _ = socket.send(Message::Close(None)).await;
                                break;
                            }
                        }
                    }
                    // Any frame proves the peer is alive; axum answers
                    // pings itself, and binary frames carry no
                    // orientation data.
                    Some(Ok(Message::Pong(_) | Message::Ping(_) | Message::Binary(_))) => {
                        last_seen = Instant::now();
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("client closed the channel");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("channel read error: {}", e);
                        break;
                    }
                }
            }
            _ = probe.tick() => {
                if last_seen.elapsed() >= state.keepalive {
                    warn!("keep-alive timeout: closing channel");
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
                if socket.send(Message::Ping(Vec::new())).await.is_err() {
                    warn!("keep-alive probe failed: channel gone");
                    break;
                }
            }
        }
    }

    state.controller.request_stop();
    info!("client session [ENDED]");
}

/// Binds the listener (TLS unless `insecure_transport`), advertises it
/// over mDNS, and serves the websocket endpoint until the process exits.
pub async fn serve(config: &ParserConfig, state: WsState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.listen)?;
    listener.set_nonblocking(true)?;
    let port = listener.local_addr()?.port();

    // Keep the daemon alive for the lifetime of the server.
    let _mdns = advertise::register(port)?;

    let app = router(state);
    if config.insecure_transport {
        warn!("serving INSECURE websocket on {}", config.listen);
        axum_server::from_tcp(listener)
            .serve(app.into_make_service())
            .await?;
    } else {
        let tls = RustlsConfig::from_pem_file(&config.cert, &config.key).await?;
        info!("serving TLS websocket on {}", config.listen);
        axum_server::from_tcp_rustls(listener, tls)
            .serve(app.into_make_service())
            .await?;
    }
    Ok(())
}
