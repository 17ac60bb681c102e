//! Streams synthetic orientation frames at the daemon's websocket, for
//! bench runs without the wrist sensor. Insecure transport only.

use anyhow::Result;
use api::Orientation;
use futures_util::{SinkExt, StreamExt};
use log::{info, warn};
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://127.0.0.1:8443/".to_string());

    info!("Connecting to {}...", url);
    let (ws, _) = connect_async(&url).await?;
    let (mut tx, mut rx) = ws.split();

    // Drain inbound frames so keep-alive pings get answered.
    tokio::spawn(async move {
        while let Some(frame) = rx.next().await {
            match frame {
                Ok(Message::Close(_)) => {
                    info!("Server closed the channel");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Read error: {}", e);
                    break;
                }
            }
        }
    });

    println!("Streaming orientation frames to {}...", url);

    let mut alpha = 0;
    loop {
        let frame = Orientation {
            alpha,
            beta: 0,
            gamma: 0,
        };
        tx.send(Message::Text(serde_json::to_string(&frame)?)).await?;
        alpha = (alpha + 1) % 360;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
