//! Per-connection state: one [`Dictionary`], one gas budget, one
//! request/reply loop. Dropped when the socket closes, which is how a
//! session's definitions stop existing — there is no persistence layer.

use axum::extract::ws::{Message, WebSocket};
use catterm::{evaluate, Dictionary, Value};
use futures_util::{SinkExt, StreamExt};

use crate::protocol::{Request, Response};

pub async fn run(mut socket: WebSocket, default_gas: u64) {
    let mut dictionary = Dictionary::new();

    while let Some(msg) = socket.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(err) => {
                tracing::debug!(%err, "socket read failed, closing session");
                break;
            }
        };
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Ping/Pong/Binary: axum answers pings itself; nothing else to do.
            _ => continue,
        };

        let request: Request = match serde_json::from_str(&text) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(%err, raw = %text, "malformed request");
                let reply = Response::err(serde_json::Value::Null, err);
                if send(&mut socket, &reply).await.is_err() {
                    break;
                }
                continue;
            }
        };

        let gas = request.gas.unwrap_or(default_gas);
        let outcome = evaluate(request.code.as_str(), Some(&mut dictionary), gas);

        let (reply, should_quit) = match outcome {
            Ok(residual) => {
                let quit = is_quit(&residual);
                (Response::ok(request.id, residual.to_source()), quit)
            }
            Err(err) => (Response::err(request.id, err), false),
        };

        if send(&mut socket, &reply).await.is_err() {
            break;
        }
        if should_quit {
            tracing::debug!("Quit prompt observed, closing session");
            let _ = socket.send(Message::Close(None)).await;
            break;
        }
    }
}

async fn send(socket: &mut WebSocket, reply: &Response) -> Result<(), axum::Error> {
    let text = serde_json::to_string(reply).expect("Response serialization cannot fail");
    socket.send(Message::Text(text)).await
}

/// A residual of a single top-level `{Quit}`/`{ Quit }` prompt is the
/// collaborator-level terminator; everything else, including a `Prompt`
/// alongside other residual content, is just data.
fn is_quit(residual: &Value) -> bool {
    match residual.as_prompt() {
        Some(payload) => payload.trim().eq_ignore_ascii_case("Quit"),
        None => false,
    }
}
