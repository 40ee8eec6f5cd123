//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage, MOVE_ACCEPTED};
use crate::session::{MoveReport, SessionManager};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, sessions: Arc<SessionManager>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Connect Four server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let sessions = Arc::clone(&sessions);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, sessions).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    sessions: Arc<SessionManager>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    while let Some(msg) = ws_receiver.next().await {
        let reply = match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(client_msg, &sessions),
                Err(e) => {
                    warn!("Invalid message from {}: {}", addr, text);
                    ServerMessage::bad_request(format!("Invalid message: {}", e))
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", addr);
                break;
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", addr, e);
                break;
            }
            // Pings are answered by tungstenite itself
            _ => continue,
        };

        let text = serde_json::to_string(&reply)?;
        ws_sender.send(Message::Text(text.into())).await?;
    }

    info!("Connection closed for {}", addr);
    Ok(())
}

/// Serve one client request.
pub fn handle_message(msg: ClientMessage, sessions: &SessionManager) -> ServerMessage {
    match msg {
        ClientMessage::StartGame(config) => {
            let (game_id, state) = sessions.create(config);
            ServerMessage::GameStarted { game_id, state }
        }

        ClientMessage::Move { game_id, column } => {
            move_reply(game_id, sessions.apply_move(game_id, column))
        }

        ClientMessage::ComputerMove { game_id } => {
            move_reply(game_id, sessions.computer_move(game_id))
        }

        ClientMessage::GetState { game_id } => match sessions.state(game_id) {
            Ok(state) => ServerMessage::GameState { game_id, state },
            Err(e) => ServerMessage::bad_request(e.to_string()),
        },

        ClientMessage::Ping => ServerMessage::Pong,
    }
}

fn move_reply(
    game_id: Uuid,
    report: Result<MoveReport, crate::session::SessionError>,
) -> ServerMessage {
    match report {
        Ok(MoveReport { outcome, state }) => {
            let result = match outcome {
                Ok(_) => MOVE_ACCEPTED.to_string(),
                Err(e) => {
                    debug!("Game {}: move refused: {}", game_id, e);
                    e.to_string()
                }
            };
            ServerMessage::MoveResult {
                game_id,
                result,
                state,
            }
        }
        Err(e) => ServerMessage::bad_request(e.to_string()),
    }
}
