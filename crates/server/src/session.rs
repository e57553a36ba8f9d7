//! WebSocket link to the render page. The newest connected page wins.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use server_api::RenderSession;
use shared::protocol::RenderCommand;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app_state::AppState;

const COMMAND_QUEUE_DEPTH: usize = 64;

pub(crate) struct PageSession {
    commands: mpsc::Sender<RenderCommand>,
}

impl PageSession {
    pub(crate) fn new(commands: mpsc::Sender<RenderCommand>) -> Self {
        Self { commands }
    }

    fn push(&self, command: RenderCommand) {
        if let Err(error) = self.commands.try_send(command) {
            warn!(%error, "render page is not keeping up; command dropped");
        }
    }
}

impl RenderSession for PageSession {
    fn play_motion(&self, group: &str, sound: Option<&str>) {
        self.push(RenderCommand::PlayMotion {
            group: group.to_string(),
            sound: sound.map(str::to_string),
        });
    }

    fn play_expression(&self, name: &str) {
        self.push(RenderCommand::PlayExpression {
            name: name.to_string(),
        });
    }

    fn play_sound(&self, path: &str) {
        self.push(RenderCommand::PlaySound {
            path: path.to_string(),
        });
    }
}

pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| page_connection(state, socket))
}

async fn page_connection(state: Arc<AppState>, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (commands_tx, mut commands_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);

    let registry = Arc::clone(state.bridge.registry());
    let registration = registry.register_session(Arc::new(PageSession::new(commands_tx)));
    info!(%registration, "render page attached");

    let send_task = tokio::spawn(async move {
        while let Some(command) = commands_rx.recv().await {
            let text = match serde_json::to_string(&command) {
                Ok(v) => v,
                Err(error) => {
                    warn!(%error, "failed to encode render command");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Inbound frames carry nothing yet; read until the page goes away.
    while let Some(Ok(message)) = receiver.next().await {
        if matches!(message, Message::Close(_)) {
            break;
        }
    }

    send_task.abort();
    registry.release(registration);
    info!(%registration, "render page detached");
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
