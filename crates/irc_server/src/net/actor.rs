//! The single task that owns all server state (§4 of SPEC_FULL.md).
//!
//! Every other task only ever sends an `ActorEvent` here; this is the one
//! place `Server`'s registries are mutated, so the ordering guarantees of
//! §5 ("all messages produced by one command handler are appended to
//! recipient buffers before any other handler observes the server state")
//! hold without any lock.

use crate::commands::dispatch;
use crate::parser;
use crate::reply::Reply;
use crate::state::{Client, ClientId, Server};
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};

pub enum ActorEvent {
    Connected {
        host: String,
        outbound: mpsc::Sender<String>,
        assigned_id: oneshot::Sender<ClientId>,
        close: oneshot::Sender<()>,
    },
    Line {
        id: ClientId,
        line: String,
    },
    Disconnected {
        id: ClientId,
    },
    Shutdown,
}

pub async fn run_actor(mut server: Server, mut events: mpsc::Receiver<ActorEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ActorEvent::Connected { host, outbound, assigned_id, close } => {
                let id = server.next_id();
                info!("client {id} connected from {host}");
                server.clients.insert(id, Client::new(id, host, outbound, close));
                let _ = assigned_id.send(id);
            }
            ActorEvent::Line { id, line } => {
                debug!("client {id} >> {line}");
                match parser::parse_line(&line) {
                    Some(msg) => dispatch(&mut server, id, &msg.command, &msg.params),
                    None => warn!("client {id}: dropped unparsable or over-cap line"),
                }
                server.sweep();
            }
            ActorEvent::Disconnected { id } => {
                server.disconnect(id, "Connection reset by peer");
                server.sweep();
            }
            ActorEvent::Shutdown => {
                info!("shutting down, notifying {} clients", server.clients.len());
                let ids: Vec<ClientId> = server.clients.keys().copied().collect();
                let line = Reply::Error { reason: "Server is shutting down".to_string() }.render(&server.hostname, "");
                for id in ids {
                    server.send_to_one(id, line.clone());
                }
                break;
            }
        }
    }
}
