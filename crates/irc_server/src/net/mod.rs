pub mod actor;
pub mod connection;

use crate::config::Config;
use crate::state::Server;
use actor::ActorEvent;
use log::info;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const ACTOR_CHANNEL_CAPACITY: usize = 1024;

/// §4.5: the server loop, realized as a listener task feeding a single
/// actor task plus one reader/writer pair per connection.
pub async fn run(port: u16, password: String, hostname: String, config: Config) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on port {port}");

    let server = Server::new(hostname, password, config);
    let (actor_tx, actor_rx) = mpsc::channel::<ActorEvent>(ACTOR_CHANNEL_CAPACITY);
    let actor_handle = tokio::spawn(actor::run_actor(server, actor_rx));

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = accepted?;
                let host = addr.ip().to_string();
                let tx = actor_tx.clone();
                tokio::spawn(connection::handle_connection(stream, host, tx));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received shutdown signal");
                let _ = actor_tx.send(ActorEvent::Shutdown).await;
                break;
            }
        }
    }

    drop(actor_tx);
    let _ = actor_handle.await;
    Ok(())
}
