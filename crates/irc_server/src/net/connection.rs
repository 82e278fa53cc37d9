//! Per-connection reader and writer tasks. Neither task ever touches
//! `Server` directly — the reader only sends `ActorEvent`s, the writer only
//! drains its own `mpsc::Receiver<String>` (§4.6, §5 "slow reader" note).

use crate::framer::LineFramer;
use crate::net::actor::ActorEvent;
use log::{debug, error};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

const OUTBOUND_CHANNEL_CAPACITY: usize = 256;
/// Grace period for the writer to flush a final queued line (e.g. `ERROR`)
/// after the reader stops, before it's force-aborted.
const WRITER_DRAIN_GRACE: Duration = Duration::from_millis(200);

pub async fn handle_connection(stream: TcpStream, host: String, actor_tx: mpsc::Sender<ActorEvent>) {
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(OUTBOUND_CHANNEL_CAPACITY);
    let (assigned_id_tx, assigned_id_rx) = oneshot::channel();
    let (close_tx, mut close_rx) = oneshot::channel::<()>();

    if actor_tx
        .send(ActorEvent::Connected {
            host,
            outbound: outbound_tx,
            assigned_id: assigned_id_tx,
            close: close_tx,
        })
        .await
        .is_err()
    {
        return;
    }
    let Ok(id) = assigned_id_rx.await else { return };

    let (mut read_half, mut write_half) = stream.into_split();

    let mut writer = tokio::spawn(async move {
        while let Some(line) = outbound_rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if write_half.write_all(b"\r\n").await.is_err() {
                break;
            }
            let _ = write_half.flush().await;
        }
    });

    let mut framer = LineFramer::new();
    let mut buf = [0u8; 4096];
    loop {
        tokio::select! {
            result = read_half.read(&mut buf) => {
                match result {
                    Ok(0) => break,
                    Ok(n) => {
                        framer.push(&buf[..n]);
                        while let Some(raw) = framer.next_line() {
                            match String::from_utf8(raw) {
                                Ok(line) => {
                                    let _ = actor_tx.send(ActorEvent::Line { id, line }).await;
                                }
                                Err(_) => debug!("client {id}: dropped non-UTF-8 line"),
                            }
                        }
                    }
                    Err(e) => {
                        error!("client {id}: read error: {e}");
                        break;
                    }
                }
            }
            _ = &mut close_rx => {
                debug!("client {id}: closed by server");
                break;
            }
        }
    }

    let _ = actor_tx.send(ActorEvent::Disconnected { id }).await;

    // Give the writer a short window to flush anything already queued (a
    // server-initiated disconnect queues an `ERROR` line right before
    // signaling close) before forcing the socket down.
    tokio::select! {
        _ = &mut writer => {}
        _ = tokio::time::sleep(WRITER_DRAIN_GRACE) => writer.abort(),
    }
}
