use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};

pub type ClientId = u64;

/// One connected user. Owned exclusively by the `ServerActor`'s registry;
/// channels only ever reference a member by `ClientId` (§9: "pick one
/// owner... use indirection through stable identifiers").
#[derive(Debug)]
pub struct Client {
    pub id: ClientId,
    pub host: String,
    pub nick: String,
    pub user: String,
    pub realname: String,
    pub pass_valid: bool,
    pub registered: bool,
    pub welcomed: bool,
    pub disconnected: bool,
    pub channels: HashSet<String>,
    pub outbound: mpsc::Sender<String>,
    /// Fires once, from `disconnect`, to wake the reader task's `select!`
    /// so a server-initiated disconnect tears the socket down instead of
    /// waiting on the peer to notice the half-close (§4.5 step 4).
    close: Option<oneshot::Sender<()>>,
}

impl Client {
    pub fn new(
        id: ClientId,
        host: String,
        outbound: mpsc::Sender<String>,
        close: oneshot::Sender<()>,
    ) -> Self {
        Client {
            id,
            host,
            nick: String::new(),
            user: String::new(),
            realname: String::new(),
            pass_valid: false,
            registered: false,
            welcomed: false,
            disconnected: false,
            channels: HashSet::new(),
            outbound,
            close: Some(close),
        }
    }

    /// Signals the owning connection's reader task to stop blocking on the
    /// socket and tear down. No-op if already requested (or the reader is
    /// already gone).
    pub fn request_close(&mut self) {
        if let Some(tx) = self.close.take() {
            let _ = tx.send(());
        }
    }

    /// `"nick!user@host"`, recomputed on demand rather than cached, since
    /// `nick`/`user`/`host` change independently and staleness would violate
    /// the invariant that `fullname` always reflects current state.
    pub fn fullname(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }

    pub fn display_nick(&self) -> &str {
        if self.nick.is_empty() { "*" } else { &self.nick }
    }

    /// `registered` becomes true, and stays true, once all three gating
    /// conditions hold (§3). Returns whether this call caused the
    /// transition, so the caller can fire the welcome burst exactly once.
    pub fn recompute_registered(&mut self) -> bool {
        if self.registered {
            return false;
        }
        if self.pass_valid && !self.nick.is_empty() && !self.user.is_empty() {
            self.registered = true;
            true
        } else {
            false
        }
    }

    pub fn send_line(&self, line: String) {
        let _ = self.outbound.try_send(line);
    }
}
