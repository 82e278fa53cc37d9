use super::channel::Channel;
use super::client::{Client, ClientId};
use crate::config::Config;
use crate::reply::Reply;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Singleton process-wide state (§3): the client and channel registries,
/// plus the handful of scalars every handler needs (hostname, password,
/// launch time). Owned exclusively by the `ServerActor` task — see §4 of
/// SPEC_FULL.md for why that's the only task ever allowed to mutate this.
pub struct Server {
    pub hostname: String,
    pub password: String,
    pub config: Config,
    pub launched_at: String,
    pub clients: HashMap<ClientId, Client>,
    pub channels: HashMap<String, Channel>,
    next_client_id: ClientId,
}

impl Server {
    pub fn new(hostname: String, password: String, config: Config) -> Self {
        Server {
            hostname,
            password,
            config,
            launched_at: format_launch_time(),
            clients: HashMap::new(),
            channels: HashMap::new(),
            next_client_id: 0,
        }
    }

    pub fn next_id(&mut self) -> ClientId {
        let id = self.next_client_id;
        self.next_client_id += 1;
        id
    }

    pub fn find_client_by_nick(&self, nick: &str) -> Option<&Client> {
        self.clients.values().find(|c| c.nick == nick)
    }

    pub fn find_client_id_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.clients
            .values()
            .find(|c| c.nick == nick)
            .map(|c| c.id)
    }

    pub fn nick_in_use(&self, nick: &str) -> bool {
        self.clients.values().any(|c| c.nick == nick)
    }

    /// §4.5 step 4: close and drop every client latched `disconnected`;
    /// drop every channel whose member set became empty. Iterator
    /// invalidation is deferred here by design (§3 invariant 4/5, §5).
    pub fn sweep(&mut self) {
        self.clients.retain(|_, c| !c.disconnected);
        self.channels.retain(|_, c| !c.is_empty());
    }

    /// Sends `line` to every client currently listed in `recipients`,
    /// skipping ids that no longer resolve (already disconnected).
    pub fn send_to(&self, recipients: impl IntoIterator<Item = ClientId>, line: &str) {
        for id in recipients {
            if let Some(client) = self.clients.get(&id) {
                client.send_line(line.to_string());
            }
        }
    }

    pub fn send_to_one(&self, id: ClientId, line: String) {
        if let Some(client) = self.clients.get(&id) {
            client.send_line(line);
        }
    }

    /// Broadcasts `line` to every current member of `channel`, in the
    /// channel's stable member order (§5 ordering guarantee).
    pub fn broadcast_channel(&self, channel: &str, line: &str) {
        if let Some(chan) = self.channels.get(channel) {
            let members = chan.members.clone();
            self.send_to(members, line);
        }
    }

    /// Renders `reply` against this server's hostname and `id`'s current
    /// nick (or `*` before registration) and sends it to that client alone.
    pub fn reply(&self, id: ClientId, reply: Reply) {
        let nick = self
            .clients
            .get(&id)
            .map(|c| c.display_nick().to_string())
            .unwrap_or_else(|| "*".to_string());
        let line = reply.render(&self.hostname, &nick);
        self.send_to_one(id, line);
    }

    /// §4.6: send `ERROR`, broadcast `QUIT` to every channel the client was
    /// in and remove it from each, clear its channel set, and latch
    /// `disconnected`. Also signals the connection's reader task to stop
    /// blocking on the socket (`Client::request_close`) so the fd actually
    /// closes instead of waiting on the peer to react to a half-shutdown;
    /// the writer side drains and closes naturally once `sweep` drops this
    /// client's `outbound` sender.
    pub fn disconnect(&mut self, id: ClientId, reason: &str) {
        let Some(client) = self.clients.get_mut(&id) else { return };
        if client.disconnected {
            return;
        }
        client.disconnected = true;
        client.request_close();
        let fullname = client.fullname();
        let channels: Vec<String> = client.channels.drain().collect();
        client.send_line(Reply::Error { reason: reason.to_string() }.render(&self.hostname, ""));

        let quit_line = Reply::Quit { fullname, reason: reason.to_string() }.render(&self.hostname, "");
        for chan_name in channels {
            if let Some(chan) = self.channels.get_mut(&chan_name) {
                chan.remove_member(id);
                let remaining = chan.members.clone();
                self.send_to(remaining, &quit_line);
            }
        }
    }
}

fn format_launch_time() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("epoch {secs}")
}
