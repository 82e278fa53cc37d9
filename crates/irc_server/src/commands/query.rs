//! LUSERS/MOTD/WHO/PING (§4.3).

use crate::reply::Reply;
use crate::state::{ClientId, Server};

pub fn handle_lusers(server: &mut Server, id: ClientId, _params: &[String]) {
    send_lusers(server, id);
}

pub(crate) fn send_lusers(server: &Server, id: ClientId) {
    let users = server.clients.len();
    let channels = server.channels.len();
    server.reply(id, Reply::LuserClient { users });
    server.reply(id, Reply::LuserChannels { channels });
    server.reply(id, Reply::LuserMe { clients: users });
}

pub fn handle_motd(server: &mut Server, id: ClientId, params: &[String]) {
    if params.len() == 1 {
        server.reply(id, Reply::ErrNoSuchServer { server: params[0].clone() });
        return;
    }
    send_motd(server, id);
}

pub(crate) fn send_motd(server: &Server, id: ClientId) {
    server.reply(id, Reply::MotdStart { servername: server.hostname.clone() });
    for line in server.config.server.motd.lines() {
        server.reply(id, Reply::Motd { line: line.to_string() });
    }
    server.reply(id, Reply::EndOfMotd);
}

pub fn handle_who(server: &mut Server, id: ClientId, _params: &[String]) {
    let ids: Vec<ClientId> = server.clients.keys().copied().collect();
    for other_id in ids {
        let Some(other) = server.clients.get(&other_id) else { continue };
        let channel = other.channels.iter().next().cloned().unwrap_or_else(|| "*".to_string());
        server.reply(
            id,
            Reply::WhoReply {
                channel,
                user: other.user.clone(),
                host: other.host.clone(),
                nick: other.nick.clone(),
                realname: other.realname.clone(),
            },
        );
    }
    server.reply(id, Reply::EndOfWho { mask: "*".to_string() });
}

pub fn handle_ping(server: &mut Server, id: ClientId, params: &[String]) {
    if params[0].is_empty() {
        server.reply(id, Reply::ErrNoOrigin);
        return;
    }
    server.reply(id, Reply::Pong { token: params[0].clone() });
}
