//! PASS/NICK/USER/QUIT and the registration welcome burst (§4.4).

use crate::constants::{MAX_NICK_LEN, MAX_USERNAME_LEN};
use crate::reply::Reply;
use crate::state::{ClientId, Server};

pub fn handle_pass(server: &mut Server, id: ClientId, params: &[String]) {
    let given = &params[0];
    let Some(client) = server.clients.get(&id) else { return };
    if client.registered {
        server.reply(id, Reply::ErrAlreadyRegistered);
        return;
    }
    if given != &server.password {
        server.reply(id, Reply::ErrPasswdMismatch);
        server.disconnect(id, "Password incorrect");
        return;
    }
    let became_registered = {
        let client = server.clients.get_mut(&id).unwrap();
        client.pass_valid = true;
        client.recompute_registered()
    };
    if became_registered {
        welcome_burst(server, id);
    }
}

/// Empty, longer than 9 chars, starting with `:`/`#`, or containing a
/// space: `432`. Case-sensitive duplicate: `433`.
fn is_valid_nick(nick: &str) -> bool {
    !nick.is_empty()
        && nick.len() <= MAX_NICK_LEN
        && !nick.starts_with(':')
        && !nick.starts_with('#')
        && !nick.contains(' ')
}

pub fn handle_nick(server: &mut Server, id: ClientId, params: &[String]) {
    let new_nick = params[0].clone();
    let Some(client) = server.clients.get(&id) else { return };
    if !client.pass_valid {
        server.reply(id, Reply::ErrPasswdMismatch);
        return;
    }
    if !is_valid_nick(&new_nick) {
        server.reply(id, Reply::ErrErroneusNickname { nick: new_nick });
        return;
    }
    if server.nick_in_use(&new_nick) {
        server.reply(id, Reply::ErrNicknameInUse { nick: new_nick });
        return;
    }

    let (old_fullname, was_registered, channels) = {
        let client = server.clients.get(&id).unwrap();
        (client.fullname(), client.registered, client.channels.clone())
    };

    let became_registered = {
        let client = server.clients.get_mut(&id).unwrap();
        client.nick = new_nick.clone();
        client.recompute_registered()
    };

    if was_registered {
        let line = Reply::Nick { old_fullname, new_nick: new_nick.clone() }.render(&server.hostname, "");
        server.send_to_one(id, line.clone());
        let mut notified = std::collections::HashSet::new();
        for chan_name in &channels {
            if let Some(chan) = server.channels.get(chan_name) {
                for member in &chan.members {
                    if *member != id && notified.insert(*member) {
                        server.send_to_one(*member, line.clone());
                    }
                }
            }
        }
    }

    if became_registered {
        welcome_burst(server, id);
    }
}

pub fn handle_user(server: &mut Server, id: ClientId, params: &[String]) {
    let Some(client) = server.clients.get(&id) else { return };
    if client.registered {
        server.reply(id, Reply::ErrAlreadyRegistered);
        return;
    }
    if !client.pass_valid {
        server.reply(id, Reply::ErrPasswdMismatch);
        return;
    }
    let mut username = params[0].clone();
    username.truncate(MAX_USERNAME_LEN);
    let realname = params[3].clone();

    let became_registered = {
        let client = server.clients.get_mut(&id).unwrap();
        client.user = username;
        client.realname = realname;
        client.recompute_registered()
    };
    if became_registered {
        welcome_burst(server, id);
    }
}

pub fn handle_quit(server: &mut Server, id: ClientId, params: &[String]) {
    let reason = params
        .first()
        .cloned()
        .unwrap_or_else(|| "Client exited the server".to_string());
    server.disconnect(id, &reason);
}

/// §4.4: fired exactly once, the moment all three registration gates close.
fn welcome_burst(server: &mut Server, id: ClientId) {
    let (already, nick, user, host) = {
        let client = server.clients.get_mut(&id).unwrap();
        if client.welcomed {
            (true, String::new(), String::new(), String::new())
        } else {
            client.welcomed = true;
            (false, client.nick.clone(), client.user.clone(), client.host.clone())
        }
    };
    if already {
        return;
    }

    let version = server.config.server.version.clone();
    let created = server.launched_at.clone();

    server.reply(id, Reply::Welcome { nick: nick.clone(), user, host });
    server.reply(id, Reply::YourHost { servername: server.hostname.clone(), version: version.clone() });
    server.reply(id, Reply::Created { date: created });
    server.reply(id, Reply::MyInfo { servername: server.hostname.clone(), version });
    server.reply(
        id,
        Reply::ISupport {
            tokens: vec![
                "CASEMAPPING=ascii".to_string(),
                format!("CHANNELLEN={}", crate::state::channel::MAX_CHANNEL_NAME_LEN),
                format!("NICKLEN={MAX_NICK_LEN}"),
            ],
        },
    );

    super::query::send_lusers(server, id);
    super::query::send_motd(server, id);
}
