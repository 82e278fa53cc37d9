//! PRIVMSG/NOTICE (§4.3). NOTICE is identical except it never replies with
//! an error numeric.

use crate::reply::Reply;
use crate::state::{ClientId, Server};

pub fn handle_privmsg(server: &mut Server, id: ClientId, params: &[String]) {
    deliver(server, id, &params[0], &params[1], false);
}

pub fn handle_notice(server: &mut Server, id: ClientId, params: &[String]) {
    deliver(server, id, &params[0], &params[1], true);
}

fn deliver(server: &mut Server, id: ClientId, targets: &str, text: &str, silent: bool) {
    let fullname = server.clients.get(&id).unwrap().fullname();
    for target in targets.split(',') {
        if target.starts_with('#') {
            let Some(chan) = server.channels.get(target) else {
                if !silent {
                    server.reply(id, Reply::ErrCannotSendToChan { channel: target.to_string() });
                }
                continue;
            };
            if !chan.is_member(id) {
                if !silent {
                    server.reply(id, Reply::ErrCannotSendToChan { channel: target.to_string() });
                }
                continue;
            }
            let recipients: Vec<ClientId> = chan.members.iter().copied().filter(|m| *m != id).collect();
            let line = if silent {
                Reply::Notice { fullname: fullname.clone(), target: target.to_string(), text: text.to_string() }
            } else {
                Reply::PrivMsg { fullname: fullname.clone(), target: target.to_string(), text: text.to_string() }
            }
            .render(&server.hostname, "");
            server.send_to(recipients, &line);
        } else {
            let Some(target_id) = server.find_client_id_by_nick(target) else {
                if !silent {
                    server.reply(id, Reply::ErrNoSuchNick { nick: target.to_string() });
                }
                continue;
            };
            let line = if silent {
                Reply::Notice { fullname: fullname.clone(), target: target.to_string(), text: text.to_string() }
            } else {
                Reply::PrivMsg { fullname: fullname.clone(), target: target.to_string(), text: text.to_string() }
            }
            .render(&server.hostname, "");
            server.send_to_one(target_id, line);
        }
    }
}
