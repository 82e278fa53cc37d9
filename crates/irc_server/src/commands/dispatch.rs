//! Command dispatcher (§4.3): a static table from uppercase command name to
//! handler, a single precondition check shared by every entry, and the
//! unknown-command fallback.

use super::{channel, messaging, mode, query, registration};
use crate::reply::Reply;
use crate::state::{ClientId, Server};
use log::warn;

type Handler = fn(&mut Server, ClientId, &[String]);

struct CommandSpec {
    name: &'static str,
    requires_registration: bool,
    min: usize,
    max: usize,
    handler: Handler,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "PASS", requires_registration: false, min: 1, max: 1, handler: registration::handle_pass },
    CommandSpec { name: "NICK", requires_registration: false, min: 1, max: 1, handler: registration::handle_nick },
    CommandSpec { name: "USER", requires_registration: false, min: 4, max: 4, handler: registration::handle_user },
    CommandSpec { name: "QUIT", requires_registration: false, min: 0, max: 1, handler: registration::handle_quit },
    CommandSpec { name: "JOIN", requires_registration: true, min: 1, max: 2, handler: channel::handle_join },
    CommandSpec { name: "PART", requires_registration: true, min: 1, max: 2, handler: channel::handle_part },
    CommandSpec { name: "TOPIC", requires_registration: true, min: 1, max: 2, handler: channel::handle_topic },
    CommandSpec { name: "KICK", requires_registration: true, min: 2, max: 3, handler: channel::handle_kick },
    CommandSpec { name: "INVITE", requires_registration: true, min: 2, max: 2, handler: channel::handle_invite },
    CommandSpec { name: "MODE", requires_registration: true, min: 1, max: 3, handler: mode::handle_mode },
    CommandSpec { name: "NAMES", requires_registration: true, min: 1, max: 1, handler: channel::handle_names },
    CommandSpec { name: "LIST", requires_registration: true, min: 0, max: 1, handler: channel::handle_list },
    CommandSpec { name: "PRIVMSG", requires_registration: true, min: 2, max: 2, handler: messaging::handle_privmsg },
    CommandSpec { name: "NOTICE", requires_registration: true, min: 2, max: 2, handler: messaging::handle_notice },
    CommandSpec { name: "LUSERS", requires_registration: true, min: 0, max: 0, handler: query::handle_lusers },
    CommandSpec { name: "MOTD", requires_registration: true, min: 0, max: 1, handler: query::handle_motd },
    CommandSpec { name: "WHO", requires_registration: true, min: 0, max: 2, handler: query::handle_who },
    CommandSpec { name: "PING", requires_registration: true, min: 1, max: 1, handler: query::handle_ping },
];

/// Runs the full precondition check, then the matched handler. Unknown
/// commands and arity/registration failures never reach a handler body.
pub fn dispatch(server: &mut Server, id: ClientId, command: &str, params: &[String]) {
    let Some(spec) = COMMANDS.iter().find(|c| c.name == command) else {
        warn!("{}: unknown command {command}", client_nick(server, id));
        server.reply(id, Reply::ErrUnknownCommand { command: command.to_string() });
        return;
    };

    let registered = server.clients.get(&id).map(|c| c.registered).unwrap_or(false);
    if spec.requires_registration && !registered {
        warn!("{}: {command} requires registration", client_nick(server, id));
        server.reply(id, Reply::ErrNotRegistered);
        return;
    }
    if params.len() < spec.min || params.len() > spec.max {
        warn!(
            "{}: {command} wrong arity (got {}, expected {}..={})",
            client_nick(server, id),
            params.len(),
            spec.min,
            spec.max
        );
        server.reply(id, Reply::ErrNeedMoreParams { command: command.to_string() });
        return;
    }

    (spec.handler)(server, id, params);
}

fn client_nick(server: &Server, id: ClientId) -> String {
    server
        .clients
        .get(&id)
        .map(|c| c.display_nick().to_string())
        .unwrap_or_else(|| "*".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_name_is_uppercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for spec in COMMANDS {
            assert_eq!(spec.name, spec.name.to_ascii_uppercase());
            assert!(seen.insert(spec.name), "duplicate entry for {}", spec.name);
        }
    }
}
