//! The channel mode engine (§4.3 sub-algorithm) plus the user-mode path.
//!
//! Grounded in `original_source/handlers/mode.cpp`: arity/target checks,
//! then the irssi `MODE #chan b` quirk (before the operator check), then
//! the operator check, then the sign/flag state machine.

use crate::reply::Reply;
use crate::state::{Channel, ClientId, Server};

pub fn handle_mode(server: &mut Server, id: ClientId, params: &[String]) {
    let target = params[0].clone();
    if target.starts_with('#') {
        handle_channel_mode(server, id, &target, params.get(1), &params[2.min(params.len())..]);
    } else {
        handle_user_mode(server, id, &target, params.get(1));
    }
}

fn handle_channel_mode(
    server: &mut Server,
    id: ClientId,
    channel: &str,
    mode_string: Option<&String>,
    args: &[String],
) {
    let Some(chan) = server.channels.get(channel) else {
        server.reply(id, Reply::ErrNoSuchChannel { channel: channel.to_string() });
        return;
    };

    let Some(mode_string) = mode_string else {
        let (modes, args) = current_modes_string(chan);
        server.reply(id, Reply::ChannelModeIs { channel: channel.to_string(), modes, args });
        return;
    };

    if mode_string == "b" {
        server.reply(id, Reply::EndOfBanList { channel: channel.to_string() });
        return;
    }

    if !chan.is_operator(id) {
        server.reply(id, Reply::ErrChanOPrivsNeeded { channel: channel.to_string() });
        return;
    }

    apply_channel_mode_string(server, id, channel, mode_string, args);
}

struct Change {
    sign: char,
    flag: char,
    arg: Option<String>,
}

fn apply_channel_mode_string(
    server: &mut Server,
    id: ClientId,
    channel: &str,
    mode_string: &str,
    args: &[String],
) {
    let mut sign: Option<char> = None;
    let mut arg_iter = args.iter();
    let mut changes: Vec<Change> = Vec::new();

    for ch in mode_string.chars() {
        match ch {
            '+' => sign = Some('+'),
            '-' => sign = Some('-'),
            flag => {
                let Some(s) = sign else {
                    server.reply(id, Reply::ErrUnknownMode { ch: flag });
                    continue;
                };
                apply_one_flag(server, id, channel, s, flag, &mut arg_iter, &mut changes);
            }
        }
    }

    if changes.is_empty() {
        return;
    }

    let mut replay = String::new();
    let mut replay_args = Vec::new();
    let mut last_sign: Option<char> = None;
    for c in &changes {
        if last_sign != Some(c.sign) {
            replay.push(c.sign);
            last_sign = Some(c.sign);
        }
        replay.push(c.flag);
        if let Some(a) = &c.arg {
            replay_args.push(a.clone());
        }
    }

    let fullname = server.clients.get(&id).unwrap().fullname();
    let change = if replay_args.is_empty() {
        replay
    } else {
        format!("{replay} {}", replay_args.join(" "))
    };
    let line = Reply::ModeChange { fullname, channel: channel.to_string(), change }.render(&server.hostname, "");
    server.broadcast_channel(channel, &line);
}

fn apply_one_flag<'a>(
    server: &mut Server,
    id: ClientId,
    channel: &str,
    sign: char,
    flag: char,
    args: &mut impl Iterator<Item = &'a String>,
    changes: &mut Vec<Change>,
) {
    match flag {
        'i' => {
            let chan = server.channels.get_mut(channel).unwrap();
            let want = sign == '+';
            if chan.invite_only != want {
                chan.invite_only = want;
                chan.invited.clear();
                changes.push(Change { sign, flag, arg: None });
            }
        }
        't' => {
            let chan = server.channels.get_mut(channel).unwrap();
            let want = sign == '+';
            if chan.topic_restricted != want {
                chan.topic_restricted = want;
                changes.push(Change { sign, flag, arg: None });
            }
        }
        'k' => {
            if sign == '+' {
                let Some(key) = args.next() else { return };
                if key.is_empty() || key.contains(' ') {
                    server.reply(id, Reply::ErrBadKey { channel: channel.to_string() });
                    return;
                }
                let chan = server.channels.get_mut(channel).unwrap();
                if chan.key.as_deref() != Some(key.as_str()) {
                    chan.key = Some(key.clone());
                    changes.push(Change { sign, flag, arg: Some(key.clone()) });
                }
            } else {
                let chan = server.channels.get_mut(channel).unwrap();
                if chan.key.take().is_some() {
                    changes.push(Change { sign, flag, arg: None });
                }
            }
        }
        'l' => {
            if sign == '+' {
                let Some(raw) = args.next() else { return };
                match raw.parse::<usize>() {
                    Ok(limit) if limit > 0 => {
                        let chan = server.channels.get_mut(channel).unwrap();
                        if chan.member_limit != Some(limit) {
                            chan.member_limit = Some(limit);
                            changes.push(Change { sign, flag, arg: Some(limit.to_string()) });
                        }
                    }
                    _ => server.reply(
                        id,
                        Reply::ErrInvalidModeParam {
                            channel: channel.to_string(),
                            setting: "l".to_string(),
                            arg: String::new(),
                        },
                    ),
                }
            } else {
                let chan = server.channels.get_mut(channel).unwrap();
                if chan.member_limit.take().is_some() {
                    changes.push(Change { sign, flag, arg: None });
                }
            }
        }
        'o' => {
            let Some(nick) = args.next() else { return };
            let Some(target_id) = server.find_client_id_by_nick(nick) else {
                server.reply(id, Reply::ErrNoSuchNick { nick: nick.clone() });
                return;
            };
            let chan = server.channels.get_mut(channel).unwrap();
            let want = sign == '+';
            if chan.is_operator(target_id) != want {
                if want {
                    chan.operators.insert(target_id);
                } else {
                    chan.operators.remove(&target_id);
                }
                changes.push(Change { sign, flag, arg: Some(nick.clone()) });
            }
        }
        _ => server.reply(id, Reply::ErrUModeUnknownFlag),
    }
}

fn current_modes_string(chan: &Channel) -> (String, String) {
    let mut flags = String::from("+");
    let mut args = Vec::new();
    if chan.invite_only {
        flags.push('i');
    }
    if chan.topic_restricted {
        flags.push('t');
    }
    if let Some(key) = &chan.key {
        flags.push('k');
        args.push(key.clone());
    }
    if let Some(limit) = chan.member_limit {
        flags.push('l');
        args.push(limit.to_string());
    }
    (flags, args.join(" "))
}

fn handle_user_mode(server: &mut Server, id: ClientId, target_nick: &str, mode_string: Option<&String>) {
    let Some(target_id) = server.find_client_id_by_nick(target_nick) else {
        server.reply(id, Reply::ErrNoSuchNick { nick: target_nick.to_string() });
        return;
    };
    if target_id != id {
        server.reply(id, Reply::ErrUsersDontMatch);
        return;
    }
    let Some(mode_string) = mode_string else {
        server.reply(id, Reply::UModeIs { modes: String::new() });
        return;
    };
    for ch in mode_string.chars() {
        match ch {
            '+' | '-' | 'i' => {}
            _ => server.reply(id, Reply::ErrUModeUnknownFlag),
        }
    }
}
