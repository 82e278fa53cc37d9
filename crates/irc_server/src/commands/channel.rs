//! JOIN/PART/TOPIC/KICK/INVITE/NAMES/LIST (§4.3).

use crate::constants::MAX_KICK_REASON_LEN;
use crate::reply::Reply;
use crate::state::channel::is_valid_channel_name;
use crate::state::{Channel, ClientId, Server};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn handle_join(server: &mut Server, id: ClientId, params: &[String]) {
    if params[0] == "0" {
        let channels: Vec<String> = server
            .clients
            .get(&id)
            .map(|c| c.channels.iter().cloned().collect())
            .unwrap_or_default();
        for name in channels {
            part_one(server, id, &name, None);
        }
        return;
    }

    let names: Vec<&str> = params[0].split(',').collect();
    let keys: Vec<&str> = params.get(1).map(|s| s.split(',').collect()).unwrap_or_default();
    for (i, name) in names.into_iter().enumerate() {
        let key = keys.get(i).copied();
        join_one(server, id, name, key);
    }
}

fn join_one(server: &mut Server, id: ClientId, name: &str, key: Option<&str>) {
    if !is_valid_channel_name(name) {
        server.reply(id, Reply::ErrNoSuchChannel { channel: name.to_string() });
        return;
    }
    let already_member = server
        .clients
        .get(&id)
        .map(|c| c.channels.contains(name))
        .unwrap_or(false);
    if already_member {
        return;
    }

    if !server.channels.contains_key(name) {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        server.channels.insert(name.to_string(), Channel::new(name.to_string(), now));
    }

    {
        let chan = server.channels.get(name).unwrap();
        if let Some(required) = &chan.key
            && key != Some(required.as_str())
        {
            server.reply(id, Reply::ErrBadChannelKey { channel: name.to_string() });
            return;
        }
        if let Some(limit) = chan.member_limit
            && chan.members.len() >= limit
        {
            server.reply(id, Reply::ErrChannelIsFull { channel: name.to_string() });
            return;
        }
        if chan.invite_only && !chan.invited.contains(&id) {
            server.reply(id, Reply::ErrInviteOnlyChan { channel: name.to_string() });
            return;
        }
    }

    let is_first_member = server.channels.get(name).unwrap().members.is_empty();
    let chan = server.channels.get_mut(name).unwrap();
    chan.add_member(id);
    if is_first_member {
        chan.operators.insert(id);
    }
    if let Some(client) = server.clients.get_mut(&id) {
        client.channels.insert(name.to_string());
    }

    let fullname = server.clients.get(&id).unwrap().fullname();
    let join_line = Reply::Join { fullname, channel: name.to_string() }.render(&server.hostname, "");
    server.broadcast_channel(name, &join_line);

    let chan = server.channels.get(name).unwrap();
    match &chan.topic {
        Some(topic) => {
            server.reply(id, Reply::Topic { channel: name.to_string(), topic: topic.clone() });
            if let Some((setter, set_at)) = &chan.topic_setter {
                server.reply(
                    id,
                    Reply::TopicWhoTime { channel: name.to_string(), setter: setter.clone(), set_at: set_at.clone() },
                );
            }
        }
        None => server.reply(id, Reply::NoTopic { channel: name.to_string() }),
    }
    send_names(server, id, name);
}

pub fn handle_part(server: &mut Server, id: ClientId, params: &[String]) {
    let reason = params.get(1).cloned();
    for name in params[0].split(',') {
        part_one(server, id, name, reason.clone());
    }
}

fn part_one(server: &mut Server, id: ClientId, name: &str, reason: Option<String>) {
    let Some(chan) = server.channels.get(name) else {
        server.reply(id, Reply::ErrNoSuchChannel { channel: name.to_string() });
        return;
    };
    if !chan.is_member(id) {
        server.reply(id, Reply::ErrNotOnChannel { channel: name.to_string() });
        return;
    }

    let fullname = server.clients.get(&id).unwrap().fullname();
    let part_line = Reply::Part { fullname, channel: name.to_string(), reason }.render(&server.hostname, "");

    let chan = server.channels.get_mut(name).unwrap();
    let mut recipients = chan.members.clone();
    chan.remove_member(id);
    if !recipients.contains(&id) {
        recipients.push(id);
    }
    server.send_to(recipients, &part_line);

    if let Some(client) = server.clients.get_mut(&id) {
        client.channels.remove(name);
    }
}

pub fn handle_topic(server: &mut Server, id: ClientId, params: &[String]) {
    let name = &params[0];
    let Some(chan) = server.channels.get(name) else {
        server.reply(id, Reply::ErrNoSuchChannel { channel: name.clone() });
        return;
    };
    if !chan.is_member(id) {
        server.reply(id, Reply::ErrNotOnChannel { channel: name.clone() });
        return;
    }

    if params.len() == 1 {
        match &chan.topic {
            Some(topic) => {
                let topic = topic.clone();
                server.reply(id, Reply::Topic { channel: name.clone(), topic });
                if let Some((setter, set_at)) = chan.topic_setter.clone() {
                    server.reply(id, Reply::TopicWhoTime { channel: name.clone(), setter, set_at });
                }
            }
            None => server.reply(id, Reply::NoTopic { channel: name.clone() }),
        }
        return;
    }

    if chan.topic_restricted && !chan.is_operator(id) {
        server.reply(id, Reply::ErrChanOPrivsNeeded { channel: name.clone() });
        return;
    }

    let new_topic = params[1].clone();
    let client = server.clients.get(&id).unwrap();
    let fullname = client.fullname();
    let nick = client.nick.clone();
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);

    let chan = server.channels.get_mut(name).unwrap();
    chan.topic = Some(new_topic.clone());
    chan.topic_setter = Some((nick, now.to_string()));

    let topic_line = format!(":{fullname} TOPIC {name} :{new_topic}");
    server.broadcast_channel(name, &topic_line);
}

pub fn handle_kick(server: &mut Server, id: ClientId, params: &[String]) {
    let name = &params[0];
    let Some(chan) = server.channels.get(name) else {
        server.reply(id, Reply::ErrNoSuchChannel { channel: name.clone() });
        return;
    };
    if !chan.is_member(id) {
        server.reply(id, Reply::ErrNotOnChannel { channel: name.clone() });
        return;
    }
    if !chan.is_operator(id) {
        server.reply(id, Reply::ErrChanOPrivsNeeded { channel: name.clone() });
        return;
    }

    let mut reason = params.get(2).cloned().unwrap_or_else(|| server.clients.get(&id).unwrap().nick.clone());
    reason.truncate(MAX_KICK_REASON_LEN);
    let fullname = server.clients.get(&id).unwrap().fullname();

    for target_nick in params[1].split(',') {
        let Some(target_id) = server.find_client_id_by_nick(target_nick) else {
            server.reply(id, Reply::ErrUserNotInChannel { nick: target_nick.to_string(), channel: name.clone() });
            continue;
        };
        let chan = server.channels.get(name).unwrap();
        if !chan.is_member(target_id) {
            server.reply(id, Reply::ErrUserNotInChannel { nick: target_nick.to_string(), channel: name.clone() });
            continue;
        }

        let kick_line = Reply::Kick {
            fullname: fullname.clone(),
            channel: name.clone(),
            target: target_nick.to_string(),
            reason: reason.clone(),
        }
        .render(&server.hostname, "");

        let chan = server.channels.get_mut(name).unwrap();
        let mut recipients = chan.members.clone();
        chan.remove_member(target_id);
        if !recipients.contains(&target_id) {
            recipients.push(target_id);
        }
        server.send_to(recipients, &kick_line);
        if let Some(target) = server.clients.get_mut(&target_id) {
            target.channels.remove(name);
        }
    }
}

pub fn handle_invite(server: &mut Server, id: ClientId, params: &[String]) {
    let target_nick = &params[0];
    let name = &params[1];

    let Some(target_id) = server.find_client_id_by_nick(target_nick) else {
        server.reply(id, Reply::ErrWasNoSuchNick { nick: target_nick.clone() });
        return;
    };
    let Some(chan) = server.channels.get(name) else {
        server.reply(id, Reply::ErrNoSuchChannel { channel: name.clone() });
        return;
    };
    if !chan.is_member(id) {
        server.reply(id, Reply::ErrNotOnChannel { channel: name.clone() });
        return;
    }
    if chan.is_member(target_id) {
        server.reply(id, Reply::ErrUserOnChannel { nick: target_nick.clone(), channel: name.clone() });
        return;
    }
    if !chan.is_operator(id) {
        server.reply(id, Reply::ErrChanOPrivsNeeded { channel: name.clone() });
        return;
    }

    server.channels.get_mut(name).unwrap().invited.insert(target_id);
    server.reply(id, Reply::Inviting { channel: name.clone(), nick: target_nick.clone() });

    let fullname = server.clients.get(&id).unwrap().fullname();
    let invite_line = Reply::Invite { fullname, target: target_nick.clone(), channel: name.clone() }.render(&server.hostname, "");
    server.send_to_one(target_id, invite_line);
}

pub fn handle_names(server: &mut Server, id: ClientId, params: &[String]) {
    for name in params[0].split(',') {
        if server.channels.contains_key(name) {
            send_names(server, id, name);
        }
    }
}

fn send_names(server: &Server, id: ClientId, name: &str) {
    let Some(chan) = server.channels.get(name) else { return };
    let names = chan
        .members
        .iter()
        .map(|m| {
            let nick = server.clients.get(m).map(|c| c.nick.as_str()).unwrap_or("");
            if chan.is_operator(*m) {
                format!("@{nick}")
            } else {
                nick.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    server.reply(id, Reply::NamReply { channel: name.to_string(), names });
    server.reply(id, Reply::EndOfNames { channel: name.to_string() });
}

pub fn handle_list(server: &mut Server, id: ClientId, params: &[String]) {
    server.reply(id, Reply::ListStart);
    let wanted: Option<Vec<&str>> = params.first().map(|s| s.split(',').collect());
    let mut names: Vec<&String> = server.channels.keys().collect();
    names.sort();
    for name in names {
        if let Some(list) = &wanted
            && !list.contains(&name.as_str())
        {
            continue;
        }
        let chan = server.channels.get(name).unwrap();
        server.reply(
            id,
            Reply::List {
                channel: name.clone(),
                visible: chan.members.len(),
                topic: chan.topic.clone().unwrap_or_default(),
            },
        );
    }
    server.reply(id, Reply::ListEnd);
}
