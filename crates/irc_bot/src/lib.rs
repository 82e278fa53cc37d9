//! The companion bot (§6.4): a conforming IRC client, not part of the
//! server core — it shares nothing with `irc_server` but the wire
//! protocol, so this crate has no dependency on it.

use log::{info, warn};
use std::collections::HashSet;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;

/// Bot-internal: the server core never sees this list.
const TRIGGER_WORDS: &[&str] = &["idiot", "stupid", "hate", "dumb"];

pub async fn run_bot(addr: &str, password: &str, nick: &str) -> std::io::Result<()> {
    let stream = TcpStream::connect(addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half).lines();

    send_line(&mut write_half, &format!("PASS {password}")).await?;
    send_line(&mut write_half, &format!("NICK {nick}")).await?;
    send_line(&mut write_half, &format!("USER {nick} 0 * :{nick}")).await?;
    info!("{nick}: connected to {addr}, registration sent");

    let mut joined: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            line = reader.next_line() => {
                match line? {
                    Some(line) => handle_line(&mut write_half, nick, &line, &mut joined).await?,
                    None => {
                        info!("{nick}: server closed the connection");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("{nick}: shutting down");
                break;
            }
        }
    }
    Ok(())
}

async fn handle_line(
    write_half: &mut OwnedWriteHalf,
    nick: &str,
    line: &str,
    joined: &mut HashSet<String>,
) -> std::io::Result<()> {
    let Some(msg) = parse(line) else { return Ok(()) };

    match msg.command.as_str() {
        "PING" => {
            if let Some(token) = msg.params.first() {
                send_line(write_half, &format!("PONG :{token}")).await?;
            }
        }
        "INVITE" if msg.params.first().map(|s| s.eq_ignore_ascii_case(nick)).unwrap_or(false) => {
            if let Some(channel) = msg.params.get(1) {
                send_line(write_half, &format!("JOIN {channel}")).await?;
                joined.insert(channel.clone());
            }
        }
        "KICK" if msg.params.get(1).map(|s| s.eq_ignore_ascii_case(nick)).unwrap_or(false) => {
            if let Some(channel) = msg.params.first() {
                joined.remove(channel);
            }
        }
        "PRIVMSG" => {
            if let (Some(target), Some(text)) = (msg.params.first(), msg.params.get(1))
                && joined.contains(target)
            {
                let lowered = text.to_lowercase();
                if TRIGGER_WORDS.iter().any(|w| lowered.contains(w)) {
                    send_line(write_half, &format!("PRIVMSG {target} :NO, BAD WORD!")).await?;
                }
            }
        }
        other => warn!("{nick}: unhandled command {other}"),
    }
    Ok(())
}

struct BotMessage {
    command: String,
    params: Vec<String>,
}

/// A deliberately minimal line parser — the bot is an ordinary external
/// client, not the core's protocol parser.
fn parse(line: &str) -> Option<BotMessage> {
    let mut rest = line.trim_end_matches(['\r', '\n']);
    if rest.starts_with(':') {
        rest = rest.split_once(' ')?.1;
    }
    let (command, mut rest) = rest.split_once(' ').unwrap_or((rest, ""));
    if command.is_empty() {
        return None;
    }
    let mut params = Vec::new();
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing.to_string());
            break;
        }
        match rest.split_once(' ') {
            Some((first, remainder)) => {
                params.push(first.to_string());
                rest = remainder;
            }
            None => {
                params.push(rest.to_string());
                break;
            }
        }
    }
    Some(BotMessage { command: command.to_ascii_uppercase(), params })
}

async fn send_line(write_half: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    write_half.write_all(line.as_bytes()).await?;
    write_half.write_all(b"\r\n").await?;
    write_half.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_privmsg_with_trailing() {
        let msg = parse(":alice!a@h PRIVMSG #chat :hey you idiot\r\n").unwrap();
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#chat", "hey you idiot"]);
    }

    #[test]
    fn parses_invite() {
        let msg = parse(":alice!a@h INVITE bot #chat").unwrap();
        assert_eq!(msg.command, "INVITE");
        assert_eq!(msg.params, vec!["bot", "#chat"]);
    }
}
