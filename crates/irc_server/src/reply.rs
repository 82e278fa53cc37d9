//! Numeric and named replies the server can send to a client.
//!
//! One variant per reply, each rendering its own wire format, covering
//! every numeric the command table in §4.3 actually emits.

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Reply {
    Welcome { nick: String, user: String, host: String },
    YourHost { servername: String, version: String },
    Created { date: String },
    MyInfo { servername: String, version: String },
    ISupport { tokens: Vec<String> },

    LuserClient { users: usize },
    LuserChannels { channels: usize },
    LuserMe { clients: usize },

    MotdStart { servername: String },
    Motd { line: String },
    EndOfMotd,

    UModeIs { modes: String },
    ErrUModeUnknownFlag,
    ErrUsersDontMatch,

    Join { fullname: String, channel: String },
    Part { fullname: String, channel: String, reason: Option<String> },
    Nick { old_fullname: String, new_nick: String },
    Quit { fullname: String, reason: String },
    PrivMsg { fullname: String, target: String, text: String },
    Notice { fullname: String, target: String, text: String },
    Kick { fullname: String, channel: String, target: String, reason: String },
    Invite { fullname: String, target: String, channel: String },
    ModeChange { fullname: String, channel: String, change: String },
    Pong { token: String },
    Error { reason: String },

    Topic { channel: String, topic: String },
    NoTopic { channel: String },
    TopicWhoTime { channel: String, setter: String, set_at: String },
    Inviting { channel: String, nick: String },

    NamReply { channel: String, names: String },
    EndOfNames { channel: String },
    EndOfBanList { channel: String },

    ListStart,
    List { channel: String, visible: usize, topic: String },
    ListEnd,

    ChannelModeIs { channel: String, modes: String, args: String },

    WhoReply { channel: String, user: String, host: String, nick: String, realname: String },
    EndOfWho { mask: String },

    ErrNoSuchNick { nick: String },
    ErrNoSuchServer { server: String },
    ErrNoSuchChannel { channel: String },
    ErrCannotSendToChan { channel: String },
    ErrWasNoSuchNick { nick: String },
    ErrNoOrigin,
    ErrUnknownCommand { command: String },
    ErrErroneusNickname { nick: String },
    ErrNicknameInUse { nick: String },
    ErrUserNotInChannel { nick: String, channel: String },
    ErrNotOnChannel { channel: String },
    ErrUserOnChannel { nick: String, channel: String },
    ErrNotRegistered,
    ErrNeedMoreParams { command: String },
    ErrAlreadyRegistered,
    ErrPasswdMismatch,
    ErrChannelIsFull { channel: String },
    ErrUnknownMode { ch: char },
    ErrInviteOnlyChan { channel: String },
    ErrBadChannelKey { channel: String },
    ErrChanOPrivsNeeded { channel: String },
    ErrBadKey { channel: String },
    ErrInvalidModeParam { channel: String, setting: String, arg: String },
}

impl Reply {
    /// Renders the full wire line, `:<hostname> <code> <nick-or-*> <args...>`,
    /// for reply types that are numerics. Message-relay types (`Join`, `Part`,
    /// `PrivMsg`, ...) render their own `:<source> <CMD> ...` form and ignore
    /// `hostname`/`nick`.
    pub fn render(&self, hostname: &str, nick: &str) -> String {
        let n = if nick.is_empty() { "*" } else { nick };
        match self {
            Reply::Welcome { nick, user, host } => format!(
                ":{hostname} {RPL_WELCOME:03} {nick} :Welcome to the Internet Relay Network {nick}!{user}@{host}"
            ),
            Reply::YourHost { servername, version } => format!(
                ":{hostname} {RPL_YOURHOST:03} {n} :Your host is {servername}, running version {version}"
            ),
            Reply::Created { date } => {
                format!(":{hostname} {RPL_CREATED:03} {n} :This server was created {date}")
            }
            Reply::MyInfo { servername, version } => format!(
                ":{hostname} {RPL_MYINFO:03} {n} {servername} {version} i itkol"
            ),
            Reply::ISupport { tokens } => {
                let joined = tokens.join(" ");
                format!(":{hostname} {RPL_ISUPPORT:03} {n} {joined} :are supported by this server")
            }
            Reply::LuserClient { users } => format!(
                ":{hostname} {RPL_LUSERCLIENT:03} {n} :There are {users} users and 0 invisible on 1 server"
            ),
            Reply::LuserChannels { channels } => {
                format!(":{hostname} {RPL_LUSERCHANNELS:03} {n} {channels} :channels formed")
            }
            Reply::LuserMe { clients } => {
                format!(":{hostname} {RPL_LUSERME:03} {n} :I have {clients} clients and 1 servers")
            }
            Reply::MotdStart { servername } => {
                format!(":{hostname} {RPL_MOTDSTART:03} {n} :- {servername} Message of the day -")
            }
            Reply::Motd { line } => format!(":{hostname} {RPL_MOTD:03} {n} :- {line}"),
            Reply::EndOfMotd => {
                format!(":{hostname} {RPL_ENDOFMOTD:03} {n} :End of /MOTD command.")
            }
            Reply::UModeIs { modes } => format!(":{hostname} {RPL_UMODEIS:03} {n} {modes}"),
            Reply::ErrUModeUnknownFlag => format!(
                ":{hostname} {ERR_USERSDONTMATCH:03} {n} :Unknown MODE flag"
            ),
            Reply::ErrUsersDontMatch => format!(
                ":{hostname} {ERR_USERSDONTMATCH:03} {n} :Cannot change mode for other users"
            ),
            Reply::Join { fullname, channel } => format!(":{fullname} JOIN {channel}"),
            Reply::Part { fullname, channel, reason } => match reason {
                Some(r) => format!(":{fullname} PART {channel} :{r}"),
                None => format!(":{fullname} PART {channel}"),
            },
            Reply::Nick { old_fullname, new_nick } => format!(":{old_fullname} NICK {new_nick}"),
            Reply::Quit { fullname, reason } => format!(":{fullname} QUIT :{reason}"),
            Reply::PrivMsg { fullname, target, text } => {
                format!(":{fullname} PRIVMSG {target} :{text}")
            }
            Reply::Notice { fullname, target, text } => {
                format!(":{fullname} NOTICE {target} :{text}")
            }
            Reply::Kick { fullname, channel, target, reason } => {
                format!(":{fullname} KICK {channel} {target} :{reason}")
            }
            Reply::Invite { fullname, target, channel } => {
                format!(":{fullname} INVITE {target} {channel}")
            }
            Reply::ModeChange { fullname, channel, change } => {
                format!(":{fullname} MODE {channel} {change}")
            }
            Reply::Pong { token } => format!(":{hostname} PONG :{token}"),
            Reply::Error { reason } => format!("ERROR :{reason}"),
            Reply::Topic { channel, topic } => {
                format!(":{hostname} {RPL_TOPIC:03} {n} {channel} :{topic}")
            }
            Reply::NoTopic { channel } => {
                format!(":{hostname} {RPL_NOTOPIC:03} {n} {channel} :No topic is set")
            }
            Reply::TopicWhoTime { channel, setter, set_at } => {
                format!(":{hostname} {RPL_TOPICWHOTIME:03} {n} {channel} {setter} {set_at}")
            }
            Reply::Inviting { channel, nick } => {
                format!(":{hostname} {RPL_INVITING:03} {n} {channel} {nick}")
            }
            Reply::NamReply { channel, names } => {
                format!(":{hostname} {RPL_NAMREPLY:03} {n} = {channel} :{names}")
            }
            Reply::EndOfNames { channel } => format!(
                ":{hostname} {RPL_ENDOFNAMES:03} {n} {channel} :End of /NAMES list."
            ),
            Reply::EndOfBanList { channel } => format!(
                ":{hostname} {RPL_ENDOFBANLIST:03} {n} {channel} :End of channel ban list"
            ),
            Reply::ListStart => {
                format!(":{hostname} {RPL_LISTSTART:03} {n} Channel :Users Name")
            }
            Reply::List { channel, visible, topic } => {
                format!(":{hostname} {RPL_LIST:03} {n} {channel} {visible} :{topic}")
            }
            Reply::ListEnd => format!(":{hostname} {RPL_LISTEND:03} {n} :End of /LIST"),
            Reply::ChannelModeIs { channel, modes, args } => {
                if args.is_empty() {
                    format!(":{hostname} {RPL_CHANNELMODEIS:03} {n} {channel} {modes}")
                } else {
                    format!(":{hostname} {RPL_CHANNELMODEIS:03} {n} {channel} {modes} {args}")
                }
            }
            Reply::WhoReply { channel, user, host, nick, realname } => format!(
                ":{hostname} {RPL_WHOREPLY:03} {n} {channel} {user} {host} {hostname} {nick} H :0 {realname}"
            ),
            Reply::EndOfWho { mask } => {
                format!(":{hostname} {RPL_ENDOFWHO:03} {n} {mask} :End of /WHO list.")
            }
            Reply::ErrNoSuchNick { nick } => {
                format!(":{hostname} {ERR_NOSUCHNICK:03} {n} {nick} :No such nick/channel")
            }
            Reply::ErrNoSuchServer { server } => {
                format!(":{hostname} {ERR_NOSUCHSERVER:03} {n} {server} :No such server")
            }
            Reply::ErrNoSuchChannel { channel } => {
                format!(":{hostname} {ERR_NOSUCHCHANNEL:03} {n} {channel} :No such channel")
            }
            Reply::ErrCannotSendToChan { channel } => format!(
                ":{hostname} {ERR_CANNOTSENDTOCHAN:03} {n} {channel} :Cannot send to channel"
            ),
            Reply::ErrWasNoSuchNick { nick } => format!(
                ":{hostname} {ERR_WASNOSUCHNICK:03} {n} {nick} :There was no such nickname"
            ),
            Reply::ErrNoOrigin => {
                format!(":{hostname} {ERR_NOORIGIN:03} {n} :No origin specified")
            }
            Reply::ErrUnknownCommand { command } => format!(
                ":{hostname} {ERR_UNKNOWNCOMMAND:03} {n} {command} :Unknown command"
            ),
            Reply::ErrErroneusNickname { nick } => format!(
                ":{hostname} {ERR_ERRONEUSNICKNAME:03} {n} {nick} :Erroneous nickname"
            ),
            Reply::ErrNicknameInUse { nick } => format!(
                ":{hostname} {ERR_NICKNAMEINUSE:03} {n} {nick} :Nickname is already in use"
            ),
            Reply::ErrUserNotInChannel { nick, channel } => format!(
                ":{hostname} {ERR_USERNOTINCHANNEL:03} {n} {nick} {channel} :They aren't on that channel"
            ),
            Reply::ErrNotOnChannel { channel } => format!(
                ":{hostname} {ERR_NOTONCHANNEL:03} {n} {channel} :You're not on that channel"
            ),
            Reply::ErrUserOnChannel { nick, channel } => format!(
                ":{hostname} {ERR_USERONCHANNEL:03} {n} {nick} {channel} :is already on channel"
            ),
            Reply::ErrNotRegistered => {
                format!(":{hostname} {ERR_NOTREGISTERED:03} {n} :You have not registered")
            }
            Reply::ErrNeedMoreParams { command } => format!(
                ":{hostname} {ERR_NEEDMOREPARAMS:03} {n} {command} :Not enough parameters"
            ),
            Reply::ErrAlreadyRegistered => format!(
                ":{hostname} {ERR_ALREADYREGISTERED:03} {n} :Unauthorized command (already registered)"
            ),
            Reply::ErrPasswdMismatch => {
                format!(":{hostname} {ERR_PASSWDMISMATCH:03} {n} :Password incorrect")
            }
            Reply::ErrChannelIsFull { channel } => format!(
                ":{hostname} {ERR_CHANNELISFULL:03} {n} {channel} :Cannot join channel (+l)"
            ),
            Reply::ErrUnknownMode { ch } => format!(
                ":{hostname} {ERR_UNKNOWNMODE:03} {n} {ch} :is unknown mode char to me"
            ),
            Reply::ErrInviteOnlyChan { channel } => format!(
                ":{hostname} {ERR_INVITEONLYCHAN:03} {n} {channel} :Cannot join channel (+i)"
            ),
            Reply::ErrBadChannelKey { channel } => format!(
                ":{hostname} {ERR_BADCHANNELKEY:03} {n} {channel} :Cannot join channel (+k)"
            ),
            Reply::ErrChanOPrivsNeeded { channel } => format!(
                ":{hostname} {ERR_CHANOPRIVSNEEDED:03} {n} {channel} :You're not channel operator"
            ),
            Reply::ErrBadKey { channel } => {
                format!(":{hostname} {ERR_BADKEY:03} {n} {channel} :Key is not well-formed")
            }
            Reply::ErrInvalidModeParam { channel, setting, arg } => format!(
                ":{hostname} {ERR_INVALIDMODEPARAM:03} {n} {channel} {setting} {arg} :Invalid mode parameter"
            ),
        }
    }
}
