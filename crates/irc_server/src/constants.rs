//! Numeric reply codes used by the dispatcher and handlers.
//!
//! Only the codes this server actually emits are listed here; see
//! `reply.rs` for how each one is rendered onto the wire.

pub const RPL_WELCOME: u16 = 1;
pub const RPL_YOURHOST: u16 = 2;
pub const RPL_CREATED: u16 = 3;
pub const RPL_MYINFO: u16 = 4;
pub const RPL_ISUPPORT: u16 = 5;

pub const RPL_UMODEIS: u16 = 221;

pub const RPL_LUSERCLIENT: u16 = 251;
pub const RPL_LUSERCHANNELS: u16 = 254;
pub const RPL_LUSERME: u16 = 255;

pub const RPL_LISTSTART: u16 = 321;
pub const RPL_LIST: u16 = 322;
pub const RPL_LISTEND: u16 = 323;
pub const RPL_CHANNELMODEIS: u16 = 324;

pub const RPL_NOTOPIC: u16 = 331;
pub const RPL_TOPIC: u16 = 332;
pub const RPL_TOPICWHOTIME: u16 = 333;

pub const RPL_INVITING: u16 = 341;

pub const RPL_WHOREPLY: u16 = 351;
pub const RPL_NAMREPLY: u16 = 353;

pub const RPL_ENDOFWHO: u16 = 315;
pub const RPL_ENDOFNAMES: u16 = 366;
pub const RPL_ENDOFBANLIST: u16 = 368;

pub const RPL_MOTDSTART: u16 = 375;
pub const RPL_MOTD: u16 = 372;
pub const RPL_ENDOFMOTD: u16 = 376;

pub const ERR_NOSUCHNICK: u16 = 401;
pub const ERR_NOSUCHSERVER: u16 = 402;
pub const ERR_NOSUCHCHANNEL: u16 = 403;
pub const ERR_CANNOTSENDTOCHAN: u16 = 404;
pub const ERR_WASNOSUCHNICK: u16 = 406;
pub const ERR_NOORIGIN: u16 = 409;
pub const ERR_UNKNOWNCOMMAND: u16 = 421;
pub const ERR_ERRONEUSNICKNAME: u16 = 432;
pub const ERR_NICKNAMEINUSE: u16 = 433;
pub const ERR_USERNOTINCHANNEL: u16 = 441;
pub const ERR_NOTONCHANNEL: u16 = 442;
pub const ERR_USERONCHANNEL: u16 = 443;
pub const ERR_NOTREGISTERED: u16 = 451;
pub const ERR_NEEDMOREPARAMS: u16 = 461;
pub const ERR_ALREADYREGISTERED: u16 = 462;
pub const ERR_PASSWDMISMATCH: u16 = 464;
pub const ERR_CHANNELISFULL: u16 = 471;
pub const ERR_UNKNOWNMODE: u16 = 472;
pub const ERR_INVITEONLYCHAN: u16 = 473;
pub const ERR_BADCHANNELKEY: u16 = 475;
pub const ERR_CHANOPRIVSNEEDED: u16 = 482;
pub const ERR_USERSDONTMATCH: u16 = 502;
pub const ERR_BADKEY: u16 = 525;
pub const ERR_INVALIDMODEPARAM: u16 = 696;

/// Hard cap on the number of whitespace-delimited parts a line may parse
/// into (command included). See §4.2.
pub const MAX_PARTS: usize = 15;

/// `USER` username is truncated to this many characters.
pub const MAX_USERNAME_LEN: usize = 10;

/// `NICK` rejects names longer than this.
pub const MAX_NICK_LEN: usize = 9;

/// `KICK` reason is truncated to this many characters.
pub const MAX_KICK_REASON_LEN: usize = 255;
