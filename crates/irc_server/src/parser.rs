//! Message parser (§4.2): turns one raw line (CRLF already stripped by the
//! framer) into a command token and an argument vector.
//!
//! Token classes are grounded in RFC 2812's `middle`/`trailing` grammar, the
//! same `nospcrlfcl` class the reference example's RFC grammar module
//! builds on.

use crate::constants::MAX_PARTS;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    combinator::recognize,
    multi::many0,
    sequence::pair,
};

fn is_nospcrlfcl(c: char) -> bool {
    matches!(c as u32, 0x01..=0x09 | 0x0B..=0x0C | 0x0E..=0x1F | 0x21..=0x39 | 0x3B..=0x10FFFF)
}

/// `middle = nospcrlfcl *( ":" / nospcrlfcl )`
fn middle_parser(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(is_nospcrlfcl),
        many0(alt((tag(":"), take_while1(is_nospcrlfcl)))),
    ))
    .parse(input)
}

/// `trailing = *( ":" / " " / nospcrlfcl )` — consumes the entire remainder.
fn trailing_parser(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ':' || c == ' ' || is_nospcrlfcl(c)).parse(input)
}

fn skip_spaces(input: &str) -> &str {
    input.trim_start_matches(' ')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub command: String,
    pub params: Vec<String>,
}

/// Parses one line per §4.2. Returns `None` when the line is empty after
/// stripping tag/prefix, or when it would exceed the 15-part hard cap —
/// callers log a warning and drop the message without dispatching it.
pub fn parse_line(input: &str) -> Option<ParsedMessage> {
    let mut rest = skip_spaces(input);

    if rest.starts_with('@') {
        rest = skip_spaces(drop_token(rest));
    }
    if rest.starts_with(':') {
        rest = skip_spaces(drop_token(rest));
    }
    if rest.is_empty() {
        return None;
    }

    let (after_command, command) = middle_parser(rest).ok()?;
    let mut params = Vec::new();
    let mut rest = after_command;
    let mut total_parts = 1; // command counts toward the 15-part cap

    loop {
        rest = skip_spaces(rest);
        if rest.is_empty() {
            break;
        }
        if total_parts >= MAX_PARTS {
            return None;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            let (_, trailing) = trailing_parser(trailing).ok()?;
            params.push(trailing.to_string());
            break;
        }
        let (next_rest, middle) = middle_parser(rest).ok()?;
        params.push(middle.to_string());
        total_parts += 1;
        rest = next_rest;
    }

    Some(ParsedMessage {
        command: command.to_ascii_uppercase(),
        params,
    })
}

/// Drops the first whitespace-delimited token (a tag or a source prefix),
/// returning whatever follows the next space, or an empty string if the
/// token ran to the end of the line.
fn drop_token(input: &str) -> &str {
    match input.find(' ') {
        Some(idx) => &input[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_command() {
        let m = parse_line("NICK alice").unwrap();
        assert_eq!(m.command, "NICK");
        assert_eq!(m.params, vec!["alice"]);
    }

    #[test]
    fn lowercases_are_normalized() {
        let m = parse_line("nick alice").unwrap();
        assert_eq!(m.command, "NICK");
    }

    #[test]
    fn trailing_parameter_keeps_embedded_spaces() {
        let m = parse_line("PRIVMSG #chat :hello there friend").unwrap();
        assert_eq!(m.command, "PRIVMSG");
        assert_eq!(m.params, vec!["#chat", "hello there friend"]);
    }

    #[test]
    fn strips_source_prefix() {
        let m = parse_line(":alice!a@host PRIVMSG #chat :hi").unwrap();
        assert_eq!(m.command, "PRIVMSG");
        assert_eq!(m.params, vec!["#chat", "hi"]);
    }

    #[test]
    fn strips_message_tags() {
        let m = parse_line("@time=123 NICK alice").unwrap();
        assert_eq!(m.command, "NICK");
        assert_eq!(m.params, vec!["alice"]);
    }

    #[test]
    fn colon_without_trailing_semantics_mid_token_is_literal() {
        let m = parse_line("USER bob 0 * :Bob :Smith").unwrap();
        assert_eq!(m.params, vec!["bob", "0", "*", "Bob :Smith"]);
    }

    #[test]
    fn empty_line_yields_none() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn over_cap_line_is_abandoned() {
        let many_args = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let line = format!("PRIVMSG {many_args}");
        assert!(parse_line(&line).is_none());
    }
}
