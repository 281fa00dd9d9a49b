//! Parsing for the input line: a submitted line maps to exactly one
//! [`Action`], which the session loop applies. The parser is pure so the
//! whole command table is testable without a terminal.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    ShowHelp,
    ListNodes,
    ListChannels,
    SwitchChannel(u32),
    SendPrivate { destination: String, text: String },
    SendPublic(String),
    ClearScreen,
    Quit,
    Notice(&'static str),
    NoOp,
}

pub(crate) const INVALID_COMMAND: &str = "Invalid command format. Use '/h for Command Help'";
pub(crate) const INVALID_SWITCH: &str = "Invalid command format. Use '/sc <Channel Number>'";
pub(crate) const INVALID_DIRECT: &str = "Invalid command format. Use '/m !nodeId <message>'";
pub(crate) const INVALID_CHANNEL: &str = "Invalid Channel Selected";

pub(crate) fn parse(input: &str) -> Action {
    let input = input.trim();
    match input {
        "" => return Action::NoOp,
        "/h" => return Action::ShowHelp,
        "/ln" => return Action::ListNodes,
        "/lc" => return Action::ListChannels,
        "/cs" => return Action::ClearScreen,
        "/q" => return Action::Quit,
        _ => {}
    }

    if let Some(rest) = input.strip_prefix("/sc ") {
        return match rest.trim().parse::<u32>() {
            Ok(index) => Action::SwitchChannel(index),
            Err(_) => Action::Notice(INVALID_SWITCH),
        };
    }

    // The `!` sigil is command syntax, not part of the node id.
    if let Some(rest) = input.strip_prefix("/m !") {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let destination = parts.next().unwrap_or_default();
        let text = parts.next().map(str::trim_start).unwrap_or_default();
        if destination.is_empty() || text.is_empty() {
            return Action::Notice(INVALID_DIRECT);
        }
        return Action::SendPrivate {
            destination: destination.to_string(),
            text: text.to_string(),
        };
    }

    if input.starts_with('/') {
        return Action::Notice(INVALID_COMMAND);
    }

    Action::SendPublic(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands() {
        assert_eq!(parse("/h"), Action::ShowHelp);
        assert_eq!(parse("/ln"), Action::ListNodes);
        assert_eq!(parse("/lc"), Action::ListChannels);
        assert_eq!(parse("/cs"), Action::ClearScreen);
        assert_eq!(parse("/q"), Action::Quit);
        assert_eq!(parse("  /q  "), Action::Quit);
    }

    #[test]
    fn empty_input_is_a_noop() {
        assert_eq!(parse(""), Action::NoOp);
        assert_eq!(parse("   "), Action::NoOp);
    }

    #[test]
    fn switch_channel() {
        assert_eq!(parse("/sc 2"), Action::SwitchChannel(2));
        assert_eq!(parse("/sc  0 "), Action::SwitchChannel(0));
        assert_eq!(parse("/sc two"), Action::Notice(INVALID_SWITCH));
        assert_eq!(parse("/sc "), Action::Notice(INVALID_SWITCH));
        // No trailing space, no match: falls through to the catch-all.
        assert_eq!(parse("/sc2"), Action::Notice(INVALID_COMMAND));
    }

    #[test]
    fn direct_message() {
        assert_eq!(
            parse("/m !abc123 hello there"),
            Action::SendPrivate {
                destination: "abc123".into(),
                text: "hello there".into(),
            }
        );
        assert_eq!(parse("/m !abc123"), Action::Notice(INVALID_DIRECT));
        assert_eq!(parse("/m ! hello"), Action::Notice(INVALID_DIRECT));
        // Without the sigil the input is just an unknown command.
        assert_eq!(parse("/m abc123 hello"), Action::Notice(INVALID_COMMAND));
    }

    #[test]
    fn direct_message_preserves_inner_whitespace() {
        assert_eq!(
            parse("/m !abc123  spaced  out "),
            Action::SendPrivate {
                destination: "abc123".into(),
                text: "spaced  out".into(),
            }
        );
    }

    #[test]
    fn unknown_slash_command_is_rejected() {
        assert_eq!(parse("/nope"), Action::Notice(INVALID_COMMAND));
        assert_eq!(parse("/"), Action::Notice(INVALID_COMMAND));
    }

    #[test]
    fn plain_text_is_a_public_send() {
        assert_eq!(parse("hello mesh"), Action::SendPublic("hello mesh".into()));
        assert_eq!(parse("  padded  "), Action::SendPublic("padded".into()));
    }
}
