//! Inbound text classification.

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    Start,
    Play,
    Help,
    Board,
    Stop,
    /// A slash command the bot does not know; carries the command name without `/`.
    Unknown(&'a str),
    /// Anything else; a candidate move.
    Move(&'a str),
}

impl<'a> ChatCommand<'a> {
    /// Classifies `text`. Commands may carry a `@botname` suffix (group chats) and trailing
    /// arguments, both ignored.
    pub fn parse(text: &'a str) -> Self {
        let trimmed = text.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ChatCommand::Move(text);
        };
        let word = rest.split_whitespace().next().unwrap_or("");
        let name = word.split('@').next().unwrap_or(word);
        match name {
            "start" => ChatCommand::Start,
            "play" => ChatCommand::Play,
            "help" => ChatCommand::Help,
            "board" => ChatCommand::Board,
            "stop" => ChatCommand::Stop,
            _ => ChatCommand::Unknown(name),
        }
    }

    /// The bot a command names with its `@botname` suffix; `None` for plain commands and text.
    pub fn addressee(text: &str) -> Option<&str> {
        let rest = text.trim().strip_prefix('/')?;
        let word = rest.split_whitespace().next()?;
        word.split_once('@').map(|(_, bot)| bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(ChatCommand::parse("/start"), ChatCommand::Start);
        assert_eq!(ChatCommand::parse("/play"), ChatCommand::Play);
        assert_eq!(ChatCommand::parse(" /help "), ChatCommand::Help);
        assert_eq!(ChatCommand::parse("/board"), ChatCommand::Board);
        assert_eq!(ChatCommand::parse("/stop"), ChatCommand::Stop);
    }

    #[test]
    fn test_bot_suffix_and_arguments_ignored() {
        assert_eq!(ChatCommand::parse("/play@chess_relay_bot"), ChatCommand::Play);
        assert_eq!(ChatCommand::parse("/help me please"), ChatCommand::Help);
    }

    #[test]
    fn test_addressee() {
        assert_eq!(ChatCommand::addressee("/play@chess_relay_bot"), Some("chess_relay_bot"));
        assert_eq!(ChatCommand::addressee(" /help@other_bot now"), Some("other_bot"));
        assert_eq!(ChatCommand::addressee("/play"), None);
        assert_eq!(ChatCommand::addressee("e2e4"), None);
        assert_eq!(ChatCommand::addressee("mail me@home"), None);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(ChatCommand::parse("/undo"), ChatCommand::Unknown("undo"));
        assert_eq!(ChatCommand::parse("/"), ChatCommand::Unknown(""));
    }

    #[test]
    fn test_plain_text_is_a_move() {
        assert_eq!(ChatCommand::parse("e2e4"), ChatCommand::Move("e2e4"));
        assert_eq!(ChatCommand::parse("hello"), ChatCommand::Move("hello"));
    }
}
