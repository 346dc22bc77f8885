//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for credentials,
//! the message log and help.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Forget the credentials and the message log, then prompt again.
    Keys,
    /// Show the message log.
    History,
    /// Clear the terminal screen and the message log.
    Clear,
    /// Write the transcript to a file (default name when `None`).
    Save(Option<String>),
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, ' ');
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts
        .next()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/keys" | "/config" => Some(ChatCommand::Keys),
        "/history" => Some(ChatCommand::History),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/save" => Some(ChatCommand::Save(arg)),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}       {}", style("/help").cyan(), "Show this help message");
    println!("  {}       {}", style("/keys").cyan(), "Change API keys (clears the chat)");
    println!("  {}    {}", style("/history").cyan(), "Show the messages so far");
    println!("  {}      {}", style("/clear").cyan(), "Clear the screen and the chat");
    println!("  {} {}", style("/save [file]").cyan(), "Write the transcript to a file");
    println!("  {}       {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit. Keys are kept in memory only.").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_keys_and_exit() {
        assert_eq!(parse("/keys"), Some(ChatCommand::Keys));
        assert_eq!(parse("/QUIT"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_save_with_and_without_path() {
        assert_eq!(parse("/save"), Some(ChatCommand::Save(None)));
        assert_eq!(parse("/save   "), Some(ChatCommand::Save(None)));
        assert_eq!(
            parse("/save notes/chat.md"),
            Some(ChatCommand::Save(Some("notes/chat.md".to_string())))
        );
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("send 0.1 ETH to 0xabc"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo bar"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
