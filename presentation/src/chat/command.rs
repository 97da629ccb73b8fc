//! Slash-command parsing for the chat REPL

use allar_domain::ProfileUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    New,
    Sessions,
    /// Sidebar position (1-based) or session id
    Select(String),
    History,
    /// Show the profile when the update is empty, apply it otherwise
    Profile(ProfileUpdate),
    Suggest(usize),
    Logout,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a `/command`. Returns `Ok(None)` for input that is not a command.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(None);
        };
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "new" | "n" => ReplCommand::New,
            "sessions" | "ls" => ReplCommand::Sessions,
            "select" | "s" => {
                if args.is_empty() {
                    return Err("Usage: /select <number|id>".to_string());
                }
                ReplCommand::Select(args.to_string())
            }
            "history" => ReplCommand::History,
            "profile" => ReplCommand::Profile(parse_profile_update(args)?),
            "suggest" => {
                let position = args
                    .parse::<usize>()
                    .map_err(|_| "Usage: /suggest <number>".to_string())?;
                ReplCommand::Suggest(position)
            }
            "logout" => ReplCommand::Logout,
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => {
                return Err(format!(
                    "Unknown command: /{}\nType /help for available commands",
                    other
                ));
            }
        };
        Ok(Some(command))
    }
}

/// `name=Ada Lovelace email=ada@example.com avatar=48`
///
/// A value runs until the next `key=`, so names may contain spaces.
fn parse_profile_update(args: &str) -> Result<ProfileUpdate, String> {
    let mut update = ProfileUpdate::default();
    let mut fields: Vec<(&str, Vec<&str>)> = Vec::new();

    for token in args.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if matches!(key, "name" | "email" | "avatar") => {
                fields.push((key, vec![value]));
            }
            _ => match fields.last_mut() {
                Some((_, words)) => words.push(token),
                None => return Err(format!("Unexpected profile argument: {}", token)),
            },
        }
    }

    for (key, words) in fields {
        let value = words.join(" ");
        match key {
            "name" => update.display_name = Some(value),
            "email" => update.contact_address = Some(value),
            _ => {
                let size = value
                    .parse::<u32>()
                    .map_err(|_| format!("Avatar size must be a number, got '{}'", value))?;
                update.avatar_size = Some(size);
            }
        }
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("hello /new").unwrap(), None);
    }

    #[test]
    fn simple_commands() {
        assert_eq!(ReplCommand::parse("/new").unwrap(), Some(ReplCommand::New));
        assert_eq!(ReplCommand::parse(" /quit ").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(
            ReplCommand::parse("/select 2").unwrap(),
            Some(ReplCommand::Select("2".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/suggest 1").unwrap(),
            Some(ReplCommand::Suggest(1))
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(ReplCommand::parse("/select").is_err());
        assert!(ReplCommand::parse("/suggest first").is_err());
        assert!(ReplCommand::parse("/frobnicate").is_err());
    }

    #[test]
    fn profile_values_may_contain_spaces() {
        let parsed = ReplCommand::parse("/profile name=Ada King Lovelace avatar=48").unwrap();
        assert_eq!(
            parsed,
            Some(ReplCommand::Profile(ProfileUpdate {
                display_name: Some("Ada King Lovelace".to_string()),
                contact_address: None,
                avatar_size: Some(48),
            }))
        );
    }

    #[test]
    fn bare_profile_is_an_empty_update() {
        match ReplCommand::parse("/profile").unwrap() {
            Some(ReplCommand::Profile(update)) => assert!(update.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn profile_rejects_stray_words_and_bad_sizes() {
        assert!(ReplCommand::parse("/profile Ada").is_err());
        assert!(ReplCommand::parse("/profile avatar=big").is_err());
    }
}
