//! Console output formatter for the chat workspace

use allar_application::{EMPTY_SIDEBAR_TEXT, SessionSummary};
use allar_domain::{Message, Model, PromptTemplate, Role, Session, UserProfile};
use colored::Colorize;

/// Label on user messages.
pub const USER_LABEL: &str = "QUERY";
/// Label on assistant messages.
pub const ASSISTANT_LABEL: &str = "ALLAR ENGINE V3";

const RULE_WIDTH: usize = 60;

/// Formats workspace state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Landing banner shown before sign-in
    pub fn banner() -> String {
        let line = "=".repeat(RULE_WIDTH);
        format!(
            "{}\n{:^width$}\n{:^width$}\n{}",
            line.yellow(),
            "ALLAR AI".bold(),
            "Beyond a Chatbot. A Boardroom Ally.".dimmed(),
            line.yellow(),
            width = RULE_WIDTH
        )
    }

    /// Title bar: current session title, signed-in user and model
    pub fn header(title: &str, user: Option<&UserProfile>, model: &Model) -> String {
        let who = user
            .map(|u| format!("{} <{}>", u.display_name(), u.contact_address()))
            .unwrap_or_else(|| "guest".to_string());
        format!(
            "\n{} {}  {}\n{}",
            "──".yellow(),
            title.bold(),
            format!("{} · {}", who, model).dimmed(),
            "─".repeat(RULE_WIDTH).dimmed()
        )
    }

    /// Session list, most recent first, numbered from 1
    pub fn sidebar(rows: &[SessionSummary]) -> String {
        if rows.is_empty() {
            return format!("  {}\n", EMPTY_SIDEBAR_TEXT.dimmed());
        }

        let mut output = format!("{}\n", "Archives".cyan().bold());
        for (i, row) in rows.iter().enumerate() {
            let marker = if row.is_current { "*" } else { " " };
            output.push_str(&format!(
                "{} {:>2}. {}  {}\n",
                marker.yellow(),
                i + 1,
                row.title,
                format!(
                    "{} msgs · {}",
                    row.message_count,
                    row.created_at.format("%H:%M")
                )
                .dimmed()
            ));
        }
        output
    }

    /// Label line for a message, e.g. "[A] QUERY"
    pub fn message_label(role: Role, user_initial: char) -> String {
        match role {
            Role::User => format!(
                "{} {}",
                format!("[{}]", user_initial).dimmed(),
                USER_LABEL.bold()
            ),
            Role::Assistant => format!("{} {}", "[AR]".yellow(), ASSISTANT_LABEL.yellow().bold()),
        }
    }

    /// One message with its label
    pub fn message(message: &Message, user_initial: char) -> String {
        let body = if message.is_pending() {
            "...".dimmed().to_string()
        } else {
            message.content().to_string()
        };
        format!(
            "{}\n{}\n",
            Self::message_label(message.role(), user_initial),
            Self::indent(&body, "  ")
        )
    }

    /// The full thread of a session
    pub fn thread(session: &Session, user_initial: char) -> String {
        if session.is_empty() {
            return Self::empty_thread();
        }
        session
            .messages()
            .iter()
            .map(|m| Self::message(m, user_initial))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Shown on an empty thread: the call to action and the suggestions
    pub fn empty_thread() -> String {
        let mut output = format!(
            "\n  Awaiting your {}\n\n",
            "Strategic Directives.".yellow().bold()
        );
        output.push_str(&Self::suggestions());
        output
    }

    pub fn suggestions() -> String {
        let mut output = String::new();
        for (i, (label, prompt)) in PromptTemplate::suggestions().iter().enumerate() {
            output.push_str(&format!(
                "  {} {}  {}\n",
                format!("/suggest {}", i + 1).cyan(),
                label.bold(),
                prompt.dimmed()
            ));
        }
        output
    }

    pub fn profile(user: &UserProfile) -> String {
        format!(
            "{}\n  Name:   {}\n  Email:  {}\n  Avatar: {}px\n",
            "Profile".cyan().bold(),
            user.display_name(),
            user.contact_address(),
            user.avatar_size()
        )
    }

    pub fn help() -> String {
        let rows = [
            ("/new", "Start a new strategic brief"),
            ("/sessions", "List sessions (most recent first)"),
            ("/select <n|id>", "Switch to a session by number or id"),
            ("/history", "Show the current thread"),
            ("/profile [name=..] [email=..] [avatar=..]", "Show or edit your profile"),
            ("/suggest <n>", "Submit a suggested prompt"),
            ("/logout", "Sign out and clear every session"),
            ("/help", "Show this help"),
            ("/quit", "Exit"),
        ];
        let mut output = format!("\n{}\n", "Commands:".cyan().bold());
        for (cmd, description) in rows {
            output.push_str(&format!("  {:<44} {}\n", cmd, description.dimmed()));
        }
        output
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "x".red().bold(), message.red())
    }

    pub fn notice(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
