//! REPL (Read-Eval-Print Loop) for the chat workspace

use super::command::ReplCommand;
use crate::config::ConsoleConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::StreamRenderer;
use allar_application::{ChatWorkspace, WorkspaceError};
use allar_domain::{PromptTemplate, SessionId};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    SignedOut,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    workspace: ChatWorkspace,
    config: ConsoleConfig,
}

impl ChatRepl {
    pub fn new(workspace: ChatWorkspace, config: ConsoleConfig) -> Self {
        Self { workspace, config }
    }

    pub fn workspace(&self) -> &ChatWorkspace {
        &self.workspace
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!("{}", ConsoleFormatter::banner());

        'session: loop {
            if !self.workspace.is_signed_in() && !self.sign_in(&mut rl)? {
                break;
            }
            self.print_dashboard();

            loop {
                let readline = rl.readline(&self.prompt());

                match readline {
                    Ok(line) => {
                        let line = line.trim();

                        // Skip empty lines
                        if line.is_empty() {
                            continue;
                        }

                        let _ = rl.add_history_entry(line);

                        match self.handle_line(line).await {
                            Flow::Continue => {}
                            Flow::SignedOut => continue 'session,
                            Flow::Quit => break 'session,
                        }
                    }
                    Err(ReadlineError::Interrupted) => {
                        println!("^C");
                        continue;
                    }
                    Err(ReadlineError::Eof) => {
                        println!("Bye!");
                        break 'session;
                    }
                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        break 'session;
                    }
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Mocked login. Returns `false` when input ends before sign-in completes.
    fn sign_in(&mut self, rl: &mut DefaultEditor) -> RlResult<bool> {
        println!();
        println!("Access Portal - enter any name and email, or 'google' for the demo identity");

        loop {
            let name = match rl.readline("Full Name: ") {
                Ok(name) => name,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
                Err(e) => return Err(e),
            };
            if name.trim().eq_ignore_ascii_case("google") {
                self.workspace.sign_in_with_google();
                return Ok(true);
            }

            let email = match rl.readline("Work Email: ") {
                Ok(email) => email,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
                Err(e) => return Err(e),
            };

            match self.workspace.sign_in(&name, &email) {
                Ok(_) => return Ok(true),
                Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
            }
        }
    }

    fn prompt(&self) -> String {
        format!("{} › ", self.workspace.header_title())
    }

    fn user_initial(&self) -> char {
        self.workspace.user().map(|u| u.initial()).unwrap_or('U')
    }

    fn print_dashboard(&self) {
        println!(
            "{}",
            ConsoleFormatter::header(
                &self.workspace.header_title(),
                self.workspace.user(),
                self.workspace.controller().gateway().model()
            )
        );
        print!("{}", ConsoleFormatter::sidebar(&self.workspace.sessions()));
        self.print_thread();
        println!("Type /help for commands.");
    }

    fn print_thread(&self) {
        match self.workspace.current_session() {
            Some(session) => println!("{}", ConsoleFormatter::thread(&session, self.user_initial())),
            None => println!("{}", ConsoleFormatter::empty_thread()),
        }
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        match ReplCommand::parse(line) {
            Ok(Some(command)) => self.handle_command(command).await,
            Ok(None) => {
                self.submit(line).await;
                Flow::Continue
            }
            Err(message) => {
                println!("{}", ConsoleFormatter::error(&message));
                Flow::Continue
            }
        }
    }

    async fn handle_command(&mut self, command: ReplCommand) -> Flow {
        debug!("REPL command: {:?}", command);
        match command {
            ReplCommand::New => {
                self.workspace.new_chat();
                self.print_dashboard();
            }
            ReplCommand::Sessions => {
                print!("{}", ConsoleFormatter::sidebar(&self.workspace.sessions()));
            }
            ReplCommand::Select(target) => {
                let result = match target.parse::<usize>() {
                    Ok(position) => self.workspace.select_position(position).map(|_| ()),
                    Err(_) => self.workspace.select_session(&SessionId::new(target)),
                };
                match result {
                    Ok(()) => self.print_dashboard(),
                    Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
                }
            }
            ReplCommand::History => self.print_thread(),
            ReplCommand::Profile(update) => {
                let result = if update.is_empty() {
                    self.workspace.user().ok_or(WorkspaceError::NotSignedIn)
                } else {
                    self.workspace.update_profile(update)
                };
                match result {
                    Ok(user) => print!("{}", ConsoleFormatter::profile(user)),
                    Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
                }
            }
            ReplCommand::Suggest(position) => match PromptTemplate::suggestion(position) {
                Some(prompt) => {
                    println!("{}", ConsoleFormatter::notice(prompt));
                    self.submit(prompt).await;
                }
                None => println!(
                    "{}",
                    ConsoleFormatter::error(&format!("No suggestion #{}", position))
                ),
            },
            ReplCommand::Logout => {
                self.workspace.sign_out();
                println!("{}", ConsoleFormatter::notice("Signed out. Session archive cleared."));
                return Flow::SignedOut;
            }
            ReplCommand::Help => print!("{}", ConsoleFormatter::help()),
            ReplCommand::Quit => {
                println!("Bye!");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    async fn submit(&mut self, prompt: &str) {
        let renderer = StreamRenderer::new(self.config.show_spinner);
        if let Err(e) = self.workspace.submit(prompt, &renderer).await {
            println!("{}", ConsoleFormatter::error(&e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allar_application::{
        GatewayError, GenerationController, HistoryTurn, LlmGateway, SharedSessionStore,
        StreamHandle,
    };
    use allar_domain::Model;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct CannedGateway {
        model: Model,
    }

    #[async_trait]
    impl LlmGateway for CannedGateway {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn stream_chat(
            &self,
            _history: &[HistoryTurn],
            _prompt: &str,
        ) -> Result<StreamHandle, GatewayError> {
            Ok(StreamHandle::from_fragments(["Noted", "."]))
        }
    }

    fn repl() -> ChatRepl {
        let controller = GenerationController::new(
            Arc::new(CannedGateway {
                model: Model::default(),
            }),
            SharedSessionStore::new(),
        );
        let mut workspace = ChatWorkspace::new(controller);
        workspace.sign_in_with_google();
        ChatRepl::new(
            workspace,
            ConsoleConfig {
                show_spinner: false,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn prompt_lines_are_submitted() {
        let mut repl = repl();
        assert_eq!(repl.handle_line("Assess our burn rate").await, Flow::Continue);

        let session = repl.workspace().current_session().unwrap();
        assert_eq!(session.title().as_str(), "ASSESS OUR BURN RATE");
        assert_eq!(session.messages()[1].content(), "Noted.");
    }

    #[tokio::test]
    async fn suggestion_submits_its_prompt() {
        let mut repl = repl();
        repl.handle_line("/suggest 2").await;

        let session = repl.workspace().current_session().unwrap();
        assert_eq!(
            session.messages()[0].content(),
            PromptTemplate::suggestion(2).unwrap()
        );
    }

    #[tokio::test]
    async fn navigation_commands_move_the_pointer() {
        let mut repl = repl();
        repl.handle_line("/new").await;
        let first = repl.workspace().current_session_id().cloned().unwrap();
        repl.handle_line("/new").await;
        assert_ne!(repl.workspace().current_session_id(), Some(&first));

        repl.handle_line("/select 2").await;
        assert_eq!(repl.workspace().current_session_id(), Some(&first));

        // Unknown targets leave the pointer alone
        repl.handle_line("/select 9").await;
        repl.handle_line("/select no-such-id").await;
        assert_eq!(repl.workspace().current_session_id(), Some(&first));
    }

    #[tokio::test]
    async fn profile_edit_applies() {
        let mut repl = repl();
        repl.handle_line("/profile name=Grace Hopper avatar=10").await;
        let user = repl.workspace().user().unwrap();
        assert_eq!(user.display_name(), "Grace Hopper");
        assert_eq!(user.avatar_size(), 32);
    }

    #[tokio::test]
    async fn logout_and_quit_end_the_loop() {
        let mut repl = repl();
        repl.handle_line("hello").await;
        assert_eq!(repl.handle_line("/logout").await, Flow::SignedOut);
        assert!(!repl.workspace().is_signed_in());
        assert!(repl.workspace().sessions().is_empty());

        assert_eq!(repl.handle_line("/quit").await, Flow::Quit);
    }
}
