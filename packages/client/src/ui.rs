//! Terminal input for the client.
//!
//! A blocking rustyline thread turns keyboard activity into [`UiIntent`]s.
//! Every edit of the line is reported through the hint hook, which rustyline
//! calls on each refresh with the full current line.

use std::io::Write;

use hiroba_core::{ConnectionPhase, domain::DisplayName};
use rustyline::{
    Context, Editor, Helper, completion::Completer, error::ReadlineError, highlight::Highlighter,
    hint::Hinter, history::DefaultHistory, validate::Validator,
};
use tokio::sync::{mpsc, watch};

/// Intent raised by the terminal user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    /// The line being edited now reads this value
    InputChanged(String),
    /// A non-empty line was entered
    Submit(String),
}

/// Reports line edits without offering any hint.
struct InputWatcher {
    intents: mpsc::UnboundedSender<UiIntent>,
}

impl Hinter for InputWatcher {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.intents.send(UiIntent::InputChanged(line.to_string())).ok();
        None
    }
}

impl Completer for InputWatcher {
    type Candidate = String;
}

impl Highlighter for InputWatcher {}

impl Validator for InputWatcher {}

impl Helper for InputWatcher {}

/// Prompt shown for the given phase
pub fn prompt_for(phase: ConnectionPhase, name: Option<&DisplayName>) -> String {
    match (phase, name) {
        (ConnectionPhase::Connecting, _) => "...> ".to_string(),
        (ConnectionPhase::AwaitingUsername, _) => "username> ".to_string(),
        (ConnectionPhase::LoggedIn, Some(name)) => format!("{}> ", name),
        (ConnectionPhase::LoggedIn, None) => "> ".to_string(),
    }
}

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Spawn the blocking line-editor thread.
///
/// The thread ends, dropping `intents`, on Ctrl+C, Ctrl+D or once the
/// receiving side is gone.
pub fn spawn_input_thread(
    intents: mpsc::UnboundedSender<UiIntent>,
    prompt: watch::Receiver<String>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut rl = match Editor::<InputWatcher, DefaultHistory>::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };
        rl.set_helper(Some(InputWatcher {
            intents: intents.clone(),
        }));

        loop {
            let current_prompt = prompt.borrow().clone();
            match rl.readline(&current_prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if intents.send(UiIntent::Submit(line.to_string())).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    })
}
