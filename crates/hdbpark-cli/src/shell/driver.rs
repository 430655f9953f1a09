use std::io::Write as _;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{Effect, Shell};
use crate::commands::{run_last_update, run_lookup, Session};

/// Run the interactive shell on stdin/stdout until `EXIT` or end of input.
///
/// A failed feed fetch is reported and the shell keeps going; only I/O
/// errors on the terminal itself end the loop early.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be flushed.
pub(crate) async fn run_shell(session: &Session) -> anyhow::Result<()> {
    let mut shell = Shell::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    perform(session, shell.greeting()).await;
    while !shell.is_finished() {
        print!("> ");
        std::io::stdout().flush().context("flushing shell prompt")?;

        let Some(line) = lines.next_line().await.context("reading shell input")? else {
            tracing::debug!("end of input; leaving shell");
            break;
        };
        tracing::debug!(state = ?shell.state(), "shell input");
        let effects = shell.step(&line, &session.index);
        perform(session, effects).await;
    }

    Ok(())
}

async fn perform(session: &Session, effects: Vec<Effect>) {
    for effect in effects {
        let outcome = match effect {
            Effect::Say(text) => {
                println!("{text}");
                Ok(())
            }
            Effect::Show { identifier } => run_lookup(session, &identifier).await,
            Effect::LastUpdate { identifier } => {
                run_last_update(session, identifier.as_deref()).await
            }
        };
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "shell query failed");
            println!("Could not complete the request: {e:#}");
        }
    }
}
