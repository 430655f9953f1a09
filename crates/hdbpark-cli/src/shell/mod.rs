//! Interactive carpark query shell.
//!
//! [`Shell`] is a pure state machine: each line of user input moves it to a
//! new [`State`] and yields [`Effect`]s for the driver to carry out. Nothing
//! here touches stdin, stdout, or the network; see [`driver`] for that.

mod driver;

pub(crate) use driver::run_shell;

use hdbpark_resolver::{render_matches, AddressQuery, CarparkIndex, MatchResult, QueryError};

const WELCOME: &str = "Welcome to the Carpark Query System!\n\
This tool lets you search for carpark details and retrieve real-time availability.\n\
Type RESTART at any prompt to start over, or EXIT to quit.";

const MENU: &str = "\nPlease select an option:\n\
1. Query by carpark number\n\
2. Search by full address (e.g. BLK 101 TAMPINES STREET 1)\n\
3. Search by town or road and block number\n\
4. View the latest update time\n\
5. EXIT";

const GOODBYE: &str = "Exiting the system. Have a great day!";
const PROMPT_IDENTIFIER: &str = "Enter the carpark number:";
const PROMPT_ADDRESS: &str = "Enter the address in the format BLK <number> <town or road>:";
const PROMPT_TOWN: &str = "Enter the town or road name:";
const PROMPT_BLOCK: &str = "Enter the block number, or NOT SURE if you do not know it:";
const PROMPT_UPDATE: &str =
    "Enter a carpark number, or press Enter for the latest update across all carparks:";

/// Where the shell is in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    AwaitMode,
    AwaitIdentifier,
    AwaitAddress,
    /// `town` is `None` while asking for the town, `Some` while asking for the block.
    AwaitTownBlock { town: Option<String> },
    AwaitUpdateIdentifier,
    /// Several carparks matched; the user must name one of `candidates`.
    Disambiguate { candidates: Vec<String> },
    Exit,
}

/// Work the driver performs on behalf of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Say(String),
    /// Fetch fresh availability, merge it with this carpark, and print it.
    Show { identifier: String },
    /// Fetch fresh availability and print its latest update time,
    /// for one carpark or for the whole feed.
    LastUpdate { identifier: Option<String> },
}

fn say(text: impl Into<String>) -> Effect {
    Effect::Say(text.into())
}

#[derive(Debug)]
pub struct Shell {
    state: State,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::AwaitMode,
        }
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == State::Exit
    }

    /// Effects to emit before the first input line.
    #[must_use]
    pub fn greeting(&self) -> Vec<Effect> {
        vec![say(WELCOME), say(MENU)]
    }

    /// Consumes one line of input.
    ///
    /// `EXIT` and `RESTART` are honoured in every state. Once the shell has
    /// exited, further input is ignored.
    pub fn step(&mut self, input: &str, index: &CarparkIndex) -> Vec<Effect> {
        if self.is_finished() {
            return Vec::new();
        }

        let input = input.trim();
        match input.to_uppercase().as_str() {
            "EXIT" => return self.exit(),
            "RESTART" => {
                self.state = State::AwaitMode;
                return vec![say("Restarting the search..."), say(MENU)];
            }
            _ => {}
        }

        match std::mem::replace(&mut self.state, State::AwaitMode) {
            State::AwaitMode => self.choose_mode(input),
            State::AwaitIdentifier => self.identifier_entered(input, index),
            State::AwaitAddress => self.address_entered(input, index),
            State::AwaitTownBlock { town: None } => self.town_entered(input, index),
            State::AwaitTownBlock { town: Some(town) } => self.block_entered(&town, input, index),
            State::AwaitUpdateIdentifier => Self::update_identifier_entered(input, index),
            State::Disambiguate { candidates } => self.candidate_chosen(input, candidates),
            State::Exit => Vec::new(),
        }
    }

    fn exit(&mut self) -> Vec<Effect> {
        self.state = State::Exit;
        vec![say(GOODBYE)]
    }

    fn choose_mode(&mut self, input: &str) -> Vec<Effect> {
        let (next, prompt) = match input {
            "1" => (State::AwaitIdentifier, PROMPT_IDENTIFIER),
            "2" => (State::AwaitAddress, PROMPT_ADDRESS),
            "3" => (State::AwaitTownBlock { town: None }, PROMPT_TOWN),
            "4" => (State::AwaitUpdateIdentifier, PROMPT_UPDATE),
            "5" => return self.exit(),
            _ => {
                return vec![
                    say("Invalid choice. Please enter a valid option."),
                    say(MENU),
                ]
            }
        };
        self.state = next;
        vec![say(prompt)]
    }

    fn identifier_entered(&mut self, input: &str, index: &CarparkIndex) -> Vec<Effect> {
        if input.is_empty() {
            self.state = State::AwaitIdentifier;
            return vec![say(QueryError::EmptyIdentifier.to_string()), say(PROMPT_IDENTIFIER)];
        }
        match resolve_identifier(index, input) {
            Some(identifier) => vec![Effect::Show { identifier }, say(MENU)],
            None => vec![
                say(format!("No information found for carpark number: {input}")),
                say(MENU),
            ],
        }
    }

    fn address_entered(&mut self, input: &str, index: &CarparkIndex) -> Vec<Effect> {
        match index.lookup(&AddressQuery::full(input)) {
            Ok(result) => self.resolve(&result),
            Err(e) => {
                self.state = State::AwaitAddress;
                vec![say(e.to_string()), say(PROMPT_ADDRESS)]
            }
        }
    }

    fn town_entered(&mut self, input: &str, index: &CarparkIndex) -> Vec<Effect> {
        match index.lookup(&AddressQuery::town_block(input, None::<&str>)) {
            Ok(MatchResult::Found(_)) => {
                self.state = State::AwaitTownBlock {
                    town: Some(input.to_string()),
                };
                vec![say(PROMPT_BLOCK)]
            }
            Ok(MatchResult::Missing(miss)) => vec![say(miss.message()), say(MENU)],
            Err(e) => {
                self.state = State::AwaitTownBlock { town: None };
                vec![say(e.to_string()), say(PROMPT_TOWN)]
            }
        }
    }

    fn block_entered(&mut self, town: &str, input: &str, index: &CarparkIndex) -> Vec<Effect> {
        match index.lookup(&AddressQuery::town_block(town, Some(input))) {
            Ok(result) => self.resolve(&result),
            // Blank towns are rejected before this state is entered.
            Err(e) => vec![say(e.to_string()), say(MENU)],
        }
    }

    fn update_identifier_entered(input: &str, index: &CarparkIndex) -> Vec<Effect> {
        if input.is_empty() {
            return vec![Effect::LastUpdate { identifier: None }, say(MENU)];
        }
        match resolve_identifier(index, input) {
            Some(identifier) => vec![
                Effect::LastUpdate {
                    identifier: Some(identifier),
                },
                say(MENU),
            ],
            // Not in the reference table; the feed may still carry it.
            None => vec![
                Effect::LastUpdate {
                    identifier: Some(input.to_uppercase()),
                },
                say(MENU),
            ],
        }
    }

    fn candidate_chosen(&mut self, input: &str, candidates: Vec<String>) -> Vec<Effect> {
        let chosen = candidates
            .iter()
            .find(|id| id.eq_ignore_ascii_case(input))
            .cloned();
        if let Some(identifier) = chosen {
            return vec![Effect::Show { identifier }, say(MENU)];
        }
        let listed = candidates.join(", ");
        self.state = State::Disambiguate { candidates };
        vec![say(format!(
            "Please enter one of the listed carpark numbers ({listed}), or RESTART."
        ))]
    }

    /// Shows a single match directly and asks the user to pick among several.
    fn resolve(&mut self, result: &MatchResult<'_>) -> Vec<Effect> {
        match result {
            MatchResult::Missing(miss) => vec![say(miss.message()), say(MENU)],
            MatchResult::Found(records) if records.len() == 1 => vec![
                Effect::Show {
                    identifier: records[0].identifier().to_string(),
                },
                say(MENU),
            ],
            MatchResult::Found(records) => {
                self.state = State::Disambiguate {
                    candidates: result.identifiers().into_iter().map(String::from).collect(),
                };
                vec![
                    say(format!(
                        "Found {} carparks matching your input:\n{}",
                        records.len(),
                        render_matches(records)
                    )),
                    say("Enter the carpark number you want to view:"),
                ]
            }
        }
    }
}

/// Reference spelling of a user-typed carpark number, if it exists.
fn resolve_identifier(index: &CarparkIndex, input: &str) -> Option<String> {
    index
        .get(input)
        .or_else(|| index.get(&input.to_uppercase()))
        .map(|record| record.identifier().to_string())
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
