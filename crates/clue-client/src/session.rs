use std::fmt;
use std::str::FromStr;

use clue_bot::Policy;
use clue_core::model::deck::Deck;
use clue_core::model::triple::Triple;
use thiserror::Error;
use tracing::{Level, event};

use crate::protocol::{Messenger, ProtocolError};

/// First word of a server message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Reset,
    Suggest,
    Suggestion,
    Disprove,
    Accuse,
    Accusation,
    Done,
}

impl Verb {
    pub const ALL: [Verb; 7] = [
        Verb::Reset,
        Verb::Suggest,
        Verb::Suggestion,
        Verb::Disprove,
        Verb::Accuse,
        Verb::Accusation,
        Verb::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Reset => "reset",
            Verb::Suggest => "suggest",
            Verb::Suggestion => "suggestion",
            Verb::Disprove => "disprove",
            Verb::Accuse => "accuse",
            Verb::Accusation => "accusation",
            Verb::Done => "done",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ParseError;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == word)
            .ok_or_else(|| ParseError::Unknown(word.to_string()))
    }
}

/// A parsed server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset {
        player_count: usize,
        seat: usize,
        hand: Vec<String>,
    },
    Suggest,
    Suggestion {
        suggester: usize,
        cards: Vec<String>,
        disprover: Option<usize>,
        revealed: Option<String>,
    },
    Disprove {
        suggester: usize,
        cards: Vec<String>,
    },
    Accuse,
    Accusation {
        accuser: usize,
        cards: Vec<String>,
        correct: bool,
    },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty message")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("{verb}: missing {argument}")]
    Missing { verb: Verb, argument: &'static str },
    #[error("{verb}: '{value}' is not a valid {argument}")]
    Invalid {
        verb: Verb,
        argument: &'static str,
        value: String,
    },
}

impl ParseError {
    /// The command the broken message was meant to be, when recognizable.
    pub fn verb(&self) -> Option<Verb> {
        match self {
            ParseError::Missing { verb, .. } | ParseError::Invalid { verb, .. } => Some(*verb),
            ParseError::Empty | ParseError::Unknown(_) => None,
        }
    }
}

struct Args<'a> {
    verb: Verb,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::Missing {
            verb: self.verb,
            argument,
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<usize, ParseError> {
        let word = self.word(argument)?;
        word.parse().map_err(|_| ParseError::Invalid {
            verb: self.verb,
            argument,
            value: word.to_string(),
        })
    }

    fn cards(&mut self, count: usize) -> Result<Vec<String>, ParseError> {
        (0..count)
            .map(|_| self.word("card").map(str::to_string))
            .collect()
    }

    fn rest(&mut self) -> Vec<String> {
        self.tokens.by_ref().map(str::to_string).collect()
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let verb: Verb = tokens.next().ok_or(ParseError::Empty)?.parse()?;
        let mut args = Args { verb, tokens };

        let command = match verb {
            Verb::Reset => {
                let player_count = args.number("player count")?;
                let seat = args.number("player id")?;
                Command::Reset {
                    player_count,
                    seat,
                    hand: args.rest(),
                }
            }
            Verb::Suggest => Command::Suggest,
            Verb::Suggestion => {
                let suggester = args.number("player id")?;
                let cards = args.cards(3)?;
                let disprover = match args.word("disprover")? {
                    "-" => None,
                    word => Some(word.parse::<usize>().map_err(|_| ParseError::Invalid {
                        verb,
                        argument: "disprover",
                        value: word.to_string(),
                    })?),
                };
                let revealed = args.tokens.next().map(str::to_string);
                Command::Suggestion {
                    suggester,
                    cards,
                    disprover,
                    revealed,
                }
            }
            Verb::Disprove => {
                let suggester = args.number("player id")?;
                let cards = args.rest();
                if cards.is_empty() {
                    return Err(ParseError::Missing {
                        verb,
                        argument: "card",
                    });
                }
                Command::Disprove { suggester, cards }
            }
            Verb::Accuse => Command::Accuse,
            Verb::Accusation => {
                let accuser = args.number("player id")?;
                let cards = args.cards(3)?;
                let correct = match args.word("outcome")? {
                    "+" => true,
                    "-" => false,
                    word => {
                        return Err(ParseError::Invalid {
                            verb,
                            argument: "outcome",
                            value: word.to_string(),
                        });
                    }
                };
                Command::Accusation {
                    accuser,
                    cards,
                    correct,
                }
            }
            Verb::Done => Command::Done,
        };
        Ok(command)
    }

    pub fn verb(&self) -> Verb {
        match self {
            Command::Reset { .. } => Verb::Reset,
            Command::Suggest => Verb::Suggest,
            Command::Suggestion { .. } => Verb::Suggestion,
            Command::Disprove { .. } => Verb::Disprove,
            Command::Accuse => Verb::Accuse,
            Command::Accusation { .. } => Verb::Accusation,
            Command::Done => Verb::Done,
        }
    }
}

/// A message the player sends back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Suggest([String; 3]),
    Show(String),
    Accuse(Option<[String; 3]>),
    Dead,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("ok"),
            Reply::Suggest(cards) => write!(f, "suggest {}", cards.join(" ")),
            Reply::Show(card) => write!(f, "show {card}"),
            Reply::Accuse(Some(cards)) => write!(f, "accuse {}", cards.join(" ")),
            Reply::Accuse(None) => f.write_str("-"),
            Reply::Dead => f.write_str("dead"),
        }
    }
}

/// Drives one connection: reads server messages, asks the policy, answers.
pub struct Session<P, M> {
    name: String,
    deck: Deck,
    policy: P,
    messenger: M,
}

impl<P: Policy, M: Messenger> Session<P, M> {
    /// `deck` is only used to build harmless replies when the policy cannot answer.
    pub fn new(name: impl Into<String>, deck: Deck, policy: P, messenger: M) -> Self {
        Self {
            name: name.into(),
            deck,
            policy,
            messenger,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_parts(self) -> (P, M) {
        (self.policy, self.messenger)
    }

    /// Announces the player and serves messages until `done` or disconnect.
    pub fn run(&mut self) -> Result<(), ProtocolError> {
        self.messenger.send(&format!("{} alive", self.name))?;
        event!(target: "clue_client::session", Level::INFO, player = %self.name, "announced");

        loop {
            let message = match self.messenger.recv() {
                Ok(message) => message,
                Err(ProtocolError::Closed) => {
                    event!(
                        target: "clue_client::session",
                        Level::WARN,
                        "server closed the connection before done"
                    );
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
            event!(target: "clue_client::session", Level::DEBUG, raw = %message, "received");

            let Some(reply) = self.handle(&message) else {
                continue;
            };
            let text = reply.to_string();
            self.messenger.send(&text)?;
            event!(target: "clue_client::session", Level::DEBUG, reply = %text, "sent");
            if reply == Reply::Dead {
                return Ok(());
            }
        }
    }

    /// Answers one server message; `None` means it is ignored.
    pub fn handle(&mut self, message: &str) -> Option<Reply> {
        match Command::parse(message) {
            Ok(command) => Some(self.dispatch(command)),
            Err(err) => {
                event!(
                    target: "clue_client::session",
                    Level::WARN,
                    raw = message,
                    error = %err,
                    "unparseable message"
                );
                let verb = err.verb()?;
                let first_card = message.split_whitespace().nth(2).map(str::to_string);
                Some(self.neutral(verb, first_card))
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Reply {
        let verb = command.verb();
        let first_card = match &command {
            Command::Disprove { cards, .. } => cards.first().cloned(),
            _ => None,
        };

        let outcome = match command {
            Command::Reset {
                player_count,
                seat,
                hand,
            } => self.policy.reset(player_count, seat, &hand).map(|()| Reply::Ok),
            Command::Suggest => self.policy.suggest().map(Reply::Suggest),
            Command::Suggestion {
                suggester,
                cards,
                disprover,
                revealed,
            } => self
                .policy
                .observe_suggestion(suggester, &cards, disprover, revealed.as_deref())
                .map(|()| Reply::Ok),
            Command::Disprove { suggester, cards } => {
                self.policy.disprove(suggester, &cards).map(Reply::Show)
            }
            Command::Accuse => self.policy.accuse().map(Reply::Accuse),
            Command::Accusation {
                accuser,
                cards,
                correct,
            } => self
                .policy
                .observe_accusation(accuser, &cards, correct)
                .map(|()| Reply::Ok),
            Command::Done => {
                self.policy.done();
                Ok(Reply::Dead)
            }
        };

        outcome.unwrap_or_else(|err| {
            event!(
                target: "clue_client::session",
                Level::ERROR,
                command = %verb,
                error = %err,
                "policy rejected command"
            );
            self.neutral(verb, first_card)
        })
    }

    /// A reply that keeps the server moving without claiming anything.
    fn neutral(&self, verb: Verb, first_card: Option<String>) -> Reply {
        match verb {
            Verb::Suggest => Reply::Suggest(Triple::first(&self.deck).to_names(&self.deck)),
            Verb::Disprove => Reply::Show(first_card.unwrap_or_else(|| "-".to_string())),
            Verb::Accuse => Reply::Accuse(None),
            Verb::Done => Reply::Dead,
            Verb::Reset | Verb::Suggestion | Verb::Accusation => Reply::Ok,
        }
    }
}
