//! Human player fed by an input source.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use im::Vector;
use log::warn;

use super::{Player, PlayerKind};
use crate::core::{GameError, Value};

/// Guess returned when the input cannot be parsed.
pub const MALFORMED_GUESS: Value = 0;

const PROMPT: &str = "Your input: ";

/// One read from an input source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// The user asked to abort.
    Interrupt,
    /// No more input will ever arrive.
    Closed,
}

/// Where a human's guesses come from.
pub trait InputSource: Send {
    /// Block until the next line is available.
    fn next_input(&mut self, prompt: &str) -> InputEvent;
}

/// Reads from stdin, writing the prompt to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn next_input(&mut self, prompt: &str) -> InputEvent {
        let mut stdout = std::io::stdout();
        // A failed prompt write does not stop us from reading.
        let _ = write!(stdout, "{prompt}");
        let _ = stdout.flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => InputEvent::Closed,
            Ok(_) => InputEvent::Line(line),
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => InputEvent::Interrupt,
            Err(_) => InputEvent::Closed,
        }
    }
}

/// Replays a fixed list of events, then reports `Closed`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Script made only of lines.
    pub fn lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|l| InputEvent::Line(l.into())))
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self, _prompt: &str) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::Closed)
    }
}

/// A person typing guesses.
pub struct HumanPlayer {
    name: String,
    source: Box<dyn InputSource>,
    history: Vector<Option<Value>>,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>, source: impl InputSource + 'static) -> Self {
        Self {
            name: name.into(),
            source: Box::new(source),
            history: Vector::new(),
        }
    }

    /// Human reading from the terminal.
    pub fn console(name: impl Into<String>) -> Self {
        Self::new(name, ConsoleInput)
    }
}

impl std::fmt::Debug for HumanPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumanPlayer")
            .field("name", &self.name)
            .field("history", &self.history)
            .finish()
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn get(&mut self) -> Result<Value, GameError> {
        match self.source.next_input(PROMPT) {
            InputEvent::Line(line) => match line.trim().parse::<Value>() {
                Ok(value) => {
                    self.history.push_back(Some(value));
                    Ok(value)
                }
                Err(_) => {
                    warn!("{}: could not read '{}' as a number", self.name, line.trim());
                    self.history.push_back(None);
                    Ok(MALFORMED_GUESS)
                }
            },
            InputEvent::Interrupt | InputEvent::Closed => Err(GameError::Interrupted),
        }
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    fn history(&self) -> Vector<Option<Value>> {
        self.history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_numbers() {
        let mut human = HumanPlayer::new("Ann", ScriptedInput::lines(["12\n", "  -4 "]));
        assert_eq!(human.get().unwrap(), 12);
        assert_eq!(human.get().unwrap(), -4);
        assert_eq!(human.history(), Vector::from(vec![Some(12), Some(-4)]));
        assert_eq!(human.kind(), PlayerKind::Human);
    }

    #[test]
    fn test_malformed_input_is_sentinel() {
        let mut human = HumanPlayer::new("Ann", ScriptedInput::lines(["twelve"]));
        assert_eq!(human.get().unwrap(), MALFORMED_GUESS);
        assert_eq!(human.history(), Vector::from(vec![None]));
    }

    #[test]
    fn test_interrupt_and_close() {
        let mut human = HumanPlayer::new(
            "Ann",
            ScriptedInput::new([InputEvent::Interrupt]),
        );
        assert!(matches!(human.get(), Err(GameError::Interrupted)));
        // Script exhausted
        assert!(matches!(human.get(), Err(GameError::Interrupted)));
        assert!(human.history().is_empty());
    }

    #[test]
    fn test_feedback_is_ignored() {
        use crate::core::PlayerId;
        use crate::feedback::{Identifier, Relation};

        let mut human = HumanPlayer::new("Ann", ScriptedInput::default());
        human.tell(4);
        assert!(human
            .push_feedback(Identifier::new(PlayerId::new(0), Relation::TooLow, 1))
            .is_ok());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut human = HumanPlayer::new("Ann", ScriptedInput::lines(["1"]));
        human.get().unwrap();
        human.reset();
        assert!(human.history().is_empty());
    }
}
