//! Input reader implementations
//!
//! - [`ConsoleInputReader`] prompts an operator on a terminal
//! - [`ScriptedInputReader`] replays queued answers
//! - [`PresetInputReader`] answers from command-line values first and
//!   defers to another reader for anything not supplied

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use parking_domain::input::InputReader;
use parking_types::{InputError, Result};

/// Interactive reader over a line-oriented input and a prompt sink
pub struct ConsoleInputReader<R, W> {
    input: R,
    prompt: W,
}

impl ConsoleInputReader<BufReader<Stdin>, Stdout> {
    /// Reader bound to the process terminal
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInputReader<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed.into());
        }
        Ok(line.trim().to_string())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.prompt, "{}", question)?;
        self.prompt.flush()?;
        self.read_line()
    }

    /// Ask a numbered-menu question; unparsable answers become `-1`
    pub fn read_menu_option(&mut self, menu: &str) -> Result<i32> {
        let answer = self.ask(menu)?;
        match answer.parse() {
            Ok(option) => Ok(option),
            Err(_) => {
                tracing::warn!(input = %answer, "error while reading user input from shell");
                writeln!(
                    self.prompt,
                    "Error reading input. Please enter valid number for proceeding further"
                )?;
                Ok(-1)
            }
        }
    }
}

impl<R: BufRead, W: Write> InputReader for ConsoleInputReader<R, W> {
    /// Unparsable answers become `-1`, which no vehicle type maps to
    fn read_selection(&mut self) -> Result<i32> {
        self.read_menu_option("Please select vehicle type from menu\n1 CAR\n2 BIKE")
    }

    fn read_vehicle_registration_number(&mut self) -> Result<String> {
        let answer =
            self.ask("Please type the vehicle registration number and press enter key")?;
        if answer.is_empty() {
            tracing::warn!("empty vehicle registration number");
            return Err(InputError::InvalidRegistration.into());
        }
        Ok(answer)
    }
}

/// Reader replaying queued answers in order
#[derive(Debug, Default, Clone)]
pub struct ScriptedInputReader {
    selections: VecDeque<i32>,
    registrations: VecDeque<String>,
}

impl ScriptedInputReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, selection: i32) -> Self {
        self.selections.push_back(selection);
        self
    }

    pub fn with_registration(mut self, registration: impl Into<String>) -> Self {
        self.registrations.push_back(registration.into());
        self
    }
}

impl InputReader for ScriptedInputReader {
    fn read_selection(&mut self) -> Result<i32> {
        self.selections
            .pop_front()
            .ok_or_else(|| InputError::Closed.into())
    }

    fn read_vehicle_registration_number(&mut self) -> Result<String> {
        let registration = self
            .registrations
            .pop_front()
            .ok_or(InputError::Closed)?;
        let registration = registration.trim();
        if registration.is_empty() {
            return Err(InputError::InvalidRegistration.into());
        }
        Ok(registration.to_string())
    }
}

/// Answers each question once from preset values, then from `fallback`
pub struct PresetInputReader<I> {
    selection: Option<i32>,
    registration: Option<String>,
    fallback: I,
}

impl<I: InputReader> PresetInputReader<I> {
    pub fn new(selection: Option<i32>, registration: Option<String>, fallback: I) -> Self {
        Self {
            selection,
            registration,
            fallback,
        }
    }
}

impl<I: InputReader> InputReader for PresetInputReader<I> {
    fn read_selection(&mut self) -> Result<i32> {
        match self.selection.take() {
            Some(selection) => Ok(selection),
            None => self.fallback.read_selection(),
        }
    }

    fn read_vehicle_registration_number(&mut self) -> Result<String> {
        match self.registration.take() {
            Some(registration) if registration.trim().is_empty() => {
                Err(InputError::InvalidRegistration.into())
            }
            Some(registration) => Ok(registration.trim().to_string()),
            None => self.fallback.read_vehicle_registration_number(),
        }
    }
}
