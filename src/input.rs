//! Interactive input.
//!
//! Reads whitespace-separated integers from any [`BufRead`]. Tokens may be
//! split across lines however the user likes: `"0 5\n1 3"` and
//! `"0\n5\n1\n3"` read the same.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::models::Process;
use crate::scheduler::Quantum;
use crate::validation::{validate_count, validate_processes, ValidationError};

/// An input error. Aborts the run.
#[derive(Debug)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// Reading or writing the terminal failed.
    Io,
    /// Input ended before a required value.
    UnexpectedEof,
    /// A token is not an integer.
    InvalidInteger,
    /// A value parsed but is out of range.
    Validation,
}

impl InputError {
    fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input: {}", self.message)
    }
}

impl std::error::Error for InputError {}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        Self::new(InputErrorKind::Io, err.to_string())
    }
}

impl From<ValidationError> for InputError {
    fn from(err: ValidationError) -> Self {
        Self::new(InputErrorKind::Validation, err.message)
    }
}

impl From<Vec<ValidationError>> for InputError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(InputErrorKind::Validation, message)
    }
}

/// Splits a reader into whitespace-separated tokens, one line at a time.
#[derive(Debug)]
pub struct TokenReader<R> {
    reader: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.tokens.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.tokens
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.tokens.pop_front())
    }

    /// Next token parsed as an integer. `what` names the value in errors.
    pub fn next_int(&mut self, what: &str) -> Result<i64, InputError> {
        let token = self.next_token()?.ok_or_else(|| {
            InputError::new(
                InputErrorKind::UnexpectedEof,
                format!("input ended while reading {what}"),
            )
        })?;
        token.parse().map_err(|_| {
            InputError::new(
                InputErrorKind::InvalidInteger,
                format!("expected an integer for {what}, got '{token}'"),
            )
        })
    }
}

/// Writes prompts and reads the answers.
///
/// Prompts are flushed before each read so they show up on a terminal.
#[derive(Debug)]
pub struct Prompter<R, W> {
    tokens: TokenReader<R>,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter reading from `reader` and prompting on `out`.
    pub fn new(reader: R, out: W) -> Self {
        Self {
            tokens: TokenReader::new(reader),
            out,
        }
    }

    /// Prints `prompt` and reads one integer.
    pub fn ask_int(&mut self, prompt: &str, what: &str) -> Result<i64, InputError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        self.tokens.next_int(what)
    }

    /// Reads the number of processes (`>= 0`).
    pub fn read_process_count(&mut self) -> Result<usize, InputError> {
        let n = self.ask_int("Enter the number of processes: ", "the number of processes")?;
        Ok(validate_count(n)?)
    }

    /// Reads `count` arrival/burst pairs, assigning IDs `1..=count`.
    pub fn read_processes(&mut self, count: usize) -> Result<Vec<Process>, InputError> {
        let mut processes = Vec::with_capacity(count);
        for n in 1..=count {
            let id = u32::try_from(n).map_err(|_| {
                InputError::new(InputErrorKind::Validation, "too many processes")
            })?;
            let prompt = format!("Enter arrival time and burst time for Process {id}: ");
            let arrival = self.ask_int(&prompt, &format!("the arrival time of process {id}"))?;
            let burst = self.tokens.next_int(&format!("the burst time of process {id}"))?;
            processes.push(Process::new(id, arrival, burst));
        }
        validate_processes(&processes)?;
        Ok(processes)
    }

    /// Shows the algorithm menu and reads the raw choice.
    ///
    /// Any integer is accepted here; mapping it to a policy is up to the
    /// caller.
    pub fn read_choice(&mut self) -> Result<i64, InputError> {
        write!(
            self.out,
            "Choose Scheduling Algorithm:\n\
             1. First-Come-First-Serve (FCFS)\n\
             2. Shortest Job First (SJF)\n\
             3. Round Robin (RR)\n"
        )?;
        self.ask_int("", "the algorithm choice")
    }

    /// Reads a positive Round Robin quantum.
    pub fn read_quantum(&mut self) -> Result<Quantum, InputError> {
        let ticks = self.ask_int("Enter time quantum for Round Robin: ", "the time quantum")?;
        Ok(Quantum::new(ticks)?)
    }

    /// Consumes the prompter, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}
