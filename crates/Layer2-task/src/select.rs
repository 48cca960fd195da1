//! Selection - deterministic picks and the interactive chooser
//!
//! `resolve` never touches the terminal when the answer is forced or there is
//! only one choice. Everything else goes through a [`Chooser`].

use ecssh_foundation::{Error, Result};
use std::io::{BufRead, Write};

/// A display label paired with the value it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Choice<String> {
    /// Choice whose label is its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Picks one of `labels`, returning its 0-based index
pub trait Chooser {
    fn choose(&mut self, prompt: &str, labels: &[String]) -> Result<usize>;
}

/// Blocking numbered prompt over a reader/writer pair.
///
/// Re-prompts forever on bad input. Only a valid index, a read failure
/// (`Error::Io`) or end of input (`Error::InputClosed`) ends the loop.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl PromptChooser<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Chooser on the controlling terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Chooser for PromptChooser<R, W> {
    fn choose(&mut self, prompt: &str, labels: &[String]) -> Result<usize> {
        if labels.is_empty() {
            return Err(Error::NoChoices {
                what: "items".to_string(),
            });
        }

        writeln!(self.output, "{}", prompt)?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.output, "{}) {}", i + 1, label)?;
        }

        let mut buf = Vec::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(Error::InputClosed);
            }

            // undecodable bytes just fail the parse and re-prompt
            let line = String::from_utf8_lossy(&buf);
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=labels.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Invalid selection (1-{})", labels.len())?,
            }
        }
    }
}

/// Always ask, even for a single choice
pub fn choose<T, C>(prompt: &str, what: &str, mut choices: Vec<Choice<T>>, chooser: &mut C) -> Result<T>
where
    C: Chooser + ?Sized,
{
    if choices.is_empty() {
        return Err(Error::NoChoices {
            what: what.to_string(),
        });
    }
    let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
    let idx = chooser.choose(prompt, &labels)?;
    if idx >= choices.len() {
        return Err(Error::InvalidInput(format!("selection {} out of range", idx + 1)));
    }
    Ok(choices.swap_remove(idx).value)
}

/// First choice when forced or alone, otherwise ask
pub fn resolve<T, C>(
    prompt: &str,
    what: &str,
    mut choices: Vec<Choice<T>>,
    force: bool,
    chooser: &mut C,
) -> Result<T>
where
    C: Chooser + ?Sized,
{
    if choices.is_empty() {
        return Err(Error::NoChoices {
            what: what.to_string(),
        });
    }
    if force || choices.len() == 1 {
        return Ok(choices.swap_remove(0).value);
    }
    choose(prompt, what, choices, chooser)
}

/// Container to connect to
pub fn select_container<C>(containers: &[String], force: bool, chooser: &mut C) -> Result<String>
where
    C: Chooser + ?Sized,
{
    let choices = containers.iter().cloned().map(Choice::plain).collect();
    resolve("Select container:", "containers", choices, force, chooser)
}
