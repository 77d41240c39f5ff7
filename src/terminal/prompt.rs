use crate::core::value::Value;
use crate::error::Result;
use crate::runtime::intent::Intent;
use crate::runtime::runner::{StepFrame, StepView};
use crate::state::step::{FieldKind, FieldSpec};
use crate::state::store::DataStore;
use crate::state::validation::ValidationIssue;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal;
use std::io::{BufRead, Write};

const BACK_COMMANDS: [&str; 2] = [":back", ":b"];
const EXIT_COMMANDS: [&str; 2] = [":quit", ":q"];

enum Answer {
    Value(Value),
    Back,
    Exit,
}

/// Line-oriented host: prints one field at a time and reads the answer.
///
/// An empty line keeps the value already collected, `:back` returns to the
/// previous step and `:quit` leaves the flow.
pub struct PromptHost<R, W> {
    input: R,
    output: W,
    color: bool,
    mask_secrets: bool,
}

impl<R: BufRead, W: Write> PromptHost<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
            mask_secrets: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Reads password fields from the terminal with echo off, printing `*`
    /// per character. Only valid when input is an interactive terminal.
    pub fn with_masked_secrets(mut self, mask: bool) -> Self {
        self.mask_secrets = mask;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed line; `None` once input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a secret in raw mode. The terminal is restored even when reading
    /// fails.
    pub fn read_secret(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        terminal::enable_raw_mode()?;
        let secret = collect_secret(&mut self.output, next_key_press);
        let restored = terminal::disable_raw_mode();
        let secret = secret?;
        restored?;

        writeln!(self.output)?;
        Ok(secret)
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn error(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.output, "{}", text.red())?;
        } else {
            writeln!(self.output, "! {text}")?;
        }
        Ok(())
    }

    pub fn heading(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.output, "\n{}", text.bold().cyan())?;
        } else {
            writeln!(self.output, "\n== {text} ==")?;
        }
        Ok(())
    }

    fn ask(&mut self, field: &FieldSpec, current: Option<&Value>) -> Result<Answer> {
        let options = field.kind.options();
        let label = if self.color {
            field.label.as_str().bold().to_string()
        } else {
            field.label.clone()
        };
        writeln!(self.output, "{label}")?;
        if let Some(hint) = &field.hint {
            writeln!(self.output, "  ({hint})")?;
        }
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", index + 1)?;
        }

        let shown = match current {
            Some(value) if !value.is_empty() && field.kind.is_secret() => " [****]".to_string(),
            Some(value) if !value.is_empty() => format!(" [{value}]"),
            _ => String::new(),
        };
        let prompt = format!(">{shown}");
        let line = if self.mask_secrets && field.kind.is_secret() {
            self.read_secret(&prompt)?
        } else {
            self.read_line(&prompt)?
        };
        let Some(line) = line else {
            return Ok(Answer::Exit);
        };

        if BACK_COMMANDS.contains(&line.as_str()) {
            return Ok(Answer::Back);
        }
        if EXIT_COMMANDS.contains(&line.as_str()) {
            return Ok(Answer::Exit);
        }
        if line.is_empty() {
            return Ok(Answer::Value(current.cloned().unwrap_or_default()));
        }
        Ok(Answer::Value(interpret(&field.kind, &options, line)))
    }
}

fn next_key_press() -> Result<Option<KeyEvent>> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
}

/// Builds a secret from key presses, echoing `*` for each character. Enter
/// finishes; Esc, Ctrl-C or the end of input abandon the field.
fn collect_secret<W: Write>(
    output: &mut W,
    mut next_key: impl FnMut() -> Result<Option<KeyEvent>>,
) -> Result<Option<String>> {
    let mut secret = String::new();
    while let Some(key) = next_key()? {
        match key.code {
            KeyCode::Enter => return Ok(Some(secret.trim().to_string())),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Backspace => {
                if secret.pop().is_some() {
                    write!(output, "\x08 \x08")?;
                }
            }
            KeyCode::Char(c) => {
                secret.push(c);
                write!(output, "*")?;
            }
            _ => continue,
        }
        output.flush()?;
    }
    Ok(None)
}

/// Maps raw input onto the field's options: a 1-based number picks an option,
/// y/n answer yes/no questions, anything else is kept as typed.
fn interpret(kind: &FieldKind, options: &[&str], line: String) -> Value {
    if let Ok(index) = line.parse::<usize>() {
        if let Some(option) = index.checked_sub(1).and_then(|i| options.get(i)) {
            return Value::text(*option);
        }
    }
    if matches!(kind, FieldKind::YesNo) {
        match line.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Value::text("Yes"),
            "n" | "no" => return Value::text("No"),
            _ => {}
        }
    }
    if let Some(option) = options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(line.as_str()))
    {
        return Value::text(*option);
    }
    Value::Text(line)
}

impl<R: BufRead, W: Write> StepView for PromptHost<R, W> {
    fn render(&mut self, frame: &StepFrame<'_>) -> Result<Intent> {
        self.heading(&format!(
            "{} · {} ({})",
            frame.flow_title,
            frame.step.title,
            frame.progress_label()
        ))?;
        if let Some(description) = &frame.step.description {
            self.message(description)?;
        }

        let mut output = DataStore::new();
        for field in &frame.step.fields {
            match self.ask(field, frame.data.get(field.id.as_str()))? {
                Answer::Value(value) => output.set(&field.id, value),
                Answer::Back => return Ok(Intent::Back),
                Answer::Exit => return Ok(Intent::Exit),
            }
        }

        let action = if frame.is_last { "Submit" } else { "Next" };
        self.message(&format!("[{action}]"))?;
        Ok(Intent::Submit(output))
    }

    fn show_issues(&mut self, issues: &[ValidationIssue]) -> Result<()> {
        for issue in issues {
            self.error(&issue.to_string())?;
        }
        Ok(())
    }
}
