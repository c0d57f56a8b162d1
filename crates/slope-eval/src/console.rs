//! Program output and prompt input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where `carve` output goes and where `chairlift` answers come from.
pub trait Console {
    /// Emit one line of program output.
    fn print_line(&mut self, text: &str) -> io::Result<()>;

    /// Show `cue` and read one line. `Ok(None)` means the input is exhausted.
    /// The returned text has its line terminator removed.
    fn prompt(&mut self, cue: &str) -> io::Result<Option<String>>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        (**self).print_line(text)
    }

    fn prompt(&mut self, cue: &str) -> io::Result<Option<String>> {
        (**self).prompt(cue)
    }
}

/// Console bound to the process stdout and stdin.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")
    }

    fn prompt(&mut self, cue: &str) -> io::Result<Option<String>> {
        {
            let mut out = io::stdout().lock();
            write!(out, "{cue}")?;
            out.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }
}

/// In-memory console: scripted answers in, captured lines out.
#[derive(Debug, Clone, Default)]
pub struct BufferedConsole {
    input: VecDeque<String>,
    /// Every `carve` line, in order.
    pub output: Vec<String>,
    /// Every cue shown, in order.
    pub prompts: Vec<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console that answers prompts with `lines`, in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue one more answer.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Captured output joined with newlines, each line terminated.
    pub fn text(&self) -> String {
        self.output.iter().map(|l| format!("{l}\n")).collect()
    }
}

impl Console for BufferedConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn prompt(&mut self, cue: &str) -> io::Result<Option<String>> {
        self.prompts.push(cue.to_string());
        Ok(self.input.pop_front().map(strip_newline))
    }
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
