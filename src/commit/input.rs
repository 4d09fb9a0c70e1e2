//! Line input from the interactive terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

/// Reads one line of user input after showing a prompt.
pub trait Prompter: Send {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// [`Prompter`] for the process's own standard streams.
///
/// Uses `dialoguer` line editing when both stdin and stderr are terminals.
/// Otherwise (piped input, or stderr redirected to a log) it falls back to
/// plain lines on stdin/stdout, so a closed stdin surfaces as an error.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other);
        }

        LinePrompter::new(io::stdin().lock(), io::stdout().lock()).next_line(prompt)
    }
}

/// [`Prompter`] over any buffered reader and writer.
///
/// Writes `"<prompt>: "`, then reads one line. End of input is
/// `ErrorKind::UnexpectedEof`.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and read the next line without its line ending.
    pub fn next_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.next_line(prompt)
    }
}
