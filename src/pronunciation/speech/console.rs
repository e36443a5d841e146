use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::debug;

use super::Prompt;
use crate::pronunciation::Result;

/// Line-oriented prompt over any reader/writer pair, normally stdin/stdout.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `question` and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "\t{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!(question, "input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn ask_replay(&mut self) -> Result<bool> {
        Ok(self.ask("Do you want to hear again (y/n): ")?.as_deref() == Some("y"))
    }

    fn wait_for_ready(&mut self) -> Result<()> {
        self.ask("Press Enter to speak...")?;
        writeln!(self.output, "\n\tSay something...")?;
        Ok(())
    }

    fn ask_continue(&mut self) -> Result<bool> {
        loop {
            match self.ask("Do you want to continue? (1 for yes, 0 for no): ")?.as_deref() {
                None | Some("0") => return Ok(false),
                Some("1") => return Ok(true),
                Some(other) => {
                    writeln!(self.output, "\tPlease answer 1 or 0, not {other:?}.")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::ConsolePrompt;
    use crate::pronunciation::speech::Prompt;

    fn prompt(input: &str) -> ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn replay_requires_lowercase_y() {
        let mut console = prompt("y\nY\nyes\n");
        assert!(console.ask_replay().unwrap());
        assert!(!console.ask_replay().unwrap());
        assert!(!console.ask_replay().unwrap());
        assert!(!console.ask_replay().unwrap());
    }

    #[test]
    fn continue_reasks_until_valid() {
        let mut console = prompt("maybe\n1\n0\n");
        assert!(console.ask_continue().unwrap());
        assert!(!console.ask_continue().unwrap());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Please answer 1 or 0"));
    }

    #[test]
    fn closed_input_means_quit() {
        let mut console = prompt("");
        assert!(!console.ask_continue().unwrap());
        console.wait_for_ready().unwrap();
    }
}
