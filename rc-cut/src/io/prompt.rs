//! Interactive line prompts.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::{Context, Result, bail};

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Show `question` and block until one line of input arrives.
    ///
    /// The returned answer has its line terminator removed.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompter over a line reader and a writer (stdin/stdout in the binary).
///
/// Owns both handles for the whole run; they are released when the prompter
/// is dropped.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("write prompt")?;
        self.output.flush().context("flush prompt")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read answer")?;
        if read == 0 {
            bail!("input closed before answering {:?}", question.trim());
        }
        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn asks_in_order_and_strips_newlines() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new(Cursor::new("2.1\r\nabc123\n"), &mut out);
        assert_eq!(prompter.ask("version? ").expect("first"), "2.1");
        assert_eq!(prompter.ask("commit? ").expect("second"), "abc123");
        drop(prompter);
        assert_eq!(String::from_utf8(out).expect("utf8"), "version? commit? ");
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut prompter = LinePrompter::new(Cursor::new("2.0"), Vec::new());
        assert_eq!(prompter.ask("version? ").expect("answer"), "2.0");
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        let err = prompter.ask("version? ").expect_err("eof");
        assert!(err.to_string().contains("input closed"));
    }
}
