use crate::errors::{Error, Result};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_BLUE: &str = "\x1b[34m";
const ANSI_MAGENTA: &str = "\x1b[35m";
const ANSI_CYAN: &str = "\x1b[36m";

const HEADER_WIDTH: usize = 79;

/// Terminal front-end for the interactive flows.
///
/// Owns the input reader, output writer, and ANSI styling, and is injected
/// into every screen so the navigation layer never touches stdin/stdout
/// directly. Tests script the interaction with a `Cursor` reader and a
/// `Vec<u8>` writer (styling off so assertions see plain text).
pub struct Console<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), true)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.styled {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Clears the screen between menus. A no-op when styling is off so
    /// scripted test output stays readable.
    pub fn clear(&mut self) -> Result<()> {
        if self.styled {
            write!(self.output, "\x1b[2J\x1b[1;1H")?;
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn header(&mut self, title: &str) -> Result<()> {
        let rule = self.paint(ANSI_MAGENTA, &"=".repeat(HEADER_WIDTH));
        let pad = HEADER_WIDTH.saturating_sub(title.len()) / 2;
        writeln!(self.output, "{rule}")?;
        writeln!(
            self.output,
            "{}{}",
            " ".repeat(pad),
            self.paint(ANSI_BLUE, title)
        )?;
        writeln!(self.output, "{rule}\n")?;
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    pub fn rule(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "-".repeat(39))?;
        Ok(())
    }

    pub fn info(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(ANSI_CYAN, text);
        writeln!(self.output, "{painted}")?;
        Ok(())
    }

    pub fn success(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(ANSI_GREEN, text);
        writeln!(self.output, "{painted}")?;
        Ok(())
    }

    pub fn warn(&mut self, text: &str) -> Result<()> {
        let painted = self.paint(ANSI_RED, text);
        writeln!(self.output, "{painted}")?;
        Ok(())
    }

    /// One numbered menu entry, e.g. `  3) Beverages`.
    pub fn menu_entry(&mut self, number: usize, label: &str) -> Result<()> {
        let num = self.paint(ANSI_YELLOW, &number.to_string());
        writeln!(self.output, "  {num}) {label}")?;
        Ok(())
    }

    /// Reads one whole line after printing `prompt`. Fails with an I/O
    /// error on end of input rather than looping forever.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        let painted = self.paint(ANSI_YELLOW, prompt);
        write!(self.output, "{painted}")?;
        self.output.flush()?;

        let mut buf = String::new();
        let bytes = self.input.read_line(&mut buf)?;
        if bytes == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            )));
        }
        Ok(buf.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Reads an integer, re-prompting on non-numeric input. Out-of-range
    /// handling belongs to the caller; this only guarantees a number.
    pub fn read_menu_choice(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.warn("Invalid input. Please enter a number.")?,
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        // Discard whatever the user types; ENTER alone is the common case.
        let _ = self.read_line("\nPress ENTER to continue...")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Console;
    use std::io::Cursor;

    /// Console over a scripted input; output is captured in a `Vec<u8>`.
    pub(crate) fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    pub(crate) fn rendered(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let (_, output) = console.into_parts();
        String::from_utf8(output).expect("console output should be UTF-8")
    }
}

#[cfg(test)]
impl<R, W> Console<R, W> {
    pub(crate) fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{rendered, scripted};

    #[test]
    fn read_menu_choice_skips_non_numeric_input() {
        let mut console = scripted("abc\n\n12x\n7\n");
        let choice = console.read_menu_choice("Enter choice: ").unwrap();
        assert_eq!(choice, 7);

        let output = rendered(console);
        assert_eq!(output.matches("Invalid input").count(), 3);
    }

    #[test]
    fn read_line_trims_line_ending_only() {
        let mut console = scripted("  spaced value \r\n");
        let line = console.read_line("Name: ").unwrap();
        assert_eq!(line, "  spaced value ");
    }

    #[test]
    fn read_line_reports_eof() {
        let mut console = scripted("");
        assert!(console.read_line("Name: ").is_err());
    }

    #[test]
    fn menu_entries_are_numbered() {
        let mut console = scripted("");
        console.menu_entry(1, "Grooming").unwrap();
        console.menu_entry(2, "Snacks").unwrap();
        let output = rendered(console);
        assert!(output.contains("  1) Grooming"));
        assert!(output.contains("  2) Snacks"));
    }
}
