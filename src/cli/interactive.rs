//! Interactive projection loop
//!
//! Reads four answers per player, prints the projected stat line, and asks
//! whether to continue. Any unparsable number or unknown category ends the
//! session with an error; there is no reprompt.

use super::tables::{nationality_options_table, position_options_table, stat_line_table};
use crate::error::{ProjectorError, Result};
use crate::projection::PlayerQuery;
use crate::training::ProjectionModel;
use std::io::{BufRead, Write};
use tracing::debug;

pub const PICK_PROMPT: &str = "Enter the draft pick number: ";
pub const AGE_PROMPT: &str = "Enter the player's age: ";
pub const POSITION_PROMPT: &str = "Enter the player's position: ";
pub const NATIONALITY_PROMPT: &str = "Enter the player's nationality: ";
pub const CONTINUE_PROMPT: &str = "Would you like to project another player? (y/n): ";

/// Console session over an injected input and output
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print the nationality and position reference tables
    pub fn show_options(&mut self) -> Result<()> {
        writeln!(self.output, "{}", nationality_options_table())?;
        writeln!(self.output, "{}", position_options_table())?;
        Ok(())
    }

    /// Project players until the user answers anything but `y`; returns the number projected
    pub fn run(&mut self, model: &ProjectionModel) -> Result<usize> {
        let mut projected = 0;

        loop {
            let query = self.read_query()?;
            let projection = model.project(&query)?;
            projected += 1;

            writeln!(self.output, "{}", stat_line_table(&projection.stat_line(&query.position)))?;

            let answer = self.prompt(CONTINUE_PROMPT)?;
            if answer.to_lowercase() != "y" {
                debug!(projected, "Ending interactive session");
                break;
            }
        }

        Ok(projected)
    }

    /// Ask the four questions for one player
    pub fn read_query(&mut self) -> Result<PlayerQuery> {
        let pick = self.prompt(PICK_PROMPT)?;
        let overall_pick = pick.trim().parse::<i64>().map_err(|e| {
            ProjectorError::InvalidInput(format!("invalid draft pick number '{}': {}", pick, e))
        })?;

        let age = self.prompt(AGE_PROMPT)?;
        let age = age.trim().parse::<f64>().map_err(|e| {
            ProjectorError::InvalidInput(format!("invalid age '{}': {}", age, e))
        })?;

        let position = self.prompt(POSITION_PROMPT)?;
        let nationality = self.prompt(NATIONALITY_PROMPT)?;

        Ok(PlayerQuery::new(overall_pick, age, position, nationality))
    }

    /// Print a prompt and read one line without its line ending; empty at end of input
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Consume the session, returning its output
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_query() {
        let mut s = session("12\n18.5\nLW\nSWE\n");
        let query = s.read_query().unwrap();
        assert_eq!(query, PlayerQuery::new(12, 18.5, "LW", "SWE"));

        let output = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(
            output,
            format!("{PICK_PROMPT}{AGE_PROMPT}{POSITION_PROMPT}{NATIONALITY_PROMPT}")
        );
    }

    #[test]
    fn test_windows_line_endings() {
        let mut s = session("3\r\n19\r\nD\r\nFIN\r\n");
        let query = s.read_query().unwrap();
        assert_eq!(query.position, "D");
        assert_eq!(query.nationality, "FIN");
    }

    #[test]
    fn test_invalid_pick_is_fatal() {
        let mut s = session("first\n18\nC\nCAN\n");
        let err = s.read_query().unwrap_err();
        assert!(matches!(err, ProjectorError::InvalidInput(msg) if msg.contains("first")));
    }

    #[test]
    fn test_invalid_age_is_fatal() {
        let mut s = session("4\neighteen\nC\nCAN\n");
        assert!(matches!(s.read_query(), Err(ProjectorError::InvalidInput(_))));
    }

    #[test]
    fn test_end_of_input_is_fatal() {
        let mut s = session("");
        assert!(matches!(s.read_query(), Err(ProjectorError::InvalidInput(_))));
    }

    #[test]
    fn test_show_options() {
        let mut s = session("");
        s.show_options().unwrap();
        let output = String::from_utf8(s.into_output()).unwrap();
        assert!(output.contains("Country Code"));
        assert!(output.contains("Position Options"));
    }
}
