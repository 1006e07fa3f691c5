//! Reading values that should not appear in shell history.

use std::io::{self, BufRead as _, Write as _};

use crate::commands::CommandError;

/// Use `value` when given, otherwise read one line from stdin.
///
/// Input is not masked; pipe the secret in for unattended use.
pub fn value_or_stdin(value: Option<String>, label: &'static str) -> Result<String, CommandError> {
    if let Some(value) = value {
        return Ok(value);
    }
    eprint!("{label}: ");
    io::stderr().flush().map_err(|err| CommandError::Input(label, err))?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| CommandError::Input(label, err))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
