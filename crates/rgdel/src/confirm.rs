//! y/n confirmation prompt

use crate::defaults::CONFIRM_YES;
use crate::error::ConfirmError;
use std::io::{BufRead, Write};

/// Print `message` and read one answer line.
///
/// Returns `Ok(true)` only for `y` (any case, surrounding whitespace
/// ignored). Anything else, an empty line included, is a no. End of input
/// or a read failure is an error, since there is no answer to act on.
pub fn ask_for_confirm<R, W>(message: &str, input: &mut R, output: &mut W) -> Result<bool, ConfirmError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{message}").map_err(ConfirmError::Write)?;
    output.flush().map_err(ConfirmError::Write)?;

    let mut response = String::new();
    let read = input.read_line(&mut response).map_err(ConfirmError::Read)?;
    if read == 0 {
        return Err(ConfirmError::EndOfInput);
    }

    Ok(is_yes(&response))
}

fn is_yes(response: &str) -> bool {
    response.trim().eq_ignore_ascii_case(CONFIRM_YES)
}
