use std::io::{self, BufRead, Write};

use super::{open_session, Paths};
use crate::models::PassCriteria;

/// Asks until the answer is a usable percentage. Blank input or end of
/// input leaves the criteria untouched.
pub fn prompt_pass_criteria<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: PassCriteria,
) -> io::Result<Option<PassCriteria>> {
    loop {
        write!(
            output,
            "How much to pass? (current is {}, 85% recommended): ",
            current
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        match PassCriteria::from_percent_input(&line) {
            Ok(criteria) => return Ok(criteria),
            Err(e) => writeln!(output, "You kidding, right? ({})", e)?,
        }
    }
}

pub fn handle_criteria(paths: &Paths, value: Option<String>) {
    let mut session = open_session(paths, false);
    let current = session.pass_criteria();

    let chosen = match value {
        Some(raw) => match PassCriteria::from_percent_input(&raw) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("You kidding, right? ({})", e);
                std::process::exit(1);
            }
        },
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            match prompt_pass_criteria(&mut input, &mut output, current) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to read input: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let Some(criteria) = chosen else {
        println!("Pass criteria unchanged: {}", current);
        return;
    };

    if let Err(e) = session.set_pass_criteria(criteria) {
        eprintln!("Failed to save pass criteria: {}", e);
        std::process::exit(1);
    }

    println!("Pass criteria changed from {} to {}", current, criteria);
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn ask(input: &str) -> (Option<PassCriteria>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt_pass_criteria(&mut reader, &mut out, PassCriteria::default()).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_reprompts_until_valid() {
        let (result, out) = ask("abc\nlots%\n85%\n");
        assert_eq!(result.map(|c| c.fraction()), Some(0.85));
        assert_eq!(out.matches("You kidding, right?").count(), 2);
        assert_eq!(out.matches("How much to pass? (current is 80%").count(), 3);
    }

    #[test]
    fn test_blank_or_eof_cancels() {
        assert_eq!(ask("\n").0, None);
        assert_eq!(ask("").0, None);
        assert_eq!(ask("nope\n").0, None);
    }
}
