use std::io::{self, BufRead, Write};

use super::criteria::prompt_pass_criteria;
use super::{open_session, Paths};
use crate::display::{render_grid, render_question, render_score, rule};
use crate::models::Question;
use crate::session::QuizSession;
use crate::store::KeyValueStore;

const HELP: &str = "\
Commands:
  start              begin a new attempt (clears answers)
  reset              clear all answers
  show               toggle the answers and explanations
  next, n / prev, p  move one question
  first, << / last, >>
  goto N, N          jump to question N
  answer X, X        pick option X (use `answer` for options named n, p or q)
  grid               numbered overview
  score              current score
  criteria           change the pass criteria
  help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    Redraw,
    Start,
    Reset,
    ToggleAnswers,
    Next,
    Previous,
    First,
    Last,
    Goto(usize),
    Answer(String),
    Grid,
    Score,
    Criteria,
    Help,
    Quit,
}

impl QuizCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((w, a)) => (w, a.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => QuizCommand::Redraw,
            "start" => QuizCommand::Start,
            "reset" => QuizCommand::Reset,
            "show" | "hide" => QuizCommand::ToggleAnswers,
            "next" | "n" => QuizCommand::Next,
            "prev" | "previous" | "p" => QuizCommand::Previous,
            "first" | "<<" => QuizCommand::First,
            "last" | ">>" => QuizCommand::Last,
            "goto" => QuizCommand::Goto(parse_position(arg)?),
            "answer" | "a" if !arg.is_empty() => QuizCommand::Answer(arg.to_string()),
            "grid" => QuizCommand::Grid,
            "score" => QuizCommand::Score,
            "criteria" => QuizCommand::Criteria,
            "help" | "?" => QuizCommand::Help,
            "quit" | "exit" | "q" => QuizCommand::Quit,
            _ if arg.is_empty() && word.chars().all(|c| c.is_ascii_digit()) => {
                QuizCommand::Goto(parse_position(word)?)
            }
            _ if arg.is_empty() && word.chars().count() == 1 => {
                QuizCommand::Answer(word.to_string())
            }
            _ => return Err(format!("Unknown command '{}'. Type `help`.", line)),
        };

        Ok(command)
    }
}

/// 1-based position as typed, returned 0-based.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{}' is not a question number", raw)),
    }
}

/// Matches what was typed against the option values, ignoring case when
/// there is no exact hit.
fn resolve_option(question: Option<&Question>, raw: &str) -> String {
    question
        .and_then(|q| {
            q.options
                .iter()
                .find(|o| o.value == raw)
                .or_else(|| q.options.iter().find(|o| o.value.eq_ignore_ascii_case(raw)))
        })
        .map(|o| o.value.clone())
        .unwrap_or_else(|| raw.to_string())
}

pub fn take_quiz(paths: &Paths) {
    let mut session = open_session(paths, true);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = run_quiz(&mut session, &mut input, &mut output) {
        eprintln!("Failed to run quiz: {}", e);
        std::process::exit(1);
    }
}

pub fn run_quiz<S, R, W>(session: &mut QuizSession<S>, input: &mut R, output: &mut W) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", rule('='))?;
    writeln!(
        output,
        "  MOCKEXAM - {} questions, {} answered",
        session.questions().len(),
        session.answered_count()
    )?;
    writeln!(output, "{}", rule('='))?;

    match session.current_index() {
        Some(_) => draw(session, output)?,
        None => writeln!(output, "Type `start` to begin or `help` for commands.")?,
    }

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let command = match QuizCommand::parse(&line) {
            Ok(c) => c,
            Err(msg) => {
                writeln!(output, "{}", msg)?;
                continue;
            }
        };

        let result = match command {
            QuizCommand::Quit => break,
            QuizCommand::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            QuizCommand::Grid => {
                writeln!(output, "{}", render_grid(session))?;
                continue;
            }
            QuizCommand::Score => {
                writeln!(output, "{}", render_score(session))?;
                continue;
            }
            QuizCommand::Criteria => {
                match prompt_pass_criteria(input, output, session.pass_criteria())? {
                    Some(criteria) => session.set_pass_criteria(criteria),
                    None => continue,
                }
            }
            QuizCommand::Redraw => Ok(()),
            QuizCommand::Start => session.start(),
            QuizCommand::Reset => {
                let result = session.reset();
                if result.is_ok() {
                    writeln!(output, "Answers cleared. Type `start` to begin again.")?;
                }
                result
            }
            QuizCommand::ToggleAnswers => {
                session.toggle_answers();
                Ok(())
            }
            QuizCommand::Next => session.next(),
            QuizCommand::Previous => session.previous(),
            QuizCommand::First => session.first(),
            QuizCommand::Last => session.last(),
            QuizCommand::Goto(index) => session.navigate(index),
            QuizCommand::Answer(raw) => {
                let value = resolve_option(session.current_question(), &raw);
                session.select_answer(&value)
            }
        };

        match result {
            Ok(()) => draw(session, output)?,
            Err(e) => writeln!(output, "{}", e)?,
        }
    }

    Ok(())
}

fn draw<S: KeyValueStore, W: Write>(session: &QuizSession<S>, output: &mut W) -> io::Result<()> {
    let Some(question) = render_question(session) else {
        return Ok(());
    };

    writeln!(output)?;
    if session.answers_shown() {
        writeln!(output, "{}", render_score(session))?;
        writeln!(output)?;
    }
    write!(output, "{}", question)?;
    writeln!(output)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::models::QuestionOption;
    use crate::store::{MemoryStore, StoreKey};

    fn questions() -> Vec<Question> {
        ["Red?", "Green?", "Blue?"]
            .iter()
            .map(|s| Question {
                statement: s.to_string(),
                options: vec![
                    QuestionOption {
                        value: "A".to_string(),
                        label: "Yes".to_string(),
                        explanation: "Right.".to_string(),
                    },
                    QuestionOption {
                        value: "B".to_string(),
                        label: "No".to_string(),
                        explanation: "Wrong.".to_string(),
                    },
                ],
                correct_answer: "A".to_string(),
            })
            .collect()
    }

    fn play(session: &mut QuizSession<MemoryStore>, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_quiz(session, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(QuizCommand::parse("next"), Ok(QuizCommand::Next));
        assert_eq!(QuizCommand::parse(" P \n"), Ok(QuizCommand::Previous));
        assert_eq!(QuizCommand::parse(">>"), Ok(QuizCommand::Last));
        assert_eq!(QuizCommand::parse("goto 3"), Ok(QuizCommand::Goto(2)));
        assert_eq!(QuizCommand::parse("12"), Ok(QuizCommand::Goto(11)));
        assert_eq!(QuizCommand::parse("c"), Ok(QuizCommand::Answer("c".to_string())));
        assert_eq!(QuizCommand::parse("G"), Ok(QuizCommand::Answer("G".to_string())));
        assert_eq!(
            QuizCommand::parse("answer n"),
            Ok(QuizCommand::Answer("n".to_string()))
        );
        assert_eq!(QuizCommand::parse(""), Ok(QuizCommand::Redraw));
        assert!(QuizCommand::parse("goto 0").is_err());
        assert!(QuizCommand::parse("goto x").is_err());
        assert!(QuizCommand::parse("dance").is_err());
    }

    #[test]
    fn test_session_through_commands() {
        let mut session = QuizSession::restore(questions(), MemoryStore::new()).unwrap();
        let out = play(&mut session, "start\nb\nn\na\nlast\na\nshow\nscore\nq\n");

        assert_eq!(session.answer_for(0), Some("B"));
        assert_eq!(session.answer_for(1), Some("A"));
        assert_eq!(session.answer_for(2), Some("A"));
        assert!(session.answers_shown());
        assert!(out.contains("3. Blue?"));
        assert!(out.contains("You got 66.67% (2 out of 3) - need 80% to pass: FAIL"));
    }

    #[test]
    fn test_errors_are_reported_not_fatal() {
        let mut session = QuizSession::restore(questions(), MemoryStore::new()).unwrap();
        let out = play(&mut session, "a\nstart\nprev\ngoto 9\nz\nfrobnicate\n");

        assert!(out.contains("the quiz has not been started"));
        assert!(out.contains("already at the first question"));
        assert!(out.contains("there is no question 9; the quiz has 3"));
        assert!(out.contains("option 'z' does not exist on this question"));
        assert!(out.contains("Unknown command 'frobnicate'"));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_criteria_and_reset() {
        let mut session = QuizSession::restore(questions(), MemoryStore::new()).unwrap();
        play(&mut session, "start\na\ncriteria\nwhat\n30%\nreset\n");

        assert_eq!(session.pass_criteria().fraction(), 0.3);
        assert_eq!(session.current_index(), None);
        assert_eq!(session.answered_count(), 0);

        let store = session.into_store();
        assert_eq!(
            store.get(StoreKey::PassCriteria).unwrap(),
            Some("0.3".to_string())
        );
        assert_eq!(store.get(StoreKey::Answers).unwrap(), None);
    }
}
