use std::collections::HashSet;

use thiserror::Error;

use crate::models::config::{DEFAULT_CORRECT_MARKER, DEFAULT_DELIMITER};
use crate::models::{Question, QuestionOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Literal that closes every question block in the dump.
    pub delimiter: String,
    /// Status text that flags the right answer in a correction line.
    pub correct_marker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            correct_marker: DEFAULT_CORRECT_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("no option line found (expected something like 'A) ...')")]
    MissingOptions,
    #[error("no correction run found after the options starting with '{0}'")]
    MissingCorrections(String),
    #[error("line '{0}' continues nothing")]
    OrphanContinuation(String),
    #[error("option '{0}' appears more than once")]
    DuplicateOption(String),
    #[error("option '{0}' has no matching correction")]
    MissingCorrection(String),
    #[error("correction '{0}' appears more than once")]
    DuplicateCorrection(String),
    #[error("correction '{0}' has no matching option")]
    UnmatchedCorrection(String),
    #[error("no correction is marked '{0}'")]
    NoCorrectAnswer(String),
    #[error("more than one correction is marked correct: {0:?}")]
    AmbiguousCorrectAnswer(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block {block}: {source}")]
pub struct ParseError {
    /// 1-based position of the block in the input.
    pub block: usize,
    pub source: BlockError,
}

#[derive(Debug)]
struct Correction {
    value: String,
    correct: bool,
    explanation: String,
}

/// Parses a whole exam dump. Any malformed block fails the entire run.
pub fn parse_document(text: &str, config: &ParserConfig) -> Result<Vec<Question>, ParseError> {
    let text = text.trim();
    let blocks: Vec<&str> = if config.delimiter.is_empty() {
        vec![text]
    } else {
        text.split(config.delimiter.as_str()).collect()
    };

    let mut questions = Vec::new();
    for (index, block) in blocks
        .into_iter()
        .filter(|b| !b.trim().is_empty())
        .enumerate()
    {
        let question = parse_block(block, config).map_err(|source| ParseError {
            block: index + 1,
            source,
        })?;
        log::debug!(
            "block {}: {} options, answer {}",
            index + 1,
            question.options.len(),
            question.correct_answer
        );
        questions.push(question);
    }

    let parsed = questions.len();
    let questions = dedupe_by_statement(questions);
    log::info!(
        "parsed {} blocks into {} distinct questions",
        parsed,
        questions.len()
    );

    Ok(questions)
}

pub fn parse_block(block: &str, config: &ParserConfig) -> Result<Question, BlockError> {
    let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();

    let options_start = lines
        .iter()
        .position(|l| l.chars().nth(1) == Some(')'))
        .ok_or(BlockError::MissingOptions)?;

    // The correction run restarts with the same identifier as the first option.
    let prefix: String = lines[options_start].chars().take(3).collect();
    let corrections_start = lines
        .iter()
        .enumerate()
        .skip(options_start + 1)
        .find(|(_, l)| l.starts_with(prefix.as_str()))
        .map(|(i, _)| i)
        .ok_or_else(|| BlockError::MissingCorrections(prefix.clone()))?;

    let statement = lines[..options_start].join(" ");
    let mut options = parse_options(&lines[options_start..corrections_start])?;
    let corrections = parse_corrections(&lines[corrections_start..], &config.correct_marker)?;

    for option in options.iter_mut() {
        let correction = corrections
            .iter()
            .find(|c| c.value == option.value)
            .ok_or_else(|| BlockError::MissingCorrection(option.value.clone()))?;
        option.explanation = correction.explanation.clone();
    }

    if let Some(extra) = corrections
        .iter()
        .find(|c| options.iter().all(|o| o.value != c.value))
    {
        return Err(BlockError::UnmatchedCorrection(extra.value.clone()));
    }

    let marked: Vec<&Correction> = corrections.iter().filter(|c| c.correct).collect();
    let correct_answer = match marked.as_slice() {
        [] => return Err(BlockError::NoCorrectAnswer(config.correct_marker.clone())),
        [only] => only.value.clone(),
        many => {
            return Err(BlockError::AmbiguousCorrectAnswer(
                many.iter().map(|c| c.value.clone()).collect(),
            ))
        }
    };

    Ok(Question {
        statement,
        options,
        correct_answer,
    })
}

/// Keeps the first question for every distinct statement, in input order.
pub fn dedupe_by_statement(questions: Vec<Question>) -> Vec<Question> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(questions.len());

    for question in questions {
        if seen.insert(question.statement.clone()) {
            unique.push(question);
        } else {
            log::debug!("dropping duplicate question: {}", question.statement);
        }
    }

    unique
}

/// Splits `X) rest` into its identifier and text. Anything else, including a
/// multi-character identifier or an empty text, is a continuation line.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (value, rest) = line.split_once(") ")?;
    if rest.is_empty() || value.chars().count() != 1 {
        return None;
    }
    Some((value, rest))
}

fn parse_options(lines: &[&str]) -> Result<Vec<QuestionOption>, BlockError> {
    let mut options: Vec<QuestionOption> = Vec::new();

    for line in lines {
        match split_entry(line) {
            Some((value, label)) => {
                if options.iter().any(|o| o.value == value) {
                    return Err(BlockError::DuplicateOption(value.to_string()));
                }
                options.push(QuestionOption {
                    value: value.to_string(),
                    label: label.to_string(),
                    explanation: String::new(),
                });
            }
            None => {
                let last = options
                    .last_mut()
                    .ok_or_else(|| BlockError::OrphanContinuation(line.to_string()))?;
                last.label.push(' ');
                last.label.push_str(line);
            }
        }
    }

    Ok(options)
}

fn parse_corrections(lines: &[&str], correct_marker: &str) -> Result<Vec<Correction>, BlockError> {
    let mut corrections: Vec<Correction> = Vec::new();

    for line in lines {
        match split_entry(line) {
            Some((value, segment)) => {
                if corrections.iter().any(|c| c.value == value) {
                    return Err(BlockError::DuplicateCorrection(value.to_string()));
                }
                let (status, explanation) = match segment.split_once(". ") {
                    Some((status, rest)) => (status, rest.split(". ").collect::<String>()),
                    None => (segment, String::new()),
                };
                corrections.push(Correction {
                    value: value.to_string(),
                    correct: status == correct_marker,
                    explanation,
                });
            }
            None => {
                let last = corrections
                    .last_mut()
                    .ok_or_else(|| BlockError::OrphanContinuation(line.to_string()))?;
                last.explanation.push(' ');
                last.explanation.push_str(line);
            }
        }
    }

    Ok(corrections)
}
