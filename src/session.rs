use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{PassCriteria, Question};
use crate::store::{KeyValueStore, StoreError, StoreKey};

/// Question index (0-based) to the chosen option value.
pub type AnswerMap = BTreeMap<usize, String>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the quiz has not been started")]
    NotStarted,
    #[error("there are no questions loaded")]
    NoQuestions,
    #[error("there is no question {}; the quiz has {len}", .index + 1)]
    OutOfRange { index: usize, len: usize },
    #[error("option '{0}' does not exist on this question")]
    UnknownOption(String),
    #[error("already at the first question")]
    AtStart,
    #[error("already at the last question")]
    AtEnd,
    #[error("failed to encode answers: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct QuizSession<S: KeyValueStore> {
    questions: Vec<Question>,
    store: S,
    answers: AnswerMap,
    current: Option<usize>,
    show_answers: bool,
    pass_criteria: PassCriteria,
}

impl<S: KeyValueStore> QuizSession<S> {
    /// Builds a session from whatever the store remembers. Missing or
    /// unreadable state is a first run, never an error.
    pub fn restore(questions: Vec<Question>, store: S) -> Result<Self, SessionError> {
        let answers = load_answers(&store, questions.len())?;
        let current = answers.keys().next().copied();

        let stored_criteria = match store.get(StoreKey::PassCriteria)? {
            Some(raw) => match PassCriteria::from_stored(&raw) {
                Ok(criteria) => Some(criteria),
                Err(e) => {
                    log::warn!("resetting {}", e);
                    None
                }
            },
            None => None,
        };

        let mut session = Self {
            questions,
            store,
            answers,
            current,
            show_answers: false,
            pass_criteria: stored_criteria.unwrap_or_default(),
        };

        if stored_criteria.is_none() {
            session
                .store
                .set(StoreKey::PassCriteria, session.pass_criteria.to_stored())?;
        }

        log::debug!(
            "restored session: {} answers, resuming at {:?}",
            session.answers.len(),
            session.current
        );
        Ok(session)
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.answers.clear();
        self.store.remove(StoreKey::Answers)?;
        self.current = Some(0);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.answers.clear();
        self.current = None;
        self.store.remove(StoreKey::Answers)?;
        Ok(())
    }

    pub fn select_answer(&mut self, value: &str) -> Result<(), SessionError> {
        let index = self.current.ok_or(SessionError::NotStarted)?;
        let question = self.question(index)?;
        if question.option(value).is_none() {
            return Err(SessionError::UnknownOption(value.to_string()));
        }

        let mut updated = self.answers.clone();
        updated.insert(index, value.to_string());
        let encoded = serde_json::to_string(&updated)?;
        self.store.set(StoreKey::Answers, encoded)?;
        self.answers = updated;
        Ok(())
    }

    pub fn set_pass_criteria(&mut self, criteria: PassCriteria) -> Result<(), SessionError> {
        self.store.set(StoreKey::PassCriteria, criteria.to_stored())?;
        self.pass_criteria = criteria;
        Ok(())
    }

    pub fn navigate(&mut self, index: usize) -> Result<(), SessionError> {
        self.question(index)?;
        self.current = Some(index);
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), SessionError> {
        let index = self.current.ok_or(SessionError::NotStarted)?;
        if index == 0 {
            return Err(SessionError::AtStart);
        }
        self.navigate(index - 1)
    }

    pub fn next(&mut self) -> Result<(), SessionError> {
        let index = self.current.ok_or(SessionError::NotStarted)?;
        if index + 1 >= self.questions.len() {
            return Err(SessionError::AtEnd);
        }
        self.navigate(index + 1)
    }

    pub fn first(&mut self) -> Result<(), SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.navigate(0)
    }

    pub fn last(&mut self) -> Result<(), SessionError> {
        let last = self
            .questions
            .len()
            .checked_sub(1)
            .ok_or(SessionError::NoQuestions)?;
        self.navigate(last)
    }

    pub fn toggle_answers(&mut self) -> bool {
        self.show_answers = !self.show_answers;
        self.show_answers
    }

    pub fn answers_shown(&self) -> bool {
        self.show_answers
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|i| self.questions.get(i))
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|(index, answer)| {
                self.questions
                    .get(**index)
                    .map_or(false, |q| q.is_correct(answer))
            })
            .count()
    }

    /// Correct answers over the total number of questions, answered or not.
    pub fn score(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.correct_count() as f64 / self.questions.len() as f64
    }

    pub fn pass_criteria(&self) -> PassCriteria {
        self.pass_criteria
    }

    pub fn passed(&self) -> bool {
        self.pass_criteria.is_met_by(self.score())
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }

    fn question(&self, index: usize) -> Result<&Question, SessionError> {
        self.questions.get(index).ok_or(SessionError::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }
}

fn load_answers<S: KeyValueStore>(store: &S, len: usize) -> Result<AnswerMap, SessionError> {
    let Some(raw) = store.get(StoreKey::Answers)? else {
        return Ok(AnswerMap::new());
    };

    let mut answers: AnswerMap = match serde_json::from_str(&raw) {
        Ok(answers) => answers,
        Err(e) => {
            log::warn!("ignoring unreadable saved answers: {}", e);
            return Ok(AnswerMap::new());
        }
    };

    let before = answers.len();
    answers.retain(|index, _| *index < len);
    if answers.len() < before {
        log::warn!(
            "dropped {} saved answers for questions that no longer exist",
            before - answers.len()
        );
    }

    Ok(answers)
}
