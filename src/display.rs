use crate::session::QuizSession;
use crate::store::KeyValueStore;

const GRID_COLUMNS: usize = 10;

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(60)
}

pub fn render_question<S: KeyValueStore>(session: &QuizSession<S>) -> Option<String> {
    let index = session.current_index()?;
    let question = session.current_question()?;
    let chosen = session.answer_for(index);
    let reveal = session.answers_shown();

    let mut out = String::new();
    out.push_str(&format!(
        "Question {} of {}\n",
        index + 1,
        session.questions().len()
    ));
    out.push_str(&rule('-'));
    out.push('\n');
    out.push_str(&format!("{}. {}\n\n", index + 1, question.statement));

    for option in &question.options {
        let picked = chosen == Some(option.value.as_str());
        let radio = if picked { "(*)" } else { "( )" };
        out.push_str(&format!("  {} {}) {}", radio, option.value, option.label));

        if reveal {
            if question.is_correct(&option.value) {
                out.push_str("  <- correct");
            } else if picked {
                out.push_str("  <- your answer");
            }
        }
        out.push('\n');

        if reveal && !option.explanation.is_empty() {
            out.push_str(&format!("        {}\n", option.explanation));
        }
    }

    Some(out)
}

/// Numbered jump grid. `[..]` is the current question, `*` answered, and
/// once answers are shown `+`/`-` mark right and wrong.
pub fn render_grid<S: KeyValueStore>(session: &QuizSession<S>) -> String {
    let cells: Vec<String> = session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = session.answer_for(index);
            let mark = if session.answers_shown() {
                match answer {
                    Some(a) if question.is_correct(a) => '+',
                    _ => '-',
                }
            } else if answer.is_some() {
                '*'
            } else {
                ' '
            };

            if session.current_index() == Some(index) {
                format!("[{:>3}{}]", index + 1, mark)
            } else {
                format!(" {:>3}{} ", index + 1, mark)
            }
        })
        .collect();

    cells
        .chunks(GRID_COLUMNS)
        .map(|row| row.concat().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_score<S: KeyValueStore>(session: &QuizSession<S>) -> String {
    let verdict = if session.passed() { "PASS" } else { "FAIL" };
    format!(
        "You got {:.2}% ({} out of {}) - need {} to pass: {}",
        session.score() * 100.0,
        session.correct_count(),
        session.questions().len(),
        session.pass_criteria(),
        verdict
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionOption};
    use crate::store::MemoryStore;

    fn session() -> QuizSession<MemoryStore> {
        let question = |statement: &str| Question {
            statement: statement.to_string(),
            options: vec![
                QuestionOption {
                    value: "A".to_string(),
                    label: "Yes".to_string(),
                    explanation: "It is.".to_string(),
                },
                QuestionOption {
                    value: "B".to_string(),
                    label: "No".to_string(),
                    explanation: "It is not.".to_string(),
                },
            ],
            correct_answer: "A".to_string(),
        };
        QuizSession::restore(vec![question("Is it?"), question("Really?")], MemoryStore::new())
            .unwrap()
    }

    #[test]
    fn test_question_hidden_answers() {
        let mut s = session();
        assert!(render_question(&s).is_none());

        s.start().unwrap();
        s.select_answer("B").unwrap();
        let text = render_question(&s).unwrap();

        assert!(text.starts_with("Question 1 of 2\n"));
        assert!(text.contains("1. Is it?"));
        assert!(text.contains("  ( ) A) Yes\n"));
        assert!(text.contains("  (*) B) No\n"));
        assert!(!text.contains("It is."));
        assert!(!text.contains("<-"));
    }

    #[test]
    fn test_question_revealed() {
        let mut s = session();
        s.start().unwrap();
        s.select_answer("B").unwrap();
        s.toggle_answers();
        let text = render_question(&s).unwrap();

        assert!(text.contains("A) Yes  <- correct\n        It is.\n"));
        assert!(text.contains("B) No  <- your answer\n        It is not.\n"));
    }

    #[test]
    fn test_grid_marks() {
        let mut s = session();
        s.start().unwrap();
        s.select_answer("A").unwrap();
        assert_eq!(render_grid(&s), "[  1*]   2");

        s.toggle_answers();
        assert_eq!(render_grid(&s), "[  1+]   2-");
    }

    #[test]
    fn test_score_line() {
        let mut s = session();
        s.start().unwrap();
        s.select_answer("A").unwrap();
        assert_eq!(
            render_score(&s),
            "You got 50.00% (1 out of 2) - need 80% to pass: FAIL"
        );

        s.next().unwrap();
        s.select_answer("A").unwrap();
        assert_eq!(
            render_score(&s),
            "You got 100.00% (2 out of 2) - need 80% to pass: PASS"
        );
    }
}
