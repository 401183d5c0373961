use super::{open_session, Paths};
use crate::display::{render_grid, render_score, rule};

pub fn show_status(paths: &Paths) {
    let session = open_session(paths, true);

    println!("\n{}", rule('='));
    println!("  MOCKEXAM - Progress");
    println!("{}\n", rule('='));

    println!("Questions: {}", session.questions().len());
    println!("Answered:  {}", session.answered_count());
    println!("Correct:   {}", session.correct_count());
    println!();
    println!("{}", render_score(&session));

    if session.questions().is_empty() {
        return;
    }

    println!();
    println!("{}", render_grid(&session));

    println!("\n{}", rule('='));
    match session.current_index() {
        Some(index) => println!("Run `mockexam quiz` to resume at question {}", index + 1),
        None => println!("Run `mockexam quiz` and type `start` to begin"),
    }
    println!("{}\n", rule('='));
}

pub fn reset_answers(paths: &Paths) {
    let mut session = open_session(paths, false);

    if let Err(e) = session.reset() {
        eprintln!("Failed to reset answers: {}", e);
        std::process::exit(1);
    }

    println!("All saved answers cleared.");
}
