use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{config, save_questions};
use crate::parser::{parse_document, ParserConfig};

pub fn parse_dump(
    input: &Path,
    output: Option<PathBuf>,
    delimiter: Option<String>,
    correct_marker: Option<String>,
) {
    let user_config = config::load_config();
    let parser_config = ParserConfig {
        delimiter: delimiter.unwrap_or(user_config.delimiter),
        correct_marker: correct_marker.unwrap_or(user_config.correct_marker),
    };

    if parser_config.delimiter.is_empty() {
        eprintln!("The block delimiter cannot be empty.");
        std::process::exit(1);
    }

    let text = match fs::read_to_string(input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let questions = match parse_document(&text, &parser_config) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Failed to parse {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let output = output.unwrap_or(user_config.questions_path);
    if let Err(e) = save_questions(&output, &questions) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    println!(
        "Parsed {} questions from {} into {}",
        questions.len(),
        input.display(),
        output.display()
    );
}
