use std::path::PathBuf;

use crate::models::config;

pub fn handle_config(
    questions_path: Option<PathBuf>,
    delimiter: Option<String>,
    correct_marker: Option<String>,
) {
    let mut user_config = config::load_config();

    if questions_path.is_none() && delimiter.is_none() && correct_marker.is_none() {
        println!("Config file:    {}", config::get_config_path().display());
        println!("State file:     {}", config::get_state_path().display());
        println!("Questions file: {}", user_config.questions_path.display());
        println!("Delimiter:      {:?}", user_config.delimiter);
        println!("Correct marker: {:?}", user_config.correct_marker);
        println!();
        println!("To change: mockexam config --questions-path <file> --delimiter <text> --correct-marker <text>");
        return;
    }

    if let Some(path) = questions_path {
        user_config.questions_path = path;
    }
    if let Some(delimiter) = delimiter {
        if delimiter.is_empty() {
            eprintln!("The block delimiter cannot be empty.");
            std::process::exit(1);
        }
        user_config.delimiter = delimiter;
    }
    if let Some(marker) = correct_marker {
        user_config.correct_marker = marker;
    }

    if let Err(e) = config::save_config(&user_config) {
        eprintln!("Failed to save config: {}", e);
        std::process::exit(1);
    }

    println!("Config saved to {}", config::get_config_path().display());
}
