use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub statement: String,
    pub options: Vec<QuestionOption>,
    pub correct_answer: String,
}

impl Question {
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn is_correct(&self, value: &str) -> bool {
        self.correct_answer == value
    }
}

pub fn load_questions(path: &Path) -> Result<Vec<Question>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

pub fn save_questions(path: &Path, questions: &[Question]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    let content = serde_json::to_string_pretty(questions)
        .map_err(|e| format!("Failed to serialize questions: {}", e))?;

    fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
