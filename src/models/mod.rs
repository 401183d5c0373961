pub mod config;
pub mod pass_criteria;
pub mod question;

// config is accessed as crate::models::config::{load_config, save_config, ...}
pub use pass_criteria::PassCriteria;
pub use question::{Question, QuestionOption, load_questions, save_questions};
