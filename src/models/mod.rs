mod config;
mod question;

pub use config::{Category, Difficulty, QuestionCount, QuizConfiguration};
pub use question::{QuestionId, QuestionKind, QuestionRecord};
