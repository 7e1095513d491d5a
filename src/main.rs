use std::path::PathBuf;

use clap::Parser;
use trivia_quiz::logging::init_file_logging;
use trivia_quiz::{Category, Difficulty, QuestionCount, Quiz, QuizConfiguration, DEFAULT_ENDPOINT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial question category
    #[arg(short, long, value_enum, default_value_t = Category::General)]
    category: Category,

    /// Initial difficulty
    #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Questions per round (5 or 10)
    #[arg(short = 'n', long, default_value = "5")]
    count: QuestionCount,

    /// Question API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_file_logging(path) {
            eprintln!("Error setting up logging: {}", e);
            std::process::exit(1);
        }
    }

    let config = QuizConfiguration {
        category: args.category,
        difficulty: args.difficulty,
        question_count: args.count,
    };

    let quiz = Quiz::with_endpoint(config, args.endpoint);
    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
