//! 問題列の読み込み
//!
//! `--questions` で指定された JSON ファイル、または組み込みの問題列から `QuestionSet` を作ります。
//!
//! ```json
//! [
//!   { "text": "2 + 2 = ?", "options": ["3", "4", "5"], "correct": 1 }
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Question, QuestionSet, ValueObjectError};

#[derive(Debug, Error)]
pub enum QuestionLoadError {
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid question set: {0}")]
    Invalid(#[from] ValueObjectError),
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    text: String,
    options: Vec<String>,
    correct: usize,
}

impl From<QuestionDto> for Question {
    fn from(dto: QuestionDto) -> Self {
        Question::new(dto.text, dto.options, dto.correct)
    }
}

/// JSON 文字列から問題列を読み込む
pub fn parse_questions(json: &str) -> Result<QuestionSet, QuestionLoadError> {
    let dtos: Vec<QuestionDto> = serde_json::from_str(json)?;
    let questions = dtos.into_iter().map(Question::from).collect();
    Ok(QuestionSet::new(questions)?)
}

/// JSON ファイルから問題列を読み込む
pub async fn load_questions(path: impl AsRef<Path>) -> Result<QuestionSet, QuestionLoadError> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_questions(&json)
}

/// 組み込みの問題列（2 問）
pub fn builtin_questions() -> QuestionSet {
    let questions = vec![
        Question::new(
            "What is the capital of France?".to_string(),
            vec![
                "Berlin".to_string(),
                "Madrid".to_string(),
                "Paris".to_string(),
                "Rome".to_string(),
            ],
            2,
        ),
        Question::new(
            "How many continents are there on Earth?".to_string(),
            vec![
                "5".to_string(),
                "6".to_string(),
                "7".to_string(),
                "8".to_string(),
            ],
            2,
        ),
    ];
    match QuestionSet::new(questions) {
        Ok(set) => set,
        Err(e) => unreachable!("built-in questions are valid: {e}"),
    }
}
