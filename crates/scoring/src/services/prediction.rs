use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{PredictionAnswer, PredictionQuestion, QuestionType};
use crate::repository::LeagueStore;

const FIELD_SEPARATOR: char = '|';

/// Rejects answers that the question's input widget could not have produced.
pub fn check_answer(question: &PredictionQuestion, answer: &str) -> Result<()> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ScoringError::InvalidAnswer("answer is empty".to_string()));
    }

    match question.question_type {
        QuestionType::Text => Ok(()),
        QuestionType::MultipleChoice => {
            let options = choice_options(question.options.as_ref())?;
            if options.iter().any(|option| option == answer) {
                Ok(())
            } else {
                Err(ScoringError::InvalidAnswer(format!(
                    "'{}' is not one of the choices",
                    answer
                )))
            }
        }
        QuestionType::MultiFieldDropdown => {
            let fields = dropdown_fields(question.options.as_ref())?;
            let values: Vec<&str> = answer.split(FIELD_SEPARATOR).map(str::trim).collect();
            if values.len() != fields.len() {
                return Err(ScoringError::InvalidAnswer(format!(
                    "expected {} fields, got {}",
                    fields.len(),
                    values.len()
                )));
            }
            for (idx, (value, choices)) in values.iter().zip(&fields).enumerate() {
                if !choices.iter().any(|choice| choice == value) {
                    return Err(ScoringError::InvalidAnswer(format!(
                        "'{}' is not a choice for field {}",
                        value,
                        idx + 1
                    )));
                }
            }
            Ok(())
        }
    }
}

/// Whether an answer matches the question's published correct answer.
pub fn is_correct(question: &PredictionQuestion, answer: &str) -> bool {
    match question.correct_answer.as_deref() {
        Some(correct) => normalize(answer) == normalize(correct),
        None => false,
    }
}

/// Validates and grades a team's answer, updating `existing` when the team answered before.
pub fn grade_answer(
    question: &PredictionQuestion,
    team_id: Uuid,
    answer: &str,
    existing: Option<PredictionAnswer>,
) -> Result<PredictionAnswer> {
    check_answer(question, answer)?;

    let mut graded = existing.unwrap_or_else(|| PredictionAnswer {
        answer_id: Uuid::new_v4(),
        team_id,
        question_id: question.question_id,
        answer: String::new(),
        is_correct: false,
        points_earned: Decimal::ZERO,
    });
    graded.answer = answer.trim().to_string();
    apply_grade(question, &mut graded);
    Ok(graded)
}

/// Grades every stored answer to a race's question, e.g. once the correct answer is known.
pub fn regrade_race_answers<S: LeagueStore + ?Sized>(store: &mut S, race_id: Uuid) -> Result<usize> {
    let Some(question) = store.prediction_question_for_race(race_id)? else {
        return Ok(0);
    };

    let answers = store.question_answers(question.question_id)?;
    let mut correct = 0usize;
    for mut answer in answers.iter().cloned() {
        apply_grade(&question, &mut answer);
        if answer.is_correct {
            correct += 1;
        }
        store.save_prediction_answer(answer)?;
    }

    info!(
        "Regraded {} answers for race {} ({} correct)",
        answers.len(),
        race_id,
        correct
    );
    Ok(answers.len())
}

fn apply_grade(question: &PredictionQuestion, answer: &mut PredictionAnswer) {
    answer.is_correct = is_correct(question, &answer.answer);
    answer.points_earned = if answer.is_correct {
        question.points_awarded
    } else {
        Decimal::ZERO
    };
}

fn normalize(answer: &str) -> String {
    answer
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("|")
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn choice_options(options: Option<&Value>) -> Result<Vec<String>> {
    options
        .and_then(string_list)
        .ok_or_else(|| ScoringError::InvalidAnswer("question has no list of choices".to_string()))
}

fn dropdown_fields(options: Option<&Value>) -> Result<Vec<Vec<String>>> {
    options
        .and_then(Value::as_array)
        .and_then(|fields| fields.iter().map(string_list).collect::<Option<Vec<_>>>())
        .ok_or_else(|| ScoringError::InvalidAnswer("question has no dropdown fields".to_string()))
}
