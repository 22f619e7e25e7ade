use crate::session::{Correctness, ItemParameters, VocabResponseEntry};

pub(crate) fn entry(
    item: &str,
    level: u32,
    correct: bool,
    response_time: f64,
) -> VocabResponseEntry {
    VocabResponseEntry {
        item: Some(item.to_owned()),
        correct_answer: Some("answer".to_owned()),
        selected_answer: Some(if correct { "answer" } else { "other" }.to_owned()),
        level: Some(level),
        part_of_speech: Some("noun".to_owned()),
        correct: Some(Correctness(correct)),
        response_time: Some(response_time),
        item_parameters: Some(ItemParameters {
            difficulty: Some(0.5),
            discrimination: Some(1.2),
            guessing: None,
        }),
        ..Default::default()
    }
}

pub(crate) fn answered(correct_answer: &str, selected_answer: &str) -> VocabResponseEntry {
    VocabResponseEntry {
        correct_answer: Some(correct_answer.to_owned()),
        selected_answer: Some(selected_answer.to_owned()),
        ..entry(correct_answer, 1, correct_answer == selected_answer, 1000.0)
    }
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
