//! Display ordering of a question's answer options.

use std::cmp::Ordering;
use std::collections::HashMap;

use rand::Rng;

use crate::models::{QuestionId, QuestionRecord};

/// Place the correct answer among the incorrect ones.
///
/// `draw` is a uniform sample from `[0, 1)`. The insertion index is
/// `floor(draw * len + 1)`, taken from the length before insertion, so it
/// lands in `1..=len`: the correct answer is never placed first when there
/// are two or more incorrect answers, and an index with no (or an empty)
/// slot appends instead. A single incorrect answer is paired with the
/// correct one and the pair is sorted by numeric difference, which keeps
/// insertion order for anything that is not a number.
pub fn build_display_order(correct: &str, incorrect: &[String], draw: f64) -> Vec<String> {
    let mut answers = incorrect.to_vec();
    let index = (draw * answers.len() as f64 + 1.0).floor() as usize;

    if answers.len() == 1 {
        answers.push(correct.to_owned());
        answers.sort_by(|a, b| numeric_difference(a, b));
    } else if answers.get(index).is_none_or(|slot| slot.is_empty()) {
        answers.push(correct.to_owned());
    } else {
        answers.insert(index, correct.to_owned());
    }

    answers
}

/// Compare two answers by `a - b` after numeric coercion. Anything that does
/// not coerce to a number compares equal.
fn numeric_difference(a: &str, b: &str) -> Ordering {
    let diff = coerce_number(a) - coerce_number(b);
    if diff > 0.0 {
        Ordering::Greater
    } else if diff < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Loose string-to-number coercion: blank is zero, decimal and exponent
/// literals, `0x`/`0o`/`0b` prefixes and `Infinity` are numbers, anything
/// else is NaN.
fn coerce_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    let literal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if literal {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Per-question display orders, computed once when a round is mounted.
///
/// Orders are never recomputed for a question id that already has one, so
/// the correct answer keeps its position through answering and grading.
#[derive(Debug, Default)]
pub struct DisplayOrders {
    orders: HashMap<QuestionId, Vec<String>>,
}

impl DisplayOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached order for `question`, building it on first use.
    pub fn mount<R: Rng>(&mut self, question: &QuestionRecord, rng: &mut R) -> &[String] {
        self.orders.entry(question.id()).or_insert_with(|| {
            build_display_order(
                question.correct_answer(),
                question.incorrect_answers(),
                rng.random::<f64>(),
            )
        })
    }

    pub fn get(&self, id: QuestionId) -> Option<&[String]> {
        self.orders.get(&id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_contains_every_answer_once() {
        let incorrect = strings(&["A", "B", "C"]);
        for step in 0..100 {
            let draw = step as f64 / 100.0;
            let mut order = build_display_order("D", &incorrect, draw);
            assert_eq!(order.len(), 4);
            order.sort();
            assert_eq!(order, strings(&["A", "B", "C", "D"]));
        }
    }

    #[test]
    fn test_insertion_positions() {
        let incorrect = strings(&["A", "B", "C"]);
        assert_eq!(build_display_order("D", &incorrect, 0.0), strings(&["A", "D", "B", "C"]));
        assert_eq!(build_display_order("D", &incorrect, 0.4), strings(&["A", "B", "D", "C"]));
        assert_eq!(build_display_order("D", &incorrect, 0.99), strings(&["A", "B", "C", "D"]));
    }

    #[test]
    fn test_empty_slot_appends() {
        let incorrect = strings(&["A", "", "C"]);
        assert_eq!(build_display_order("D", &incorrect, 0.0), strings(&["A", "", "C", "D"]));
    }

    #[test]
    fn test_single_incorrect_keeps_text_order() {
        let incorrect = strings(&["False"]);
        for draw in [0.0, 0.5, 0.99] {
            assert_eq!(build_display_order("True", &incorrect, draw), strings(&["False", "True"]));
        }
    }

    #[test]
    fn test_single_incorrect_numbers_sort_ascending() {
        assert_eq!(build_display_order("7", &strings(&["12"]), 0.3), strings(&["7", "12"]));
        assert_eq!(build_display_order("12", &strings(&["7"]), 0.3), strings(&["7", "12"]));
        assert_eq!(build_display_order("0x10", &strings(&["20"]), 0.3), strings(&["0x10", "20"]));
        assert_eq!(build_display_order("0x+1", &strings(&["20"]), 0.3), strings(&["20", "0x+1"]));
    }

    #[test]
    fn test_no_incorrect_answers() {
        assert_eq!(build_display_order("Only", &[], 0.5), strings(&["Only"]));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number(" 42 "), 42.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert!(coerce_number("0x+1").is_nan());
        assert!(coerce_number("0x-1").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("1,000").is_nan());
        assert!(coerce_number("Paris").is_nan());
    }

    #[test]
    fn test_mount_is_computed_once() {
        let question = QuestionRecord::new("Q", "D", strings(&["A", "B", "C"]));
        let mut rng = StdRng::seed_from_u64(7);
        let mut orders = DisplayOrders::new();

        let first = orders.mount(&question, &mut rng).to_vec();
        for _ in 0..20 {
            assert_eq!(orders.mount(&question, &mut rng), first.as_slice());
        }
        assert_eq!(orders.get(question.id()), Some(first.as_slice()));
        assert_eq!(orders.len(), 1);

        orders.clear();
        assert!(orders.get(question.id()).is_none());
    }
}
