//! Property-based tests for dialog input parsing
//!
//! The parsers are the only place free-form chat text enters the flow, so
//! they are checked across arbitrary input rather than fixed cases.

use super::event::{parse_score, Command};
use super::keyboards::{self, Keyboard, SUBJECTS};
use proptest::prelude::*;

fn arb_keyboard() -> impl Strategy<Value = Keyboard> {
    prop_oneof![
        Just(Keyboard::Main),
        Just(Keyboard::Start),
        Just(Keyboard::Cancel),
        Just(Keyboard::Subjects),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: formatted integers are accepted exactly when in 0..=100
    #[test]
    fn prop_parse_score_matches_range(value in -500i64..=500) {
        let parsed = parse_score(&value.to_string());
        if (0..=100).contains(&value) {
            prop_assert_eq!(parsed, Some(value));
        } else {
            prop_assert_eq!(parsed, None);
        }
    }

    // Invariant 2: surrounding whitespace never changes a valid score
    #[test]
    fn prop_parse_score_ignores_padding(
        value in 0i64..=100,
        left in "[ \t]{0,4}",
        right in "[ \t]{0,4}"
    ) {
        let text = format!("{left}{value}{right}");
        prop_assert_eq!(parse_score(&text), Some(value));
    }

    // Invariant 3: parse_score is total and never yields an out-of-range value
    #[test]
    fn prop_parse_score_result_always_in_range(text in any::<String>()) {
        if let Some(value) = parse_score(&text) {
            prop_assert!((0..=100).contains(&value));
        }
    }

    // Invariant 4: commands only ever come from the fixed trigger set
    #[test]
    fn prop_commands_only_from_known_forms(text in any::<String>()) {
        if Command::parse(&text).is_some() {
            let known = [
                "/start",
                "/register",
                "/select_subject",
                "/view_scores",
                keyboards::REGISTER,
                keyboards::SELECT_SUBJECT,
                keyboards::VIEW_SCORES,
                keyboards::CANCEL,
            ];
            prop_assert!(known.contains(&text.trim()));
        }
    }

    // Invariant 5: subject labels stay plain text so the selection state sees them
    #[test]
    fn prop_subjects_are_never_commands(index in 0usize..SUBJECTS.len()) {
        prop_assert_eq!(Command::parse(SUBJECTS[index]), None);
    }

    // Invariant 6: every keyboard renders a grid with no empty rows or labels
    #[test]
    fn prop_keyboards_render_nonempty_grids(keyboard in arb_keyboard()) {
        let rows = keyboard.rows();
        prop_assert!(!rows.is_empty());
        for row in rows {
            prop_assert!(!row.is_empty());
            for label in row {
                prop_assert!(!label.is_empty());
            }
        }
    }
}
