//! Incoming text classification

use super::keyboards;

/// A recognized command or button press
///
/// Every menu action has a slash form and a button-label form. Anything
/// that does not parse stays plain text, which the name and score states
/// consume as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Register,
    SelectSubject,
    ViewScores,
    Cancel,
}

impl Command {
    pub fn parse(text: &str) -> Option<Command> {
        match text.trim() {
            "/start" => Some(Command::Start),
            "/register" | keyboards::REGISTER => Some(Command::Register),
            "/select_subject" | keyboards::SELECT_SUBJECT => Some(Command::SelectSubject),
            "/view_scores" | keyboards::VIEW_SCORES => Some(Command::ViewScores),
            keyboards::CANCEL => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// Parse a score message, accepting only integers in `0..=100`.
pub fn parse_score(text: &str) -> Option<i64> {
    let value: i64 = text.trim().parse().ok()?;
    (0..=100).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognizes_commands_and_buttons() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/register"), Some(Command::Register));
        assert_eq!(Command::parse("/select_subject"), Some(Command::SelectSubject));
        assert_eq!(Command::parse("/view_scores"), Some(Command::ViewScores));
        assert_eq!(Command::parse(keyboards::REGISTER), Some(Command::Register));
        assert_eq!(
            Command::parse(keyboards::SELECT_SUBJECT),
            Some(Command::SelectSubject)
        );
        assert_eq!(Command::parse(keyboards::VIEW_SCORES), Some(Command::ViewScores));
        assert_eq!(Command::parse(keyboards::CANCEL), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(Command::parse("  /start \n"), Some(Command::Start));
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert_eq!(Command::parse("Анна"), None);
        assert_eq!(Command::parse("/stop"), None);
        assert_eq!(Command::parse(""), None);
        // Subject names are plain text, not commands
        assert_eq!(Command::parse("Математика"), None);
    }

    #[test]
    fn test_parse_score_accepts_range_bounds() {
        assert_eq!(parse_score("0"), Some(0));
        assert_eq!(parse_score("100"), Some(100));
        assert_eq!(parse_score("57"), Some(57));
        assert_eq!(parse_score(" 42 "), Some(42));
    }

    #[test]
    fn test_parse_score_rejects_out_of_range() {
        assert_eq!(parse_score("-1"), None);
        assert_eq!(parse_score("101"), None);
        assert_eq!(parse_score("1000"), None);
    }

    #[test]
    fn test_parse_score_rejects_non_integers() {
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("5.5"), None);
        assert_eq!(parse_score("50 баллов"), None);
        assert_eq!(parse_score(""), None);
    }
}
