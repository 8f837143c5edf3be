//! Reply keyboard layouts and button labels
//!
//! Button labels double as wire constants: a press arrives as a plain text
//! message carrying the label, so [`super::event::Command::parse`] matches
//! against these exact strings.

/// Registration button shown to unknown users
pub const REGISTER: &str = "📋 Зарегистрироваться";

/// Main menu: start a score submission
pub const SELECT_SUBJECT: &str = "📚 Выбрать предмет";

/// Main menu: list saved scores
pub const VIEW_SCORES: &str = "📊 Мои баллы";

/// Abort button, present in every non-idle state
pub const CANCEL: &str = "❌ Отмена";

/// The fixed subject roster, in display order.
pub const SUBJECTS: [&str; 10] = [
    "Математика",
    "Русский язык",
    "Физика",
    "Химия",
    "Биология",
    "История",
    "Обществознание",
    "Информатика",
    "Литература",
    "Английский язык",
];

/// Which reply keyboard accompanies an outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Two-button menu for registered users
    Main,
    /// Single registration button for unknown users
    Start,
    /// Lone cancel button (score value entry)
    Cancel,
    /// Subject roster, two per row, cancel row at the bottom
    Subjects,
}

impl Keyboard {
    /// Button labels as rows, outermost first.
    pub fn rows(&self) -> Vec<Vec<&'static str>> {
        match self {
            Keyboard::Main => vec![vec![SELECT_SUBJECT, VIEW_SCORES]],
            Keyboard::Start => vec![vec![REGISTER]],
            Keyboard::Cancel => vec![vec![CANCEL]],
            Keyboard::Subjects => {
                let mut rows: Vec<Vec<&'static str>> =
                    SUBJECTS.chunks(2).map(<[&str]>::to_vec).collect();
                rows.push(vec![CANCEL]);
                rows
            }
        }
    }
}
