//! Dialog transitions
//!
//! One turn of the conversation: classify the incoming text against the
//! current [`DialogState`], talk to the score store where the flow calls
//! for it, and answer. The session is persisted only when the whole turn
//! succeeds, so a store failure leaves the chat exactly where it was.

use super::event::{parse_score, Command};
use super::keyboards::{Keyboard, SUBJECTS};
use super::state::{DialogState, Reply, Session, SessionStore};
use crate::api::{ScoreEntryCreate, ScoreEntryRead, UserCreate};
use crate::client::{ApiError, CreateScoreOutcome, ScoreApi};

const INTRO: &str =
    "👋 Привет! Я бот для учёта баллов ЕГЭ.\n\nДля начала работы нужно зарегистрироваться.";
const ALREADY_REGISTERED: &str = "✅ Вы уже зарегистрированы!";
const ASK_FIRST_NAME: &str = "📝 Введите ваше имя:";
const ASK_LAST_NAME: &str = "📝 Введите вашу фамилию:";
const REGISTRATION_CANCELLED: &str = "❌ Регистрация отменена.";
const REGISTER_FIRST: &str = "⚠️ Сначала зарегистрируйтесь.";
const ASK_SUBJECT: &str = "📚 Выберите предмет:";
const SUBJECT_CANCELLED: &str = "❌ Выбор предмета отменён.";
const SCORE_CANCELLED: &str = "❌ Ввод балла отменён.";
const SCORE_RANGE_PROMPT: &str = "⚠️ Введите число от 0 до 100:";
const NO_SCORES: &str =
    "📭 У вас пока нет сохранённых баллов.\n\nИспользуйте «📚 Выбрать предмет» для добавления.";
const SCORES_HEADER: &str = "📊 <b>Ваши баллы:</b>\n";

/// Drives the conversation for every chat against one [`ScoreApi`].
pub struct DialogHandler<A: ScoreApi> {
    api: A,
    sessions: SessionStore,
}

impl<A: ScoreApi> DialogHandler<A> {
    pub fn new(api: A, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Process one incoming message and return the replies to send.
    ///
    /// `chat_id` is the sender's external identity; it keys the session and
    /// is the `telegram_id` used for store lookups. On `Err` the stored
    /// session is left untouched.
    pub async fn handle(&self, chat_id: &str, text: &str) -> Result<Vec<Reply>, ApiError> {
        let session = self.sessions.load(chat_id);
        let (next, replies) = self.step(chat_id, session, text).await?;
        tracing::debug!(chat_id, state = ?next.state, "dialog transition");
        self.sessions.save(chat_id, next);
        Ok(replies)
    }

    #[allow(clippy::too_many_lines)] // One arm per state and input pair
    async fn step(
        &self,
        chat_id: &str,
        session: Session,
        text: &str,
    ) -> Result<(Session, Vec<Reply>), ApiError> {
        let Session { user_id, state } = session;

        match (state, Command::parse(text)) {
            // ============================================================
            // Global: /start abandons any flow in progress
            // ============================================================
            (_, Some(Command::Start)) => self.start(chat_id).await,

            // ============================================================
            // Idle menu
            // ============================================================

            // Idle + Register -> AwaitingFirstName (or already registered)
            (DialogState::Idle, Some(Command::Register)) => {
                match self.api.get_user_by_telegram_id(chat_id).await? {
                    Some(user) => Ok((
                        Session {
                            user_id: Some(user.id),
                            state: DialogState::Idle,
                        },
                        vec![Reply::new(ALREADY_REGISTERED, Keyboard::Main)],
                    )),
                    None => Ok((
                        Session {
                            user_id: None,
                            state: DialogState::AwaitingFirstName,
                        },
                        vec![Reply::new(ASK_FIRST_NAME, Keyboard::Cancel)],
                    )),
                }
            }

            // Idle + SelectSubject -> AwaitingSubjectSelection (registered only)
            (DialogState::Idle, Some(Command::SelectSubject)) => {
                match self.api.get_user_by_telegram_id(chat_id).await? {
                    Some(user) => Ok((
                        Session {
                            user_id: Some(user.id),
                            state: DialogState::AwaitingSubjectSelection { user_id: user.id },
                        },
                        vec![Reply::new(ASK_SUBJECT, Keyboard::Subjects)],
                    )),
                    None => Ok((
                        Session {
                            user_id,
                            state: DialogState::Idle,
                        },
                        vec![Reply::new(REGISTER_FIRST, Keyboard::Start)],
                    )),
                }
            }

            // Idle + ViewScores -> list, staying Idle
            (DialogState::Idle, Some(Command::ViewScores)) => {
                match self.api.get_user_by_telegram_id(chat_id).await? {
                    Some(user) => {
                        let entries = self.api.list_score_entries(user.id).await?;
                        Ok((
                            Session {
                                user_id: Some(user.id),
                                state: DialogState::Idle,
                            },
                            vec![render_scores(&entries)],
                        ))
                    }
                    None => Ok((
                        Session {
                            user_id,
                            state: DialogState::Idle,
                        },
                        vec![Reply::new(REGISTER_FIRST, Keyboard::Start)],
                    )),
                }
            }

            // Idle + anything else (stray cancel included) -> silently ignored
            (DialogState::Idle, _) => Ok((
                Session {
                    user_id,
                    state: DialogState::Idle,
                },
                vec![],
            )),

            // ============================================================
            // Registration
            // ============================================================

            // Cancel from either name prompt abandons the registration
            (
                DialogState::AwaitingFirstName | DialogState::AwaitingLastName { .. },
                Some(Command::Cancel),
            ) => Ok((
                Session {
                    user_id,
                    state: DialogState::Idle,
                },
                vec![Reply::new(REGISTRATION_CANCELLED, Keyboard::Start)],
            )),

            // AwaitingFirstName + text -> hold it, ask for the last name
            (DialogState::AwaitingFirstName, _) => Ok((
                Session {
                    user_id,
                    state: DialogState::AwaitingLastName {
                        first_name: text.trim().to_string(),
                    },
                },
                vec![Reply::new(ASK_LAST_NAME, Keyboard::Cancel)],
            )),

            // AwaitingLastName + text -> create the user, flow complete
            (DialogState::AwaitingLastName { first_name }, _) => {
                let last_name = text.trim().to_string();
                let full_name = format!("{first_name} {last_name}");
                let user = self
                    .api
                    .create_user(&UserCreate {
                        first_name,
                        last_name,
                        full_name: full_name.clone(),
                        telegram_id: chat_id.to_string(),
                    })
                    .await?;
                Ok((
                    Session {
                        user_id: Some(user.id),
                        state: DialogState::Idle,
                    },
                    vec![Reply::new(
                        format!("✅ Регистрация завершена!\n\nДобро пожаловать, {full_name}!"),
                        Keyboard::Main,
                    )],
                ))
            }

            // ============================================================
            // Subject selection
            // ============================================================
            (DialogState::AwaitingSubjectSelection { .. }, Some(Command::Cancel)) => Ok((
                Session {
                    user_id,
                    state: DialogState::Idle,
                },
                vec![Reply::new(SUBJECT_CANCELLED, Keyboard::Main)],
            )),

            // AwaitingSubjectSelection + text -> hold the subject or re-prompt
            (DialogState::AwaitingSubjectSelection { user_id: uid }, _) => {
                let subject = text.trim();
                if SUBJECTS.contains(&subject) {
                    Ok((
                        Session {
                            user_id,
                            state: DialogState::AwaitingScoreValue {
                                user_id: uid,
                                subject: subject.to_string(),
                            },
                        },
                        vec![Reply::new(
                            format!("📝 Предмет: <b>{subject}</b>\n\nВведите балл (0-100):"),
                            Keyboard::Cancel,
                        )],
                    ))
                } else {
                    Ok((
                        Session {
                            user_id,
                            state: DialogState::AwaitingSubjectSelection { user_id: uid },
                        },
                        vec![Reply::new(ASK_SUBJECT, Keyboard::Subjects)],
                    ))
                }
            }

            // ============================================================
            // Score entry
            // ============================================================
            (DialogState::AwaitingScoreValue { .. }, Some(Command::Cancel)) => Ok((
                Session {
                    user_id,
                    state: DialogState::Idle,
                },
                vec![Reply::new(SCORE_CANCELLED, Keyboard::Main)],
            )),

            // AwaitingScoreValue + text -> save if it parses, else re-prompt
            (DialogState::AwaitingScoreValue { user_id: uid, subject }, _) => {
                match parse_score(text) {
                    Some(point) => {
                        let outcome = self
                            .api
                            .create_score_entry(&ScoreEntryCreate {
                                name: subject.clone(),
                                point,
                                user_id: uid,
                            })
                            .await?;
                        let reply = match outcome {
                            CreateScoreOutcome::Created(entry) => Reply::new(
                                format!(
                                    "✅ Сохранено!\n\n📚 {}: {} баллов",
                                    entry.name, entry.point
                                ),
                                Keyboard::Main,
                            ),
                            CreateScoreOutcome::AlreadyExists => Reply::new(
                                format!("⚠️ Балл по предмету «{subject}» уже сохранён."),
                                Keyboard::Main,
                            ),
                        };
                        Ok((
                            Session {
                                user_id,
                                state: DialogState::Idle,
                            },
                            vec![reply],
                        ))
                    }
                    None => Ok((
                        Session {
                            user_id,
                            state: DialogState::AwaitingScoreValue {
                                user_id: uid,
                                subject,
                            },
                        },
                        vec![Reply::bare(SCORE_RANGE_PROMPT)],
                    )),
                }
            }
        }
    }

    // Any state + /start: greet a known user by name, otherwise introduce
    // the bot. A stale cached user id is dropped if the lookup misses.
    async fn start(&self, chat_id: &str) -> Result<(Session, Vec<Reply>), ApiError> {
        match self.api.get_user_by_telegram_id(chat_id).await? {
            Some(user) => Ok((
                Session {
                    user_id: Some(user.id),
                    state: DialogState::Idle,
                },
                vec![Reply::new(
                    format!("👋 Привет, {}!\n\nВыбери действие:", user.first_name),
                    Keyboard::Main,
                )],
            )),
            None => Ok((
                Session::default(),
                vec![Reply::new(INTRO, Keyboard::Start)],
            )),
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self, chat_id: &str) -> Session {
        self.sessions.load(chat_id)
    }
}

fn render_scores(entries: &[ScoreEntryRead]) -> Reply {
    if entries.is_empty() {
        return Reply::new(NO_SCORES, Keyboard::Main);
    }
    let mut lines = vec![SCORES_HEADER.to_string()];
    for entry in entries {
        lines.push(format!("• {}: <b>{}</b>", entry.name, entry.point));
    }
    Reply::new(lines.join("\n"), Keyboard::Main)
}
