use chrono::Local;

use crate::config::Config;
use crate::db::{CredentialSource, RecordStore};
use crate::error::Result;
use crate::form::{FormField, IntakeForm};
use crate::models::IntakeRecord;
use crate::tui::AppAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Intake,
    Records,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Intake, Tab::Records];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Intake => "Pet Intake",
            Tab::Records => "Pet Records",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Intake => 0,
            Tab::Records => 1,
        }
    }
}

/// Outcome of the last submit attempt, shown beside the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    /// Confirmation plus an echo of the submitted payload.
    Submitted(String),
    Failed(String),
}

pub struct App {
    // UI state
    pub active_tab: Tab,
    pub form: IntakeForm,
    pub submit_status: SubmitStatus,
    pub selected_record: usize,
    pub show_help: bool,

    // Records tab data
    pub records: Vec<IntakeRecord>,
    pub records_error: Option<String>,

    // Services
    store: RecordStore,
}

impl App {
    /// Builds the session state without touching the database; the store
    /// connects lazily on the first submit or records load.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = CredentialSource::from_auth(&config.auth)?;
        let store = RecordStore::new(config.database.clone(), credentials);

        Ok(Self {
            active_tab: Tab::Intake,
            form: IntakeForm::new(Local::now().date_naive()),
            submit_status: SubmitStatus::Idle,
            selected_record: 0,
            show_help: false,
            records: Vec::new(),
            records_error: None,
            store,
        })
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::ShowIntakeTab => {
                self.active_tab = Tab::Intake;
            }

            AppAction::ShowRecordsTab => {
                self.active_tab = Tab::Records;
                self.reload_records().await;
            }

            AppAction::NextField => self.form.focus_next(),
            AppAction::PrevField => self.form.focus_prev(),

            AppAction::InputChar(c) => self.form.push_char(c),
            AppAction::InputBackspace => self.form.pop_char(),

            AppAction::FieldLeft => {
                if self.form.focus == FormField::Department {
                    self.form.department = self.form.department.prev();
                }
            }

            AppAction::FieldRight => {
                if self.form.focus == FormField::Department {
                    self.form.department = self.form.department.next();
                }
            }

            AppAction::Submit => self.submit().await?,

            AppAction::ReloadRecords => self.reload_records().await,

            AppAction::MoveUp => {
                if self.selected_record > 0 {
                    self.selected_record -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.records.len();
                if len > 0 && self.selected_record < len - 1 {
                    self.selected_record += 1;
                }
            }

            AppAction::ShowHelp => self.show_help = true,
            AppAction::HideHelp => self.show_help = false,
        }

        Ok(false)
    }

    /// Validate, persist, and report the outcome inline. A failed submit
    /// keeps the form contents and the pet id untouched; a successful one
    /// echoes the payload and rotates the pet id for the next entry.
    async fn submit(&mut self) -> Result<()> {
        let today = Local::now().date_naive();
        let record = match self.form.build_record(today) {
            Ok(record) => record,
            Err(err) => {
                self.submit_status = SubmitStatus::Failed(err.to_string());
                return Ok(());
            }
        };

        match self.store.insert(&record).await {
            Ok(()) => {
                let echo = serde_json::to_string_pretty(&record)?;
                self.submit_status = SubmitStatus::Submitted(echo);
                self.form.rotate_pet_id();
            }
            Err(err) => {
                self.submit_status = SubmitStatus::Failed(format!("Submission failed: {err}"));
            }
        }

        Ok(())
    }

    /// Fetch all records, capturing failures into the tab instead of
    /// terminating the session.
    pub async fn reload_records(&mut self) {
        match self.store.fetch_all().await {
            Ok(records) => {
                self.records = records;
                self.records_error = None;
                if self.selected_record >= self.records.len() {
                    self.selected_record = self.records.len().saturating_sub(1);
                }
            }
            Err(err) => {
                self.records_error = Some(format!("Unable to load records: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, AuthMode, Config, DatabaseConfig};
    use crate::models::Department;
    use crate::tui::AppAction;

    fn test_app() -> App {
        let config = Config {
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                mode: AuthMode::Password,
                password: Some("unused".to_string()),
                token_file: None,
            },
        };
        App::new(&config).expect("app")
    }

    #[tokio::test]
    async fn invalid_submit_never_touches_the_store() {
        let mut app = test_app();
        // Default form has an empty full name; the store would fail to
        // connect, so reaching it would surface a database error instead.
        app.handle_action(AppAction::Submit).await.unwrap();

        match &app.submit_status {
            SubmitStatus::Failed(msg) => {
                assert!(msg.starts_with("Please complete the required fields"))
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_pet_id() {
        let mut app = test_app();
        let pet_id = app.form.pet_id.clone();

        app.handle_action(AppAction::Submit).await.unwrap();
        assert_eq!(app.form.pet_id, pet_id);
    }

    #[tokio::test]
    async fn arrows_cycle_department_only_when_focused() {
        let mut app = test_app();

        app.handle_action(AppAction::FieldRight).await.unwrap();
        assert_eq!(app.form.department, Department::GeneralMedicine);

        app.form.focus = FormField::Department;
        app.handle_action(AppAction::FieldRight).await.unwrap();
        assert_eq!(app.form.department, Department::Pediatrics);
        app.handle_action(AppAction::FieldLeft).await.unwrap();
        assert_eq!(app.form.department, Department::GeneralMedicine);
    }

    #[tokio::test]
    async fn record_selection_stays_in_bounds() {
        let mut app = test_app();
        app.handle_action(AppAction::MoveDown).await.unwrap();
        assert_eq!(app.selected_record, 0);
        app.handle_action(AppAction::MoveUp).await.unwrap();
        assert_eq!(app.selected_record, 0);
    }

    #[tokio::test]
    async fn quit_action_exits() {
        let mut app = test_app();
        assert!(app.handle_action(AppAction::Quit).await.unwrap());
        assert!(!app.handle_action(AppAction::ShowHelp).await.unwrap());
        assert!(app.show_help);
    }
}
