use crate::domain::{
    Mode, ModeConfig, TaskDraft, TaskField, TimerEngine, TimerEvent, UiMode, MAX_SCRUB_MINUTES,
};
use crate::notifications::Notifier;
use crate::persistence::{SettingsStore, TaskList};
use std::time::Instant;

/// Visibility of the three dialogs plus the task being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modals {
    pub time_up: bool,
    pub settings: bool,
    pub task_form: bool,
    /// None while adding a new task
    pub edit_target: Option<usize>,
}

/// Input form state for adding/editing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFormState {
    pub draft: TaskDraft,
    pub editing_field: TaskField,
}

impl TaskFormState {
    fn field_mut(&mut self) -> &mut String {
        match self.editing_field {
            TaskField::Description => &mut self.draft.description,
            TaskField::Hours => &mut self.draft.hours,
            TaskField::Minutes => &mut self.draft.minutes,
            TaskField::Seconds => &mut self.draft.seconds,
        }
    }
}

/// Text of the settings dialog, one field per mode in `Mode::all()` order
#[derive(Debug, Clone, Default)]
pub struct SettingsFormState {
    pub fields: [String; 3],
    pub editing_field: usize,
}

/// Main application state
pub struct AppState {
    pub timer: TimerEngine,
    pub config: ModeConfig,
    pub tasks: TaskList,
    pub modals: Modals,
    pub task_form: TaskFormState,
    pub settings_form: SettingsFormState,
    pub selected_index: usize,
    settings: SettingsStore,
    notifier: Box<dyn Notifier>,
}

impl AppState {
    pub fn new(tasks: TaskList, settings: SettingsStore, notifier: Box<dyn Notifier>) -> Self {
        let config = ModeConfig::new(settings.load());
        let timer = TimerEngine::new(Mode::Focus, config.committed());

        Self {
            timer,
            config,
            tasks,
            modals: Modals::default(),
            task_form: TaskFormState::default(),
            settings_form: SettingsFormState::default(),
            selected_index: 0,
            settings,
            notifier,
        }
    }

    /// Surface that currently receives key input
    pub fn ui_mode(&self) -> UiMode {
        if self.modals.time_up {
            UiMode::TimeUp
        } else if self.modals.task_form {
            UiMode::TaskForm
        } else if self.modals.settings {
            UiMode::Settings
        } else {
            UiMode::Normal
        }
    }

    // Timer

    pub fn select_mode(&mut self, mode: Mode) {
        self.timer.set_mode(mode, self.config.committed());
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    /// Move the scrub control by `delta` minutes
    pub fn scrub(&mut self, delta: i64) {
        let current = i64::from(self.timer.remaining_minutes());
        let target = (current + delta).clamp(0, i64::from(MAX_SCRUB_MINUTES));
        self.timer
            .set_remaining_minutes(u32::try_from(target).unwrap_or(MAX_SCRUB_MINUTES));
    }

    /// Restore the mode's duration and dismiss the time-up dialog
    pub fn reset_timer(&mut self) {
        self.modals.time_up = false;
        self.timer.reset(self.config.committed());
    }

    /// Stop the countdown and dismiss the time-up dialog
    pub fn stop_timer(&mut self) {
        self.modals.time_up = false;
        self.timer.stop();
    }

    /// Drive the countdown up to `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(TimerEvent::Expired) = self.timer.poll(now) {
            self.on_expired();
        }
    }

    fn on_expired(&mut self) {
        self.modals.time_up = true;
        let message = format!("{} is over", self.timer.mode().name());
        self.notifier.play(&message);
    }

    // Task list

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.tasks.len().saturating_sub(1));
    }

    /// Open the task dialog with empty fields
    pub fn start_add_task(&mut self) {
        self.task_form = TaskFormState::default();
        self.modals.edit_target = None;
        self.modals.task_form = true;
    }

    /// Open the task dialog pre-filled from the selected task
    pub fn start_edit_task(&mut self) {
        if let Some(draft) = self.tasks.begin_edit(self.selected_index) {
            self.task_form = TaskFormState {
                draft,
                editing_field: TaskField::Description,
            };
            self.modals.edit_target = Some(self.selected_index);
            self.modals.task_form = true;
        }
    }

    pub fn task_form_next_field(&mut self) {
        self.task_form.editing_field = self.task_form.editing_field.next();
    }

    pub fn task_form_add_char(&mut self, c: char) {
        if self.task_form.editing_field.is_numeric() && !c.is_ascii_digit() {
            return;
        }
        self.task_form.field_mut().push(c);
    }

    pub fn task_form_backspace(&mut self) {
        self.task_form.field_mut().pop();
    }

    /// Add or edit from the form. Invalid input keeps the dialog open as typed.
    pub fn submit_task_form(&mut self) {
        let result = match self.modals.edit_target {
            Some(index) => self.tasks.edit(index, &self.task_form.draft),
            None => self.tasks.add(&self.task_form.draft),
        };

        match result {
            Ok(()) => {
                if self.modals.edit_target.is_none() {
                    self.selected_index = self.tasks.len().saturating_sub(1);
                }
                self.close_task_form();
            }
            Err(e) => tracing::debug!("Task form not submitted: {}", e),
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.close_task_form();
    }

    fn close_task_form(&mut self) {
        self.task_form = TaskFormState::default();
        self.modals.edit_target = None;
        self.modals.task_form = false;
    }

    pub fn delete_selected(&mut self) {
        self.tasks.delete(self.selected_index);
        self.clamp_selection();
    }

    pub fn delete_all_tasks(&mut self) {
        self.tasks.delete_all();
        self.selected_index = 0;
    }

    // Settings

    /// Open the settings dialog showing the committed durations
    pub fn open_settings(&mut self) {
        self.config.open_draft();
        let committed = self.config.committed();
        self.settings_form = SettingsFormState {
            fields: Mode::all().map(|mode| committed.get(mode).to_string()),
            editing_field: 0,
        };
        self.modals.settings = true;
    }

    pub fn settings_next_field(&mut self) {
        self.settings_form.editing_field =
            (self.settings_form.editing_field + 1) % self.settings_form.fields.len();
    }

    pub fn settings_add_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            let field = self.settings_form.editing_field;
            self.settings_form.fields[field].push(c);
        }
    }

    pub fn settings_backspace(&mut self) {
        let field = self.settings_form.editing_field;
        self.settings_form.fields[field].pop();
    }

    /// Commit all three durations, or nothing if any field is not a positive number
    pub fn save_settings(&mut self) {
        let mut parsed = [0u32; 3];
        for (slot, text) in parsed.iter_mut().zip(&self.settings_form.fields) {
            match text.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => *slot = minutes,
                _ => {
                    tracing::debug!("Settings not saved: invalid duration {:?}", text);
                    return;
                }
            }
        }

        for (mode, minutes) in Mode::all().into_iter().zip(parsed) {
            if let Err(e) = self.config.set_duration(mode, minutes) {
                tracing::debug!("Settings not saved: {}", e);
                return;
            }
        }

        if self.config.apply() {
            let committed = *self.config.committed();
            tracing::info!(
                focus = committed.focus,
                short_break = committed.short_break,
                long_break = committed.long_break,
                "mode durations updated"
            );
            self.settings.save(&committed);
            self.timer.set_mode(self.timer.mode(), &committed);
        }
        self.modals.settings = false;
        self.settings_form = SettingsFormState::default();
    }

    pub fn cancel_settings(&mut self) {
        self.config.cancel();
        self.modals.settings = false;
        self.settings_form = SettingsFormState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModeDurations;
    use crate::notifications::RecordingNotifier;
    use crate::persistence::{KeyValueStore, MemoryStore};
    use crate::ticker::TICK_PERIOD;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestApp {
        app: AppState,
        store: Rc<RefCell<MemoryStore>>,
        notifier: RecordingNotifier,
    }

    fn create_test_app() -> TestApp {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let notifier = RecordingNotifier::default();
        let app = AppState::new(
            TaskList::load(Box::new(store.clone())),
            SettingsStore::new(Box::new(store.clone())),
            Box::new(notifier.clone()),
        );
        TestApp {
            app,
            store,
            notifier,
        }
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.task_form_add_char(c);
        }
    }

    fn fill_task_form(app: &mut AppState, description: &str, h: &str, m: &str, s: &str) {
        type_text(app, description);
        for value in [h, m, s] {
            app.task_form_next_field();
            type_text(app, value);
        }
    }

    #[test]
    fn test_app_state_new() {
        let t = create_test_app();
        assert_eq!(t.app.ui_mode(), UiMode::Normal);
        assert_eq!(t.app.timer.display(), "25:00");
        assert!(t.app.tasks.is_empty());
        assert_eq!(t.app.modals, Modals::default());
    }

    #[test]
    fn test_expiry_opens_time_up_and_plays_once() {
        let mut t = create_test_app();
        let start = Instant::now();
        t.app.timer.set_remaining_minutes(0);
        t.app.timer.start_at(start);

        t.app.tick(start + TICK_PERIOD);
        assert!(t.app.modals.time_up);
        assert_eq!(t.app.ui_mode(), UiMode::TimeUp);
        assert!(!t.app.timer.is_running());

        t.app.tick(start + TICK_PERIOD * 5);
        assert_eq!(t.notifier.plays.borrow().len(), 1);
        assert_eq!(t.notifier.plays.borrow()[0], "Pomodoro is over");
    }

    #[test]
    fn test_time_up_reset_and_stop_dismiss() {
        let mut t = create_test_app();
        t.app.scrub(-20);
        t.app.modals.time_up = true;
        t.app.stop_timer();
        assert!(!t.app.modals.time_up);
        assert_eq!(t.app.timer.display(), "05:00");

        t.app.modals.time_up = true;
        t.app.reset_timer();
        assert!(!t.app.modals.time_up);
        assert_eq!(t.app.timer.display(), "25:00");
    }

    #[test]
    fn test_scrub_clamps_to_range() {
        let mut t = create_test_app();
        t.app.scrub(100);
        assert_eq!(t.app.timer.remaining_minutes(), 60);
        t.app.scrub(-500);
        assert_eq!(t.app.timer.remaining_minutes(), 0);
    }

    #[test]
    fn test_scrub_then_select_mode_restores_duration() {
        let mut t = create_test_app();
        t.app.scrub(-15);
        assert_eq!(t.app.timer.display(), "10:00");

        t.app.select_mode(Mode::Focus);
        assert_eq!(t.app.timer.display(), "25:00");
        assert_eq!(t.app.config.committed().focus, 25);
    }

    #[test]
    fn test_add_task_through_form() {
        let mut t = create_test_app();
        t.app.start_add_task();
        assert_eq!(t.app.ui_mode(), UiMode::TaskForm);

        fill_task_form(&mut t.app, "Write docs", "0", "90", "0");
        t.app.submit_task_form();

        assert_eq!(t.app.tasks.len(), 1);
        assert_eq!(t.app.tasks.tasks()[0].time.to_string(), "1h 30m 0s");
        assert!(!t.app.modals.task_form);
        assert!(t.app.task_form.draft.description.is_empty());
    }

    #[test]
    fn test_numeric_fields_ignore_letters() {
        let mut t = create_test_app();
        t.app.start_add_task();
        t.app.task_form_next_field();
        type_text(&mut t.app, "1a2");
        assert_eq!(t.app.task_form.draft.hours, "12");
    }

    #[test]
    fn test_empty_title_keeps_dialog_open_with_input() {
        let mut t = create_test_app();
        t.app.start_add_task();
        fill_task_form(&mut t.app, "", "1", "2", "3");
        t.app.submit_task_form();

        assert!(t.app.tasks.is_empty());
        assert!(t.app.modals.task_form);
        assert_eq!(t.app.task_form.draft, TaskDraft::new("", "1", "2", "3"));
    }

    #[test]
    fn test_edit_task_prefills_and_replaces() {
        let mut t = create_test_app();
        t.app.tasks.add(&TaskDraft::new("Read", "0", "90", "0")).unwrap();

        t.app.start_edit_task();
        assert_eq!(t.app.modals.edit_target, Some(0));
        assert_eq!(t.app.task_form.draft, TaskDraft::new("Read", "1", "30", "0"));

        type_text(&mut t.app, " more");
        t.app.submit_task_form();

        assert_eq!(t.app.tasks.len(), 1);
        assert_eq!(t.app.tasks.tasks()[0].description, "Read more");
        assert_eq!(t.app.modals.edit_target, None);
    }

    #[test]
    fn test_cancel_clears_drafts_and_target() {
        let mut t = create_test_app();
        t.app.tasks.add(&TaskDraft::new("Read", "0", "1", "0")).unwrap();
        t.app.start_edit_task();
        t.app.cancel_task_form();

        assert_eq!(t.app.modals, Modals::default());
        assert_eq!(t.app.task_form.draft, TaskDraft::default());

        // Adding after an edit starts blank
        t.app.start_add_task();
        assert_eq!(t.app.task_form.draft, TaskDraft::default());
        assert_eq!(t.app.modals.edit_target, None);
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let mut t = create_test_app();
        t.app.tasks.add(&TaskDraft::new("A", "0", "1", "0")).unwrap();
        t.app.tasks.add(&TaskDraft::new("B", "0", "1", "0")).unwrap();
        t.app.move_selection_down();
        assert_eq!(t.app.selected_index, 1);

        t.app.delete_selected();
        assert_eq!(t.app.selected_index, 0);
        assert_eq!(t.app.tasks.tasks()[0].description, "A");
    }

    #[test]
    fn test_delete_all_then_restart_is_empty() {
        let mut t = create_test_app();
        t.app.tasks.add(&TaskDraft::new("A", "0", "1", "0")).unwrap();
        t.app.delete_all_tasks();

        let reloaded = TaskList::load(Box::new(t.store.clone()));
        assert!(reloaded.is_empty());
        assert_eq!(t.store.borrow().get("tasks").unwrap(), None);
    }

    #[test]
    fn test_settings_cancel_leaves_everything() {
        let mut t = create_test_app();
        t.app.scrub(-5);
        t.app.open_settings();
        assert_eq!(t.app.settings_form.fields, ["25", "5", "15"].map(String::from));

        t.app.settings_backspace();
        t.app.settings_backspace();
        t.app.settings_add_char('4');
        t.app.cancel_settings();

        assert_eq!(*t.app.config.committed(), ModeDurations::default());
        assert_eq!(t.app.timer.display(), "20:00");
        assert!(!t.app.modals.settings);
    }

    #[test]
    fn test_settings_save_updates_active_countdown() {
        let mut t = create_test_app();
        t.app.open_settings();
        t.app.settings_backspace();
        t.app.settings_backspace();
        t.app.settings_add_char('3');
        t.app.settings_add_char('0');
        t.app.save_settings();

        assert_eq!(t.app.config.committed().focus, 30);
        assert_eq!(t.app.timer.display(), "30:00");
        assert!(!t.app.modals.settings);

        // Survives a restart
        let settings = SettingsStore::new(Box::new(t.store.clone()));
        assert_eq!(settings.load().focus, 30);
    }

    #[test]
    fn test_settings_save_resets_running_countdown() {
        let mut t = create_test_app();
        t.app.toggle_timer();
        t.app.open_settings();
        t.app.settings_next_field();
        t.app.settings_add_char('0');
        t.app.save_settings();

        assert_eq!(t.app.config.committed().short_break, 50);
        assert_eq!(t.app.timer.mode(), Mode::Focus);
        assert_eq!(t.app.timer.display(), "25:00");
        assert!(!t.app.timer.is_running());
    }

    #[test]
    fn test_settings_save_unchanged_keeps_countdown() {
        let mut t = create_test_app();
        t.app.scrub(-5);
        t.app.open_settings();
        t.app.save_settings();
        assert_eq!(t.app.timer.display(), "20:00");
    }

    #[test]
    fn test_settings_save_rejects_zero_or_empty() {
        let mut t = create_test_app();
        t.app.open_settings();
        t.app.settings_backspace();
        t.app.settings_backspace();
        t.app.save_settings();
        assert!(t.app.modals.settings);

        t.app.settings_add_char('0');
        t.app.save_settings();
        assert!(t.app.modals.settings);
        assert_eq!(t.app.config.committed().focus, 25);
    }
}
