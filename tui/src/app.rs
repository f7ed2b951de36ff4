//! View state and pure state transitions for the registry client.
//!
//! Network calls happen elsewhere; everything here is synchronous state
//! manipulation so it can be tested without a terminal or a server.

use tui_input::Input;

use crate::api::{NewUser, User};

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Age,
    Email,
}

impl Focus {
    /// Cycle focus in form order.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Age,
            Self::Age => Self::Email,
            Self::Email => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Age => Self::Name,
            Self::Email => Self::Age,
        }
    }
}

/// Application state driving the render loop.
pub struct App {
    pub users: Vec<User>,
    pub loading: bool,
    /// Error line under the list, set by failed list/delete calls.
    pub error: Option<String>,
    /// Alert above the form, set by local validation or a failed create.
    pub alert: Option<String>,
    pub name: Input,
    pub age: Input,
    pub email: Input,
    pub focus: Focus,
    pub selected: Option<usize>,
    /// Id awaiting confirmation in the delete modal.
    pub pending_delete: Option<i32>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            error: None,
            alert: None,
            name: Input::default(),
            age: Input::default(),
            email: Input::default(),
            focus: Focus::Name,
            selected: None,
            pending_delete: None,
        }
    }
}

impl App {
    pub fn focused_input_mut(&mut self) -> &mut Input {
        match self.focus {
            Focus::Name => &mut self.name,
            Focus::Age => &mut self.age,
            Focus::Email => &mut self.email,
        }
    }

    /// Mark a list fetch in flight.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a list fetch.
    pub fn apply_loaded(&mut self, result: Result<Vec<User>, String>) {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.clamp_selection();
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Validate the form and produce a create payload.
    ///
    /// Returns `None` without side effects while a call is in flight, and
    /// `None` with an alert set when the form is incomplete or the age does
    /// not parse. On success the loading flag is set; the caller issues the
    /// request.
    pub fn create_request(&mut self) -> Option<NewUser> {
        if self.loading {
            return None;
        }

        let name = self.name.value().trim().to_owned();
        let email = self.email.value().trim().to_owned();
        let age_text = self.age.value().trim().to_owned();

        if name.is_empty() || email.is_empty() || age_text.is_empty() {
            self.alert = Some("fill in name, age and email".to_owned());
            return None;
        }
        let Ok(age) = age_text.parse::<i32>() else {
            self.alert = Some("age must be a whole number".to_owned());
            return None;
        };

        self.alert = None;
        self.loading = true;
        Some(NewUser { email, name, age })
    }

    /// Apply the outcome of a create call. Success appends the stored record
    /// and resets the form; no re-fetch happens.
    pub fn apply_created(&mut self, result: Result<User, String>) {
        self.loading = false;
        match result {
            Ok(user) => {
                self.users.push(user);
                self.name.reset();
                self.age.reset();
                self.email.reset();
                self.alert = None;
            }
            Err(message) => self.alert = Some(message),
        }
    }

    /// Open the confirmation modal for the selected user.
    pub fn request_delete(&mut self) {
        if self.loading {
            return;
        }
        if let Some(user) = self.selected.and_then(|index| self.users.get(index)) {
            self.pending_delete = Some(user.id);
        }
    }

    /// Confirm the pending delete, returning the id to remove.
    pub fn confirm_delete(&mut self) -> Option<i32> {
        let id = self.pending_delete.take()?;
        self.loading = true;
        self.error = None;
        Some(id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Apply the outcome of a delete call. Success removes the matching
    /// record locally by id.
    pub fn apply_deleted(&mut self, id: i32, result: Result<(), String>) {
        self.loading = false;
        match result {
            Ok(()) => {
                self.users.retain(|user| user.id != id);
                self.clamp_selection();
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn select_next(&mut self) {
        if self.users.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) if index + 1 < self.users.len() => index + 1,
            Some(index) => index,
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.users.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => index.saturating_sub(1),
            None => 0,
        });
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.selected {
            _ if self.users.is_empty() => None,
            Some(index) => Some(index.min(self.users.len() - 1)),
            None => None,
        };
    }
}
