//! Login and register form state machines
//!
//! Each form goes `Idle -> Submitting -> (Idle | Navigated)`. `start` and
//! `finish` are split so the UI can run the session call on a background
//! task; `submit` does both for callers that can simply await.

use crate::egui_app::auth::{AuthOutcome, SessionStore};
use crate::shared::validation::{validate_login, validate_registration};
use crate::shared::{LoginRequest, RegisterRequest, Route};

pub const LOGIN_ABANDONED: &str = "Failed to log in. Please try again.";
pub const REGISTER_ABANDONED: &str = "Failed to create an account. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Navigated,
}

/// Shared bookkeeping for both forms
#[derive(Debug, Clone, Default)]
struct Submission {
    phase: FormPhase,
    error: Option<String>,
}

impl Submission {
    fn begin(&mut self) -> bool {
        if self.phase != FormPhase::Idle {
            return false;
        }
        self.error = None;
        true
    }

    fn finish(&mut self, outcome: AuthOutcome) -> Option<Route> {
        if self.phase != FormPhase::Submitting {
            return None;
        }
        match outcome {
            AuthOutcome::Success => {
                self.phase = FormPhase::Navigated;
                Some(Route::Dashboard)
            }
            AuthOutcome::Failure { message } => {
                self.phase = FormPhase::Idle;
                self.error = Some(message);
                None
            }
        }
    }

    fn abandon(&mut self, message: &str) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Idle;
            self.error = Some(message.to_string());
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    submission: Submission,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.submission.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.submission.error.as_deref()
    }

    /// Validate and enter `Submitting`. `None` means nothing should be sent.
    pub fn start(&mut self) -> Option<LoginRequest> {
        if !self.submission.begin() {
            return None;
        }
        if let Err(e) = validate_login(&self.email, &self.password) {
            self.submission.error = Some(e.to_string());
            return None;
        }
        self.submission.phase = FormPhase::Submitting;
        Some(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    pub fn finish(&mut self, outcome: AuthOutcome) -> Option<Route> {
        self.submission.finish(outcome)
    }

    /// The background task went away without an answer.
    pub fn abandon(&mut self) {
        self.submission.abandon(LOGIN_ABANDONED);
    }

    pub async fn submit(&mut self, session: &SessionStore) -> Option<Route> {
        let request = self.start()?;
        let outcome = session.login(&request.email, &request.password).await;
        self.finish(outcome)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    submission: Submission,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.submission.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.submission.error.as_deref()
    }

    /// Runs the required-field, email-domain and password-match checks
    /// before entering `Submitting`.
    pub fn start(&mut self) -> Option<RegisterRequest> {
        if !self.submission.begin() {
            return None;
        }
        if let Err(e) = validate_registration(
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ) {
            self.submission.error = Some(e.to_string());
            return None;
        }
        self.submission.phase = FormPhase::Submitting;
        Some(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    pub fn finish(&mut self, outcome: AuthOutcome) -> Option<Route> {
        self.submission.finish(outcome)
    }

    pub fn abandon(&mut self) {
        self.submission.abandon(REGISTER_ABANDONED);
    }

    pub async fn submit(&mut self, session: &SessionStore) -> Option<Route> {
        let request = self.start()?;
        let outcome = session
            .register(&request.name, &request.email, &request.password)
            .await;
        self.finish(outcome)
    }
}
