use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::egui_app::auth::{AuthOutcome, SessionStore};
use crate::egui_app::forms::{LoginForm, RegisterForm};
use crate::shared::{PendingRoute, Profile, Route};

/// Central application state shared across egui views.
pub struct AppState {
    pub session: Arc<SessionStore>,
    runtime: Handle,
    redirects: PendingRoute,
    pub route: Route,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    /// Form waiting on a background login/register, and where its answer lands
    auth_result: Option<(Route, Receiver<AuthOutcome>)>,
    profile_result: Option<Receiver<Result<Profile, String>>>,
    pub profile: Option<Profile>,
    pub profile_error: Option<String>,
}

impl AppState {
    /// `redirects` must be the navigator the session store was built with.
    pub fn new(session: Arc<SessionStore>, runtime: Handle, redirects: PendingRoute) -> Self {
        let route = if session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        };
        tracing::debug!(%route, "AppState initialized");

        Self {
            session,
            runtime,
            redirects,
            route,
            login_form: LoginForm::new(),
            register_form: RegisterForm::new(),
            auth_result: None,
            profile_result: None,
            profile: None,
            profile_error: None,
        }
    }

    /// Nothing is shown until the stored session has been looked at.
    pub fn is_ready(&self) -> bool {
        !self.session.is_loading()
    }

    pub fn is_profile_loading(&self) -> bool {
        self.profile_result.is_some()
    }

    /// Called once per frame: collect finished background work, apply
    /// forced redirects and route guards.
    pub fn poll(&mut self) {
        self.check_auth_result();
        self.check_profile_result();

        if let Some(route) = self.redirects.take() {
            self.navigate(route);
        }
        if self.route.requires_auth() && !self.session.is_authenticated() {
            self.navigate(Route::Login);
        }
    }

    fn check_auth_result(&mut self) {
        let Some((form, received)) = self
            .auth_result
            .as_ref()
            .map(|(form, rx)| (*form, rx.try_recv()))
        else {
            return;
        };

        let next = match received {
            Err(TryRecvError::Empty) => return,
            Ok(outcome) => match form {
                Route::Register => self.register_form.finish(outcome),
                _ => self.login_form.finish(outcome),
            },
            Err(TryRecvError::Disconnected) => {
                tracing::error!(%form, "Authentication task ended without a result");
                match form {
                    Route::Register => self.register_form.abandon(),
                    _ => self.login_form.abandon(),
                }
                None
            }
        };

        self.auth_result = None;
        if let Some(route) = next {
            self.navigate(route);
        }
    }

    fn check_profile_result(&mut self) {
        let Some(received) = self.profile_result.as_ref().map(Receiver::try_recv) else {
            return;
        };

        match received {
            Err(TryRecvError::Empty) => return,
            Ok(Ok(profile)) => {
                self.profile = Some(profile);
                self.profile_error = None;
            }
            Ok(Err(message)) => self.profile_error = Some(message),
            Err(TryRecvError::Disconnected) => {
                self.profile_error = Some("Failed to load profile".to_string());
            }
        }
        self.profile_result = None;
    }

    /// Switch views. Entering a form starts it fresh; re-entering the
    /// current route changes nothing.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::debug!(from = %self.route, to = %route, "Navigating");
        match route {
            Route::Login => self.login_form = LoginForm::new(),
            Route::Register => self.register_form = RegisterForm::new(),
            Route::Dashboard => {}
        }
        if self.route == Route::Dashboard {
            self.profile = None;
            self.profile_error = None;
        }
        self.route = route;
    }

    /// Ignored while another login or register is in flight.
    pub fn submit_login(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        let Some(request) = self.login_form.start() else {
            return;
        };
        let session = Arc::clone(&self.session);
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let outcome = session.login(&request.email, &request.password).await;
            let _ = tx.send(outcome);
        });
        self.auth_result = Some((Route::Login, rx));
    }

    pub fn submit_register(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        let Some(request) = self.register_form.start() else {
            return;
        };
        let session = Arc::clone(&self.session);
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let outcome = session
                .register(&request.name, &request.email, &request.password)
                .await;
            let _ = tx.send(outcome);
        });
        self.auth_result = Some((Route::Register, rx));
    }

    pub fn load_profile(&mut self) {
        if self.profile_result.is_some() {
            return;
        }
        let session = Arc::clone(&self.session);
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let result = session.fetch_profile().await.map_err(|e| {
                e.backend_message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| e.to_string())
            });
            let _ = tx.send(result);
        });
        self.profile_result = Some(rx);
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.navigate(Route::Login);
    }
}
