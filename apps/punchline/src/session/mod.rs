//! Session: the top-level controller and its view state machine.
//!
//! Transitions live in one pure table (`transition`). `Session` applies them and owns the
//! only mutable state: the form, the current routine, and the current error message.
//!
//! `submit` borrows the session mutably for the whole request, so a second submission cannot
//! start while one is in flight. If the caller drops that future, the session falls back to the
//! form instead of staying on the loading screen.

use std::fmt;

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::form::FormController;
use crate::generation::RoutineGenerator;
use crate::models::GeneratedRoutine;

/// Which screen the presentation layer should render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Landing,
    Form,
    Loading,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Start,
    Submit,
    GenerationSucceeded,
    GenerationFailed,
    Reset,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Landing => "landing",
            View::Form => "form",
            View::Loading => "loading",
            View::Results => "results",
        })
    }
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewEvent::Start => "start",
            ViewEvent::Submit => "submit",
            ViewEvent::GenerationSucceeded => "generation succeeded",
            ViewEvent::GenerationFailed => "generation failed",
            ViewEvent::Reset => "reset",
        })
    }
}

/// The view state machine. Anything not listed is rejected.
///
/// | from            | event               | to      |
/// |-----------------|---------------------|---------|
/// | landing/results | start               | form    |
/// | form            | submit              | loading |
/// | loading         | generation succeeded| results |
/// | loading         | generation failed   | form    |
/// | not loading     | reset               | landing |
///
/// A cancelled request leaves `loading` along the `generation failed` edge.
pub fn transition(from: View, event: ViewEvent) -> Result<View, AppError> {
    use View::*;
    use ViewEvent::*;

    match (from, event) {
        (Landing | Results, Start) => Ok(Form),
        (Form, Submit) => Ok(Loading),
        (Loading, GenerationSucceeded) => Ok(Results),
        (Loading, GenerationFailed) => Ok(Form),
        (Landing | Form | Results, Reset) => Ok(Landing),
        _ => Err(AppError::InvalidTransition { from, event }),
    }
}

/// Puts the view back on the form if the request future is dropped before it resolves.
struct LoadingGuard<'a> {
    view: &'a mut View,
}

impl LoadingGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(next) = transition(*self.view, ViewEvent::GenerationFailed) {
            warn!("Routine request cancelled; view {} -> {}", self.view, next);
            *self.view = next;
        }
    }
}

pub struct Session<G: RoutineGenerator> {
    generator: G,
    view: View,
    form: FormController,
    routine: Option<GeneratedRoutine>,
    error: Option<String>,
}

impl<G: RoutineGenerator> Session<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            view: View::Landing,
            form: FormController::new(),
            routine: None,
            error: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn routine(&self) -> Option<&GeneratedRoutine> {
        self.routine.as_ref()
    }

    /// Message to show above the form, if the last attempt failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn apply(&mut self, event: ViewEvent) -> Result<(), AppError> {
        let next = transition(self.view, event)?;
        info!("View {} --{}--> {}", self.view, event, next);
        self.view = next;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), AppError> {
        self.apply(ViewEvent::Start)?;
        self.error = None;
        Ok(())
    }

    /// Hands the profile to the generator and waits for the single response.
    ///
    /// Missing required fields keep the session on the form and make no request.
    /// A generation failure returns to the form with the fixed message; the profile is kept.
    pub async fn submit(&mut self) -> Result<(), AppError> {
        // Only the submit edge is checked here; the rest of the flow is guaranteed by it.
        transition(self.view, ViewEvent::Submit)?;

        let profile = match self.form.submit() {
            Ok(profile) => profile,
            Err(e) => {
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        self.apply(ViewEvent::Submit)?;
        self.error = None;

        let guard = LoadingGuard {
            view: &mut self.view,
        };
        let outcome = self.generator.generate_routine(&profile).await;
        guard.disarm();

        match outcome {
            Ok(routine) => {
                self.apply(ViewEvent::GenerationSucceeded)?;
                self.routine = Some(routine);
                Ok(())
            }
            Err(e) => {
                error!("Routine generation failed: {e}");
                self.apply(ViewEvent::GenerationFailed)?;
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) -> Result<(), AppError> {
        self.apply(ViewEvent::Reset)?;
        self.routine = None;
        Ok(())
    }
}
