//! A small saga runner for multi-step operations spanning independent
//! services.
//!
//! Steps run in order; each may hand back a compensation. When a step
//! fails, the compensations of the steps that already succeeded run in
//! reverse order, then the *original* error is returned. Compensation
//! failures are logged and swallowed — cleanup is best-effort and must
//! never mask the primary failure.

use std::fmt::Display;
use tracing::{debug, warn};

/// An undo action registered by a completed step.
pub struct Compensation<'a, E> {
    name: &'static str,
    undo: Box<dyn FnOnce() -> Result<(), E> + 'a>,
}

impl<'a, E> Compensation<'a, E> {
    /// Create a named compensation.
    pub fn new(name: &'static str, undo: impl FnOnce() -> Result<(), E> + 'a) -> Self {
        Self {
            name,
            undo: Box::new(undo),
        }
    }
}

struct Step<'a, E> {
    name: &'static str,
    #[allow(clippy::type_complexity)]
    action: Box<dyn FnOnce() -> Result<Option<Compensation<'a, E>>, E> + 'a>,
}

/// An ordered list of (action, compensation) pairs.
pub struct Saga<'a, E> {
    name: &'static str,
    steps: Vec<Step<'a, E>>,
}

impl<'a, E: Display> Saga<'a, E> {
    /// Start building a named saga.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Append a step. The action returns the compensation to register,
    /// or `None` for steps that need no undo.
    pub fn step(
        mut self,
        name: &'static str,
        action: impl FnOnce() -> Result<Option<Compensation<'a, E>>, E> + 'a,
    ) -> Self {
        self.steps.push(Step {
            name,
            action: Box::new(action),
        });
        self
    }

    /// Run all steps, compensating on failure.
    pub fn run(self) -> Result<(), E> {
        let mut completed: Vec<Compensation<'a, E>> = Vec::new();
        for step in self.steps {
            match (step.action)() {
                Ok(Some(compensation)) => completed.push(compensation),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        saga = self.name,
                        step = step.name,
                        error = %e,
                        "saga step failed, running compensations"
                    );
                    for compensation in completed.into_iter().rev() {
                        match (compensation.undo)() {
                            Ok(()) => {
                                debug!(saga = self.name, compensation = compensation.name, "compensated")
                            }
                            Err(ce) => warn!(
                                saga = self.name,
                                compensation = compensation.name,
                                error = %ce,
                                "compensation failed"
                            ),
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
