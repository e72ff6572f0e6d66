//! Submit lifecycle orchestrator.
//!
//! [`Form`] wraps a [`FormState`] together with the caller-supplied async
//! submit action and the notification sink. One submit attempt walks
//!
//! ```text
//! Idle ── submit() ──> Validating (sync)
//!                        │ invalid ──> notify "fix errors" ──> Idle
//!                        v
//!                      Submitting (await action on the values snapshot)
//!                        │ ok   ──> notify success ──> Idle
//!                        └ err  ──> notify error   ──> Idle
//! ```
//!
//! A submit request arriving while another is in flight is dropped — the
//! engine's only concurrency guard, an atomic check-and-set performed before
//! the suspension point. The orchestrator owns no timeout: an action that
//! never resolves leaves `is_submitting` true, by contract. Dropping the
//! form mid-flight drops the awaited future with it, so a completed action
//! can never write into a dismissed form.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::debug;

use crate::notify::{Notifier, NotifyKind, NullNotifier};

use super::rule::{Field, FieldRule};
use super::state::{FormState, FormValues};

pub(crate) const MSG_FIX_ERRORS: &str = "Please fix the form errors before submitting";
pub(crate) const MSG_SUBMITTED: &str = "Form submitted successfully";
pub(crate) const MSG_GENERIC: &str = "An error occurred";

/// Error type submit actions report with; normalized to a display string
/// before it reaches the notifier.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed async submit action: receives the values snapshot captured at the
/// instant validation passed.
pub type SubmitAction<F> =
    Box<dyn Fn(FormValues<F>) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// What a call to [`Form::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the action resolved successfully.
    Submitted,
    /// Validation failed; the action was never invoked.
    Invalid,
    /// The action rejected; carries the normalized message.
    Rejected(String),
    /// Dropped: another attempt was already in flight.
    InFlight,
}

/// A form instance: field state plus submit lifecycle.
///
/// Mutation and query methods delegate to the inner [`FormState`] behind a
/// lock, so a host can share one form across handlers the way a UI shares a
/// hook instance.
pub struct Form<F: Field> {
    state: Mutex<FormState<F>>,
    action: SubmitAction<F>,
    notifier: Arc<dyn Notifier>,
    notify_enabled: bool,
    submitting: AtomicBool,
}

impl<F: Field> Form<F> {
    pub fn builder() -> FormBuilder<F> {
        FormBuilder {
            initial: Vec::new(),
            rules: Vec::new(),
            action: None,
            notifier: None,
            notify_enabled: true,
        }
    }

    /// Run one submit attempt to completion.
    ///
    /// Returns [`SubmitOutcome::InFlight`] without doing anything when
    /// another attempt holds the guard.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.submitting.swap(true, Ordering::SeqCst) {
            debug!("submit dropped: another attempt is in flight");
            return SubmitOutcome::InFlight;
        }
        let _guard = SubmitGuard(&self.submitting);

        // Validating: synchronous, under the state lock. The snapshot is
        // captured here; edits arriving during the pending action are
        // accepted into the form but do not affect this attempt.
        let snapshot = {
            let mut state = self.state.lock();
            if !state.validate_all() {
                drop(state);
                debug!("submit rejected by validation");
                self.toast(MSG_FIX_ERRORS, NotifyKind::Error);
                return SubmitOutcome::Invalid;
            }
            state.values().clone()
        };

        // Submitting.
        match (self.action)(snapshot).await {
            Ok(()) => {
                debug!("submit action resolved");
                self.toast(MSG_SUBMITTED, NotifyKind::Success);
                SubmitOutcome::Submitted
            }
            Err(err) => {
                let message = normalize_error(&err);
                debug!(%message, "submit action rejected");
                self.toast(&message, NotifyKind::Error);
                SubmitOutcome::Rejected(message)
            }
        }
    }

    /// True strictly while a submit attempt is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    // --- State pass-throughs ------------------------------------------------

    /// See [`FormState::set_value`].
    pub fn set_value(&self, field: F, value: impl Into<String>) {
        self.state.lock().set_value(field, value);
    }

    /// See [`FormState::set_value_silently`].
    pub fn set_value_silently(&self, field: F, value: impl Into<String>) {
        self.state.lock().set_value_silently(field, value);
    }

    /// See [`FormState::mark_touched`].
    pub fn mark_touched(&self, field: F) {
        self.state.lock().mark_touched(field);
    }

    /// See [`FormState::validate_all`].
    pub fn validate_all(&self) -> bool {
        self.state.lock().validate_all()
    }

    /// Restore the initial snapshot and clear errors, flags, and the
    /// in-flight guard unconditionally.
    pub fn reset(&self) {
        self.state.lock().reset();
        self.submitting.store(false, Ordering::SeqCst);
    }

    pub fn value(&self, field: F) -> String {
        self.state.lock().value(field).to_string()
    }

    pub fn values(&self) -> FormValues<F> {
        self.state.lock().values().clone()
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> Vec<F> {
        self.state.lock().fields().to_vec()
    }

    pub fn error(&self, field: F) -> Option<String> {
        self.state.lock().error(field).map(str::to_string)
    }

    /// Snapshot of the full error map.
    pub fn errors(&self) -> std::collections::HashMap<F, String> {
        self.state.lock().errors().clone()
    }

    /// Touch-gated error, what a UI renders next to the input.
    pub fn visible_error(&self, field: F) -> Option<String> {
        self.state.lock().visible_error(field).map(str::to_string)
    }

    pub fn touched(&self, field: F) -> bool {
        self.state.lock().touched(field)
    }

    pub fn dirty(&self, field: F) -> bool {
        self.state.lock().dirty(field)
    }

    pub fn is_valid(&self) -> bool {
        self.state.lock().is_valid()
    }

    fn toast(&self, message: &str, kind: NotifyKind) {
        if self.notify_enabled {
            self.notifier.notify(message, kind);
        }
    }
}

/// Clears the in-flight guard on every exit path, including a panicking
/// action.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn normalize_error(err: &BoxError) -> String {
    let message = err.to_string();
    if message.is_empty() { MSG_GENERIC.to_string() } else { message }
}

/// Builder carrying the construction contract: initial values (which define
/// the field set), rules, the async action, and the optional notifier.
pub struct FormBuilder<F: Field> {
    initial: Vec<(F, String)>,
    rules: Vec<FieldRule<F>>,
    action: Option<SubmitAction<F>>,
    notifier: Option<Arc<dyn Notifier>>,
    notify_enabled: bool,
}

impl<F: Field> FormBuilder<F> {
    /// Declare a field with its initial value.
    pub fn field(mut self, field: F, initial: impl Into<String>) -> Self {
        self.initial.push((field, initial.into()));
        self
    }

    pub fn rule(mut self, rule: FieldRule<F>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: Vec<FieldRule<F>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// The async action invoked with the values snapshot once validation
    /// passes.
    pub fn on_submit<A, Fut>(mut self, action: A) -> Self
    where
        A: Fn(FormValues<F>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.action = Some(Box::new(move |values| Box::pin(action(values))));
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Enable or disable outcome notifications (enabled by default).
    pub fn notifications(mut self, enabled: bool) -> Self {
        self.notify_enabled = enabled;
        self
    }

    /// # Panics
    ///
    /// Panics when no submit action was supplied, when a field is declared
    /// twice, or when a rule references an undeclared field.
    pub fn build(self) -> Form<F> {
        let action = self.action.expect("a form requires an on_submit action");
        Form {
            state: Mutex::new(FormState::new(self.initial, self.rules)),
            action,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(NullNotifier)),
            notify_enabled: self.notify_enabled,
            submitting: AtomicBool::new(false),
        }
    }
}
