use std::collections::BTreeMap;
use std::fmt;
use std::sync::{LazyLock, Mutex};

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

// Same shape check the browser applies to <input type="email">: one @, no
// whitespace, a dot somewhere in the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

/// One message per invalid field, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// The validated, trimmed payload handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug)]
pub struct SubmitError {
    pub reason: String,
}

impl SubmitError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Submission failed: {}", self.reason)
    }
}

impl std::error::Error for SubmitError {}

/// The external submission collaborator: accepts the payload, reports
/// success or failure. The real integration is deployment-specific; the
/// shipped placeholder always succeeds after a fixed delay.
#[async_trait]
pub trait Submit: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A transient toast pushed at the user. Fire and forget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

pub trait Notify: Send + Sync {
    fn push(&self, notice: Notice);
}

/// A [`Notify`] sink that keeps every notice. Used by the dev server to
/// relay toasts back to the browser and by tests to assert on them.
#[derive(Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut self.notices.lock().expect("notifier lock"))
    }
}

impl Notify for MemoryNotifier {
    fn push(&self, notice: Notice) {
        self.notices.lock().expect("notifier lock").push(notice);
    }
}

/// Form lifecycle. Errors only exist in `Idle`, so "submitting while
/// showing stale errors" cannot be represented. The terminal states behave
/// as idle and collapse back to `Idle` on the next edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle { errors: ValidationErrors },
    Submitting,
    Succeeded,
    Failed,
}

impl FormState {
    fn idle() -> Self {
        FormState::Idle {
            errors: ValidationErrors::default(),
        }
    }
}

/// The only stateful unit on the page: owns the three field values and the
/// submission lifecycle. Fields are stored verbatim as typed; validation
/// runs at submit time, not per keystroke.
#[derive(Debug)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    state: FormState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            state: FormState::idle(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Stores the value verbatim. Leaving a terminal state happens here:
    /// the first edit after a submission puts the form back to `Idle`.
    pub fn update_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Message => self.message = value.to_string(),
        }
        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::idle();
        }
    }

    /// Applies the field rules to the current values. Pure: repeated calls
    /// without edits return the same result.
    pub fn validate(&self) -> Result<ContactMessage, ValidationErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut errors = ValidationErrors::default();
        if name.chars().count() < NAME_MIN_CHARS {
            errors.insert(Field::Name, "Name must be at least 2 characters");
        }
        if !EMAIL_SHAPE.is_match(email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }
        if message.chars().count() < MESSAGE_MIN_CHARS {
            errors.insert(Field::Message, "Message must be at least 20 characters");
        }

        if errors.is_empty() {
            Ok(ContactMessage {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            })
        } else {
            Err(errors)
        }
    }

    /// First half of a submission: validate and enter `Submitting`.
    /// Returns the payload to send, or `None` when validation failed (the
    /// errors land in `Idle`) or a submission is already pending — the one
    /// concurrency guard the page needs.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.is_submitting() {
            return None;
        }
        match self.validate() {
            Ok(message) => {
                self.state = FormState::Submitting;
                Some(message)
            }
            Err(errors) => {
                self.state = FormState::Idle { errors };
                None
            }
        }
    }

    /// Second half: record the collaborator's outcome. Both arms leave the
    /// pending flag cleared; success additionally resets the fields.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>, notifier: &dyn Notify) {
        self.state = match outcome {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                notifier.push(Notice::success(
                    "Message sent!",
                    "Thanks for reaching out. I'll respond as soon as possible.",
                ));
                FormState::Succeeded
            }
            Err(_) => {
                notifier.push(Notice::failure(
                    "Something went wrong",
                    "Your message couldn't be sent. Please try again.",
                ));
                FormState::Failed
            }
        };
    }

    /// Full submission: validate, call the collaborator, record the
    /// outcome. Invalid input never reaches the collaborator.
    pub async fn submit(&mut self, submitter: &dyn Submit, notifier: &dyn Notify) {
        let Some(message) = self.begin_submit() else {
            return;
        };
        let outcome = submitter.submit(&message).await;
        self.finish_submit(outcome, notifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OkSubmitter {
        calls: AtomicUsize,
    }

    impl OkSubmitter {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Submit for OkSubmitter {
        async fn submit(&self, _message: &ContactMessage) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSubmitter;

    #[async_trait]
    impl Submit for FailingSubmitter {
        async fn submit(&self, _message: &ContactMessage) -> Result<(), SubmitError> {
            Err(SubmitError::new("relay unreachable"))
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "Al");
        form.update_field(Field::Email, "al@x.com");
        form.update_field(Field::Message, "This message is definitely long enough.");
        form
    }

    #[test]
    fn short_name_is_rejected_and_two_chars_pass() {
        let mut form = filled_form();
        form.update_field(Field::Name, "A");
        let errors = form.validate().unwrap_err();
        assert!(errors.get(Field::Name).is_some());

        form.update_field(Field::Name, "Al");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn email_shape_is_enforced() {
        let mut form = filled_form();
        form.update_field(Field::Email, "not-an-email");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address")
        );

        form.update_field(Field::Email, "user@example.com");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn message_boundary_is_exactly_twenty_chars() {
        let mut form = filled_form();
        form.update_field(Field::Message, &"x".repeat(19));
        assert!(form.validate().unwrap_err().get(Field::Message).is_some());

        form.update_field(Field::Message, &"x".repeat(20));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validate_is_idempotent_without_edits() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "A");
        form.update_field(Field::Email, "bad");
        form.update_field(Field::Message, "short");

        let first = form.validate().unwrap_err();
        let second = form.validate().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn payload_is_trimmed() {
        let mut form = filled_form();
        form.update_field(Field::Name, "  Al  ");
        let message = form.validate().unwrap();
        assert_eq!(message.name, "Al");
    }

    #[tokio::test]
    async fn successful_submission_resets_fields_and_notifies() {
        let mut form = filled_form();
        let submitter = OkSubmitter::new();
        let notifier = MemoryNotifier::new();

        form.submit(&submitter, &notifier).await;

        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*form.state(), FormState::Succeeded);
        assert!(!form.is_submitting());
        assert_eq!(form.field(Field::Name), "");
        assert_eq!(form.field(Field::Email), "");
        assert_eq!(form.field(Field::Message), "");

        let notices = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Success);
        assert_eq!(notices[0].title, "Message sent!");
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_collaborator() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "A");
        form.update_field(Field::Email, "bad");
        form.update_field(Field::Message, "short");
        let submitter = OkSubmitter::new();
        let notifier = MemoryNotifier::new();

        form.submit(&submitter, &notifier).await;

        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert!(!form.is_submitting());
        match form.state() {
            FormState::Idle { errors } => assert_eq!(errors.len(), 3),
            other => panic!("expected idle with errors, got {other:?}"),
        }
        assert!(notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn failed_submission_keeps_fields_for_retry() {
        let mut form = filled_form();
        let notifier = MemoryNotifier::new();

        form.submit(&FailingSubmitter, &notifier).await;

        assert_eq!(*form.state(), FormState::Failed);
        assert!(!form.is_submitting());
        assert_eq!(form.field(Field::Name), "Al");
        assert_eq!(form.field(Field::Message), "This message is definitely long enough.");

        let notices = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
    }

    #[test]
    fn pending_submission_blocks_a_second_begin() {
        let mut form = filled_form();
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn editing_after_a_terminal_state_returns_to_idle() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmitError::new("boom")), &MemoryNotifier::new());
        assert_eq!(*form.state(), FormState::Failed);

        form.update_field(Field::Name, "Alice");
        assert_eq!(*form.state(), FormState::idle());
    }
}
