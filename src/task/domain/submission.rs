//! Raw task form input and its validation.

use super::{
    Amount, FieldViolation, GeoLocation, TaskDetails, TaskDomainError, TaskStatus,
};
use crate::auth::domain::UserId;
use chrono::NaiveDate;

const TASK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated values from the create or edit task form.
///
/// Amounts arrive as text so that malformed input can be reported per
/// field instead of failing deserialization wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    name: String,
    owner_name: String,
    task_date: String,
    status: String,
    comments: Option<String>,
    amount_received: String,
    remaining_amount: String,
    location: Option<(f64, f64)>,
}

impl TaskSubmission {
    /// Creates a submission with the create-form defaults: `pending` status
    /// and zero amounts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner_name: impl Into<String>,
        task_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner_name: owner_name.into(),
            task_date: task_date.into(),
            status: TaskStatus::Pending.as_str().to_owned(),
            comments: None,
            amount_received: "0".to_owned(),
            remaining_amount: "0".to_owned(),
            location: None,
        }
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the amount received and remaining amount text.
    #[must_use]
    pub fn with_amounts(
        mut self,
        amount_received: impl Into<String>,
        remaining_amount: impl Into<String>,
    ) -> Self {
        self.amount_received = amount_received.into();
        self.remaining_amount = remaining_amount.into();
        self
    }

    /// Sets the site coordinates.
    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    /// Pre-fills a submission from a task's current values, as the edit form
    /// does before the user changes anything.
    #[must_use]
    pub fn from_details(details: &TaskDetails) -> Self {
        Self {
            name: details.name.clone(),
            owner_name: details.owner_name.clone(),
            task_date: details.task_date.format(TASK_DATE_FORMAT).to_string(),
            status: details.status.as_str().to_owned(),
            comments: details.comments.clone(),
            amount_received: details.amount_received.to_string(),
            remaining_amount: details.remaining_amount.to_string(),
            location: details
                .location
                .map(|location| (location.latitude(), location.longitude())),
        }
    }

    /// Validates every field and returns the typed task values.
    ///
    /// Text fields are trimmed; blank comments become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidSubmission`] listing every rejected
    /// field.
    pub fn validate(&self) -> Result<TaskDetails, TaskDomainError> {
        let mut violations = Vec::new();

        let name = required(&self.name, "name", "Task name is required", &mut violations);
        let owner_name = required(
            &self.owner_name,
            "owner_name",
            "Owner name is required",
            &mut violations,
        );
        let task_date = parse_task_date(&self.task_date, &mut violations);
        let status = TaskStatus::try_from(self.status.as_str())
            .map_err(|_| {
                violations.push(FieldViolation::new(
                    "status",
                    "Status must be pending or completed",
                ));
            })
            .ok();
        let amount_received = parse_amount(&self.amount_received, "amount_received", &mut violations);
        let remaining_amount =
            parse_amount(&self.remaining_amount, "remaining_amount", &mut violations);
        let location = self.location.and_then(|(latitude, longitude)| {
            GeoLocation::new(latitude, longitude)
                .map_err(|err| violations.push(FieldViolation::new("location", err.to_string())))
                .ok()
        });
        let comments = self
            .comments
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);

        match (task_date, status, amount_received, remaining_amount) {
            (Some(task_date), Some(status), Some(amount_received), Some(remaining_amount))
                if violations.is_empty() =>
            {
                Ok(TaskDetails {
                    name,
                    owner_name,
                    task_date,
                    status,
                    comments,
                    amount_received,
                    remaining_amount,
                    location,
                })
            }
            _ => Err(TaskDomainError::InvalidSubmission(violations)),
        }
    }
}

fn required(
    value: &str,
    field: &'static str,
    message: &str,
    violations: &mut Vec<FieldViolation>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        violations.push(FieldViolation::new(field, message));
    }
    trimmed.to_owned()
}

fn parse_task_date(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        violations.push(FieldViolation::new("task_date", "Task date is required"));
        return None;
    }
    NaiveDate::parse_from_str(trimmed, TASK_DATE_FORMAT)
        .map_err(|_| {
            violations.push(FieldViolation::new(
                "task_date",
                "Task date must be formatted as YYYY-MM-DD",
            ));
        })
        .ok()
}

fn parse_amount(
    raw: &str,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Amount> {
    let amount = Amount::parse(raw);
    if amount.is_none() {
        violations.push(FieldViolation::new(
            field,
            "Amount must be positive with at most two decimal places",
        ));
    }
    amount
}

/// Mandatory free-text justification attached to every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReason(String);

impl ChangeReason {
    /// Creates a trimmed, non-blank change reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyChangeReason`] when the text is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyChangeReason);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the reason text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated edit: new values, the reason, and who made it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEdit {
    details: TaskDetails,
    reason: ChangeReason,
    editor: UserId,
}

impl TaskEdit {
    /// Creates an edit.
    #[must_use]
    pub const fn new(details: TaskDetails, reason: ChangeReason, editor: UserId) -> Self {
        Self {
            details,
            reason,
            editor,
        }
    }

    /// Returns the submitted values.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the change reason.
    #[must_use]
    pub const fn reason(&self) -> &ChangeReason {
        &self.reason
    }

    /// Returns the editor.
    #[must_use]
    pub const fn editor(&self) -> UserId {
        self.editor
    }

    /// Consumes the edit, returning the submitted values.
    #[must_use]
    pub fn into_details(self) -> TaskDetails {
        self.details
    }
}
