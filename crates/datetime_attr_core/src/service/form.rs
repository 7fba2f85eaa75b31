//! Form submission use case.
//!
//! # Responsibility
//! - Assign submitted `(field, value)` pairs to generated accessors in order.
//! - Run the pre-validation clear rule, then the validity check.
//!
//! # Invariants
//! - Raw `_date_value`/`_time_value` fields never abort a submission; their
//!   failures surface as validation errors.
//! - Fields that no declared attribute generates are skipped and reported.

use log::{debug, info};

use crate::attribute::{DateTimeAttributes, DateTimeHost, ValidationErrors};
use crate::error::{DateTimeError, DateTimeResult};
use crate::model::event::{Event, EventError};

/// Outcome of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub errors: ValidationErrors,
    /// Submitted field names with no generated accessor, in submission order.
    pub ignored_fields: Vec<String>,
}

impl FormSubmission {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Applies form params to `host` and validates the result.
///
/// # Errors
/// - Parse or zone errors of the strict setters (`_date`, `_time`,
///   `_time_zone` and the combined field).
pub fn submit_form<H, I, K, V>(
    attributes: &DateTimeAttributes<H>,
    host: &mut H,
    params: I,
) -> DateTimeResult<FormSubmission>
where
    H: DateTimeHost,
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut submission = FormSubmission::default();
    for (field, value) in params {
        let field = field.as_ref();
        match attributes.assign(host, field, value.as_ref().map(AsRef::as_ref)) {
            Ok(()) => {}
            Err(DateTimeError::UnknownField(name)) => {
                debug!(
                    "event=form_field_skip module=service status=ok field={}",
                    name
                );
                submission.ignored_fields.push(name);
            }
            Err(err) => return Err(err),
        }
    }

    submission.errors = attributes.validate(host)?;
    info!(
        "event=form_submit module=service status={} errors={} ignored={}",
        if submission.is_valid() { "ok" } else { "invalid" },
        submission.errors.len(),
        submission.ignored_fields.len()
    );
    Ok(submission)
}

/// Submits a form to an event, then checks its window.
///
/// Field-level failures come back in the submission; a reversed window is an
/// error because it spans two attributes.
pub fn submit_event_form<I, K, V>(
    event: &mut Event,
    params: I,
) -> Result<FormSubmission, EventError>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let submission = submit_form(Event::attributes()?, event, params)?;
    if submission.is_valid() {
        event.check_window()?;
    }
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::submit_form;
    use crate::attribute::{AttributeOptions, DateTimeAttributes, ValidationFailure};
    use crate::model::event::Event;

    #[test]
    fn skips_unknown_fields_and_reports_invalid_raw_input() {
        let attributes = DateTimeAttributes::<Event>::declared(
            ["starts_at"],
            AttributeOptions::new().time_zone("UTC"),
        )
        .expect("declaration");
        let mut event = Event::new("planning");

        let submission = submit_form(
            &attributes,
            &mut event,
            [
                ("title", Some("ignored")),
                ("starts_at_date_value", Some("2024-13-45")),
                ("starts_at_time_value", Some("09:15")),
            ],
        )
        .expect("raw fields never abort");

        assert_eq!(submission.ignored_fields, vec!["title".to_string()]);
        assert!(!submission.is_valid());
        assert_eq!(
            submission.errors.get("starts_at"),
            &[ValidationFailure::InvalidDate]
        );
        assert_eq!(event.starts_at, None);
    }
}
