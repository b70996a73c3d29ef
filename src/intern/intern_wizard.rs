//! Server-side rules for the three-step add/edit intern wizard.
//!
//! Each step owns a set of fields. A step is valid when none of its fields
//! have errors; the review step re-checks every earlier step so a draft can
//! never be submitted with a gap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Personal,
    Professional,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Personal,
        WizardStep::Professional,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::Personal => 0,
            WizardStep::Professional => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn next(self) -> Self {
        let idx = (self.index() + 1).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    /// Progress bar value in percent for a wizard sitting on this step; the
    /// current step counts as reached.
    pub fn progress(self) -> f64 {
        let steps = Self::ALL.len() as f64;
        ((self.index() + 1) as f64 / steps * 100.0).round()
    }
}

/// Partially filled intern form. Every field is optional while drafting.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InternDraft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub university: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

pub type FieldErrors = BTreeMap<String, String>;

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// True when some whitespace-free run of the value reads `x@y.z`, each part
/// non-empty. Anything around that run is ignored.
pub fn looks_like_email(value: &str) -> bool {
    value.split_whitespace().any(|word| {
        word.match_indices('@').any(|(at, _)| {
            let domain = &word[at + 1..];
            at > 0
                && domain
                    .match_indices('.')
                    .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
        })
    })
}

fn validate_personal(draft: &InternDraft, errors: &mut FieldErrors) {
    if blank(&draft.full_name) {
        errors.insert("full_name".into(), "Name is required".into());
    }

    match draft.email.as_deref().map(str::trim) {
        None | Some("") => {
            errors.insert("email".into(), "Email is required".into());
        }
        Some(email) if !looks_like_email(email) => {
            errors.insert("email".into(), "Email is invalid".into());
        }
        Some(_) => {}
    }

    if blank(&draft.phone) {
        errors.insert("phone".into(), "Phone is required".into());
    }
}

fn validate_professional(draft: &InternDraft, errors: &mut FieldErrors) {
    if blank(&draft.department) {
        errors.insert("department".into(), "Department is required".into());
    }
}

/// Field errors for one step of the draft; empty when the step is valid.
pub fn validate_step(draft: &InternDraft, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        WizardStep::Personal => validate_personal(draft, &mut errors),
        WizardStep::Professional => validate_professional(draft, &mut errors),
        WizardStep::Review => {
            validate_personal(draft, &mut errors);
            validate_professional(draft, &mut errors);
        }
    }
    errors
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WizardValidateRequest {
    pub step: WizardStep,
    pub draft: InternDraft,
    /// Intern being edited, so its own email is not reported as taken.
    pub intern_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WizardValidateResponse {
    pub step: WizardStep,
    pub valid: bool,
    pub errors: FieldErrors,
    /// Step to show next: unchanged when invalid, clamped at review.
    pub next_step: WizardStep,
    pub progress: f64,
}

impl WizardValidateResponse {
    pub fn from_errors(step: WizardStep, errors: FieldErrors) -> Self {
        let valid = errors.is_empty();
        let next_step = if valid { step.next() } else { step };
        Self {
            step,
            valid,
            errors,
            next_step,
            progress: next_step.progress(),
        }
    }
}
