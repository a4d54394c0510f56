//! Lease creation wizard.
//!
//! Progress is an explicit [`WizardStep`] driven by the pure [`transition`] function. The
//! draft's end date is a projection of start, frequency and count, so it cannot drift out
//! of sync with them.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::{
    term::{compute_end_date, count_value, parse_count},
    Frequency, LeaseTerm,
};
use crate::{
    config::Config,
    errors::{LeaseError, Result},
    rpc::CreateLeaseParams,
    utils::datetime::{format_local_minute, format_timestamp, parse_wall_clock},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectProperty,
    SelectTenant,
    DefineTerms,
    Submitted { lease_id: Option<i64> },
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::SelectProperty => "Property",
            WizardStep::SelectTenant => "Tenant",
            WizardStep::DefineTerms => "Terms",
            WizardStep::Submitted { .. } => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Back,
    Submit { lease_id: Option<i64> },
    Reset,
}

/// Raw form values collected by the wizard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeaseDraft {
    pub property_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub start: String,
    pub frequency: Frequency,
    pub payment_count: String,
    pub rent_amount: String,
}

impl LeaseDraft {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    /// Derived inclusive end date; `None` while the inputs are incomplete.
    pub fn end(&self) -> Option<NaiveDateTime> {
        let start = parse_wall_clock(&self.start)?;
        let count = match parse_count(&self.payment_count) {
            Ok(count) => count?,
            Err(err) => {
                warn!("lease draft end date not computable: {}", err);
                return None;
            }
        };
        match compute_end_date(start, self.frequency, count) {
            Ok(end) => end,
            Err(err) => {
                warn!("lease draft end date not computable: {}", err);
                None
            }
        }
    }

    /// The validated term, available once the count is a whole number of periods.
    pub fn term(&self) -> Option<LeaseTerm> {
        let start = parse_wall_clock(&self.start)?;
        LeaseTerm::new(start, self.frequency, self.whole_count()?).ok()
    }

    pub fn terms_complete(&self) -> bool {
        self.property_id.is_some()
            && self.tenant_id.is_some()
            && self.end().is_some()
            && self.whole_count().is_some()
            && self.rent().is_some()
    }

    /// Whether the "next" (or "create") action is enabled on `step`.
    pub fn can_advance(&self, step: &WizardStep) -> bool {
        match step {
            WizardStep::SelectProperty => self.property_id.is_some(),
            WizardStep::SelectTenant => self.tenant_id.is_some(),
            WizardStep::DefineTerms => self.terms_complete(),
            WizardStep::Submitted { .. } => false,
        }
    }

    pub fn to_create_params(&self, created_at: NaiveDateTime) -> Result<CreateLeaseParams> {
        let incomplete = || LeaseError::InvalidInput("lease terms are incomplete".into());
        if !self.terms_complete() {
            return Err(incomplete());
        }
        let (Some(property_id), Some(tenant_id), Some(term), Some(rent_amount)) =
            (self.property_id, self.tenant_id, self.term(), self.rent())
        else {
            return Err(incomplete());
        };
        Ok(CreateLeaseParams {
            property_id,
            tenant_id,
            start_date: format_local_minute(term.start()),
            end_date: format_local_minute(term.end()?),
            rent_amount,
            frequency: term.frequency(),
            created_at: format_timestamp(created_at),
        })
    }

    fn whole_count(&self) -> Option<u32> {
        count_value(&self.payment_count)
            .filter(|value| value.fract() == 0.0 && *value <= f64::from(u32::MAX))
            .map(|value| value as u32)
    }

    fn rent(&self) -> Option<f64> {
        self.rent_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
    }
}

/// Next wizard step for `event`. Guarded moves that are not allowed leave `step` unchanged.
pub fn transition(step: WizardStep, event: WizardEvent, draft: &LeaseDraft) -> WizardStep {
    match (step, event) {
        (WizardStep::SelectProperty, WizardEvent::Next) if draft.can_advance(&step) => {
            WizardStep::SelectTenant
        }
        (WizardStep::SelectTenant, WizardEvent::Next) if draft.can_advance(&step) => {
            WizardStep::DefineTerms
        }
        (WizardStep::DefineTerms, WizardEvent::Submit { lease_id }) if draft.can_advance(&step) => {
            WizardStep::Submitted { lease_id }
        }
        (WizardStep::SelectTenant, WizardEvent::Back) => WizardStep::SelectProperty,
        (WizardStep::DefineTerms, WizardEvent::Back) => WizardStep::SelectTenant,
        (WizardStep::Submitted { .. }, WizardEvent::Reset) => WizardStep::SelectProperty,
        (unchanged, _) => unchanged,
    }
}

/// Wizard instance: the current step plus the draft being edited.
#[derive(Debug, Clone)]
pub struct LeaseWizard {
    step: WizardStep,
    draft: LeaseDraft,
    default_frequency: Frequency,
}

impl LeaseWizard {
    pub fn new(default_frequency: Frequency) -> Self {
        Self {
            step: WizardStep::SelectProperty,
            draft: LeaseDraft::new(default_frequency),
            default_frequency,
        }
    }

    /// Starts a wizard whose frequency, now and after every reset, comes from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.default_frequency)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &LeaseDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LeaseDraft {
        &mut self.draft
    }

    pub fn can_advance(&self) -> bool {
        self.draft.can_advance(&self.step)
    }

    pub fn apply(&mut self, event: WizardEvent) -> WizardStep {
        let next = transition(self.step, event, &self.draft);
        if next != self.step {
            debug!(from = self.step.label(), to = next.label(), "lease wizard step");
            if event == WizardEvent::Reset {
                self.draft = LeaseDraft::new(self.default_frequency);
            }
        }
        self.step = next;
        next
    }

    /// Submits the draft through `create` and moves to the final step on success.
    ///
    /// On failure the wizard stays on the terms step with the draft intact.
    pub fn submit_with<F>(&mut self, created_at: NaiveDateTime, create: F) -> Result<i64>
    where
        F: FnOnce(&CreateLeaseParams) -> Result<i64>,
    {
        if self.step != WizardStep::DefineTerms {
            return Err(LeaseError::InvalidInput(format!(
                "cannot submit from the {} step",
                self.step.label()
            )));
        }
        let params = self.draft.to_create_params(created_at)?;
        let lease_id = create(&params)?;
        self.apply(WizardEvent::Submit {
            lease_id: Some(lease_id),
        });
        Ok(lease_id)
    }
}
