//! Lease domain: billing frequencies, term arithmetic, schedules, and the wizard and
//! payment drafts built on top of them.

pub mod frequency;
pub mod payment;
pub mod schedule;
pub mod term;
pub mod wizard;

pub use frequency::Frequency;
pub use payment::{PaymentDraft, PaymentMethod};
pub use schedule::{
    sum_outstanding_balance, LeaseListItem, LeaseStatusFilter, ScheduleItem, ScheduleStatus,
    ScheduleSummary,
};
pub use term::{compute_end_date, end_date_from_input, extend_end_date, parse_count, LeaseTerm};
pub use wizard::{transition, LeaseDraft, LeaseWizard, WizardEvent, WizardStep};
