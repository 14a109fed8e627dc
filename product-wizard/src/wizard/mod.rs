//! Wizard state machine

mod controller;
mod outcome;
mod payload;
mod step;

pub use controller::{WizardController, WizardState};
pub use outcome::{Notice, NoticeLevel, SubmitOutcome};
pub use payload::build_payload;
pub use step::WizardStep;
