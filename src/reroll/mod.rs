pub mod batch;
pub mod controller;
pub mod eligibility;
pub mod engine;

pub use batch::{ExchangeBatch, RerollReport, BATCH_SIZE};
pub use controller::{Eligibility, RerollController, RerollState};
pub use eligibility::{EligibilityFilter, EligibilityPolicy, Exclusion};
pub use engine::{ExchangeExecutor, ExchangeOutcome, OutcomeSource, ReceivedItem};
