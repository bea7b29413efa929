use tracing::{debug, info};

use crate::errors::ValidationError;
use crate::store::{PlanHandle, PlanStore};
use crate::wire::{PlanRecord, PlanStatus};

/// A plan record whose status is `validated`.
///
/// Only [`validate`] constructs one, so holding this type is proof that the
/// record passed the section check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPlan(PlanRecord);

impl ValidatedPlan {
    pub fn record(&self) -> &PlanRecord {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOk {
    pub plan: ValidatedPlan,
}

/// Check the persisted plan behind `handle` and mark it validated.
///
/// A rejected plan is left on disk exactly as it was, still
/// `pending_validation`, so it can be corrected and validated again.
pub fn validate(store: &PlanStore, handle: &PlanHandle) -> Result<ValidationOk, ValidationError> {
    let mut record = store.load(handle)?;

    if let Some(section) = record.plan.first_empty_section() {
        debug!(path = %handle.path().display(), section, "plan rejected");
        return Err(ValidationError::MissingSection(section));
    }

    if record.status != PlanStatus::Validated {
        record.status = PlanStatus::Validated;
        store.overwrite(handle, &record)?;
        info!(path = %handle.path().display(), "plan validated");
    }

    Ok(ValidationOk { plan: ValidatedPlan(record) })
}
