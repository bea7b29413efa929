use tracing::{debug, warn};

use crate::errors::{CompositionError, Stage};
use crate::plan::{self, UserInput, ValidatedPlan};
use crate::prompt;
use crate::store::{PlanHandle, PlanStore};
use crate::wire::{Mode, PlanRecord};
use crate::xml;

pub const PLAN_HEADER: &str = "\n\nPLAN DETALLADO:";
pub const XML_HEADER: &str = "\n\nESTRUCTURA XML:";

/// Pipeline position. Each state owns what the next step needs.
#[derive(Debug)]
enum State {
    Start(String),
    PlanBuilt(UserInput, PlanRecord),
    PlanPersisted(UserInput, PlanHandle),
    PlanValidated(UserInput, ValidatedPlan),
    XmlProjected {
        input: UserInput,
        plan: ValidatedPlan,
        projection: String,
    },
    Composed(String),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Start(_) => "start",
            State::PlanBuilt(..) => "plan_built",
            State::PlanPersisted(..) => "plan_persisted",
            State::PlanValidated(..) => "plan_validated",
            State::XmlProjected { .. } => "xml_projected",
            State::Composed(_) => "composed",
        }
    }
}

/// Turns user text into the final prompt: build, persist, validate, project, join.
///
/// Composition is all-or-nothing: any failing stage yields a
/// [`CompositionError`] and no text.
#[derive(Debug, Clone)]
pub struct Composer {
    store: PlanStore,
    build: PlanBuilder,
}

/// Produces the pending plan for a run.
pub type PlanBuilder = fn(&UserInput, Mode) -> PlanRecord;

impl Composer {
    pub fn new(store: PlanStore) -> Self {
        Self::with_builder(store, plan::build_plan)
    }

    /// Use a different plan builder. Whatever it returns still goes through
    /// persistence and validation before it can be composed.
    pub fn with_builder(store: PlanStore, build: PlanBuilder) -> Self {
        Self { store, build }
    }

    pub fn compose(&self, user_input: &str, mode: Mode) -> Result<String, CompositionError> {
        let mut state = State::Start(user_input.to_string());
        loop {
            state = match state {
                State::Composed(text) => return Ok(text),
                other => {
                    let from = other.name();
                    let next = self.step(other, mode).map_err(|e| {
                        warn!(stage = %e.stage, error = %e.cause, "prompt composition failed");
                        e
                    })?;
                    debug!(from, to = next.name(), "compose transition");
                    next
                }
            };
        }
    }

    fn step(&self, state: State, mode: Mode) -> Result<State, CompositionError> {
        let next = match state {
            State::Start(raw) => {
                let input = UserInput::parse(&raw).map_err(|e| CompositionError::new(Stage::Input, e))?;
                let record = (self.build)(&input, mode);
                State::PlanBuilt(input, record)
            }
            State::PlanBuilt(input, record) => {
                let handle = self
                    .store
                    .save(&record)
                    .map_err(|e| CompositionError::new(Stage::Persist, e))?;
                if mode == Mode::Debug {
                    self.store
                        .save_debug_narrative(&record)
                        .map_err(|e| CompositionError::new(Stage::Persist, e))?;
                }
                State::PlanPersisted(input, handle)
            }
            State::PlanPersisted(input, handle) => {
                let ok = plan::validate(&self.store, &handle)
                    .map_err(|e| CompositionError::new(Stage::Validate, e))?;
                State::PlanValidated(input, ok.plan)
            }
            State::PlanValidated(input, plan) => {
                let projection =
                    xml::project(&plan).map_err(|e| CompositionError::new(Stage::Project, e))?;
                State::XmlProjected { input, plan, projection }
            }
            State::XmlProjected { input, plan, projection } => {
                let dump = xml::plan_dump(&plan).map_err(|e| CompositionError::new(Stage::Project, e))?;
                let parts = [
                    prompt::render(plan.record().mode(), input.as_str()),
                    PLAN_HEADER.to_string(),
                    dump.trim().to_string(),
                    XML_HEADER.to_string(),
                    projection.trim().to_string(),
                ];
                State::Composed(parts.join("\n"))
            }
            State::Composed(text) => State::Composed(text),
        };
        Ok(next)
    }
}
