// ABOUTME: Quote wizard core - store, step graph, validation gate, promotion engine and navigation
// Everything here is UI-agnostic; the terminal front-end in app/ drives it

pub mod navigation;
pub mod promotions;
pub mod steps;
pub mod storage;
pub mod store;
pub mod timer;
pub mod validation;

pub use navigation::{QuoteWizard, WizardPhase, WizardTiming};
pub use promotions::{analyze, Opportunity, OpportunityKind, PromotionRules};
pub use steps::{build_steps, first_step, Step};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::QuoteStore;
pub use timer::TransitionKind;
pub use validation::{validate, ValidationError};
