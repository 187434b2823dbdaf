pub mod catalog;
pub mod pricing;
pub mod recommendation;
pub mod submitter;
pub mod time;
pub mod validation;
pub mod wizard;

pub use catalog::CatalogFilter;
pub use pricing::{PriceBreakdown, PricingEngine};
pub use recommendation::{BundleSuggestion, RecommendationEngine};
pub use submitter::BookingSubmitter;
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::{ValidationError, ValidationErrors, ValidationRules};
pub use wizard::{
    Direction, SubmitAttempt, SubmitOutcome, WizardController, WizardDeps, WizardSnapshot,
    WizardState, WizardStep,
};
