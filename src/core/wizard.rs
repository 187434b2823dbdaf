use std::{fmt, sync::Arc};

use serde::Serialize;

use crate::{
    api::BookingGateway,
    core::{
        pricing::{PriceBreakdown, PricingEngine},
        recommendation::{BundleSuggestion, RecommendationEngine},
        submitter::BookingSubmitter,
        time::Clock,
        validation::{ValidationError, ValidationErrors, ValidationRules},
    },
    domain::{
        BookingDraft, BookingField, BookingId, BookingRequest, FieldUpdate, Service,
        ServiceCategory,
    },
    errors::{SubmitError, WizardError},
    storage::{SessionStore, VehicleProfileStore},
};

/// Ordered wizard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WizardStep {
    Service = 1,
    Vehicle = 2,
    Schedule = 3,
    Review = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Service,
        WizardStep::Vehicle,
        WizardStep::Schedule,
        WizardStep::Review,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<WizardStep> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Following step; the review step is the last one.
    pub fn next(self) -> WizardStep {
        Self::from_number(self.number() + 1).unwrap_or(WizardStep::Review)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Service => "Service",
            WizardStep::Vehicle => "Vehicle",
            WizardStep::Schedule => "Schedule",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WizardState {
    Step(WizardStep),
    Submitted(BookingId),
}

/// Last navigation direction, kept for transition animations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of trying to start a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// The request is in flight; report the gateway result via `complete_submit`.
    Dispatched(BookingRequest),
    /// A previous submission is still pending.
    InFlight,
    Blocked(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(BookingId),
    /// Nothing was sent because a submission is already pending.
    Ignored,
    Blocked(ValidationErrors),
    /// Banner-worthy failure; the draft is kept for a retry.
    Failed(SubmitError),
    /// The session token was rejected and cleared; the UI should route to sign-in.
    SessionExpired,
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub state: WizardState,
    pub draft: BookingDraft,
    pub errors: Vec<(BookingField, String)>,
    pub pending: bool,
    pub direction: Option<Direction>,
    pub selected_service: Option<Service>,
    pub price: PriceBreakdown,
    pub recommended_categories: [ServiceCategory; 2],
    pub bundle: Option<BundleSuggestion>,
    pub readiness: u8,
    pub catalog_error: Option<String>,
    pub redirect_to_sign_in: bool,
}

impl WizardSnapshot {
    pub fn step(&self) -> Option<WizardStep> {
        match self.state {
            WizardState::Step(step) => Some(step),
            WizardState::Submitted(_) => None,
        }
    }

    pub fn error_for(&self, field: BookingField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| message.as_str())
    }
}

/// Collaborators injected into the controller.
#[derive(Clone)]
pub struct WizardDeps {
    pub gateway: Arc<dyn BookingGateway>,
    pub vehicles: Arc<dyn VehicleProfileStore>,
    pub session: Arc<dyn SessionStore>,
    pub clock: Arc<dyn Clock>,
}

/// State machine behind the booking wizard. Owns the draft exclusively.
pub struct WizardController {
    state: WizardState,
    draft: BookingDraft,
    errors: ValidationErrors,
    pending: bool,
    direction: Option<Direction>,
    catalog: Vec<Service>,
    catalog_error: Option<String>,
    redirect_to_sign_in: bool,
    submitter: BookingSubmitter,
    deps: WizardDeps,
}

impl WizardController {
    /// Starts at the service step, prefilling the vehicle from the saved profile.
    pub fn new(deps: WizardDeps) -> Self {
        let draft = match deps.vehicles.load() {
            Some(vehicle) => {
                tracing::debug!("prefilling vehicle from saved profile");
                BookingDraft::with_vehicle(vehicle)
            }
            None => BookingDraft::new(deps.clock.current_year()),
        };
        Self {
            state: WizardState::Step(WizardStep::Service),
            draft,
            errors: ValidationErrors::new(),
            pending: false,
            direction: None,
            catalog: Vec::new(),
            catalog_error: None,
            redirect_to_sign_in: false,
            submitter: BookingSubmitter::new(deps.gateway.clone()),
            deps,
        }
    }

    /// Builds the controller and fetches the catalog once.
    pub async fn mount(deps: WizardDeps) -> Self {
        let mut controller = Self::new(deps);
        controller.load_catalog().await;
        controller
    }

    pub async fn load_catalog(&mut self) {
        match self.deps.gateway.fetch_services().await {
            Ok(services) => {
                tracing::debug!(count = services.len(), "service catalog loaded");
                self.set_catalog(services);
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = %err.kind, "failed to load service catalog");
                self.catalog_error = Some(err.message);
            }
        }
    }

    /// Replaces the catalog, dropping entries with a negative price or no duration.
    pub fn set_catalog(&mut self, services: Vec<Service>) {
        let (valid, rejected): (Vec<_>, Vec<_>) =
            services.into_iter().partition(Service::is_well_formed);
        for service in &rejected {
            tracing::warn!(
                service_id = %service.id,
                price = %service.price,
                duration = service.duration,
                "dropping malformed catalog entry"
            );
        }
        self.catalog = valid;
        self.catalog_error = None;
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        match self.state {
            WizardState::Step(step) => Some(step),
            WizardState::Submitted(_) => None,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn catalog(&self) -> &[Service] {
        &self.catalog
    }

    pub fn selected_service(&self) -> Option<&Service> {
        let id = self.draft.service_id.as_deref()?;
        self.catalog.iter().find(|service| service.id == id)
    }

    /// Applies one edit and clears that field's error.
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let field = self.draft.apply(update);
        self.errors.remove(field);
        Ok(())
    }

    /// Selects a catalog entry; unavailable services are refused.
    pub fn select_service(&mut self, service_id: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let service = self
            .catalog
            .iter()
            .find(|service| service.id == service_id)
            .ok_or_else(|| WizardError::UnknownService(service_id.to_string()))?;
        if !service.is_available {
            return Err(WizardError::ServiceUnavailable(service.name.clone()));
        }
        self.set_field(FieldUpdate::ServiceId(Some(service_id.to_string())))
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.step_or_finished()?;
        let errors = ValidationRules::validate(current, &self.draft);
        if !errors.is_empty() {
            tracing::debug!(step = %current, errors = errors.len(), "advance blocked");
            self.errors = errors.clone();
            return Err(WizardError::Validation(errors));
        }
        self.errors.clear();
        let next = current.next();
        self.state = WizardState::Step(next);
        self.direction = Some(Direction::Forward);
        tracing::debug!(from = %current, to = %next, "advanced");
        Ok(next)
    }

    /// Jumps back to an earlier step without re-validating.
    pub fn retreat(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        let current = self.step_or_finished()?;
        if target >= current {
            return Err(WizardError::InvalidRetreat {
                from: current,
                to: target,
            });
        }
        self.state = WizardState::Step(target);
        self.direction = Some(Direction::Backward);
        tracing::debug!(from = %current, to = %target, "retreated");
        Ok(target)
    }

    /// First half of a submission: validates, packages and marks the request pending.
    pub fn begin_submit(&mut self) -> Result<SubmitAttempt, WizardError> {
        match self.state {
            WizardState::Step(WizardStep::Review) => {}
            WizardState::Step(_) => return Err(WizardError::NotAtReview),
            WizardState::Submitted(_) => return Err(WizardError::Finished),
        }
        if self.pending {
            tracing::debug!("submission already in flight; ignoring");
            return Ok(SubmitAttempt::InFlight);
        }

        let mut errors = ValidationRules::validate_for_submission(&self.draft);
        let service = self.selected_service().cloned();
        if service.is_none() && !errors.contains(BookingField::ServiceId) {
            errors.insert(BookingField::ServiceId, ValidationError::MissingService);
        }
        let request = match service {
            Some(service) if errors.is_empty() => BookingSubmitter::package(&self.draft, &service),
            _ => Err(errors),
        };
        match request {
            Ok(request) => {
                self.errors.remove(BookingField::Submission);
                self.redirect_to_sign_in = false;
                self.pending = true;
                Ok(SubmitAttempt::Dispatched(request))
            }
            Err(errors) => {
                self.errors = errors.clone();
                Ok(SubmitAttempt::Blocked(errors))
            }
        }
    }

    /// Second half of a submission: reacts to the gateway's answer.
    ///
    /// Only meaningful after `begin_submit` dispatched a request; otherwise the
    /// result is dropped and `Ignored` is returned.
    pub fn complete_submit(&mut self, result: Result<BookingId, SubmitError>) -> SubmitOutcome {
        if !self.pending {
            tracing::debug!("no submission in flight; ignoring completion");
            return SubmitOutcome::Ignored;
        }
        self.pending = false;
        match result {
            Ok(id) => {
                if let Err(err) = self.deps.vehicles.save(&self.draft.vehicle_info) {
                    tracing::warn!(error = %err, "failed to save vehicle profile");
                }
                tracing::info!(booking_id = %id, "booking submitted");
                self.errors.clear();
                self.state = WizardState::Submitted(id.clone());
                SubmitOutcome::Submitted(id)
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("booking rejected as unauthorized; clearing session");
                if let Err(clear_err) = self.deps.session.clear() {
                    tracing::warn!(error = %clear_err, "failed to clear session token");
                }
                self.redirect_to_sign_in = true;
                SubmitOutcome::SessionExpired
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind, error = %err, "booking submission failed");
                self.errors.insert(
                    BookingField::Submission,
                    ValidationError::SubmissionFailed(err.message.clone()),
                );
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        let request = match self.begin_submit()? {
            SubmitAttempt::Dispatched(request) => request,
            SubmitAttempt::InFlight => return Ok(SubmitOutcome::Ignored),
            SubmitAttempt::Blocked(errors) => return Ok(SubmitOutcome::Blocked(errors)),
        };
        let token = self.deps.session.token();
        let result = self.submitter.send(&request, token.as_deref()).await;
        Ok(self.complete_submit(result))
    }

    /// Starts a fresh booking after a successful submission.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if !matches!(self.state, WizardState::Submitted(_)) {
            return Err(WizardError::NotSubmitted);
        }
        self.draft = BookingDraft::new(self.deps.clock.current_year());
        self.state = WizardState::Step(WizardStep::Service);
        self.errors.clear();
        self.direction = None;
        self.redirect_to_sign_in = false;
        Ok(())
    }

    /// Hides the submission-failure banner.
    pub fn dismiss_submission_error(&mut self) {
        self.errors.remove(BookingField::Submission);
    }

    /// Returns and resets the sign-in redirect signal.
    pub fn take_sign_in_redirect(&mut self) -> bool {
        std::mem::take(&mut self.redirect_to_sign_in)
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let selected = self.selected_service();
        WizardSnapshot {
            state: self.state.clone(),
            draft: self.draft.clone(),
            errors: self
                .errors
                .iter()
                .map(|(field, error)| (field, error.to_string()))
                .collect(),
            pending: self.pending,
            direction: self.direction,
            selected_service: selected.cloned(),
            price: PricingEngine::price(selected),
            recommended_categories: RecommendationEngine::recommended_categories(
                self.draft.vehicle_info.year,
                self.deps.clock.current_year(),
            ),
            bundle: RecommendationEngine::bundle_suggestion(selected, &self.catalog),
            readiness: RecommendationEngine::readiness_score(&self.draft),
            catalog_error: self.catalog_error.clone(),
            redirect_to_sign_in: self.redirect_to_sign_in,
        }
    }

    fn step_or_finished(&self) -> Result<WizardStep, WizardError> {
        self.current_step().ok_or(WizardError::Finished)
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        self.step_or_finished().map(|_| ())
    }
}
