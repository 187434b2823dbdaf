//! Interactive terminal front-end. Renders [`WizardSnapshot`]s and forwards
//! user choices to the [`WizardController`]; all booking rules live in `core`.

pub mod output;
pub mod render;

use std::sync::Arc;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use thiserror::Error;

use crate::{
    api::HttpBookingGateway,
    config::{Config, ConfigManager},
    core::{
        CatalogFilter, Clock, SubmitOutcome, SystemClock, WizardController, WizardDeps,
        WizardSnapshot, WizardState, WizardStep,
    },
    domain::{BookingField, FieldUpdate, Service, TimeSlot},
    errors::{StorageError, WizardError},
    storage::{JsonSessionStore, JsonVehicleStore, SessionStore},
};

const USAGE: &str = "Usage: service_booking_cli [--token <access-token>]\n\
     Walks through service selection, vehicle details, scheduling and review.\n\
     Environment:\n  \
     SERVICE_BOOKING_HOME     data directory (default ~/.service_booking)\n  \
     SERVICE_BOOKING_API_URL  booking API base URL";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("{0}")]
    Usage(String),
}

enum Flow {
    Continue,
    Quit,
}

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub help: bool,
    pub token: Option<String>,
}

impl CliOptions {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => options.help = true,
                "--token" => {
                    let token = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--token requires a value".into()))?;
                    options.token = Some(token);
                }
                other => return Err(CliError::Usage(format!("unknown argument `{other}`"))),
            }
        }
        Ok(options)
    }
}

pub fn usage() -> &'static str {
    USAGE
}

pub async fn run_cli(options: CliOptions) -> Result<(), CliError> {
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?.apply_env_overrides();
    let base = manager.base_dir().to_path_buf();

    let session = Arc::new(JsonSessionStore::in_dir(&base));
    if let Some(token) = options.token.as_deref() {
        session.store(token)?;
    }
    let clock = Arc::new(SystemClock);
    let deps = WizardDeps {
        gateway: Arc::new(HttpBookingGateway::from_config(&config)),
        vehicles: Arc::new(JsonVehicleStore::new(
            config.resolve_vehicle_profile_file(&base),
        )),
        session: session.clone(),
        clock: clock.clone(),
    };

    tracing::info!(api = %config.api_base_url, "starting booking wizard");
    let mut controller = WizardController::mount(deps).await;
    let theme = ColorfulTheme::default();

    loop {
        let snapshot = controller.snapshot();
        let flow = match &snapshot.state {
            WizardState::Submitted(id) => {
                output::success(format!("Booking confirmed. Reference: {id}"));
                if Confirm::with_theme(&theme)
                    .with_prompt("Book another service?")
                    .default(false)
                    .interact()?
                {
                    controller.reset()?;
                    Flow::Continue
                } else {
                    Flow::Quit
                }
            }
            WizardState::Step(step) => {
                output::section(render::progress_line(*step));
                output::info(render::readiness_line(snapshot.readiness));
                for message in render::field_errors(&snapshot) {
                    output::error(message);
                }
                match step {
                    WizardStep::Service => service_step(&mut controller, &snapshot, &theme)?,
                    WizardStep::Vehicle => vehicle_step(&mut controller, &snapshot, &theme)?,
                    WizardStep::Schedule => {
                        schedule_step(&mut controller, &snapshot, &theme, clock.as_ref())?
                    }
                    WizardStep::Review => {
                        review_step(&mut controller, &snapshot, &theme, &config, session.as_ref())
                            .await?
                    }
                }
            }
        };
        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

fn service_step(
    controller: &mut WizardController,
    snapshot: &WizardSnapshot,
    theme: &ColorfulTheme,
) -> Result<Flow, CliError> {
    if let Some(err) = &snapshot.catalog_error {
        output::warning(format!("Could not load services: {err}"));
    }
    let recommended: Vec<String> = snapshot
        .recommended_categories
        .iter()
        .map(|category| category.to_string())
        .collect();
    output::info(format!(
        "Recommended for your vehicle: {}",
        recommended.join(", ")
    ));

    let search = prompt_text(theme, "Search services (blank for all)", "")?;
    let filter = CatalogFilter::new().available_only().query(search);
    let available: Vec<Service> = filter
        .apply(controller.catalog())
        .into_iter()
        .cloned()
        .collect();
    if available.is_empty() && !controller.catalog().is_empty() {
        output::warning("No available services match that search.");
        return Ok(Flow::Continue);
    }
    let mut items: Vec<String> = available
        .iter()
        .map(|service| render::service_label(service, snapshot))
        .collect();
    items.push("Quit".into());
    let default = snapshot
        .draft
        .service_id
        .as_deref()
        .and_then(|id| available.iter().position(|service| service.id == id))
        .unwrap_or(0);

    let choice = Select::with_theme(theme)
        .with_prompt("Choose a service")
        .items(&items)
        .default(default)
        .interact()?;
    let Some(service) = available.get(choice) else {
        return Ok(Flow::Quit);
    };
    controller.select_service(&service.id)?;
    try_advance(controller);
    Ok(Flow::Continue)
}

fn vehicle_step(
    controller: &mut WizardController,
    snapshot: &WizardSnapshot,
    theme: &ColorfulTheme,
) -> Result<Flow, CliError> {
    let vehicle = &snapshot.draft.vehicle_info;
    let make = prompt_text(theme, "Make", &vehicle.make)?;
    controller.set_field(FieldUpdate::Make(make))?;
    let model = prompt_text(theme, "Model", &vehicle.model)?;
    controller.set_field(FieldUpdate::Model(model))?;
    let year: i32 = Input::with_theme(theme)
        .with_prompt("Year")
        .default(vehicle.year)
        .interact_text()?;
    controller.set_field(FieldUpdate::Year(year))?;
    let plate = prompt_text(theme, "License plate", &vehicle.license_plate)?;
    controller.set_field(FieldUpdate::LicensePlate(plate))?;
    let color = prompt_text(theme, "Color (optional)", vehicle.color.as_deref().unwrap_or(""))?;
    controller.set_field(FieldUpdate::Color(Some(color)))?;

    navigate(controller, theme, WizardStep::Service)
}

fn schedule_step(
    controller: &mut WizardController,
    snapshot: &WizardSnapshot,
    theme: &ColorfulTheme,
    clock: &dyn Clock,
) -> Result<Flow, CliError> {
    let today = clock.today();
    let initial = snapshot
        .draft
        .booking_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let raw: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
                Ok(date) if date < today => Err("Pick today or a later date".into()),
                Ok(_) => Ok(()),
                Err(_) => Err("Use the YYYY-MM-DD format".into()),
            }
        })
        .interact_text()?;
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok();
    controller.set_field(FieldUpdate::BookingDate(date))?;

    let slots: Vec<TimeSlot> = TimeSlot::offered().collect();
    let labels: Vec<String> = slots.iter().map(TimeSlot::to_string).collect();
    let default = snapshot
        .draft
        .time_slot
        .and_then(|current| slots.iter().position(|slot| *slot == current))
        .unwrap_or(0);
    let choice = Select::with_theme(theme)
        .with_prompt("Time slot")
        .items(&labels)
        .default(default)
        .interact()?;
    controller.set_field(FieldUpdate::TimeSlot(slots.get(choice).copied()))?;

    let notes = prompt_text(theme, "Notes for the technician (optional)", &snapshot.draft.notes)?;
    controller.set_field(FieldUpdate::Notes(notes))?;

    navigate(controller, theme, WizardStep::Vehicle)
}

async fn review_step(
    controller: &mut WizardController,
    snapshot: &WizardSnapshot,
    theme: &ColorfulTheme,
    config: &Config,
    session: &dyn SessionStore,
) -> Result<Flow, CliError> {
    for line in render::summary_lines(snapshot, &config.currency) {
        println!("  {line}");
    }
    output::separator();
    if let Some(line) = render::bundle_line(snapshot, &config.currency) {
        output::info(line);
    }
    if let Some(message) = snapshot.error_for(BookingField::Submission) {
        output::error(format!("Submission failed: {message}"));
    }

    let items = [
        "Confirm booking",
        "Change service",
        "Change vehicle",
        "Change schedule",
        "Quit",
    ];
    let choice = Select::with_theme(theme)
        .with_prompt("Review your booking")
        .items(&items)
        .default(0)
        .interact()?;
    match choice {
        0 => {
            controller.dismiss_submission_error();
            output::info("Submitting booking...");
            let outcome = controller.submit().await?;
            if let Some((kind, message)) = render::submit_notice(&outcome) {
                output::print(kind, message);
            }
            if let SubmitOutcome::SessionExpired = outcome {
                controller.take_sign_in_redirect();
                let token = prompt_text(theme, "Access token", "")?;
                if !token.trim().is_empty() {
                    session.store(&token)?;
                }
            }
            Ok(Flow::Continue)
        }
        1 => back_to(controller, WizardStep::Service),
        2 => back_to(controller, WizardStep::Vehicle),
        3 => back_to(controller, WizardStep::Schedule),
        _ => Ok(Flow::Quit),
    }
}

fn navigate(
    controller: &mut WizardController,
    theme: &ColorfulTheme,
    previous: WizardStep,
) -> Result<Flow, CliError> {
    let items = ["Continue", "Back", "Quit"];
    let choice = Select::with_theme(theme)
        .items(&items)
        .default(0)
        .interact()?;
    match choice {
        0 => {
            try_advance(controller);
            Ok(Flow::Continue)
        }
        1 => back_to(controller, previous),
        _ => Ok(Flow::Quit),
    }
}

fn back_to(controller: &mut WizardController, target: WizardStep) -> Result<Flow, CliError> {
    controller.retreat(target)?;
    Ok(Flow::Continue)
}

/// Blocked transitions are shown on the next render via the snapshot errors.
fn try_advance(controller: &mut WizardController) {
    if let Err(err) = controller.advance() {
        tracing::debug!(error = %err, "advance blocked");
    }
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}
