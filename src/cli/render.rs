use rust_decimal::Decimal;

use crate::{
    cli::output::MessageKind,
    core::{SubmitOutcome, WizardSnapshot, WizardStep},
    domain::{BookingField, Service},
};

/// `Service > Vehicle > [Schedule] > Review` with the current step bracketed.
pub fn progress_line(current: WizardStep) -> String {
    WizardStep::ALL
        .iter()
        .map(|step| {
            if *step == current {
                format!("[{}]", step.title())
            } else {
                step.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn format_money(amount: Decimal, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        other => format!("{:.2} {}", amount, other),
    }
}

/// Menu label for a catalog entry, starred when its category is recommended.
pub fn service_label(service: &Service, snapshot: &WizardSnapshot) -> String {
    let marker = if snapshot.recommended_categories.contains(&service.category) {
        "* "
    } else {
        "  "
    };
    format!("{marker}{service}")
}

pub fn field_errors(snapshot: &WizardSnapshot) -> Vec<String> {
    snapshot
        .errors
        .iter()
        .filter(|(field, _)| *field != BookingField::Submission)
        .map(|(field, message)| format!("{field}: {message}"))
        .collect()
}

/// Review-page summary lines.
pub fn summary_lines(snapshot: &WizardSnapshot, currency: &str) -> Vec<String> {
    let draft = &snapshot.draft;
    let mut lines = Vec::new();
    match &snapshot.selected_service {
        Some(service) => lines.push(format!(
            "Service:  {} ({} min)",
            service.name, service.duration
        )),
        None => lines.push("Service:  (none selected)".to_string()),
    }
    lines.push(format!("Vehicle:  {}", draft.vehicle_info));
    let date = draft
        .booking_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into());
    let slot = draft
        .time_slot
        .map(|slot| slot.to_string())
        .unwrap_or_else(|| "-".into());
    lines.push(format!("When:     {date} at {slot}"));
    if draft.has_notes() {
        lines.push(format!("Notes:    {}", draft.notes.trim()));
    }
    lines.push(format!(
        "Subtotal: {}",
        format_money(snapshot.price.subtotal, currency)
    ));
    lines.push(format!("Tax:      {}", format_money(snapshot.price.tax, currency)));
    lines.push(format!(
        "Total:    {}",
        format_money(snapshot.price.total, currency)
    ));
    lines
}

pub fn bundle_line(snapshot: &WizardSnapshot, currency: &str) -> Option<String> {
    snapshot.bundle.as_ref().map(|bundle| {
        format!(
            "Add {} and save about {} on the pair",
            bundle.service.name,
            format_money(bundle.estimated_discount, currency)
        )
    })
}

/// Immediate notice after a submit attempt. Failures are left to the
/// review banner rendered from the snapshot.
pub fn submit_notice(outcome: &SubmitOutcome) -> Option<(MessageKind, String)> {
    match outcome {
        SubmitOutcome::Blocked(errors) => Some((
            MessageKind::Error,
            format!("Booking is incomplete: {errors}"),
        )),
        SubmitOutcome::SessionExpired => Some((
            MessageKind::Warning,
            "Your session has expired. Please sign in again.".to_string(),
        )),
        SubmitOutcome::Submitted(_) | SubmitOutcome::Ignored | SubmitOutcome::Failed(_) => None,
    }
}

pub fn readiness_line(score: u8) -> String {
    let filled = usize::from(score / 10);
    format!(
        "Ready {:>3}% [{}{}]",
        score,
        "#".repeat(filled),
        ".".repeat(10 - filled)
    )
}
