use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{BookingDraft, Service, ServiceCategory};

const BUNDLE_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
const READINESS_STEP: u8 = 25;
const NOTES_BONUS: u8 = 5;

/// Complementary service offered alongside the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSuggestion {
    pub service: Service,
    /// Display-only estimate in whole currency units; never applied to the total.
    pub estimated_discount: Decimal,
}

/// Advisory suggestions. Nothing here gates navigation or submission.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Two categories suited to the vehicle's age, most relevant first.
    pub fn recommended_categories(vehicle_year: i32, current_year: i32) -> [ServiceCategory; 2] {
        let age = i64::from(current_year) - i64::from(vehicle_year);
        if age > 8 {
            [ServiceCategory::Inspection, ServiceCategory::Repair]
        } else if age > 4 {
            [ServiceCategory::Maintenance, ServiceCategory::Inspection]
        } else {
            [ServiceCategory::Maintenance, ServiceCategory::Customization]
        }
    }

    pub fn bundle_category(category: ServiceCategory) -> ServiceCategory {
        match category {
            ServiceCategory::Maintenance => ServiceCategory::Inspection,
            ServiceCategory::Repair => ServiceCategory::Maintenance,
            ServiceCategory::Inspection => ServiceCategory::Customization,
            ServiceCategory::Customization => ServiceCategory::Maintenance,
        }
    }

    /// First available catalog entry in the complementary category.
    pub fn bundle_suggestion(
        selected: Option<&Service>,
        catalog: &[Service],
    ) -> Option<BundleSuggestion> {
        let selected = selected?;
        let wanted = Self::bundle_category(selected.category);
        let bundle = catalog.iter().find(|candidate| {
            candidate.category == wanted && candidate.is_available && candidate.id != selected.id
        })?;
        let estimated_discount = (BUNDLE_DISCOUNT_RATE * (selected.price + bundle.price))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Some(BundleSuggestion {
            service: bundle.clone(),
            estimated_discount,
        })
    }

    /// Completeness score from 0 to 100.
    pub fn readiness_score(draft: &BookingDraft) -> u8 {
        let mut score = 0u8;
        if draft.has_service() {
            score += READINESS_STEP;
        }
        if draft.vehicle_info.is_complete() {
            score += READINESS_STEP;
        }
        if draft.booking_date.is_some() {
            score += READINESS_STEP;
        }
        if draft.time_slot.is_some() {
            score += READINESS_STEP;
        }
        if draft.has_notes() {
            score += NOTES_BONUS;
        }
        score.min(100)
    }
}
