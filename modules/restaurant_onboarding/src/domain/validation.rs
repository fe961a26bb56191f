//! Step validators
//!
//! One pure predicate per wizard step deciding whether the draft holds the
//! minimum required data for that step.

use super::draft::{Draft, MIN_DISHES, MIN_PHOTOS};

/// Index of the last wizard step
pub const LAST_STEP: usize = 6;

/// The seven wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    BusinessInfo,
    About,
    PopularDishes,
    MenuUpload,
    DeliveryHours,
    Photos,
    Social,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::BusinessInfo,
        WizardStep::About,
        WizardStep::PopularDishes,
        WizardStep::MenuUpload,
        WizardStep::DeliveryHours,
        WizardStep::Photos,
        WizardStep::Social,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BusinessInfo => "Business Info",
            WizardStep::About => "About Us",
            WizardStep::PopularDishes => "Popular Dishes",
            WizardStep::MenuUpload => "Menu Upload",
            WizardStep::DeliveryHours => "Delivery & Hours",
            WizardStep::Photos => "Photos",
            WizardStep::Social => "Social & Extras",
        }
    }

    /// Whether forward progress from this step requires it to be valid.
    /// Social is exempt entirely.
    pub fn gates_progress(&self) -> bool {
        !matches!(self, WizardStep::Social)
    }
}

/// Title for a step index, empty for unknown indices
pub fn step_title(step: usize) -> &'static str {
    WizardStep::from_index(step).map_or("", |s| s.title())
}

/// Whether the draft satisfies the minimum completeness for `step`.
///
/// Total over all indices: anything outside 0..=6 is not valid.
pub fn is_step_valid(step: usize, draft: &Draft) -> bool {
    let Some(step) = WizardStep::from_index(step) else {
        return false;
    };

    match step {
        WizardStep::BusinessInfo => {
            let info = &draft.business_info;
            !info.name.is_empty() && !info.address.is_empty() && !info.email.is_empty()
        }
        WizardStep::About => !draft.about.founded_year.is_empty() && !draft.about.story.is_empty(),
        // Dish contents are not checked, only the count
        WizardStep::PopularDishes => draft.popular_dishes.len() >= MIN_DISHES,
        WizardStep::MenuUpload => draft.menu_pdf.is_some(),
        WizardStep::DeliveryHours => {
            let delivery = &draft.delivery_hours;
            !delivery.delivery_areas.is_empty() && !delivery.hours.is_empty()
        }
        WizardStep::Photos => draft.photos.len() >= MIN_PHOTOS,
        WizardStep::Social => true,
    }
}
