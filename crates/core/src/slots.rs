//! Slot eligibility planning.
//!
//! Two policies exist for deciding what an article composite shows when its
//! data is incomplete. They disagree on purpose and each archetype picks one:
//!
//! - [`SlotPolicy::Partial`]: every slot stands on its own. A present but
//!   unparseable date still makes the date slot eligible (with blank text).
//! - [`SlotPolicy::Strict`]: title, slug, a parseable date and description are
//!   all required, otherwise the whole composite is suppressed.

use crate::normalize::CanonicalProjection;
use serde::{Deserialize, Serialize};

/// Named optional sub-parts of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    /// Heading text.
    Title,
    /// Link wrapping the title.
    Link,
    /// Date eyebrow.
    Date,
    /// Summary text.
    Description,
    /// Call-to-action link.
    Cta,
}

impl Slot {
    /// Returns the slot's name as used in element ids.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::Link => "link",
            Slot::Date => "date",
            Slot::Description => "description",
            Slot::Cta => "cta",
        }
    }
}

/// Rule set for incomplete records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotPolicy {
    /// Each slot is eligible on its own data.
    Partial,
    /// All core fields are required or nothing renders.
    Strict,
}

/// Which slots may render.
///
/// `cta` is derived: it is only ever true when title, link, date and
/// description all are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotEligibility {
    title: bool,
    link: bool,
    date: bool,
    description: bool,
    cta: bool,
}

impl SlotEligibility {
    /// Builds an eligibility set, deriving the CTA from the other four.
    pub fn new(title: bool, link: bool, date: bool, description: bool) -> Self {
        Self {
            title,
            link,
            date,
            description,
            cta: title && link && date && description,
        }
    }

    /// Every slot eligible.
    pub fn all() -> Self {
        Self::new(true, true, true, true)
    }

    /// Returns a copy with the CTA switched off.
    pub fn without_cta(self) -> Self {
        Self { cta: false, ..self }
    }

    /// Title slot.
    pub fn title(&self) -> bool {
        self.title
    }

    /// Link slot.
    pub fn link(&self) -> bool {
        self.link
    }

    /// Date slot.
    pub fn date(&self) -> bool {
        self.date
    }

    /// Description slot.
    pub fn description(&self) -> bool {
        self.description
    }

    /// Call-to-action slot.
    pub fn cta(&self) -> bool {
        self.cta
    }

    /// Looks up a slot by name.
    pub fn is_eligible(&self, slot: Slot) -> bool {
        match slot {
            Slot::Title => self.title,
            Slot::Link => self.link,
            Slot::Date => self.date,
            Slot::Description => self.description,
            Slot::Cta => self.cta,
        }
    }

    /// Returns true if no slot is eligible.
    pub fn is_empty(&self) -> bool {
        !(self.title || self.link || self.date || self.description || self.cta)
    }
}

/// Planner outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPlan {
    /// Render nothing.
    Suppressed,
    /// Render the root with these slots.
    Eligible(SlotEligibility),
}

/// Decides slot eligibility for `projection` under `policy`.
///
/// # Examples
///
/// ```
/// use slotwire_core::normalize::CanonicalProjection;
/// use slotwire_core::slots::{SlotPlan, SlotPolicy, plan_slots};
///
/// let projection = CanonicalProjection {
///     title: "Hello".into(),
///     ..Default::default()
/// };
/// assert!(matches!(plan_slots(&projection, SlotPolicy::Partial), SlotPlan::Eligible(_)));
/// assert_eq!(plan_slots(&projection, SlotPolicy::Strict), SlotPlan::Suppressed);
/// ```
pub fn plan_slots(projection: &CanonicalProjection, policy: SlotPolicy) -> SlotPlan {
    match policy {
        SlotPolicy::Partial => plan_partial(projection),
        SlotPolicy::Strict => plan_strict(projection),
    }
}

fn plan_partial(projection: &CanonicalProjection) -> SlotPlan {
    let eligibility = SlotEligibility::new(
        !projection.title.is_empty(),
        !projection.slug.is_empty(),
        projection.has_date(),
        !projection.description.is_empty(),
    );
    // Link and CTA only render alongside a title, date or description.
    if !(eligibility.title() || eligibility.date() || eligibility.description()) {
        log::debug!("partial policy: nothing to show, suppressing");
        return SlotPlan::Suppressed;
    }
    SlotPlan::Eligible(eligibility)
}

fn plan_strict(projection: &CanonicalProjection) -> SlotPlan {
    let missing = [
        ("title", projection.title.is_empty()),
        ("slug", projection.slug.is_empty()),
        ("date", !projection.has_parseable_date()),
        ("description", projection.description.is_empty()),
    ]
    .into_iter()
    .find_map(|(field, missing)| missing.then_some(field));

    match missing {
        Some(field) => {
            log::debug!("strict policy: '{}' missing or invalid, suppressing", field);
            SlotPlan::Suppressed
        }
        None => SlotPlan::Eligible(SlotEligibility::all()),
    }
}
