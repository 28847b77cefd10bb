//! Accessibility cross-references between a composite root and its slots.
//!
//! [`AriaLinkage`] stores only the slot ids. The root's `aria-labelledby` and
//! `aria-describedby` values are read back from those same ids, so a reference
//! on the root can never point at an id the slot does not carry.

use crate::slots::{Slot, SlotEligibility};
use serde::Serialize;

/// Ids for the labelled slots of one composite render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaLinkage {
    #[serde(skip_serializing_if = "Option::is_none")]
    title_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_id: Option<String>,
}

impl AriaLinkage {
    /// Derives the linkage for `instance_id` from the eligible slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotwire_core::aria::AriaLinkage;
    /// use slotwire_core::slots::SlotEligibility;
    ///
    /// let linkage = AriaLinkage::link("card-1", &SlotEligibility::new(true, false, false, false));
    /// assert_eq!(linkage.root_labelled_by(), Some("card-1-title"));
    /// assert_eq!(linkage.root_described_by(), None);
    /// ```
    pub fn link(instance_id: &str, slots: &SlotEligibility) -> Self {
        let id_for = |slot: Slot| {
            slots
                .is_eligible(slot)
                .then(|| format!("{}-{}", instance_id, slot.name()))
        };
        Self {
            title_id: id_for(Slot::Title),
            description_id: id_for(Slot::Description),
            date_id: id_for(Slot::Date),
        }
    }

    /// Id carried by the title slot.
    pub fn title_id(&self) -> Option<&str> {
        self.title_id.as_deref()
    }

    /// Id carried by the description slot.
    pub fn description_id(&self) -> Option<&str> {
        self.description_id.as_deref()
    }

    /// Id carried by the date slot.
    pub fn date_id(&self) -> Option<&str> {
        self.date_id.as_deref()
    }

    /// Root `aria-labelledby` target.
    pub fn root_labelled_by(&self) -> Option<&str> {
        self.title_id()
    }

    /// Root `aria-describedby` target.
    pub fn root_described_by(&self) -> Option<&str> {
        self.description_id()
    }

    /// Attribute pairs for the composite root. Absent references are omitted.
    pub fn root_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if let Some(id) = self.root_labelled_by() {
            attrs.push(("aria-labelledby", id.to_string()));
        }
        if let Some(id) = self.root_described_by() {
            attrs.push(("aria-describedby", id.to_string()));
        }
        attrs
    }

    /// Returns the `id` a slot element must carry, if it is referenced.
    pub fn slot_id(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Title => self.title_id(),
            Slot::Description => self.description_id(),
            Slot::Date => self.date_id(),
            Slot::Link | Slot::Cta => None,
        }
    }
}
