//! People, roles and groups.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::availability::WeeklyAvailability;
use super::segment::SegmentName;

/// An organizational grouping of roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier.
    pub id: String,
    /// Display name, also used to label export rows.
    pub name: String,
    /// Theme color used by presentation layers.
    #[serde(default)]
    pub theme_color: String,
}

/// A work role that people are scheduled into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: String,
    /// Short code shown on rotas and exports.
    pub code: String,
    /// Display name.
    pub name: String,
    /// The group this role belongs to.
    pub group_id: String,
    /// Segments this role may be scheduled into.
    pub applicable_segments: BTreeSet<SegmentName>,
}

impl Role {
    /// Whether the role may be scheduled into `segment`.
    pub fn applies_to(&self, segment: &SegmentName) -> bool {
        self.applicable_segments.contains(segment)
    }
}

/// A person who can be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Work email address.
    #[serde(default)]
    pub work_email: String,
    /// Inactive people are left out of monthly projection and direct scheduling.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Default availability per weekday.
    #[serde(default)]
    pub weekly_availability: WeeklyAvailability,
}

fn default_active() -> bool {
    true
}
