//! Configuration types for the rota catalogs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the aggregated
//! [`RotaConfig`] the resolvers read from.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentRule, DayHalf, Group, Role, SegmentDefinition, SegmentName};

/// Segment catalog file structure (`segments.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsConfig {
    /// The configured segments.
    pub segments: Vec<SegmentDefinition>,
}

/// Adjustment rules file structure (`rules.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// The configured rules, in any order.
    #[serde(default)]
    pub rules: Vec<AdjustmentRule>,
}

/// Organization file structure (`organization.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Groups of roles.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Schedulable roles.
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// The complete rota catalog configuration.
///
/// Segments are keyed by name, rules are kept in ascending id order (the
/// order they are applied in) and roles and groups are keyed by id. Lookups
/// return `Option`: a missing catalog entry means "no data".
#[derive(Debug, Clone)]
pub struct RotaConfig {
    segments: BTreeMap<SegmentName, SegmentDefinition>,
    rules: Vec<AdjustmentRule>,
    groups: HashMap<String, Group>,
    roles: HashMap<String, Role>,
}

impl RotaConfig {
    /// Creates a configuration from its catalogs.
    ///
    /// Fails with [`EngineError::InvalidConfig`] when a segment, rule id,
    /// group id or role id is defined twice, or when a configured segment
    /// does not say which half of the day it belongs to.
    pub fn new(
        segments: Vec<SegmentDefinition>,
        rules: Vec<AdjustmentRule>,
        groups: Vec<Group>,
        roles: Vec<Role>,
    ) -> EngineResult<Self> {
        let mut segment_map = BTreeMap::new();
        for definition in segments {
            let name = definition.name.clone();
            if definition.half().is_none() {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "segment {} needs a half (morning, afternoon or either)",
                        name
                    ),
                });
            }
            if segment_map.insert(name.clone(), definition).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("segment {} is defined more than once", name),
                });
            }
        }

        let mut seen_rule_ids = HashSet::new();
        for rule in &rules {
            if !seen_rule_ids.insert(rule.id) {
                return Err(EngineError::InvalidConfig {
                    message: format!("adjustment rule id {} is used more than once", rule.id),
                });
            }
            for segment in [&rule.condition_segment, &rule.target_segment] {
                if !segment_map.contains_key(segment) {
                    warn!(rule_id = rule.id, %segment, "Adjustment rule references a segment missing from the catalog");
                }
            }
        }
        let mut sorted_rules = rules;
        sorted_rules.sort_by_key(|rule| rule.id);

        let mut group_map = HashMap::new();
        for group in groups {
            let id = group.id.clone();
            if group_map.insert(id.clone(), group).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("group '{}' is defined more than once", id),
                });
            }
        }

        let mut role_map = HashMap::new();
        for role in roles {
            if !group_map.contains_key(&role.group_id) {
                warn!(role_id = %role.id, group_id = %role.group_id, "Role references an unknown group");
            }
            for segment in &role.applicable_segments {
                if !segment_map.contains_key(segment) {
                    warn!(role_id = %role.id, %segment, "Role lists a segment missing from the catalog");
                }
            }
            let id = role.id.clone();
            if role_map.insert(id.clone(), role).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("role '{}' is defined more than once", id),
                });
            }
        }

        Ok(Self {
            segments: segment_map,
            rules: sorted_rules,
            groups: group_map,
            roles: role_map,
        })
    }

    /// Returns the catalog entry for a segment.
    pub fn segment(&self, name: &SegmentName) -> Option<&SegmentDefinition> {
        self.segments.get(name)
    }

    /// Returns the half of the day a segment counts as for availability.
    ///
    /// Built-in segments keep their fixed half even when the catalog omits
    /// them; configured segments unknown to the catalog have none.
    pub fn segment_half(&self, name: &SegmentName) -> Option<DayHalf> {
        match self.segments.get(name) {
            Some(definition) => definition.half(),
            None => name.built_in_half(),
        }
    }

    /// Returns the catalog entries sorted by their ordering key.
    pub fn segments_in_order(&self) -> Vec<&SegmentDefinition> {
        let mut ordered: Vec<_> = self.segments.values().collect();
        ordered.sort_by(|a, b| (a.order, &a.name).cmp(&(b.order, &b.name)));
        ordered
    }

    /// Returns the adjustment rules in application order.
    pub fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    /// Returns a role by id.
    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// Returns all roles sorted by id.
    pub fn roles(&self) -> Vec<&Role> {
        let mut roles: Vec<_> = self.roles.values().collect();
        roles.sort_by(|a, b| a.id.cmp(&b.id));
        roles
    }

    /// Returns a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    /// Returns the group a role belongs to.
    pub fn group_for_role(&self, role_id: &str) -> Option<&Group> {
        self.role(role_id).and_then(|role| self.group(&role.group_id))
    }
}
