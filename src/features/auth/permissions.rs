//! Role-based moderation permissions.
//!
//! Policy table (fixed for the session):
//! - clinic: approve and reject everything
//! - health_expert: approve and reject, except health-tagged categories
//! - nutrient_specialist: approve and reject, except nutrient-tagged categories
//! - every other role, admin included: no moderation rights

use std::collections::BTreeSet;

use crate::features::auth::model::RoleId;
use crate::shared::constants::{TAG_HEALTH, TAG_NUTRIENT};

/// What a role may do in the moderation workflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePermission {
    pub can_approve: bool,
    pub can_reject: bool,
    /// Lowercased category tags this role may not moderate
    pub restricted_tags: BTreeSet<String>,
}

impl RolePermission {
    fn moderator(restricted: &[&str]) -> Self {
        Self {
            can_approve: true,
            can_reject: true,
            restricted_tags: restricted.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Check if the role can take any moderation action
    pub fn is_moderator(&self) -> bool {
        self.can_approve || self.can_reject
    }

    /// Returns the restricted tag matching `tag` (case-insensitive), if any
    pub fn restriction_for(&self, tag: &str) -> Option<&str> {
        let needle = tag.trim().to_lowercase();
        self.restricted_tags
            .iter()
            .find(|t| **t == needle)
            .map(String::as_str)
    }

    pub fn allows_tag(&self, tag: Option<&str>) -> bool {
        tag.map_or(true, |t| self.restriction_for(t).is_none())
    }
}

/// Evaluate the moderation permissions of a role. Unknown roles get none.
pub fn evaluate(role: RoleId) -> RolePermission {
    match role {
        RoleId::Clinic => RolePermission::moderator(&[]),
        RoleId::HealthExpert => RolePermission::moderator(&[TAG_HEALTH]),
        RoleId::NutrientSpecialist => RolePermission::moderator(&[TAG_NUTRIENT]),
        RoleId::Admin | RoleId::Other(_) => RolePermission::default(),
    }
}
