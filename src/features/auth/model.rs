use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    ROLE_ADMIN, ROLE_CLINIC, ROLE_HEALTH_EXPERT, ROLE_NUTRIENT_SPECIALIST,
};

/// Platform role, carried on the wire as its numeric identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RoleId {
    Admin,
    HealthExpert,
    NutrientSpecialist,
    Clinic,
    Other(i64),
}

impl From<i64> for RoleId {
    fn from(id: i64) -> Self {
        match id {
            ROLE_ADMIN => RoleId::Admin,
            ROLE_HEALTH_EXPERT => RoleId::HealthExpert,
            ROLE_NUTRIENT_SPECIALIST => RoleId::NutrientSpecialist,
            ROLE_CLINIC => RoleId::Clinic,
            other => RoleId::Other(other),
        }
    }
}

impl From<RoleId> for i64 {
    fn from(role: RoleId) -> Self {
        match role {
            RoleId::Admin => ROLE_ADMIN,
            RoleId::HealthExpert => ROLE_HEALTH_EXPERT,
            RoleId::NutrientSpecialist => ROLE_NUTRIENT_SPECIALIST,
            RoleId::Clinic => ROLE_CLINIC,
            RoleId::Other(id) => id,
        }
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleId::Admin => write!(f, "admin"),
            RoleId::HealthExpert => write!(f, "health_expert"),
            RoleId::NutrientSpecialist => write!(f, "nutrient_specialist"),
            RoleId::Clinic => write!(f, "clinic"),
            RoleId::Other(id) => write!(f, "role_{}", id),
        }
    }
}

/// The authenticated user driving the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: i64,
    pub role: RoleId,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: i64, role: impl Into<RoleId>, email: Option<String>) -> Self {
        Self {
            id,
            role: role.into(),
            email,
        }
    }

    /// Check if the principal owns the given record
    pub fn owns(&self, owner_id: i64) -> bool {
        self.id == owner_id
    }
}
