use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role asserted by the upstream identity provider. The application trusts
/// it as-is; membership drives the per-session price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Member,
    Visitor,
}

impl Role {
    pub fn is_member(self) -> bool {
        matches!(self, Role::Admin | Role::Member)
    }
}
