//! Tenant identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the tenant that owns a configuration record.
///
/// Every record belongs to exactly one tenant, and every repository handle
/// is bound to exactly one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i32);

impl TenantId {
    /// The platform's super tenant.
    pub const SUPER: Self = Self(-1234);

    /// Creates a tenant identifier from its raw value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TenantId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<TenantId> for i32 {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&TenantId::new(42)).unwrap();
        assert_eq!(json, "42");

        let parsed: TenantId = serde_json::from_str("-1234").unwrap();
        assert_eq!(parsed, TenantId::SUPER);
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(TenantId::from(7).to_string(), "7");
        assert_eq!(i32::from(TenantId::new(9)), 9);
    }
}
