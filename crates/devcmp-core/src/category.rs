//! Object categories the console can compare

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for an unrecognised category name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown object category '{0}'")]
pub struct CategoryError(pub String);

/// A kind of configuration object held by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCategory {
    Tags,
    Addresses,
    AddressGroups,
    ApplicationGroups,
    Services,
    ServiceGroups,
    NatPolicies,
    SecurityPolicies,
    QosPolicies,
}

impl ObjectCategory {
    pub const ALL: [ObjectCategory; 9] = [
        ObjectCategory::Tags,
        ObjectCategory::Addresses,
        ObjectCategory::AddressGroups,
        ObjectCategory::ApplicationGroups,
        ObjectCategory::Services,
        ObjectCategory::ServiceGroups,
        ObjectCategory::NatPolicies,
        ObjectCategory::SecurityPolicies,
        ObjectCategory::QosPolicies,
    ];

    /// Canonical name, also accepted by `FromStr`
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectCategory::Tags => "tags",
            ObjectCategory::Addresses => "addresses",
            ObjectCategory::AddressGroups => "address_groups",
            ObjectCategory::ApplicationGroups => "app_groups",
            ObjectCategory::Services => "services",
            ObjectCategory::ServiceGroups => "service_groups",
            ObjectCategory::NatPolicies => "nat",
            ObjectCategory::SecurityPolicies => "security",
            ObjectCategory::QosPolicies => "qos",
        }
    }

    pub fn is_policy(self) -> bool {
        matches!(
            self,
            ObjectCategory::NatPolicies
                | ObjectCategory::SecurityPolicies
                | ObjectCategory::QosPolicies
        )
    }

    /// API path serving this category
    pub fn api_path(self) -> &'static str {
        if self.is_policy() {
            "/api/policies"
        } else {
            "/api/objects"
        }
    }

    /// Query parameter selecting this category on `api_path`
    pub fn query_param(self) -> (&'static str, &'static str) {
        if self.is_policy() {
            ("type", self.as_str())
        } else {
            ("object", self.as_str())
        }
    }

    /// Human-readable label for messages
    pub fn label(self) -> &'static str {
        match self {
            ObjectCategory::Tags => "tags",
            ObjectCategory::Addresses => "addresses",
            ObjectCategory::AddressGroups => "address groups",
            ObjectCategory::ApplicationGroups => "application groups",
            ObjectCategory::Services => "services",
            ObjectCategory::ServiceGroups => "service groups",
            ObjectCategory::NatPolicies => "NAT policies",
            ObjectCategory::SecurityPolicies => "security policies",
            ObjectCategory::QosPolicies => "QoS policies",
        }
    }
}

impl FromStr for ObjectCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let category = match normalized.as_str() {
            "tags" | "tag" => ObjectCategory::Tags,
            "addresses" | "address" => ObjectCategory::Addresses,
            "address_groups" | "address_group" => ObjectCategory::AddressGroups,
            "app_groups" | "application_groups" | "applications" => {
                ObjectCategory::ApplicationGroups
            }
            "services" | "service" => ObjectCategory::Services,
            "service_groups" | "service_group" => ObjectCategory::ServiceGroups,
            "nat" | "nat_policies" => ObjectCategory::NatPolicies,
            "security" | "security_policies" => ObjectCategory::SecurityPolicies,
            "qos" | "qos_policies" => ObjectCategory::QosPolicies,
            _ => return Err(CategoryError(s.to_string())),
        };
        Ok(category)
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
