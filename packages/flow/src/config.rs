//! # Login flow configuration — `login.toml`
//!
//! The limits the form enforces before it talks to the OTP service, and the role
//! handed out after a successful family-head verification.
//!
//! ```toml
//! [phone]
//! min_length = 10
//!
//! [aadhaar]
//! length = 12
//!
//! [family_head]
//! role = "admin"
//!
//! [otp]
//! code_length_hint = 6
//! ```
//!
//! Every section is optional; a missing or empty file yields [`FlowConfig::default`].

use serde::{Deserialize, Serialize};

use crate::models::Role;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub phone: PhoneConfig,
    #[serde(default)]
    pub aadhaar: AadhaarConfig,
    #[serde(default)]
    pub family_head: FamilyHeadConfig,
    #[serde(default)]
    pub otp: OtpHintConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhoneConfig {
    /// Minimum number of characters before "Send OTP" is enabled.
    #[serde(default = "default_min_phone_length")]
    pub min_length: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AadhaarConfig {
    /// Exact identifier length required before "Send OTP" is enabled.
    #[serde(default = "default_aadhaar_length")]
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamilyHeadConfig {
    /// Role requested from the session provider once the Aadhaar OTP checks out.
    #[serde(default = "default_family_head_role")]
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OtpHintConfig {
    /// Only used for placeholders; codes are never validated client-side.
    #[serde(default = "default_code_length_hint")]
    pub code_length_hint: usize,
}

fn default_min_phone_length() -> usize {
    10
}

fn default_aadhaar_length() -> usize {
    12
}

fn default_family_head_role() -> Role {
    Role::Admin
}

fn default_code_length_hint() -> usize {
    6
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_phone_length(),
        }
    }
}

impl Default for AadhaarConfig {
    fn default() -> Self {
        Self {
            length: default_aadhaar_length(),
        }
    }
}

impl Default for FamilyHeadConfig {
    fn default() -> Self {
        Self {
            role: default_family_head_role(),
        }
    }
}

impl Default for OtpHintConfig {
    fn default() -> Self {
        Self {
            code_length_hint: default_code_length_hint(),
        }
    }
}

impl FlowConfig {
    /// Builder method to change the role granted to a verified family head.
    pub fn with_family_head_role(mut self, role: Role) -> Self {
        self.family_head.role = role;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "login.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = FlowConfig::from_toml("").unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.phone.min_length, 10);
        assert_eq!(config.aadhaar.length, 12);
        assert_eq!(config.family_head.role, Role::Admin);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = FlowConfig::from_toml(
            r#"
            [family_head]
            role = "patient"
            "#,
        )
        .unwrap();
        assert_eq!(config.family_head.role, Role::Patient);
        assert_eq!(config.phone.min_length, 10);

        let written = config.to_toml().unwrap();
        assert_eq!(FlowConfig::from_toml(&written).unwrap(), config);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(FlowConfig::from_toml("[family_head]\nrole = \"root\"").is_err());
    }
}
