//! Request authorization configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Capability required by every alt text operation
pub const UPLOAD_FILES_CAPABILITY: &str = "upload_files";
/// Capability required to read or change settings
pub const MANAGE_OPTIONS_CAPABILITY: &str = "manage_options";

/// Request authorization configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Shared request token; requests must echo it when set
    #[serde(default)]
    pub nonce: Option<String>,
    /// Known users; an empty list disables capability checks
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// A bearer token and the capabilities it grants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub token: String,
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
}

impl SecurityConfig {
    /// Capabilities granted to a bearer token, if the token is known
    pub fn capabilities_for(&self, token: &str) -> Option<&[String]> {
        self.users
            .iter()
            .find(|user| user.token == token)
            .map(|user| user.capabilities.as_slice())
    }

    /// Whether capability checks apply at all
    pub fn checks_capabilities(&self) -> bool {
        !self.users.is_empty()
    }

    /// Validate security configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(nonce) = &self.nonce {
            if nonce.trim().is_empty() {
                return Err("Nonce cannot be blank".to_string());
            }
        }

        if self.users.iter().any(|user| user.token.trim().is_empty()) {
            return Err("User tokens cannot be blank".to_string());
        }

        Ok(())
    }
}
