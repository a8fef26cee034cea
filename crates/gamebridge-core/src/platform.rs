//! Login collaborator for the third-party game platform.
//!
//! The scraping/login client lives outside this crate; the login bridge
//! only needs something that can attempt a login.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of a login attempt as reported by the platform client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub success: bool,
    pub message: String,
}

/// Platform client able to authenticate a user.
pub trait PlatformAuth: Send + Sync {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResult>> + Send;
}
