use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Target page id plus the access token used to publish on its behalf.
///
/// Owned by the session layer. Scheduled tasks hold their own clone so a
/// later session change never affects a pending publish.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PublishCredential {
    target_id: String,
    access_token: String,
}

impl PublishCredential {
    pub fn new(target_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Both fields present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.target_id.trim().is_empty() && !self.access_token.trim().is_empty()
    }
}

/// `Some` only for a credential that can actually be used.
pub fn usable(credential: Option<&PublishCredential>) -> Option<&PublishCredential> {
    credential.filter(|c| c.is_complete())
}

impl fmt::Debug for PublishCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishCredential")
            .field("target_id", &self.target_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
