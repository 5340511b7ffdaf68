//! Hermetic environment for config tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable `apply_env_overrides` consults.
const OVERRIDE_KEYS: &[&str] = &[
    "PAGEPILOT_API_KEY",
    "GEMINI_API_KEY",
    "PAGEPILOT_MODEL",
    "PAGEPILOT_TEMPERATURE",
    "PAGEPILOT_GATEWAY_PORT",
    "PORT",
    "PAGEPILOT_GATEWAY_HOST",
    "HOST",
    "CLOUDINARY_CLOUD_NAME",
    "CLOUDINARY_API_KEY",
    "CLOUDINARY_API_SECRET",
    "PAGEPILOT_LOG_LEVEL",
];

/// Holds the process-wide env lock with all override variables cleared.
/// Dropping it puts the previous values back.
pub(in crate::config) struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub(in crate::config) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_KEYS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_KEYS {
            // SAFETY: ENV_LOCK is held for the lifetime of this value.
            unsafe { std::env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    #[must_use]
    pub(in crate::config) fn with(self, key: &'static str, value: &str) -> Self {
        debug_assert!(OVERRIDE_KEYS.contains(&key), "{key} is not restored on drop");
        // SAFETY: ENV_LOCK is held for the lifetime of this value.
        unsafe { std::env::set_var(key, value) };
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: the lock guard field is dropped after this body runs.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
