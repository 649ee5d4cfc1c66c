//! Runtime configuration for the reconciliation engine.
//!
//! Defaults come from [`ytsalt_core::defaults`]. Every value can be overridden
//! through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `YTSALT_TAG_BUDGET` | 500 | Serialized tag list budget in characters |
//! | `YTSALT_REQUIRE_TRANSCRIPT` | true | Gate tags and key moments on a transcript |
//! | `YTSALT_EVENT_CAPACITY` | 256 | Session event bus buffer size |

use std::env;

use serde::{Deserialize, Serialize};
use ytsalt_core::defaults::{EVENT_CAPACITY, TAG_BUDGET};
use ytsalt_core::{Error, EventBus, Result};

pub const ENV_TAG_BUDGET: &str = "YTSALT_TAG_BUDGET";
pub const ENV_REQUIRE_TRANSCRIPT: &str = "YTSALT_REQUIRE_TRANSCRIPT";
pub const ENV_EVENT_CAPACITY: &str = "YTSALT_EVENT_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Maximum serialized length of the tag list.
    pub tag_budget: usize,

    /// Reject tags and key-moment requests when no transcript is held.
    pub require_transcript: bool,

    /// Broadcast buffer for session events.
    pub event_capacity: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tag_budget: TAG_BUDGET,
            require_transcript: true,
            event_capacity: EVENT_CAPACITY,
        }
    }
}

impl ReconcileConfig {
    /// Constructs configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tag_budget: parse_usize_env(ENV_TAG_BUDGET, defaults.tag_budget),
            require_transcript: parse_bool_env(ENV_REQUIRE_TRANSCRIPT, defaults.require_transcript),
            event_capacity: parse_usize_env(ENV_EVENT_CAPACITY, defaults.event_capacity),
        }
    }

    /// Session event bus with `event_capacity` slots.
    pub fn event_bus(&self) -> EventBus {
        EventBus::new(self.event_capacity)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tag_budget == 0 {
            return Err(Error::Config("tag_budget must be greater than 0".to_string()));
        }
        if self.event_capacity == 0 {
            return Err(Error::Config(
                "event_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Recognizes "true", "1", "yes", "on" and "false", "0", "no", "off"
/// (case-insensitive). Anything else returns the default.
fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|val| match val.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_usize_env(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse().ok())
        .unwrap_or(default)
}
