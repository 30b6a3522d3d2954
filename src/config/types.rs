use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::carousel::CarouselTiming;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Carousel timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Delay before auto-advance in milliseconds (default: 8000).
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    /// Navigation lock after a transition in milliseconds (default: 700).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Calendar data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Path of the events endpoint, relative to `http.base_url`.
    #[serde(default = "default_events_url")]
    pub events_url: String,
}

/// Resource client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

fn default_advance_delay_ms() -> u64 {
    8000
}

fn default_settle_ms() -> u64 {
    700
}

fn default_events_url() -> String {
    "/api/events".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_seconds() -> u32 {
    30
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            events_url: default_events_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl CarouselConfig {
    pub fn timing(&self) -> CarouselTiming {
        CarouselTiming {
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            settle_window: Duration::from_millis(self.settle_ms),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}
