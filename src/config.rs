//! Client configuration and display settings, persisted as JSON in localStorage.

use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_KEY: &str = "arena_config";
pub const SETTINGS_KEY: &str = "arena_settings";

/// Camera easing. `TimeConstant` decays by `1 - exp(-dt/tau)` per frame and is
/// independent of frame rate; `PerFrame` moves a fixed fraction each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    TimeConstant { position_tau_ms: f64, scale_tau_ms: f64 },
    PerFrame { position_divisor: f64, scale_divisor: f64 },
}

// At 60 Hz the taus match a 1/7 position step and a 1/20 scale step.
const POSITION_TAU_MS: f64 = 108.1;
const SCALE_TAU_MS: f64 = 324.9;
const POSITION_DIVISOR: f64 = 7.0;
const SCALE_DIVISOR: f64 = 20.0;

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::TimeConstant {
            position_tau_ms: POSITION_TAU_MS,
            scale_tau_ms: SCALE_TAU_MS,
        }
    }
}

impl Smoothing {
    /// Taus must be positive and divisors at least 1; bad values fall back per field.
    fn sanitized(self) -> Self {
        match self {
            Smoothing::TimeConstant {
                position_tau_ms,
                scale_tau_ms,
            } => {
                let tau_ok = |t: f64| t.is_finite() && t > 0.0;
                if !(tau_ok(position_tau_ms) && tau_ok(scale_tau_ms)) {
                    warn!("smoothing taus {position_tau_ms}/{scale_tau_ms} rejected");
                }
                Smoothing::TimeConstant {
                    position_tau_ms: if tau_ok(position_tau_ms) { position_tau_ms } else { POSITION_TAU_MS },
                    scale_tau_ms: if tau_ok(scale_tau_ms) { scale_tau_ms } else { SCALE_TAU_MS },
                }
            }
            Smoothing::PerFrame {
                position_divisor,
                scale_divisor,
            } => {
                let div_ok = |d: f64| d.is_finite() && d >= 1.0;
                if !(div_ok(position_divisor) && div_ok(scale_divisor)) {
                    warn!("smoothing divisors {position_divisor}/{scale_divisor} rejected");
                }
                Smoothing::PerFrame {
                    position_divisor: if div_ok(position_divisor) { position_divisor } else { POSITION_DIVISOR },
                    scale_divisor: if div_ok(scale_divisor) { scale_divisor } else { SCALE_DIVISOR },
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_initial: f64,
    /// zoom base change per wheel delta unit (sign inverted: wheel down zooms out).
    pub scroll_sensitivity: f64,
    /// Surface width at which the target scale equals zoom/2.
    pub reference_width: f64,
    pub smoothing: Smoothing,
    pub resize_poll_ms: u32,
    pub resize_threshold_px: f64,
    /// Drawn ring radius; the drag clamp radius is derived from it.
    pub joystick_base_radius: f64,
    pub joystick_handle_radius: f64,
    pub joystick_standby_alpha: f64,
    pub button_radius: f64,
    pub button_debounce_ms: f64,
    pub eject_repeat_ms: u32,
    pub hud_refresh_ms: u32,
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.05,
            zoom_max: 8.0,
            zoom_initial: 1.0,
            scroll_sensitivity: 0.001,
            reference_width: 1920.0,
            smoothing: Smoothing::default(),
            resize_poll_ms: 100,
            resize_threshold_px: 1.0,
            joystick_base_radius: 60.0,
            joystick_handle_radius: 35.0,
            joystick_standby_alpha: 0.5,
            button_radius: 60.0,
            button_debounce_ms: 100.0,
            eject_repeat_ms: 50,
            hud_refresh_ms: 40,
            log_level: LogLevel::Info,
        }
    }
}

impl ClientConfig {
    /// Radius the joystick handle is clamped to: ring diameter / 2.5.
    pub fn joystick_outer_radius(&self) -> f64 {
        self.joystick_base_radius * 2.0 / 2.5
    }

    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<ClientConfig>(raw) {
            Ok(c) => c.sanitized(),
            Err(e) => {
                warn!("invalid {CONFIG_KEY}, using defaults: {e}");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            warn!("zoom bounds {}..{} rejected", self.zoom_min, self.zoom_max);
            let d = Self::default();
            self.zoom_min = d.zoom_min;
            self.zoom_max = d.zoom_max;
        }
        self.zoom_initial = self.zoom_initial.clamp(self.zoom_min, self.zoom_max);
        if self.reference_width <= 0.0 {
            self.reference_width = Self::default().reference_width;
        }
        self.resize_poll_ms = self.resize_poll_ms.max(1);
        self.smoothing = self.smoothing.sanitized();
        self
    }

    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(CONFIG_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Self::default(),
        }
    }
}

/// World decoration toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub border: bool,
    pub background: bool,
    pub rainbow_border: bool,
    pub grid: bool,
    pub sectors: bool,
    pub minimap: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            border: true,
            background: true,
            rainbow_border: false,
            grid: true,
            sectors: false,
            minimap: true,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(SETTINGS_KEY).ok().flatten())
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(SETTINGS_KEY, &s);
                    log::debug!("display settings saved");
                }
            }
        }
    }
}
