//! Shared helpers for the WASM API
//!
//! Serialization across the JS boundary, config loading and logger setup.

use crate::config::{LogLevel, ReflowConfig};
use crate::error::ReflowError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with the [reflow] prefix
#[macro_export]
macro_rules! reflow_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with the [reflow] prefix
#[macro_export]
macro_rules! reflow_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning with the [reflow] prefix
#[macro_export]
macro_rules! reflow_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error with the [reflow] prefix
#[macro_export]
macro_rules! reflow_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging
// ============================================================================

const LOG_PREFIX: &str = "[reflow]";

pub fn prefixed(msg: &str) -> String {
    format!("{} {}", LOG_PREFIX, msg)
}

pub fn log_debug(msg: &str) {
    log::debug!("{}", prefixed(msg));
}

pub fn log_info(msg: &str) {
    log::info!("{}", prefixed(msg));
}

pub fn log_warn(msg: &str) {
    log::warn!("{}", prefixed(msg));
}

pub fn log_error(msg: &str) {
    log::error!("{}", prefixed(msg));
}

/// Route the `log` facade to the browser console
///
/// Safe to call more than once; later calls only change the level.
pub fn init_logging(level: LogLevel) {
    let level = log::Level::from(level);
    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(level).is_err() {
            log::set_max_level(level.to_level_filter());
        }
    }
    #[cfg(not(feature = "console_log"))]
    log::set_max_level(level.to_level_filter());
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript, logging failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value for JavaScript, logging failures
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Config
// ============================================================================

/// `undefined` and `null` mean "all defaults"
pub fn config_from_js(value: JsValue) -> Result<ReflowConfig, ReflowError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ReflowConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ReflowError::Config(e.to_string()))
}
