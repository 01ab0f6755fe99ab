//! NVS-backed settings.
//!
//! Values are stored as strings in one NVS namespace. ESP-IDF commits each
//! `set_str`, so `save` only reports what was written since the last save.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::EspError;

use crate::console::settings::{MAX_KEY_LEN, MAX_VALUE_LEN};
use crate::console::{ConsoleError, ConsoleOutput, SettingsHooks, STATUS_FAILED, STATUS_OK};

/// NVS namespace for console settings
pub const NVS_NAMESPACE: &str = "console";

/// Settings hooks over the default NVS partition.
pub struct NvsSettings {
    nvs: EspNvs<NvsDefault>,
    pending: u32,
}

impl NvsSettings {
    /// Open (or create) the console namespace.
    pub fn open(partition: EspDefaultNvsPartition) -> Result<Self, EspError> {
        let nvs = EspNvs::new(partition, NVS_NAMESPACE, true)?;
        Ok(Self { nvs, pending: 0 })
    }

    fn storage_error(out: &mut dyn ConsoleOutput, e: EspError) -> i32 {
        let _ = writeln!(out, "{} ({})", ConsoleError::Storage, e);
        ConsoleError::Storage.status()
    }
}

impl SettingsHooks for NvsSettings {
    fn get(&mut self, key: &str, out: &mut dyn ConsoleOutput) -> i32 {
        if key.len() > MAX_KEY_LEN {
            let _ = writeln!(out, "key too long (max {})", MAX_KEY_LEN);
            return STATUS_FAILED;
        }

        let mut buf = [0u8; MAX_VALUE_LEN + 1];
        match self.nvs.get_str(key, &mut buf) {
            Ok(Some(value)) => {
                let _ = writeln!(out, "{}={}", key, value);
                STATUS_OK
            }
            Ok(None) => {
                let _ = writeln!(out, "{} not set", key);
                STATUS_FAILED
            }
            Err(e) => Self::storage_error(out, e),
        }
    }

    fn set(&mut self, key: &str, value: &str, out: &mut dyn ConsoleOutput) -> i32 {
        if key.len() > MAX_KEY_LEN {
            let _ = writeln!(out, "key too long (max {})", MAX_KEY_LEN);
            return STATUS_FAILED;
        }
        if value.len() > MAX_VALUE_LEN {
            let _ = writeln!(out, "value too long (max {})", MAX_VALUE_LEN);
            return STATUS_FAILED;
        }

        match self.nvs.set_str(key, value) {
            Ok(()) => {
                self.pending += 1;
                let _ = writeln!(out, "{}={}", key, value);
                STATUS_OK
            }
            Err(e) => Self::storage_error(out, e),
        }
    }

    fn save(&mut self, out: &mut dyn ConsoleOutput) -> i32 {
        let _ = writeln!(out, "saved writes={}", self.pending);
        self.pending = 0;
        STATUS_OK
    }
}
