//! Settings extension interface
//!
//! The `settings` command only talks to [`SettingsHooks`]. Each hook has a
//! default body that reports "not implemented" and succeeds, so a console
//! without storage stays navigable. Backends override any subset.

use super::error::{STATUS_FAILED, STATUS_OK};
use super::ConsoleOutput;

/// Backend for `settings get|set|save`.
///
/// Return values are passed through to the front end unchanged.
pub trait SettingsHooks {
    fn get(&mut self, key: &str, out: &mut dyn ConsoleOutput) -> i32 {
        let _ = writeln!(out, "settings.get not implemented for key='{}'", key);
        STATUS_OK
    }

    fn set(&mut self, key: &str, value: &str, out: &mut dyn ConsoleOutput) -> i32 {
        let _ = writeln!(out, "settings.set not implemented for key='{}' value='{}'", key, value);
        STATUS_OK
    }

    fn save(&mut self, out: &mut dyn ConsoleOutput) -> i32 {
        let _ = writeln!(out, "settings.save not implemented");
        STATUS_OK
    }
}

/// No backend: every hook uses the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSettings;

impl SettingsHooks for NoSettings {}

/// Maximum key length (matches the NVS key limit).
pub const MAX_KEY_LEN: usize = 15;

/// Maximum value length.
pub const MAX_VALUE_LEN: usize = 64;

#[derive(Clone, Copy)]
struct Slot {
    key: [u8; MAX_KEY_LEN],
    key_len: u8,
    value: [u8; MAX_VALUE_LEN],
    value_len: u8,
}

impl Slot {
    const EMPTY: Self = Self {
        key: [0; MAX_KEY_LEN],
        key_len: 0,
        value: [0; MAX_VALUE_LEN],
        value_len: 0,
    };

    fn key(&self) -> &str {
        core::str::from_utf8(&self.key[..self.key_len as usize]).unwrap_or("")
    }

    fn value(&self) -> &str {
        core::str::from_utf8(&self.value[..self.value_len as usize]).unwrap_or("")
    }

    fn set_value(&mut self, value: &str) {
        self.value[..value.len()].copy_from_slice(value.as_bytes());
        self.value_len = value.len() as u8;
    }
}

/// RAM-only settings table.
///
/// `set` stages a value; `save` commits staged values. Reads see staged
/// values immediately.
pub struct MemorySettings<const N: usize = 16> {
    slots: [Slot; N],
    count: usize,
    dirty: bool,
    commits: u32,
}

impl<const N: usize> MemorySettings<N> {
    pub const fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; N],
            count: 0,
            dirty: false,
            commits: 0,
        }
    }

    /// Current value for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.slots[i].value())
    }

    /// True when `set` ran since the last `save`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of successful saves.
    pub fn commits(&self) -> u32 {
        self.commits
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.slots[..self.count].iter().position(|s| s.key() == key)
    }
}

impl<const N: usize> Default for MemorySettings<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SettingsHooks for MemorySettings<N> {
    fn get(&mut self, key: &str, out: &mut dyn ConsoleOutput) -> i32 {
        match self.value(key) {
            Some(value) => {
                let _ = writeln!(out, "{}={}", key, value);
                STATUS_OK
            }
            None => {
                let _ = writeln!(out, "{} not set", key);
                STATUS_FAILED
            }
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

        let idx = match self.position(key) {
            Some(i) => i,
            None if self.count < N => {
                let slot = &mut self.slots[self.count];
                slot.key[..key.len()].copy_from_slice(key.as_bytes());
                slot.key_len = key.len() as u8;
                self.count += 1;
                self.count - 1
            }
            None => {
                let _ = writeln!(out, "settings table full");
                return STATUS_FAILED;
            }
        };

        self.slots[idx].set_value(value);
        self.dirty = true;
        let _ = writeln!(out, "{}={}", key, value);
        STATUS_OK
    }

    fn save(&mut self, out: &mut dyn ConsoleOutput) -> i32 {
        if self.dirty {
            self.commits += 1;
            self.dirty = false;
        }
        let _ = writeln!(out, "saved entries={}", self.count);
        STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_settings_set_get_save() {
        let mut settings = MemorySettings::<4>::new();
        let mut out = String::new();

        assert_eq!(settings.set("wifi_ssid", "shack", &mut out), 0);
        assert!(settings.is_dirty());
        assert_eq!(settings.get("wifi_ssid", &mut out), 0);
        assert!(out.contains("wifi_ssid=shack"));

        assert_eq!(settings.save(&mut out), 0);
        assert!(!settings.is_dirty());
        assert_eq!(settings.commits(), 1);

        // Nothing staged, no new commit
        assert_eq!(settings.save(&mut out), 0);
        assert_eq!(settings.commits(), 1);
    }

    #[test]
    fn test_memory_settings_overwrite_keeps_one_slot() {
        let mut settings = MemorySettings::<2>::new();
        let mut out = String::new();

        settings.set("k", "1", &mut out);
        settings.set("k", "22", &mut out);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.value("k"), Some("22"));
    }

    #[test]
    fn test_memory_settings_limits() {
        let mut settings = MemorySettings::<1>::new();
        let mut out = String::new();

        assert_eq!(settings.set("a_key_that_is_too_long", "v", &mut out), 1);
        assert_eq!(settings.set("k", &"x".repeat(MAX_VALUE_LEN + 1), &mut out), 1);
        assert_eq!(settings.set("k1", "v", &mut out), 0);
        assert_eq!(settings.set("k2", "v", &mut out), 1);
        assert!(out.contains("settings table full"));
        assert_eq!(settings.get("k2", &mut out), 1);
    }
}
