//! Volume cache configuration store.
//!
//! The Windows disk-cleanup handlers are registered as sub-keys of a fixed
//! registry path; each sub-key is one cleanup category and carries numbered
//! `StateFlags####` DWORD values that select it into a saved cleanup profile.
//! [`CacheStore`] abstracts that store so the reader, writer and orchestrator
//! can be exercised against mocks; [`RegistryStore`] is the real thing.

use crate::error::StoreError;

/// Registry path holding one sub-key per cleanup category.
pub const VOLUME_CACHES_KEY: &str =
    r"SOFTWARE\Microsoft\Windows\CurrentVersion\Explorer\VolumeCaches";

/// Display form of the store root, including the hive.
pub const VOLUME_CACHES_DISPLAY: &str =
    r"HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Explorer\VolumeCaches";

/// Access to the registry-backed volume cache store.
///
/// All operations are single atomic calls into the underlying store; there
/// is no caching and no retry. Categories are identified by their exact
/// sub-key name.
#[cfg_attr(test, mockall::automock)]
pub trait CacheStore: Send + Sync {
    /// List the direct child categories of the volume caches path.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when the path does not exist (unsupported OS
    /// version) and [`StoreError::Access`] when the caller lacks read
    /// permission.
    fn categories(&self) -> Result<Vec<String>, StoreError>;

    /// Read all named DWORD values under one category, as `(name, data)`
    /// pairs. Values of other registry types are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the category key cannot be opened or
    /// enumerated.
    fn values(&self, category: &str) -> Result<Vec<(String, u32)>, StoreError>;

    /// Write a DWORD value under one category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] when the write is rejected due to
    /// permissions (writing under HKLM requires elevation).
    fn set_value(&self, category: &str, name: &str, data: u32) -> Result<(), StoreError>;
}

/// The real registry-backed store.
///
/// Only functional on Windows; on other hosts every operation reports
/// [`StoreError::Unsupported`].
#[derive(Debug, Default)]
pub struct RegistryStore;

impl RegistryStore {
    /// Create a store rooted at the fixed volume caches path.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl CacheStore for RegistryStore {
    fn categories(&self) -> Result<Vec<String>, StoreError> {
        use winreg::RegKey;
        use winreg::enums::HKEY_LOCAL_MACHINE;

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let root = hklm
            .open_subkey(VOLUME_CACHES_KEY)
            .map_err(|e| StoreError::from_io(VOLUME_CACHES_DISPLAY, e))?;

        let mut names = Vec::new();
        for key in root.enum_keys() {
            let name = key.map_err(|e| StoreError::from_io(VOLUME_CACHES_DISPLAY, e))?;
            names.push(name);
        }
        Ok(names)
    }

    fn values(&self, category: &str) -> Result<Vec<(String, u32)>, StoreError> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_LOCAL_MACHINE, REG_DWORD};

        let path = format!(r"{VOLUME_CACHES_KEY}\{category}");
        let display = format!(r"{VOLUME_CACHES_DISPLAY}\{category}");
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm
            .open_subkey(&path)
            .map_err(|e| StoreError::from_io(&display, e))?;

        let mut out = Vec::new();
        for value in key.enum_values() {
            let (name, data) = value.map_err(|e| StoreError::from_io(&display, e))?;
            if data.vtype == REG_DWORD
                && let Some(bytes) = data.bytes.get(..4)
                && let Ok(raw) = bytes.try_into()
            {
                out.push((name, u32::from_le_bytes(raw)));
            }
        }
        Ok(out)
    }

    fn set_value(&self, category: &str, name: &str, data: u32) -> Result<(), StoreError> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_SET_VALUE};

        let path = format!(r"{VOLUME_CACHES_KEY}\{category}");
        let display = format!(r"{VOLUME_CACHES_DISPLAY}\{category}");
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm
            .open_subkey_with_flags(&path, KEY_SET_VALUE)
            .map_err(|e| StoreError::from_io(&display, e))?;
        key.set_value(name, &data)
            .map_err(|e| StoreError::from_io(&display, e))
    }
}

#[cfg(not(windows))]
impl CacheStore for RegistryStore {
    fn categories(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unsupported)
    }

    fn values(&self, _category: &str) -> Result<Vec<(String, u32)>, StoreError> {
        Err(StoreError::Unsupported)
    }

    fn set_value(&self, _category: &str, _name: &str, _data: u32) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }
}
