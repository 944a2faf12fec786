//! StateFlags markers: ids, tri-state activation values, and the category
//! deny-list shared by the reader and writer.

pub mod reader;
pub mod writer;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::InputError;

/// Prefix of every marker value name in the store.
pub const STATE_FLAGS_PREFIX: &str = "StateFlags";

/// Raw DWORD written for a disabled category.
pub const RAW_DISABLED: u32 = 0;

/// Raw DWORD written for an enabled category.
pub const RAW_ENABLED: u32 = 2;

/// Categories never written by the automated writer.
///
/// Content indexing, delivery optimization, driver packages, game files and
/// sync files are unsafe or pointless to automate; the exclusion is a fixed
/// safety policy, not configuration. Names must match the registry sub-key
/// names exactly.
pub const EXCLUDED_CATEGORIES: [&str; 7] = [
    "Content Indexer Cleaner",
    "Delivery Optimization Files",
    "Device Driver Packages",
    "GameNewsFiles",
    "GameStatisticsFiles",
    "GameUpdateFiles",
    "Temporary Sync Files",
];

/// A numbered activation profile, `0000`–`9999`.
///
/// Marker ids render as exactly four zero-padded digits wherever they
/// appear: value names, display output, and JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u16);

impl MarkerId {
    /// Validate a raw id into a marker, rejecting anything above 9999.
    ///
    /// # Errors
    ///
    /// [`InputError::MarkerOutOfRange`] for ids outside `0..=9999`.
    pub fn new(id: u32) -> Result<Self, InputError> {
        if id > 9999 {
            return Err(InputError::MarkerOutOfRange(id));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(id as u16))
    }

    /// The registry value name for this marker, e.g. `StateFlags0007`.
    #[must_use]
    pub fn value_name(self) -> String {
        format!("{STATE_FLAGS_PREFIX}{self}")
    }

    /// Parse a registry value name back into a marker.
    ///
    /// Only names of the exact shape `StateFlags` + four digits qualify;
    /// anything else (wrong prefix, three or five digits, trailing junk)
    /// returns `None`.
    #[must_use]
    pub fn from_value_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix(STATE_FLAGS_PREFIX)?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u16>().ok().map(Self)
    }

    /// The numeric id.
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl Serialize for MarkerId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Tri-state activation of a category under one marker.
///
/// Raw store values other than 0 and 2 are deliberately preserved as
/// [`Activation::Unset`] rather than coerced to disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Raw value 2: the category is selected for this marker.
    Enabled,
    /// Raw value 0: the category is explicitly deselected.
    Disabled,
    /// Any other raw value: ambiguous, reported as-is.
    Unset,
}

impl Activation {
    /// Interpret a raw DWORD from the store.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            RAW_DISABLED => Self::Disabled,
            RAW_ENABLED => Self::Enabled,
            _ => Self::Unset,
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
            Self::Unset => write!(f, "unset"),
        }
    }
}

/// Read-only view of one marker's activation across all categories.
///
/// Categories that do not define the marker are absent from the map, which
/// is distinct from [`Activation::Unset`]. Built fresh on every read; the
/// registry remains the persistent store.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationRecord {
    /// The marker this record describes.
    pub marker: MarkerId,
    /// Activation value per category that defines this marker.
    pub categories: BTreeMap<String, Activation>,
}

/// Normalize a category name into a selection token by stripping all
/// whitespace, e.g. `"Temporary Setup Files"` → `"TemporarySetupFiles"`.
#[must_use]
pub fn normalize_token(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
