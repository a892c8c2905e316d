use crate::error::Result;
use crate::store::StorageBackend;

const DARK_MODE_KEY: &str = "darkMode";

/// Presentation preferences, persisted through the same storage seam as the
/// collections. Purely cosmetic—nothing here affects stored records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    /// Loads preferences. Anything missing or unreadable falls back to the
    /// default rather than erroring.
    pub fn load<B: StorageBackend>(backend: &B) -> Self {
        let dark_mode = backend
            .read(DARK_MODE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);
        Self { dark_mode }
    }

    pub fn save<B: StorageBackend>(&self, backend: &mut B) -> Result<()> {
        let payload = if self.dark_mode { "true" } else { "false" };
        backend.write(DARK_MODE_KEY, payload)
    }
}
