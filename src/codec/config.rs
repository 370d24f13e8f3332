use serde::{Deserialize, Serialize};

/// Which side keeps a key that is both a declared field and a raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// A present declared value is kept; raw values only fill absent or null keys.
    ///
    /// After a capturing decode every bound key is also a raw value, so
    /// setting a declared field to `None` re-emits the decoded value on
    /// encode. Clearing a field means removing its raw entry too, through
    /// [`Record::raw_values_mut`](crate::Record::raw_values_mut).
    #[default]
    DeclaredWins,
    /// Raw values overwrite declared values under the same key.
    AuxiliaryWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CodecConfig {
    pub overlap: OverlapPolicy,
    /// Refill raw values with every input key after binding.
    pub capture_all: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::DeclaredWins,
            capture_all: true,
        }
    }
}

impl CodecConfig {
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_capture_all(mut self, capture_all: bool) -> Self {
        self.capture_all = capture_all;
        self
    }
}
