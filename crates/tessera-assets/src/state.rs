//! Per-entry load and drop policies.

use std::fmt;

use tessera_core::parser::ParseValue;

/// When an entry is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadTime {
    /// As soon as the reference is taken.
    Now,
    /// On first access.
    #[default]
    Later,
}

/// Which loading strategy fills an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStyle {
    /// Reported for unknown ids; no strategy can load it.
    #[default]
    FromUnknown,
    FromFile,
    FromMemory,
    FromNetwork,
}

/// When an unreferenced entry is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropTime {
    /// Reported for unknown ids. Behaves as [`DropTime::AtZero`].
    #[default]
    Unspecified,
    /// As soon as the reference count reaches zero.
    AtZero,
    /// When the owning handler is dropped.
    AtExit,
}

impl DropTime {
    /// Whether an entry with this policy is removed when its count hits zero.
    pub fn drops_at_zero(self) -> bool {
        !matches!(self, DropTime::AtExit)
    }
}

impl LoadTime {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadTime::Now => "now",
            LoadTime::Later => "later",
        }
    }
}

impl LoadStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadStyle::FromUnknown => "unknown",
            LoadStyle::FromFile => "file",
            LoadStyle::FromMemory => "memory",
            LoadStyle::FromNetwork => "network",
        }
    }
}

impl DropTime {
    pub fn as_str(self) -> &'static str {
        match self {
            DropTime::Unspecified => "unspecified",
            DropTime::AtZero => "zero",
            DropTime::AtExit => "exit",
        }
    }
}

macro_rules! text_policy {
    ($ty:ty { $($text:literal => $variant:expr),* $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ParseValue for $ty {
            fn parse_value(text: &str) -> Option<Self> {
                match text.trim().to_ascii_lowercase().as_str() {
                    $($text => Some($variant),)*
                    _ => None,
                }
            }

            fn format_value(&self) -> String {
                self.as_str().to_string()
            }
        }
    };
}

text_policy!(LoadTime {
    "now" => LoadTime::Now,
    "later" => LoadTime::Later,
});

text_policy!(LoadStyle {
    "unknown" => LoadStyle::FromUnknown,
    "file" => LoadStyle::FromFile,
    "memory" => LoadStyle::FromMemory,
    "network" => LoadStyle::FromNetwork,
});

text_policy!(DropTime {
    "unspecified" => DropTime::Unspecified,
    "zero" => DropTime::AtZero,
    "exit" => DropTime::AtExit,
});
