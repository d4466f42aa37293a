//! Selection model for the libvips Windows binary download page.
//!
//! A [`Selection`] is the combination of architecture, variant, linking mode
//! and version a visitor picked. The rule table in [`constraints`] keeps it
//! valid as choices change.

pub mod constraints;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use constraints::{apply, enforce, is_disabled, is_valid};

/// CPU architecture of the Windows build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    W32,
    #[default]
    W64,
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [Architecture::W32, Architecture::W64, Architecture::Arm64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::W32 => "w32",
            Architecture::W64 => "w64",
            Architecture::Arm64 => "arm64",
        }
    }
}

/// Packaging flavor of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Only the loaders needed for web image formats.
    #[default]
    Web,
    /// Every loader, including the GPL-licensed ones.
    All,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Web, Variant::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Web => "web",
            Variant::All => "all",
        }
    }
}

/// How dependent libraries are bound into the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Linking {
    #[default]
    Shared,
    Static,
    /// Static build exposing only the C API, for FFI consumers.
    StaticFfi,
}

impl Linking {
    pub const ALL: [Linking; 3] = [Linking::Shared, Linking::Static, Linking::StaticFfi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Linking::Shared => "shared",
            Linking::Static => "static",
            Linking::StaticFfi => "static-ffi",
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Linking::Static | Linking::StaticFfi)
    }

    /// Filename suffix for this linking mode. Shared builds carry none.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Linking::Shared => None,
            other => Some(other.as_str()),
        }
    }
}

macro_rules! impl_choice_str {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let accepted: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        anyhow!(
                            "Invalid {} '{}'. Expected one of: {}",
                            $field,
                            s,
                            accepted.join(", ")
                        )
                    })
            }
        }
    };
}

impl_choice_str!(Architecture, "architecture");
impl_choice_str!(Variant, "variant");
impl_choice_str!(Linking, "linking");

/// A single option button: one value of one input group.
///
/// Doubles as the change event fed to [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Architecture(Architecture),
    Variant(Variant),
    Linking(Linking),
}

impl Choice {
    /// Name of the input group the option belongs to.
    pub fn group(&self) -> &'static str {
        match self {
            Choice::Architecture(_) => "architecture",
            Choice::Variant(_) => "variant",
            Choice::Linking(_) => "linking",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Choice::Architecture(a) => a.as_str(),
            Choice::Variant(v) => v.as_str(),
            Choice::Linking(l) => l.as_str(),
        }
    }

    /// Every option on the page, in display order.
    pub fn all() -> impl Iterator<Item = Choice> {
        Architecture::ALL
            .into_iter()
            .map(Choice::Architecture)
            .chain(Variant::ALL.into_iter().map(Choice::Variant))
            .chain(Linking::ALL.into_iter().map(Choice::Linking))
    }
}

impl From<Architecture> for Choice {
    fn from(value: Architecture) -> Self {
        Choice::Architecture(value)
    }
}

impl From<Variant> for Choice {
    fn from(value: Variant) -> Self {
        Choice::Variant(value)
    }
}

impl From<Linking> for Choice {
    fn from(value: Linking) -> Self {
        Choice::Linking(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub architecture: Architecture,
    pub variant: Variant,
    pub linking: Linking,
    pub version: String,
}

impl Selection {
    /// Initial selection for a detected architecture.
    ///
    /// Arm64 only ships static builds, so it starts on `static`.
    pub fn defaults_for(architecture: Architecture, version: impl Into<String>) -> Self {
        let linking = if architecture == Architecture::Arm64 {
            Linking::Static
        } else {
            Linking::Shared
        };

        Self {
            architecture,
            variant: Variant::Web,
            linking,
            version: version.into(),
        }
    }

    pub fn is_selected(&self, choice: Choice) -> bool {
        match choice {
            Choice::Architecture(a) => self.architecture == a,
            Choice::Variant(v) => self.variant == v,
            Choice::Linking(l) => self.linking == l,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("w32".parse::<Architecture>().unwrap(), Architecture::W32);
        assert_eq!("ARM64".parse::<Architecture>().unwrap(), Architecture::Arm64);
        assert_eq!("all".parse::<Variant>().unwrap(), Variant::All);
        assert_eq!(
            "static-ffi".parse::<Linking>().unwrap(),
            Linking::StaticFfi
        );
    }

    #[test]
    fn test_parse_invalid_lists_accepted_values() {
        let err = "x86".parse::<Architecture>().unwrap_err().to_string();
        assert!(err.contains("Invalid architecture 'x86'"));
        assert!(err.contains("w32, w64, arm64"));

        let err = "dynamic".parse::<Linking>().unwrap_err().to_string();
        assert!(err.contains("shared, static, static-ffi"));
    }

    #[test]
    fn test_linking_suffix() {
        assert_eq!(Linking::Shared.suffix(), None);
        assert_eq!(Linking::Static.suffix(), Some("static"));
        assert_eq!(Linking::StaticFfi.suffix(), Some("static-ffi"));
        assert!(Linking::StaticFfi.is_static());
        assert!(!Linking::Shared.is_static());
    }

    #[test]
    fn test_defaults_for_architecture() {
        let s = Selection::defaults_for(Architecture::W64, "8.15.0");
        assert_eq!(s.variant, Variant::Web);
        assert_eq!(s.linking, Linking::Shared);

        let s = Selection::defaults_for(Architecture::Arm64, "8.15.0");
        assert_eq!(s.linking, Linking::Static);
    }

    #[test]
    fn test_choice_all_covers_every_option() {
        let values: Vec<&str> = Choice::all().map(|c| c.value()).collect();
        assert_eq!(
            values,
            vec!["w32", "w64", "arm64", "web", "all", "shared", "static", "static-ffi"]
        );
    }

    #[test]
    fn test_serde_names_match_option_values() {
        let json = serde_json::to_string(&Linking::StaticFfi).unwrap();
        assert_eq!(json, r#""static-ffi""#);
        let json = serde_json::to_string(&Architecture::Arm64).unwrap();
        assert_eq!(json, r#""arm64""#);
    }
}
