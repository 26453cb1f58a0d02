//! # Platform Compatibility
//!
//! Decides whether a game listed for one platform can be offered to a
//! customer asking for another.
//!
//! ## Compatibility Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compatible(a, b) ⇔ family(a) == family(b)                              │
//! │                     AND (gen(a) == "any" OR gen(b) == "any"             │
//! │                          OR gen(a) == gen(b))                           │
//! │                                                                         │
//! │            Xbox          PlayStation         PC                         │
//! │        ┌──────────┐     ┌──────────┐     ┌──────────┐                  │
//! │        │ One      │     │ 4        │     │ Windows  │◄──┐              │
//! │        │ SeriesX  │     │ 5        │     │ Mac      │◄──┼── any        │
//! │        │ SeriesS  │     └──────────┘     │ Linux    │◄──┘              │
//! │        └──────────┘                      └──────────┘                  │
//! │                                                                         │
//! │  Missing or unrecognised platform on either side → NOT compatible      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation label that matches every generation of the same family.
pub const ANY_GENERATION: &str = "any";

// =============================================================================
// Platform Family
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformFamily {
    Xbox,
    PlayStation,
    Pc,
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformFamily::Xbox => "Xbox",
            PlatformFamily::PlayStation => "PlayStation",
            PlatformFamily::Pc => "PC",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Platform
// =============================================================================

/// A concrete platform (family + generation) a game runs on.
///
/// Stored in the database as its SCREAMING_SNAKE code (`XBOX_SERIES_X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    XboxOne,
    XboxSeriesX,
    XboxSeriesS,
    Ps4,
    Ps5,
    PcWindows,
    PcMac,
    PcLinux,
    /// Any PC operating system.
    PcAny,
}

impl Platform {
    /// Every platform, in catalogue order.
    pub const ALL: [Platform; 9] = [
        Platform::XboxOne,
        Platform::XboxSeriesX,
        Platform::XboxSeriesS,
        Platform::Ps4,
        Platform::Ps5,
        Platform::PcWindows,
        Platform::PcMac,
        Platform::PcLinux,
        Platform::PcAny,
    ];

    /// The platforms a customer can ask for (every concrete generation).
    pub const SELECTABLE: [Platform; 8] = [
        Platform::XboxOne,
        Platform::XboxSeriesX,
        Platform::XboxSeriesS,
        Platform::Ps4,
        Platform::Ps5,
        Platform::PcWindows,
        Platform::PcMac,
        Platform::PcLinux,
    ];

    pub const fn family(&self) -> PlatformFamily {
        match self {
            Platform::XboxOne | Platform::XboxSeriesX | Platform::XboxSeriesS => {
                PlatformFamily::Xbox
            }
            Platform::Ps4 | Platform::Ps5 => PlatformFamily::PlayStation,
            Platform::PcWindows | Platform::PcMac | Platform::PcLinux | Platform::PcAny => {
                PlatformFamily::Pc
            }
        }
    }

    pub const fn generation(&self) -> &'static str {
        match self {
            Platform::XboxOne => "One",
            Platform::XboxSeriesX => "SeriesX",
            Platform::XboxSeriesS => "SeriesS",
            Platform::Ps4 => "4",
            Platform::Ps5 => "5",
            Platform::PcWindows => "Windows",
            Platform::PcMac => "Mac",
            Platform::PcLinux => "Linux",
            Platform::PcAny => ANY_GENERATION,
        }
    }

    /// Storage code for this platform.
    pub const fn code(&self) -> &'static str {
        match self {
            Platform::XboxOne => "XBOX_ONE",
            Platform::XboxSeriesX => "XBOX_SERIES_X",
            Platform::XboxSeriesS => "XBOX_SERIES_S",
            Platform::Ps4 => "PS4",
            Platform::Ps5 => "PS5",
            Platform::PcWindows => "PC_WINDOWS",
            Platform::PcMac => "PC_MAC",
            Platform::PcLinux => "PC_LINUX",
            Platform::PcAny => "PC_ANY",
        }
    }

    /// Parses a storage code. Unknown codes yield `None`, which the
    /// compatibility check treats as incompatible with everything.
    pub fn from_code(code: &str) -> Option<Platform> {
        let code = code.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Compatibility between two known platforms.
    pub fn is_compatible_with(&self, other: &Platform) -> bool {
        if self.family() != other.family() {
            return false;
        }

        let (a, b) = (self.generation(), other.generation());
        a == ANY_GENERATION || b == ANY_GENERATION || a == b
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ps4 | Platform::Ps5 => write!(f, "PS{}", self.generation()),
            Platform::PcAny => write!(f, "PC (any)"),
            _ => write!(f, "{} {}", self.family(), self.generation()),
        }
    }
}

// =============================================================================
// Compatibility Predicate
// =============================================================================

/// Whether a game on `item` can be offered for a request on `requested`.
///
/// Fails closed: an absent platform on either side is never compatible.
/// Symmetric in its arguments.
pub fn is_compatible(item: Option<Platform>, requested: Option<Platform>) -> bool {
    match (item, requested) {
        (Some(item), Some(requested)) => item.is_compatible_with(&requested),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_platform_compatible() {
        for p in Platform::ALL {
            assert!(is_compatible(Some(p), Some(p)), "{p} with itself");
        }
    }

    #[test]
    fn test_compatibility_is_symmetric() {
        for a in Platform::ALL {
            for b in Platform::ALL {
                assert_eq!(
                    is_compatible(Some(a), Some(b)),
                    is_compatible(Some(b), Some(a)),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_any_generation_matches_its_family_only() {
        assert!(is_compatible(Some(Platform::PcAny), Some(Platform::PcWindows)));
        assert!(is_compatible(Some(Platform::PcLinux), Some(Platform::PcAny)));
        assert!(is_compatible(Some(Platform::PcAny), Some(Platform::PcAny)));
        assert!(!is_compatible(Some(Platform::PcAny), Some(Platform::Ps5)));
        assert!(!is_compatible(Some(Platform::XboxOne), Some(Platform::PcAny)));
    }

    #[test]
    fn test_different_generations_incompatible() {
        assert!(!is_compatible(Some(Platform::Ps4), Some(Platform::Ps5)));
        assert!(!is_compatible(Some(Platform::XboxSeriesX), Some(Platform::XboxSeriesS)));
        assert!(!is_compatible(Some(Platform::PcMac), Some(Platform::PcWindows)));
    }

    #[test]
    fn test_missing_platform_fails_closed() {
        assert!(!is_compatible(None, Some(Platform::Ps5)));
        assert!(!is_compatible(Some(Platform::Ps5), None));
        assert!(!is_compatible(None, None));
    }

    #[test]
    fn test_code_round_trip_and_unknown() {
        for p in Platform::ALL {
            assert_eq!(Platform::from_code(p.code()), Some(p));
        }
        assert_eq!(Platform::from_code("ps5"), Some(Platform::Ps5));
        assert_eq!(Platform::from_code("DREAMCAST"), None);
        assert!(!is_compatible(Platform::from_code("DREAMCAST"), Some(Platform::Ps5)));
    }

    #[test]
    fn test_serde_uses_storage_code() {
        let json = serde_json::to_string(&Platform::XboxSeriesX).unwrap();
        assert_eq!(json, "\"XBOX_SERIES_X\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::Ps5.to_string(), "PS5");
        assert_eq!(Platform::XboxSeriesS.to_string(), "Xbox SeriesS");
        assert_eq!(Platform::PcAny.to_string(), "PC (any)");
    }
}
