//! Regex compilation flags.
//!
//! Bit values follow the flag integers of Python's `re` module, so flag
//! values carried over from existing filter definitions keep their meaning.

use crate::core::PatternError;

use regex::bytes::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bit set of flags applied to every pattern of a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternFlags(u32);

impl PatternFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Case-insensitive matching.
    pub const IGNORECASE: Self = Self(2);
    /// `^` and `$` match at line boundaries.
    pub const MULTILINE: Self = Self(8);
    /// `.` matches newlines.
    pub const DOTALL: Self = Self(16);
    /// Unicode-aware classes and case folding. Always on unless `ASCII` is set.
    pub const UNICODE: Self = Self(32);
    /// Whitespace and `#` comments in patterns are ignored.
    pub const VERBOSE: Self = Self(64);
    /// ASCII-only classes and case folding.
    ///
    /// `.` and negated classes then match single bytes rather than characters.
    pub const ASCII: Self = Self(256);

    const KNOWN: u32 = Self::IGNORECASE.0
        | Self::MULTILINE.0
        | Self::DOTALL.0
        | Self::UNICODE.0
        | Self::VERBOSE.0
        | Self::ASCII.0;

    /// Creates a flag set from raw bits. Unknown bits are rejected when
    /// patterns are compiled.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if all flags in `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn validate(self) -> Result<(), PatternError> {
        let unknown = self.0 & !Self::KNOWN;
        if unknown != 0 {
            return Err(PatternError::UnsupportedFlags { bits: unknown });
        }
        if self.contains(Self::UNICODE | Self::ASCII) {
            return Err(PatternError::ConflictingFlags {
                bits: (Self::UNICODE | Self::ASCII).0,
            });
        }
        Ok(())
    }

    pub(crate) fn apply(self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.contains(Self::IGNORECASE))
            .multi_line(self.contains(Self::MULTILINE))
            .dot_matches_new_line(self.contains(Self::DOTALL))
            .ignore_whitespace(self.contains(Self::VERBOSE))
            .unicode(!self.contains(Self::ASCII));
    }
}

impl BitOr for PatternFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PatternFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        let mut flags = PatternFlags::IGNORECASE | PatternFlags::DOTALL;
        assert!(flags.contains(PatternFlags::IGNORECASE));
        assert!(!flags.contains(PatternFlags::MULTILINE));

        flags |= PatternFlags::MULTILINE;
        assert_eq!(flags.bits(), 2 | 8 | 16);
        assert!(flags.validate().is_ok());
    }

    #[test]
    fn test_python_flag_values() {
        assert_eq!(PatternFlags::from_bits(2), PatternFlags::IGNORECASE);
        assert_eq!(PatternFlags::from_bits(8), PatternFlags::MULTILINE);
        assert_eq!(PatternFlags::from_bits(16), PatternFlags::DOTALL);
        assert_eq!(PatternFlags::from_bits(32), PatternFlags::UNICODE);
        assert_eq!(PatternFlags::from_bits(64), PatternFlags::VERBOSE);
        assert_eq!(PatternFlags::from_bits(256), PatternFlags::ASCII);
        assert!(PatternFlags::from_bits(32).validate().is_ok());
    }

    #[test]
    fn test_unknown_bits_rejected() {
        // 4 is the locale flag, which only applies to byte patterns.
        let err = PatternFlags::from_bits(4 | 2).validate().unwrap_err();
        assert!(matches!(err, PatternError::UnsupportedFlags { bits: 4 }));
    }

    #[test]
    fn test_unicode_and_ascii_conflict() {
        let err = (PatternFlags::UNICODE | PatternFlags::ASCII)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PatternError::ConflictingFlags { bits: 288 }));
    }
}
