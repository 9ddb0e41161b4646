use core::fmt;

use crate::{EncodingError, constants::*};

#[doc = r#"
The quantum basis of a document.

This is either the musical convention of 96 quanta per quarter note
(value `-1`, the default) or a fixed sample rate in Hz: `44100`, `48000`,
or anything in `[1, 1024]`. The basis only changes how note times are
interpreted, never the stored values.

# Example
```rust
# use nmf::prelude::*;
let basis = Basis::new(48_000).unwrap();
assert_eq!(basis.hz(), Some(48_000));
assert_eq!(basis.code(), 2);

assert_eq!(Basis::default().quanta_per_quarter(), Some(96));
assert!(Basis::new(1025).is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32", into = "i32"))]
pub struct Basis(i32);

impl Basis {
    /// 96 quanta per quarter note
    pub const QUARTER_NOTE: Self = Self(BASIS_QUARTER_NOTE);
    /// CD sample rate
    pub const HZ_44100: Self = Self(44_100);
    /// DAT sample rate
    pub const HZ_48000: Self = Self(48_000);

    /// Validates a raw basis value
    pub const fn new(value: i32) -> Result<Self, EncodingError> {
        match value {
            BASIS_QUARTER_NOTE | 44_100 | 48_000 | MIN_BASIS_HZ..=MAX_BASIS_HZ => Ok(Self(value)),
            v => Err(EncodingError::Basis(v as i64)),
        }
    }

    /// Decodes the 16-bit header field
    pub const fn from_code(code: u16) -> Result<Self, EncodingError> {
        match code {
            0 => Ok(Self::QUARTER_NOTE),
            1 => Ok(Self::HZ_44100),
            2 => Ok(Self::HZ_48000),
            c if c >= BASIS_HZ_CODE_OFFSET + 1
                && c <= MAX_BASIS_HZ as u16 + BASIS_HZ_CODE_OFFSET =>
            {
                Ok(Self((c - BASIS_HZ_CODE_OFFSET) as i32))
            }
            c => Err(EncodingError::BasisCode(c)),
        }
    }

    /// Encodes the basis for the header.
    ///
    /// Every constructed basis has a code.
    pub const fn code(&self) -> u16 {
        match self.0 {
            BASIS_QUARTER_NOTE => 0,
            44_100 => 1,
            48_000 => 2,
            hz => hz as u16 + BASIS_HZ_CODE_OFFSET,
        }
    }

    /// The signed basis value
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Returns Some if time is counted in quanta per quarter note
    pub const fn quanta_per_quarter(&self) -> Option<u16> {
        match self.0 {
            BASIS_QUARTER_NOTE => Some(QUANTA_PER_QUARTER),
            _ => None,
        }
    }

    /// Returns Some if time is counted at a fixed rate
    pub const fn hz(&self) -> Option<u32> {
        match self.0 {
            BASIS_QUARTER_NOTE => None,
            hz => Some(hz as u32),
        }
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::QUARTER_NOTE
    }
}

impl TryFrom<i32> for Basis {
    type Error = EncodingError;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Basis> for i32 {
    fn from(value: Basis) -> Self {
        value.0
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quanta_per_quarter() {
            Some(q) => write!(f, "{q} quanta per quarter note"),
            None => write!(f, "{} Hz", self.0),
        }
    }
}

#[test]
fn basis_code_table() {
    use pretty_assertions::assert_eq;
    assert_eq!(Basis::from_code(0), Ok(Basis::QUARTER_NOTE));
    assert_eq!(Basis::from_code(1), Ok(Basis::HZ_44100));
    assert_eq!(Basis::from_code(2), Ok(Basis::HZ_48000));
    assert_eq!(Basis::from_code(3).map(|b| b.value()), Ok(1));
    assert_eq!(Basis::from_code(1026).map(|b| b.value()), Ok(1024));
    assert_eq!(Basis::from_code(1027), Err(EncodingError::BasisCode(1027)));
    assert_eq!(Basis::from_code(u16::MAX), Err(EncodingError::BasisCode(u16::MAX)));

    for code in 0..=1026 {
        assert_eq!(Basis::from_code(code).unwrap().code(), code);
    }
}

#[test]
fn basis_legal_values() {
    use pretty_assertions::assert_eq;
    for value in [-1, 1, 512, 1024, 44_100, 48_000] {
        assert_eq!(Basis::new(value).map(|b| b.value()), Ok(value));
    }
    for value in [-2, 0, 1025, 22_050, 96_000] {
        assert_eq!(Basis::new(value), Err(EncodingError::Basis(value.into())));
    }
}

#[test]
fn basis_display() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    assert_eq!(Basis::QUARTER_NOTE.to_string(), "96 quanta per quarter note");
    assert_eq!(Basis::HZ_44100.to_string(), "44100 Hz");
}
