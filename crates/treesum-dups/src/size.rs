//! Human-readable byte sizes for the duplicate report.

use std::fmt;

use humansize::{BINARY, FixedAt, FormatSizeOptions, format_size};

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;
const PIB: u64 = 1 << 50;

/// Byte count rendered with binary units.
///
/// The unit is the largest one the value strictly exceeds, so exactly
/// 1024 bytes still prints as `1024B`. Bytes have no decimals; every other
/// unit has two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanSize(pub u64);

impl HumanSize {
    fn unit(self) -> (FixedAt, usize) {
        match self.0 {
            n if n > PIB => (FixedAt::Peta, 2),
            n if n > TIB => (FixedAt::Tera, 2),
            n if n > GIB => (FixedAt::Giga, 2),
            n if n > MIB => (FixedAt::Mega, 2),
            n if n > KIB => (FixedAt::Kilo, 2),
            _ => (FixedAt::Base, 0),
        }
    }
}

impl fmt::Display for HumanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, places) = self.unit();
        let options = FormatSizeOptions::from(BINARY)
            .fixed_at(Some(unit))
            .decimal_places(places)
            .decimal_zeroes(places)
            .space_after_value(false);
        f.write_str(&format_size(self.0, options))
    }
}
