//! Stem-branch pairs and the 60-term sexagenary cycle.
//!
//! Position `n` of the cycle pairs stem `n mod 10` with branch `n mod 12`;
//! only same-parity pairs occur. The inverse is the CRT solution
//! `n = (6·stem − 5·branch) mod 60`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::stem::Stem;

/// Length of the sexagenary cycle.
pub const CYCLE_LEN: i64 = 60;

/// An ordered (stem, branch) pair; one term of the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GanZhi {
    pub stem: Stem,
    pub branch: Branch,
}

const fn build_cycle() -> [GanZhi; 60] {
    let mut table = [GanZhi {
        stem: Stem::Gap,
        branch: Branch::Ja,
    }; 60];
    let mut i = 0;
    while i < 60 {
        table[i] = GanZhi {
            stem: Stem::from_index(i as i64),
            branch: Branch::from_index(i as i64),
        };
        i += 1;
    }
    table
}

/// The 60 pairs in cycle order (index 0 = 갑자, 59 = 계해).
pub const SEXAGENARY_CYCLE: [GanZhi; 60] = build_cycle();

impl GanZhi {
    /// Pair a stem and branch, rejecting mixed-parity pairs.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        if stem.index() % 2 != branch.index() % 2 {
            return Err(BaseError::InvalidPair {
                stem: stem.hangul(),
                branch: branch.hangul(),
            });
        }
        Ok(Self { stem, branch })
    }

    /// Pair at a cycle position; any integer wraps into 0..60.
    pub const fn from_cycle_index(i: i64) -> Self {
        SEXAGENARY_CYCLE[i.rem_euclid(CYCLE_LEN) as usize]
    }

    /// Pair at an exact cycle position, failing outside 0..60.
    pub fn try_from_cycle_index(i: i64) -> Result<Self, BaseError> {
        if !(0..CYCLE_LEN).contains(&i) {
            return Err(BaseError::OutOfRangeCycleIndex(i));
        }
        Ok(SEXAGENARY_CYCLE[i as usize])
    }

    /// Position in the cycle (0..60).
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(CYCLE_LEN) as u8
    }

    /// Step `n` positions along the cycle (negative steps go backwards).
    pub const fn step(self, n: i64) -> Self {
        Self::from_cycle_index(self.cycle_index() as i64 + n)
    }

    /// Two-character Hangul form, e.g. `갑자`.
    pub fn hangul(self) -> String {
        [self.stem.hangul(), self.branch.hangul()].iter().collect()
    }

    /// Two-character Hanja form, e.g. `甲子`.
    pub fn hanja(self) -> String {
        [self.stem.hanja(), self.branch.hanja()].iter().collect()
    }
}

impl Display for GanZhi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.hangul(), self.branch.hangul())
    }
}

impl FromStr for GanZhi {
    type Err = BaseError;

    /// Accepts two characters in Hangul or Hanja (scripts may be mixed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(sc), Some(bc), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::UnknownNotation(s.to_string()));
        };
        let stem = Stem::from_char(sc).ok_or_else(|| BaseError::UnknownNotation(s.to_string()))?;
        let branch =
            Branch::from_char(bc).ok_or_else(|| BaseError::UnknownNotation(s.to_string()))?;
        Self::new(stem, branch)
    }
}

impl Serialize for GanZhi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hangul())
    }
}

impl<'de> Deserialize<'de> for GanZhi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints() {
        assert_eq!(SEXAGENARY_CYCLE[0].to_string(), "갑자");
        assert_eq!(SEXAGENARY_CYCLE[1].to_string(), "을축");
        assert_eq!(SEXAGENARY_CYCLE[59].to_string(), "계해");
        assert_eq!(SEXAGENARY_CYCLE[54].to_string(), "무오");
    }

    #[test]
    fn index_roundtrip_full_cycle() {
        for (i, gz) in SEXAGENARY_CYCLE.iter().enumerate() {
            assert_eq!(gz.cycle_index() as usize, i);
            assert_eq!(GanZhi::from_cycle_index(i as i64), *gz);
        }
    }

    #[test]
    fn mixed_parity_rejected() {
        assert!(GanZhi::new(Stem::Gap, Branch::Chuk).is_err());
        assert!(GanZhi::new(Stem::Eul, Branch::Chuk).is_ok());
    }

    #[test]
    fn strict_index_rejects_out_of_range() {
        assert_eq!(
            GanZhi::try_from_cycle_index(60),
            Err(BaseError::OutOfRangeCycleIndex(60))
        );
        assert!(GanZhi::try_from_cycle_index(-1).is_err());
        assert!(GanZhi::try_from_cycle_index(59).is_ok());
    }

    #[test]
    fn step_wraps() {
        let gapja = GanZhi::from_cycle_index(0);
        assert_eq!(gapja.step(-1).to_string(), "계해");
        assert_eq!(gapja.step(61).to_string(), "을축");
    }

    #[test]
    fn parse_either_script() {
        let a: GanZhi = "갑자".parse().unwrap();
        let b: GanZhi = "甲子".parse().unwrap();
        let c: GanZhi = "갑子".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(b.hanja(), "甲子");
        assert!("갑축".parse::<GanZhi>().is_err());
        assert!("갑".parse::<GanZhi>().is_err());
        assert!("갑자자".parse::<GanZhi>().is_err());
    }

    #[test]
    fn serde_as_hangul_string() {
        let gz: GanZhi = "경오".parse().unwrap();
        let json = serde_json::to_string(&gz).unwrap();
        assert_eq!(json, "\"경오\"");
        let back: GanZhi = serde_json::from_str("\"庚午\"").unwrap();
        assert_eq!(back, gz);
    }
}
