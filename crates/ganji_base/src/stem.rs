//! The ten heavenly stems (천간).
//!
//! Stems pair off by element in generation order (갑을 Wood, 병정 Fire,
//! 무기 Earth, 경신 Metal, 임계 Water); within each pair the first is yang.

use crate::element::{Element, Polarity};

/// One of the ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in cycle order (index 0 = 갑).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// 0-based index (갑=0 .. 계=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Stem at a cycle position, wrapping modulo 10 (negative values wrap backwards).
    pub const fn from_index(i: i64) -> Self {
        ALL_STEMS[i.rem_euclid(10) as usize]
    }

    /// Step `n` positions along the cycle.
    pub const fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }

    pub const fn element(self) -> Element {
        Element::from_index(self.index() as usize / 2)
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index() as usize)
    }

    /// Korean syllable.
    pub const fn hangul(self) -> char {
        match self {
            Self::Gap => '갑',
            Self::Eul => '을',
            Self::Byeong => '병',
            Self::Jeong => '정',
            Self::Mu => '무',
            Self::Gi => '기',
            Self::Gyeong => '경',
            Self::Sin => '신',
            Self::Im => '임',
            Self::Gye => '계',
        }
    }

    /// Chinese character.
    pub const fn hanja(self) -> char {
        match self {
            Self::Gap => '甲',
            Self::Eul => '乙',
            Self::Byeong => '丙',
            Self::Jeong => '丁',
            Self::Mu => '戊',
            Self::Gi => '己',
            Self::Gyeong => '庚',
            Self::Sin => '辛',
            Self::Im => '壬',
            Self::Gye => '癸',
        }
    }

    /// Parse a single Hangul or Hanja character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '갑' | '甲' => Some(Self::Gap),
            '을' | '乙' => Some(Self::Eul),
            '병' | '丙' => Some(Self::Byeong),
            '정' | '丁' => Some(Self::Jeong),
            '무' | '戊' => Some(Self::Mu),
            '기' | '己' => Some(Self::Gi),
            '경' | '庚' => Some(Self::Gyeong),
            '신' | '辛' => Some(Self::Sin),
            '임' | '壬' => Some(Self::Im),
            '계' | '癸' => Some(Self::Gye),
            _ => None,
        }
    }
}
