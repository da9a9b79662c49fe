//! The twelve earthly branches (지지) and their hidden stems (지장간).

use crate::element::{Element, Polarity};
use crate::stem::Stem;

/// One of the twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in cycle order (index 0 = 자).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

/// A stem buried in a branch, weighted by its traditional day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenStem {
    pub stem: Stem,
    pub days: u8,
}

const fn hs(stem: Stem, days: u8) -> HiddenStem {
    HiddenStem { stem, days }
}

// Residual (여기), middle (중기), principal (본기); principal is always last.
const JA_HIDDEN: [HiddenStem; 2] = [hs(Stem::Im, 10), hs(Stem::Gye, 20)];
const CHUK_HIDDEN: [HiddenStem; 3] = [hs(Stem::Gye, 9), hs(Stem::Sin, 3), hs(Stem::Gi, 18)];
const IN_HIDDEN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Byeong, 7), hs(Stem::Gap, 16)];
const MYO_HIDDEN: [HiddenStem; 2] = [hs(Stem::Gap, 10), hs(Stem::Eul, 20)];
const JIN_HIDDEN: [HiddenStem; 3] = [hs(Stem::Eul, 9), hs(Stem::Gye, 3), hs(Stem::Mu, 18)];
const SA_HIDDEN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Gyeong, 7), hs(Stem::Byeong, 16)];
const O_HIDDEN: [HiddenStem; 3] = [hs(Stem::Byeong, 10), hs(Stem::Gi, 9), hs(Stem::Jeong, 11)];
const MI_HIDDEN: [HiddenStem; 3] = [hs(Stem::Jeong, 9), hs(Stem::Eul, 3), hs(Stem::Gi, 18)];
const SIN_HIDDEN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Im, 7), hs(Stem::Gyeong, 16)];
const YU_HIDDEN: [HiddenStem; 2] = [hs(Stem::Gyeong, 10), hs(Stem::Sin, 20)];
const SUL_HIDDEN: [HiddenStem; 3] = [hs(Stem::Sin, 9), hs(Stem::Jeong, 3), hs(Stem::Mu, 18)];
const HAE_HIDDEN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Gap, 7), hs(Stem::Im, 16)];

impl Branch {
    /// 0-based index (자=0 .. 해=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Branch at a cycle position, wrapping modulo 12.
    pub const fn from_index(i: i64) -> Self {
        ALL_BRANCHES[i.rem_euclid(12) as usize]
    }

    /// Step `n` positions along the cycle.
    pub const fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }

    /// Primary element of the branch.
    pub const fn element(self) -> Element {
        match self {
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => Element::Earth,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Hae | Self::Ja => Element::Water,
        }
    }

    /// Positional polarity (even index yang). For ten-god work use
    /// [`Branch::principal_stem`] instead.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index() as usize)
    }

    /// Hidden stems with their day weights; the last entry is the principal stem.
    pub const fn hidden_stems(self) -> &'static [HiddenStem] {
        match self {
            Self::Ja => &JA_HIDDEN,
            Self::Chuk => &CHUK_HIDDEN,
            Self::In => &IN_HIDDEN,
            Self::Myo => &MYO_HIDDEN,
            Self::Jin => &JIN_HIDDEN,
            Self::Sa => &SA_HIDDEN,
            Self::O => &O_HIDDEN,
            Self::Mi => &MI_HIDDEN,
            Self::Sin => &SIN_HIDDEN,
            Self::Yu => &YU_HIDDEN,
            Self::Sul => &SUL_HIDDEN,
            Self::Hae => &HAE_HIDDEN,
        }
    }

    /// The branch's own stem (본기).
    pub const fn principal_stem(self) -> Stem {
        match self {
            Self::Ja => Stem::Gye,
            Self::Chuk => Stem::Gi,
            Self::In => Stem::Gap,
            Self::Myo => Stem::Eul,
            Self::Jin => Stem::Mu,
            Self::Sa => Stem::Byeong,
            Self::O => Stem::Jeong,
            Self::Mi => Stem::Gi,
            Self::Sin => Stem::Gyeong,
            Self::Yu => Stem::Sin,
            Self::Sul => Stem::Mu,
            Self::Hae => Stem::Im,
        }
    }

    /// Korean syllable.
    pub const fn hangul(self) -> char {
        match self {
            Self::Ja => '자',
            Self::Chuk => '축',
            Self::In => '인',
            Self::Myo => '묘',
            Self::Jin => '진',
            Self::Sa => '사',
            Self::O => '오',
            Self::Mi => '미',
            Self::Sin => '신',
            Self::Yu => '유',
            Self::Sul => '술',
            Self::Hae => '해',
        }
    }

    /// Chinese character.
    pub const fn hanja(self) -> char {
        match self {
            Self::Ja => '子',
            Self::Chuk => '丑',
            Self::In => '寅',
            Self::Myo => '卯',
            Self::Jin => '辰',
            Self::Sa => '巳',
            Self::O => '午',
            Self::Mi => '未',
            Self::Sin => '申',
            Self::Yu => '酉',
            Self::Sul => '戌',
            Self::Hae => '亥',
        }
    }

    /// Parse a single Hangul or Hanja character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '자' | '子' => Some(Self::Ja),
            '축' | '丑' => Some(Self::Chuk),
            '인' | '寅' => Some(Self::In),
            '묘' | '卯' => Some(Self::Myo),
            '진' | '辰' => Some(Self::Jin),
            '사' | '巳' => Some(Self::Sa),
            '오' | '午' => Some(Self::O),
            '미' | '未' => Some(Self::Mi),
            '신' | '申' => Some(Self::Sin),
            '유' | '酉' => Some(Self::Yu),
            '술' | '戌' => Some(Self::Sul),
            '해' | '亥' => Some(Self::Hae),
            _ => None,
        }
    }
}
