//! Ten-god (십신) classification relative to a day stem.
//!
//! The group comes from how the target's element stands to the day stem's
//! element on the generation/restraint cycle; the member within a group
//! comes from whether the two polarities match.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Relation;
use crate::stem::Stem;

/// The five ten-god groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGodGroup {
    /// Same element as the day stem (비겁).
    #[serde(alias = "비겁")]
    Parallel,
    /// Generated by the day stem (식상).
    #[serde(alias = "식상")]
    Output,
    /// Restrained by the day stem (재성).
    #[serde(alias = "재성")]
    Wealth,
    /// Restrains the day stem (관성).
    #[serde(alias = "관성")]
    Authority,
    /// Generates the day stem (인성).
    #[serde(alias = "인성")]
    Resource,
}

impl TenGodGroup {
    pub const fn from_relation(relation: Relation) -> Self {
        match relation {
            Relation::Same => Self::Parallel,
            Relation::Generates => Self::Output,
            Relation::Restrains => Self::Wealth,
            Relation::RestrainedBy => Self::Authority,
            Relation::GeneratedBy => Self::Resource,
        }
    }

    pub const fn hangul(self) -> &'static str {
        match self {
            Self::Parallel => "비겁",
            Self::Output => "식상",
            Self::Wealth => "재성",
            Self::Authority => "관성",
            Self::Resource => "인성",
        }
    }
}

/// One of the ten gods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenGod {
    #[serde(alias = "비견")]
    Companion,
    #[serde(alias = "겁재")]
    RobWealth,
    #[serde(alias = "식신")]
    EatingGod,
    #[serde(alias = "상관")]
    HurtingOfficer,
    #[serde(alias = "편재")]
    IndirectWealth,
    #[serde(alias = "정재")]
    DirectWealth,
    #[serde(alias = "편관")]
    SevenKillings,
    #[serde(alias = "정관")]
    DirectOfficer,
    #[serde(alias = "편인")]
    IndirectResource,
    #[serde(alias = "정인")]
    DirectResource,
}

/// All ten in group order, polarity-matched member first.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Companion,
    TenGod::RobWealth,
    TenGod::EatingGod,
    TenGod::HurtingOfficer,
    TenGod::IndirectWealth,
    TenGod::DirectWealth,
    TenGod::SevenKillings,
    TenGod::DirectOfficer,
    TenGod::IndirectResource,
    TenGod::DirectResource,
];

impl TenGod {
    /// 0-based position in [`ALL_TEN_GODS`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_group(group: TenGodGroup, polarity_matched: bool) -> Self {
        match (group, polarity_matched) {
            (TenGodGroup::Parallel, true) => Self::Companion,
            (TenGodGroup::Parallel, false) => Self::RobWealth,
            (TenGodGroup::Output, true) => Self::EatingGod,
            (TenGodGroup::Output, false) => Self::HurtingOfficer,
            (TenGodGroup::Wealth, true) => Self::IndirectWealth,
            (TenGodGroup::Wealth, false) => Self::DirectWealth,
            (TenGodGroup::Authority, true) => Self::SevenKillings,
            (TenGodGroup::Authority, false) => Self::DirectOfficer,
            (TenGodGroup::Resource, true) => Self::IndirectResource,
            (TenGodGroup::Resource, false) => Self::DirectResource,
        }
    }

    pub const fn group(self) -> TenGodGroup {
        match self {
            Self::Companion | Self::RobWealth => TenGodGroup::Parallel,
            Self::EatingGod | Self::HurtingOfficer => TenGodGroup::Output,
            Self::IndirectWealth | Self::DirectWealth => TenGodGroup::Wealth,
            Self::SevenKillings | Self::DirectOfficer => TenGodGroup::Authority,
            Self::IndirectResource | Self::DirectResource => TenGodGroup::Resource,
        }
    }

    /// True for the member chosen when day and target share polarity.
    pub const fn polarity_matched(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn hangul(self) -> &'static str {
        match self {
            Self::Companion => "비견",
            Self::RobWealth => "겁재",
            Self::EatingGod => "식신",
            Self::HurtingOfficer => "상관",
            Self::IndirectWealth => "편재",
            Self::DirectWealth => "정재",
            Self::SevenKillings => "편관",
            Self::DirectOfficer => "정관",
            Self::IndirectResource => "편인",
            Self::DirectResource => "정인",
        }
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫財",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "傷官",
            Self::IndirectWealth => "偏財",
            Self::DirectWealth => "正財",
            Self::SevenKillings => "偏官",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }

    /// Parse a Hangul or Hanja label.
    pub fn from_label(label: &str) -> Option<Self> {
        ALL_TEN_GODS
            .into_iter()
            .find(|g| g.hangul() == label || g.hanja() == label)
    }
}

impl Display for TenGod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hangul())
    }
}

/// What is being classified against the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenGodTarget {
    Stem(Stem),
    /// A branch is read through its principal stem.
    Branch(Branch),
}

impl TenGodTarget {
    /// Stem whose element and polarity stand for the target.
    pub const fn representative_stem(self) -> Stem {
        match self {
            Self::Stem(s) => s,
            Self::Branch(b) => b.principal_stem(),
        }
    }
}

impl From<Stem> for TenGodTarget {
    fn from(s: Stem) -> Self {
        Self::Stem(s)
    }
}

impl From<Branch> for TenGodTarget {
    fn from(b: Branch) -> Self {
        Self::Branch(b)
    }
}

/// Classify `target` relative to `day_stem`.
pub fn classify(day_stem: Stem, target: impl Into<TenGodTarget>) -> TenGod {
    let stem = target.into().representative_stem();
    classify_stem(day_stem, stem)
}

/// Classify a stem relative to `day_stem`.
pub fn classify_stem(day_stem: Stem, stem: Stem) -> TenGod {
    let group = TenGodGroup::from_relation(day_stem.element().relation_to(stem.element()));
    let matched = day_stem.polarity() == stem.polarity();
    TenGod::from_group(group, matched)
}
