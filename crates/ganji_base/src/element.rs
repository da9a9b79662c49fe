//! The five elements and yin-yang polarity.
//!
//! Generation cycle: Wood → Fire → Earth → Metal → Water → Wood.
//! Restraint cycle:  Wood → Earth → Water → Fire → Metal → Wood.

use serde::{Deserialize, Serialize};

/// One of the five elements (오행).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    #[serde(alias = "목", alias = "木")]
    Wood,
    #[serde(alias = "화", alias = "火")]
    Fire,
    #[serde(alias = "토", alias = "土")]
    Earth,
    #[serde(alias = "금", alias = "金")]
    Metal,
    #[serde(alias = "수", alias = "水")]
    Water,
}

/// All five elements in generation order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based index (Wood=0 .. Water=4).
    pub const fn index(self) -> usize {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element at a 0-based index, wrapping modulo 5.
    pub const fn from_index(i: usize) -> Self {
        ALL_ELEMENTS[i % 5]
    }

    /// Korean name.
    pub const fn hangul(self) -> &'static str {
        match self {
            Self::Wood => "목",
            Self::Fire => "화",
            Self::Earth => "토",
            Self::Metal => "금",
            Self::Water => "수",
        }
    }

    /// Chinese character.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one generates.
    pub const fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element this one restrains.
    pub const fn restrains(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that restrains this one.
    pub const fn restrained_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// How `other` stands relative to `self` on the generation/restraint graph.
    pub fn relation_to(self, other: Element) -> Relation {
        match (other.index() + 5 - self.index()) % 5 {
            0 => Relation::Same,
            1 => Relation::Generates,
            2 => Relation::Restrains,
            3 => Relation::RestrainedBy,
            _ => Relation::GeneratedBy,
        }
    }
}

/// Relation of a target element to a reference element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Same element.
    Same,
    /// Reference generates the target.
    Generates,
    /// Reference restrains the target.
    Restrains,
    /// Target restrains the reference.
    RestrainedBy,
    /// Target generates the reference.
    GeneratedBy,
}

/// Yin-yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(alias = "양")]
    Yang,
    #[serde(alias = "음")]
    Yin,
}

impl Polarity {
    /// Even cycle positions are yang, odd positions yin.
    pub const fn from_parity(index: usize) -> Self {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    /// Korean name.
    pub const fn hangul(self) -> &'static str {
        match self {
            Self::Yang => "양",
            Self::Yin => "음",
        }
    }
}
