//! Element strength: raw scoring, layer blending and apportionment.

pub mod blend;
pub mod combination;
pub mod raw;
pub mod scores;
pub mod ten_god_strength;

pub use blend::{
    ALL_LAYERS, BlendTable, Layer, LayerValue, LayerWeights, StrengthLayers, blend, blend_raw,
    blend_tab,
};
pub use combination::{
    CombinationBonus, HARMONY_GROUPS, Harmony, HarmonyGroup, HarmonyKind, detect_harmonies,
};
pub use raw::{BranchScoring, PILLAR_POINTS, StrengthPolicy, chart_scores, ganzhi_scores};
pub use scores::{ElementPercent, ElementScores, PERCENT_TOTAL, apportion};
pub use ten_god_strength::{TenGodPercent, TenGodScores, ten_god_percent, ten_god_scores};
