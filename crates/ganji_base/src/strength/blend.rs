//! Weighted blending of natal and luck layers.
//!
//! Each tab (원국, 대운, 세운, 월운, 일운) names a weight per layer. A layer
//! joins the blend only when it has both a value and a positive weight; the
//! weights of the joining layers are renormalized to sum to 1. Blending runs
//! on raw scores and apportions to percentages once at the end.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BaseError;
use crate::ganzhi::GanZhi;
use crate::pillars::FourPillars;

use super::raw::{StrengthPolicy, chart_scores, ganzhi_scores};
use super::scores::{ElementPercent, ElementScores};

/// A blend layer, from the natal chart down to the daily pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    #[serde(alias = "원국")]
    Natal,
    #[serde(alias = "대운")]
    Decade,
    #[serde(alias = "세운")]
    Year,
    #[serde(alias = "월운")]
    Month,
    #[serde(alias = "일운")]
    Day,
}

/// All layers, outermost first.
pub const ALL_LAYERS: [Layer; 5] = [
    Layer::Natal,
    Layer::Decade,
    Layer::Year,
    Layer::Month,
    Layer::Day,
];

impl Layer {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Natal => "원국",
            Self::Decade => "대운",
            Self::Year => "세운",
            Self::Month => "월운",
            Self::Day => "일운",
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Layer {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_LAYERS
            .into_iter()
            .find(|l| l.label() == s || format!("{l:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::UnknownNotation(s.to_string()))
    }
}

/// Weight per layer for one tab. Missing entries are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerWeights {
    pub natal: f64,
    pub decade: f64,
    pub year: f64,
    pub month: f64,
    pub day: f64,
}

impl LayerWeights {
    pub const fn new(natal: f64, decade: f64, year: f64, month: f64, day: f64) -> Self {
        Self {
            natal,
            decade,
            year,
            month,
            day,
        }
    }

    pub const fn get(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Natal => self.natal,
            Layer::Decade => self.decade,
            Layer::Year => self.year,
            Layer::Month => self.month,
            Layer::Day => self.day,
        }
    }

    /// Weight if it can take part in a blend.
    pub fn usable(&self, layer: Layer) -> Option<f64> {
        let w = self.get(layer);
        (w.is_finite() && w > 0.0).then_some(w)
    }
}

/// Layer weights for every tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendTable {
    pub natal: LayerWeights,
    pub decade: LayerWeights,
    pub year: LayerWeights,
    pub month: LayerWeights,
    pub day: LayerWeights,
}

impl Default for BlendTable {
    fn default() -> Self {
        Self {
            natal: LayerWeights::new(1.0, 0.0, 0.0, 0.0, 0.0),
            decade: LayerWeights::new(0.6, 0.4, 0.0, 0.0, 0.0),
            year: LayerWeights::new(0.5, 0.3, 0.2, 0.0, 0.0),
            month: LayerWeights::new(0.4, 0.25, 0.2, 0.15, 0.0),
            day: LayerWeights::new(0.35, 0.2, 0.2, 0.15, 0.1),
        }
    }
}

impl BlendTable {
    /// Weights used when `tab` is the selected view.
    pub const fn weights(&self, tab: Layer) -> &LayerWeights {
        match tab {
            Layer::Natal => &self.natal,
            Layer::Decade => &self.decade,
            Layer::Year => &self.year,
            Layer::Month => &self.month,
            Layer::Day => &self.day,
        }
    }
}

/// What a layer contributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerValue {
    Pillar(GanZhi),
    Chart(FourPillars),
    Raw(ElementScores),
}

impl LayerValue {
    pub fn raw_scores(&self, policy: &StrengthPolicy) -> ElementScores {
        match self {
            Self::Pillar(gz) => ganzhi_scores(*gz, policy.branch_scoring),
            Self::Chart(p) => chart_scores(p, policy),
            Self::Raw(s) => *s,
        }
    }
}

impl From<GanZhi> for LayerValue {
    fn from(gz: GanZhi) -> Self {
        Self::Pillar(gz)
    }
}

impl From<FourPillars> for LayerValue {
    fn from(p: FourPillars) -> Self {
        Self::Chart(p)
    }
}

impl From<ElementScores> for LayerValue {
    fn from(s: ElementScores) -> Self {
        Self::Raw(s)
    }
}

/// The values available for blending, one slot per layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrengthLayers {
    slots: [Option<LayerValue>; 5],
}

impl StrengthLayers {
    /// Layers holding only the natal chart.
    pub fn natal(chart: FourPillars) -> Self {
        Self::default().with(Layer::Natal, chart)
    }

    pub fn with(mut self, layer: Layer, value: impl Into<LayerValue>) -> Self {
        self.slots[layer.index()] = Some(value.into());
        self
    }

    pub fn set(&mut self, layer: Layer, value: Option<LayerValue>) {
        self.slots[layer.index()] = value;
    }

    pub fn get(&self, layer: Layer) -> Option<&LayerValue> {
        self.slots[layer.index()].as_ref()
    }
}

/// Weighted raw mix of the layers that have both a value and a weight.
///
/// Returns all zero when no layer qualifies.
pub fn blend_raw(
    layers: &StrengthLayers,
    weights: &LayerWeights,
    policy: &StrengthPolicy,
) -> ElementScores {
    let joined: Vec<(Layer, f64, ElementScores)> = ALL_LAYERS
        .into_iter()
        .filter_map(|layer| match (layers.get(layer), weights.usable(layer)) {
            (Some(value), Some(w)) => Some((layer, w, value.raw_scores(policy))),
            (Some(_), None) => {
                debug!(%layer, "layer has a value but no weight, skipped");
                None
            }
            (None, Some(w)) => {
                warn!(%layer, weight = w, "layer has a weight but no value, skipped");
                None
            }
            (None, None) => None,
        })
        .collect();

    let total_weight: f64 = joined.iter().map(|(_, w, _)| w).sum();
    if joined.is_empty() || total_weight <= 0.0 {
        debug!("no layer to blend, returning zero scores");
        return ElementScores::ZERO;
    }

    joined
        .into_iter()
        .fold(ElementScores::ZERO, |acc, (_, w, scores)| {
            acc + scores.scaled(w / total_weight)
        })
}

/// [`blend_raw`] followed by a single apportionment to percentages.
pub fn blend(
    layers: &StrengthLayers,
    weights: &LayerWeights,
    policy: &StrengthPolicy,
) -> ElementPercent {
    blend_raw(layers, weights, policy).to_percent()
}

/// Blend for a named tab of `table`.
pub fn blend_tab(
    layers: &StrengthLayers,
    table: &BlendTable,
    tab: Layer,
    policy: &StrengthPolicy,
) -> ElementPercent {
    blend(layers, table.weights(tab), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::combination::CombinationBonus;

    fn gz(s: &str) -> GanZhi {
        s.parse().unwrap()
    }

    fn plain() -> StrengthPolicy {
        StrengthPolicy {
            seasonal_bonus: 0.0,
            combination: CombinationBonus::NONE,
            ..StrengthPolicy::default()
        }
    }

    #[test]
    fn natal_tab_ignores_luck_layers() {
        let table = BlendTable::default();
        let natal_only = StrengthLayers::default().with(Layer::Natal, gz("갑자"));
        let crowded = natal_only
            .with(Layer::Decade, gz("병오"))
            .with(Layer::Year, gz("경신"));
        let a = blend_tab(&natal_only, &table, Layer::Natal, &plain());
        let b = blend_tab(&crowded, &table, Layer::Natal, &plain());
        assert_eq!(a, b);
        assert_eq!(a.to_array(), [50, 0, 0, 0, 50]);
    }

    #[test]
    fn missing_layers_renormalize() {
        // Decade tab without a decade value equals the natal layer alone.
        let table = BlendTable::default();
        let layers = StrengthLayers::default().with(Layer::Natal, gz("갑자"));
        let p = blend_tab(&layers, &table, Layer::Decade, &plain());
        assert_eq!(p.to_array(), [50, 0, 0, 0, 50]);
    }

    #[test]
    fn decade_mix() {
        // 0.6·{목50,수50} + 0.4·{화50,화50}.
        let table = BlendTable::default();
        let layers = StrengthLayers::default()
            .with(Layer::Natal, gz("갑자"))
            .with(Layer::Decade, gz("병오"));
        let p = blend_tab(&layers, &table, Layer::Decade, &plain());
        assert_eq!(p.to_array(), [30, 40, 0, 0, 30]);
        assert_eq!(p.sum(), 100);
    }

    #[test]
    fn nothing_to_blend_is_zero() {
        let layers = StrengthLayers::default().with(Layer::Year, gz("갑자"));
        let p = blend(&layers, &BlendTable::default().natal, &plain());
        assert_eq!(p.sum(), 0);
    }

    #[test]
    fn raw_layer_passes_through() {
        let raw = ElementScores::from_array([1.0, 1.0, 1.0, 1.0, 1.0]);
        let layers = StrengthLayers::default().with(Layer::Natal, raw);
        let p = blend(&layers, &BlendTable::default().natal, &plain());
        assert_eq!(p.to_array(), [20; 5]);
    }

    #[test]
    fn layer_names_parse() {
        assert_eq!("대운".parse::<Layer>().unwrap(), Layer::Decade);
        assert_eq!("natal".parse::<Layer>().unwrap(), Layer::Natal);
        assert!("주운".parse::<Layer>().is_err());
        let l: Layer = serde_json::from_str("\"세운\"").unwrap();
        assert_eq!(l, Layer::Year);
    }
}
