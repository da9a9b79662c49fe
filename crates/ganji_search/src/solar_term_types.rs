//! The 24 solar terms (절기) and solar-term events.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A solar term, listed in Gregorian calendar order from 소한.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SolarTerm {
    Sohan,
    Daehan,
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
}

/// All 24 terms in calendar order (소한 in early January first).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Sohan,
    SolarTerm::Daehan,
    SolarTerm::Ipchun,
    SolarTerm::Usu,
    SolarTerm::Gyeongchip,
    SolarTerm::Chunbun,
    SolarTerm::Cheongmyeong,
    SolarTerm::Gogu,
    SolarTerm::Ipha,
    SolarTerm::Soman,
    SolarTerm::Mangjong,
    SolarTerm::Haji,
    SolarTerm::Soseo,
    SolarTerm::Daeseo,
    SolarTerm::Ipchu,
    SolarTerm::Cheoseo,
    SolarTerm::Baengno,
    SolarTerm::Chubun,
    SolarTerm::Hallo,
    SolarTerm::Sanggang,
    SolarTerm::Ipdong,
    SolarTerm::Soseol,
    SolarTerm::Daeseol,
    SolarTerm::Dongji,
];

/// The twelve month-opening terms (절), month 1 (입춘) through month 12 (소한).
pub const MONTH_START_TERMS: [SolarTerm; 12] = [
    SolarTerm::Ipchun,
    SolarTerm::Gyeongchip,
    SolarTerm::Cheongmyeong,
    SolarTerm::Ipha,
    SolarTerm::Mangjong,
    SolarTerm::Soseo,
    SolarTerm::Ipchu,
    SolarTerm::Baengno,
    SolarTerm::Hallo,
    SolarTerm::Ipdong,
    SolarTerm::Daeseol,
    SolarTerm::Sohan,
];

impl SolarTerm {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(i: usize) -> Self {
        ALL_SOLAR_TERMS[i % 24]
    }

    /// Apparent ecliptic longitude of the Sun at this term, degrees.
    pub const fn longitude_deg(self) -> f64 {
        ((285 + 15 * self.index()) % 360) as f64
    }

    /// Term at an exact multiple of 15 degrees.
    pub fn from_longitude(deg: f64) -> Option<Self> {
        let norm = deg.rem_euclid(360.0);
        if (norm / 15.0).fract() != 0.0 {
            return None;
        }
        let steps = ((norm - 285.0).rem_euclid(360.0) / 15.0) as usize;
        Some(Self::from_index(steps))
    }

    /// Month-opening term (절) rather than mid-month term (중기).
    pub const fn is_month_start(self) -> bool {
        self.index() % 2 == 0
    }

    /// Solar month (1..=12) this term opens, for month-opening terms.
    pub const fn month_index(self) -> Option<u8> {
        if self.is_month_start() {
            Some(((self.index() / 2 + 11) % 12 + 1) as u8)
        } else {
            None
        }
    }

    pub const fn hangul(self) -> &'static str {
        match self {
            Self::Sohan => "소한",
            Self::Daehan => "대한",
            Self::Ipchun => "입춘",
            Self::Usu => "우수",
            Self::Gyeongchip => "경칩",
            Self::Chunbun => "춘분",
            Self::Cheongmyeong => "청명",
            Self::Gogu => "곡우",
            Self::Ipha => "입하",
            Self::Soman => "소만",
            Self::Mangjong => "망종",
            Self::Haji => "하지",
            Self::Soseo => "소서",
            Self::Daeseo => "대서",
            Self::Ipchu => "입추",
            Self::Cheoseo => "처서",
            Self::Baengno => "백로",
            Self::Chubun => "추분",
            Self::Hallo => "한로",
            Self::Sanggang => "상강",
            Self::Ipdong => "입동",
            Self::Soseol => "소설",
            Self::Daeseol => "대설",
            Self::Dongji => "동지",
        }
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Sohan => "小寒",
            Self::Daehan => "大寒",
            Self::Ipchun => "立春",
            Self::Usu => "雨水",
            Self::Gyeongchip => "驚蟄",
            Self::Chunbun => "春分",
            Self::Cheongmyeong => "淸明",
            Self::Gogu => "穀雨",
            Self::Ipha => "立夏",
            Self::Soman => "小滿",
            Self::Mangjong => "芒種",
            Self::Haji => "夏至",
            Self::Soseo => "小暑",
            Self::Daeseo => "大暑",
            Self::Ipchu => "立秋",
            Self::Cheoseo => "處暑",
            Self::Baengno => "白露",
            Self::Chubun => "秋分",
            Self::Hallo => "寒露",
            Self::Sanggang => "霜降",
            Self::Ipdong => "立冬",
            Self::Soseol => "小雪",
            Self::Daeseol => "大雪",
            Self::Dongji => "冬至",
        }
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hangul())
    }
}

/// A solar term instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarTermEvent {
    pub term: SolarTerm,
    /// Gregorian year the term was looked up for.
    pub year: i32,
    /// JD UT of the instant.
    pub jd: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitudes() {
        assert_eq!(SolarTerm::Sohan.longitude_deg(), 285.0);
        assert_eq!(SolarTerm::Ipchun.longitude_deg(), 315.0);
        assert_eq!(SolarTerm::Chunbun.longitude_deg(), 0.0);
        assert_eq!(SolarTerm::Haji.longitude_deg(), 90.0);
        assert_eq!(SolarTerm::Dongji.longitude_deg(), 270.0);
    }

    #[test]
    fn longitude_round_trip() {
        for t in ALL_SOLAR_TERMS {
            assert_eq!(SolarTerm::from_longitude(t.longitude_deg()), Some(t));
        }
        assert_eq!(SolarTerm::from_longitude(-45.0), Some(SolarTerm::Ipchun));
        assert_eq!(SolarTerm::from_longitude(10.0), None);
    }

    #[test]
    fn month_terms() {
        for (k, t) in MONTH_START_TERMS.iter().enumerate() {
            assert!(t.is_month_start());
            assert_eq!(t.month_index(), Some(k as u8 + 1));
            let expected = (315.0 + 30.0 * k as f64).rem_euclid(360.0);
            assert_eq!(t.longitude_deg(), expected);
        }
        assert_eq!(SolarTerm::Usu.month_index(), None);
    }
}
