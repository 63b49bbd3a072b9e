//! Polynomial trajectory coefficient sets.
//!
//! TrackMan exports ball flight as one polynomial in elapsed time per axis.
//! Batted balls carry 9 coefficients per axis (measured from bat contact),
//! pitches carry 3 (measured from release).
//!
//! Coefficients come from the data layer as numbers, numeric strings, `null`
//! or the literal `"NA"`. Anything that is not a finite number is stored as
//! `None`.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Coefficient count per axis for batted-ball trajectories.
pub const HIT_COEFFICIENTS: usize = 9;
/// Coefficient count per axis for pitch trajectories.
pub const PITCH_COEFFICIENTS: usize = 3;

/// Per-axis polynomial coefficients, lowest degree first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet<const N: usize> {
    #[serde(with = "lenient_array")]
    pub x: [Option<f64>; N],
    #[serde(with = "lenient_array")]
    pub y: [Option<f64>; N],
    #[serde(with = "lenient_array")]
    pub z: [Option<f64>; N],
}

pub type HitTrajectory = CoefficientSet<HIT_COEFFICIENTS>;
pub type PitchTrajectory = CoefficientSet<PITCH_COEFFICIENTS>;

impl<const N: usize> CoefficientSet<N> {
    /// Build a set from raw numbers; non-finite values are stored as missing.
    pub fn from_values(x: [f64; N], y: [f64; N], z: [f64; N]) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        Self { x: x.map(finite), y: y.map(finite), z: z.map(finite) }
    }

    /// A set with every coefficient missing.
    pub fn empty() -> Self {
        Self { x: [None; N], y: [None; N], z: [None; N] }
    }

    /// True when no coefficient on any axis carries a finite number.
    ///
    /// Such a set means "no trajectory recorded" and must never be evaluated.
    /// The fields are public, so a `Some(NaN)` counts as missing here too.
    pub fn is_all_na(&self) -> bool {
        self.axes().iter().all(|axis| axis.iter().all(|c| !is_finite(c)))
    }

    /// True when every coefficient is a finite number.
    pub fn is_complete(&self) -> bool {
        self.axes().iter().all(|axis| axis.iter().all(is_finite))
    }

    pub fn axes(&self) -> [&[Option<f64>; N]; 3] {
        [&self.x, &self.y, &self.z]
    }

    /// Coefficients of one axis with missing values replaced by NaN.
    pub fn axis_values(&self, axis: usize) -> [f64; N] {
        self.axes()[axis].map(|c| c.unwrap_or(f64::NAN))
    }
}

fn is_finite(c: &Option<f64>) -> bool {
    c.is_some_and(f64::is_finite)
}

impl<const N: usize> Default for CoefficientSet<N> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accepts numbers, numeric strings, `null` and `"NA"` for one coefficient.
struct CoefficientVisitor;

impl<'de> Visitor<'de> for CoefficientVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, \"NA\" or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| v.is_finite()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(CoefficientVisitor)
    }
}

struct Coefficient(Option<f64>);

impl<'de> Deserialize<'de> for Coefficient {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(CoefficientVisitor).map(Coefficient)
    }
}

mod lenient_array {
    use super::*;

    pub fn serialize<S: Serializer, const N: usize>(
        values: &[Option<f64>; N],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(N))?;
        for v in values {
            seq.serialize_element(v)?;
        }
        seq.end()
    }

    /// Short arrays are padded with `None`; extra trailing values are dropped.
    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        d: D,
    ) -> Result<[Option<f64>; N], D::Error> {
        struct ArrayVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for ArrayVisitor<N> {
            type Value = [Option<f64>; N];

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a list of up to {N} coefficients")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut out = [None; N];
                let mut i = 0;
                while let Some(Coefficient(value)) = seq.next_element()? {
                    if i < N {
                        out[i] = value;
                    }
                    i += 1;
                }
                Ok(out)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok([None; N])
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok([None; N])
            }
        }

        d.deserialize_any(ArrayVisitor::<N>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_na_detection() {
        assert!(HitTrajectory::empty().is_all_na());

        let mut one = HitTrajectory::empty();
        one.z[4] = Some(0.0);
        assert!(!one.is_all_na());
        assert!(!one.is_complete());
    }

    #[test]
    fn test_all_nan_set_is_all_na() {
        let nan = HitTrajectory::from_values([f64::NAN; 9], [f64::NAN; 9], [f64::NAN; 9]);
        assert!(nan.is_all_na());
        assert_eq!(nan, HitTrajectory::empty());

        // NaN written straight into the public fields
        let mut raw = PitchTrajectory::empty();
        raw.x = [Some(f64::NAN); 3];
        raw.y[0] = Some(f64::INFINITY);
        assert!(raw.is_all_na());

        raw.z[2] = Some(-32.0);
        assert!(!raw.is_all_na());
        assert!(!raw.is_complete());
    }

    #[test]
    fn test_lenient_coefficients() {
        let set: PitchTrajectory = serde_json::from_str(
            r#"{"x": [1.5, "2.5", "NA"], "y": [null, "abc", 3], "z": []}"#,
        )
        .unwrap();

        assert_eq!(set.x, [Some(1.5), Some(2.5), None]);
        assert_eq!(set.y, [None, None, Some(3.0)]);
        assert_eq!(set.z, [None, None, None]);
    }

    #[test]
    fn test_all_na_strings_parse_as_missing() {
        let set: PitchTrajectory = serde_json::from_str(
            r#"{"x": ["NA", "NA", "NA"], "y": [null, null, null], "z": ["", " ", "NaN"]}"#,
        )
        .unwrap();
        assert!(set.is_all_na());
    }

    #[test]
    fn test_axis_values_fill_nan() {
        let mut set = PitchTrajectory::from_values([1.0, 2.0, 3.0], [0.0; 3], [0.0; 3]);
        set.x[1] = None;
        let xs = set.axis_values(0);
        assert_eq!(xs[0], 1.0);
        assert!(xs[1].is_nan());
    }
}
