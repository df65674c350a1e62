/// Progress curves applied to the linear transition clock.
///
/// Every curve maps `[0, 1]` onto `[0, 1]` monotonically with fixed endpoints, so a
/// transition that reaches `t = 1` always lands exactly on its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// `t^2`: slow start, fast finish.
    InQuad,
    /// `(2 - t) * t`: fast start, decelerating into the target.
    #[default]
    OutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => (2.0 - t) * t,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/ease.rs"]
mod tests;
