use crate::geometry::Rect;

/// Rule used to pick which free region receives the next item.
///
/// Every heuristic produces a two-part score that is compared
/// lexicographically; the lowest score wins and the earliest free region wins
/// exact ties, so a given sequence of inserts always produces the same
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Heuristic {
    /// Minimize the leftover area of the region, breaking ties with the
    /// shorter leftover side.
    BestAreaFit,

    /// Minimize the shorter leftover side, breaking ties with the summed
    /// leftover distance on both axes.
    BestShortSideFit,

    /// Minimize the longer leftover side, breaking ties with the shorter one.
    BestLongSideFit,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::BestAreaFit
    }
}

impl Heuristic {
    /// Scores placing an item of `size` into `region`. The caller must have
    /// checked that the item fits.
    pub(crate) fn score(self, region: &Rect, size: (u32, u32)) -> (u64, u64) {
        let leftover_w = u64::from(region.size.0 - size.0);
        let leftover_h = u64::from(region.size.1 - size.1);
        let short_side = leftover_w.min(leftover_h);
        let long_side = leftover_w.max(leftover_h);

        match self {
            Heuristic::BestAreaFit => (leftover_w * leftover_h, short_side),
            Heuristic::BestShortSideFit => (short_side, leftover_w + leftover_h),
            Heuristic::BestLongSideFit => (long_side, short_side),
        }
    }
}
