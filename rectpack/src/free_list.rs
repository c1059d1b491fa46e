use std::collections::HashSet;

use crate::geometry::Rect;

/// The set of unused regions inside one fixed-size bin.
///
/// Regions may overlap each other; together they cover exactly the area of
/// the bin that no placed item occupies. Every region stays inside the bin.
#[derive(Debug, Clone)]
pub struct FreeList {
    bounds: Rect,
    regions: Vec<Rect>,
}

impl FreeList {
    pub fn new(size: (u32, u32)) -> Self {
        let bounds = Rect::new((0, 0), size);

        Self {
            bounds,
            regions: vec![bounds],
        }
    }

    /// Forgets every placement, leaving one region that covers the bin.
    pub fn reset(&mut self, size: (u32, u32)) {
        self.bounds = Rect::new((0, 0), size);
        self.regions.clear();
        self.regions.push(self.bounds);
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Marks `used` as occupied.
    ///
    /// Every region that intersects `used` is removed and replaced by the
    /// parts of it that `used` does not cover. Untouched regions keep their
    /// relative order and the replacements are appended after them.
    ///
    /// A replacement identical to a region already in the list is dropped, so
    /// the list never holds the same region twice.
    pub fn split_around(&mut self, used: &Rect) {
        let mut pieces = Vec::new();

        self.regions.retain(|region| {
            if region.intersects(used) {
                region.subtract(used, &mut pieces);
                false
            } else {
                true
            }
        });

        let mut seen: HashSet<Rect> = self.regions.iter().copied().collect();
        let created = pieces.len();
        pieces.retain(|piece| seen.insert(*piece));

        log::trace!(
            "Split free regions around {:?}: {} new ({} duplicates dropped), {} total",
            used,
            pieces.len(),
            created - pieces.len(),
            self.regions.len() + pieces.len()
        );

        debug_assert!(pieces.iter().all(|piece| self.bounds.contains(piece)));
        self.regions.extend(pieces);
    }

    /// Drops every region that lies entirely inside another region. Of two
    /// identical regions, the later one is kept.
    pub fn prune_contained(&mut self) {
        let before = self.regions.len();
        let mut i = 0;

        'outer: while i < self.regions.len() {
            let mut j = i + 1;

            while j < self.regions.len() {
                if self.regions[j].contains(&self.regions[i]) {
                    self.regions.remove(i);
                    continue 'outer;
                }

                if self.regions[i].contains(&self.regions[j]) {
                    self.regions.remove(j);
                } else {
                    j += 1;
                }
            }

            i += 1;
        }

        log::trace!(
            "Pruned {} contained free regions",
            before - self.regions.len()
        );
    }
}
