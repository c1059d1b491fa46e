use crate::{free_list::FreeList, geometry::Rect, heuristic::Heuristic};

/// Places rectangles one at a time into a single fixed-size bin.
///
/// The packer tracks the unused parts of the bin as a list of free regions.
/// Each insert picks a region using its [`Heuristic`], puts the item at that
/// region's origin, and then re-splits every free region the item overlaps.
/// Regions are never merged, so the free list only grows within one bin
/// unless pruning is enabled with [`Packer::prune_contained`].
#[derive(Debug, Clone)]
pub struct Packer {
    heuristic: Heuristic,
    prune: bool,
    free: FreeList,
}

impl Packer {
    /// Creates a packer for an empty bin of the given size.
    ///
    /// Panics if either dimension is zero.
    pub fn new(size: (u32, u32)) -> Self {
        assert!(
            size.0 > 0 && size.1 > 0,
            "bin size must be non-zero, got {}x{}",
            size.0,
            size.1
        );

        Self {
            heuristic: Heuristic::default(),
            prune: false,
            free: FreeList::new(size),
        }
    }

    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Enables dropping free regions that are contained in other free regions
    /// after every insert. This keeps the free list short at the cost of an
    /// extra pass, and can change which region a later insert picks.
    pub fn prune_contained(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Empties the bin and resizes it.
    ///
    /// Panics if either dimension is zero.
    pub fn init(&mut self, size: (u32, u32)) {
        assert!(
            size.0 > 0 && size.1 > 0,
            "bin size must be non-zero, got {}x{}",
            size.0,
            size.1
        );

        self.free.reset(size);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.free.bounds().size
    }

    #[inline]
    pub fn free_regions(&self) -> &[Rect] {
        self.free.regions()
    }

    /// Finds room for an item of the given size and marks it as used.
    ///
    /// Returns `None` when no free region is large enough. This is the normal
    /// signal that the bin is full, not an error.
    pub fn insert(&mut self, size: (u32, u32)) -> Option<Rect> {
        if size.0 == 0 || size.1 == 0 {
            log::trace!("Refusing to place empty item {}x{}", size.0, size.1);
            return None;
        }

        let heuristic = self.heuristic;

        log::trace!(
            "For item {}x{}, evaluating {} free regions",
            size.0,
            size.1,
            self.free.len()
        );

        let best = self
            .free
            .regions()
            .iter()
            .filter(|region| region.fits(size))
            .min_by_key(|region| heuristic.score(region, size));

        let placed = match best {
            Some(region) => Rect::new(region.pos, size),
            None => {
                log::trace!("Item {}x{} did not fit in this bin", size.0, size.1);
                return None;
            }
        };

        log::trace!("Placed item at {:?}", placed.pos);

        self.free.split_around(&placed);

        if self.prune {
            self.free.prune_contained();
        }

        Some(placed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashSet;

    /// Small deterministic generator so tests can produce varied sizes
    /// without pulling in a random number crate.
    struct Lcg(u64);

    impl Lcg {
        fn next_in(&mut self, low: u32, high: u32) -> u32 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);

            low + ((self.0 >> 33) as u32) % (high - low + 1)
        }
    }

    fn random_sizes(seed: u64, count: usize) -> Vec<(u32, u32)> {
        let mut rng = Lcg(seed);

        (0..count)
            .map(|_| (rng.next_in(1, 40), rng.next_in(1, 40)))
            .collect()
    }

    fn pack_all(packer: &mut Packer, sizes: &[(u32, u32)]) -> Vec<Rect> {
        sizes.iter().filter_map(|&size| packer.insert(size)).collect()
    }

    #[test]
    fn four_quarters_then_full() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut packer = Packer::new((128, 128));
        let placed = pack_all(&mut packer, &[(64, 64); 4]);

        insta::assert_debug_snapshot!(placed, @r###"
        [
            Rect {
                pos: (
                    0,
                    0,
                ),
                size: (
                    64,
                    64,
                ),
            },
            Rect {
                pos: (
                    64,
                    0,
                ),
                size: (
                    64,
                    64,
                ),
            },
            Rect {
                pos: (
                    0,
                    64,
                ),
                size: (
                    64,
                    64,
                ),
            },
            Rect {
                pos: (
                    64,
                    64,
                ),
                size: (
                    64,
                    64,
                ),
            },
        ]
        "###);

        assert!(packer.free_regions().is_empty());
        assert_eq!(packer.insert((64, 64)), None);
    }

    #[test]
    fn too_large_or_empty() {
        let mut packer = Packer::new((32, 32));

        assert_eq!(packer.insert((33, 1)), None);
        assert_eq!(packer.insert((1, 33)), None);
        assert_eq!(packer.insert((0, 4)), None);
        assert_eq!(packer.insert((32, 32)), Some(Rect::new((0, 0), (32, 32))));
    }

    #[test]
    fn placements_never_overlap_and_stay_inside() {
        for &heuristic in &[
            Heuristic::BestAreaFit,
            Heuristic::BestShortSideFit,
            Heuristic::BestLongSideFit,
        ] {
            for seed in 0..8 {
                let mut packer = Packer::new((256, 200)).heuristic(heuristic);
                let placed = pack_all(&mut packer, &random_sizes(seed, 120));
                let bounds = Rect::new((0, 0), (256, 200));

                assert!(!placed.is_empty());

                for (i, a) in placed.iter().enumerate() {
                    assert!(bounds.contains(a), "{:?} escapes the bin", a);

                    for b in &placed[i + 1..] {
                        assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn same_inputs_same_layout() {
        let sizes = random_sizes(42, 80);

        let first = pack_all(&mut Packer::new((200, 200)), &sizes);
        let second = pack_all(&mut Packer::new((200, 200)), &sizes);

        assert_eq!(first, second);
    }

    /// Packs with a free list that keeps every piece, duplicates included.
    fn pack_keeping_duplicates(
        bin: (u32, u32),
        heuristic: Heuristic,
        sizes: &[(u32, u32)],
    ) -> Vec<Option<Rect>> {
        let mut regions = vec![Rect::new((0, 0), bin)];

        sizes
            .iter()
            .map(|&size| {
                let region = regions
                    .iter()
                    .filter(|region| region.fits(size))
                    .min_by_key(|region| heuristic.score(region, size))?;
                let placed = Rect::new(region.pos, size);

                let mut pieces = Vec::new();
                regions.retain(|region| {
                    if region.intersects(&placed) {
                        region.subtract(&placed, &mut pieces);
                        false
                    } else {
                        true
                    }
                });
                regions.extend(pieces);

                Some(placed)
            })
            .collect()
    }

    #[test]
    fn dropping_duplicate_regions_keeps_placements() {
        for &heuristic in &[
            Heuristic::BestAreaFit,
            Heuristic::BestShortSideFit,
            Heuristic::BestLongSideFit,
        ] {
            for seed in 0..10 {
                let sizes = random_sizes(seed, 40);

                let mut packer = Packer::new((200, 200)).heuristic(heuristic);
                let placed: Vec<_> = sizes.iter().map(|&size| packer.insert(size)).collect();

                assert_eq!(
                    placed,
                    pack_keeping_duplicates((200, 200), heuristic, &sizes),
                    "{:?} with seed {}",
                    heuristic,
                    seed
                );
            }
        }
    }

    #[test]
    fn fills_large_bin_with_small_tiles() {
        let mut packer = Packer::new((1024, 1024));
        let mut most_regions = 0;

        for _ in 0..4096 {
            assert!(packer.insert((16, 16)).is_some());

            let regions = packer.free_regions();
            most_regions = most_regions.max(regions.len());

            let unique: HashSet<_> = regions.iter().collect();
            assert_eq!(unique.len(), regions.len());
        }

        assert!(packer.free_regions().is_empty());
        assert!(most_regions < 10_000, "free list grew to {} regions", most_regions);
        assert_eq!(packer.insert((1, 1)), None);
    }

    #[test]
    fn pruning_keeps_quarter_layout() {
        let sizes = [(64, 64); 4];

        let plain = pack_all(&mut Packer::new((128, 128)), &sizes);
        let pruned = pack_all(&mut Packer::new((128, 128)).prune_contained(true), &sizes);

        assert_eq!(plain.len(), 4);
        assert_eq!(plain, pruned);
    }

    #[test]
    fn pruned_free_list_has_no_nested_regions() {
        let mut packer = Packer::new((300, 300)).prune_contained(true);
        let placed = pack_all(&mut packer, &random_sizes(7, 30));

        assert!(!placed.is_empty());

        let regions = packer.free_regions();
        for (i, a) in regions.iter().enumerate() {
            for (j, b) in regions.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "{:?} still contains {:?}", a, b);
                }
            }

            for rect in &placed {
                assert!(!a.intersects(rect));
            }
        }
    }

    #[test]
    fn init_resets_bin() {
        let mut packer = Packer::new((64, 64));
        packer.insert((64, 64));
        assert_eq!(packer.insert((1, 1)), None);

        packer.init((32, 16));

        assert_eq!(packer.size(), (32, 16));
        assert_eq!(packer.free_regions(), &[Rect::new((0, 0), (32, 16))]);
        assert_eq!(packer.insert((32, 16)), Some(Rect::new((0, 0), (32, 16))));
    }

    #[test]
    #[should_panic]
    fn zero_sized_bin() {
        Packer::new((0, 10));
    }
}
