/// An axis-aligned rectangle in integer pixel coordinates.
///
/// `pos` is the top-left corner and `size` is `(width, height)`. The maximum
/// corner returned by [`Rect::max`] is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.0 == 0 || self.size.1 == 0
    }

    /// Tells whether an item of the given size could be placed at this
    /// rectangle's origin without leaving it.
    #[inline]
    pub fn fits(&self, size: (u32, u32)) -> bool {
        self.size.0 >= size.0 && self.size.1 >= size.1
    }

    /// Tells whether the two rectangles share any area. Rectangles that only
    /// touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        self.pos.0 < other_max.0
            && other.pos.0 < self_max.0
            && self.pos.1 < other_max.1
            && other.pos.1 < self_max.1
    }

    /// Tells whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        other.pos.0 >= self.pos.0
            && other.pos.1 >= self.pos.1
            && other_max.0 <= self_max.0
            && other_max.1 <= self_max.1
    }

    /// Pushes the parts of this rectangle not covered by `used` into `out`.
    ///
    /// Up to four maximal pieces are produced: the strips left of, right of,
    /// above and below `used`, each clipped to `self`. The pieces overlap each
    /// other at the corners. Nothing is pushed for a side that would be empty.
    pub(crate) fn subtract(&self, used: &Rect, out: &mut Vec<Rect>) {
        let (self_max, used_max) = (self.max(), used.max());

        if used.pos.0 > self.pos.0 {
            out.push(Rect::new(
                self.pos,
                (used.pos.0 - self.pos.0, self.size.1),
            ));
        }

        if used_max.0 < self_max.0 {
            out.push(Rect::new(
                (used_max.0, self.pos.1),
                (self_max.0 - used_max.0, self.size.1),
            ));
        }

        if used.pos.1 > self.pos.1 {
            out.push(Rect::new(
                self.pos,
                (self.size.0, used.pos.1 - self.pos.1),
            ));
        }

        if used_max.1 < self_max.1 {
            out.push(Rect::new(
                (self.pos.0, used_max.1),
                (self.size.0, self_max.1 - used_max.1),
            ));
        }
    }
}
