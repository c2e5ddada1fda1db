//! Half-open millisecond intervals and the three operations the
//! business-hours calculator is built from: intersect, clip, sum.
//!
//! Keeping these composable replaces the nested day/period/holiday
//! conditionals such calculators tend to grow. `remaining_after` merges
//! its cuts before subtracting, so overlapping or adjacent holiday
//! intervals on the same day never double-subtract.

/// Half-open interval `[start, end)` on a millisecond axis.
///
/// The axis may be absolute (epoch ms) or relative (ms since midnight);
/// callers must not mix the two in one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Creates an interval. `start >= end` yields an empty interval.
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if the interval contains no points.
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the interval length in milliseconds (0 if empty).
    pub const fn duration(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start
        }
    }

    /// Returns the overlap of two intervals (possibly empty).
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Returns the duration of this interval left after removing every
    /// cut interval.
    ///
    /// Cuts are first intersected with `self`, then merged into disjoint
    /// runs, so overlapping cuts count once. Empty cuts are ignored.
    pub fn remaining_after(&self, cuts: &[Interval]) -> i64 {
        if self.is_empty() {
            return 0;
        }

        let mut clipped: Vec<Interval> = cuts
            .iter()
            .map(|c| self.intersect(c))
            .filter(|c| !c.is_empty())
            .collect();
        clipped.sort_by_key(|c| c.start);

        let mut covered = 0i64;
        let mut run: Option<Interval> = None;
        for cut in clipped {
            match run {
                Some(ref mut current) if cut.start <= current.end => {
                    current.end = current.end.max(cut.end);
                }
                Some(current) => {
                    covered += current.duration();
                    run = Some(cut);
                }
                None => run = Some(cut),
            }
        }
        if let Some(current) = run {
            covered += current.duration();
        }

        self.duration() - covered
    }
}
