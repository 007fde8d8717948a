//! Level curve: cumulative XP -> level
//!
//! Level `L` spans `L * 100` XP, so level 1 is [0, 100), level 2 is
//! [100, 300), level 3 is [300, 600) and so on.

use serde::Serialize;

const XP_PER_LEVEL_STEP: u64 = 100;

/// Where a cumulative XP total sits on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    /// Fraction of the current bracket completed, in [0, 1)
    pub progress: f64,
    /// Width of the current bracket
    pub xp_to_next_level: u64,
    pub xp_for_current_level: u64,
    pub xp_for_next_level: u64,
}

impl LevelProgress {
    /// XP still missing before the next level
    pub fn xp_remaining(&self, xp_points: u64) -> u64 {
        self.xp_for_next_level.saturating_sub(xp_points)
    }
}

/// XP width of the bracket for `level`
pub fn bracket_width(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL_STEP
}

/// Cumulative XP needed to reach `level` (0 for level 1 and below).
/// Saturates at `u64::MAX`.
pub fn level_floor(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    // Sum of the widths of brackets 1..level
    let l = level as u128;
    let floor = l * (l - 1) / 2 * XP_PER_LEVEL_STEP as u128;
    u64::try_from(floor).unwrap_or(u64::MAX)
}

/// Resolve a cumulative XP total to its level bracket. When the next
/// bracket does not fit in `u64` its upper bound is `u64::MAX`.
pub fn level_of(xp_points: u64) -> LevelProgress {
    let reached = |level: u32| {
        let floor = level_floor(level);
        floor <= xp_points && floor < u64::MAX
    };

    // Invert floor(L) = 100 * L(L-1)/2, then correct for rounding
    let estimate = (1.0 + (1.0 + 8.0 * (xp_points as f64 / XP_PER_LEVEL_STEP as f64)).sqrt()) / 2.0;
    let mut level = (estimate.floor() as u32).max(1);
    while level > 1 && !reached(level) {
        level -= 1;
    }
    while reached(level + 1) {
        level += 1;
    }

    let xp_for_current = level_floor(level);
    let xp_for_next = level_floor(level + 1);

    let width = xp_for_next - xp_for_current;
    LevelProgress {
        level,
        progress: (xp_points - xp_for_current) as f64 / width as f64,
        xp_to_next_level: width,
        xp_for_current_level: xp_for_current,
        xp_for_next_level: xp_for_next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(xp: u64, level: u32, progress: f64, to_next: u64) {
        let p = level_of(xp);
        assert_eq!(p.level, level, "xp={}", xp);
        assert!((p.progress - progress).abs() < 1e-12, "xp={} progress={}", xp, p.progress);
        assert_eq!(p.xp_to_next_level, to_next, "xp={}", xp);
    }

    #[test]
    fn test_bracket_edges() {
        check(0, 1, 0.0, 100);
        check(99, 1, 0.99, 100);
        check(100, 2, 0.0, 200);
        check(299, 2, 0.995, 200);
        check(300, 3, 0.0, 300);
        check(599, 3, 299.0 / 300.0, 300);
        check(600, 4, 0.0, 400);
    }

    #[test]
    fn test_bracket_bounds() {
        let p = level_of(450);
        assert_eq!(p.xp_for_current_level, 300);
        assert_eq!(p.xp_for_next_level, 600);
        assert_eq!(p.xp_remaining(450), 150);
        assert_eq!(p.xp_to_next_level, bracket_width(p.level));
    }

    #[test]
    fn test_level_floor_inverse() {
        assert_eq!(level_floor(0), 0);
        assert_eq!(level_floor(1), 0);
        assert_eq!(level_floor(2), 100);
        assert_eq!(level_floor(3), 300);
        assert_eq!(level_floor(4), 600);
        for level in 1..60 {
            assert_eq!(level_of(level_floor(level)).level, level);
            if level > 1 {
                assert_eq!(level_of(level_floor(level) - 1).level, level - 1);
            }
        }
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0;
        for xp in (0..50_000).step_by(37) {
            let level = level_of(xp).level;
            assert!(level >= last, "xp={}", xp);
            last = level;
        }
    }

    #[test]
    fn test_progress_in_unit_range() {
        for xp in (0..20_000).step_by(13) {
            let p = level_of(xp);
            assert!((0.0..1.0).contains(&p.progress), "xp={} progress={}", xp, p.progress);
        }
    }

    #[test]
    fn test_huge_xp_stays_in_last_bracket() {
        let p = level_of(u64::MAX);
        assert_eq!(p.xp_for_next_level, u64::MAX);
        assert!(p.xp_for_current_level < u64::MAX);
        assert!(p.level > 1);
        assert!((0.0..=1.0).contains(&p.progress), "progress={}", p.progress);
        assert_eq!(p.xp_remaining(u64::MAX), 0);

        let below = level_of(p.xp_for_current_level - 1);
        assert_eq!(below.level, p.level - 1);
    }

    #[test]
    fn test_level_floor_saturates() {
        assert_eq!(level_floor(u32::MAX), u64::MAX);
    }
}
