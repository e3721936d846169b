//! Drag de-duplication: one placement per meaningful pointer movement

use tracing::trace;

use crate::config::DEFAULT_CONTINUITY_THRESHOLD;
use crate::spatial::Vec3;

/// Decides whether a candidate placement is far enough from the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuityFilter {
    threshold: f32,
}

impl Default for ContinuityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CONTINUITY_THRESHOLD)
    }
}

impl ContinuityFilter {
    /// Create a filter with the given minimum distance
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// `true` for the first placement of a gesture, otherwise only when the
    /// candidate lies strictly farther than the threshold from `last`
    pub fn should_place(&self, candidate: Vec3, last: Option<Vec3>) -> bool {
        let Some(last) = last else {
            return true;
        };
        let distance = candidate.distance(&last);
        let accepted = distance > self.threshold;
        trace!(distance, threshold = self.threshold, accepted, "continuity check");
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_placement_always_accepted() {
        let filter = ContinuityFilter::default();
        assert!(filter.should_place(Vec3::ZERO, None));
        assert!(filter.should_place(Vec3::new(100.0, -3.0, 0.5), None));
    }

    #[test]
    fn test_same_point_rejected() {
        let filter = ContinuityFilter::default();
        let p = Vec3::new(0.4, 0.0, -1.2);
        assert!(!filter.should_place(p, Some(p)));
    }

    #[test]
    fn test_threshold_is_strict() {
        let filter = ContinuityFilter::new(0.5);
        let last = Vec3::ZERO;
        assert!(!filter.should_place(Vec3::new(0.0, 0.0, 0.5), Some(last)));
        assert!(filter.should_place(Vec3::new(0.0, 0.0, 0.51), Some(last)));
    }

    #[test]
    fn test_default_threshold_around_last() {
        let filter = ContinuityFilter::default();
        let last = Vec3::new(1.0, 0.0, 1.0);
        let near = [
            Vec3::new(1.03, 0.0, 1.0),
            Vec3::new(1.0, 0.04, 1.0),
            Vec3::new(1.0, 0.0, 0.96),
            Vec3::new(1.02, 0.02, 1.02),
        ];
        for candidate in near {
            assert!(!filter.should_place(candidate, Some(last)), "{:?}", candidate);
        }
        let far = [
            Vec3::new(1.06, 0.0, 1.0),
            Vec3::new(1.0, -0.1, 1.0),
            Vec3::new(1.04, 0.04, 1.0),
        ];
        for candidate in far {
            assert!(filter.should_place(candidate, Some(last)), "{:?}", candidate);
        }
    }
}
