//! Conversion of matching distances into grades.
use serde::{Deserialize, Serialize};

/// Policy turning an aggregate matching distance (pixels) into a grade.
///
/// Implementations must be monotonically non-increasing in `distance` and
/// return values in `[0, 1]`.
pub trait GradePolicy: Send + Sync {
    fn dist2grade(&self, distance: f64) -> f64;
}

/// `grade = clamp(1 - distance / max_distance, 0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradePolicy {
    pub max_distance: f64,
}

impl LinearGradePolicy {
    pub fn new(max_distance: f64) -> Self {
        Self { max_distance }
    }
}

impl Default for LinearGradePolicy {
    fn default() -> Self {
        Self {
            max_distance: super::MatchParams::default().max_distance,
        }
    }
}

impl GradePolicy for LinearGradePolicy {
    fn dist2grade(&self, distance: f64) -> f64 {
        if !(self.max_distance > 0.0) || distance.is_nan() {
            return 0.0;
        }
        (1.0 - distance / self.max_distance).clamp(0.0, 1.0)
    }
}

impl<F> GradePolicy for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn dist2grade(&self, distance: f64) -> f64 {
        self(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_is_full_grade() {
        assert_eq!(LinearGradePolicy::default().dist2grade(0.0), 1.0);
    }

    #[test]
    fn grade_is_non_increasing_and_bounded() {
        let policy = LinearGradePolicy::new(1.5);
        let mut last = f64::INFINITY;
        for i in 0..100 {
            let g = policy.dist2grade(i as f64 * 0.05);
            assert!((0.0..=1.0).contains(&g));
            assert!(g <= last, "grade increased at step {i}");
            last = g;
        }
        assert_eq!(policy.dist2grade(10.0), 0.0);
    }

    #[test]
    fn closures_are_policies() {
        let halve = |d: f64| (1.0 - d / 2.0).max(0.0);
        assert_eq!(halve.dist2grade(1.0), 0.5);
    }
}
