use crate::core::models::axis::Axis;
use crate::core::models::frame::Frame;

/// Sign pairs of the four quadrants, in reporting order.
pub const QUADRANT_SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];

/// Quadrant occupancy of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantFractions {
    pub frame: usize,
    pub counts: [u64; 4],
    /// All particles of the frame, including those lying on an axis.
    pub total: usize,
    pub fractions: [f64; 4],
}

impl QuadrantFractions {
    /// Peak-to-peak spread of the four fractions.
    pub fn spread(&self) -> f64 {
        let max = self.fractions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.fractions.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    }

    pub fn sum(&self) -> f64 {
        self.fractions.iter().sum()
    }
}

/// Counts particles in the four sign quadrants of a plane.
///
/// Quadrant `(i, j)` holds particles with `i * a > 0` and `j * b > 0`, so particles with
/// a zero coordinate fall in no quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantCounter {
    plane: [Axis; 2],
}

impl QuadrantCounter {
    pub fn new(plane: [Axis; 2]) -> Self {
        Self { plane }
    }

    pub fn count(&self, frame: &Frame) -> QuadrantFractions {
        let [a, b] = self.plane;
        let mut counts = [0u64; 4];
        for p in &frame.positions {
            let (u, v) = (p[a.index()], p[b.index()]);
            for (count, (i, j)) in counts.iter_mut().zip(QUADRANT_SIGNS) {
                if i * u > 0.0 && j * v > 0.0 {
                    *count += 1;
                }
            }
        }

        let total = frame.num_particles();
        let fractions = if total == 0 {
            [0.0; 4]
        } else {
            counts.map(|c| c as f64 / total as f64)
        };

        QuadrantFractions {
            frame: frame.index,
            counts,
            total,
            fractions,
        }
    }
}

impl Default for QuadrantCounter {
    fn default() -> Self {
        Self::new([Axis::X, Axis::Y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cell::SimulationCell;
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-12;

    fn frame(points: Vec<Point3<f64>>) -> Frame {
        let cell = SimulationCell::new(Vector3::repeat(-5.0), Vector3::repeat(10.0));
        Frame::new(7, cell, points)
    }

    #[test]
    fn all_particles_in_the_positive_quadrant() {
        let points = vec![Point3::new(1.0, 2.0, -3.0); 10];
        let result = QuadrantCounter::default().count(&frame(points));
        assert_eq!(result.frame, 7);
        assert_eq!(result.counts, [0, 0, 0, 10]);
        assert_eq!(result.fractions, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(result.spread(), 1.0);
    }

    #[test]
    fn quadrants_follow_the_sign_order() {
        let points = vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-2.0, 3.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ];
        let result = QuadrantCounter::default().count(&frame(points));
        assert_eq!(result.counts, [1, 2, 1, 0]);
        assert_eq!(result.fractions, [0.25, 0.5, 0.25, 0.0]);
        assert_eq!(result.spread(), 0.5);
    }

    #[test]
    fn fractions_sum_to_one_without_zero_coordinates() {
        let points: Vec<Point3<f64>> = (1..=37)
            .map(|i| {
                let t = i as f64 * 0.77;
                Point3::new(t.sin() + 0.013, t.cos() + 0.007, 0.0)
            })
            .filter(|p| p.x != 0.0 && p.y != 0.0)
            .collect();
        let result = QuadrantCounter::default().count(&frame(points));
        assert!((result.sum() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn particles_on_an_axis_count_towards_the_total_only() {
        let points = vec![
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
        ];
        let result = QuadrantCounter::default().count(&frame(points));
        assert_eq!(result.counts, [1, 0, 0, 1]);
        assert_eq!(result.total, 4);
        assert!((result.sum() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn empty_frame_has_zero_fractions() {
        let result = QuadrantCounter::default().count(&frame(Vec::new()));
        assert_eq!(result.fractions, [0.0; 4]);
        assert_eq!(result.spread(), 0.0);
    }

    #[test]
    fn counter_can_use_another_plane() {
        let counter = QuadrantCounter::new([Axis::Y, Axis::Z]);
        let result = counter.count(&frame(vec![Point3::new(-9.0, -1.0, 2.0)]));
        assert_eq!(result.counts, [0, 1, 0, 0]);
    }
}
