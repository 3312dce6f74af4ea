use serde::{Deserialize, Serialize};

/// A point in the yield plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Species-1 yield.
    pub x: f64,
    /// Species-2 yield.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

/// Reference geometry drawn over an effect grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guides {
    /// Segment from `(M1·ΣRYe, 0)` to `(0, M2·ΣRYe)`, where the plain relative
    /// yields `Yo[i] / M[i]` add up to `ΣRYe`. Under the share-weighted LER
    /// this is the LER = 1 line only for `RYe = [0.5, 0.5]`.
    pub ler_one: Segment,
    /// Pairs whose combined yield equals the best monoculture.
    pub overyield: Segment,
    /// Expected yields `(RYe1·M1, RYe2·M2)`.
    pub expected: Point,
    /// Monoculture yields placed on their axes.
    pub monoculture: [Point; 2],
    /// Observed intercrop yields, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<Point>,
}

impl Guides {
    /// Builds the guides for a fixed `(M, RYe)` pair.
    pub fn new(monoculture: [f64; 2], expected_ry: [f64; 2], observed: Option<[f64; 2]>) -> Self {
        let [m1, m2] = monoculture;
        let share_total = expected_ry[0] + expected_ry[1];
        let best = m1.max(m2);
        Self {
            ler_one: Segment {
                from: Point::new(m1 * share_total, 0.0),
                to: Point::new(0.0, m2 * share_total),
            },
            overyield: Segment {
                from: Point::new(0.0, best),
                to: Point::new(best, 0.0),
            },
            expected: Point::new(expected_ry[0] * m1, expected_ry[1] * m2),
            monoculture: [Point::new(m1, 0.0), Point::new(0.0, m2)],
            observed: observed.map(|[x, y]| Point::new(x, y)),
        }
    }
}
