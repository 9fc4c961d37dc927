// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Path primitives shared by the renderer and the overlay.
//!
//! Routing intent is carried by waypoint count alone: 2 points form a straight
//! segment, exactly 4 form one cubic curve (endpoints plus two controls), any
//! other count is a polyline.

use smallvec::SmallVec;

use crate::model::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum PathData {
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
    },
    Poly(SmallVec<[Point; 8]>),
}

impl PathData {
    /// Dispatches on waypoint count. Fewer than two points carry no routing
    /// information and yield `None`.
    pub fn from_waypoints(waypoints: &[Point]) -> Option<Self> {
        match waypoints {
            [] | [_] => None,
            [from, to] => Some(Self::Line {
                from: *from,
                to: *to,
            }),
            [from, c1, c2, to] => Some(Self::Cubic {
                from: *from,
                c1: *c1,
                c2: *c2,
                to: *to,
            }),
            points => Some(Self::Poly(points.iter().copied().collect())),
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Self::Line { from, .. } | Self::Cubic { from, .. } => *from,
            Self::Poly(points) => points[0],
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Line { to, .. } | Self::Cubic { to, .. } => *to,
            Self::Poly(points) => points[points.len() - 1],
        }
    }

    /// Point at normalized parameter `t` in `[0, 1]`.
    ///
    /// Lines and polylines are arc-length parameterized; cubics use the Bézier
    /// parameter directly, matching how label positions were tuned.
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Line { from, to } => lerp(*from, *to, t),
            Self::Cubic { from, c1, c2, to } => {
                let u = 1.0 - t;
                let b0 = u * u * u;
                let b1 = 3.0 * u * u * t;
                let b2 = 3.0 * u * t * t;
                let b3 = t * t * t;
                Point::new(
                    b0 * from.x + b1 * c1.x + b2 * c2.x + b3 * to.x,
                    b0 * from.y + b1 * c1.y + b2 * c2.y + b3 * to.y,
                )
            }
            Self::Poly(points) => poly_point_at(points, t),
        }
    }

    /// Unit tangent at `t`, estimated from a small forward/backward probe.
    /// Degenerate (zero-length) paths fall back to the +x axis.
    pub fn tangent_at(&self, t: f64) -> Point {
        const PROBE: f64 = 0.01;
        let t = t.clamp(0.0, 1.0);
        let ahead = self.point_at((t + PROBE).min(1.0));
        let behind = self.point_at((t - PROBE).max(0.0));
        let dx = ahead.x - behind.x;
        let dy = ahead.y - behind.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f64::EPSILON {
            Point::new(1.0, 0.0)
        } else {
            Point::new(dx / len, dy / len)
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Self::Line { from, to } => from.distance(*to),
            Self::Cubic { .. } => {
                // Sampled estimate; accurate enough for flow pacing and
                // offset-path decisions.
                const SAMPLES: usize = 16;
                let mut total = 0.0;
                let mut prev = self.point_at(0.0);
                for step in 1..=SAMPLES {
                    let next = self.point_at(step as f64 / SAMPLES as f64);
                    total += prev.distance(next);
                    prev = next;
                }
                total
            }
            Self::Poly(points) => points.windows(2).map(|pair| pair[0].distance(pair[1])).sum(),
        }
    }
}

fn lerp(from: Point, to: Point, t: f64) -> Point {
    Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}

fn poly_point_at(points: &[Point], t: f64) -> Point {
    let total: f64 = points.windows(2).map(|pair| pair[0].distance(pair[1])).sum();
    if total <= f64::EPSILON {
        return points[0];
    }
    let mut remaining = t * total;
    for pair in points.windows(2) {
        let segment = pair[0].distance(pair[1]);
        if remaining <= segment {
            let local = if segment <= f64::EPSILON {
                0.0
            } else {
                remaining / segment
            };
            return lerp(pair[0], pair[1], local);
        }
        remaining -= segment;
    }
    points[points.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::PathData;
    use crate::model::Point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn two_points_become_a_line() {
        let path = PathData::from_waypoints(&[p(0.0, 0.0), p(10.0, 0.0)]).unwrap();
        assert!(matches!(path, PathData::Line { .. }));
        assert_eq!(path.point_at(0.5), p(5.0, 0.0));
        assert_eq!(path.length(), 10.0);
    }

    #[test]
    fn four_points_become_one_cubic() {
        let path =
            PathData::from_waypoints(&[p(0.0, 0.0), p(10.0, 0.0), p(20.0, 10.0), p(30.0, 10.0)])
                .unwrap();
        assert!(matches!(path, PathData::Cubic { .. }));
        assert_eq!(path.point_at(0.0), p(0.0, 0.0));
        assert_eq!(path.point_at(1.0), p(30.0, 10.0));
        // Midpoint via the Bézier basis: (b0+b1+b2+b3 weighted).
        assert_eq!(path.point_at(0.5), p(15.0, 5.0));
    }

    #[test]
    fn other_counts_become_polylines() {
        let three = PathData::from_waypoints(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]).unwrap();
        assert!(matches!(three, PathData::Poly(_)));
        let five = PathData::from_waypoints(&[
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 0.0),
            p(4.0, 0.0),
        ])
        .unwrap();
        assert!(matches!(five, PathData::Poly(_)));
    }

    #[test]
    fn too_few_points_yield_nothing() {
        assert_eq!(PathData::from_waypoints(&[]), None);
        assert_eq!(PathData::from_waypoints(&[p(1.0, 1.0)]), None);
    }

    #[test]
    fn polyline_parameterizes_by_arc_length() {
        let path = PathData::from_waypoints(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]).unwrap();
        assert_eq!(path.length(), 20.0);
        assert_eq!(path.point_at(0.25), p(5.0, 0.0));
        assert_eq!(path.point_at(0.75), p(10.0, 5.0));
    }

    #[test]
    fn tangent_follows_the_local_segment() {
        let path = PathData::from_waypoints(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]).unwrap();
        let early = path.tangent_at(0.2);
        assert!(early.x > 0.9 && early.y.abs() < 0.2);
        let late = path.tangent_at(0.8);
        assert!(late.y > 0.9 && late.x.abs() < 0.2);
    }

    #[test]
    fn zero_length_path_has_a_fallback_tangent() {
        let path = PathData::from_waypoints(&[p(5.0, 5.0), p(5.0, 5.0)]).unwrap();
        assert_eq!(path.tangent_at(0.5), p(1.0, 0.0));
    }
}
