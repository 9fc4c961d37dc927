// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Directional offset paths.
//!
//! Each logical link gets two parallel paths, displaced off the original by
//! half the painted stroke width, one per traffic direction. Near-straight
//! paths take an analytic perpendicular shortcut; everything else is sampled
//! at a tier-dependent density with probe-estimated tangents.

use smallvec::SmallVec;

use crate::model::Point;
use crate::render::PathData;

/// Midpoint deviation from the endpoint chord below which a path is treated
/// as straight.
const STRAIGHT_EPSILON: f64 = 0.75;
const MIN_SAMPLES: usize = 2;
const MAX_SAMPLES: usize = 64;

/// Builds the (in, out) offset pair, or `None` for unusable geometry
/// (zero length). The "in" path sits on the left of the travel direction.
pub fn offset_paths(
    path: &PathData,
    half_width: f64,
    sample_step: f64,
) -> Option<(PathData, PathData)> {
    let length = path.length();
    if length <= f64::EPSILON {
        return None;
    }

    let start = path.start();
    let end = path.end();
    let chord_mid = start.midpoint(end);
    let actual_mid = path.point_at(0.5);

    if chord_mid.distance(actual_mid) <= STRAIGHT_EPSILON && start.distance(end) > f64::EPSILON {
        // Straight enough: one perpendicular displacement of the chord, no
        // sampling.
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let chord = (dx * dx + dy * dy).sqrt();
        let normal = Point::new(-dy / chord, dx / chord);
        let shift = |point: Point, sign: f64| {
            point.offset(normal.x * half_width * sign, normal.y * half_width * sign)
        };
        return Some((
            PathData::Line {
                from: shift(start, 1.0),
                to: shift(end, 1.0),
            },
            PathData::Line {
                from: shift(start, -1.0),
                to: shift(end, -1.0),
            },
        ));
    }

    let samples = ((length / sample_step).ceil() as usize).clamp(MIN_SAMPLES, MAX_SAMPLES);
    let mut left: SmallVec<[Point; 8]> = SmallVec::with_capacity(samples + 1);
    let mut right: SmallVec<[Point; 8]> = SmallVec::with_capacity(samples + 1);
    for step in 0..=samples {
        let t = step as f64 / samples as f64;
        let at = path.point_at(t);
        let tangent = path.tangent_at(t);
        let normal = Point::new(-tangent.y, tangent.x);
        left.push(at.offset(normal.x * half_width, normal.y * half_width));
        right.push(at.offset(-normal.x * half_width, -normal.y * half_width));
    }

    // Always a polyline: sampled vertices must never be reinterpreted as a
    // cubic's control quad.
    Some((PathData::Poly(left), PathData::Poly(right)))
}
