// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Node outlines.
//!
//! Geometry is a pure function of `(shape, center, size)`; render order and
//! everything else about the sheet are irrelevant to the emitted path data.

use smallvec::{smallvec, SmallVec};

use super::{Element, StrokeStyle};
use crate::model::{Point, Rect, Shape, Size};

const ROUNDED_CORNER: f64 = 6.0;
/// Horizontal position of the hexagon's slant corners, as a fraction of the
/// half width.
const HEXAGON_CORNER: f64 = 0.866;
const TRAPEZOID_INSET: f64 = 0.15;
const CYLINDER_CAP: f64 = 0.15;

pub fn shape_elements(
    shape: Shape,
    center: Point,
    size: Size,
    style: &StrokeStyle,
) -> SmallVec<[Element; 3]> {
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;
    let left = center.x - half_w;
    let right = center.x + half_w;
    let top = center.y - half_h;
    let bottom = center.y + half_h;

    match shape {
        Shape::Rectangle | Shape::Rounded | Shape::Stadium => {
            let rx = match shape {
                Shape::Rounded => ROUNDED_CORNER,
                Shape::Stadium => half_h,
                _ => 0.0,
            };
            smallvec![Element::Rect {
                rect: Rect::from_center(center, size),
                rx,
                style: style.clone(),
            }]
        }
        Shape::Circle => {
            let radius = half_w.min(half_h);
            smallvec![Element::Ellipse {
                center,
                rx: radius,
                ry: radius,
                style: style.clone(),
            }]
        }
        Shape::Diamond => smallvec![Element::Polygon {
            points: smallvec![
                Point::new(center.x, top),
                Point::new(right, center.y),
                Point::new(center.x, bottom),
                Point::new(left, center.y),
            ],
            style: style.clone(),
        }],
        Shape::Hexagon => {
            let corner = half_w * HEXAGON_CORNER;
            smallvec![Element::Polygon {
                points: smallvec![
                    Point::new(left, center.y),
                    Point::new(center.x - corner, top),
                    Point::new(center.x + corner, top),
                    Point::new(right, center.y),
                    Point::new(center.x + corner, bottom),
                    Point::new(center.x - corner, bottom),
                ],
                style: style.clone(),
            }]
        }
        Shape::Cylinder => {
            let cap = size.height * CYLINDER_CAP;
            // Back cap, body, then the front cap so its full outline stays
            // visible.
            smallvec![
                Element::Ellipse {
                    center: Point::new(center.x, bottom - cap),
                    rx: half_w,
                    ry: cap,
                    style: style.clone(),
                },
                Element::Rect {
                    rect: Rect::new(left, top + cap, size.width, size.height - 2.0 * cap),
                    rx: 0.0,
                    style: style.clone(),
                },
                Element::Ellipse {
                    center: Point::new(center.x, top + cap),
                    rx: half_w,
                    ry: cap,
                    style: style.clone(),
                },
            ]
        }
        Shape::Trapezoid => {
            let inset = size.width * TRAPEZOID_INSET;
            smallvec![Element::Polygon {
                points: smallvec![
                    Point::new(left + inset, top),
                    Point::new(right - inset, top),
                    Point::new(right, bottom),
                    Point::new(left, bottom),
                ],
                style: style.clone(),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::shape_elements;
    use crate::model::{Point, Shape, Size};
    use crate::render::{Element, StrokeStyle};

    fn style() -> StrokeStyle {
        StrokeStyle::stroked("#333333", 1.5)
    }

    fn center() -> Point {
        Point::new(100.0, 50.0)
    }

    fn size() -> Size {
        Size::new(80.0, 40.0)
    }

    #[test]
    fn geometry_depends_only_on_inputs() {
        for shape in [
            Shape::Rectangle,
            Shape::Rounded,
            Shape::Circle,
            Shape::Diamond,
            Shape::Hexagon,
            Shape::Cylinder,
            Shape::Stadium,
            Shape::Trapezoid,
        ] {
            let first = shape_elements(shape, center(), size(), &style());
            let second = shape_elements(shape, center(), size(), &style());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn circle_radius_is_the_smaller_half_dimension() {
        let elements = shape_elements(Shape::Circle, center(), size(), &style());
        let Element::Ellipse { rx, ry, .. } = &elements[0] else {
            panic!("expected ellipse");
        };
        assert_eq!(*rx, 20.0);
        assert_eq!(*ry, 20.0);
    }

    #[test]
    fn diamond_passes_through_edge_midpoints() {
        let elements = shape_elements(Shape::Diamond, center(), size(), &style());
        let Element::Polygon { points, .. } = &elements[0] else {
            panic!("expected polygon");
        };
        assert_eq!(
            points.as_slice(),
            &[
                Point::new(100.0, 30.0),
                Point::new(140.0, 50.0),
                Point::new(100.0, 70.0),
                Point::new(60.0, 50.0),
            ]
        );
    }

    #[test]
    fn stadium_corner_radius_is_half_the_height() {
        let elements = shape_elements(Shape::Stadium, center(), size(), &style());
        let Element::Rect { rx, .. } = &elements[0] else {
            panic!("expected rect");
        };
        assert_eq!(*rx, 20.0);
    }

    #[test]
    fn trapezoid_insets_the_top_edge_by_fifteen_percent() {
        let elements = shape_elements(Shape::Trapezoid, center(), size(), &style());
        let Element::Polygon { points, .. } = &elements[0] else {
            panic!("expected polygon");
        };
        assert_eq!(points[0], Point::new(72.0, 30.0));
        assert_eq!(points[1], Point::new(128.0, 30.0));
        assert_eq!(points[2], Point::new(140.0, 70.0));
        assert_eq!(points[3], Point::new(60.0, 70.0));
    }

    #[test]
    fn cylinder_draws_the_front_cap_last() {
        let elements = shape_elements(Shape::Cylinder, center(), size(), &style());
        assert_eq!(elements.len(), 3);
        let Element::Ellipse { center: front, .. } = &elements[2] else {
            panic!("expected ellipse last");
        };
        // Front cap sits at the top of the box.
        assert!(front.y < 50.0);
    }
}
