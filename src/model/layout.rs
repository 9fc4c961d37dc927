// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Layout results produced by the external layout oracle.
//!
//! The pipeline treats these as read-only facts: per-node center + size,
//! per-grouping bounding rect, per-link ordered waypoints. The only convention
//! assumed is the waypoint *count*: 2 = straight segment, 4 = one cubic curve
//! control quad, anything else = polyline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{GroupingId, LinkId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }
}

/// Node placement: center point plus rendered size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    pub center: Point,
    pub size: Size,
}

impl NodeBox {
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutResult {
    nodes: BTreeMap<NodeId, NodeBox>,
    groupings: BTreeMap<GroupingId, Rect>,
    links: BTreeMap<LinkId, Vec<Point>>,
}

impl LayoutResult {
    pub fn nodes(&self) -> &BTreeMap<NodeId, NodeBox> {
        &self.nodes
    }

    pub fn groupings(&self) -> &BTreeMap<GroupingId, Rect> {
        &self.groupings
    }

    pub fn links(&self) -> &BTreeMap<LinkId, Vec<Point>> {
        &self.links
    }

    pub fn node_box(&self, node_id: &NodeId) -> Option<&NodeBox> {
        self.nodes.get(node_id)
    }

    pub fn grouping_bounds(&self, grouping_id: &GroupingId) -> Option<&Rect> {
        self.groupings.get(grouping_id)
    }

    pub fn link_waypoints(&self, link_id: &LinkId) -> Option<&[Point]> {
        self.links.get(link_id).map(Vec::as_slice)
    }

    pub fn set_node_box(&mut self, node_id: NodeId, node_box: NodeBox) {
        self.nodes.insert(node_id, node_box);
    }

    pub fn set_grouping_bounds(&mut self, grouping_id: GroupingId, bounds: Rect) {
        self.groupings.insert(grouping_id, bounds);
    }

    pub fn set_link_waypoints(&mut self, link_id: LinkId, waypoints: Vec<Point>) {
        self.links.insert(link_id, waypoints);
    }

    /// Union of everything placed, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut merge = |rect: Rect| {
            bounds = Some(match bounds {
                Some(existing) => existing.union(&rect),
                None => rect,
            });
        };

        for node_box in self.nodes.values() {
            merge(node_box.bounds());
        }
        for rect in self.groupings.values() {
            merge(*rect);
        }
        for waypoints in self.links.values() {
            for point in waypoints {
                merge(Rect::new(point.x, point.y, 0.0, 0.0));
            }
        }

        bounds
    }
}
