// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic geometry synthesis.
//!
//! [`render_sheet`] turns a sheet plus its layout into a [`Document`]: an
//! ordered tree of shape/path/text primitives with stable per-element
//! identity. The document is render-target agnostic; [`svg`] serializes it.
//! Determinism is a hard requirement: equal input renders byte-identical
//! output, so everything iterates the model's ordered maps and nothing reads
//! clocks or randomness.

pub mod geometry;
pub mod link;
pub mod shape;
pub mod svg;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{
    label_lines, GroupingId, LinkId, NodeBox, NodeId, Point, Rect, Sheet, Size,
};

pub use geometry::PathData;
pub use svg::document_to_svg;

pub(crate) const DEFAULT_LINK_COLOR: &str = "#333333";
pub(crate) const DEFAULT_NODE_STROKE: &str = "#333333";
pub(crate) const DEFAULT_NODE_FILL: &str = "#ffffff";
pub(crate) const DEFAULT_TEXT_COLOR: &str = "#1a1a1a";
pub(crate) const DEFAULT_GROUPING_STROKE: &str = "#8c8c8c";
pub(crate) const DEFAULT_BACKGROUND: &str = "#ffffff";

pub(crate) const FONT_SIZE: f64 = 12.0;
pub(crate) const DETAIL_FONT_SIZE: f64 = 10.0;
pub(crate) const LINE_HEIGHT: f64 = 14.0;
/// Approximate advance per terminal-width column at `FONT_SIZE`; used to size
/// label backgrounds without a font renderer.
pub(crate) const GLYPH_WIDTH: f64 = 7.2;

const CANVAS_MARGIN: f64 = 24.0;
const GROUPING_CORNER: f64 = 8.0;
const GROUPING_INSET: f64 = 10.0;
const ICON_SIZE: f64 = 16.0;
const NODE_ICON_SIZE: f64 = 18.0;
const NODE_PADDING: f64 = 6.0;

// Placement for elements the layout oracle said nothing about: nodes spread
// on one row in id order, groupings on a row below, so layout-less sheets
// still render distinct, connectable boxes.
const FALLBACK_NODE_SIZE: Size = Size {
    width: 96.0,
    height: 48.0,
};
const FALLBACK_NODE_SPACING: f64 = 150.0;
const FALLBACK_GROUPING_SIZE: Size = Size {
    width: 180.0,
    height: 120.0,
};
const FALLBACK_GROUPING_SPACING: f64 = 200.0;

fn fallback_node_box(graph: &crate::model::Graph, node_id: &NodeId) -> NodeBox {
    let index = graph
        .nodes()
        .keys()
        .position(|id| id == node_id)
        .unwrap_or(0);
    NodeBox::new(
        Point::new(60.0 + FALLBACK_NODE_SPACING * index as f64, 40.0),
        FALLBACK_NODE_SIZE,
    )
}

fn fallback_grouping_bounds(graph: &crate::model::Graph, grouping_id: &GroupingId) -> Rect {
    let index = graph
        .groupings()
        .keys()
        .position(|id| id == grouping_id)
        .unwrap_or(0);
    Rect::new(
        FALLBACK_GROUPING_SPACING * index as f64,
        90.0,
        FALLBACK_GROUPING_SIZE.width,
        FALLBACK_GROUPING_SIZE.height,
    )
}

/// Paint attributes of one primitive. `None` color slots serialize as `none`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub stroke: Option<SmolStr>,
    pub stroke_width: f64,
    pub fill: Option<SmolStr>,
    pub dash: Option<SmolStr>,
    /// Dash phase; the overlay animates flow by advancing it.
    pub dash_offset: f64,
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 1.0,
            fill: None,
            dash: None,
            dash_offset: 0.0,
            opacity: 1.0,
        }
    }
}

impl StrokeStyle {
    pub fn stroked(color: impl Into<SmolStr>, width: f64) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn filled(color: impl Into<SmolStr>) -> Self {
        Self {
            fill: Some(color.into()),
            stroke_width: 0.0,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: impl Into<SmolStr>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_dash(mut self, dash: impl Into<SmolStr>) -> Self {
        self.dash = Some(dash.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Path {
        data: PathData,
        style: StrokeStyle,
    },
    Rect {
        rect: Rect,
        rx: f64,
        style: StrokeStyle,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        style: StrokeStyle,
    },
    Polygon {
        points: SmallVec<[Point; 8]>,
        style: StrokeStyle,
    },
    Text {
        origin: Point,
        text: String,
        size: f64,
        bold: bool,
        color: SmolStr,
        anchor: Anchor,
    },
    Icon {
        rect: Rect,
        key: SmolStr,
    },
}

impl Element {
    pub fn style(&self) -> Option<&StrokeStyle> {
        match self {
            Self::Path { style, .. }
            | Self::Rect { style, .. }
            | Self::Ellipse { style, .. }
            | Self::Polygon { style, .. } => Some(style),
            Self::Text { .. } | Self::Icon { .. } => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut StrokeStyle> {
        match self {
            Self::Path { style, .. }
            | Self::Rect { style, .. }
            | Self::Ellipse { style, .. }
            | Self::Polygon { style, .. } => Some(style),
            Self::Text { .. } | Self::Icon { .. } => None,
        }
    }

    pub fn path_data(&self) -> Option<&PathData> {
        match self {
            Self::Path { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Identity of a primitive container. The overlay attaches by link/node
/// identity, so every renderer must preserve these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKind {
    Grouping(GroupingId),
    Link(LinkId),
    Node(NodeId),
    /// Synthesized by the overlay controller; never produced by the renderer.
    Overlay(LinkId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    kind: GroupKind,
    nav: Option<GroupingId>,
    elements: Vec<Element>,
}

impl Group {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            nav: None,
            elements: Vec::new(),
        }
    }

    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    /// Navigation target for clickable grouping boxes.
    pub fn nav(&self) -> Option<&GroupingId> {
        self.nav.as_ref()
    }

    pub fn set_nav(&mut self, nav: Option<GroupingId>) {
        self.nav = nav;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    canvas: Rect,
    background: SmolStr,
    groups: Vec<Group>,
}

impl Document {
    pub fn new(canvas: Rect, background: SmolStr) -> Self {
        Self {
            canvas,
            background,
            groups: Vec::new(),
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    pub fn push_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn find(&self, kind: &GroupKind) -> Option<&Group> {
        self.groups.iter().find(|group| group.kind() == kind)
    }

    pub fn find_mut(&mut self, kind: &GroupKind) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.kind() == kind)
    }
}

/// Renders one sheet into a drawing program.
///
/// Z-order is groupings, then links, then nodes, so boxes sit behind the
/// topology and labels stay readable. Within each class, elements follow the
/// model's id order.
pub fn render_sheet(sheet: &Sheet) -> Document {
    let graph = sheet.graph();
    let layout = sheet.layout();
    let settings = graph.settings();

    let background: SmolStr = settings
        .background
        .clone()
        .unwrap_or_else(|| SmolStr::new_static(DEFAULT_BACKGROUND));
    let canvas = {
        let mut bounds = layout.bounds();
        let mut merge = |rect: Rect| {
            bounds = Some(match bounds {
                Some(existing) => existing.union(&rect),
                None => rect,
            });
        };
        for node_id in graph.nodes().keys() {
            if layout.node_box(node_id).is_none() {
                merge(fallback_node_box(graph, node_id).bounds());
            }
        }
        for grouping_id in graph.groupings().keys() {
            if layout.grouping_bounds(grouping_id).is_none() {
                merge(fallback_grouping_bounds(graph, grouping_id));
            }
        }
        bounds
            .map(|bounds| bounds.expand(CANVAS_MARGIN))
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 320.0, 200.0))
    };

    let mut doc = Document::new(canvas, background.clone());

    for (grouping_id, grouping) in graph.groupings() {
        let bounds = layout
            .grouping_bounds(grouping_id)
            .copied()
            .unwrap_or_else(|| fallback_grouping_bounds(graph, grouping_id));

        let mut group = Group::new(GroupKind::Grouping(grouping_id.clone()));
        group.set_nav(grouping.file().cloned());

        let style = grouping.style();
        let mut box_style = StrokeStyle::stroked(
            style
                .color
                .clone()
                .unwrap_or_else(|| SmolStr::new_static(DEFAULT_GROUPING_STROKE)),
            style.width.unwrap_or(1.5),
        );
        if let Some(fill) = &style.fill {
            box_style = box_style.with_fill(fill.clone());
        }
        group.push(Element::Rect {
            rect: bounds,
            rx: GROUPING_CORNER,
            style: box_style,
        });

        let mut label_x = bounds.x + GROUPING_INSET;
        if let Some(icon) = grouping.icon() {
            group.push(Element::Icon {
                rect: Rect::new(label_x, bounds.y + GROUPING_INSET, ICON_SIZE, ICON_SIZE),
                key: SmolStr::new(icon),
            });
            label_x += ICON_SIZE + NODE_PADDING;
        }

        let text_color = style
            .text_color
            .clone()
            .unwrap_or_else(|| SmolStr::new_static(DEFAULT_TEXT_COLOR));
        let mut baseline = bounds.y + GROUPING_INSET + FONT_SIZE;
        for line in label_lines(grouping.label()) {
            group.push(Element::Text {
                origin: Point::new(label_x, baseline),
                text: line.text().to_owned(),
                size: FONT_SIZE,
                bold: line.bold(),
                color: text_color.clone(),
                anchor: Anchor::Start,
            });
            baseline += LINE_HEIGHT;
        }

        doc.push_group(group);
    }

    for (link_id, link) in graph.links() {
        let data = match layout.link_waypoints(link_id) {
            Some(waypoints) => PathData::from_waypoints(waypoints),
            None => None,
        }
        .unwrap_or_else(|| fallback_link_path(sheet, link));

        let mut group = Group::new(GroupKind::Link(link_id.clone()));
        for element in link::link_elements(link, &data, settings, &background) {
            group.push(element);
        }
        doc.push_group(group);
    }

    for (node_id, node) in graph.nodes() {
        let node_box = layout
            .node_box(node_id)
            .copied()
            .unwrap_or_else(|| fallback_node_box(graph, node_id));

        let mut group = Group::new(GroupKind::Node(node_id.clone()));
        let style = node.style();
        let outline_style = StrokeStyle::stroked(
            style
                .color
                .clone()
                .unwrap_or_else(|| SmolStr::new_static(DEFAULT_NODE_STROKE)),
            style.width.unwrap_or(1.5),
        )
        .with_fill(
            style
                .fill
                .clone()
                .unwrap_or_else(|| SmolStr::new_static(DEFAULT_NODE_FILL)),
        );
        for element in shape::shape_elements(
            node.shape(),
            node_box.center,
            node_box.size,
            &outline_style,
        ) {
            group.push(element);
        }

        let top = node_box.center.y - node_box.size.height / 2.0;
        let icon_key = node.icon().or_else(|| node.device());
        let mut baseline;
        if let Some(icon) = icon_key {
            group.push(Element::Icon {
                rect: Rect::new(
                    node_box.center.x - NODE_ICON_SIZE / 2.0,
                    top + NODE_PADDING,
                    NODE_ICON_SIZE,
                    NODE_ICON_SIZE,
                ),
                key: SmolStr::new(icon),
            });
            baseline = top + NODE_PADDING + NODE_ICON_SIZE + FONT_SIZE;
        } else {
            let lines = label_lines(node.label()).len();
            let block = lines as f64 * LINE_HEIGHT;
            baseline = node_box.center.y - block / 2.0 + FONT_SIZE * 0.85;
        }

        let text_color = style
            .text_color
            .clone()
            .unwrap_or_else(|| SmolStr::new_static(DEFAULT_TEXT_COLOR));
        for line in label_lines(node.label()) {
            group.push(Element::Text {
                origin: Point::new(node_box.center.x, baseline),
                text: line.text().to_owned(),
                size: FONT_SIZE,
                bold: line.bold(),
                color: text_color.clone(),
                anchor: Anchor::Middle,
            });
            baseline += LINE_HEIGHT;
        }

        doc.push_group(group);
    }

    doc
}

/// Straight segment between endpoint node centers, used when the oracle gave
/// no waypoints for a link.
fn fallback_link_path(sheet: &Sheet, link: &crate::model::Link) -> PathData {
    let center = |node_id: &NodeId| {
        sheet
            .layout()
            .node_box(node_id)
            .copied()
            .unwrap_or_else(|| fallback_node_box(sheet.graph(), node_id))
            .center
    };
    PathData::Line {
        from: center(link.from().node()),
        to: center(link.to().node()),
    }
}

/// Columns-based width estimate for opaque label backgrounds.
pub(crate) fn text_width(text: &str, size: f64) -> f64 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(text) as f64 * GLYPH_WIDTH * (size / FONT_SIZE)
}
