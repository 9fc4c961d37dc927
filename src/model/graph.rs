// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! The canonical topology model.
//!
//! A [`Graph`] is the indexed, validated form of the wire document (see
//! [`crate::model::doc`]). Nodes, links, groupings and pins are keyed by their
//! ids in `BTreeMap`s so that every traversal in the pipeline is deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::{GroupingId, LinkId, NodeId, PinId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    links: BTreeMap<LinkId, Link>,
    groupings: BTreeMap<GroupingId, Grouping>,
    pins: BTreeMap<PinId, Pin>,
    settings: Settings,
}

impl Graph {
    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, Node> {
        &mut self.nodes
    }

    pub fn links(&self) -> &BTreeMap<LinkId, Link> {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut BTreeMap<LinkId, Link> {
        &mut self.links
    }

    pub fn groupings(&self) -> &BTreeMap<GroupingId, Grouping> {
        &self.groupings
    }

    pub fn groupings_mut(&mut self) -> &mut BTreeMap<GroupingId, Grouping> {
        &mut self.groupings
    }

    pub fn pins(&self) -> &BTreeMap<PinId, Pin> {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut BTreeMap<PinId, Pin> {
        &mut self.pins
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns the grouping directly owning `node`, if any.
    pub fn owning_grouping(&self, node_id: &NodeId) -> Option<&GroupingId> {
        self.nodes.get(node_id).and_then(|node| node.parent())
    }

    /// Walks the grouping parent chain starting at `start` (inclusive).
    ///
    /// The walk is cycle-safe: a grouping is visited at most once, so corrupt
    /// parent edges terminate instead of looping.
    pub fn grouping_ancestry(&self, start: &GroupingId) -> Vec<GroupingId> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut cursor = Some(start.clone());

        while let Some(grouping_id) = cursor {
            if !seen.insert(grouping_id.clone()) {
                break;
            }
            cursor = self
                .groupings
                .get(&grouping_id)
                .and_then(|grouping| grouping.parent().cloned());
            chain.push(grouping_id);
        }

        chain
    }

    /// True when `node` lives inside `grouping`, at any nesting depth.
    pub fn node_within(&self, node_id: &NodeId, grouping_id: &GroupingId) -> bool {
        let Some(parent) = self.owning_grouping(node_id) else {
            return false;
        };
        self.grouping_ancestry(parent).contains(grouping_id)
    }

    /// Drops or repairs dangling references and reports each as a
    /// [`GraphIssue`]. The surviving graph is referentially closed.
    ///
    /// This is deliberately non-fatal: a partial diagram beats a hard failure
    /// in an authoring workflow.
    pub fn sanitize(&mut self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        let node_ids: BTreeSet<NodeId> = self.nodes.keys().cloned().collect();
        let grouping_ids: BTreeSet<GroupingId> = self.groupings.keys().cloned().collect();

        for (node_id, node) in self.nodes.iter_mut() {
            if let Some(parent) = node.parent().cloned() {
                if !grouping_ids.contains(&parent) {
                    issues.push(GraphIssue::error(GraphIssueKind::DanglingNodeParent {
                        node: node_id.clone(),
                        parent,
                    }));
                    node.set_parent(None);
                }
            }
        }

        let mut dropped_links = Vec::new();
        for (link_id, link) in &self.links {
            for endpoint in [link.from(), link.to()] {
                if !node_ids.contains(endpoint.node()) {
                    issues.push(GraphIssue::error(GraphIssueKind::DanglingEndpoint {
                        link: link_id.clone(),
                        node: endpoint.node().clone(),
                    }));
                    dropped_links.push(link_id.clone());
                    break;
                }
            }
        }
        for link_id in dropped_links {
            self.links.remove(&link_id);
        }

        for (grouping_id, grouping) in self.groupings.iter_mut() {
            if let Some(parent) = grouping.parent().cloned() {
                if !grouping_ids.contains(&parent) {
                    issues.push(GraphIssue::error(GraphIssueKind::DanglingGroupingParent {
                        grouping: grouping_id.clone(),
                        parent,
                    }));
                    grouping.set_parent(None);
                }
            }
            let missing_children: Vec<GroupingId> = grouping
                .children()
                .iter()
                .filter(|child| !grouping_ids.contains(*child))
                .cloned()
                .collect();
            for child in missing_children {
                issues.push(GraphIssue::warning(GraphIssueKind::DanglingGroupingChild {
                    grouping: grouping_id.clone(),
                    child: child.clone(),
                }));
                grouping.remove_child(&child);
            }
        }

        for (pin_id, pin) in self.pins.iter_mut() {
            if let Some(device) = pin.device().cloned() {
                if !node_ids.contains(&device) {
                    issues.push(GraphIssue::warning(GraphIssueKind::DanglingPinDevice {
                        pin: pin_id.clone(),
                        device,
                    }));
                    pin.set_device(None);
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    label: String,
    shape: Shape,
    parent: Option<GroupingId>,
    device: Option<SmolStr>,
    icon: Option<SmolStr>,
    style: Style,
    metadata: BTreeMap<String, String>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shape: Shape::Rectangle,
            parent: None,
            device: None,
            icon: None,
            style: Style::default(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn parent(&self) -> Option<&GroupingId> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<GroupingId>) {
        self.parent = parent;
    }

    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn set_device<T: Into<SmolStr>>(&mut self, device: Option<T>) {
        self.device = device.map(Into::into);
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon<T: Into<SmolStr>>(&mut self, icon: Option<T>) {
        self.icon = icon.map(Into::into);
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    node: NodeId,
    port: Option<SmolStr>,
    ip: Option<SmolStr>,
    vlan: Option<u16>,
}

impl Endpoint {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            port: None,
            ip: None,
            vlan: None,
        }
    }

    pub fn new_with(
        node: NodeId,
        port: Option<SmolStr>,
        ip: Option<SmolStr>,
        vlan: Option<u16>,
    ) -> Self {
        Self {
            node,
            port,
            ip,
            vlan,
        }
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    pub fn vlan(&self) -> Option<u16> {
        self.vlan
    }

    /// Port/ip/vlan rendered near the link end, one line each, in that order.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(port) = self.port() {
            lines.push(port.to_owned());
        }
        if let Some(ip) = self.ip() {
            lines.push(ip.to_owned());
        }
        if let Some(vlan) = self.vlan {
            lines.push(format!("vlan {vlan}"));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    from: Endpoint,
    to: Endpoint,
    label: Option<String>,
    link_type: Option<LinkType>,
    arrow: Option<Arrow>,
    redundancy: Option<Redundancy>,
    style: Style,
}

impl Link {
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            from,
            to,
            label: None,
            link_type: None,
            arrow: None,
            redundancy: None,
            style: Style::default(),
        }
    }

    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn link_type(&self) -> Option<LinkType> {
        self.link_type
    }

    pub fn set_link_type(&mut self, link_type: Option<LinkType>) {
        self.link_type = link_type;
    }

    pub fn arrow(&self) -> Option<Arrow> {
        self.arrow
    }

    pub fn set_arrow(&mut self, arrow: Option<Arrow>) {
        self.arrow = arrow;
    }

    pub fn redundancy(&self) -> Option<Redundancy> {
        self.redundancy
    }

    pub fn set_redundancy(&mut self, redundancy: Option<Redundancy>) {
        self.redundancy = redundancy;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Explicit type, else the redundancy default, else solid.
    pub fn effective_type(&self) -> LinkType {
        if let Some(link_type) = self.link_type {
            return link_type;
        }
        match self.redundancy {
            Some(redundancy) => redundancy.default_line().0,
            None => LinkType::Solid,
        }
    }

    /// Explicit arrow, else the redundancy default, else forward.
    pub fn effective_arrow(&self) -> Arrow {
        if let Some(arrow) = self.arrow {
            return arrow;
        }
        match self.redundancy {
            Some(redundancy) => redundancy.default_line().1,
            None => Arrow::Forward,
        }
    }

    /// Explicit color, else the redundancy tint; `None` leaves the renderer's
    /// default line color in effect.
    pub fn effective_color(&self) -> Option<SmolStr> {
        if let Some(color) = &self.style.color {
            return Some(color.clone());
        }
        self.redundancy
            .map(|redundancy| SmolStr::new_static(redundancy.default_line().2))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    label: String,
    children: Vec<GroupingId>,
    parent: Option<GroupingId>,
    direction: Option<Direction>,
    icon: Option<SmolStr>,
    style: Style,
    file: Option<GroupingId>,
}

impl Grouping {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            parent: None,
            direction: None,
            icon: None,
            style: Style::default(),
            file: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn children(&self) -> &[GroupingId] {
        &self.children
    }

    pub fn push_child(&mut self, child: GroupingId) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, child: &GroupingId) {
        self.children.retain(|existing| existing != child);
    }

    pub fn parent(&self) -> Option<&GroupingId> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<GroupingId>) {
        self.parent = parent;
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction;
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon<T: Into<SmolStr>>(&mut self, icon: Option<T>) {
        self.icon = icon.map(Into::into);
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Navigation marker: set by the partitioner to the grouping's own id once
    /// the grouping has an independently navigable sheet.
    pub fn file(&self) -> Option<&GroupingId> {
        self.file.as_ref()
    }

    pub fn set_file(&mut self, file: Option<GroupingId>) {
        self.file = file;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    label: Option<String>,
    device: Option<NodeId>,
    port: Option<SmolStr>,
    direction: PinDirection,
    position: PinPosition,
}

impl Pin {
    pub fn new(direction: PinDirection, position: PinPosition) -> Self {
        Self {
            label: None,
            device: None,
            port: None,
            direction,
            position,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn device(&self) -> Option<&NodeId> {
        self.device.as_ref()
    }

    pub fn set_device(&mut self, device: Option<NodeId>) {
        self.device = device;
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    pub fn set_port<T: Into<SmolStr>>(&mut self, port: Option<T>) {
        self.port = port.map(Into::into);
    }

    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    pub fn position(&self) -> PinPosition {
        self.position
    }
}

/// Per-element style overrides. Absent values fall back to renderer defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub color: Option<SmolStr>,
    pub fill: Option<SmolStr>,
    pub text_color: Option<SmolStr>,
    pub width: Option<f64>,
    /// Spacing hint forwarded to the layout oracle; never rendered directly.
    pub min_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub direction: Option<Direction>,
    pub background: Option<SmolStr>,
    pub link_color: Option<SmolStr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    Rounded,
    Circle,
    Diamond,
    Hexagon,
    Cylinder,
    Stadium,
    Trapezoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Solid,
    Dashed,
    Thick,
    Double,
    Invisible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    None,
    Forward,
    Back,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redundancy {
    Ha,
    Vc,
    Vss,
    Vpc,
    Mlag,
    Stack,
}

impl Redundancy {
    /// Fixed `(type, arrow, color)` defaults applied when the link leaves
    /// type/arrow unset.
    pub fn default_line(self) -> (LinkType, Arrow, &'static str) {
        match self {
            Self::Ha => (LinkType::Double, Arrow::None, "#c0392b"),
            Self::Vc | Self::Vss => (LinkType::Double, Arrow::None, "#8e44ad"),
            Self::Vpc | Self::Mlag => (LinkType::Double, Arrow::None, "#2e6da4"),
            Self::Stack => (LinkType::Thick, Arrow::None, "#27ae60"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    In,
    Out,
    Bidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A non-fatal data-integrity finding. The pipeline keeps going on the
/// sanitized remainder of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIssue {
    severity: Severity,
    kind: GraphIssueKind,
}

impl GraphIssue {
    pub(crate) fn warning(kind: GraphIssueKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
        }
    }

    pub(crate) fn error(kind: GraphIssueKind) -> Self {
        Self {
            severity: Severity::Error,
            kind,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &GraphIssueKind {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssueKind {
    DanglingNodeParent { node: NodeId, parent: GroupingId },
    DanglingEndpoint { link: LinkId, node: NodeId },
    DanglingGroupingParent { grouping: GroupingId, parent: GroupingId },
    DanglingGroupingChild { grouping: GroupingId, child: GroupingId },
    DanglingPinDevice { pin: PinId, device: NodeId },
    DuplicateNode { node: NodeId },
    DuplicateLink { link: LinkId },
    DuplicateGrouping { grouping: GroupingId },
    DuplicatePin { pin: PinId },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            GraphIssueKind::DanglingNodeParent { node, parent } => {
                write!(f, "node {node} references unknown grouping {parent}")
            }
            GraphIssueKind::DanglingEndpoint { link, node } => {
                write!(f, "link {link} references unknown node {node}; link dropped")
            }
            GraphIssueKind::DanglingGroupingParent { grouping, parent } => {
                write!(f, "grouping {grouping} references unknown parent {parent}")
            }
            GraphIssueKind::DanglingGroupingChild { grouping, child } => {
                write!(f, "grouping {grouping} lists unknown child {child}")
            }
            GraphIssueKind::DanglingPinDevice { pin, device } => {
                write!(f, "pin {pin} references unknown device {device}")
            }
            GraphIssueKind::DuplicateNode { node } => {
                write!(f, "duplicate node id {node}; first definition kept")
            }
            GraphIssueKind::DuplicateLink { link } => {
                write!(f, "duplicate link id {link}; first definition kept")
            }
            GraphIssueKind::DuplicateGrouping { grouping } => {
                write!(f, "duplicate grouping id {grouping}; first definition kept")
            }
            GraphIssueKind::DuplicatePin { pin } => {
                write!(f, "duplicate pin id {pin}; first definition kept")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Arrow, Endpoint, Graph, GraphIssueKind, Grouping, Link, LinkType, Node, Redundancy,
        Severity,
    };
    use crate::model::ids::{GroupingId, LinkId, NodeId};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn gid(value: &str) -> GroupingId {
        GroupingId::new(value).expect("grouping id")
    }

    fn lid(value: &str) -> LinkId {
        LinkId::new(value).expect("link id")
    }

    #[test]
    fn ancestry_walk_is_cycle_safe() {
        let mut graph = Graph::default();
        let mut a = Grouping::new("A");
        a.set_parent(Some(gid("b")));
        let mut b = Grouping::new("B");
        b.set_parent(Some(gid("a")));
        graph.groupings_mut().insert(gid("a"), a);
        graph.groupings_mut().insert(gid("b"), b);

        let chain = graph.grouping_ancestry(&gid("a"));
        assert_eq!(chain, vec![gid("a"), gid("b")]);
    }

    #[test]
    fn node_within_resolves_nested_groupings() {
        let mut graph = Graph::default();
        let outer = Grouping::new("Outer");
        let mut inner = Grouping::new("Inner");
        inner.set_parent(Some(gid("outer")));
        graph.groupings_mut().insert(gid("outer"), outer);
        graph.groupings_mut().insert(gid("inner"), inner);

        let mut node = Node::new("sw1");
        node.set_parent(Some(gid("inner")));
        graph.nodes_mut().insert(nid("sw1"), node);

        assert!(graph.node_within(&nid("sw1"), &gid("inner")));
        assert!(graph.node_within(&nid("sw1"), &gid("outer")));
        assert!(!graph.node_within(&nid("sw1"), &gid("elsewhere")));
    }

    #[test]
    fn sanitize_drops_links_with_unknown_endpoints() {
        let mut graph = Graph::default();
        graph.nodes_mut().insert(nid("sw1"), Node::new("sw1"));
        graph.links_mut().insert(
            lid("l1"),
            Link::new(Endpoint::new(nid("sw1")), Endpoint::new(nid("ghost"))),
        );

        let issues = graph.sanitize();

        assert!(graph.links().is_empty());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Error);
        assert_eq!(
            issues[0].kind(),
            &GraphIssueKind::DanglingEndpoint {
                link: lid("l1"),
                node: nid("ghost"),
            }
        );
    }

    #[test]
    fn sanitize_clears_dangling_node_parents() {
        let mut graph = Graph::default();
        let mut node = Node::new("sw1");
        node.set_parent(Some(gid("ghost")));
        graph.nodes_mut().insert(nid("sw1"), node);

        let issues = graph.sanitize();

        assert_eq!(graph.nodes().get(&nid("sw1")).unwrap().parent(), None);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn redundancy_defaults_follow_the_fixed_table() {
        let mut link = Link::new(Endpoint::new(nid("a")), Endpoint::new(nid("b")));
        assert_eq!(link.effective_type(), LinkType::Solid);
        assert_eq!(link.effective_arrow(), Arrow::Forward);
        assert_eq!(link.effective_color(), None);

        link.set_redundancy(Some(Redundancy::Ha));
        assert_eq!(link.effective_type(), LinkType::Double);
        assert_eq!(link.effective_arrow(), Arrow::None);
        assert_eq!(link.effective_color().as_deref(), Some("#c0392b"));

        link.set_redundancy(Some(Redundancy::Stack));
        assert_eq!(link.effective_type(), LinkType::Thick);
        assert_eq!(link.effective_color().as_deref(), Some("#27ae60"));
    }

    #[test]
    fn explicit_type_and_arrow_win_over_redundancy() {
        let mut link = Link::new(Endpoint::new(nid("a")), Endpoint::new(nid("b")));
        link.set_redundancy(Some(Redundancy::Vpc));
        link.set_link_type(Some(LinkType::Dashed));
        link.set_arrow(Some(Arrow::Both));

        assert_eq!(link.effective_type(), LinkType::Dashed);
        assert_eq!(link.effective_arrow(), Arrow::Both);
        // Color still comes from the redundancy tint when no explicit color is set.
        assert_eq!(link.effective_color().as_deref(), Some("#2e6da4"));
    }

    #[test]
    fn endpoint_detail_lines_keep_port_ip_vlan_order() {
        let endpoint = Endpoint::new_with(
            nid("sw1"),
            Some("ge-0/0/1".into()),
            Some("10.0.0.1".into()),
            Some(120),
        );
        assert_eq!(
            endpoint.detail_lines(),
            vec!["ge-0/0/1".to_owned(), "10.0.0.1".to_owned(), "vlan 120".to_owned()]
        );
    }
}
