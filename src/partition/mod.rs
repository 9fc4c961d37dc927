// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Hierarchical partitioning of a topology into navigable sheets.
//!
//! Every grouping becomes one sheet; links that cross a sheet boundary are
//! replaced by synthesized export-connector nodes so each sheet stays a closed
//! graph. The root sheet carries the parentless nodes plus the grouping boxes
//! themselves, and participates in connector synthesis like any other sheet:
//! an uplink between a root node and a grouped node shows on both sides.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{
    Arrow, Endpoint, Graph, GroupingId, Link, LinkId, LinkType, Node, NodeId, Sheet, SheetId,
    Shape,
};
use crate::model::{LayoutResult, Severity};

/// Id of the top-level sheet. Kept out of the grouping namespace by
/// convention; a grouping that reuses it shadows the root sheet and is
/// reported by graph validation upstream.
pub const ROOT_SHEET: &str = "root";

pub fn root_sheet_id() -> SheetId {
    SheetId::new(ROOT_SHEET).expect("root sheet id is a valid segment")
}

/// External coordinate/waypoint assignment. Opaque: the pipeline only assumes
/// the waypoint-count convention of [`LayoutResult`].
pub trait LayoutOracle {
    fn layout(&self, sheet_id: &SheetId, graph: &Graph) -> Result<LayoutResult, LayoutError>;
}

impl<F> LayoutOracle for F
where
    F: Fn(&SheetId, &Graph) -> Result<LayoutResult, LayoutError>,
{
    fn layout(&self, sheet_id: &SheetId, graph: &Graph) -> Result<LayoutResult, LayoutError> {
        self(sheet_id, graph)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    message: String,
}

impl LayoutError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout oracle failed: {}", self.message)
    }
}

impl std::error::Error for LayoutError {}

/// Non-fatal findings from a partition pass. Source data-integrity issues,
/// not pipeline faults; the affected element is dropped or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionWarning {
    /// A boundary link whose far endpoint is not a node in the graph; nothing
    /// can anchor it on this sheet, so the link is dropped.
    UnresolvedBoundaryLink {
        sheet: SheetId,
        link: LinkId,
        node: NodeId,
    },
    /// The layout oracle failed for a child sheet; the sheet keeps an empty
    /// layout and the renderer falls back to fixed defaults.
    LayoutFailed { sheet: SheetId, message: String },
}

impl PartitionWarning {
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}

impl fmt::Display for PartitionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedBoundaryLink { sheet, link, node } => write!(
                f,
                "sheet {sheet}: boundary link {link} endpoint {node} is not in the graph; link dropped"
            ),
            Self::LayoutFailed { sheet, message } => {
                write!(f, "sheet {sheet}: layout oracle failed ({message}); using defaults")
            }
        }
    }
}

/// Derives one sheet per grouping plus the root sheet.
///
/// The root sheet pairs with the supplied `root_layout`; each child sheet is
/// laid out independently by the oracle, so a grouping's internal arrangement
/// is never constrained by its parent. Build order is irrelevant: a child
/// graph depends only on the flat node/link lists of the input.
pub fn partition(
    graph: &Graph,
    root_layout: LayoutResult,
    oracle: &dyn LayoutOracle,
) -> (BTreeMap<SheetId, Sheet>, Vec<PartitionWarning>) {
    let mut warnings = Vec::new();
    let mut graphs = BTreeMap::<SheetId, Graph>::new();

    graphs.insert(root_sheet_id(), root_graph(graph, &mut warnings));

    for grouping_id in graph.groupings().keys() {
        let sheet_id = SheetId::new(grouping_id.as_str()).expect("grouping id is a valid segment");
        let child = child_graph(graph, grouping_id, &sheet_id, &mut warnings);
        graphs.insert(sheet_id, child);
    }

    // Every grouping now has a navigable sheet of its own; mark them all so
    // the navigation shell knows which boxes are clickable.
    for child in graphs.values_mut() {
        for (grouping_id, grouping) in child.groupings_mut().iter_mut() {
            grouping.set_file(Some(grouping_id.clone()));
        }
    }

    let mut sheets = BTreeMap::new();
    for (sheet_id, child) in graphs {
        let layout = if sheet_id.as_str() == ROOT_SHEET {
            root_layout.clone()
        } else {
            match oracle.layout(&sheet_id, &child) {
                Ok(layout) => layout,
                Err(err) => {
                    warnings.push(PartitionWarning::LayoutFailed {
                        sheet: sheet_id.clone(),
                        message: err.message().to_owned(),
                    });
                    LayoutResult::default()
                }
            }
        };
        sheets.insert(sheet_id, Sheet::new(child, layout));
    }

    (sheets, warnings)
}

fn root_graph(graph: &Graph, warnings: &mut Vec<PartitionWarning>) -> Graph {
    let mut root = Graph::default();
    root.set_settings(graph.settings().clone());

    for (node_id, node) in graph.nodes() {
        if node.parent().is_none() {
            root.nodes_mut().insert(node_id.clone(), node.clone());
        }
    }

    for (grouping_id, grouping) in graph.groupings() {
        root.groupings_mut()
            .insert(grouping_id.clone(), grouping.clone());
    }

    for (pin_id, pin) in graph.pins() {
        root.pins_mut().insert(pin_id.clone(), pin.clone());
    }

    attach_links(graph, &mut root, &root_sheet_id(), warnings);

    root
}

fn child_graph(
    graph: &Graph,
    grouping_id: &GroupingId,
    sheet_id: &SheetId,
    warnings: &mut Vec<PartitionWarning>,
) -> Graph {
    let mut child = Graph::default();

    let mut settings = graph.settings().clone();
    if let Some(grouping) = graph.groupings().get(grouping_id) {
        if let Some(direction) = grouping.direction() {
            settings.direction = Some(direction);
        }
    }
    child.set_settings(settings);

    for (node_id, node) in graph.nodes() {
        if node.parent() == Some(grouping_id) {
            let mut node = node.clone();
            // Members become the sheet root.
            node.set_parent(None);
            child.nodes_mut().insert(node_id.clone(), node);
        }
    }

    for (nested_id, nested) in graph.groupings() {
        if nested.parent() == Some(grouping_id) {
            let mut nested = nested.clone();
            nested.set_parent(None);
            child.groupings_mut().insert(nested_id.clone(), nested);
        }
    }

    attach_links(graph, &mut child, sheet_id, warnings);

    child
}

/// Copies the source links onto one sheet: links fully between the sheet's
/// nodes come over verbatim; boundary links are re-anchored to a synthesized
/// export connector for the far endpoint's sheet (its nearest owning
/// grouping, or the root sheet for parentless nodes).
fn attach_links(
    graph: &Graph,
    sheet_graph: &mut Graph,
    sheet_id: &SheetId,
    warnings: &mut Vec<PartitionWarning>,
) {
    for (link_id, link) in graph.links() {
        let from_inside = sheet_graph.nodes().contains_key(link.from().node());
        let to_inside = sheet_graph.nodes().contains_key(link.to().node());

        match (from_inside, to_inside) {
            (true, true) => {
                sheet_graph.links_mut().insert(link_id.clone(), link.clone());
            }
            (true, false) | (false, true) => {
                let (local, far, local_is_from) = if from_inside {
                    (link.from(), link.to(), true)
                } else {
                    (link.to(), link.from(), false)
                };

                let Some(far_node) = graph.nodes().get(far.node()) else {
                    warnings.push(PartitionWarning::UnresolvedBoundaryLink {
                        sheet: sheet_id.clone(),
                        link: link_id.clone(),
                        node: far.node().clone(),
                    });
                    continue;
                };

                let (connector_id, label) = match far_node.parent() {
                    Some(destination) => (
                        export_connector_id(destination.as_str()),
                        graph
                            .groupings()
                            .get(destination)
                            .map(|grouping| grouping.label().to_owned())
                            .unwrap_or_else(|| destination.as_str().to_owned()),
                    ),
                    None => (export_connector_id(ROOT_SHEET), ROOT_SHEET.to_owned()),
                };

                if !sheet_graph.nodes().contains_key(&connector_id) {
                    let mut connector = Node::new(label);
                    connector.set_shape(Shape::Stadium);
                    sheet_graph
                        .nodes_mut()
                        .insert(connector_id.clone(), connector);
                }

                let mut synthesized = if local_is_from {
                    Link::new(local.clone(), Endpoint::new(connector_id))
                } else {
                    Link::new(Endpoint::new(connector_id), local.clone())
                };
                synthesized.set_label(link.label());
                synthesized.set_link_type(Some(link.link_type().unwrap_or(LinkType::Dashed)));
                synthesized.set_arrow(Some(link.arrow().unwrap_or(Arrow::Forward)));
                synthesized.set_redundancy(link.redundancy());
                *synthesized.style_mut() = link.style().clone();

                sheet_graph
                    .links_mut()
                    .insert(export_link_id(link_id), synthesized);
            }
            (false, false) => {}
        }
    }
}

/// Connector node id for a destination sheet. Deterministically derived so
/// repeated partition passes produce identical sheets, and shared so multiple
/// boundary links to the same destination converge on one node.
fn export_connector_id(destination: &str) -> NodeId {
    NodeId::new(format!("export-{destination}")).expect("derived connector id is a valid segment")
}

fn export_link_id(original: &LinkId) -> LinkId {
    LinkId::new(format!("{original}-export")).expect("derived link id is a valid segment")
}
