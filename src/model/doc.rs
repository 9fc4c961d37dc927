// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Wire-shaped DTOs for the canonical JSON graph document.
//!
//! The parser collaborator emits this shape; [`Graph::from_doc`] turns it into
//! the indexed model, assigning `link-<index>` ids to anonymous links and
//! reporting every referential problem as a non-fatal [`GraphIssue`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::graph::{
    Arrow, Direction, Endpoint, Graph, GraphIssue, GraphIssueKind, Grouping, Link, LinkType, Node,
    Pin, PinDirection, PinPosition, Redundancy, Settings, Shape, Style,
};
use super::ids::{GroupingId, LinkId, NodeId, PinId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDoc {
    pub nodes: Vec<NodeDoc>,
    pub links: Vec<LinkDoc>,
    pub groupings: Vec<GroupingDoc>,
    pub pins: Vec<PinDoc>,
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDoc {
    pub id: NodeId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub parent: Option<GroupingId>,
    #[serde(default)]
    pub device: Option<SmolStr>,
    #[serde(default)]
    pub icon: Option<SmolStr>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDoc {
    #[serde(default)]
    pub id: Option<LinkId>,
    pub from: EndpointDoc,
    pub to: EndpointDoc,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub link_type: Option<LinkType>,
    #[serde(default)]
    pub arrow: Option<Arrow>,
    #[serde(default)]
    pub redundancy: Option<Redundancy>,
    #[serde(default)]
    pub style: Style,
}

/// A link endpoint: either a bare node id or the full object form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointDoc {
    Bare(NodeId),
    Full {
        node: NodeId,
        #[serde(default)]
        port: Option<SmolStr>,
        #[serde(default)]
        ip: Option<SmolStr>,
        #[serde(default)]
        vlan: Option<u16>,
    },
}

impl From<EndpointDoc> for Endpoint {
    fn from(value: EndpointDoc) -> Self {
        match value {
            EndpointDoc::Bare(node) => Endpoint::new(node),
            EndpointDoc::Full {
                node,
                port,
                ip,
                vlan,
            } => Endpoint::new_with(node, port, ip, vlan),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingDoc {
    pub id: GroupingId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub children: Vec<GroupingId>,
    #[serde(default)]
    pub parent: Option<GroupingId>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub icon: Option<SmolStr>,
    #[serde(default)]
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDoc {
    pub id: PinId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub device: Option<NodeId>,
    #[serde(default)]
    pub port: Option<SmolStr>,
    pub direction: PinDirection,
    pub position: PinPosition,
}

impl Graph {
    /// Ingests a wire document: indexes everything by id, defaults anonymous
    /// link ids to `link-<index>`, then sanitizes dangling references.
    ///
    /// Duplicate ids keep the first definition. All findings come back as
    /// warnings/errors; the returned graph is always usable.
    pub fn from_doc(doc: GraphDoc) -> (Self, Vec<GraphIssue>) {
        let mut graph = Graph::default();
        let mut issues = Vec::new();

        for node_doc in doc.nodes {
            let NodeDoc {
                id,
                label,
                shape,
                parent,
                device,
                icon,
                style,
                metadata,
            } = node_doc;

            if graph.nodes().contains_key(&id) {
                issues.push(GraphIssue::warning(GraphIssueKind::DuplicateNode {
                    node: id,
                }));
                continue;
            }

            let mut node = Node::new(label.unwrap_or_else(|| id.as_str().to_owned()));
            node.set_shape(shape);
            node.set_parent(parent);
            node.set_device(device);
            node.set_icon(icon);
            *node.style_mut() = style;
            *node.metadata_mut() = metadata;
            graph.nodes_mut().insert(id, node);
        }

        for grouping_doc in doc.groupings {
            let GroupingDoc {
                id,
                label,
                children,
                parent,
                direction,
                icon,
                style,
            } = grouping_doc;

            if graph.groupings().contains_key(&id) {
                issues.push(GraphIssue::warning(GraphIssueKind::DuplicateGrouping {
                    grouping: id,
                }));
                continue;
            }

            let mut grouping = Grouping::new(label.unwrap_or_else(|| id.as_str().to_owned()));
            for child in children {
                grouping.push_child(child);
            }
            grouping.set_parent(parent);
            grouping.set_direction(direction);
            grouping.set_icon(icon);
            *grouping.style_mut() = style;
            graph.groupings_mut().insert(id, grouping);
        }

        for (index, link_doc) in doc.links.into_iter().enumerate() {
            let LinkDoc {
                id,
                from,
                to,
                label,
                link_type,
                arrow,
                redundancy,
                style,
            } = link_doc;

            let id = id.unwrap_or_else(|| {
                LinkId::new(format!("link-{index}")).expect("generated link id is a valid segment")
            });

            if graph.links().contains_key(&id) {
                issues.push(GraphIssue::warning(GraphIssueKind::DuplicateLink {
                    link: id,
                }));
                continue;
            }

            let mut link = Link::new(from.into(), to.into());
            link.set_label(label);
            link.set_link_type(link_type);
            link.set_arrow(arrow);
            link.set_redundancy(redundancy);
            *link.style_mut() = style;
            graph.links_mut().insert(id, link);
        }

        for pin_doc in doc.pins {
            let PinDoc {
                id,
                label,
                device,
                port,
                direction,
                position,
            } = pin_doc;

            if graph.pins().contains_key(&id) {
                issues.push(GraphIssue::warning(GraphIssueKind::DuplicatePin { pin: id }));
                continue;
            }

            let mut pin = Pin::new(direction, position);
            pin.set_label(label);
            pin.set_device(device);
            pin.set_port(port);
            graph.pins_mut().insert(id, pin);
        }

        graph.set_settings(doc.settings);
        issues.extend(graph.sanitize());

        (graph, issues)
    }
}
