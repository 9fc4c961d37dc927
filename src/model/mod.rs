// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Core topology data model.
//!
//! Graphs hold nodes, links, groupings and boundary pins; sheets pair a graph
//! with a layout result from the external oracle; metrics snapshots feed the
//! weathermap overlay.

pub mod doc;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod layout;
pub mod markup;
pub mod metrics;
pub mod sheet;

pub use doc::{EndpointDoc, GraphDoc, GroupingDoc, LinkDoc, NodeDoc, PinDoc};
pub use graph::{
    Arrow, Direction, Endpoint, Graph, GraphIssue, GraphIssueKind, Grouping, Link, LinkType, Node,
    Pin, PinDirection, PinPosition, Redundancy, Settings, Severity, Shape, Style,
};
pub use ids::{GroupingId, Id, IdError, LinkId, NodeId, PinId, SheetId};
pub use layout::{LayoutResult, NodeBox, Point, Rect, Size};
pub use markup::{label_lines, LabelLine};
pub use metrics::{LinkMetrics, MetricsData, NodeMetrics, Status};
pub use sheet::Sheet;
