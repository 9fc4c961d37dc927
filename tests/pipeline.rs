// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline coverage: JSON document → graph → sheets → SVG, plus
//! overlay attachment on the rendered output.

use std::collections::BTreeMap;
use std::time::Duration;

use pretty_assertions::assert_eq;

use netsheet::model::{
    Endpoint, Graph, GraphDoc, Grouping, LayoutResult, Link, LinkMetrics, MetricsData, Node,
    NodeBox, Point, Sheet, SheetId, Size, Status,
};
use netsheet::overlay::{DeviceProfile, WeathermapController};
use netsheet::partition::{partition, LayoutError, LayoutOracle};
use netsheet::render::{document_to_svg, render_sheet, GroupKind};

fn parse_graph(json: &str) -> Graph {
    let doc: GraphDoc = serde_json::from_str(json).expect("graph doc");
    let (graph, issues) = Graph::from_doc(doc);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    graph
}

/// Spreads nodes on one row; enough structure for every sheet to render.
fn row_oracle() -> impl LayoutOracle {
    |_sheet_id: &SheetId, graph: &Graph| -> Result<LayoutResult, LayoutError> {
        let mut layout = LayoutResult::default();
        for (index, node_id) in graph.nodes().keys().enumerate() {
            layout.set_node_box(
                node_id.clone(),
                NodeBox::new(
                    Point::new(80.0 + 150.0 * index as f64, 60.0),
                    Size::new(96.0, 48.0),
                ),
            );
        }
        Ok(layout)
    }
}

fn two_grouping_doc() -> &'static str {
    r#"{
        "nodes": [
            {"id": "n1", "parent": "a"},
            {"id": "n2", "parent": "b"}
        ],
        "links": [
            {"id": "l1", "from": "n1", "to": "n2"}
        ],
        "groupings": [
            {"id": "a", "label": "A"},
            {"id": "b", "label": "B"}
        ]
    }"#
}

#[test]
fn two_groupings_compile_into_three_navigable_sheets() {
    let graph = parse_graph(two_grouping_doc());
    let (sheets, warnings) = partition(&graph, LayoutResult::default(), &row_oracle());

    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    let ids: Vec<&str> = sheets.keys().map(SheetId::as_str).collect();
    assert_eq!(ids, vec!["a", "b", "root"]);

    // Root carries the grouping boxes but no real nodes.
    let root = &sheets[&SheetId::new("root").unwrap()];
    assert!(root.graph().nodes().is_empty());
    assert_eq!(root.graph().groupings().len(), 2);

    // Sheet A: n1 plus a stadium connector labeled after B, linked dashed.
    let a = &sheets[&SheetId::new("a").unwrap()];
    let svg = document_to_svg(&render_sheet(a));
    assert!(svg.contains("data-node-id=\"n1\""));
    assert!(svg.contains("data-node-id=\"export-b\""));
    assert!(svg.contains(">B</text>"));
    assert!(svg.contains("data-link-id=\"l1-export\""));
    assert!(svg.contains("stroke-dasharray"));

    // Grouping boxes advertise their sheet to the navigation shell.
    let root_svg = document_to_svg(&render_sheet(root));
    assert!(root_svg.contains("data-grouping-id=\"a\" data-file=\"a\""));
}

#[test]
fn ha_redundancy_renders_double_line_red_without_arrowheads() {
    let graph = parse_graph(
        r#"{
            "nodes": [{"id": "fw1"}, {"id": "fw2"}],
            "links": [
                {"id": "sync", "from": "fw1", "to": "fw2", "redundancy": "ha"}
            ]
        }"#,
    );
    let (sheets, _warnings) = partition(&graph, LayoutResult::default(), &row_oracle());
    let root = &sheets[&SheetId::new("root").unwrap()];

    let doc = render_sheet(root);
    let group = doc
        .find(&GroupKind::Link("sync".parse().unwrap()))
        .expect("link group");
    let paths: Vec<_> = group
        .elements()
        .iter()
        .filter(|element| element.path_data().is_some())
        .collect();
    assert_eq!(paths.len(), 3);
    assert_eq!(
        paths[0].style().unwrap().stroke.as_deref(),
        Some("#c0392b")
    );
    // No arrowheads on redundancy pairs.
    let svg = document_to_svg(&doc);
    assert!(!svg.contains("<polygon"));
}

#[test]
fn full_compile_is_byte_deterministic() {
    let graph = parse_graph(two_grouping_doc());

    let compile = || {
        let (sheets, _) = partition(&graph, LayoutResult::default(), &row_oracle());
        sheets
            .iter()
            .map(|(sheet_id, sheet)| {
                (
                    sheet_id.clone(),
                    document_to_svg(&render_sheet(sheet)),
                )
            })
            .collect::<BTreeMap<_, _>>()
    };

    assert_eq!(compile(), compile());
}

#[test]
fn down_link_metrics_produce_a_static_overlay_in_the_markup() {
    let graph = parse_graph(
        r#"{
            "nodes": [{"id": "a"}, {"id": "b"}],
            "links": [{"id": "wan", "from": "a", "to": "b"}]
        }"#,
    );
    let (sheets, _) = partition(&graph, LayoutResult::default(), &row_oracle());
    let root = &sheets[&SheetId::new("root").unwrap()];

    let mut controller =
        WeathermapController::attach(render_sheet(root), &DeviceProfile::default());
    let mut metrics = MetricsData::default();
    metrics.links.insert(
        "wan".parse().unwrap(),
        LinkMetrics {
            status: Status::Down,
            ..LinkMetrics::default()
        },
    );
    controller.apply(&metrics);
    assert_eq!(controller.tick(Duration::from_millis(50)), 1);
    controller.advance(1.0);

    let svg = document_to_svg(controller.document());
    assert!(svg.contains("data-overlay-for=\"wan\""));
    assert!(svg.contains("#d32f2f"));
    // Static dashes: animation never put a phase on the down state.
    assert!(!svg.contains("stroke-dashoffset"));
}

#[test]
fn overlay_teardown_restores_the_exact_markup() {
    let graph = parse_graph(two_grouping_doc());
    let (sheets, _) = partition(&graph, LayoutResult::default(), &row_oracle());
    let a = &sheets[&SheetId::new("a").unwrap()];

    let rendered = render_sheet(a);
    let before = document_to_svg(&rendered);

    let mut controller = WeathermapController::attach(rendered, &DeviceProfile::default());
    let mut metrics = MetricsData::default();
    metrics.links.insert(
        "l1-export".parse().unwrap(),
        LinkMetrics {
            status: Status::Up,
            utilization: Some(42.0),
            in_bps: Some(2_000_000.0),
            ..LinkMetrics::default()
        },
    );
    controller.apply(&metrics);
    controller.tick(Duration::from_millis(50));
    controller.advance(0.25);
    controller.apply(&metrics);

    let after = document_to_svg(&controller.destroy());
    assert_eq!(before, after);
}

#[test]
fn root_uplink_renders_on_both_sheets() {
    let graph = parse_graph(
        r#"{
            "nodes": [
                {"id": "inside", "parent": "zone"},
                {"id": "uplink"}
            ],
            "links": [
                {"id": "wan", "from": "inside", "to": "uplink"}
            ],
            "groupings": [{"id": "zone"}]
        }"#,
    );
    let (sheets, warnings) = partition(&graph, LayoutResult::default(), &row_oracle());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    // The zone sheet shows the link against a connector back to the root.
    let zone = &sheets[&SheetId::new("zone").unwrap()];
    let svg = document_to_svg(&render_sheet(zone));
    assert!(svg.contains("data-node-id=\"inside\""));
    assert!(svg.contains("data-node-id=\"export-root\""));
    assert!(svg.contains("data-link-id=\"wan-export\""));

    // The root sheet shows the same link against a connector into the zone.
    let root = &sheets[&SheetId::new("root").unwrap()];
    let svg = document_to_svg(&render_sheet(root));
    assert!(svg.contains("data-node-id=\"uplink\""));
    assert!(svg.contains("data-node-id=\"export-zone\""));
    assert!(svg.contains("data-link-id=\"wan-export\""));
}

#[test]
fn dangling_boundary_link_warns_but_compilation_continues() {
    // Built by hand so the ghost endpoint survives until partitioning;
    // document ingestion would have sanitized it away.
    let mut graph = Graph::default();
    graph
        .groupings_mut()
        .insert("zone".parse().unwrap(), Grouping::new("Zone"));
    let mut inside = Node::new("inside");
    inside.set_parent(Some("zone".parse().unwrap()));
    graph.nodes_mut().insert("inside".parse().unwrap(), inside);
    graph.links_mut().insert(
        "leak".parse().unwrap(),
        Link::new(
            Endpoint::new("inside".parse().unwrap()),
            Endpoint::new("ghost".parse().unwrap()),
        ),
    );

    let (sheets, warnings) = partition(&graph, LayoutResult::default(), &row_oracle());

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].to_string().contains("leak"));

    // The zone sheet still renders, without the unresolvable link.
    let zone = &sheets[&SheetId::new("zone").unwrap()];
    let svg = document_to_svg(&render_sheet(zone));
    assert!(svg.contains("data-node-id=\"inside\""));
    assert!(!svg.contains("leak"));
}
