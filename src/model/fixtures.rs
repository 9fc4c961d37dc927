// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Shared test topologies.

use super::graph::{Endpoint, Graph, Grouping, Link, Node};
use super::ids::{GroupingId, LinkId, NodeId};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn lid(value: &str) -> LinkId {
    LinkId::new(value).expect("link id")
}

pub(crate) fn gid(value: &str) -> GroupingId {
    GroupingId::new(value).expect("grouping id")
}

/// Two sibling groupings `a{n1}` and `b{n2}` with one link `n1 -> n2`.
pub(crate) fn two_grouping_link() -> Graph {
    let mut graph = Graph::default();

    graph.groupings_mut().insert(gid("a"), Grouping::new("A"));
    graph.groupings_mut().insert(gid("b"), Grouping::new("B"));

    let mut n1 = Node::new("n1");
    n1.set_parent(Some(gid("a")));
    graph.nodes_mut().insert(nid("n1"), n1);

    let mut n2 = Node::new("n2");
    n2.set_parent(Some(gid("b")));
    graph.nodes_mut().insert(nid("n2"), n2);

    graph.links_mut().insert(
        lid("l1"),
        Link::new(Endpoint::new(nid("n1")), Endpoint::new(nid("n2"))),
    );

    graph
}

/// Three root-level nodes in a triangle, no groupings.
pub(crate) fn flat_triangle() -> Graph {
    let mut graph = Graph::default();

    for id in ["r1", "r2", "r3"] {
        graph.nodes_mut().insert(nid(id), Node::new(id));
    }
    graph.links_mut().insert(
        lid("l12"),
        Link::new(Endpoint::new(nid("r1")), Endpoint::new(nid("r2"))),
    );
    graph.links_mut().insert(
        lid("l23"),
        Link::new(Endpoint::new(nid("r2")), Endpoint::new(nid("r3"))),
    );
    graph.links_mut().insert(
        lid("l31"),
        Link::new(Endpoint::new(nid("r3")), Endpoint::new(nid("r1"))),
    );

    graph
}

/// Grouping `campus` containing grouping `floor1`; one node at each level plus
/// a root-level uplink node.
pub(crate) fn nested_campus() -> Graph {
    let mut graph = Graph::default();

    let mut campus = Grouping::new("Campus");
    campus.push_child(gid("floor1"));
    graph.groupings_mut().insert(gid("campus"), campus);

    let mut floor1 = Grouping::new("Floor 1");
    floor1.set_parent(Some(gid("campus")));
    graph.groupings_mut().insert(gid("floor1"), floor1);

    let mut core = Node::new("core");
    core.set_parent(Some(gid("campus")));
    graph.nodes_mut().insert(nid("core"), core);

    let mut access = Node::new("access");
    access.set_parent(Some(gid("floor1")));
    graph.nodes_mut().insert(nid("access"), access);

    graph.nodes_mut().insert(nid("wan"), Node::new("wan"));

    graph.links_mut().insert(
        lid("core-access"),
        Link::new(Endpoint::new(nid("core")), Endpoint::new(nid("access"))),
    );
    graph.links_mut().insert(
        lid("wan-core"),
        Link::new(Endpoint::new(nid("wan")), Endpoint::new(nid("core"))),
    );

    graph
}
