// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

use super::graph::Graph;
use super::layout::LayoutResult;

/// One navigable diagram page: a sub-graph plus its own layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    graph: Graph,
    layout: LayoutResult,
}

impl Sheet {
    pub fn new(graph: Graph, layout: LayoutResult) -> Self {
        Self { graph, layout }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutResult {
        &mut self.layout
    }
}
