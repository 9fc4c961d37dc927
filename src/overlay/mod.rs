// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Live utilization overlay.
//!
//! A [`WeathermapController`] binds to one rendered [`Document`] and converges
//! its paint toward the latest metrics snapshot without re-rendering and
//! without blocking interaction. Offset-path construction is deferred to a
//! time-budgeted [`WeathermapController::tick`]; `apply` itself only mutates
//! styles and never fails.

pub mod offset;
pub mod paint;
mod queue;

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use smol_str::SmolStr;

use crate::model::{LinkId, LinkMetrics, MetricsData, NodeId, Point, Rect, Status};
use crate::render::{Document, Element, Group, GroupKind, PathData, StrokeStyle};

use paint::{flow_period_secs, utilization_color, COLOR_DOWN, COLOR_NEUTRAL, COLOR_UP};
use queue::BuildQueue;

const BASE_OPACITY: f64 = 0.35;
const FLOW_OPACITY: f64 = 0.8;
const FLOW_DASH: &str = "4 10";
const DOWN_DASH: &str = "6 6";
/// Pixels of dash pattern per flow period.
const FLOW_CYCLE: f64 = 14.0;
const QUEUE_CAPACITY: usize = 4096;
/// Gap between the original stroke edge and each directional band.
const OFFSET_EXTRA: f64 = 1.0;

// Overlay group element layout, fixed at build time.
const IN_BASE: usize = 0;
const IN_FLOW: usize = 1;
const OUT_BASE: usize = 2;
const OUT_FLOW: usize = 3;

/// Hardware hints sampled once at attachment; tiers are never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub cpu_cores: u32,
    pub memory_gb: f64,
    /// Explicit user preference; forces the no-animation tier regardless of
    /// hardware.
    pub reduced_motion: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            cpu_cores: 4,
            memory_gb: 8.0,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    High,
    Balanced,
    Lite,
}

impl QualityTier {
    pub fn from_profile(profile: &DeviceProfile) -> Self {
        if profile.reduced_motion {
            return Self::Lite;
        }
        if profile.cpu_cores >= 8 && profile.memory_gb >= 8.0 {
            Self::High
        } else if profile.cpu_cores >= 4 {
            Self::Balanced
        } else {
            Self::Lite
        }
    }

    /// Arc-length distance between offset samples.
    pub fn sample_step(self) -> f64 {
        match self {
            Self::High => 6.0,
            Self::Balanced => 10.0,
            Self::Lite => 18.0,
        }
    }

    /// Link-groups built per drain batch.
    pub fn batch_size(self) -> usize {
        match self {
            Self::High => 24,
            Self::Balanced => 12,
            Self::Lite => 6,
        }
    }

    pub fn animates(self) -> bool {
        !matches!(self, Self::Lite)
    }
}

pub struct WeathermapController {
    doc: Document,
    tier: QualityTier,
    interacting: bool,
    viewport: Option<Rect>,
    queue: BuildQueue,
    built: BTreeSet<LinkId>,
    link_snapshots: BTreeMap<LinkId, Vec<Element>>,
    node_snapshots: BTreeMap<NodeId, Vec<Element>>,
    latest: MetricsData,
    phase_secs: f64,
}

impl WeathermapController {
    /// Takes ownership of the rendered document; [`Self::destroy`] gives it
    /// back in its original state.
    pub fn attach(doc: Document, profile: &DeviceProfile) -> Self {
        Self {
            doc,
            tier: QualityTier::from_profile(profile),
            interacting: false,
            viewport: None,
            queue: BuildQueue::new(QUEUE_CAPACITY),
            built: BTreeSet::new(),
            link_snapshots: BTreeMap::new(),
            node_snapshots: BTreeMap::new(),
            latest: MetricsData::default(),
            phase_secs: 0.0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn pending_builds(&self) -> usize {
        self.queue.len()
    }

    pub fn built_count(&self) -> usize {
        self.built.len()
    }

    /// Folds one metrics snapshot into the diagram. Returns immediately:
    /// already-built link-groups get restyled in place, everything else gets
    /// a flat recoloring of its original paths and a queued build. Metrics
    /// for ids the diagram doesn't carry are ignored.
    pub fn apply(&mut self, metrics: &MetricsData) {
        self.latest = metrics.clone();

        for (link_id, link_metrics) in &metrics.links {
            if link_metrics.is_empty() {
                continue;
            }
            if self.built.contains(link_id) {
                self.restyle_overlay(link_id);
            } else if self.doc.find(&GroupKind::Link(link_id.clone())).is_some() {
                self.flat_recolor(link_id, link_metrics);
                self.queue.enqueue(link_id.clone());
            }
        }

        for (node_id, node_metrics) in &metrics.nodes {
            self.paint_node_status(node_id, node_metrics.status);
        }
    }

    /// Drains queued overlay builds for at most `budget`, viewport first.
    /// Returns the number of link-groups built. A no-op mid-interaction;
    /// unconsumed work stays queued for the next idle slice.
    pub fn tick(&mut self, budget: Duration) -> usize {
        if self.interacting {
            return 0;
        }
        let started = Instant::now();
        let mut count = 0;

        while !self.queue.is_empty() {
            let doc = &self.doc;
            let viewport = self.viewport;
            let batch = self.queue.take_batch(self.tier.batch_size(), |link_id| {
                link_in_viewport(doc, viewport, link_id)
            });

            let mut batch = batch.into_iter();
            for link_id in batch.by_ref() {
                if self.build_link(&link_id) {
                    count += 1;
                }
                if started.elapsed() >= budget {
                    break;
                }
            }
            for link_id in batch {
                self.queue.enqueue(link_id);
            }
            if started.elapsed() >= budget {
                break;
            }
        }

        count
    }

    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// Pauses flow animation and deferred builds during pan/zoom. Idempotent.
    pub fn set_interacting(&mut self, interacting: bool) {
        self.interacting = interacting;
    }

    /// Advances flow animation by `dt_secs`. The two directions move
    /// oppositely; a busier direction cycles faster. Down links stay static.
    pub fn advance(&mut self, dt_secs: f64) {
        if self.interacting || !self.tier.animates() {
            return;
        }
        self.phase_secs += dt_secs;
        let phase = self.phase_secs;

        let link_ids: Vec<LinkId> = self.built.iter().cloned().collect();
        for link_id in link_ids {
            let Some(metrics) = self.latest.links.get(&link_id).copied() else {
                continue;
            };
            if metrics.status == Status::Down {
                continue;
            }
            let in_period = flow_period_secs(metrics.in_bps.unwrap_or(0.0));
            let out_period = flow_period_secs(metrics.out_bps.unwrap_or(0.0));

            let Some(group) = self.doc.find_mut(&GroupKind::Overlay(link_id.clone())) else {
                continue;
            };
            let elements = group.elements_mut();
            if elements.len() <= OUT_FLOW {
                continue;
            }
            if let Some(style) = elements[IN_FLOW].style_mut() {
                style.dash_offset = -(phase / in_period) * FLOW_CYCLE;
            }
            if let Some(style) = elements[OUT_FLOW].style_mut() {
                style.dash_offset = (phase / out_period) * FLOW_CYCLE;
            }
        }
    }

    /// Synchronous, total teardown: drops queued work, removes every overlay
    /// layer and restores each mutated original attribute.
    pub fn reset(&mut self) {
        self.doc
            .groups_mut()
            .retain(|group| !matches!(group.kind(), GroupKind::Overlay(_)));

        for (link_id, snapshot) in std::mem::take(&mut self.link_snapshots) {
            if let Some(group) = self.doc.find_mut(&GroupKind::Link(link_id)) {
                *group.elements_mut() = snapshot;
            }
        }
        for (node_id, snapshot) in std::mem::take(&mut self.node_snapshots) {
            if let Some(group) = self.doc.find_mut(&GroupKind::Node(node_id)) {
                *group.elements_mut() = snapshot;
            }
        }

        self.queue.clear();
        self.built.clear();
        self.latest = MetricsData::default();
        self.phase_secs = 0.0;
    }

    /// Restores the diagram and releases it.
    pub fn destroy(mut self) -> Document {
        self.reset();
        self.doc
    }

    /// Cheap stopgap for links whose overlay is not built yet: recolor the
    /// original paths in place, snapshotting them first.
    fn flat_recolor(&mut self, link_id: &LinkId, metrics: &LinkMetrics) {
        let Some(group) = self.doc.find_mut(&GroupKind::Link(link_id.clone())) else {
            return;
        };
        self.link_snapshots
            .entry(link_id.clone())
            .or_insert_with(|| group.elements().to_vec());

        let down = metrics.status == Status::Down;
        let percent = metrics
            .in_percent()
            .unwrap_or(0.0)
            .max(metrics.out_percent().unwrap_or(0.0));
        let color = if down {
            COLOR_DOWN
        } else {
            utilization_color(percent)
        };

        for element in group.elements_mut() {
            if !matches!(element, Element::Path { .. }) {
                continue;
            }
            if let Some(style) = element.style_mut() {
                if style.opacity == 0.0 {
                    continue;
                }
                style.stroke = Some(SmolStr::new_static(color));
                if down {
                    style.dash = Some(SmolStr::new_static(DOWN_DASH));
                }
            }
        }
    }

    fn paint_node_status(&mut self, node_id: &NodeId, status: Status) {
        let Some(group) = self.doc.find_mut(&GroupKind::Node(node_id.clone())) else {
            return;
        };
        let snapshot = self
            .node_snapshots
            .entry(node_id.clone())
            .or_insert_with(|| group.elements().to_vec());

        match status {
            Status::Unknown => {
                *group.elements_mut() = snapshot.clone();
            }
            Status::Up | Status::Down => {
                let color = if status == Status::Down {
                    COLOR_DOWN
                } else {
                    COLOR_UP
                };
                for element in group.elements_mut() {
                    if matches!(element, Element::Text { .. } | Element::Icon { .. }) {
                        continue;
                    }
                    if let Some(style) = element.style_mut() {
                        style.stroke = Some(SmolStr::new_static(color));
                    }
                }
            }
        }
    }

    /// Builds the directional offset pair for one link-group. Unusable
    /// geometry is skipped this cycle; the next delivery re-queues it.
    fn build_link(&mut self, link_id: &LinkId) -> bool {
        if self.built.contains(link_id) {
            return false;
        }
        let Some(group) = self.doc.find(&GroupKind::Link(link_id.clone())) else {
            return false;
        };

        let mut data: Option<PathData> = None;
        let mut widest = 0.0_f64;
        for element in group.elements() {
            if let Element::Path { data: path, style } = element {
                widest = widest.max(style.stroke_width);
                data = Some(path.clone());
            }
        }
        let Some(data) = data else {
            return false;
        };

        let half_width = widest / 2.0 + OFFSET_EXTRA;
        let Some((in_path, out_path)) =
            offset::offset_paths(&data, half_width, self.tier.sample_step())
        else {
            return false;
        };

        let base_style = |path: PathData| Element::Path {
            data: path,
            style: StrokeStyle::stroked(SmolStr::new_static(COLOR_NEUTRAL), half_width)
                .with_opacity(BASE_OPACITY),
        };
        let flow_style = |path: PathData| Element::Path {
            data: path,
            style: StrokeStyle::stroked(
                SmolStr::new_static(COLOR_NEUTRAL),
                (half_width * 0.6).max(1.0),
            )
            .with_dash(FLOW_DASH)
            .with_opacity(FLOW_OPACITY),
        };

        let mut overlay = Group::new(GroupKind::Overlay(link_id.clone()));
        overlay.push(base_style(in_path.clone()));
        overlay.push(flow_style(in_path));
        overlay.push(base_style(out_path.clone()));
        overlay.push(flow_style(out_path));
        self.doc.push_group(overlay);
        self.built.insert(link_id.clone());

        // The flat stopgap recoloring is superseded by the overlay; put the
        // original paths back.
        if let Some(snapshot) = self.link_snapshots.get(link_id) {
            let snapshot = snapshot.clone();
            if let Some(group) = self.doc.find_mut(&GroupKind::Link(link_id.clone())) {
                *group.elements_mut() = snapshot;
            }
        }

        self.restyle_overlay(link_id);
        true
    }

    fn restyle_overlay(&mut self, link_id: &LinkId) {
        let Some(metrics) = self.latest.links.get(link_id).copied() else {
            return;
        };
        let Some(group) = self.doc.find_mut(&GroupKind::Overlay(link_id.clone())) else {
            return;
        };
        let elements = group.elements_mut();
        if elements.len() <= OUT_FLOW {
            return;
        }

        if metrics.status == Status::Down {
            // Both directions collapse into one static dashed state.
            for index in [IN_BASE, OUT_BASE] {
                if let Some(style) = elements[index].style_mut() {
                    style.stroke = Some(SmolStr::new_static(COLOR_DOWN));
                    style.dash = Some(SmolStr::new_static(DOWN_DASH));
                    style.dash_offset = 0.0;
                    style.opacity = 0.9;
                }
            }
            for index in [IN_FLOW, OUT_FLOW] {
                if let Some(style) = elements[index].style_mut() {
                    style.opacity = 0.0;
                    style.dash_offset = 0.0;
                }
            }
            return;
        }

        let in_color = utilization_color(metrics.in_percent().unwrap_or(0.0));
        let out_color = utilization_color(metrics.out_percent().unwrap_or(0.0));
        for (index, color) in [
            (IN_BASE, in_color),
            (IN_FLOW, in_color),
            (OUT_BASE, out_color),
            (OUT_FLOW, out_color),
        ] {
            if let Some(style) = elements[index].style_mut() {
                style.stroke = Some(SmolStr::new_static(color));
                match index {
                    IN_BASE | OUT_BASE => {
                        style.dash = None;
                        style.opacity = BASE_OPACITY;
                    }
                    _ => {
                        style.dash = Some(SmolStr::new_static(FLOW_DASH));
                        style.opacity = FLOW_OPACITY;
                    }
                }
            }
        }
    }
}

fn link_in_viewport(doc: &Document, viewport: Option<Rect>, link_id: &LinkId) -> bool {
    let Some(viewport) = viewport else {
        return true;
    };
    let Some(group) = doc.find(&GroupKind::Link(link_id.clone())) else {
        return false;
    };
    group
        .elements()
        .iter()
        .filter_map(Element::path_data)
        .any(|data| viewport.intersects(&path_bounds(data)))
}

/// Coarse bounding box from a handful of samples; good enough for viewport
/// prioritization.
fn path_bounds(data: &PathData) -> Rect {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for step in 0..=4 {
        let at = data.point_at(step as f64 / 4.0);
        min.x = min.x.min(at.x);
        min.y = min.y.min(at.y);
        max.x = max.x.max(at.x);
        max.y = max.y.max(at.y);
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
