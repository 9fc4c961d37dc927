// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Periodic utilization snapshots from the monitoring collaborator.
//!
//! Read-only input; the overlay controller consumes one snapshot per refresh.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{LinkId, NodeId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsData {
    pub nodes: BTreeMap<NodeId, NodeMetrics>,
    pub links: BTreeMap<LinkId, LinkMetrics>,
    /// Snapshot time in milliseconds since the epoch, as reported by the feed.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub status: Status,
    #[serde(default)]
    pub last_seen: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkMetrics {
    pub status: Status,
    /// Single percentage covering both directions; ignored when the
    /// directional pair below is present.
    pub utilization: Option<f64>,
    pub in_utilization: Option<f64>,
    pub out_utilization: Option<f64>,
    pub in_bps: Option<f64>,
    pub out_bps: Option<f64>,
}

impl LinkMetrics {
    /// Receive-direction percentage: the directional value when present,
    /// otherwise the shared `utilization`.
    pub fn in_percent(&self) -> Option<f64> {
        self.in_utilization.or(self.utilization)
    }

    /// Transmit-direction percentage, same fallback rule.
    pub fn out_percent(&self) -> Option<f64> {
        self.out_utilization.or(self.utilization)
    }

    /// True when the feed has delivered nothing paintable yet.
    pub fn is_empty(&self) -> bool {
        self.status == Status::Unknown
            && self.in_percent().is_none()
            && self.out_percent().is_none()
            && self.in_bps.is_none()
            && self.out_bps.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::{LinkMetrics, MetricsData, Status};

    #[test]
    fn directional_utilization_wins_over_shared() {
        let metrics = LinkMetrics {
            status: Status::Up,
            utilization: Some(10.0),
            in_utilization: Some(40.0),
            out_utilization: None,
            in_bps: None,
            out_bps: None,
        };

        assert_eq!(metrics.in_percent(), Some(40.0));
        assert_eq!(metrics.out_percent(), Some(10.0));
    }

    #[test]
    fn parses_the_wire_shape() {
        let data: MetricsData = serde_json::from_str(
            r#"{
                "nodes": {"sw1": {"status": "down", "lastSeen": 1700000000000}},
                "links": {"l1": {"status": "up", "inUtilization": 12.5, "outUtilization": 3.0, "inBps": 125000000.0}},
                "timestamp": 1700000000500
            }"#,
        )
        .expect("metrics");

        assert_eq!(data.nodes.get("sw1").unwrap().status, Status::Down);
        let link = data.links.get("l1").unwrap();
        assert_eq!(link.in_percent(), Some(12.5));
        assert_eq!(link.in_bps, Some(125_000_000.0));
        assert_eq!(data.timestamp, 1_700_000_000_500);
    }

    #[test]
    fn empty_metrics_detection() {
        assert!(LinkMetrics::default().is_empty());

        let mut metrics = LinkMetrics::default();
        metrics.utilization = Some(0.0);
        assert!(!metrics.is_empty());

        let mut metrics = LinkMetrics::default();
        metrics.status = Status::Down;
        assert!(!metrics.is_empty());
    }
}
