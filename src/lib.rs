// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Netsheet — network-topology diagram compiler with a live weathermap.
//!
//! The pipeline: parsed graph → [`partition`] into navigable sheets →
//! [`render`] each sheet into a deterministic drawing program → optionally
//! attach an [`overlay`] controller that repaints link utilization from
//! periodic metrics snapshots.

pub mod model;
pub mod overlay;
pub mod partition;
pub mod render;
