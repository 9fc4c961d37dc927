// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Pending-build queue for link overlays.

use std::collections::BTreeSet;

use crate::model::LinkId;

/// Bounded set of link-groups awaiting offset-path construction. Membership
/// is deduplicated; drain order prefers the viewport, then id order.
#[derive(Debug, Default)]
pub(crate) struct BuildQueue {
    pending: BTreeSet<LinkId>,
    capacity: usize,
}

impl BuildQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            pending: BTreeSet::new(),
            capacity,
        }
    }

    /// Queues a link. Returns false when the queue is full; the link will be
    /// re-offered on the next metrics delivery.
    pub(crate) fn enqueue(&mut self, link_id: LinkId) -> bool {
        if self.pending.contains(&link_id) {
            return true;
        }
        if self.pending.len() >= self.capacity {
            return false;
        }
        self.pending.insert(link_id);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    /// Takes up to `limit` links, viewport members first.
    pub(crate) fn take_batch(
        &mut self,
        limit: usize,
        in_viewport: impl Fn(&LinkId) -> bool,
    ) -> Vec<LinkId> {
        let mut batch: Vec<LinkId> = self
            .pending
            .iter()
            .filter(|link_id| in_viewport(link_id))
            .take(limit)
            .cloned()
            .collect();
        if batch.len() < limit {
            let remaining = limit - batch.len();
            batch.extend(
                self.pending
                    .iter()
                    .filter(|link_id| !in_viewport(link_id))
                    .take(remaining)
                    .cloned(),
            );
        }
        for link_id in &batch {
            self.pending.remove(link_id);
        }
        batch
    }
}
