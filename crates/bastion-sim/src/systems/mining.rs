//! Resource node assignment.
//!
//! Assignment is lazy: it is only recomputed when marked dirty, which
//! happens once per frame, whenever a node is destroyed and whenever a
//! unit finds its node gone.

use hecs::Entity;

use bastion_core::types::Position;

use crate::systems::query::{nearest, Site};

/// Cross-frame mining bookkeeping.
#[derive(Debug, Clone)]
pub struct MiningState {
    pub dirty: bool,
}

impl Default for MiningState {
    fn default() -> Self {
        Self { dirty: true }
    }
}

impl MiningState {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Assign a node to every miner, miners given in roster order.
///
/// Round one hands each miner the nearest node nobody holds yet. Round two
/// lets miners left empty-handed share their nearest node, which only
/// happens when there are fewer nodes than miners.
pub fn assign(miners: &[Position], nodes: &[Site]) -> Vec<Option<Entity>> {
    let mut used = vec![false; nodes.len()];
    let mut assignment: Vec<Option<Entity>> = Vec::with_capacity(miners.len());

    for miner in miners {
        let free: Vec<Site> = nodes
            .iter()
            .zip(&used)
            .filter(|(_, taken)| !**taken)
            .map(|(site, _)| *site)
            .collect();
        let pick = nearest(*miner, &free).map(|(site, _)| site.entity);
        if let Some(entity) = pick {
            if let Some(index) = nodes.iter().position(|site| site.entity == entity) {
                used[index] = true;
            }
        }
        assignment.push(pick);
    }

    for (miner, slot) in miners.iter().zip(assignment.iter_mut()) {
        if slot.is_none() {
            *slot = nearest(*miner, nodes).map(|(site, _)| site.entity);
        }
    }

    assignment
}
