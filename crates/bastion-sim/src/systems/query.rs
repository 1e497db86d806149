//! Shared lookups over living entities.
//!
//! Site lists are ordered by spawn order so that nearest searches resolve
//! distance ties in favor of the entity created first.

use hecs::{Component, Entity, World};

use bastion_core::components::{Health, SpawnOrder};
use bastion_core::types::Position;

/// A living entity and where it stands this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub entity: Entity,
    pub position: Position,
}

/// Every living entity carrying marker `M`, in spawn order.
pub fn living_sites<M: Component>(world: &World) -> Vec<Site> {
    let mut sites: Vec<(SpawnOrder, Site)> = world
        .query::<(&M, &Position, &Health, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, _, health, _))| health.alive)
        .map(|(entity, (_, position, _, order))| {
            (
                *order,
                Site {
                    entity,
                    position: *position,
                },
            )
        })
        .collect();
    sites.sort_by_key(|(order, _)| *order);
    sites.into_iter().map(|(_, site)| site).collect()
}

pub fn find(sites: &[Site], entity: Entity) -> Option<Site> {
    sites.iter().find(|site| site.entity == entity).copied()
}

/// Closest site to `from`. The first site wins a tie.
pub fn nearest<'a>(from: Position, sites: impl IntoIterator<Item = &'a Site>) -> Option<(Site, f64)> {
    let mut best: Option<(Site, f64)> = None;
    for site in sites {
        let distance = from.range_to(&site.position);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((*site, distance));
        }
    }
    best
}
