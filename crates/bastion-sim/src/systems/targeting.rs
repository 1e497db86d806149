//! Target assignment for the squad.
//!
//! Units are processed one at a time in roster order, and each decision can
//! see the commitments made earlier in the same pass. The pass works on a
//! copy of the unit state and writes it back at the end.

use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{Enemy, Health, ResourceNode, SquadMember, Steering, Unit, UnitStats};
use bastion_core::config::SimParams;
use bastion_core::constants::MEDIC_STANDOFF_FACTOR;
use bastion_core::enums::UnitRole;
use bastion_core::types::Position;

use crate::orders::{AreaAttack, AreaOrder, CombatTarget, MiningAssignment};
use crate::systems::mining::{self, MiningState};
use crate::systems::query::{find, living_sites, nearest, Site};

/// A unit wants to shoot at `aim` this frame, cooldown permitting.
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub shooter: Entity,
    pub origin: Position,
    pub aim: Position,
}

/// Working copy of one unit for the duration of the pass.
#[derive(Debug, Clone)]
pub(crate) struct UnitPlan {
    pub entity: Entity,
    pub slot: usize,
    pub role: UnitRole,
    pub position: Position,
    pub stats: UnitStats,
    pub hp: i32,
    pub max_hp: i32,
    pub steering: Steering,
    pub target: Option<Entity>,
    pub area: Option<AreaOrder>,
    pub mining: Option<Entity>,
}

impl UnitPlan {
    fn manual_move_in_flight(&self) -> bool {
        self.steering.moving && self.steering.manual
    }
}

/// Run target assignment for every unit and collect fire requests.
pub fn run(world: &mut World, mining: &mut MiningState, params: &SimParams) -> Vec<FireRequest> {
    let enemies = living_sites::<Enemy>(world);
    let nodes = living_sites::<ResourceNode>(world);
    let mut plans = load_plans(world);
    let mut fires = Vec::new();

    for i in 0..plans.len() {
        if plans[i].role.is_healer() {
            follow_patient(&mut plans, i, params);
            continue;
        }

        validate_target(&mut plans[i], &enemies);
        claim_area_target(&mut plans, i, &enemies);
        if plans[i].target.is_none() && plans[i].area.is_none() {
            acquire_in_range(&mut plans[i], &enemies);
        }

        if let Some(site) = plans[i].target.and_then(|target| find(&enemies, target)) {
            let plan = &mut plans[i];
            if let Some(aim) = engage(plan, site.position, params.range_hysteresis) {
                fires.push(FireRequest {
                    shooter: plan.entity,
                    origin: plan.position,
                    aim,
                });
            }
        } else if !plans[i].manual_move_in_flight() {
            if let Some(aim) = mine(&mut plans, i, &nodes, mining, params) {
                fires.push(FireRequest {
                    shooter: plans[i].entity,
                    origin: plans[i].position,
                    aim,
                });
            }
        }
    }

    store_plans(world, &plans);
    fires
}

/// Snapshot every squad unit in roster order.
pub(crate) fn load_plans(world: &World) -> Vec<UnitPlan> {
    let mut plans: Vec<UnitPlan> = world
        .query::<(
            &Unit,
            &SquadMember,
            &Position,
            &UnitStats,
            &Health,
            &Steering,
            &CombatTarget,
            &AreaAttack,
            &MiningAssignment,
        )>()
        .iter()
        .map(
            |(entity, (_, member, pos, stats, health, steering, target, area, mining))| UnitPlan {
                entity,
                slot: member.slot,
                role: member.role,
                position: *pos,
                stats: *stats,
                hp: health.hp,
                max_hp: health.max_hp,
                steering: *steering,
                target: target.0,
                area: area.0.clone(),
                mining: mining.0,
            },
        )
        .collect();
    plans.sort_by_key(|plan| plan.slot);
    plans
}

pub(crate) fn store_plans(world: &mut World, plans: &[UnitPlan]) {
    for plan in plans {
        if let Ok((steering, target, area, mining)) = world.query_one_mut::<(
            &mut Steering,
            &mut CombatTarget,
            &mut AreaAttack,
            &mut MiningAssignment,
        )>(plan.entity)
        {
            *steering = plan.steering;
            target.0 = plan.target;
            area.0 = plan.area.clone();
            mining.0 = plan.mining;
        }
    }
}

/// Drop a committed target that died or no longer exists.
fn validate_target(plan: &mut UnitPlan, enemies: &[Site]) {
    if let Some(target) = plan.target {
        if find(enemies, target).is_none() {
            plan.target = None;
            plan.steering.moving = false;
        }
    }
}

/// Pick the next target from the unit's area order, preferring enemies no
/// squad-mate has claimed. A unit sharing its target with an earlier
/// squad-mate moves to an unclaimed enemy once one is free. An exhausted
/// area order ends area mode.
fn claim_area_target(plans: &mut [UnitPlan], i: usize, enemies: &[Site]) {
    let (squad, captured) = match plans[i].area.as_mut() {
        Some(area) => {
            area.captured.retain(|entity| find(enemies, *entity).is_some());
            (area.squad, area.captured.clone())
        }
        None => return,
    };
    if captured.is_empty() {
        plans[i].area = None;
        return;
    }

    let claimed = squad_claims(plans, i, squad, enemies);
    let from = plans[i].position;
    match plans[i].target {
        None => plans[i].target = pick_area_target(from, &captured, &claimed, enemies),
        Some(current) if held_earlier(plans, i, squad, current) => {
            if let Some(free) = pick_unclaimed(from, &captured, &claimed, enemies) {
                plans[i].target = Some(free);
            }
        }
        Some(_) => {}
    }
}

fn held_earlier(plans: &[UnitPlan], i: usize, squad: u32, target: Entity) -> bool {
    plans[..i].iter().any(|plan| {
        plan.target == Some(target) && plan.area.as_ref().is_some_and(|area| area.squad == squad)
    })
}

/// Living targets held by other members of `squad`.
pub(crate) fn squad_claims(plans: &[UnitPlan], except: usize, squad: u32, enemies: &[Site]) -> Vec<Entity> {
    plans
        .iter()
        .enumerate()
        .filter(|(j, plan)| {
            *j != except && plan.area.as_ref().is_some_and(|area| area.squad == squad)
        })
        .filter_map(|(_, plan)| plan.target)
        .filter(|target| find(enemies, *target).is_some())
        .collect()
}

/// Nearest unclaimed captured enemy, falling back to the nearest captured
/// enemy when every one of them is already claimed.
pub fn pick_area_target(
    from: Position,
    captured: &[Entity],
    claimed: &[Entity],
    enemies: &[Site],
) -> Option<Entity> {
    pick_unclaimed(from, captured, claimed, enemies).or_else(|| {
        let candidates: Vec<Site> = captured
            .iter()
            .filter_map(|entity| find(enemies, *entity))
            .collect();
        nearest(from, &candidates).map(|(site, _)| site.entity)
    })
}

fn pick_unclaimed(
    from: Position,
    captured: &[Entity],
    claimed: &[Entity],
    enemies: &[Site],
) -> Option<Entity> {
    let candidates: Vec<Site> = captured
        .iter()
        .filter(|entity| !claimed.contains(*entity))
        .filter_map(|entity| find(enemies, *entity))
        .collect();
    nearest(from, &candidates).map(|(site, _)| site.entity)
}

/// Commit to the nearest enemy, but only if it is already within range.
fn acquire_in_range(plan: &mut UnitPlan, enemies: &[Site]) {
    if let Some((site, distance)) = nearest(plan.position, enemies) {
        if distance <= plan.stats.range {
            plan.target = Some(site.entity);
            plan.steering.moving = false;
            plan.steering.manual = false;
        }
    }
}

/// Hold the weapon's range from `target`. Returns the aim point when the
/// unit is inside the firing band.
fn engage(plan: &mut UnitPlan, target: Position, hysteresis: f64) -> Option<Position> {
    let distance = plan.position.range_to(&target);
    plan.steering.manual = false;
    if distance > plan.stats.range + hysteresis {
        let toward = plan.position.direction_to(&target);
        plan.steering.target = Position::from_dvec2(target.as_dvec2() - toward * plan.stats.range);
        plan.steering.moving = true;
        None
    } else {
        plan.steering.moving = false;
        Some(target)
    }
}

/// Fall back to mining the unit's assigned node.
fn mine(
    plans: &mut [UnitPlan],
    i: usize,
    nodes: &[Site],
    state: &mut MiningState,
    params: &SimParams,
) -> Option<Position> {
    if state.dirty {
        reassign_nodes(plans, nodes, state);
    }
    let site = match plans[i].mining.and_then(|node| find(nodes, node)) {
        Some(site) => site,
        None => {
            state.mark_dirty();
            reassign_nodes(plans, nodes, state);
            plans[i].mining.and_then(|node| find(nodes, node))?
        }
    };
    engage(&mut plans[i], site.position, params.range_hysteresis)
}

fn reassign_nodes(plans: &mut [UnitPlan], nodes: &[Site], state: &mut MiningState) {
    let miners: Vec<usize> = (0..plans.len())
        .filter(|&i| !plans[i].role.is_healer())
        .collect();
    let positions: Vec<Position> = miners.iter().map(|&i| plans[i].position).collect();
    let assignment = mining::assign(&positions, nodes);

    let mut changed = 0;
    for (&i, node) in miners.iter().zip(assignment) {
        if plans[i].mining != node {
            changed += 1;
        }
        plans[i].mining = node;
    }
    for plan in plans.iter_mut().filter(|plan| plan.role.is_healer()) {
        plan.mining = None;
    }
    state.dirty = false;

    if changed > 0 {
        debug!(changed, nodes = nodes.len(), "resource nodes reassigned");
    }
}

/// Healers trail the nearest damaged ally inside the search radius.
fn follow_patient(plans: &mut [UnitPlan], i: usize, params: &SimParams) {
    let from = plans[i].position;
    let mut best: Option<(Position, f64)> = None;
    for (j, plan) in plans.iter().enumerate() {
        if j == i || plan.role.is_healer() || plan.hp >= plan.max_hp {
            continue;
        }
        let distance = from.range_to(&plan.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((plan.position, distance));
        }
    }

    let healer = &mut plans[i];
    healer.target = None;
    let Some((patient, distance)) = best else {
        return;
    };
    if distance > params.medic_search_radius {
        return;
    }
    let stop = healer.stats.range * MEDIC_STANDOFF_FACTOR;
    if distance > stop {
        let toward = from.direction_to(&patient);
        healer.steering.target = Position::from_dvec2(patient.as_dvec2() - toward * stop);
        healer.steering.moving = true;
    } else {
        healer.steering.moving = false;
    }
}
