//! Enemy engagement decision.
//!
//! Pure function of the current situation: nothing is cached between frames,
//! so the "state" of an enemy is re-derived from distances every tick.
//! No ECS dependency, operates on plain data.

use bastion_core::components::EnemyStats;
use bastion_core::types::Position;

/// Nearest squad unit as seen by one enemy.
#[derive(Debug, Clone, Copy)]
pub struct UnitSighting {
    pub position: Position,
    pub distance: f64,
}

/// Input to the decision for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub position: Position,
    pub stats: EnemyStats,
    pub nearest_unit: Option<UnitSighting>,
    pub objective_position: Position,
    pub objective_distance: f64,
    /// Slack past attack range within which the objective takes priority.
    pub objective_buffer: f64,
    /// The attack cooldown has elapsed.
    pub attack_ready: bool,
}

/// What an enemy has decided to fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngageTarget {
    /// The unit in [`EnemyContext::nearest_unit`].
    Unit,
    Objective,
}

/// Output of the decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyIntent {
    /// Nothing in reach. Stay put.
    Idle,
    /// A unit is inside the avoidance radius. Back off toward `to`.
    Avoid { target: EngageTarget, to: Position },
    /// Close the distance to the target.
    Approach { target: EngageTarget, point: Position },
    /// In range with the cooldown elapsed. Deal damage this frame.
    Attack { target: EngageTarget },
    /// In range, waiting out the cooldown.
    Hold { target: EngageTarget },
}

impl EnemyIntent {
    pub fn target(&self) -> Option<EngageTarget> {
        match self {
            EnemyIntent::Idle => None,
            EnemyIntent::Avoid { target, .. }
            | EnemyIntent::Approach { target, .. }
            | EnemyIntent::Attack { target }
            | EnemyIntent::Hold { target } => Some(*target),
        }
    }
}

/// Choose between the nearest unit and the objective.
pub fn select_target(ctx: &EnemyContext) -> Option<EngageTarget> {
    let stats = &ctx.stats;
    let objective_close = ctx.objective_distance <= stats.attack_range + ctx.objective_buffer;
    let unit_in_detection = ctx
        .nearest_unit
        .is_some_and(|unit| unit.distance <= stats.detection_range);

    if objective_close || stats.prioritize_objective {
        return Some(EngageTarget::Objective);
    }
    if unit_in_detection {
        return Some(EngageTarget::Unit);
    }
    if ctx.objective_distance <= stats.objective_detection_range {
        return Some(EngageTarget::Objective);
    }
    None
}

/// Evaluate the decision for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyIntent {
    let Some(target) = select_target(ctx) else {
        return EnemyIntent::Idle;
    };

    // Avoidance wins over attacking, even when the target is in range.
    if ctx.stats.avoid_radius > 0.0 {
        if let Some(unit) = ctx.nearest_unit {
            if unit.distance < ctx.stats.avoid_radius {
                return EnemyIntent::Avoid {
                    target,
                    to: retreat_point(ctx.position, unit.position, ctx.stats.avoid_radius),
                };
            }
        }
    }

    let (target_position, target_distance) = match (target, ctx.nearest_unit) {
        (EngageTarget::Unit, Some(unit)) => (unit.position, unit.distance),
        _ => (ctx.objective_position, ctx.objective_distance),
    };

    if target_distance > ctx.stats.attack_range {
        EnemyIntent::Approach {
            target,
            point: target_position,
        }
    } else if ctx.attack_ready {
        EnemyIntent::Attack { target }
    } else {
        EnemyIntent::Hold { target }
    }
}

/// Point `radius` away from the threat, on the far side from it.
fn retreat_point(from: Position, threat: Position, radius: f64) -> Position {
    let away = threat.direction_to(&from);
    Position::from_dvec2(threat.as_dvec2() + away * radius)
}
