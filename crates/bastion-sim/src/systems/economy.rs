//! Scrap ledger and objective upgrades.

use bastion_core::components::UpgradeLevels;
use bastion_core::constants::*;
use bastion_core::enums::UpgradeTrack;
use bastion_core::state::UpgradeTrackView;

use crate::errors::CommandError;

/// Price and effect of one purchase on an upgrade track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSpec {
    pub cost: u32,
    pub step: u32,
    pub max: u32,
}

pub fn upgrade_spec(track: UpgradeTrack) -> UpgradeSpec {
    match track {
        UpgradeTrack::HullIntegrity => UpgradeSpec {
            cost: HULL_UPGRADE_COST,
            step: HULL_UPGRADE_STEP,
            max: HULL_MAX,
        },
        UpgradeTrack::Shielding => UpgradeSpec {
            cost: SHIELDING_UPGRADE_COST,
            step: SHIELDING_UPGRADE_STEP,
            max: SHIELDING_MAX,
        },
        UpgradeTrack::Engines => UpgradeSpec {
            cost: ENGINES_UPGRADE_COST,
            step: ENGINES_UPGRADE_STEP,
            max: ENGINES_MAX,
        },
        UpgradeTrack::LifeSupport => UpgradeSpec {
            cost: LIFE_SUPPORT_UPGRADE_COST,
            step: LIFE_SUPPORT_UPGRADE_STEP,
            max: LIFE_SUPPORT_MAX,
        },
    }
}

pub fn level(levels: &UpgradeLevels, track: UpgradeTrack) -> u32 {
    match track {
        UpgradeTrack::HullIntegrity => levels.hull_integrity,
        UpgradeTrack::Shielding => levels.shielding,
        UpgradeTrack::Engines => levels.engines,
        UpgradeTrack::LifeSupport => levels.life_support,
    }
}

fn level_mut(levels: &mut UpgradeLevels, track: UpgradeTrack) -> &mut u32 {
    match track {
        UpgradeTrack::HullIntegrity => &mut levels.hull_integrity,
        UpgradeTrack::Shielding => &mut levels.shielding,
        UpgradeTrack::Engines => &mut levels.engines,
        UpgradeTrack::LifeSupport => &mut levels.life_support,
    }
}

/// Every track at its maximum.
pub fn is_complete(levels: &UpgradeLevels) -> bool {
    UpgradeTrack::ALL
        .iter()
        .all(|track| level(levels, *track) >= upgrade_spec(*track).max)
}

/// The session's scrap balance.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    pub scrap: u32,
}

impl Economy {
    pub fn earn(&mut self, amount: u32) {
        self.scrap = self.scrap.saturating_add(amount);
    }

    /// Buy one step on `track`. Returns the track cost entry that was applied and the new level.
    pub fn purchase(
        &mut self,
        levels: &mut UpgradeLevels,
        track: UpgradeTrack,
    ) -> Result<(UpgradeSpec, u32), CommandError> {
        let spec = upgrade_spec(track);
        let current = level_mut(levels, track);
        if *current >= spec.max {
            return Err(CommandError::TrackMaxed(track));
        }
        if self.scrap < spec.cost {
            return Err(CommandError::InsufficientScrap {
                cost: spec.cost,
                available: self.scrap,
            });
        }
        self.scrap -= spec.cost;
        *current = (*current + spec.step).min(spec.max);
        Ok((spec, *current))
    }

    /// Shop rows for the HUD.
    pub fn shop(&self, levels: &UpgradeLevels) -> Vec<UpgradeTrackView> {
        UpgradeTrack::ALL
            .iter()
            .map(|track| {
                let spec = upgrade_spec(*track);
                let level = level(levels, *track);
                UpgradeTrackView {
                    track: *track,
                    level,
                    max: spec.max,
                    cost: spec.cost,
                    purchasable: level < spec.max && self.scrap >= spec.cost,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_deducts_and_clamps() {
        let mut economy = Economy { scrap: 1000 };
        let mut levels = UpgradeLevels {
            hull_integrity: 96,
            ..Default::default()
        };
        let (spec, new_level) = economy
            .purchase(&mut levels, UpgradeTrack::HullIntegrity)
            .unwrap();
        assert_eq!(spec.cost, 10);
        assert_eq!(new_level, 100);
        assert_eq!(economy.scrap, 990);

        let err = economy
            .purchase(&mut levels, UpgradeTrack::HullIntegrity)
            .unwrap_err();
        assert_eq!(err, CommandError::TrackMaxed(UpgradeTrack::HullIntegrity));
        assert_eq!(economy.scrap, 990);
    }

    #[test]
    fn test_purchase_requires_scrap() {
        let mut economy = Economy { scrap: 24 };
        let mut levels = UpgradeLevels::default();
        let err = economy
            .purchase(&mut levels, UpgradeTrack::LifeSupport)
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::InsufficientScrap {
                cost: 25,
                available: 24
            }
        );
        assert_eq!(levels.life_support, 0);
    }

    #[test]
    fn test_completion_needs_every_track() {
        let mut levels = UpgradeLevels {
            hull_integrity: HULL_MAX,
            shielding: SHIELDING_MAX,
            engines: ENGINES_MAX,
            life_support: 0,
        };
        assert!(!is_complete(&levels));
        levels.life_support = LIFE_SUPPORT_MAX;
        assert!(is_complete(&levels));
    }
}
