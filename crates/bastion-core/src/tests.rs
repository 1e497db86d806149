#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, SimParams};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{EntityId, Position, Rect, SimTime, Velocity};

    /// Commands cross the frontend boundary as tagged JSON.
    #[test]
    fn test_player_command_wire_format() {
        let cmd = PlayerCommand::AttackOrder {
            units: vec![0, 2],
            target: EntityId(42),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "AttackOrder");
        assert_eq!(json["target"], 42);

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"SelectUnits","slots":[1,3]}"#).unwrap();
        assert_eq!(
            parsed,
            PlayerCommand::SelectUnits {
                slots: vec![1, 3],
                mode: SelectionMode::Replace,
            }
        );

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"SetDifficulty","difficulty":"hard"}"#).unwrap();
        assert_eq!(
            parsed,
            PlayerCommand::SetDifficulty {
                difficulty: Difficulty::Hard
            }
        );
    }

    #[test]
    fn test_sim_event_serde() {
        let event = SimEvent::DeathBurst {
            position: Position::new(10.0, 20.0),
            palette: BurstPalette::Alien,
            count: 12,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.frame, back.time.frame);
        assert_eq!(back.phase, GamePhase::MainMenu);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_position_range_and_direction() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.range_to(&b) - 5.0).abs() < 1e-10);

        let dir = a.direction_to(&b);
        assert!((dir.x - 0.6).abs() < 1e-10);
        assert!((dir.y - 0.8).abs() < 1e-10);
    }

    /// Overlapping points must give a zero direction, never NaN.
    #[test]
    fn test_direction_to_self_is_zero() {
        let p = Position::new(100.0, 100.0);
        let dir = p.direction_to(&Position::new(100.0, 100.0));
        assert_eq!(dir.x, 0.0);
        assert_eq!(dir.y, 0.0);
    }

    #[test]
    fn test_display_corner_rounds() {
        let p = Position::new(100.4, 200.6);
        assert_eq!(p.display_corner(45.0, 75.0), (78, 163));
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(Position::new(50.0, 80.0), Position::new(10.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(r.center(), Position::new(30.0, 50.0));
    }

    #[test]
    fn test_rect_contains_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(&Position::new(0.0, 0.0)));
        assert!(r.contains(&Position::new(10.0, 10.0)));
        assert!(!r.contains(&Position::new(10.01, 5.0)));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(Rect::centered(Position::new(5.0, 5.0), 2.0, 2.0).intersects(&a));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.frame, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("casual"), Some(Difficulty::Casual));
        assert_eq!(Difficulty::parse("nightmare"), None);
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn test_roster_order() {
        assert_eq!(UnitRole::ROSTER[0], UnitRole::Rifle);
        assert!(UnitRole::ROSTER[5].is_healer());
        assert_eq!(
            UnitRole::ROSTER.iter().filter(|r| r.is_healer()).count(),
            1
        );
    }

    #[test]
    fn test_builtin_params_match_defaults() {
        assert_eq!(SimParams::builtin(), SimParams::default());
    }

    #[test]
    fn test_partial_params_fall_back_to_defaults() {
        let params = SimParams::from_json_str(r#"{"range_hysteresis": 20.0}"#).unwrap();
        assert_eq!(params.range_hysteresis, 20.0);
        assert_eq!(params.map_width, SimParams::default().map_width);
        let hard = params.scaling(Difficulty::Hard);
        assert_eq!(hard.count_scale, 1.35);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = SimParams::from_json_str(r#"{"time_scale_min": 4.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "time_scale_min",
                ..
            }
        ));

        let err = SimParams::from_json_str(
            r#"{"enemy_kill_scrap": {"min": 9, "max": 2}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy_kill_scrap",
                ..
            }
        ));

        let err = SimParams::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_params_file() {
        let err = SimParams::from_file(std::path::Path::new("/nonexistent/sim_params.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_time_scale_quantization() {
        let params = SimParams::default();
        assert_eq!(params.quantize_time_scale(1.1), 1.0);
        assert_eq!(params.quantize_time_scale(1.2), 1.25);
        assert_eq!(params.quantize_time_scale(0.0), 0.25);
        assert_eq!(params.quantize_time_scale(7.5), 3.0);
    }
}
