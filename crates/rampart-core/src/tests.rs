use crate::commands::{CommandOutcome, PlayerCommand};
use crate::enums::*;
use crate::error::CommandError;
use crate::events::GameEvent;
use crate::geometry::{point_to_segment_distance, step_toward, Path, PathError};
use crate::state::GameStateSnapshot;
use crate::types::{Position, SimTime, TowerId};

// ---- Geometry ----

#[test]
fn test_segment_distance_projects_inside() {
    let d = point_to_segment_distance(
        Position::new(5.0, 3.0),
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
    );
    assert!((d - 3.0).abs() < 1e-12);
}

#[test]
fn test_segment_distance_clamps_to_endpoints() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(10.0, 0.0);
    let before = point_to_segment_distance(Position::new(-3.0, 4.0), a, b);
    let after = point_to_segment_distance(Position::new(13.0, -4.0), a, b);
    assert!((before - 5.0).abs() < 1e-12);
    assert!((after - 5.0).abs() < 1e-12);
}

#[test]
fn test_segment_distance_degenerate_segment() {
    let p = Position::new(3.0, 4.0);
    let a = Position::new(0.0, 0.0);
    assert!((point_to_segment_distance(p, a, a) - 5.0).abs() < 1e-12);
}

#[test]
fn test_classic_path_clearance_is_monotonic() {
    let path = Path::classic();
    // Walk straight up from the first segment: clearance flips exactly once.
    let mut was_clear = false;
    for offset in 0..60 {
        let p = Position::new(120.0, 300.0 + offset as f64);
        let clear = path.is_clear_of(p, 25.0);
        assert_eq!(clear, offset >= 25, "offset {offset}");
        if was_clear {
            assert!(clear, "clearance must not flip back at offset {offset}");
        }
        was_clear = clear;
    }
}

#[test]
fn test_classic_path_shape() {
    let path = Path::classic();
    assert_eq!(path.len(), 6);
    assert_eq!(path.start(), Position::new(50.0, 300.0));
    assert_eq!(path.end(), Position::new(700.0, 450.0));
    assert_eq!(path.segments().count(), 5);
    assert!((path.length() - 1100.0).abs() < 1e-9);
}

#[test]
fn test_path_rejects_short_and_non_finite() {
    assert_eq!(
        Path::new(vec![Position::new(0.0, 0.0)]),
        Err(PathError::TooShort(1))
    );
    assert_eq!(
        Path::new(vec![Position::new(0.0, 0.0), Position::new(f64::NAN, 1.0)]),
        Err(PathError::NonFinite { index: 1 })
    );
}

#[test]
fn test_path_deserialize_validates() {
    let bad: Result<Path, _> = serde_json::from_str(r#"[{"x":1.0,"y":2.0}]"#);
    assert!(bad.is_err());
    let good: Path =
        serde_json::from_str(r#"[{"x":0.0,"y":0.0},{"x":10.0,"y":0.0}]"#).unwrap();
    assert_eq!(good.end(), Position::new(10.0, 0.0));
}

#[test]
fn test_step_toward_clamps_on_arrival() {
    let from = Position::new(0.0, 0.0);
    let to = Position::new(10.0, 0.0);

    let partial = step_toward(from, to, 4.0);
    assert!(!partial.arrived);
    assert!((partial.position.x - 4.0).abs() < 1e-12);

    let overshoot = step_toward(from, to, 25.0);
    assert!(overshoot.arrived);
    assert_eq!(overshoot.position, to);
}

#[test]
fn test_position_within_is_strict() {
    let a = Position::new(0.0, 0.0);
    assert!(a.within(&Position::new(19.9, 0.0), 20.0));
    assert!(!a.within(&Position::new(20.0, 0.0), 20.0));
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    t.advance(0.5);
    t.advance(0.25);
    assert_eq!(t.tick, 2);
    assert!((t.elapsed_secs - 0.75).abs() < 1e-12);
}

// ---- Serde shapes ----

#[test]
fn test_tower_kind_serializes_lowercase() {
    let json = serde_json::to_string(&TowerKind::Lightning).unwrap();
    assert_eq!(json, "\"lightning\"");
}

#[test]
fn test_player_command_serde() {
    let commands = vec![
        PlayerCommand::StartGame,
        PlayerCommand::SelectTowerType {
            selection: Selection::Build(TowerKind::Cannon),
        },
        PlayerCommand::SelectTowerType {
            selection: Selection::Remove,
        },
        PlayerCommand::ClearSelection,
        PlayerCommand::InteractAt { x: 120.0, y: 340.0 },
        PlayerCommand::UpgradeTower { tower: TowerId(3) },
        PlayerCommand::TogglePause,
    ];
    for cmd in &commands {
        let json = serde_json::to_string(cmd).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, &back);
    }
}

#[test]
fn test_script_style_command_json_parses() {
    let cmd: PlayerCommand = serde_json::from_str(
        r#"{"type":"SelectTowerType","selection":{"mode":"build","kind":"basic"}}"#,
    )
    .unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::SelectTowerType {
            selection: Selection::Build(TowerKind::Basic)
        }
    );
}

#[test]
fn test_rejection_event_serde() {
    let event = GameEvent::CommandRejected {
        error: CommandError::InsufficientGold {
            needed: 180,
            available: 75,
        },
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: GameEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}

#[test]
fn test_command_error_messages() {
    let err = CommandError::InsufficientGold {
        needed: 180,
        available: 75,
    };
    assert_eq!(err.to_string(), "not enough gold: need 180, have 75");
    assert_eq!(
        CommandError::MaxLevel { tower: TowerId(2) }.to_string(),
        "tower#2 is already at max level"
    );
}

#[test]
fn test_outcome_serde() {
    let outcome = CommandOutcome::Upgraded {
        tower: TowerId(1),
        level: 2,
        cost: 25,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"type\":\"Upgraded\""));
}

#[test]
fn test_default_snapshot_is_not_started() {
    let snap = GameStateSnapshot::default();
    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert!(snap.towers.is_empty());
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snap, back);
}
