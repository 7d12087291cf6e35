//! Tests for face resolution and the piece wire format.

use race3000::{
    Dice, Effect, Face, Piece, PlayerColor, RaceError, Resolution, SpecialEffect, TurnResolver,
    TurnState,
};

const ENTRANTS: [PlayerColor; 3] = [PlayerColor::Red, PlayerColor::Green, PlayerColor::White];

#[test]
fn test_turbo_face_scores_double() {
    let face = Face::new(vec![
        Piece::Special(SpecialEffect::Turbo),
        Piece::Movement(PlayerColor::Red),
        Piece::Movement(PlayerColor::Red),
    ]);
    let resolution = TurnResolver::new(&ENTRANTS).resolve(&face).unwrap();
    assert_eq!(resolution.pieces_advanced, 4);
    assert_eq!(resolution.next_sub_state, TurnState::Move);
}

#[test]
fn test_movers_of_any_color_count() {
    let face = Face::new(vec![
        Piece::Movement(PlayerColor::Green),
        Piece::Empty,
        Piece::Movement(PlayerColor::White),
    ]);
    let resolution = TurnResolver::new(&ENTRANTS).resolve(&face).unwrap();
    assert_eq!(resolution.pieces_advanced, 2);
}

#[test]
fn test_empty_only_face_is_valid_no_op() {
    let face = Face::new(vec![Piece::Empty; 3]);
    assert_eq!(
        TurnResolver::new(&ENTRANTS).resolve(&face),
        Ok(Resolution::NO_OP)
    );
}

#[test]
fn test_oil_face_enters_oil_phase() {
    let face = Face::new(vec![Piece::Special(SpecialEffect::Oil)]);
    let resolution = TurnResolver::new(&ENTRANTS).resolve(&face).unwrap();
    assert_eq!(resolution.next_sub_state, TurnState::Oil);
}

#[test]
fn test_dice_from_config_form() {
    let json = r#"[
        [{"kind": "movement", "player": "red"}],
        [{"kind": "special", "effect": "shortcut"}, {"kind": "empty"}]
    ]"#;
    let dice: Dice = serde_json::from_str(json).expect("Well-formed dice");
    assert_eq!(dice.len(), 2);
    assert_eq!(
        dice.face(1).unwrap().pieces()[0].effect(),
        Effect::Special {
            name: SpecialEffect::Pit
        }
    );
}

#[test]
fn test_movement_without_player_fails_to_load() {
    let json = r#"[[{"kind": "movement"}]]"#;
    let err = serde_json::from_str::<Dice>(json).unwrap_err();
    assert!(err.to_string().contains("Malformed face"));
}

#[test]
fn test_empty_dice_fails_to_load() {
    let err = serde_json::from_str::<Dice>("[]").unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_pieces_serialize_in_config_form() {
    let value = serde_json::to_value(Piece::Movement(PlayerColor::Blue)).unwrap();
    assert_eq!(value["kind"], "movement");
    assert_eq!(value["player"], "blue");
    assert!(value.get("effect").is_none());

    let err = RaceError::MalformedFace("x".to_string());
    assert_eq!(err.to_string(), "Malformed face: x");
}
