use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use gameshow_engine::{GameShow, Leader, ScoreBoard, ScoreStorage, WheelPreset};

#[derive(Clone, Default)]
struct MemoryStorage {
    saved: Rc<RefCell<Option<ScoreBoard>>>,
}

impl ScoreStorage for MemoryStorage {
    type Error = Infallible;

    fn save_scores(&self, board: &ScoreBoard) -> Result<(), Self::Error> {
        *self.saved.borrow_mut() = Some(board.clone());
        Ok(())
    }

    fn load_scores(&self) -> Result<Option<ScoreBoard>, Self::Error> {
        Ok(self.saved.borrow().clone())
    }

    fn clear_scores(&self) -> Result<(), Self::Error> {
        *self.saved.borrow_mut() = None;
        Ok(())
    }
}

#[test]
fn a_full_game_night_survives_a_mid_session_reload() {
    let storage = MemoryStorage::default();
    let mut show = GameShow::new(storage.clone());
    show.start_game().unwrap();
    show.rename_player("player1", "Alex").unwrap();
    show.rename_player("player2", "Jordan").unwrap();
    show.rename_player("player3", "Riley").unwrap();
    show.wheel_mut().apply_preset(WheelPreset::Six);

    // Ten rounds: spin, announce, award the round to a rotating player.
    let player_ids = ["player1", "player2", "player3"];
    let mut rotation = 0.0_f32;
    for round in 0..10 {
        let plan = show.wheel_mut().start_spin().unwrap();
        rotation += plan.total_rotation;
        let result = show.wheel().resolve_winner(rotation, true).unwrap();
        assert!(!result.winner_text.is_empty());
        show.wheel_mut().stop_spin();
        rotation = result.final_angle;

        let points = if round == 9 { 50 } else { 10 };
        show.adjust_score(player_ids[round % 3], points).unwrap();
    }

    // The host's browser crashes; the board comes back, the wheel resets.
    let reloaded = GameShow::load(storage).unwrap();
    assert_eq!(reloaded.scores(), show.scores());
    assert_eq!(reloaded.wheel().segments().len(), 11);

    let summary = reloaded.scores().summary();
    assert_eq!(summary["Alex"], 80);
    assert_eq!(summary["Jordan"], 30);
    assert_eq!(summary["Riley"], 30);
    match reloaded.scores().leader() {
        Some(Leader::Winner(player)) => assert_eq!(player.name, "Alex"),
        other => panic!("expected Alex in the lead, got {other:?}"),
    }
}

#[test]
fn resetting_between_nights_clears_the_slate() {
    let storage = MemoryStorage::default();
    let mut show = GameShow::new(storage.clone());
    show.adjust_score("player1", 100).unwrap();
    show.adjust_score("player2", 100).unwrap();
    assert_eq!(show.scores().leader(), Some(Leader::Tie));

    show.reset_scores().unwrap();
    assert_eq!(show.scores().leader(), None);

    show.reset_game().unwrap();
    let reloaded = GameShow::load(storage).unwrap();
    assert_eq!(reloaded.scores(), &ScoreBoard::new());
}
