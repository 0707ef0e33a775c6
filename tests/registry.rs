//! Integration tests for the player registry: register, remove, restore, re-rate.

use swiss_tournament_web::{
    ConsistencyWarning, MatchResult, PlayerRegistry, Tournament, TournamentError, TournamentSettings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

#[test]
fn register_starts_with_zero_score_and_no_opponents() {
    let mut r = PlayerRegistry::new();
    r.register("  Anna ", 1500).unwrap();
    let p = r.get("Anna").unwrap();
    assert_eq!(p.rating, 1500);
    assert_eq!(p.score, 0.0);
    assert!(p.opponents.is_empty());
    assert_eq!(r.len(), 1);
}

#[test]
fn lookups_ignore_surrounding_whitespace() {
    let mut r = PlayerRegistry::new();
    r.register("  Anna ", 1500).unwrap();
    r.set_rating(" Anna ", 1600).unwrap();
    assert_eq!(r.get("Anna").unwrap().rating, 1600);

    r.remove(" Anna  ").unwrap();
    assert!(r.is_empty());
    assert_eq!(r.removed()[0].name, "Anna");

    r.restore("\tAnna ").unwrap();
    assert_eq!(r.get(" Anna").unwrap().rating, 1600);
    assert!(r.removed().is_empty());
}

#[test]
fn register_rejects_empty_and_duplicate_names() {
    let mut r = PlayerRegistry::new();
    assert!(matches!(r.register("   ", 1000), Err(TournamentError::InvalidInput(_))));
    r.register("Anna", 1500).unwrap();
    assert_eq!(
        r.register("Anna", 1200),
        Err(TournamentError::DuplicateName("Anna".to_string()))
    );
    assert_eq!(r.len(), 1);
}

#[test]
fn remove_and_restore_keep_player_state() {
    let mut r = PlayerRegistry::new();
    r.register("Anna", 1500).unwrap();
    r.register("Ben", 1400).unwrap();
    {
        let anna = r.get_mut("Anna").unwrap();
        anna.record_game("Ben", 1.0);
    }

    r.remove("Anna").unwrap();
    assert!(r.get("Anna").is_none());
    assert_eq!(r.removed().len(), 1);
    assert_eq!(r.removed()[0].score, 1.0);

    r.restore("Anna").unwrap();
    let anna = r.get("Anna").unwrap();
    assert_eq!(anna.score, 1.0);
    assert_eq!(anna.opponents, vec!["Ben".to_string()]);
    assert!(r.removed().is_empty());
    // Restored players go to the back of the collection.
    assert_eq!(r.active()[1].name, "Anna");
}

#[test]
fn remove_and_restore_unknown_names_are_not_found() {
    let mut r = PlayerRegistry::new();
    r.register("Anna", 1500).unwrap();
    assert_eq!(r.remove("Ben"), Err(TournamentError::PlayerNotFound("Ben".to_string())));
    assert_eq!(r.restore("Anna"), Err(TournamentError::PlayerNotFound("Anna".to_string())));
}

#[test]
fn restore_rejects_name_taken_meanwhile() {
    let mut r = PlayerRegistry::new();
    r.register("Anna", 1500).unwrap();
    r.remove("Anna").unwrap();
    r.register("Anna", 1100).unwrap();
    assert_eq!(r.restore("Anna"), Err(TournamentError::DuplicateName("Anna".to_string())));
    assert_eq!(r.get("Anna").unwrap().rating, 1100);
    assert_eq!(r.removed().len(), 1);
}

#[test]
fn summaries_follow_registration_order() {
    let mut r = PlayerRegistry::new();
    for (name, rating) in [("Cem", 1100), ("Anna", 1500), ("Ben", 1400)] {
        r.register(name, rating).unwrap();
    }
    let names: Vec<_> = r.active_summaries().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Cem", "Anna", "Ben"]);
}

fn two_player_tournament() -> Tournament {
    let mut t = Tournament::new(TournamentSettings::default());
    t.add_player("Anna", 1500).unwrap();
    t.add_player("Ben", 1400).unwrap();
    t
}

#[test]
fn changes_after_history_return_a_warning() {
    let mut t = two_player_tournament();
    t.add_player("Cem", 1300).unwrap();
    assert_eq!(t.set_player_rating("Cem", 1350), Ok(None));

    let mut rng = StdRng::seed_from_u64(1);
    swiss_tournament_web::start_round(&mut t, &mut rng).unwrap();
    let results = HashMap::from([(0, MatchResult::WhiteWin)]);
    swiss_tournament_web::record_results(&mut t, &results).unwrap();

    assert_eq!(
        t.set_player_rating("Anna", 1600),
        Ok(Some(ConsistencyWarning::HistoryExists { rounds: 1 }))
    );
    assert_eq!(
        t.remove_player("Cem"),
        Ok(Some(ConsistencyWarning::HistoryExists { rounds: 1 }))
    );
}

#[test]
fn seated_player_cannot_be_removed_during_a_round() {
    let mut t = two_player_tournament();
    t.add_player("Cem", 1300).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    swiss_tournament_web::start_round(&mut t, &mut rng).unwrap();

    assert!(matches!(t.remove_player("Anna"), Err(TournamentError::IllegalState(_))));
    // The bye player sits in the round too.
    assert!(matches!(t.remove_player("Cem"), Err(TournamentError::IllegalState(_))));
    assert_eq!(t.registry().len(), 3);

    t.add_player("Dora", 1200).unwrap();
    assert_eq!(t.remove_player("Dora"), Ok(None));
}
