//! Integration tests for CSV player import and round reports.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use swiss_tournament_web::{
    import_players, record_results, round_report_csv, start_round, MatchResult, Tournament,
    TournamentError, TournamentSettings,
};

#[test]
fn import_registers_rows_in_order() {
    let mut t = Tournament::new(TournamentSettings::default());
    let data = "name,rating\nAnna, 1500\nBen,1400\nCem,\n";
    let added = import_players(&mut t, data.as_bytes()).unwrap();
    assert_eq!(added, 3);
    let players = t.active_players();
    assert_eq!(players[0].name, "Anna");
    assert_eq!(players[0].rating, 1500);
    assert_eq!(players[2].name, "Cem");
    assert_eq!(players[2].rating, 1000);
}

#[test]
fn import_is_all_or_nothing() {
    let mut t = Tournament::new(TournamentSettings::default());
    let data = "name,rating\nAnna,1500\nAnna,1400\nBen,1300\n";
    assert_eq!(
        import_players(&mut t, data.as_bytes()),
        Err(TournamentError::DuplicateName("Anna".to_string()))
    );
    assert!(t.registry().is_empty());
}

#[test]
fn import_rejects_bad_rating() {
    let mut t = Tournament::new(TournamentSettings::default());
    let data = "name,rating\nAnna,strong\n";
    assert!(matches!(import_players(&mut t, data.as_bytes()), Err(TournamentError::Csv(_))));
    assert!(t.registry().is_empty());
}

#[test]
fn report_lists_boards_then_standings() {
    let mut t = Tournament::new(TournamentSettings::default());
    for (name, rating) in [("Anna", 1500), ("Ben", 1400), ("Cem", 1300)] {
        t.add_player(name, rating).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(10);
    start_round(&mut t, &mut rng).unwrap();
    record_results(&mut t, &HashMap::from([(0, MatchResult::Draw)])).unwrap();

    let csv = round_report_csv(t.round(1).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "board,white,white_rating,result,black,black_rating");
    assert_eq!(lines[1], "1,Anna,1500,0.5-0.5,Ben,1400");
    assert_eq!(lines[2], "2,Cem,1300,BYE,BYE,");
    assert_eq!(lines[4], "rank,name,rating,score,buchholz_cut1,buchholz_total");
    assert_eq!(lines[5], "1,Cem,1300,1,0,0");
    assert_eq!(lines[6], "2,Anna,1500,0.5,0,0.5");
    assert_eq!(lines[7], "3,Ben,1400,0.5,0,0.5");
}
