//! CSV export of a finished round and CSV import of a player list.

use crate::models::{Opponent, RoundRecord, Tournament, TournamentError, DEFAULT_RATING};
use serde::Deserialize;
use std::io::Read;

/// Black-seat label on bye boards.
pub const BYE_LABEL: &str = "BYE";

#[derive(Debug, Deserialize)]
struct PlayerRow {
    name: String,
    rating: Option<u32>,
}

/// Register every `name,rating` row of a CSV (header required). Returns how many were added.
/// An empty rating means `DEFAULT_RATING`.
///
/// Rows are registered in file order. All or nothing: the first failing row aborts the import
/// and no player from the file is kept.
pub fn import_players<R: Read>(tournament: &mut Tournament, reader: R) -> Result<usize, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut staged = tournament.clone();
    let mut added = 0;
    for row in rdr.deserialize() {
        let row: PlayerRow = row?;
        staged.add_player(&row.name, row.rating.unwrap_or(DEFAULT_RATING))?;
        added += 1;
    }
    *tournament = staged;
    log::info!("Imported {} player(s)", added);
    Ok(added)
}

/// Render one archived round as CSV: the boards, a blank line, then the standings after the round.
pub fn round_report_csv(record: &RoundRecord) -> Result<String, TournamentError> {
    let mut out = Vec::new();
    {
        let mut w = csv::WriterBuilder::new().flexible(true).from_writer(&mut out);
        w.write_record(["board", "white", "white_rating", "result", "black", "black_rating"])?;
        for (i, m) in record.matches.iter().enumerate() {
            let (black, black_rating) = match &m.black {
                Opponent::Player(seat) => (seat.name.clone(), seat.rating.to_string()),
                Opponent::Bye => (BYE_LABEL.to_string(), String::new()),
            };
            w.write_record([
                (i + 1).to_string(),
                m.white.name.clone(),
                m.white.rating.to_string(),
                m.result.to_string(),
                black,
                black_rating,
            ])?;
        }

        w.write_record([""])?;
        w.write_record(["rank", "name", "rating", "score", "buchholz_cut1", "buchholz_total"])?;
        for (i, s) in record.standings.iter().enumerate() {
            w.write_record([
                (i + 1).to_string(),
                s.name.clone(),
                s.rating.to_string(),
                s.score.to_string(),
                s.buchholz_cut1.to_string(),
                s.buchholz_total.to_string(),
            ])?;
        }
        w.flush().map_err(|e| TournamentError::Csv(e.to_string()))?;
    }
    String::from_utf8(out).map_err(|e| TournamentError::Csv(e.to_string()))
}
