//! Round pairing: shuffle, rank by (score, rating), bye for the last player, greedy pairing.

use crate::models::{GameMatch, Player, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the boards of one round from the active players.
///
/// 1. Shuffle (the only tie-break between equal players).
/// 2. Stable sort by score, then rating, both descending.
/// 3. With an odd count, the last player gets the bye; the bye board goes last.
/// 4. Each remaining leader plays the first player below them they have not met yet,
///    or the next player when they have met everyone left (forced rematch).
///
/// The leader of each pair takes white. No player state is modified.
pub fn generate_pairings<R: Rng + ?Sized>(
    players: &[Player],
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    if players.len() < 2 {
        return Err(TournamentError::IllegalState("need at least 2 active players to pair"));
    }

    let mut unpaired: Vec<&Player> = players.iter().collect();
    unpaired.shuffle(rng);
    unpaired.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.rating.cmp(&a.rating))
    });

    let bye_player = if unpaired.len() % 2 == 1 {
        unpaired.pop()
    } else {
        None
    };

    let mut matches = Vec::with_capacity(players.len() / 2 + 1);
    // Even count here: every leader has at least one candidate below them.
    while unpaired.len() >= 2 {
        let p1 = unpaired.remove(0);
        let partner = unpaired
            .iter()
            .position(|p2| !p1.has_played(&p2.name))
            .unwrap_or_else(|| {
                log::debug!("Forced rematch for '{}': no new opponent left", p1.name);
                0
            });
        let p2 = unpaired.remove(partner);
        matches.push(GameMatch::new(p1, p2));
    }

    if let Some(p) = bye_player {
        matches.push(GameMatch::bye(p));
    }

    Ok(matches)
}
