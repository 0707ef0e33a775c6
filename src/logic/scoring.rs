//! Score-based tie-breaks (Buchholz) and standings.

use crate::models::{Player, PlayerRegistry, StandingEntry};
use std::cmp::Ordering;

/// Buchholz values of one player, computed from the opponents' current scores.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tiebreaks {
    pub buchholz_cut1: f64,
    pub buchholz_total: f64,
}

/// Tie-breaks for `player` against the active set of `registry`.
///
/// Opponents that are no longer active are skipped. With no resolvable opponent both values are 0.
pub fn tiebreaks(registry: &PlayerRegistry, player: &Player) -> Tiebreaks {
    let opp_scores: Vec<f64> = player
        .opponents
        .iter()
        .filter_map(|name| registry.get(name))
        .map(|opp| opp.score)
        .collect();

    // Summing an empty f64 iterator yields -0.0; fold from +0.0 instead.
    let buchholz_total = opp_scores.iter().fold(0.0, |acc, s| acc + s);
    let buchholz_cut1 = opp_scores
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .map(|min| buchholz_total - min)
        .unwrap_or(0.0);

    Tiebreaks {
        buchholz_cut1,
        buchholz_total,
    }
}

/// Write fresh tie-break values onto every active player.
pub fn update_tiebreaks(registry: &mut PlayerRegistry) {
    let computed: Vec<Tiebreaks> = {
        let current: &PlayerRegistry = registry;
        current.active().iter().map(|p| tiebreaks(current, p)).collect()
    };
    for (p, t) in registry.active_mut().iter_mut().zip(computed) {
        p.buchholz_cut1 = t.buchholz_cut1;
        p.buchholz_total = t.buchholz_total;
    }
}

/// Descending order on (score, cut-1, total, rating).
pub fn compare_standing(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.buchholz_cut1.total_cmp(&a.buchholz_cut1))
        .then_with(|| b.buchholz_total.total_cmp(&a.buchholz_total))
        .then_with(|| b.rating.cmp(&a.rating))
}

/// Active players ranked by score, Buchholz cut-1, Buchholz total, rating.
///
/// Full ties keep registry order (stable sort). Does not touch the stored tie-break fields.
pub fn standings(registry: &PlayerRegistry) -> Vec<StandingEntry> {
    let mut entries: Vec<StandingEntry> = registry
        .active()
        .iter()
        .map(|p| {
            let t = tiebreaks(registry, p);
            StandingEntry {
                name: p.name.clone(),
                rating: p.rating,
                score: p.score,
                buchholz_cut1: t.buchholz_cut1,
                buchholz_total: t.buchholz_total,
            }
        })
        .collect();
    entries.sort_by(compare_standing);
    entries
}
