// Uniform random target selection for the automated opponent and for
// reconnaissance flights. No hunt/target escalation: every unattacked cell is
// equally likely on every shot.

use alloc::vec::Vec;
use log::warn;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::board::Board;
use crate::config::{RECON_ATTEMPTS, RECON_CELLS, TARGET_ATTEMPTS};

/// Pick an unattacked cell of `board` uniformly at random.
///
/// Draws up to [`TARGET_ATTEMPTS`] random coordinates; if all of them land on
/// resolved cells, falls back to choosing among the enumerated remaining
/// cells so the shot is still uniform. Returns `None` only when every cell
/// has been attacked.
pub fn random_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let n = board.size();
    if n == 0 {
        return None;
    }
    for _ in 0..TARGET_ATTEMPTS {
        let r = rng.random_range(0..n);
        let c = rng.random_range(0..n);
        if !board.is_attacked(r, c).unwrap_or(true) {
            return Some((r, c));
        }
    }
    warn!(
        "no open cell after {} random draws, choosing from remaining cells",
        TARGET_ATTEMPTS
    );
    board.unattacked_cells().choose(rng)
}

/// Up to [`RECON_CELLS`] distinct unattacked cells of `board`, drawn
/// uniformly at random within [`RECON_ATTEMPTS`] draws. May return fewer when
/// the draws run out.
pub fn reconnaissance_targets<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Vec<(usize, usize)> {
    let n = board.size();
    let mut picked = Vec::with_capacity(RECON_CELLS);
    if n == 0 {
        return picked;
    }
    let mut attempts = 0;
    while picked.len() < RECON_CELLS && attempts < RECON_ATTEMPTS {
        attempts += 1;
        let r = rng.random_range(0..n);
        let c = rng.random_range(0..n);
        if !board.is_attacked(r, c).unwrap_or(true) && !picked.contains(&(r, c)) {
            picked.push((r, c));
        }
    }
    picked
}
