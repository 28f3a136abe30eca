//! Scoring module - cascade scoring formula and power-up award rules
//!
//! All functions here are pure; session state (the combo counter, the
//! inventory) lives in `game_state`.

use crate::core::rng::SimpleRng;
use crate::types::{
    PowerUpKind, BOMB_POINTS_PER_TILE, COMBO_MULTIPLIER_CAP, LIGHTNING_POINTS_PER_TILE,
    MATCH_BASE_POINTS, POWER_UP_MATCH_LEN, RAINBOW_MATCH_LEN,
};

/// The multiplier applied to a single resolution step: `min(combo, 10)`.
pub fn combo_multiplier(combo: u32) -> u32 {
    combo.min(COMBO_MULTIPLIER_CAP)
}

/// Points for one standard resolution step.
///
/// `tiles` is the total coordinate count across every match set cleared in
/// the step; `combo` is the step index within the chain (1-based).
pub fn match_points(tiles: usize, combo: u32) -> u32 {
    (tiles as u32)
        .saturating_mul(MATCH_BASE_POINTS)
        .saturating_mul(combo_multiplier(combo))
}

/// Flat per-tile points for a power-up's synthetic clear.
///
/// Bomb and lightning carry their own rates; the rainbow clear uses the
/// standard base rate. None of these are combo-multiplied.
pub fn power_up_points(kind: PowerUpKind, tiles: usize) -> u32 {
    let rate = match kind {
        PowerUpKind::Bomb => BOMB_POINTS_PER_TILE,
        PowerUpKind::Lightning => LIGHTNING_POINTS_PER_TILE,
        PowerUpKind::Rainbow => MATCH_BASE_POINTS,
    };
    (tiles as u32).saturating_mul(rate)
}

/// Power-up earned by producing a match of the given size, if any.
///
/// 4- and 5-length matches grant one power-up of a random kind; 6 or longer
/// always grants a rainbow.
pub fn grant_for_match_len(len: usize, rng: &mut SimpleRng) -> Option<PowerUpKind> {
    if len >= RAINBOW_MATCH_LEN {
        Some(PowerUpKind::Rainbow)
    } else if len >= POWER_UP_MATCH_LEN {
        Some(*rng.pick(&PowerUpKind::ALL))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_caps_at_ten() {
        assert_eq!(combo_multiplier(1), 1);
        assert_eq!(combo_multiplier(9), 9);
        assert_eq!(combo_multiplier(10), 10);
        assert_eq!(combo_multiplier(37), 10);
    }

    #[test]
    fn test_match_points_formula() {
        // First step of a chain: 3 tiles * 10 * 1.
        assert_eq!(match_points(3, 1), 30);
        // Third cascade step: 4 tiles * 10 * 3.
        assert_eq!(match_points(4, 3), 120);
        // Deep chains cap the multiplier.
        assert_eq!(match_points(3, 25), 300);
    }

    #[test]
    fn test_power_up_rates() {
        assert_eq!(power_up_points(PowerUpKind::Bomb, 9), 180);
        assert_eq!(power_up_points(PowerUpKind::Lightning, 8), 120);
        assert_eq!(power_up_points(PowerUpKind::Rainbow, 13), 130);
    }

    #[test]
    fn test_no_grant_below_four() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(grant_for_match_len(3, &mut rng), None);
    }

    #[test]
    fn test_mid_size_match_grants_some_kind() {
        let mut rng = SimpleRng::new(1);
        for len in [4, 5] {
            let granted = grant_for_match_len(len, &mut rng);
            assert!(granted.is_some(), "length {} must grant", len);
        }
    }

    #[test]
    fn test_long_match_always_grants_rainbow() {
        let mut rng = SimpleRng::new(1);
        for len in [6, 7, 12] {
            assert_eq!(grant_for_match_len(len, &mut rng), Some(PowerUpKind::Rainbow));
        }
    }
}
