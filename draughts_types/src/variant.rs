/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, ensure, Result};

use crate::{square_count, Color};

/// What happens when a man reaches the opponent's back rank in the middle of
/// a capture chain.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MidChainPromotion {
    /// The man passes over the back rank without promoting; it only becomes a
    /// king if the chain ends there. International rule.
    Skip,
    /// Reaching the back rank ends the chain immediately and promotes, even
    /// if further captures would be available. English rule.
    Stop,
    /// The man promotes mid-chain and continues capturing with king movement.
    Continue,
}

/// The rule configuration of a draughts variant.
///
/// Immutable after construction. All gameplay code takes its parameters from
/// here, so a single engine serves every variant.
///
/// # Example
/// ```
/// # use draughts_types::Rules;
/// let rules = Rules::international();
/// assert_eq!(rules.size(), 10);
/// assert!(rules.flying_kings());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rules {
    name: String,
    /// PDN `GameType` tag value; 0 if the variant has none assigned.
    game_type: u8,
    board_size: u8,
    flying_kings: bool,
    forced_capture: bool,
    must_capture_maximum: bool,
    men_capture_backward: bool,
    midchain_promotion: MidChainPromotion,
    /// Plies without a capture or promotion before the game is drawn.
    nonprogress_threshold: u32,
    /// Occurrences of a position (side to move included) before a draw.
    repetition_threshold: u32,
}

impl Rules {
    /// International draughts: 10x10 board, flying kings, forced and maximal
    /// capture, men capture backward, promotion only at chain end.
    pub fn international() -> Self {
        Self {
            name: String::from("international"),
            game_type: 20,
            board_size: 10,
            flying_kings: true,
            forced_capture: true,
            must_capture_maximum: true,
            men_capture_backward: true,
            midchain_promotion: MidChainPromotion::Skip,
            nonprogress_threshold: 50,
            repetition_threshold: 3,
        }
    }

    /// English (American) draughts: 8x8 board, short-range kings, forced but
    /// not maximal capture, men capture forward only, promotion ends a chain.
    pub fn english() -> Self {
        Self {
            name: String::from("english"),
            game_type: 21,
            board_size: 8,
            flying_kings: false,
            forced_capture: true,
            must_capture_maximum: false,
            men_capture_backward: false,
            midchain_promotion: MidChainPromotion::Stop,
            nonprogress_threshold: 80,
            repetition_threshold: 3,
        }
    }

    /// Looks up a preset by name.
    ///
    /// Accepts the common aliases: `standard` for international, `american`
    /// for english.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "international" | "standard" => Ok(Self::international()),
            "english" | "american" => Ok(Self::english()),
            _ => bail!("unknown variant {name:?}; expected \"international\" or \"english\""),
        }
    }

    /// Builds a custom variant, validating the board geometry.
    ///
    /// Thresholds start at the international defaults; adjust them with
    /// [`Rules::with_nonprogress_threshold`] and
    /// [`Rules::with_repetition_threshold`].
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        name: impl Into<String>,
        board_size: u8,
        flying_kings: bool,
        forced_capture: bool,
        must_capture_maximum: bool,
        men_capture_backward: bool,
        midchain_promotion: MidChainPromotion,
    ) -> Result<Self> {
        ensure!(board_size % 2 == 0, "board size must be even, got {board_size}");
        ensure!(
            (4..=12).contains(&board_size),
            "board size must be between 4 and 12, got {board_size}"
        );
        Ok(Self {
            name: name.into(),
            game_type: 0,
            board_size,
            flying_kings,
            forced_capture,
            must_capture_maximum,
            men_capture_backward,
            midchain_promotion,
            nonprogress_threshold: 50,
            repetition_threshold: 3,
        })
    }

    /// Consumes `self` and sets the non-progress draw threshold, in plies.
    pub fn with_nonprogress_threshold(mut self, plies: u32) -> Self {
        self.nonprogress_threshold = plies;
        self
    }

    /// Consumes `self` and sets the repetition draw threshold, in occurrences
    /// of a position.
    pub fn with_repetition_threshold(mut self, occurrences: u32) -> Self {
        self.repetition_threshold = occurrences;
        self
    }

    /// The variant's name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant's PDN `GameType` tag value, or 0 if it has none.
    #[inline(always)]
    pub const fn game_type(&self) -> u8 {
        self.game_type
    }

    /// Edge length of the board.
    #[inline(always)]
    pub const fn size(&self) -> u8 {
        self.board_size
    }

    /// Number of playable squares on the board.
    #[inline(always)]
    pub const fn square_count(&self) -> usize {
        square_count(self.board_size)
    }

    /// Whether kings slide any number of empty squares.
    #[inline(always)]
    pub const fn flying_kings(&self) -> bool {
        self.flying_kings
    }

    /// Whether a side with an available capture may not play a quiet move.
    #[inline(always)]
    pub const fn forced_capture(&self) -> bool {
        self.forced_capture
    }

    /// Whether only the capture chains taking the most pieces are legal.
    #[inline(always)]
    pub const fn must_capture_maximum(&self) -> bool {
        self.must_capture_maximum
    }

    /// Whether men may capture in the backward directions.
    #[inline(always)]
    pub const fn men_capture_backward(&self) -> bool {
        self.men_capture_backward
    }

    /// The mid-chain promotion policy.
    #[inline(always)]
    pub const fn midchain_promotion(&self) -> MidChainPromotion {
        self.midchain_promotion
    }

    /// Plies without a capture or promotion before the game is drawn.
    #[inline(always)]
    pub const fn nonprogress_threshold(&self) -> u32 {
        self.nonprogress_threshold
    }

    /// Occurrences of a position before the game is drawn by repetition.
    #[inline(always)]
    pub const fn repetition_threshold(&self) -> u32 {
        self.repetition_threshold
    }

    /// The row on which `color` promotes: row 0 for White, the last row for
    /// Black.
    #[inline(always)]
    pub const fn back_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => 0,
            Color::Black => self.board_size - 1,
        }
    }

    /// Rows of men per side in the initial setup.
    #[inline(always)]
    pub const fn men_rows(&self) -> u8 {
        self.board_size / 2 - 1
    }

    /// Men per side in the initial setup, which is also the per-color piece
    /// cap enforced when decoding a position.
    #[inline(always)]
    pub const fn men_per_side(&self) -> usize {
        self.men_rows() as usize * self.board_size as usize / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let int = Rules::international();
        assert_eq!(int.square_count(), 50);
        assert_eq!(int.men_per_side(), 20);
        assert_eq!(int.back_rank(Color::White), 0);
        assert_eq!(int.back_rank(Color::Black), 9);

        let eng = Rules::english();
        assert_eq!(eng.square_count(), 32);
        assert_eq!(eng.men_per_side(), 12);
        assert!(!eng.flying_kings());
        assert_eq!(eng.midchain_promotion(), MidChainPromotion::Stop);
        assert_eq!(eng.nonprogress_threshold(), 80);
    }

    #[test]
    fn test_by_name_aliases() {
        assert_eq!(Rules::by_name("Standard").unwrap(), Rules::international());
        assert_eq!(Rules::by_name("american").unwrap(), Rules::english());
        assert!(Rules::by_name("turkish").is_err());
    }

    #[test]
    fn test_custom_validation() {
        assert!(Rules::custom("odd", 9, true, true, true, true, MidChainPromotion::Skip).is_err());
        assert!(Rules::custom("tiny", 2, true, true, true, true, MidChainPromotion::Skip).is_err());
        let mini = Rules::custom("mini", 6, false, true, false, false, MidChainPromotion::Stop)
            .unwrap()
            .with_nonprogress_threshold(30);
        assert_eq!(mini.square_count(), 18);
        assert_eq!(mini.men_per_side(), 6);
        assert_eq!(mini.nonprogress_threshold(), 30);
    }
}
