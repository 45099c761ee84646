//! Canned follow-up generator, used when the hosted model is not available.

use rand::Rng;

use crate::domain::Assessment;
use crate::seeds::{ENCOURAGEMENTS, PROMPT_TIERS, TIPS};
use crate::util::fill_template;

/// Which question tier fits this point of the conversation.
pub fn tier_for_turn(turn_index: usize) -> usize {
  match turn_index {
    0..=3 => 0,
    4..=6 => 1,
    _ => 2,
  }
}

/// Build the next canned prompt. Randomness only affects which encouragement
/// and tip are picked; pass a seeded RNG for reproducible output.
pub fn next_prompt<R: Rng>(
  turn_index: usize,
  last_assessment: Option<&Assessment>,
  rng: &mut R,
) -> String {
  let tier = &PROMPT_TIERS[tier_for_turn(turn_index)];
  let base = tier[turn_index % tier.len()];

  let mut out = String::new();
  if let Some(a) = last_assessment {
    let phrase = ENCOURAGEMENTS[rng.gen_range(0..ENCOURAGEMENTS.len())];
    out.push_str(&fill_template(phrase, &[("category", &a.category.display_name())]));
  }
  out.push_str(base);

  if turn_index % 4 == 0 {
    out.push_str(TIPS[rng.gen_range(0..TIPS.len())]);
  }
  out
}
