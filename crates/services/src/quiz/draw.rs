use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::Question;

/// Draws up to `count` distinct questions from the bank, in random order.
///
/// - The whole bank is shuffled and truncated, so no question repeats
///   within a draw.
/// - A bank smaller than `count` yields the entire bank; a short quiz is a
///   degraded mode, not an error.
pub fn draw_questions<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = bank.to_vec();
    pool.as_mut_slice().shuffle(rng);
    pool.truncate(count);
    pool
}
