#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted random selection shared by the reward path.
//!
//! One generic implementation of the cumulative-walk draw so the weighting
//! math exists in exactly one place. Callers supply their own [`Rng`], which
//! keeps every draw seedable and replayable.

use rand::Rng;

/// Selects one entry with probability proportional to its weight.
///
/// The total sums every weight, including zero and negative entries, which
/// contribute no probability mass; such entries are never returned. An empty
/// slice or a total that is not strictly positive yields `None` rather than a
/// synthetic default. The walk compares inclusively against the cumulative
/// sum, and if floating-point drift exhausts the walk the last entry is
/// returned instead of absence.
///
/// Consumes exactly one draw from `rng` when a selection is attempted.
pub fn choose_weighted<'entries, T, R, W>(
    rng: &mut R,
    entries: &'entries [T],
    mut weight_of: W,
) -> Option<&'entries T>
where
    R: Rng + ?Sized,
    W: FnMut(&T) -> f64,
{
    let total: f64 = entries.iter().map(&mut weight_of).sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }

    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for entry in entries {
        let weight = weight_of(entry);
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if roll <= cumulative {
            return Some(entry);
        }
    }

    entries.last()
}
