use crate::models::Participant;
use std::collections::VecDeque;

/// Split `count` items across `teams` slots as evenly as possible
///
/// Every slot gets `count / teams`; the first `count % teams` slots get one
/// more. Returns an empty vector when `teams` is zero.
///
/// # Example
/// `fair_shares(8, 3)` is `[3, 3, 2]`.
pub fn fair_shares(count: usize, teams: usize) -> Vec<usize> {
    if teams == 0 {
        return Vec::new();
    }

    let base = count / teams;
    let extra = count % teams;

    (0..teams)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Order roster indices by ascending age, then interleave from both ends
///
/// For ages `[14, 15, 16, 17, 18]` the result is `[14, 18, 15, 17, 16]`, so a
/// consumer taking entries from the front alternates young and old members
/// instead of draining one end of the age range.
pub fn interleave_by_age(roster: &[Participant], mut indices: Vec<usize>) -> VecDeque<usize> {
    // sort_by is stable, equal ages keep roster order
    indices.sort_by(|&a, &b| {
        roster[a]
            .effective_age()
            .total_cmp(&roster[b].effective_age())
    });

    let mut queue = VecDeque::with_capacity(indices.len());
    let mut sorted: VecDeque<usize> = indices.into();
    while let Some(low) = sorted.pop_front() {
        queue.push_back(low);
        if let Some(high) = sorted.pop_back() {
            queue.push_back(high);
        }
    }

    queue
}
