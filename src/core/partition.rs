use crate::core::quota::{fair_shares, interleave_by_age};
use crate::models::{GenderBucket, Parity, Participant, PartitionOptions, Team};
use std::collections::VecDeque;

/// Teams built by [`partition_detailed`], plus how many members the size
/// correction pass had to relocate
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionOutcome {
    pub teams: Vec<Team>,
    pub moved: usize,
}

/// Coerce a caller-supplied team count to a usable integer
///
/// Fractions are truncated; negative, NaN and infinite values become zero.
#[inline]
pub fn normalize_team_count(raw: f64) -> usize {
    if raw.is_finite() && raw >= 1.0 {
        raw.trunc() as usize
    } else {
        0
    }
}

/// Partition a roster into `team_count` balanced teams
///
/// The roster is expected to exclude leaders already. It is never modified;
/// the returned teams hold clones of its participants.
///
/// Exactly `team_count` teams are allocated up front, empty ones included, so
/// the caller is responsible for bounding it (the HTTP layer applies
/// `partition.max_team_count`).
pub fn partition(roster: &[Participant], team_count: usize, options: &PartitionOptions) -> Vec<Team> {
    partition_detailed(roster, team_count, options).teams
}

/// Same as [`partition`], also reporting the correction pass
///
/// # Passes
/// 1. Bucket by gender, order each bucket by interleaved age
/// 2. Fill teams (exact per-team gender quotas, or round-robin in loose mode)
/// 3. Order each team by age
/// 4. Move members until every team is within one of every other
pub fn partition_detailed(
    roster: &[Participant],
    team_count: usize,
    options: &PartitionOptions,
) -> PartitionOutcome {
    if team_count == 0 {
        return PartitionOutcome { teams: Vec::new(), moved: 0 };
    }

    let mut queues = gender_queues(roster);
    let mut teams: Vec<Vec<usize>> = vec![Vec::new(); team_count];

    match options.parity {
        Parity::Strict => fill_by_quota(&mut queues, &mut teams),
        Parity::Loose => fill_round_robin(&mut queues, &mut teams),
    }

    for team in &mut teams {
        team.sort_by(|&a, &b| roster[a].effective_age().total_cmp(&roster[b].effective_age()));
    }

    let moved = rebalance_sizes(roster, &mut teams);

    tracing::debug!(
        "Partitioned {} participants into {} teams ({:?}, {} moved)",
        roster.len(),
        team_count,
        options.parity,
        moved
    );

    PartitionOutcome {
        teams: teams
            .into_iter()
            .map(|team| team.into_iter().map(|idx| roster[idx].clone()).collect())
            .collect(),
        moved,
    }
}

/// One age-interleaved FIFO queue of roster indices per gender bucket
fn gender_queues(roster: &[Participant]) -> Vec<VecDeque<usize>> {
    let mut buckets: [Vec<usize>; 3] = Default::default();
    for (idx, participant) in roster.iter().enumerate() {
        buckets[participant.bucket().index()].push(idx);
    }

    buckets
        .into_iter()
        .map(|bucket| interleave_by_age(roster, bucket))
        .collect()
}

/// Give each team exactly its quota of every gender bucket, team 0 first
fn fill_by_quota(queues: &mut [VecDeque<usize>], teams: &mut [Vec<usize>]) {
    let team_count = teams.len();
    let quotas: Vec<Vec<usize>> = queues
        .iter()
        .map(|queue| fair_shares(queue.len(), team_count))
        .collect();

    for (t, team) in teams.iter_mut().enumerate() {
        for (queue, quota) in queues.iter_mut().zip(&quotas) {
            let take = quota[t].min(queue.len());
            team.extend(queue.drain(..take));
        }
    }

    // Quotas sum to each bucket's size, so this only runs if that breaks
    let leftovers: Vec<usize> = queues.iter_mut().flat_map(|queue| queue.drain(..)).collect();
    if !leftovers.is_empty() {
        tracing::warn!("{} participants left after quota fill, distributing round-robin", leftovers.len());
    }
    for (i, idx) in leftovers.into_iter().enumerate() {
        teams[i % team_count].push(idx);
    }
}

/// Merge buckets Male, Female, Other in turn, then deal the result out
fn fill_round_robin(queues: &mut [VecDeque<usize>], teams: &mut [Vec<usize>]) {
    let team_count = teams.len();
    let mut merged = Vec::with_capacity(queues.iter().map(VecDeque::len).sum());

    loop {
        let mut took = false;
        for queue in queues.iter_mut() {
            if let Some(idx) = queue.pop_front() {
                merged.push(idx);
                took = true;
            }
        }
        if !took {
            break;
        }
    }

    for (i, idx) in merged.into_iter().enumerate() {
        teams[i % team_count].push(idx);
    }
}

/// Move members from teams above their target size to teams below it
///
/// Targets are the fair split of the total roster, extras on the lowest
/// indices. Returns the number of members moved.
fn rebalance_sizes(roster: &[Participant], teams: &mut [Vec<usize>]) -> usize {
    let total = teams.iter().map(Vec::len).sum();
    let targets = fair_shares(total, teams.len());
    let mut moved = 0;

    loop {
        let Some(from) = (0..teams.len()).find(|&i| teams[i].len() > targets[i]) else {
            break;
        };
        let Some(to) = (0..teams.len()).find(|&j| teams[j].len() < targets[j]) else {
            break;
        };

        let pos = pick_member(roster, &teams[from], &teams[to]);
        let member = teams[from].remove(pos);

        let age = roster[member].effective_age();
        let insert_at = teams[to].partition_point(|&m| roster[m].effective_age() <= age);
        teams[to].insert(insert_at, member);
        moved += 1;
    }

    moved
}

/// Oldest member of `from` whose gender bucket `from` has more of than `to`
///
/// Moving such a member keeps both teams within one of each other for that
/// bucket. Falls back to the oldest member. `from` must not be empty.
fn pick_member(roster: &[Participant], from: &[usize], to: &[usize]) -> usize {
    let from_counts = bucket_counts(roster, from);
    let to_counts = bucket_counts(roster, to);

    from.iter()
        .rposition(|&m| {
            let b = roster[m].bucket().index();
            from_counts[b] > to_counts[b]
        })
        .unwrap_or(from.len() - 1)
}

fn bucket_counts(roster: &[Participant], team: &[usize]) -> [usize; 3] {
    let mut counts = [0; GenderBucket::ALL.len()];
    for &m in team {
        counts[roster[m].bucket().index()] += 1;
    }
    counts
}
