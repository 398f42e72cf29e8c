use crate::models::{Team, TeamSummary};
use std::collections::BTreeMap;

/// Summarize each team: member count, mean age and raw gender histogram
pub fn summarize(teams: &[Team]) -> Vec<TeamSummary> {
    teams.iter().map(summarize_team).collect()
}

fn summarize_team(team: &Team) -> TeamSummary {
    let count = team.len();
    let average_age = if count == 0 {
        0.0
    } else {
        team.iter().map(|p| p.effective_age()).sum::<f64>() / count as f64
    };

    let mut gender_histogram = BTreeMap::new();
    for participant in team {
        *gender_histogram.entry(participant.gender.clone()).or_insert(0) += 1;
    }

    TeamSummary {
        count,
        average_age,
        gender_histogram,
    }
}

/// Difference between the highest and lowest average age among non-empty teams
pub fn age_spread(summaries: &[TeamSummary]) -> f64 {
    let averages = summaries
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| s.average_age);

    let (min, max) = averages.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), avg| {
        (min.min(avg), max.max(avg))
    });

    if max >= min {
        max - min
    } else {
        0.0
    }
}
