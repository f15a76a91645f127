use std::collections::HashMap;

use super::model::{LeaderboardEntry, Submission, SubmissionStatus};

/// Aggregates submissions per user: score and time are summed over every
/// submission, solved counts accepted ones. Sorted by score descending, then
/// time ascending; equal users keep first-submission order. Totals saturate
/// at `u32::MAX`.
pub fn build<'a, I>(submissions: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, LeaderboardEntry> = HashMap::new();

    for sub in submissions {
        let entry = totals.entry(sub.user_id.clone()).or_insert_with(|| {
            order.push(sub.user_id.clone());
            LeaderboardEntry {
                rank: 0,
                user_id: sub.user_id.clone(),
                username: sub.username.clone(),
                total_score: 0,
                total_time: 0,
                problems_solved: 0,
            }
        });

        entry.total_score = entry.total_score.saturating_add(sub.score);
        entry.total_time = entry.total_time.saturating_add(sub.time_taken);
        if sub.status == SubmissionStatus::Accepted {
            entry.problems_solved += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .filter_map(|user_id| totals.remove(&user_id))
        .collect();

    entries.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then(a.total_time.cmp(&b.total_time))
    });

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }

    entries
}
