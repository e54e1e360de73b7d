//! History merging and per-student aggregation.
//!
//! Everything here is a pure function over [`QuizResult`] slices; fetching
//! the rows (remote sheet, local cache) is the caller's concern.

use std::collections::{HashMap, HashSet};

use crate::model::{QuizResult, StudentId};

//
// ─── LEADERBOARD ENTRY ─────────────────────────────────────────────────────────
//

/// One student's standing, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub student_id: StudentId,
    pub student_name: String,
    pub total_score: f64,
    pub attempts: u32,
}

//
// ─── HISTORY OPERATIONS ────────────────────────────────────────────────────────
//

/// Unions remote and local histories, keeping the first occurrence of each
/// `(student id, timestamp)` pair.
///
/// Remote rows are walked first, so a row that reached the sheet masks its
/// local copy while rows that never synced still surface from the cache.
#[must_use]
pub fn merge_history(remote: Vec<QuizResult>, local: Vec<QuizResult>) -> Vec<QuizResult> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut merged = Vec::with_capacity(remote.len() + local.len());

    for result in remote.into_iter().chain(local) {
        let key = (
            result.student_id.as_str().to_owned(),
            result.timestamp.clone(),
        );
        if seen.insert(key) {
            merged.push(result);
        }
    }

    merged
}

/// Groups results per student and sums their scores, then sorts by total
/// descending.
///
/// Grouping preserves first-seen order and the sort is stable, so students
/// with equal totals stay in the order their rows first appeared. A
/// student's display name is taken from their first row.
#[must_use]
pub fn aggregate(results: &[QuizResult]) -> Vec<LeaderboardEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<LeaderboardEntry> = Vec::new();

    for result in results {
        let slot = match index.get(result.student_id.as_str()) {
            Some(&slot) => slot,
            None => {
                index.insert(result.student_id.as_str(), entries.len());
                entries.push(LeaderboardEntry {
                    student_id: result.student_id.clone(),
                    student_name: result.student_name.clone(),
                    total_score: 0.0,
                    attempts: 0,
                });
                entries.len() - 1
            }
        };

        let entry = &mut entries[slot];
        entry.total_score += result.score;
        entry.attempts += 1;
    }

    entries.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    entries
}

/// Number of rows a student has in the given history.
#[must_use]
pub fn attempt_count(results: &[QuizResult], student_id: &StudentId) -> usize {
    results
        .iter()
        .filter(|result| &result.student_id == student_id)
        .count()
}

/// Sum of a student's scores across the given history.
#[must_use]
pub fn cumulative_score(results: &[QuizResult], student_id: &StudentId) -> f64 {
    results
        .iter()
        .filter(|result| &result.student_id == student_id)
        .map(|result| result.score)
        .sum()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
