use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Running,
    Finished,
}

impl ContestStatus {
    /// Status of a contest at `now`. Both bounds count as running.
    pub fn derive(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            ContestStatus::Upcoming
        } else if now > end {
            ContestStatus::Finished
        } else {
            ContestStatus::Running
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
    pub max_participants: u32,
    pub current_participants: u32,
    pub problems: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        ContestStatus::derive(now, self.start_time, self.end_time)
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> ContestView {
        ContestView {
            status: self.status_at(now),
            contest: self.clone(),
        }
    }
}

/// A contest as returned by the API, with its status computed at read time
#[derive(Debug, Clone, Serialize)]
pub struct ContestView {
    #[serde(flatten)]
    pub contest: Contest,
    pub status: ContestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub output: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub contest_id: String,
    pub title: String,
    pub description: String,
    pub input_format: String,
    pub output_format: String,
    pub sample_input: String,
    pub sample_output: String,
    /// Milliseconds
    pub time_limit: u32,
    /// Megabytes
    pub memory_limit: u32,
    pub difficulty: String,
    pub points: u32,
    pub test_cases: Vec<TestCase>,
}

impl Problem {
    /// Copy of the problem with hidden test cases removed
    pub fn public_view(&self) -> Problem {
        Problem {
            test_cases: self
                .test_cases
                .iter()
                .filter(|tc| !tc.is_hidden)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    RuntimeError,
    CompilationError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub contest_id: String,
    pub problem_id: String,
    pub user_id: String,
    pub username: String,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
    pub score: u32,
    /// Minutes since the contest started
    pub time_taken: u32,
    pub submitted_at: DateTime<Utc>,
    pub test_cases_passed: u32,
    pub total_test_cases: u32,
    /// Milliseconds, mocked
    pub execution_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub total_score: u32,
    pub total_time: u32,
    pub problems_solved: u32,
}
