use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::judge;
use super::leaderboard;
use super::model::{
    Contest, ContestStatus, ContestView, LeaderboardEntry, Problem, Submission, TestCase,
};
use super::seed::SeedData;
use crate::error::{AppError, Result};

/// Body of a contest creation request. Every field is optional so that
/// missing values surface as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub max_participants: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub problems: Option<Vec<String>>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub contest_id: Option<String>,
    pub problem_id: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProblem {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub sample_input: Option<String>,
    pub sample_output: Option<String>,
    pub time_limit: Option<u32>,
    pub memory_limit: Option<u32>,
    pub difficulty: Option<String>,
    pub points: Option<u32>,
    pub test_cases: Option<Vec<TestCase>>,
}

/// The submitting user, taken from the verified token
#[derive(Debug, Clone)]
pub struct Author {
    pub user_id: String,
    pub username: String,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct ContestStore {
    contests: RwLock<Vec<Contest>>,
    problems: RwLock<Vec<Problem>>,
    submissions: RwLock<Vec<Submission>>,
}

impl ContestStore {
    pub fn new() -> Self {
        Self {
            contests: RwLock::new(Vec::new()),
            problems: RwLock::new(Vec::new()),
            submissions: RwLock::new(Vec::new()),
        }
    }

    pub fn with_seed(seed: SeedData) -> Self {
        Self {
            contests: RwLock::new(seed.contests),
            problems: RwLock::new(seed.problems),
            submissions: RwLock::new(seed.submissions),
        }
    }

    pub async fn list_contests(&self, now: DateTime<Utc>) -> Vec<ContestView> {
        let contests = self.contests.read().await;
        contests.iter().map(|c| c.view_at(now)).collect()
    }

    pub async fn get_contest(&self, contest_id: &str, now: DateTime<Utc>) -> Result<ContestView> {
        let contests = self.contests.read().await;
        contests
            .iter()
            .find(|c| c.id == contest_id)
            .map(|c| c.view_at(now))
            .ok_or_else(|| AppError::ContestNotFound(contest_id.to_string()))
    }

    pub async fn create_contest(
        &self,
        request: NewContest,
        creator: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ContestView> {
        let missing = || AppError::validation("Missing required fields");

        let title = required(request.title).ok_or_else(missing)?;
        let description = required(request.description).ok_or_else(missing)?;
        let duration = request.duration.filter(|d| *d > 0).ok_or_else(missing)?;
        let max_participants = request.max_participants.filter(|m| *m > 0).ok_or_else(missing)?;
        let start_time = request.start_time.ok_or_else(missing)?;
        let end_time = request.end_time.ok_or_else(missing)?;

        if end_time <= start_time {
            return Err(AppError::validation("endTime must be after startTime"));
        }

        let created_by = creator
            .or_else(|| required(request.created_by))
            .unwrap_or_else(|| "system".to_string());

        let contest = Contest {
            id: format!("contest-{}", Uuid::new_v4()),
            title,
            description,
            start_time,
            end_time,
            duration,
            max_participants,
            current_participants: 0,
            problems: request.problems.unwrap_or_default(),
            created_by,
            created_at: now,
        };

        tracing::info!(contest_id = %contest.id, created_by = %contest.created_by, "Contest created");

        let view = contest.view_at(now);
        self.contests.write().await.push(contest);
        Ok(view)
    }

    /// Registers one more participant. Rejected once the contest has finished
    /// or reached capacity.
    pub async fn join_contest(&self, contest_id: &str, now: DateTime<Utc>) -> Result<ContestView> {
        let mut contests = self.contests.write().await;
        let contest = contests
            .iter_mut()
            .find(|c| c.id == contest_id)
            .ok_or_else(|| AppError::ContestNotFound(contest_id.to_string()))?;

        if contest.status_at(now) == ContestStatus::Finished {
            return Err(AppError::ContestFinished(contest_id.to_string()));
        }
        if contest.is_full() {
            return Err(AppError::ContestFull(contest_id.to_string()));
        }

        contest.current_participants += 1;
        tracing::debug!(
            contest_id = %contest_id,
            participants = contest.current_participants,
            "Participant joined contest"
        );
        Ok(contest.view_at(now))
    }

    /// Adds a problem to a contest. Only the contest's creator may do so.
    pub async fn create_problem(
        &self,
        contest_id: &str,
        request: NewProblem,
        requester: &str,
    ) -> Result<Problem> {
        let created_by = {
            let contests = self.contests.read().await;
            contests
                .iter()
                .find(|c| c.id == contest_id)
                .map(|c| c.created_by.clone())
                .ok_or_else(|| AppError::ContestNotFound(contest_id.to_string()))?
        };
        if created_by != requester {
            return Err(AppError::Forbidden(
                "Only the contest creator can add problems".to_string(),
            ));
        }

        let missing = || AppError::validation("Missing required fields");
        let title = required(request.title).ok_or_else(missing)?;
        let description = required(request.description).ok_or_else(missing)?;
        let points = request.points.filter(|p| *p > 0).ok_or_else(missing)?;
        let test_cases = request.test_cases.unwrap_or_default();
        let sample = test_cases.iter().find(|tc| !tc.is_hidden);

        let problem = Problem {
            id: required(request.id).unwrap_or_else(|| format!("prob-{}", Uuid::new_v4())),
            contest_id: contest_id.to_string(),
            title,
            description,
            input_format: request.input_format.unwrap_or_default(),
            output_format: request.output_format.unwrap_or_default(),
            sample_input: request
                .sample_input
                .or_else(|| sample.map(|tc| tc.input.clone()))
                .unwrap_or_default(),
            sample_output: request
                .sample_output
                .or_else(|| sample.map(|tc| tc.output.clone()))
                .unwrap_or_default(),
            time_limit: request.time_limit.unwrap_or(1000),
            memory_limit: request.memory_limit.unwrap_or(256),
            difficulty: required(request.difficulty).unwrap_or_else(|| "Easy".to_string()),
            points,
            test_cases,
        };

        self.add_problem(problem.clone()).await?;
        tracing::info!(contest_id = %contest_id, problem_id = %problem.id, "Problem added");
        Ok(problem.public_view())
    }

    pub async fn add_problem(&self, problem: Problem) -> Result<()> {
        let mut problems = self.problems.write().await;
        if problems
            .iter()
            .any(|p| p.id == problem.id && p.contest_id != problem.contest_id)
        {
            return Err(AppError::Conflict(format!(
                "Problem {} belongs to another contest",
                problem.id
            )));
        }

        {
            let mut contests = self.contests.write().await;
            let contest = contests
                .iter_mut()
                .find(|c| c.id == problem.contest_id)
                .ok_or_else(|| AppError::ContestNotFound(problem.contest_id.clone()))?;
            if !contest.problems.contains(&problem.id) {
                contest.problems.push(problem.id.clone());
            }
        }

        problems.retain(|p| p.id != problem.id);
        problems.push(problem);
        Ok(())
    }

    pub async fn problems_for_contest(&self, contest_id: &str) -> Vec<Problem> {
        let problems = self.problems.read().await;
        problems
            .iter()
            .filter(|p| p.contest_id == contest_id)
            .map(Problem::public_view)
            .collect()
    }

    pub async fn get_problem(&self, problem_id: &str) -> Result<Problem> {
        let problems = self.problems.read().await;
        problems
            .iter()
            .find(|p| p.id == problem_id)
            .map(Problem::public_view)
            .ok_or_else(|| AppError::ProblemNotFound(problem_id.to_string()))
    }

    pub async fn submissions_for_contest(&self, contest_id: &str) -> Vec<Submission> {
        let submissions = self.submissions.read().await;
        submissions
            .iter()
            .filter(|s| s.contest_id == contest_id)
            .cloned()
            .collect()
    }

    pub async fn submissions_for_user(&self, contest_id: &str, user_id: &str) -> Vec<Submission> {
        let submissions = self.submissions.read().await;
        submissions
            .iter()
            .filter(|s| s.contest_id == contest_id && s.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Judges the code against the problem's test cases and records the result.
    pub async fn submit(
        &self,
        request: NewSubmission,
        author: Author,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let missing = || AppError::validation("Missing required fields");

        let contest_id = required(request.contest_id).ok_or_else(missing)?;
        let problem_id = required(request.problem_id).ok_or_else(missing)?;
        let code = required(request.code).ok_or_else(missing)?;
        let language = required(request.language).ok_or_else(missing)?;
        if author.user_id.is_empty() || author.username.is_empty() {
            return Err(missing());
        }

        let contest_start = {
            let contests = self.contests.read().await;
            contests
                .iter()
                .find(|c| c.id == contest_id)
                .map(|c| c.start_time)
                .ok_or_else(|| AppError::ContestNotFound(contest_id.clone()))?
        };

        let verdict = {
            let problems = self.problems.read().await;
            let problem = problems
                .iter()
                .find(|p| p.id == problem_id && p.contest_id == contest_id)
                .ok_or_else(|| AppError::ProblemNotFound(problem_id.clone()))?;
            judge::judge(problem, &code)
        };

        let time_taken = (now - contest_start).num_minutes().max(0) as u32;
        let execution_time = rand::thread_rng().gen_range(50..250);

        let submission = Submission {
            id: format!("sub-{}", Uuid::new_v4()),
            contest_id,
            problem_id,
            user_id: author.user_id,
            username: author.username,
            code,
            language,
            status: verdict.status,
            score: verdict.score,
            time_taken,
            submitted_at: now,
            test_cases_passed: verdict.passed,
            total_test_cases: verdict.total,
            execution_time,
        };

        tracing::info!(
            submission_id = %submission.id,
            contest_id = %submission.contest_id,
            problem_id = %submission.problem_id,
            user_id = %submission.user_id,
            status = ?submission.status,
            score = submission.score,
            "Submission judged"
        );

        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    pub async fn leaderboard(&self, contest_id: &str) -> Vec<LeaderboardEntry> {
        let submissions = self.submissions.read().await;
        leaderboard::build(submissions.iter().filter(|s| s.contest_id == contest_id))
    }
}

impl Default for ContestStore {
    fn default() -> Self {
        Self::new()
    }
}
