use chrono::{DateTime, Duration, Utc};

use super::model::{Contest, Problem, Submission, SubmissionStatus, TestCase};

pub struct SeedData {
    pub contests: Vec<Contest>,
    pub problems: Vec<Problem>,
    pub submissions: Vec<Submission>,
}

/// Demo contests placed relative to `now`: one upcoming, two running.
pub fn demo_data(now: DateTime<Utc>) -> SeedData {
    SeedData {
        contests: demo_contests(now),
        problems: demo_problems(),
        submissions: demo_submissions(now),
    }
}

fn contest(
    id: &str,
    title: &str,
    description: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: u32,
    capacity: (u32, u32),
    problems: &[&str],
    created_by: &str,
    now: DateTime<Utc>,
) -> Contest {
    Contest {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        start_time,
        end_time,
        duration,
        max_participants: capacity.0,
        current_participants: capacity.1,
        problems: problems.iter().map(|p| p.to_string()).collect(),
        created_by: created_by.to_string(),
        created_at: now,
    }
}

fn demo_contests(now: DateTime<Utc>) -> Vec<Contest> {
    vec![
        contest(
            "contest-1",
            "Weekly Coding Challenge",
            "A weekly challenge featuring algorithmic problems of varying difficulty.",
            now + Duration::days(1),
            now + Duration::days(3),
            180,
            (100, 45),
            &["prob-1", "prob-2", "prob-3"],
            "admin",
            now,
        ),
        contest(
            "contest-2",
            "Beginner Friendly Contest",
            "Perfect for those starting their competitive programming journey.",
            now - Duration::minutes(30),
            now + Duration::hours(2),
            120,
            (50, 32),
            &["prob-4", "prob-5"],
            "mentor1",
            now,
        ),
        contest(
            "contest-demo",
            "Demo Sprint Contest",
            "A fully functional demo contest with multiple problems and a live leaderboard.",
            now - Duration::minutes(15),
            now + Duration::minutes(45),
            60,
            (200, 5),
            &["demo-1", "demo-2", "demo-3"],
            "system",
            now,
        ),
    ]
}

struct ProblemSeed<'a> {
    id: &'a str,
    contest_id: &'a str,
    title: &'a str,
    description: &'a str,
    input_format: &'a str,
    output_format: &'a str,
    sample: (&'a str, &'a str),
    memory_limit: u32,
    difficulty: &'a str,
    points: u32,
    cases: &'a [(&'a str, &'a str, bool)],
}

impl ProblemSeed<'_> {
    fn build(&self) -> Problem {
        Problem {
            id: self.id.to_string(),
            contest_id: self.contest_id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            input_format: self.input_format.to_string(),
            output_format: self.output_format.to_string(),
            sample_input: self.sample.0.to_string(),
            sample_output: self.sample.1.to_string(),
            time_limit: 1000,
            memory_limit: self.memory_limit,
            difficulty: self.difficulty.to_string(),
            points: self.points,
            test_cases: self
                .cases
                .iter()
                .map(|(input, output, is_hidden)| TestCase {
                    input: input.to_string(),
                    output: output.to_string(),
                    is_hidden: *is_hidden,
                })
                .collect(),
        }
    }
}

fn demo_problems() -> Vec<Problem> {
    let seeds = [
        ProblemSeed {
            id: "prob-1",
            contest_id: "contest-1",
            title: "Two Sum",
            description: "Return indices of two numbers that add up to target.",
            input_format: "n, array, target",
            output_format: "two indices",
            sample: ("4\n2 7 11 15\n9", "0 1"),
            memory_limit: 256,
            difficulty: "Easy",
            points: 100,
            cases: &[("4\n2 7 11 15\n9", "0 1", false), ("3\n3 2 4\n6", "1 2", false)],
        },
        ProblemSeed {
            id: "prob-2",
            contest_id: "contest-1",
            title: "Valid Parentheses",
            description: "Determine if the input string is valid parentheses.",
            input_format: "string s",
            output_format: "true/false",
            sample: ("()", "true"),
            memory_limit: 256,
            difficulty: "Easy",
            points: 100,
            cases: &[("()", "true", false), ("([)]", "false", true)],
        },
        ProblemSeed {
            id: "prob-3",
            contest_id: "contest-1",
            title: "Maximum Subarray",
            description: "Find maximum subarray sum.",
            input_format: "n and array",
            output_format: "max sum",
            sample: ("5\n-2 1 -3 4 -1", "4"),
            memory_limit: 256,
            difficulty: "Medium",
            points: 150,
            cases: &[("5\n-2 1 -3 4 -1", "4", false)],
        },
        ProblemSeed {
            id: "prob-4",
            contest_id: "contest-2",
            title: "Sum of Array",
            description: "Sum the array elements.",
            input_format: "n and array",
            output_format: "sum",
            sample: ("5\n1 2 3 4 5", "15"),
            memory_limit: 256,
            difficulty: "Easy",
            points: 100,
            cases: &[("5\n1 2 3 4 5", "15", false)],
        },
        ProblemSeed {
            id: "prob-5",
            contest_id: "contest-2",
            title: "Count Evens",
            description: "Count even numbers in an array.",
            input_format: "n and array",
            output_format: "count",
            sample: ("6\n1 2 3 4 5 6", "3"),
            memory_limit: 256,
            difficulty: "Easy",
            points: 100,
            cases: &[("6\n1 2 3 4 5 6", "3", false)],
        },
        ProblemSeed {
            id: "demo-1",
            contest_id: "contest-demo",
            title: "Print Hello",
            description: "Output the text \"Hello, World!\" exactly.",
            input_format: "No input",
            output_format: "Hello, World!",
            sample: ("", "Hello, World!"),
            memory_limit: 128,
            difficulty: "Easy",
            points: 50,
            cases: &[("", "Hello, World!", false)],
        },
        ProblemSeed {
            id: "demo-2",
            contest_id: "contest-demo",
            title: "Sum Two Numbers",
            description: "Given two integers, print their sum.",
            input_format: "Two space-separated integers a b",
            output_format: "Single integer a+b",
            sample: ("2 3", "5"),
            memory_limit: 128,
            difficulty: "Easy",
            points: 100,
            cases: &[("2 3", "5", false), ("10 15", "25", true)],
        },
        ProblemSeed {
            id: "demo-3",
            contest_id: "contest-demo",
            title: "Reverse String",
            description: "Read a string and print it reversed.",
            input_format: "A single string s",
            output_format: "Reversed string",
            sample: ("abcd", "dcba"),
            memory_limit: 128,
            difficulty: "Medium",
            points: 150,
            cases: &[("abcd", "dcba", false), ("racecar", "racecar", true)],
        },
    ];

    seeds.iter().map(ProblemSeed::build).collect()
}

fn demo_submissions(now: DateTime<Utc>) -> Vec<Submission> {
    let seeded = [
        ("alice", "user1", "demo-1", "print(\"Hello, World!\")", "python", SubmissionStatus::Accepted, 50, 3, 10, (1, 1), 30),
        ("alice", "user1", "demo-2", "print(5)", "python", SubmissionStatus::Accepted, 100, 8, 8, (2, 2), 40),
        ("bob", "user2", "demo-1", "console.log(\"Hello, World!\")", "javascript", SubmissionStatus::Accepted, 50, 5, 9, (1, 1), 25),
        ("bob", "user2", "demo-3", "print(\"dcba\")", "python", SubmissionStatus::WrongAnswer, 0, 12, 6, (0, 2), 50),
    ];

    seeded
        .iter()
        .enumerate()
        .map(
            |(idx, (username, user_id, problem_id, code, language, status, score, time_taken, minutes_ago, (passed, total), execution_time))| {
                Submission {
                    id: format!("sub-seed-{}", idx + 1),
                    contest_id: "contest-demo".to_string(),
                    problem_id: problem_id.to_string(),
                    user_id: user_id.to_string(),
                    username: username.to_string(),
                    code: code.to_string(),
                    language: language.to_string(),
                    status: *status,
                    score: *score,
                    time_taken: *time_taken,
                    submitted_at: now - Duration::minutes(*minutes_ago),
                    test_cases_passed: *passed,
                    total_test_cases: *total,
                    execution_time: *execution_time,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::model::ContestStatus;

    #[test]
    fn test_seed_statuses() {
        let now = Utc::now();
        let data = demo_data(now);
        let statuses: Vec<ContestStatus> =
            data.contests.iter().map(|c| c.status_at(now)).collect();
        assert_eq!(
            statuses,
            vec![ContestStatus::Upcoming, ContestStatus::Running, ContestStatus::Running]
        );
    }

    #[test]
    fn test_seed_problem_ids_match_contests() {
        let data = demo_data(Utc::now());
        for contest in &data.contests {
            for pid in &contest.problems {
                let problem = data.problems.iter().find(|p| &p.id == pid);
                assert!(problem.is_some(), "missing problem {}", pid);
                assert_eq!(problem.unwrap().contest_id, contest.id);
            }
        }
        assert_eq!(data.submissions.len(), 4);
    }
}
