//! Mock judge: a test case counts as passed when its expected output appears
//! in the submitted source (case-insensitive). Nothing is executed.

use super::model::{Problem, SubmissionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub status: SubmissionStatus,
    pub score: u32,
    pub passed: u32,
    pub total: u32,
}

pub fn judge(problem: &Problem, code: &str) -> Verdict {
    let code = code.to_lowercase();
    let total = problem.test_cases.len() as u32;
    let passed = problem
        .test_cases
        .iter()
        .filter(|tc| code.contains(&tc.output.to_lowercase()))
        .count() as u32;

    let (status, score) = if passed == total {
        (SubmissionStatus::Accepted, problem.points)
    } else {
        (SubmissionStatus::WrongAnswer, partial_score(problem.points, passed, total))
    };

    Verdict {
        status,
        score,
        passed,
        total,
    }
}

/// floor(points / 2 * passed / total), computed without floats
fn partial_score(points: u32, passed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (u64::from(points) * u64::from(passed) / (2 * u64::from(total))) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::model::TestCase;

    fn problem(points: u32, outputs: &[&str]) -> Problem {
        Problem {
            id: "prob".to_string(),
            contest_id: "contest".to_string(),
            title: "Problem".to_string(),
            description: String::new(),
            input_format: String::new(),
            output_format: String::new(),
            sample_input: String::new(),
            sample_output: String::new(),
            time_limit: 1000,
            memory_limit: 256,
            difficulty: "Easy".to_string(),
            points,
            test_cases: outputs
                .iter()
                .map(|o| TestCase {
                    input: String::new(),
                    output: o.to_string(),
                    is_hidden: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_all_outputs_present_is_accepted() {
        let p = problem(150, &["dcba", "racecar"]);
        let verdict = judge(&p, "print('DCBA'); print('RaceCar')");
        assert_eq!(verdict.status, SubmissionStatus::Accepted);
        assert_eq!(verdict.score, 150);
        assert_eq!(verdict.passed, 2);
        assert_eq!(verdict.total, 2);
    }

    #[test]
    fn test_partial_credit_is_floored_half() {
        let p = problem(100, &["5", "25", "xyz"]);
        let verdict = judge(&p, "print(25)");
        // "5" and "25" both appear
        assert_eq!(verdict.passed, 2);
        assert_eq!(verdict.status, SubmissionStatus::WrongAnswer);
        // floor(50 * 2 / 3) = 33
        assert_eq!(verdict.score, 33);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let p = problem(100, &["true", "false"]);
        let verdict = judge(&p, "return 0");
        assert_eq!(verdict.status, SubmissionStatus::WrongAnswer);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.passed, 0);
    }

    #[test]
    fn test_problem_without_cases_is_accepted() {
        let p = problem(50, &[]);
        let verdict = judge(&p, "anything");
        assert_eq!(verdict.status, SubmissionStatus::Accepted);
        assert_eq!(verdict.score, 50);
    }

    #[test]
    fn test_partial_score_matches_float_formula() {
        for points in [50u32, 100, 150, 333] {
            for total in 1u32..6 {
                for passed in 1..total {
                    let expected =
                        ((passed as f64 / total as f64) * points as f64 * 0.5).floor() as u32;
                    assert_eq!(partial_score(points, passed, total), expected);
                }
            }
        }
    }
}
