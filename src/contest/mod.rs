pub mod judge;
pub mod leaderboard;
pub mod model;
pub mod seed;
mod store;

pub use model::{
    Contest, ContestStatus, ContestView, LeaderboardEntry, Problem, Submission, SubmissionStatus,
    TestCase,
};
pub use store::{Author, ContestStore, NewContest, NewProblem, NewSubmission};
