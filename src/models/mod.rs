pub mod review;

pub use review::{CandidateSource, Prediction, ReviewCandidate, ReviewResult};
