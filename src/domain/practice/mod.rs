//! Practice module - learner progress tracking.

mod stats;

pub use stats::{
    validate_practice_secs, PracticeMode, UserStats, MAX_PRACTICE_SECS_PER_RECORD,
};
