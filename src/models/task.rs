use crate::errors::{AppError, AppResult};
use std::fmt;

/// Verdict given when comparing two responses of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    FirstMuchBetter,
    FirstSlightlyBetter,
    Equal,
    SecondSlightlyBetter,
    SecondMuchBetter,
    Rejected,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::FirstMuchBetter,
        Rank::FirstSlightlyBetter,
        Rank::Equal,
        Rank::SecondSlightlyBetter,
        Rank::SecondMuchBetter,
        Rank::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::FirstMuchBetter => "(1) is much better than (2)",
            Rank::FirstSlightlyBetter => "(1) is slightly better than (2)",
            Rank::Equal => "The responses are of equal quality",
            Rank::SecondSlightlyBetter => "(2) is slightly better than (1)",
            Rank::SecondMuchBetter => "(2) is much better than (1)",
            Rank::Rejected => "Task rejected for containing sensitive content",
        }
    }

    /// 1-based choice as shown in the interactive menu.
    pub fn from_choice(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sub-task logged during an autologger session.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub platform_id: String,
    pub permalink: String,
    pub response1_id: String,
    pub response2_id: String,
    pub rank: Rank,
    pub justification: String,
}

impl Task {
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("platform id", &self.platform_id),
            ("permalink", &self.permalink),
            ("response #1 id", &self.response1_id),
            ("response #2 id", &self.response2_id),
            ("justification", &self.justification),
        ];

        match fields.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(AppError::Validation(format!(
                "please fill in all task fields ({name} is empty)"
            ))),
            None => Ok(()),
        }
    }
}
