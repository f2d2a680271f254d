pub mod essay;
pub mod feedback;

pub use essay::EssayText;
pub use feedback::{FeedbackSummary, GrammarIssue, GrammarReport};
