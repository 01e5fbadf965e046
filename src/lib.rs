pub mod grouping;
pub mod lexicon;
pub mod session;
pub mod utils;

pub use grouping::assemble::{DuplicateRow, GroupedRow, GroupingReport};
pub use grouping::category::Category;
pub use grouping::{classify_name, group, group_with_progress};
pub use lexicon::Lexicon;
pub use session::source::{JsonTeamSource, TeamSource};
pub use session::{GroupingSession, SessionEvent, SessionReport, SessionStatus};
