mod operation;
pub use operation::Operation;

mod output;
pub use output::ProcessOutput;

mod outcome;
pub use outcome::RunOutcome;
