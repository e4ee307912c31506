/// Exit status and captured streams of one finished runner process.
///
/// A nonzero `exit_code` is an ordinary outcome, not an error. Processes
/// terminated by a signal report the negated signal number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// `true` when the runner exited with code 0.
    #[inline]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
