use tracing::{debug, info, warn};

use playgate_model::ProcessOutput;

/// Logging of a finished runner's captured output.
#[derive(Debug, Clone, Copy)]
pub struct StreamLogConfig {
    /// Max line length before truncation.
    pub max_line_length: usize,
    /// Log stdout at INFO level (false = DEBUG).
    pub stdout_info: bool,
    /// Log stderr at WARN level (false = DEBUG).
    pub stderr_warn: bool,
}

impl Default for StreamLogConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            stdout_info: false,
            stderr_warn: true,
        }
    }
}

impl StreamLogConfig {
    /// Emit every captured line of `output` under the run's id.
    pub fn log(&self, run_id: &str, output: &ProcessOutput) {
        for line in output.stdout.lines() {
            let line = truncate(line, self.max_line_length);
            if self.stdout_info {
                info!(run_id, stream = "stdout", "{line}");
            } else {
                debug!(run_id, stream = "stdout", "{line}");
            }
        }
        for line in output.stderr.lines() {
            let line = truncate(line, self.max_line_length);
            if self.stderr_warn {
                warn!(run_id, stream = "stderr", "{line}");
            } else {
                debug!(run_id, stream = "stderr", "{line}");
            }
        }
    }
}

/// Cut `line` to at most `max` bytes on a char boundary.
fn truncate(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
