//! Line metrics for optimized/unoptimized IR comparison

use serde::Serialize;

/// Number of lines in `text`
///
/// Lines are terminated by `\n` or `\r\n`; a final line without a
/// terminator still counts, and empty text has zero lines. This is not
/// universal-newline counting: a lone `\r`, form feed, vertical tab,
/// `\u{85}`, U+2028 or U+2029 does not end a line.
///
/// # Examples
///
/// ```
/// use ir_compare::pipeline::count_lines;
///
/// assert_eq!(count_lines(""), 0);
/// assert_eq!(count_lines("a\nb\n"), 2);
/// assert_eq!(count_lines("a\nb"), 2);
/// ```
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// Line counts for one module's pair of captured outputs
///
/// Tracks IR shrinkage caused by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineMetrics {
    /// Lines emitted with optimizations disabled
    pub unoptimized_lines: usize,
    /// Lines emitted with optimizations enabled
    pub optimized_lines: usize,
}

impl LineMetrics {
    /// Count the lines of both captured texts
    pub fn compare(unoptimized: &str, optimized: &str) -> Self {
        Self {
            unoptimized_lines: count_lines(unoptimized),
            optimized_lines: count_lines(optimized),
        }
    }

    /// Lines removed by the optimizer (negative when the IR grew)
    pub fn line_delta(&self) -> i64 {
        self.unoptimized_lines as i64 - self.optimized_lines as i64
    }

    /// Reduction as a percentage of the unoptimized line count
    ///
    /// Zero when the unoptimized output is empty.
    pub fn reduction_percent(&self) -> f64 {
        if self.unoptimized_lines == 0 {
            return 0.0;
        }
        (self.line_delta() as f64 / self.unoptimized_lines as f64) * 100.0
    }
}
