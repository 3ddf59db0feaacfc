//! Table compiler: parse `name:percentage` lines into a [`PrizeTable`]
//!
//! ## Usage
//!
//! ```rust
//! use pr_table::compile;
//!
//! let compiled = compile("A:50\nB:50").unwrap();
//! assert_eq!(compiled.table.entries()[0].cumulative_threshold, 5000);
//! assert_eq!(compiled.summary(), "probability total OK (100.00%), 2 prizes");
//! ```

use serde::{Deserialize, Serialize};

use pr_core::{BASIS_POINT_SCALE, Percentage};

use crate::entry::PrizeEntry;
use crate::error::{TableError, TableResult};
use crate::table::PrizeTable;

/// Prize table used when nothing else is configured
pub const DEFAULT_PRIZE_TEXT: &str = "哪吒卡片:15
橡皮:15
粘贴:15
笔:30
大笔记:10
资料夹:7
卡通本:5
挂件:2
胸针:1";

/// Compilation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableLimits {
    pub max_prizes: usize,
    pub max_name_chars: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            max_prizes: 100,
            max_name_chars: 64,
        }
    }
}

/// A validated table plus the total it was validated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledTable {
    pub table: PrizeTable,
    /// Sum of the percentages as entered
    pub total: Percentage,
}

impl CompiledTable {
    /// Confirmation text (`"probability total OK (100.00%), 9 prizes"`)
    pub fn summary(&self) -> String {
        let count = self.table.len();
        let noun = if count == 1 { "prize" } else { "prizes" };
        format!("probability total OK ({}%), {} {}", self.total, count, noun)
    }

    pub fn into_table(self) -> PrizeTable {
        self.table
    }
}

/// Probability table compiler
#[derive(Debug, Clone, Default)]
pub struct TableCompiler {
    pub limits: TableLimits,
}

impl TableCompiler {
    /// Create a compiler with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with custom limits
    pub fn with_limits(limits: TableLimits) -> Self {
        Self { limits }
    }

    /// Compile raw text into a table.
    ///
    /// All-or-nothing: the first problem found is returned and no table is built.
    pub fn compile(&self, raw: &str) -> TableResult<CompiledTable> {
        let mut parsed = Vec::new();

        for (i, raw_line) in raw.split('\n').enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            parsed.push(self.parse_line(line, i + 1)?);
        }

        if parsed.is_empty() {
            return Err(TableError::EmptyPrizeSet);
        }

        if parsed.len() > self.limits.max_prizes {
            return Err(TableError::TooManyPrizes {
                count: parsed.len(),
                max: self.limits.max_prizes,
            });
        }

        let total: Percentage = parsed.iter().map(|(_, p)| *p).sum();
        if !total.is_within(Percentage::HUNDRED, Percentage::SUM_TOLERANCE) {
            return Err(TableError::ProbabilitySumMismatch { total });
        }

        let table = build_table(parsed);
        log::debug!("compiled {} prizes, total {}%", table.len(), total);

        Ok(CompiledTable { table, total })
    }

    fn parse_line(&self, line: &str, line_number: usize) -> TableResult<(String, Percentage)> {
        let malformed = || TableError::MalformedLine {
            line_number,
            line: line.to_string(),
        };

        if line.matches(':').count() != 1 {
            return Err(malformed());
        }
        let (name, percent) = line.split_once(':').ok_or_else(malformed)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(malformed());
        }

        let length = name.chars().count();
        if length > self.limits.max_name_chars {
            return Err(TableError::NameTooLong {
                line_number,
                length,
                max: self.limits.max_name_chars,
            });
        }

        let percent = Percentage::parse(percent)
            .ok()
            .filter(|p| p.is_positive())
            .ok_or_else(|| TableError::MalformedProbability {
                line_number,
                line: line.to_string(),
            })?;

        Ok((name.to_string(), percent))
    }
}

/// Compile with default limits
pub fn compile(raw: &str) -> TableResult<CompiledTable> {
    TableCompiler::new().compile(raw)
}

/// Assign running thresholds. Rounding inside the 0.01% tolerance can leave the
/// basis-point sum a little off 10000; thresholds are capped and the last one
/// pinned so the whole interval stays covered.
fn build_table(parsed: Vec<(String, Percentage)>) -> PrizeTable {
    let scale = BASIS_POINT_SCALE as u64;
    let rounded_total: u64 = parsed.iter().map(|(_, p)| p.to_basis_points()).sum();
    if rounded_total != scale {
        log::warn!(
            "rounded shares total {} basis points, final threshold pinned to {}",
            rounded_total,
            scale
        );
    }

    let last = parsed.len() - 1;
    let mut cumulative: u64 = 0;
    let mut previous: u32 = 0;
    let mut entries = Vec::with_capacity(parsed.len());

    for (i, (name, percent)) in parsed.into_iter().enumerate() {
        cumulative += percent.to_basis_points();
        let threshold = if i == last {
            BASIS_POINT_SCALE
        } else {
            cumulative.min(scale) as u32
        };

        let basis_points = threshold - previous;
        if basis_points == 0 {
            log::warn!("prize {:?} ({}%) rounds to 0 basis points and can never be drawn", name, percent);
        }

        entries.push(PrizeEntry {
            name,
            cumulative_threshold: threshold,
            basis_points,
            percent,
        });
        previous = threshold;
    }

    PrizeTable::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(raw: &str) -> Vec<u32> {
        compile(raw)
            .unwrap()
            .table
            .entries()
            .iter()
            .map(|e| e.cumulative_threshold)
            .collect()
    }

    #[test]
    fn test_two_halves() {
        assert_eq!(thresholds("A:50\nB:50"), vec![5000, 10000]);
    }

    #[test]
    fn test_default_table() {
        let compiled = compile(DEFAULT_PRIZE_TEXT).unwrap();
        assert_eq!(compiled.table.len(), 9);
        assert_eq!(
            thresholds(DEFAULT_PRIZE_TEXT),
            vec![1500, 3000, 4500, 7500, 8500, 9200, 9700, 9900, 10000]
        );
        assert_eq!(compiled.summary(), "probability total OK (100.00%), 9 prizes");
    }

    #[test]
    fn test_blank_lines_and_whitespace_ignored() {
        let raw = "\n  A : 25 \r\n\n\tB:75\n   \n";
        let compiled = compile(raw).unwrap();
        let names: Vec<_> = compiled.table.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(thresholds(raw), vec![2500, 10000]);
    }

    #[test]
    fn test_separator_count() {
        assert!(matches!(
            compile("A50\nB:50"),
            Err(TableError::MalformedLine { line_number: 1, .. })
        ));
        assert!(matches!(
            compile("A:5:0\nB:50"),
            Err(TableError::MalformedLine { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_empty_name() {
        assert!(matches!(
            compile("A:50\n  :50"),
            Err(TableError::MalformedLine { line_number: 2, .. })
        ));
    }

    #[test]
    fn test_bad_probability() {
        for raw in ["A:abc\nB:50", "A:0\nB:100", "A:-5\nB:105", "A:\nB:100"] {
            assert!(
                matches!(compile(raw), Err(TableError::MalformedProbability { line_number: 1, .. })),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_line_errors_win_over_sum() {
        assert!(matches!(
            compile("A:10\nB:x"),
            Err(TableError::MalformedProbability { line_number: 2, .. })
        ));
    }

    #[test]
    fn test_sum_mismatch() {
        let err = compile("A:50\nB:49").unwrap_err();
        assert_eq!(
            err,
            TableError::ProbabilitySumMismatch {
                total: Percentage::from_whole(99)
            }
        );
        assert!(err.to_string().contains("99.00%"));
    }

    #[test]
    fn test_sum_tolerance() {
        assert!(compile("A:50\nB:49.99").is_ok());
        assert!(compile("A:50\nB:50.01").is_ok());
        assert!(compile("A:50\nB:49.98").is_err());
        assert!(compile("A:50\nB:50.02").is_err());
    }

    #[test]
    fn test_sum_checked_on_full_numerals() {
        assert!(matches!(
            compile("A:50\nB:50.0100009"),
            Err(TableError::ProbabilitySumMismatch { .. })
        ));
        assert!(matches!(
            compile("A:50.0000009\nB:50.0099999"),
            Err(TableError::ProbabilitySumMismatch { .. })
        ));
    }

    #[test]
    fn test_tiny_positive_share_is_accepted() {
        let compiled = compile("A:99.9999999\nB:0.0000001").unwrap();
        let entries = compiled.table.entries();
        assert_eq!(entries[1].name, "B");
        assert_eq!(entries[1].basis_points, 0);
        assert_eq!(entries[1].cumulative_threshold, 10000);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(compile(""), Err(TableError::EmptyPrizeSet));
        assert_eq!(compile("  \n\n \t"), Err(TableError::EmptyPrizeSet));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let compiled = compile("A:15.005\nB:84.995").unwrap();
        let entries = compiled.table.entries();
        assert_eq!(entries[0].basis_points, 1501);
        assert_eq!(entries[0].cumulative_threshold, 1501);
        assert_eq!(entries[1].cumulative_threshold, 10000);
    }

    #[test]
    fn test_over_coverage_is_capped() {
        // 5001 + 5001 rounds past the interval; both stay inside it
        assert_eq!(thresholds("A:50.005\nB:50.005"), vec![5001, 10000]);
        assert_eq!(thresholds("A:99.995\nB:0.005"), vec![10000, 10000]);
    }

    #[test]
    fn test_under_coverage_goes_to_last() {
        // 4999 + 5000 leaves one value uncovered; the last prize absorbs it
        let compiled = compile("A:49.994\nB:49.996").unwrap();
        let entries = compiled.table.entries();
        assert_eq!(entries[0].cumulative_threshold, 4999);
        assert_eq!(entries[1].cumulative_threshold, 10000);
        assert_eq!(entries[1].basis_points, 5001);
    }

    #[test]
    fn test_percent_sign_accepted() {
        assert_eq!(thresholds("A:30%\nB:70 %"), vec![3000, 10000]);
    }

    #[test]
    fn test_limits() {
        let compiler = TableCompiler::with_limits(TableLimits {
            max_prizes: 2,
            max_name_chars: 4,
        });

        assert!(matches!(
            compiler.compile("A:30\nB:30\nC:40"),
            Err(TableError::TooManyPrizes { count: 3, max: 2 })
        ));
        assert!(matches!(
            compiler.compile("LONGER:50\nB:50"),
            Err(TableError::NameTooLong { length: 6, .. })
        ));
        // Limits count characters, not bytes
        assert!(compiler.compile("哪吒卡片:50\nB:50").is_ok());
    }

    #[test]
    fn test_single_prize_summary() {
        let compiled = compile("everything:100").unwrap();
        assert_eq!(compiled.summary(), "probability total OK (100.00%), 1 prize");
    }
}
