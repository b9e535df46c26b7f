//! CSV export of match round traces.

use std::path::Path;

use serde::Serialize;

use crate::{Result, pipeline::match_runner::RoundRecord};

/// One CSV row of a match trace.
#[derive(Debug, Serialize)]
struct TraceRow {
    round: usize,
    engine_move: String,
    opponent_move: String,
    engine_points: u32,
    opponent_points: u32,
    tag: String,
}

/// Writes round records to a CSV file for external analysis.
///
/// # Examples
///
/// ```no_run
/// use dilemma::export::TraceCsvExporter;
/// use dilemma::pipeline::RoundRecord;
///
/// let records: Vec<RoundRecord> = Vec::new();
/// TraceCsvExporter::new().write(&records, "trace.csv")?;
/// # Ok::<(), dilemma::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TraceCsvExporter;

impl TraceCsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write all records to `path`, one row per round.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or a row fails to
    /// serialize.
    pub fn write<P: AsRef<Path>>(&self, records: &[RoundRecord], path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in records {
            writer.serialize(TraceRow {
                round: record.round,
                engine_move: record.engine_move.to_string(),
                opponent_move: record.opponent_move.to_string(),
                engine_points: record.engine_points,
                opponent_points: record.opponent_points,
                tag: record.tag.to_string(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationTag, Move, payoff};

    #[test]
    fn test_writes_one_row_per_round() {
        let records: Vec<RoundRecord> = (1..=5)
            .map(|round| {
                let (engine_points, opponent_points) =
                    payoff::score(Move::Cooperate, Move::Defect);
                RoundRecord {
                    round,
                    engine_move: Move::Cooperate,
                    opponent_move: Move::Defect,
                    engine_points,
                    opponent_points,
                    tag: ClassificationTag::Unknown,
                }
            })
            .collect();

        let file = tempfile::NamedTempFile::new().unwrap();
        TraceCsvExporter::new().write(&records, file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        // Header plus five rows.
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("round,"));
        assert!(lines[1].starts_with("1,C,D,0,5,UNKNOWN"));
    }
}
