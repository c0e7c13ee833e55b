//! Script replay engine.
//!
//! Reads accumulator commands from CSV, applies them in order to a single
//! accumulator, and records one result per command for output.

use crate::accumulator::Accumulator;
use crate::command::{CommandRecord, Outcome};
use crate::error::{CalcError, Result};
use crate::number::Number;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read, Write};

/// Result of one script line.
#[derive(Debug)]
pub struct StepResult {
    /// 1-indexed script line, counting comments and blank lines.
    pub row: usize,

    /// Operation name as written in the script (trimmed, lowercased).
    pub op: String,

    /// What the command produced, or why it failed.
    pub result: std::result::Result<Outcome, CalcError>,
}

/// One row of replay output.
///
/// `value` is filled only for reductions, so the scalar can be read back
/// as a [`Number`] without parsing `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub row: usize,
    pub op: String,
    pub value: Option<Number>,
    pub result: String,
}

impl From<&StepResult> for OutputRow {
    fn from(step: &StepResult) -> Self {
        let (value, result) = match &step.result {
            Ok(Outcome::Scalar(n)) => (Some(*n), n.to_string()),
            Ok(outcome) => (None, outcome.to_string()),
            Err(e) => (None, format!("error: {}", e)),
        };

        OutputRow {
            row: step.row,
            op: step.op.clone(),
            value,
            result,
        }
    }
}

/// Replays command scripts against one accumulator.
///
/// Commands run in script order. A failing command is recorded and logged,
/// leaves the accumulator as it was, and does not stop the replay.
pub struct ScriptEngine {
    accumulator: Accumulator,

    steps: Vec<StepResult>,
}

impl ScriptEngine {
    /// Creates an engine around an unset accumulator.
    pub fn new() -> Self {
        ScriptEngine {
            accumulator: Accumulator::new(),
            steps: Vec::new(),
        }
    }

    /// Processes commands line by line in streaming fashion.
    ///
    /// The script has no header row. Lines starting with `#` are comments
    /// and blank lines are skipped; both still count towards `row`.
    pub fn process_script<R: Read>(&mut self, reader: R) -> Result<()> {
        for (line_idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let row = line_idx + 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_line(&line) {
                Ok(Some(raw)) => {
                    if let Some(record) = CommandRecord::from_csv(&raw) {
                        self.process_record(&record, row);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row, e);
                    self.steps.push(StepResult {
                        row,
                        op: String::new(),
                        result: Err(e.into()),
                    });
                }
            }
        }

        Ok(())
    }

    fn process_record(&mut self, record: &CommandRecord, row: usize) {
        let result = record
            .parse(row)
            .and_then(|cmd| cmd.apply(&mut self.accumulator));

        match &result {
            Ok(outcome) => debug!("Row {}: {} -> {}", row, record.op, outcome),
            Err(e) => warn!("Row {}: {}", row, e),
        }

        self.steps.push(StepResult {
            row,
            op: record.op.to_lowercase(),
            result,
        });
    }

    /// The accumulator the script has been applied to.
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Results recorded so far, in script order.
    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// Writes one CSV row per processed command.
    ///
    /// Columns are `row,op,value,result`. `value` holds reduction results;
    /// failed commands render as `error: <message>` in `result`.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for step in &self.steps {
            csv_writer.serialize(OutputRow::from(step))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Splits one script line into trimmed CSV fields.
fn parse_line(line: &str) -> std::result::Result<Option<StringRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(Some(record))
    } else {
        Ok(None)
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}
