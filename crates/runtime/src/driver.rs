//! Newline-delimited driver: one webhook envelope per input line, one track
//! batch per output line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use ot_mapper::process_events;

use crate::metrics::MetricsRegistry;

/// What to do with a line that is not JSON or that the mapper rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidPolicy {
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    pub on_invalid: InvalidPolicy,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: u64,
    pub mapped: u64,
    pub rejected: u64,
}

pub fn run_lines<R, W>(
    reader: R,
    mut writer: W,
    cfg: &DriverConfig,
    metrics: &MetricsRegistry,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading input line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        summary.lines += 1;
        metrics.inc_received(1);

        let mapped = serde_json::from_str::<Value>(line)
            .map_err(anyhow::Error::from)
            .and_then(|input| process_events(&input).map_err(anyhow::Error::from));

        let batch = match mapped {
            Ok(batch) => batch,
            Err(err) => {
                summary.rejected += 1;
                metrics.inc_rejected(1);
                match cfg.on_invalid {
                    InvalidPolicy::Skip => {
                        warn!(line = line_no, error = %err, "skipping invalid webhook");
                        continue;
                    }
                    InvalidPolicy::Abort => {
                        return Err(err.context(format!("invalid webhook on line {line_no}")));
                    }
                }
            }
        };

        for event in &batch.events {
            metrics.record_mapped(event.event, event.properties.products.len() as u64);
            debug!(line = line_no, event = %event.event, user_id = %event.user_id, "track event");
        }
        summary.mapped += 1;

        let out = batch.to_json(cfg.pretty)?;
        writeln!(writer, "{out}").context("writing track batch")?;
    }

    writer.flush().context("flushing output")?;
    info!(
        lines = summary.lines,
        mapped = summary.mapped,
        rejected = summary.rejected,
        "input drained"
    );
    Ok(summary)
}
