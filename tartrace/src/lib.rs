pub mod cc_merge;
pub mod config;
pub mod entry_builder;
pub mod error;
pub mod reg_resolver;
pub mod regs;
pub mod snapshot;
pub mod tarmac_context;
pub mod tarmac_record;
pub mod tarmac_tracer;
pub mod trace_entry;

use std::fs::{read_to_string, File};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use indicatif::ProgressBar;
use log::{debug, info};

pub use config::TracerConfig;
pub use error::TraceError;
pub use snapshot::CommitSnapshot;
pub use tarmac_tracer::TarmacTracer;

/// Replay a JSON-lines file of committed instructions through the tracer.
/// Returns the number of records written.
pub fn trace(
    input: PathBuf,
    output: Option<PathBuf>,
    config: TracerConfig,
) -> Result<u64, TraceError> {
    let data = read_to_string(&input)?;
    let lines: Vec<&str> = data.lines().filter(|l| !l.trim().is_empty()).collect();
    info!("Replaying {} instructions from {:?}", lines.len(), input);

    let sink: Box<dyn Write> = match output {
        Some(ref path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(stdout())),
    };
    let mut tracer = TarmacTracer::new(sink, config);

    let bar = ProgressBar::new(lines.len() as u64);
    for line in lines {
        let snapshot = CommitSnapshot::from_json(line)?;
        tracer.dump(snapshot.tick, snapshot.context())?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    tracer.flush()?;
    debug!("Wrote {} records", tracer.inst_count());
    if let Some(path) = output {
        info!("Trace written to {:?}", path);
    }
    Ok(tracer.inst_count())
}
