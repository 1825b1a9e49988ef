use std::io::Write;

use log::debug;

use crate::config::TracerConfig;
use crate::entry_builder::InstCounter;
use crate::error::TraceError;
use crate::reg_resolver::{RegisterResolver, TarmacResolver};
use crate::tarmac_context::TarmacContext;
use crate::tarmac_record::TarmacRecord;

/// Tracing session: owns the output sink and the instruction counter that
/// every record of the run shares.
pub struct TarmacTracer<W: Write, R: RegisterResolver = TarmacResolver> {
    pub(crate) output: W,
    pub(crate) inst_count: InstCounter,
    pub(crate) resolver: R,
    pub(crate) config: TracerConfig,
}

impl<W: Write> TarmacTracer<W, TarmacResolver> {
    pub fn new(output: W, config: TracerConfig) -> Self {
        Self::with_resolver(output, config, TarmacResolver)
    }
}

impl<W: Write, R: RegisterResolver> TarmacTracer<W, R> {
    pub fn with_resolver(output: W, config: TracerConfig, resolver: R) -> Self {
        debug!(
            "Starting tarmac tracer (verbosity {}, prefix {:?})",
            config.verbosity, config.prefix
        );
        Self {
            output,
            inst_count: InstCounter::new(),
            resolver,
            config,
        }
    }

    /// Create the record of an instruction committed at tick `when`.
    pub fn record<'t, 'a>(
        &'t mut self,
        when: u64,
        ctx: TarmacContext<'a>,
    ) -> TarmacRecord<'t, 'a, W, R> {
        TarmacRecord::new(when, ctx, self)
    }

    pub fn dump(&mut self, when: u64, ctx: TarmacContext) -> Result<(), TraceError> {
        self.record(when, ctx).dump()
    }

    pub fn inst_count(&self) -> u64 {
        self.inst_count.current()
    }

    pub fn flush(&mut self) -> Result<(), TraceError> {
        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
