use std::io::{Result as IoResult, Write};

use log::trace;

use crate::cc_merge::merge_cc_entries;
use crate::entry_builder::EntryBuilder;
use crate::error::TraceError;
use crate::reg_resolver::RegisterResolver;
use crate::tarmac_context::TarmacContext;
use crate::tarmac_tracer::TarmacTracer;
use crate::trace_entry::{InstEntry, MemEntry, RegEntry, TarmacPrint};

/// Print every entry of a queue and leave it empty.
pub fn flush_queue<E: TarmacPrint>(
    outs: &mut dyn Write,
    verbosity: u8,
    prefix: &str,
    queue: &mut Vec<E>,
) -> IoResult<()> {
    for entry in queue.drain(..) {
        entry.print(outs, verbosity, prefix)?;
    }
    Ok(())
}

/// Flush any number of queues, in argument order.
macro_rules! flush_queues {
    ($outs:expr, $verbosity:expr, $prefix:expr, $($queue:expr),+ $(,)?) => {
        $( flush_queue(&mut *$outs, $verbosity, $prefix, &mut $queue)?; )+
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Created,
    Built,
    Resolved,
    Merged,
    Flushed,
}

/// Trace record for one committed instruction. Holds the tracer for its
/// whole lifetime, so records cannot interleave.
pub struct TarmacRecord<'t, 'a, W: Write, R: RegisterResolver> {
    pub when: u64,
    ctx: TarmacContext<'a>,
    tracer: &'t mut TarmacTracer<W, R>,
    builder: EntryBuilder,
    state: RecordState,
    inst_queue: Vec<InstEntry>,
    mem_queue: Vec<MemEntry>,
    reg_queue: Vec<RegEntry>,
}

impl<'t, 'a, W: Write, R: RegisterResolver> TarmacRecord<'t, 'a, W, R> {
    pub fn new(when: u64, ctx: TarmacContext<'a>, tracer: &'t mut TarmacTracer<W, R>) -> Self {
        let builder = EntryBuilder::new(when, &ctx);
        Self {
            when,
            ctx,
            tracer,
            builder,
            state: RecordState::Created,
            inst_queue: Vec::new(),
            mem_queue: Vec::new(),
            reg_queue: Vec::new(),
        }
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    /// Build, resolve, merge and flush the record. Only valid once.
    pub fn dump(&mut self) -> Result<(), TraceError> {
        self.expect_state(RecordState::Created)?;
        self.build()?;
        self.resolve()?;
        self.merge()?;
        self.flush()
    }

    fn expect_state(&self, expected: RecordState) -> Result<(), TraceError> {
        if self.state != expected {
            return Err(TraceError::InvalidState {
                expected,
                found: self.state,
            });
        }
        Ok(())
    }

    fn build(&mut self) -> Result<(), TraceError> {
        self.expect_state(RecordState::Created)?;
        self.builder
            .add_inst_entry(&mut self.inst_queue, &self.ctx, &mut self.tracer.inst_count)?;
        self.builder.add_mem_entries(&mut self.mem_queue, &self.ctx);
        self.builder.add_reg_entries(&mut self.reg_queue, &self.ctx);
        self.state = RecordState::Built;
        Ok(())
    }

    fn resolve(&mut self) -> Result<(), TraceError> {
        self.expect_state(RecordState::Built)?;
        for reg in self.reg_queue.iter_mut() {
            self.tracer.resolver.resolve(reg, self.ctx.thread)?;
        }
        self.state = RecordState::Resolved;
        Ok(())
    }

    fn merge(&mut self) -> Result<(), TraceError> {
        self.expect_state(RecordState::Resolved)?;
        merge_cc_entries(
            &mut self.reg_queue,
            &self.builder,
            &self.tracer.resolver,
            self.ctx.thread,
        )?;
        self.state = RecordState::Merged;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TraceError> {
        self.expect_state(RecordState::Merged)?;
        trace!(
            "Flushing record @ {}: {} mem, {} reg",
            self.when,
            self.mem_queue.len(),
            self.reg_queue.len()
        );
        let tracer = &mut *self.tracer;
        let outs: &mut dyn Write = &mut tracer.output;
        let prefix = tracer.config.prefix.as_str();
        let verbosity = tracer.config.verbosity;
        flush_queues!(
            outs,
            verbosity,
            prefix,
            self.inst_queue,
            self.mem_queue,
            self.reg_queue
        );
        self.state = RecordState::Flushed;
        Ok(())
    }
}
