//! Console reporting for sweeps.

use std::io::{self, Write};

use mastermind_kernel::{Code, Configuration};

use crate::experiment::SweepObserver;
use crate::results::{AggregateStat, ResultTable, format_seconds};

const RULE: &str = "----------------------------------------------";

/// Prints a banner per configuration and, in summary mode, one line per
/// strategy as soon as its trials finish.
pub struct ConsoleReporter<W: Write> {
    out: W,
    summary_stats: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(summary_stats: bool) -> Self {
        Self::new(io::stdout(), summary_stats)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, summary_stats: bool) -> Self {
        Self { out, summary_stats }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SweepObserver for ConsoleReporter<W> {
    fn configuration_started(&mut self, configuration: &Configuration, _secret: &Code) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{RULE}\nalphabet size: {}, code length: {}\n{RULE}",
            configuration.alphabet_size(),
            configuration.code_length()
        )
    }

    fn strategy_finished(&mut self, strategy: &str, stat: &AggregateStat) -> io::Result<()> {
        if self.summary_stats {
            writeln!(self.out, "{}", summary_line(strategy, stat))?;
        }
        Ok(())
    }
}

/// `name  guesses: mean ± std  runtime: mean ± std`
pub fn summary_line(strategy: &str, stat: &AggregateStat) -> String {
    format!(
        "{:<18} guesses: {:.2} ± {:.3}  runtime: {} ± {}",
        strategy,
        stat.mean_guesses,
        stat.std_guesses,
        format_seconds(stat.mean_runtime),
        format_seconds(stat.std_runtime)
    )
}

/// Dump the whole table after the sweep.
pub fn write_result_table(out: &mut impl Write, table: &ResultTable) -> io::Result<()> {
    writeln!(out, "\n{RULE}\nresults\n{RULE}")?;
    write!(out, "{table}")
}
