use std::fmt::Write as _;
use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::error::Result;
use crate::system::collector::REFRESH_INTERVAL;
use crate::system::snapshot::RankedReport;

const RULE: &str = "-------------------------------------------------";

/// Formats a report as the fixed-width text block shown each cycle.
pub fn render_report(report: &RankedReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Simple SysMon (reads /proc) - refresh every {} s",
        REFRESH_INTERVAL.as_secs()
    );
    let _ = writeln!(
        out,
        "CPU Usage: {:.2}%   (Total jiffies delta: {})",
        report.cpu_usage_percent, report.total_delta
    );
    let _ = writeln!(
        out,
        "Memory: {} kB total, {} kB used ({:.2}%)",
        report.memory.total_kb,
        report.memory_used_kb(),
        report.memory_usage_percent()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  PID     CPU%    MEM(kB)   COMMAND");
    let _ = writeln!(out, "{RULE}");

    for row in &report.processes {
        let _ = writeln!(
            out,
            "{:>6}  {:>6.2}   {:>8}   {}",
            row.process.pid, row.cpu_percent, row.process.resident_kb, row.process.display_name
        );
    }
    if report.processes.is_empty() {
        let _ = writeln!(out, "No processes found.");
    }
    out
}

/// Where finished reports go.
pub trait ReportSink {
    fn emit(&mut self, report: &RankedReport) -> Result<()>;
}

/// Writes reports to a terminal, clearing the screen first.
pub struct TerminalSink<W: Write> {
    out: W,
    clear_screen: bool,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(std::io::stdout(), clear_screen)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TerminalSink<W> {
    fn emit(&mut self, report: &RankedReport) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.write_all(render_report(report).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
