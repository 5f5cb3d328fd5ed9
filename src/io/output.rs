use crate::aggregation::{ComplexityBreakdown, DisciplineEffortMetric, PhaseDistribution};
use crate::core::DerivedMetrics;
use crate::engine::AnalysisReport;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

fn hours(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |h| format!("{h:.1}"))
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn rate(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Effort Analysis Report")?;
        writeln!(self.writer)?;
        self.write_phases(&report.phase_distribution)?;
        self.write_disciplines(&report.discipline_effort)?;
        self.write_breakdown(&report.complexity_breakdown)?;
        self.write_tickets(&report.tickets)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_phases(&mut self, dist: &PhaseDistribution) -> anyhow::Result<()> {
        writeln!(self.writer, "## Phase Distribution")?;
        writeln!(self.writer)?;
        if dist.is_empty() {
            writeln!(self.writer, "_No recorded hours._")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "Total: {:.1} hours across {} tickets",
            dist.total_hours, dist.total_tickets
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Phase | Tickets | Hours | Share |")?;
        writeln!(self.writer, "|-------|---------|-------|-------|")?;
        for share in &dist.phases {
            writeln!(
                self.writer,
                "| {} | {} | {:.1} | {} |",
                share.phase,
                share.ticket_count,
                share.hours,
                percent(share.percentage)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_disciplines(&mut self, rows: &[DisciplineEffortMetric]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Discipline Effort")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Discipline | Tickets | Median Lead (h) | Median Cycle (h) | Active (h) | Queue (h) | Efficiency | Oversize | Reopens |"
        )?;
        writeln!(
            self.writer,
            "|------------|---------|-----------------|------------------|------------|-----------|------------|----------|---------|"
        )?;
        for row in rows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.1} | {:.1} | {} | {} | {} |",
                row.discipline,
                row.ticket_count,
                hours(row.median_lead_time_hours),
                hours(row.median_cycle_time_hours),
                row.active_hours,
                row.queue_hours,
                percent(row.efficiency_percent),
                rate(row.oversize_rate),
                row.reopen_count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, breakdown: &ComplexityBreakdown) -> anyhow::Result<()> {
        writeln!(self.writer, "## Complexity Breakdown")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Size | Tickets |")?;
        writeln!(self.writer, "|------|---------|")?;
        for (size, count) in &breakdown.by_size {
            writeln!(self.writer, "| {size} | {count} |")?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "Oversize tickets: {}", breakdown.oversize_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_tickets(&mut self, tickets: &[DerivedMetrics]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Tickets")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Key | Size | Score | Discipline | Phase | Lead (h) | Cycle (h) | Reopens |"
        )?;
        writeln!(
            self.writer,
            "|-----|------|-------|------------|-------|----------|-----------|---------|"
        )?;
        for ticket in tickets {
            writeln!(
                self.writer,
                "| {} | {} | {:.1} | {} | {} | {} | {} | {} |",
                ticket.key,
                ticket.complexity.size,
                ticket.complexity.score,
                ticket.discipline,
                ticket.phase,
                hours(ticket.timing.lead_hours()),
                hours(ticket.timing.cycle_hours()),
                ticket.timing.reopens
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Effort Analysis Report".bold().blue())?;
        writeln!(self.writer, "{}", "======================".blue())?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", "Phase distribution".bold())?;
        writeln!(self.writer, "{}", phase_table(&report.phase_distribution))?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", "Discipline effort".bold())?;
        writeln!(self.writer, "{}", discipline_table(&report.discipline_effort))?;
        writeln!(self.writer)?;

        let breakdown = &report.complexity_breakdown;
        let sizes: Vec<String> = breakdown
            .by_size
            .iter()
            .map(|(size, count)| format!("{size}: {count}"))
            .collect();
        writeln!(self.writer, "{}", "Complexity".bold())?;
        writeln!(self.writer, "  {}", sizes.join("  "))?;
        let oversize = breakdown.oversize_count.to_string();
        let oversize = if breakdown.oversize_count > 0 {
            oversize.yellow()
        } else {
            oversize.green()
        };
        writeln!(self.writer, "  Oversize: {oversize}")?;
        Ok(())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

fn phase_table(dist: &PhaseDistribution) -> Table {
    let mut table = new_table(&["Phase", "Tickets", "Hours", "Share"]);
    for share in &dist.phases {
        table.add_row(vec![
            Cell::new(share.phase),
            right(share.ticket_count),
            right(format!("{:.1}", share.hours)),
            right(percent(share.percentage)),
        ]);
    }
    table
}

fn discipline_table(rows: &[DisciplineEffortMetric]) -> Table {
    let mut table = new_table(&[
        "Discipline",
        "Tickets",
        "Median lead (h)",
        "Median cycle (h)",
        "Active (h)",
        "Queue (h)",
        "Efficiency",
        "Oversize",
        "Reopens",
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.discipline),
            right(row.ticket_count),
            right(hours(row.median_lead_time_hours)),
            right(hours(row.median_cycle_time_hours)),
            right(format!("{:.1}", row.active_hours)),
            right(format!("{:.1}", row.queue_hours)),
            right(percent(row.efficiency_percent)),
            right(rate(row.oversize_rate)),
            right(row.reopen_count),
        ]);
    }
    table
}

pub fn create_writer(format: OutputFormat, sink: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::PhaseShare;
    use crate::core::Phase;

    fn report() -> AnalysisReport {
        AnalysisReport {
            tickets: Vec::new(),
            phase_distribution: PhaseDistribution {
                phases: vec![PhaseShare {
                    phase: Phase::Development,
                    ticket_count: 2,
                    hours: 96.0,
                    percentage: 100.0,
                }],
                total_hours: 96.0,
                total_tickets: 2,
            },
            discipline_effort: vec![DisciplineEffortMetric {
                discipline: "backend".into(),
                ticket_count: 2,
                median_lead_time_hours: Some(48.0),
                median_cycle_time_hours: None,
                active_hours: 62.0,
                queue_hours: 34.0,
                efficiency_percent: 64.58,
                oversize_rate: 0.0,
                reopen_count: 1,
                median_review_hours: None,
                ai_assist_rate: 0.0,
            }],
            complexity_breakdown: ComplexityBreakdown::default(),
        }
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["phaseDistribution"]["totalHours"], 96.0);
        assert_eq!(value["disciplineEffort"][0]["efficiencyPercent"], 64.58);
        assert!(value["disciplineEffort"][0]["medianCycleTimeHours"].is_null());
    }

    #[test]
    fn markdown_renders_tables() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).write_report(&report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| development | 2 | 96.0 | 100.0% |"));
        assert!(text.contains("| backend | 2 | 48.0 | - | 62.0 | 34.0 | 64.6% | 0% | 1 |"));
    }

    #[test]
    fn terminal_lists_disciplines() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf).write_report(&report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Effort Analysis Report"));
        assert!(text.contains("backend"));
        assert!(text.contains("Oversize: 0"));
    }
}
