//! Text, JSON and CSV renderings of an [`EffortReport`].

use crate::domain::model::{EffortRecord, EffortReport, MonthlySummary, Priority, Tier};
use crate::utils::error::{EffortError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(report: &EffortReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report),
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    month: &'a str,
    country: &'a str,
    sorties: u64,
    fuel_liters: f64,
    total_fleet: u32,
    combat_fleet: u32,
    ops_share_pct: f64,
    effort_score: f64,
    tier: Tier,
    priority: Priority,
}

/// One row per classified nation per month, in report order.
pub fn render_csv(report: &EffortReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for month in &report.months {
        for record in &month.records {
            writer.serialize(CsvRow {
                month: &month.month,
                country: &record.country_code,
                sorties: record.sortie_count,
                fuel_liters: record.fuel_liters,
                total_fleet: record.total_fleet,
                combat_fleet: record.combat_fleet,
                ops_share_pct: round2(record.ops_share_pct),
                effort_score: round2(record.effort_score),
                tier: record.tier,
                priority: record.priority,
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EffortError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EffortError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `13209` -> `13,209`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn render_text(report: &EffortReport) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, report).map_err(|e| EffortError::ProcessingError {
        message: format!("text rendering failed: {}", e),
    })?;
    Ok(out)
}

fn write_text(out: &mut String, report: &EffortReport) -> fmt::Result {
    let rule = "=".repeat(96);

    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", report.name.to_uppercase())?;
    writeln!(
        out,
        "Generated {} | fleet data: {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        if report.live_fleet_data { "live" } else { "built-in" }
    )?;
    writeln!(out, "{}", rule)?;

    for (month, summary) in report.months.iter().zip(&report.summaries) {
        writeln!(out)?;
        writeln!(out, "{}", month.month)?;
        writeln!(out, "{}", "-".repeat(96))?;
        write_effort_table(out, &month.records)?;
        write_summary(out, summary)?;
    }

    let trends = report.sorted_trends();
    if !trends.is_empty() {
        writeln!(out)?;
        writeln!(out, "TRENDS")?;
        writeln!(out, "{}", "-".repeat(96))?;
        let header: Vec<String> = report
            .months
            .iter()
            .map(|m| format!("{:>10}", m.month))
            .collect();
        writeln!(out, "{:<6} {} {}", "Nation", header.join(" "), "Trend")?;
        for entry in trends {
            let cells: Vec<String> = entry
                .scores
                .iter()
                .map(|score| match score {
                    Some(score) => format!("{:>10.2}", score),
                    None => format!("{:>10}", "-"),
                })
                .collect();
            writeln!(
                out,
                "{:<6} {} {}",
                entry.country_code,
                cells.join(" "),
                entry.trend_direction.as_str()
            )?;
        }
    }

    Ok(())
}

fn write_effort_table(out: &mut String, records: &[EffortRecord]) -> fmt::Result {
    if records.is_empty() {
        return writeln!(out, "(no operations recorded)");
    }

    writeln!(
        out,
        "{:<6} {:>8} {:>7} {:>8} {:>7} {:>6} {:>9}  {}",
        "Nation", "Ops", "Fuel", "Fleet", "Combat", "Ops%", "Score", "Tier"
    )?;
    for r in records {
        writeln!(
            out,
            "{:<6} {:>8} {:>7.1} {:>8} {:>7} {:>6.1} {:>9.2}  {}",
            r.country_code,
            group_thousands(r.sortie_count),
            r.fuel_liters,
            group_thousands(r.total_fleet.into()),
            group_thousands(r.combat_fleet.into()),
            r.ops_share_pct,
            r.effort_score,
            r.tier.label()
        )?;
    }
    Ok(())
}

fn write_summary(out: &mut String, summary: &MonthlySummary) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "Leaders:")?;
    for (rank, r) in summary.top.iter().enumerate() {
        writeln!(
            out,
            "  {}. {}: {:.0}L fuel | {} ops ({:.1}%) | effort {:.2} | {}",
            rank + 1,
            r.country_code,
            r.fuel_liters,
            group_thousands(r.sortie_count),
            r.ops_share_pct,
            r.effort_score,
            r.priority.label()
        )?;
    }

    if !summary.efficiency_leaders.is_empty() {
        writeln!(out, "Ops per aircraft:")?;
        for e in &summary.efficiency_leaders {
            writeln!(
                out,
                "  {}: {:.3} ops/aircraft | {} combat-ready",
                e.country_code,
                e.ops_per_aircraft,
                group_thousands(e.combat_fleet.into())
            )?;
        }
    }

    let share = match summary.reference_nation_share {
        Some(share) => format!("{:.1}%", share),
        None => "not available".to_string(),
    };
    writeln!(
        out,
        "Total ops: {} | {} share: {}",
        group_thousands(summary.total_ops),
        summary.reference_nation,
        share
    )
}
