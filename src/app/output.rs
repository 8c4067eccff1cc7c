use crate::core::catalog::RegionCatalog;
use crate::core::engine::InteractionReport;
use crate::domain::model::{
    BudgetOutcome, ComparisonResult, PredictionResult, RecommendationEntry, TrendPoint,
};
use crate::utils::error::Result;
use crate::utils::format::format_aud;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Serialize)]
struct RegionRow<'a> {
    name: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    reference_price: Option<u64>,
}

#[derive(Serialize)]
struct PredictionRow<'a> {
    region: &'a str,
    price: u64,
    base: u64,
    room_adjustment: u64,
    region_adjustment: u64,
    preference_bonus: u64,
}

impl<'a> From<&'a PredictionResult> for PredictionRow<'a> {
    fn from(result: &'a PredictionResult) -> Self {
        Self {
            region: &result.region,
            price: result.price,
            base: result.breakdown.base,
            room_adjustment: result.breakdown.room_adjustment,
            region_adjustment: result.breakdown.region_adjustment,
            preference_bonus: result.breakdown.preference_bonus,
        }
    }
}

#[derive(Serialize)]
struct EstimateView<'a> {
    prediction: &'a PredictionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<BudgetOutcome>,
}

#[derive(Serialize)]
struct TrendView<'a> {
    region: &'a str,
    points: &'a [TrendPoint],
}

/// Long-format row used when a whole report goes out as CSV.
#[derive(Serialize)]
struct ReportRow<'a> {
    section: &'a str,
    key: String,
    value: u64,
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv_rows<W: Write, T: Serialize>(
    out: &mut W,
    rows: impl IntoIterator<Item = T>,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_regions<W: Write>(
    out: &mut W,
    catalog: &RegionCatalog,
    format: OutputFormat,
) -> Result<()> {
    let rows = catalog.iter().map(|region| RegionRow {
        name: &region.name,
        latitude: region.coordinates.map(|c| c.latitude),
        longitude: region.coordinates.map(|c| c.longitude),
        reference_price: region.reference_price,
    });

    match format {
        OutputFormat::Json => write_json(out, &rows.collect::<Vec<_>>()),
        OutputFormat::Csv => write_csv_rows(out, rows),
        OutputFormat::Table => {
            for (index, row) in rows.enumerate() {
                match (row.latitude, row.longitude) {
                    (Some(lat), Some(lon)) => writeln!(
                        out,
                        "{:>2}. {:<12} {:>9.4}, {:>9.4}  {}",
                        index + 1,
                        row.name,
                        lat,
                        lon,
                        row.reference_price.map(format_aud).unwrap_or_default()
                    )?,
                    _ => writeln!(out, "{:>2}. {}", index + 1, row.name)?,
                }
            }
            Ok(())
        }
    }
}

pub fn write_prediction<W: Write>(
    out: &mut W,
    prediction: &PredictionResult,
    verdict: Option<(u64, BudgetOutcome)>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &EstimateView {
                prediction,
                budget: verdict.map(|(budget, _)| budget),
                outcome: verdict.map(|(_, outcome)| outcome),
            },
        ),
        OutputFormat::Csv => write_csv_rows(out, [PredictionRow::from(prediction)]),
        OutputFormat::Table => {
            writeln!(
                out,
                "Predicted house price in {}: around {} AUD",
                prediction.region,
                format_aud(prediction.price)
            )?;
            if let Some((budget, outcome)) = verdict {
                write_verdict(out, budget, outcome)?;
            }
            Ok(())
        }
    }
}

fn write_verdict<W: Write>(out: &mut W, budget: u64, outcome: BudgetOutcome) -> Result<()> {
    match outcome {
        BudgetOutcome::WithinBudget => writeln!(
            out,
            "Great choice! This property fits your budget of {} AUD.",
            format_aud(budget)
        )?,
        BudgetOutcome::OverBudget { deficit } => writeln!(
            out,
            "You might need to increase your budget by about {} AUD.",
            format_aud(deficit)
        )?,
    }
    Ok(())
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    comparison: &ComparisonResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, comparison),
        OutputFormat::Csv => write_csv_rows(
            out,
            [
                PredictionRow::from(&comparison.first),
                PredictionRow::from(&comparison.second),
            ],
        ),
        OutputFormat::Table => {
            for side in [&comparison.first, &comparison.second] {
                writeln!(out, "{} price: {}", side.region, format_aud(side.price))?;
            }
            Ok(())
        }
    }
}

pub fn write_trend<W: Write>(
    out: &mut W,
    region: &str,
    points: &[TrendPoint],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &TrendView { region, points }),
        OutputFormat::Csv => write_csv_rows(out, points.iter()),
        OutputFormat::Table => {
            writeln!(out, "Price trend for {}", region)?;
            if points.is_empty() {
                writeln!(out, "  (no years configured)")?;
            }
            for point in points {
                writeln!(out, "  {}  {:>12}", point.year, format_aud(point.price))?;
            }
            Ok(())
        }
    }
}

pub fn write_recommendations<W: Write>(
    out: &mut W,
    entries: &[RecommendationEntry],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, entries),
        OutputFormat::Csv => write_csv_rows(out, entries.iter()),
        OutputFormat::Table => {
            if entries.is_empty() {
                writeln!(out, "No regions to recommend.")?;
            }
            for entry in entries {
                writeln!(
                    out,
                    "{}: {} (score: {})",
                    entry.region,
                    format_aud(entry.price),
                    entry.score
                )?;
            }
            Ok(())
        }
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &InteractionReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv_rows(out, report_rows(report)),
        OutputFormat::Table => {
            write_prediction(
                out,
                &report.prediction,
                Some((report.budget, report.outcome)),
                OutputFormat::Table,
            )?;
            writeln!(out)?;
            writeln!(out, "Region comparison")?;
            write_comparison(out, &report.comparison, OutputFormat::Table)?;
            writeln!(out)?;
            write_trend(out, &report.trend_region, &report.trend, OutputFormat::Table)?;
            writeln!(out)?;
            writeln!(out, "Recommended regions for you")?;
            write_recommendations(out, report.shortlist(), OutputFormat::Table)
        }
    }
}

fn report_rows(report: &InteractionReport) -> Vec<ReportRow<'static>> {
    let mut rows = vec![
        ReportRow {
            section: "prediction",
            key: report.prediction.region.clone(),
            value: report.prediction.price,
        },
        ReportRow {
            section: "budget",
            key: "budget".to_string(),
            value: report.budget,
        },
    ];
    if let BudgetOutcome::OverBudget { deficit } = report.outcome {
        rows.push(ReportRow {
            section: "budget",
            key: "deficit".to_string(),
            value: deficit,
        });
    }
    for side in [&report.comparison.first, &report.comparison.second] {
        rows.push(ReportRow {
            section: "comparison",
            key: side.region.clone(),
            value: side.price,
        });
    }
    rows.extend(report.trend.iter().map(|point| ReportRow {
        section: "trend",
        key: point.year.to_string(),
        value: point.price,
    }));
    rows.extend(report.shortlist().iter().map(|entry| ReportRow {
        section: "recommendation",
        key: entry.region.clone(),
        value: entry.price,
    }));
    rows
}
