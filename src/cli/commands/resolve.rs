//! Resolve command implementation
//!
//! Reads record sequences from CSV, resolves them concurrently and lists the
//! populated sections of each report. The listing shows field codes as stored;
//! producing the SYNOP transmission text is left to a renderer.

use super::shared::setup_logging;
use crate::app::adapters::record_reader::read_subsets_from_path;
use crate::app::models::report::{CloudBase, Field, PrecipitationSlot, Section, SynopReport};
use crate::app::services::batch::{ResolvedSubset, resolve_batch};
use crate::app::services::resolver::{ResolutionStats, SubsetState};
use crate::cli::args::ResolveArgs;
use crate::{Error, Result};
use colored::Colorize;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};

/// One populated section and its set fields, in report order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionListing {
    pub section: Section,
    pub fields: Vec<(String, String)>,
}

/// Resolve command runner
///
/// 1. Set up logging and validate arguments
/// 2. Read the record sequences
/// 3. Resolve them through the batch service
/// 4. Print each report and the combined statistics
pub async fn run_resolve(args: ResolveArgs) -> Result<ResolutionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting SYNOP resolver");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    config.validate()?;

    let input_path = args.input_path.clone();
    let subsets = task::spawn_blocking(move || read_subsets_from_path(&input_path))
        .await
        .map_err(|e| Error::task_join("reading input records", e))??;

    if subsets.is_empty() {
        warn!("No records found in {}", args.input_path.display());
    }

    let batch = resolve_batch(subsets, &config).await?;

    if !args.quiet {
        for subset in &batch.reports {
            print_report(subset);
        }
    }
    print_summary(&batch.stats, batch.len(), start_time);

    Ok(batch.stats)
}

fn print_report(subset: &ResolvedSubset) {
    let resolved = &subset.resolved;

    println!("\n{} {}", "Report".bright_cyan().bold(), subset.id.bold());
    if resolved.report.is_empty() {
        println!("   {}", "(no fields resolved)".dimmed());
    }
    for listing in describe_report(&resolved.report) {
        println!("   {}", format!("{:?}", listing.section).bright_green());
        for (name, value) in &listing.fields {
            println!("      {:<12} {}", name, value);
        }
    }

    let flags = weather_flags(&resolved.state);
    if !flags.is_empty() {
        println!("   {} {}", "Flags".yellow(), flags.join(", "));
    }
    println!("   {}", resolved.stats.summary().dimmed());
}

fn print_summary(stats: &ResolutionStats, reports: usize, start_time: Instant) {
    println!("\n{}", "Resolution Complete".bright_cyan().bold());
    println!("   • Reports resolved: {}", reports);
    println!("   • Records: {}", stats.records);
    println!(
        "   • Applied: {} ({:.1}%)",
        stats.applied.to_string().green(),
        stats.applied_rate()
    );
    println!("   • Missing: {}", stats.missing);
    println!("   • Slot conflicts: {}", stats.slot_conflicts);
    println!("   • Ignored: {}", stats.ignored);
    if stats.unknown_codes > 0 || stats.out_of_range > 0 {
        println!(
            "   • {} unknown descriptors, {} values out of range",
            stats.unknown_codes.to_string().yellow(),
            stats.out_of_range.to_string().yellow()
        );
    }
    println!("   • Processing time: {:.2?}", start_time.elapsed());
}

/// Names of the weather side flags raised for a report
pub fn weather_flags(state: &SubsetState) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if state.no_significant_ww {
        flags.push("no significant ww");
    }
    if state.no_significant_w1 {
        flags.push("no significant W1");
    }
    if state.no_significant_w2 {
        flags.push("no significant W2");
    }
    flags
}

/// List the populated sections of a report with their set fields
///
/// Unset fields are omitted; an indeterminate field is shown as "/".
pub fn describe_report(report: &SynopReport) -> Vec<SectionListing> {
    report
        .sections
        .iter()
        .map(|section| SectionListing {
            section,
            fields: section_fields(report, section),
        })
        .collect()
}

fn section_fields(report: &SynopReport, section: Section) -> Vec<(String, String)> {
    let mut fields = FieldList::default();
    let precipitation = &report.precipitation;

    match section {
        Section::Surface => {
            let surface = &report.surface;
            if let Some(ix) = surface.ix {
                fields.push_text("ix", ix.code().to_string());
            }
            fields.push("VV", &surface.vv);
            fields.push("N", &surface.n);
            fields.push("Nh", &surface.nh);
            fields.push_cloud_base("h", &surface.h);
            fields.push("ww", &surface.ww);
            fields.push("W1", &surface.w1);
            fields.push("W2", &surface.w2);
            fields.push("CL", &surface.cl);
            fields.push("CM", &surface.cm);
            fields.push("CH", &surface.ch);
        }
        Section::HourlyPrecipitation => fields.push_slot(&precipitation.hourly),
        Section::IntermediatePrecipitation => fields.push_slot(&precipitation.intermediate),
        Section::SynopticPrecipitation => fields.push_slot(&precipitation.synoptic),
        Section::DailyPrecipitation => fields.push("R24", &precipitation.daily_total),
        Section::CloudLayers => {
            for (position, layer) in report.cloud_layers.iter().enumerate() {
                if layer.is_empty() {
                    continue;
                }
                let layer_number = position + 1;
                fields.push(&format!("Ns[{layer_number}]"), &layer.ns);
                fields.push(&format!("C[{layer_number}]"), &layer.genus);
                fields.push(&format!("hshs[{layer_number}]"), &layer.height);
            }
        }
        Section::GroundState => {
            fields.push("E", &report.ground.without_snow);
            fields.push("E'", &report.ground.with_snow);
        }
    }
    fields.0
}

#[derive(Default)]
struct FieldList(Vec<(String, String)>);

impl FieldList {
    fn push(&mut self, name: &str, field: &Field) {
        match field {
            Field::Unset => {}
            Field::Coded(code) => self.push_text(name, code.to_string()),
            Field::Indeterminate => self.push_text(name, "/".to_string()),
        }
    }

    fn push_text(&mut self, name: &str, value: String) {
        self.0.push((name.to_string(), value));
    }

    fn push_cloud_base(&mut self, name: &str, base: &CloudBase) {
        match base {
            CloudBase::Unset => {}
            CloudBase::Observed(code) => self.push_text(name, code.to_string()),
            CloudBase::ClearSky => self.push_text(name, "9 (clear sky)".to_string()),
        }
    }

    fn push_slot(&mut self, slot: &PrecipitationSlot) {
        if let (Some(amount), Some(indicator)) = (slot.amount(), slot.indicator()) {
            self.push_text("RRR", amount.to_string());
            self.push_text("tR", indicator.to_string());
        }
    }
}
