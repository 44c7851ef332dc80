//! `sgr search` and `sgr overview`: run the per-file pipeline over every
//! argument in parallel and print the excerpts in argument order.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

use crate::cli::{AppContext, OverviewArgs, RenderFlags, SearchArgs};
use crate::core::excerpt::{Excerpt, SourceFile};
use crate::core::render::{RenderOptions, TextFormatter};
use crate::error::ScopeError;
use crate::infra::config::load_config;

/// One file's rendered excerpt
struct FileReport {
    path: PathBuf,
    highlighted: usize,
    text: String,
}

pub fn search_run(args: SearchArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;

    let mut context = config.context;
    args.context.apply(&mut context);
    let formatter = formatter(config.render, &args.render, ctx);

    let pattern = args.pattern.as_str();
    report(&args.files, &formatter, ctx, "No matches found", |file| {
        file.excerpt_for_pattern(pattern, &context)
    })
}

pub fn overview_run(args: OverviewArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;

    let mut context = config.overview;
    args.context.apply(&mut context);
    let formatter = formatter(config.render, &args.render, ctx);

    report(&args.files, &formatter, ctx, "No top-level declarations found", |file| {
        file.overview(&context)
    })
}

fn formatter(mut options: RenderOptions, flags: &RenderFlags, ctx: &AppContext) -> TextFormatter {
    flags.apply(&mut options);
    options.color = options.color && !ctx.no_color;
    TextFormatter::new(options)
}

fn report<F>(
    files: &[PathBuf],
    formatter: &TextFormatter,
    ctx: &AppContext,
    empty_message: &str,
    select: F,
) -> Result<()>
where
    F: Fn(&SourceFile) -> crate::error::Result<Excerpt> + Sync,
{
    let started = Instant::now();

    // Process in parallel with order preserved in collect
    let results: Vec<Result<Option<FileReport>>> = files
        .par_iter()
        .map(|path| {
            let file_started = Instant::now();
            let file = SourceFile::load(path)?;

            let report = match select(&file) {
                Ok(excerpt) => Some(FileReport {
                    path: path.clone(),
                    highlighted: excerpt.highlight.len(),
                    text: excerpt.render(&file, formatter),
                }),
                Err(ScopeError::NoMatches) => None,
                Err(err) => return Err(err.into()),
            };

            debug!(
                path = %path.display(),
                elapsed_us = file_started.elapsed().as_micros() as u64,
                "file processed"
            );
            Ok(report)
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        if let Some(report) = result? {
            reports.push(report);
        }
    }

    if reports.is_empty() {
        anyhow::bail!("{empty_message}");
    }

    let with_headers = files.len() > 1;
    let use_color = formatter.options().color;
    let mut out = io::stdout().lock();

    for (index, report) in reports.iter().enumerate() {
        if with_headers {
            if index > 0 {
                writeln!(out)?;
            }
            let header = format!("==> {} <==", report.path.display());
            if use_color {
                writeln!(out, "{}", header.bold())?;
            } else {
                writeln!(out, "{header}")?;
            }
        }
        out.write_all(report.text.as_bytes())
            .context("Failed to write output")?;
    }
    out.flush()?;

    if !ctx.quiet {
        let highlighted: usize = reports.iter().map(|r| r.highlighted).sum();
        let tick = if ctx.no_color {
            "✓".to_string()
        } else {
            "✓".green().to_string()
        };
        eprintln!(
            "{} {} highlighted line(s) in {} of {} file(s) ({:.1?})",
            tick,
            highlighted,
            reports.len(),
            files.len(),
            started.elapsed()
        );
    }

    Ok(())
}
