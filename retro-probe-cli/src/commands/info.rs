use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use retro_probe_lib::{FieldMap, ProbeContext};

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfoFormat {
    Text,
    Json,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct Report<'a> {
    path: String,
    recognized: bool,
    fields: &'a FieldMap,
}

/// Run the info command.
///
/// Every path is attempted; a path that cannot be read is reported and
/// counted, and the command fails once all paths have been processed.
pub(crate) fn run_info(
    ctx: &ProbeContext,
    paths: &[PathBuf],
    format: InfoFormat,
) -> Result<(), CliError> {
    let mut failed = 0usize;
    for path in paths {
        if let Err(e) = info_one(ctx, path, format) {
            log::error!("{}: {}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::failed(format!(
            "{} of {} paths could not be read",
            failed,
            paths.len()
        )));
    }
    Ok(())
}

fn info_one(ctx: &ProbeContext, path: &Path, format: InfoFormat) -> Result<(), CliError> {
    let fields = ctx.parse(path)?;
    match format {
        InfoFormat::Json => {
            let report = Report {
                path: path.display().to_string(),
                recognized: !fields.is_empty(),
                fields: &fields,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        InfoFormat::Text => print_fields(path, &fields),
    }
    Ok(())
}

fn print_fields(path: &Path, fields: &FieldMap) {
    println!("{}", path.display().if_supports_color(Stdout, |t| t.bold()));

    if fields.is_empty() {
        println!(
            "  {}",
            "not recognized".if_supports_color(Stdout, |t| t.dimmed())
        );
        return;
    }

    let width = fields.keys().map(str::len).max().unwrap_or(0);
    for (key, value) in fields.iter() {
        let label = format!("{:<width$}", key);
        match value.as_tracks() {
            Some(tracks) => {
                println!("  {}", label.if_supports_color(Stdout, |t| t.cyan()));
                for track in tracks.iter() {
                    println!(
                        "    #{} {} {} bytes/sector @{} {}",
                        track.index,
                        track.mode.name(),
                        track.sector_size.bytes(),
                        track.byte_offset,
                        track
                            .source_path()
                            .display()
                            .if_supports_color(Stdout, |t| t.dimmed()),
                    );
                }
            }
            None => println!(
                "  {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                value
            ),
        }
    }
}
