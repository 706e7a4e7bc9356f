use std::io::Write;
use std::path::PathBuf;

use eyre::{Context, Result, bail};
use polyflag::PolytopeC;
use polyflag::presets::{self, PRESET_SYNTAX};

use crate::settings::{OutputFormat, Settings};

/// Polyflag command-line interface
///
/// Builds polytopes from a symmetry group and the flags of one fundamental
/// domain.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log debug messages (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Construct a preset polytope and print its incidence structure.
    Build {
        /// Preset name (such as `polygon:5` or `regular:4,3`)
        preset: String,
        /// Maximum number of domains to enumerate.
        #[arg(long)]
        cap: Option<usize>,
        /// Print the whole polytope as JSON.
        #[arg(long)]
        json: bool,
        /// File to write to, use '-' for stdout.
        #[arg(short, long, value_parser, default_value = "-")]
        output: clio::Output,
    },
    /// Print the syntax of every preset.
    Presets,
    /// Enumerate the domains of a preset and print how many there are.
    Enumerate {
        /// Preset name (such as `polygon:5` or `regular:4,3`)
        preset: String,
        /// Maximum number of domains to enumerate.
        #[arg(long)]
        cap: Option<usize>,
    },
}

pub(crate) fn exec(subcommand: Subcommand, settings: &Settings) -> Result<()> {
    match subcommand {
        Subcommand::Build {
            preset,
            cap,
            json,
            mut output,
        } => {
            let cap = cap.unwrap_or(settings.domain_cap);
            let polytope = presets::by_name(&preset)
                .wrap_err_with(|| format!("error building preset {preset:?}"))?
                .to_polytope_c(cap)
                .wrap_err_with(|| format!("error constructing {preset:?}"))?;

            if settings.check_incidences {
                check_incidences(&polytope)?;
            }

            let format = match json {
                true => OutputFormat::Json,
                false => settings.output,
            };
            match format {
                OutputFormat::Summary => write_summary(&mut output, &polytope, cap)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut output, &polytope)
                        .context("error serializing polytope")?;
                    writeln!(output)?;
                }
            }
            output.finish().context("error writing output")?;
            Ok(())
        }

        Subcommand::Presets => {
            for (syntax, description) in PRESET_SYNTAX {
                println!("{syntax:<24}{description}");
            }
            Ok(())
        }

        Subcommand::Enumerate { preset, cap } => {
            let cap = cap.unwrap_or(settings.domain_cap);
            let count = presets::by_name(&preset)
                .wrap_err_with(|| format!("error building preset {preset:?}"))?
                .count_domains(cap)
                .context("error enumerating domains")?;
            match count.truncated {
                true => println!("{} domains (stopped at cap {cap})", count.count),
                false => println!("{} domains", count.count),
            }
            Ok(())
        }
    }
}

/// Checks the incidences of a polytope. Problems are fatal unless the domain
/// enumeration was truncated, in which case they are expected.
fn check_incidences(polytope: &PolytopeC) -> Result<()> {
    let Err(errors) = polytope.check_incidences() else {
        return Ok(());
    };
    for e in &errors {
        match polytope.truncated {
            true => log::warn!("{e}"),
            false => log::error!("{e}"),
        }
    }
    if !polytope.truncated {
        bail!("polytope has {} incidence errors", errors.len());
    }
    Ok(())
}

fn write_summary(w: &mut impl Write, polytope: &PolytopeC, cap: usize) -> Result<()> {
    writeln!(
        w,
        "rank {} polytope from {} domains",
        polytope.rank(),
        polytope.domain_count,
    )?;
    if polytope.truncated {
        writeln!(w, "warning: stopped at cap {cap}; polytope may be incomplete")?;
    }
    for (rank, count) in polytope.element_counts().into_iter().enumerate() {
        let plural = if count == 1 { "" } else { "s" };
        writeln!(w, "  rank {rank}: {count} element{plural}")?;
    }
    Ok(())
}
