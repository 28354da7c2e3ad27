use anyhow::{Context, Result};
use tracing::info;

use survey_cli::pipeline::{
    DetectedExport, OptionOverrides, detect_export, extract_export, load_options,
    reasons_overview,
};
use survey_ingest::write_csv;

use crate::cli::{DetectArgs, DetectionArgs, ExtractArgs, OutputFormatArg, ReasonsArgs};
use crate::summary::{print_detection, print_explanation, print_overview, print_roles};

fn load(input: &std::path::Path, args: &DetectionArgs) -> Result<DetectedExport> {
    let overrides = OptionOverrides {
        min_numeric_fraction: args.min_numeric_fraction,
        bonus_multiplier: args.bonus_multiplier,
    };
    let options = load_options(args.options.as_deref(), overrides)?;
    detect_export(input, options)
}

pub fn run_detect(args: &DetectArgs) -> Result<()> {
    let export = load(&args.input, &args.detection)?;
    match args.format {
        OutputFormatArg::Json => {
            let json = if args.explain {
                serde_json::to_string_pretty(&export.report)
            } else {
                serde_json::to_string_pretty(&export.report.result)
            }
            .context("serialize detection result")?;
            println!("{json}");
        }
        OutputFormatArg::Table => {
            print_detection(&export.report, &export.dataset);
            if args.explain {
                print_explanation(&export.report);
            }
        }
    }
    Ok(())
}

pub fn run_reasons(args: &ReasonsArgs) -> Result<()> {
    let export = load(&args.input, &args.detection)?;
    let overview = reasons_overview(&export, args.column.as_deref())?;
    print_overview(&overview);
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<()> {
    let export = load(&args.input, &args.detection)?;
    let extracted = extract_export(&export, args.keep_numeric_responses)?;
    write_csv(&extracted, &args.output)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        rows = extracted.row_count(),
        columns = extracted.width(),
        "extraction written"
    );
    println!(
        "Wrote {} rows x {} columns to {}",
        extracted.row_count(),
        extracted.width(),
        args.output.display()
    );
    Ok(())
}

pub fn run_roles() -> Result<()> {
    print_roles();
    Ok(())
}
