use crate::cli::ScoreArgs;
use crate::config::PartialPlacementConfig;
use crate::error::{CliError, Result};
use crate::utils::report;
use gridplace::core::energy::scoring::Scorer;
use gridplace::core::io::layout::LayoutDocument;
use gridplace::engine::error::EngineError;
use tracing::info;

pub async fn run(args: ScoreArgs) -> Result<()> {
    let energy_config =
        PartialPlacementConfig::load(args.config.as_deref())?.merge_energy_with_cli(&args)?;

    info!("Loading layout from {:?}", args.input);
    let to_cli_error = |e: gridplace::core::io::layout::LayoutFileError| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    };
    let document = LayoutDocument::read_from_path(&args.input).map_err(to_cli_error)?;
    let point_set = document.point_set().map_err(to_cli_error)?;
    let placement = document.placement().map_err(to_cli_error)?.ok_or_else(|| {
        CliError::Argument(format!(
            "Layout '{}' has no cells to score; run 'place' first.",
            args.input.display()
        ))
    })?;

    let scorer = Scorer::new(&point_set, energy_config.weights, energy_config.aggregation);
    let term = scorer.score(&placement).map_err(EngineError::from)?;
    let total = term.weighted(&energy_config.weights);
    info!(energy = total, "Scored layout.");

    println!(
        "{} point(s), {} connection(s) on a {}x{} grid.",
        point_set.len(),
        point_set.connections().len(),
        placement.grid_size(),
        placement.grid_size()
    );
    println!("{}", report::format_energy(&term, total));
    print!(
        "{}",
        report::format_offenders(&report::find_offenders(
            &scorer,
            &placement,
            point_set.connections()
        ))
    );

    if let Some(recorded) = &document.energy {
        if (recorded.total - total).abs() > 1e-9 {
            println!(
                "Note: the file records energy {:.4}; the current weights give {:.4}.",
                recorded.total, total
            );
        }
    }

    Ok(())
}
