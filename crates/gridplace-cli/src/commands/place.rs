use crate::cli::PlaceArgs;
use crate::config::PartialPlacementConfig;
use crate::error::{CliError, Result};
use crate::ui::{CliProgressHandler, UiEvent};
use crate::utils::report;
use gridplace::{
    core::{
        energy::scoring::Scorer, generation::random_point_set, io::layout::LayoutDocument,
        models::placement::Placement, models::point_set::PointSet,
    },
    engine::{error::EngineError, progress::ProgressReporter},
    workflows,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(args: PlaceArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let partial_config = PartialPlacementConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let mut final_config = partial_config.merge_with_cli(&args)?;

    // Fix the seed up front so that a generated point set and the chains share one reproducible run.
    let seed = *final_config
        .seed
        .get_or_insert_with(|| thread_rng().r#gen());
    info!(seed, "Using random seed.");

    let (point_set, start) = load_point_set(&args, seed)?;
    println!(
        "Placing {} point(s) with {} connection(s) using {} chain(s) of {} move(s).",
        point_set.len(),
        point_set.connections().len(),
        final_config.chains,
        final_config.optimization.iterations
    );

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core placement workflow...");
    let result = tokio::task::block_in_place(|| match &start {
        Some(placement) => {
            workflows::place::run_from(&point_set, placement, &final_config, &reporter)
        }
        None => workflows::place::run(&point_set, &final_config, &reporter),
    })?;

    let best = result.best().ok_or_else(|| {
        CliError::GridPlaceCore(EngineError::Internal(
            "Workflow finished without any solution".to_string(),
        ))
    })?;
    info!(
        chain = best.chain,
        energy = best.energy,
        "Workflow finished with {} solution(s).",
        result.solutions.len()
    );

    if best.accepted == 0 {
        warn!("No improving move was found; the starting placement is kept.");
    }

    println!(
        "Grid {0}x{0}, cell width {1}px. Seed {2}.",
        result.grid.size, result.grid.cell_width, result.seed
    );
    println!(
        "Best chain {}: energy {:.4} -> {:.4} ({} of {} moves accepted).",
        best.chain, best.initial_energy, best.energy, best.accepted, best.proposals
    );
    println!("  {}", report::format_energy(&best.term, best.energy));

    let scorer = Scorer::new(
        &point_set,
        final_config.energy.weights,
        final_config.energy.aggregation,
    );
    let offenders = report::find_offenders(&scorer, &best.placement, point_set.connections());
    print!("{}", report::format_offenders(&offenders));

    if !args.no_grid {
        println!();
        print!("{}", report::render_grid(&best.placement));
    }

    if let Some(output) = &args.output {
        info!("Writing layout to {:?}", output);
        LayoutDocument::from_placement(&point_set, &result.grid, &best.placement)
            .with_energy(best.term, best.energy)
            .write_to_path(output)
            .map_err(|e| CliError::FileParsing {
                path: output.clone(),
                source: e.into(),
            })?;
        println!("✓ Layout written to: {}", output.display());
    }

    Ok(())
}

/// Reads the point set (and any recorded placement) from `--input`, or generates one.
fn load_point_set(args: &PlaceArgs, seed: u64) -> Result<(PointSet, Option<Placement>)> {
    match (&args.input, args.points, args.connections) {
        (Some(path), _, _) => read_layout(path),
        (None, Some(points), Some(connections)) => {
            info!(points, connections, "Generating random point set.");
            let mut rng = StdRng::seed_from_u64(seed.rotate_left(32));
            let point_set =
                random_point_set(points, connections, &mut rng).map_err(EngineError::from)?;
            Ok((point_set, None))
        }
        _ => Err(CliError::Argument(
            "Either --input or both --points and --connections are required.".to_string(),
        )),
    }
}

fn read_layout(path: &Path) -> Result<(PointSet, Option<Placement>)> {
    info!("Loading layout from {:?}", path);
    let to_cli_error = |e: gridplace::core::io::layout::LayoutFileError| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let document = LayoutDocument::read_from_path(path).map_err(to_cli_error)?;
    let point_set = document.point_set().map_err(to_cli_error)?;
    let placement = document.placement().map_err(to_cli_error)?;
    if placement.is_some() {
        info!("Input carries a placement; continuing optimization from it.");
    }
    Ok((point_set, placement))
}
