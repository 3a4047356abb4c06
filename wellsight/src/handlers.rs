use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use wellsight_core::charts::{self, ChartKind};
use wellsight_core::flow::{FlowConfig, build_flow_graph};
use wellsight_core::views;
use wellsight_ingest::loader;
use wellsight_ingest::records::DatasetBundle;

// Helper functions for the render/flow/summary handlers

/// Expand `~` in a user-supplied data directory argument.
pub fn resolve_data_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Resolve the `--chart` argument to the set of charts to build.
/// No argument means the full dashboard.
pub fn select_charts(arg: Option<&str>) -> Result<Vec<ChartKind>, String> {
    match arg {
        None => Ok(ChartKind::ALL.to_vec()),
        Some(name) => ChartKind::from_str(name)
            .map(|kind| vec![kind])
            .ok_or_else(|| format!("Unknown chart kind '{}'", name)),
    }
}

/// Output filename: a single chart gets its own file, the full set gets the
/// dashboard document.
pub fn output_filename(charts: &[ChartKind]) -> String {
    match charts {
        [kind] => format!("{}.json", kind.as_str()),
        _ => "dashboard.json".to_string(),
    }
}

/// Build the figure spec for each requested chart from the loaded bundle.
pub fn build_figures(
    bundle: &DatasetBundle,
    kinds: &[ChartKind],
) -> anyhow::Result<Vec<(ChartKind, Value)>> {
    let mut figures = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let figure = match kind {
            ChartKind::Bubble => charts::bubble_chart(&views::bubble_view(&bundle.happiness)),
            ChartKind::Treemap => charts::treemap_chart(&views::treemap_view(
                &bundle.happiness,
                views::TREEMAP_TOP_N,
            )),
            ChartKind::Violin => charts::violin_chart(&views::violin_view(
                &bundle.survey,
                views::VIOLIN_SAMPLE_SIZE,
            )),
            ChartKind::Flow => {
                let graph = build_flow_graph(&bundle.worklife, &FlowConfig::grouped_hours())
                    .context("building the work-hours/stress flow graph")?;
                charts::flow_chart(&graph.sankey_data())
            }
            ChartKind::Globe => charts::choropleth_chart(&views::choropleth_view(
                &bundle.happiness,
            )),
        };
        figures.push((*kind, figure));
    }
    Ok(figures)
}

/// Build the full dashboard document and write it under `out_dir`.
pub fn render_dashboard(
    bundle: &DatasetBundle,
    kinds: &[ChartKind],
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let figures = build_figures(bundle, kinds)?;
    let spec = charts::dashboard_spec(figures);
    let content = serde_json::to_string_pretty(&spec)?;

    let out_path = out_dir.join(output_filename(kinds));
    charts::save_spec(&content, &out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(out_path)
}

fn loading_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(msg.to_string());
    spinner
}

fn load_bundle_or_exit(data_dir: &Path) -> DatasetBundle {
    let spinner = loading_spinner("Loading datasets...");
    match DatasetBundle::load_dir(data_dir) {
        Ok(bundle) => {
            spinner.finish_and_clear();
            info!(
                happiness = bundle.happiness.len(),
                survey = bundle.survey.len(),
                worklife = bundle.worklife.len(),
                "datasets loaded"
            );
            bundle
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub fn handle_render(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let data_dir = resolve_data_dir(args.get_one::<String>("data-dir").unwrap());
    let out_dir = args.get_one::<PathBuf>("out").unwrap();
    let kinds = match select_charts(args.get_one::<String>("chart").map(String::as_str)) {
        Ok(kinds) => kinds,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let bundle = load_bundle_or_exit(&data_dir);

    match render_dashboard(&bundle, &kinds, out_dir) {
        Ok(path) => {
            println!(
                "{} Loaded {} countries, {} survey rows, {} worklife rows",
                "✓".green().bold(),
                bundle.happiness.len(),
                bundle.survey.len(),
                bundle.worklife.len()
            );
            for kind in &kinds {
                println!("{} {}", "✓".green().bold(), kind.title());
            }
            println!(
                "{} Chart specs written to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        Err(e) => {
            eprintln!("{} Render failed: {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub fn handle_flow(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let data_dir = resolve_data_dir(args.get_one::<String>("data-dir").unwrap());
    let out_path = args.get_one::<PathBuf>("out");
    let ungrouped = args.get_flag("ungrouped");

    let worklife = match loader::load_worklife(&data_dir.join(loader::WORKLIFE_FILE)) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let config = if ungrouped {
        FlowConfig::raw_hours(&worklife)
    } else {
        FlowConfig::grouped_hours()
    };

    let graph = match build_flow_graph(&worklife, &config) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let spec = charts::flow_chart(&graph.sankey_data());
    let content = serde_json::to_string_pretty(&spec).expect("sankey spec serializes");

    match out_path {
        Some(path) => {
            if let Err(e) = charts::save_spec(&content, path) {
                eprintln!("{} Failed to write {}: {}", "✗".red().bold(), path.display(), e);
                std::process::exit(1);
            }
            println!(
                "{} Flow graph with {} nodes and {} links written to {}",
                "✓".green().bold(),
                graph.node_count(),
                graph.edge_count(),
                path.display().to_string().bright_white()
            );
        }
        None => println!("{}", content),
    }
}

pub fn handle_summary(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let data_dir = resolve_data_dir(args.get_one::<String>("data-dir").unwrap());
    let bundle = load_bundle_or_exit(&data_dir);

    let graph = match build_flow_graph(&bundle.worklife, &FlowConfig::grouped_hours()) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    print!("{}", charts::generate_summary(&bundle, &graph));
}
