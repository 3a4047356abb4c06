use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wellsight")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wellsight")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("render")
                .about(
                    "Loads the three datasets and writes renderable chart specs for the \
                dashboard.",
                )
                .arg(
                    arg!(-d --"data-dir" <DIR>)
                        .required(false)
                        .help("Directory containing the dashboard CSV files")
                        .default_value("~/.local/share/wellsight/"),
                )
                .arg(
                    arg!(-o --"out" <DIR>)
                        .required(false)
                        .help("Directory to write chart spec JSON into")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("."),
                )
                .arg(
                    arg!(-c --"chart" <KIND>)
                        .required(false)
                        .help("Render a single chart: bubble, treemap, violin, flow, globe")
                        .value_parser([
                            "bubble",
                            "treemap",
                            "violin",
                            "flow",
                            "sankey",
                            "globe",
                            "choropleth",
                        ]),
                ),
        )
        .subcommand(
            command!("flow")
                .about(
                    "Builds just the work-hours/stress flow graph and emits its sankey \
                spec.",
                )
                .arg(
                    arg!(-d --"data-dir" <DIR>)
                        .required(false)
                        .help("Directory containing the dashboard CSV files")
                        .default_value("~/.local/share/wellsight/"),
                )
                .arg(
                    arg!(-o --"out" <PATH>)
                        .required(false)
                        .help("Save the sankey spec to a file (default: print to stdout)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"ungrouped")
                        .required(false)
                        .help("One node per distinct hours value instead of 10-hour buckets")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("summary")
                .about("Prints a text summary of the loaded datasets and flow totals")
                .arg(
                    arg!(-d --"data-dir" <DIR>)
                        .required(false)
                        .help("Directory containing the dashboard CSV files")
                        .default_value("~/.local/share/wellsight/"),
                ),
        )
}
