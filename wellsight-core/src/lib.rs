pub mod charts;
pub mod flow;
pub mod views;

pub use charts::ChartKind;
pub use flow::{Bucket, FlowConfig, FlowError, FlowGraph, SankeyData, build_flow_graph};

use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        r#"
              _ _     _       _     _
__      _____| | |___(_) __ _| |__ | |_
\ \ /\ / / _ \ | / __| |/ _` | '_ \| __|
 \ V  V /  __/ | \__ \ | (_| | | | | |_
  \_/\_/ \___|_|_|___/_|\__, |_| |_|\__|
                        |___/
"#
        .bright_cyan()
    );
    println!(
        "{}",
        "  wellbeing dashboard data engine\n".bright_white().bold()
    );
}
