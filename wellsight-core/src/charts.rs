// Chart spec generation from derived views
//
// Each builder emits a self-contained JSON figure (trace + layout) for the
// external renderer. The styling constants follow the original dashboard.

use crate::flow::SankeyData;
use crate::views::{BubblePoint, ChoroplethView, TreemapCell, ViolinGroup};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bubble,
    Treemap,
    Violin,
    Flow,
    Globe,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bubble,
        ChartKind::Treemap,
        ChartKind::Violin,
        ChartKind::Flow,
        ChartKind::Globe,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bubble" => Some(ChartKind::Bubble),
            "treemap" => Some(ChartKind::Treemap),
            "violin" => Some(ChartKind::Violin),
            "flow" | "sankey" => Some(ChartKind::Flow),
            "globe" | "choropleth" => Some(ChartKind::Globe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bubble => "bubble",
            ChartKind::Treemap => "treemap",
            ChartKind::Violin => "violin",
            ChartKind::Flow => "flow",
            ChartKind::Globe => "globe",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bubble => "GDP vs Happiness (Bubble Size = Social Support)",
            ChartKind::Treemap => "Top Countries by Happiness Factors",
            ChartKind::Violin => "Stress Levels by Gender",
            ChartKind::Flow => "Weekly Work Hours vs Stress Level Distribution",
            ChartKind::Globe => "World Happiness Levels",
        }
    }
}

pub fn bubble_chart(points: &[BubblePoint]) -> Value {
    json!({
        "type": "scatter",
        "mode": "markers",
        "x": points.iter().map(|p| p.gdp_per_capita).collect::<Vec<_>>(),
        "y": points.iter().map(|p| p.ladder_score).collect::<Vec<_>>(),
        "text": points.iter().map(|p| p.country.as_str()).collect::<Vec<_>>(),
        "marker": {
            "size": points.iter().map(|p| p.social_support).collect::<Vec<_>>(),
            "sizemode": "area",
            "sizeref": 0.01,
            "opacity": 0.7,
            "line": { "width": 0.5, "color": "white" }
        },
        "layout": {
            "title": ChartKind::Bubble.title(),
            "template": "plotly_dark",
            "xaxis": { "title": "GDP per Capita (Log)" },
            "yaxis": { "title": "Ladder Score", "dtick": 0.5 }
        }
    })
}

pub fn treemap_chart(cells: &[TreemapCell]) -> Value {
    json!({
        "type": "treemap",
        "labels": cells.iter().map(|c| c.country.as_str()).collect::<Vec<_>>(),
        "parents": cells.iter().map(|c| c.factor.as_str()).collect::<Vec<_>>(),
        "values": cells.iter().map(|c| c.value).collect::<Vec<_>>(),
        "marker": {
            "colorscale": "YlGnBu",
            "line": { "width": 1.5, "color": "white" }
        },
        "layout": {
            "title": ChartKind::Treemap.title()
        }
    })
}

/// Plotly's qualitative Pastel sequence, cycled across violin traces.
const PASTEL: [&str; 11] = [
    "rgb(102,197,204)",
    "rgb(246,207,113)",
    "rgb(248,156,116)",
    "rgb(220,176,242)",
    "rgb(135,197,95)",
    "rgb(158,185,243)",
    "rgb(254,136,177)",
    "rgb(201,219,116)",
    "rgb(139,224,164)",
    "rgb(180,151,231)",
    "rgb(179,179,179)",
];

pub fn violin_chart(groups: &[ViolinGroup]) -> Value {
    let traces: Vec<Value> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            json!({
                "type": "violin",
                "name": g.label,
                "y": g.values,
                "box": { "visible": true },
                "points": "all",
                "jitter": 0.5,
                "meanline": { "visible": true },
                "line": { "color": PASTEL[i % PASTEL.len()] }
            })
        })
        .collect();

    json!({
        "traces": traces,
        "layout": {
            "title": ChartKind::Violin.title(),
            "template": "simple_white",
            "xaxis": { "title": "Gender" },
            "yaxis": { "title": "Growing Stress Level" }
        }
    })
}

pub fn flow_chart(data: &SankeyData) -> Value {
    json!({
        "type": "sankey",
        "node": {
            "pad": 20,
            "thickness": 30,
            "line": { "color": "black", "width": 1 },
            "label": data.labels,
            "color": data.node_colors
        },
        "link": {
            "source": data.source,
            "target": data.target,
            "value": data.value,
            "color": data.link_colors
        },
        "layout": {
            "title": ChartKind::Flow.title(),
            "height": 700
        }
    })
}

pub fn choropleth_chart(view: &ChoroplethView) -> Value {
    json!({
        "type": "choropleth",
        "locationmode": "country names",
        "locations": view.rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
        "z": view.rows.iter().map(|r| r.ladder_score).collect::<Vec<_>>(),
        "zmin": view.score_min,
        "zmax": view.score_max,
        "colorscale": "Plasma",
        "marker": { "line": { "color": "black", "width": 0.6 } },
        "colorbar": { "title": "Happiness Index" },
        "layout": {
            "title": ChartKind::Globe.title(),
            "geo": {
                "projection": { "type": "orthographic" },
                "showland": true,
                "showocean": true,
                "showcountries": true,
                "showframe": false
            }
        }
    })
}

/// Assemble the full dashboard document: every figure plus metadata about
/// how and when it was generated.
pub fn dashboard_spec(figures: Vec<(ChartKind, Value)>) -> Value {
    let mut charts = serde_json::Map::new();
    for (kind, figure) in figures {
        charts.insert(kind.as_str().to_string(), figure);
    }

    json!({
        "dashboard": {
            "metadata": {
                "generator": "Wellsight",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "charts": charts
        }
    })
}

pub fn save_spec(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// Human-readable session summary: dataset sizes, the happiest countries, and
/// the flow totals.
pub fn generate_summary(
    bundle: &wellsight_ingest::records::DatasetBundle,
    flow: &crate::flow::FlowGraph,
) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                        WELLSIGHT DASHBOARD SUMMARY\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Countries:        {}\n", bundle.happiness.len()));
    report.push_str(&format!("Survey rows:      {}\n", bundle.survey.len()));
    report.push_str(&format!("Worklife rows:    {}\n", bundle.worklife.len()));
    report.push('\n');

    let mut ranked: Vec<_> = bundle.happiness.iter().collect();
    ranked.sort_by(|a, b| {
        b.ladder_score
            .partial_cmp(&a.ladder_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if !ranked.is_empty() {
        report.push_str("Happiest countries:\n");
        for (idx, record) in ranked.iter().take(5).enumerate() {
            report.push_str(&format!(
                "  [{}] {:<24} {:.2}\n",
                idx + 1,
                record.country,
                record.ladder_score
            ));
        }
        report.push('\n');
    }

    report.push_str("Work hours vs stress flow:\n");
    report.push_str(&format!("  Nodes:          {}\n", flow.node_count()));
    report.push_str(&format!("  Links:          {}\n", flow.edge_count()));
    report.push_str(&format!("  Records mapped: {}\n", flow.total_flow()));
    report.push('\n');

    report.push_str(RULE);
    report.push_str("                          End of Summary\n");
    report.push_str(RULE);

    report
}
