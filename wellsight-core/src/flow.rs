// Flow-graph construction for the work hours vs stress sankey

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;
use wellsight_ingest::records::{StressLevel, WorklifeRecord};

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("no node color configured for category '{0}'")]
    MissingCategoryColor(String),

    #[error("no link color configured for category '{0}'")]
    MissingLinkColor(String),
}

/// A numeric interval with a display label. Closed on both ends, so a value
/// exactly on the upper bound belongs to this bucket and not the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
}

impl Bucket {
    pub fn new(lower: f64, upper: f64, label: impl Into<String>) -> Self {
        Self {
            lower,
            upper,
            label: label.into(),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// The default weekly-hours bucket table: ten equal-width intervals over
/// [0, 100] with integer bounds. Values strictly between an upper bound and
/// the next lower bound (e.g. 10.5) match no bucket and are excluded from the
/// graph; the source data carries integer hours, so in practice nothing falls
/// in the gaps.
pub fn decile_buckets() -> Vec<Bucket> {
    let mut buckets = vec![Bucket::new(0.0, 10.0, "0-10")];
    for i in 1..10 {
        let lower = i * 10 + 1;
        let upper = (i + 1) * 10;
        buckets.push(Bucket::new(
            lower as f64,
            upper as f64,
            format!("{}-{}", lower, upper),
        ));
    }
    buckets
}

/// One degenerate bucket per distinct hours value observed in the data,
/// sorted ascending. This is the ungrouped variant of the diagram. Bounds
/// keep the raw value so fractional hours still land in their own bucket;
/// only the label truncates to whole hours.
pub fn distinct_hour_buckets(records: &[WorklifeRecord]) -> Vec<Bucket> {
    let mut hours: Vec<f64> = records.iter().map(|r| r.work_hours).collect();
    hours.sort_by(f64::total_cmp);
    hours.dedup();
    hours
        .into_iter()
        .map(|h| Bucket::new(h, h, (h as i64).to_string()))
        .collect()
}

/// Bucket table, fixed category order, and color assignments for a flow graph.
///
/// Bucket order and category order are fixed enumerations supplied here; they
/// are never derived from the ordering of the input data.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub buckets: Vec<Bucket>,
    pub categories: Vec<StressLevel>,
    pub bucket_color: String,
    pub category_colors: HashMap<StressLevel, String>,
    pub link_colors: HashMap<StressLevel, String>,
}

impl FlowConfig {
    /// The dashboard's default palette over the decile bucket table.
    pub fn grouped_hours() -> Self {
        Self::with_buckets(decile_buckets())
    }

    /// Default palette over one bucket per distinct hours value.
    pub fn raw_hours(records: &[WorklifeRecord]) -> Self {
        Self::with_buckets(distinct_hour_buckets(records))
    }

    pub fn with_buckets(buckets: Vec<Bucket>) -> Self {
        let category_colors = HashMap::from([
            (StressLevel::Low, "#7ED957".to_string()),
            (StressLevel::Medium, "#FFC107".to_string()),
            (StressLevel::High, "#FF4C4C".to_string()),
        ]);
        let link_colors = HashMap::from([
            (StressLevel::Low, "rgba(126,217,87,0.5)".to_string()),
            (StressLevel::Medium, "rgba(255,193,7,0.5)".to_string()),
            (StressLevel::High, "rgba(255,76,76,0.5)".to_string()),
        ]);

        Self {
            buckets,
            categories: StressLevel::ALL.to_vec(),
            bucket_color: "#4A90E2".to_string(),
            category_colors,
            link_colors,
        }
    }

    /// A category listed in the order without an assigned color is a
    /// programming error in the caller, surfaced before any counting happens.
    pub fn validate(&self) -> Result<(), FlowError> {
        for category in &self.categories {
            if !self.category_colors.contains_key(category) {
                return Err(FlowError::MissingCategoryColor(
                    category.as_str().to_string(),
                ));
            }
            if !self.link_colors.contains_key(category) {
                return Err(FlowError::MissingLinkColor(category.as_str().to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub label: String,
    pub color: String,
}

/// Edge payload inside the graph: how many records flow along it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub value: u64,
    pub color: String,
}

/// A flattened edge with the node indices the renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: u64,
    pub color: String,
}

/// Parallel-array handoff for the sankey renderer: a label list, a node color
/// list, source/target/value arrays, and a link color list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyData {
    pub labels: Vec<String>,
    pub node_colors: Vec<String>,
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<u64>,
    pub link_colors: Vec<String>,
}

/// Directed flow graph from hours buckets to stress categories.
///
/// Nodes are inserted buckets-first then categories, so `NodeIndex::index()`
/// is the renderer-facing node index: bucket index = position in the bucket
/// table, category index = bucket count + position in the category order.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    graph: DiGraph<FlowNode, FlowLink>,
    bucket_count: usize,
}

impl FlowGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn nodes(&self) -> Vec<&FlowNode> {
        self.graph.node_weights().collect()
    }

    pub fn edges(&self) -> Vec<FlowEdge> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .map(|edge| FlowEdge {
                source: edge.source().index(),
                target: edge.target().index(),
                value: edge.weight().value,
                color: edge.weight().color.clone(),
            })
            .collect()
    }

    /// Sum of all edge weights, i.e. the number of records that landed in
    /// some bucket.
    pub fn total_flow(&self) -> u64 {
        self.graph.edge_weights().map(|link| link.value).sum()
    }

    pub fn sankey_data(&self) -> SankeyData {
        let mut labels = Vec::with_capacity(self.node_count());
        let mut node_colors = Vec::with_capacity(self.node_count());
        for node in self.graph.node_weights() {
            labels.push(node.label.clone());
            node_colors.push(node.color.clone());
        }

        let edges = self.edges();
        SankeyData {
            labels,
            node_colors,
            source: edges.iter().map(|e| e.source).collect(),
            target: edges.iter().map(|e| e.target).collect(),
            value: edges.iter().map(|e| e.value).collect(),
            link_colors: edges.into_iter().map(|e| e.color).collect(),
        }
    }
}

/// Build the flow graph: assign each record to a bucket by interval
/// containment, count records per (bucket, category) pair, and emit one edge
/// per non-empty pair. A record whose hours match no bucket, or whose category
/// is absent from the configured order, is excluded rather than an error.
///
/// Pure function of its inputs; identical inputs yield identical graphs.
pub fn build_flow_graph(
    records: &[WorklifeRecord],
    config: &FlowConfig,
) -> Result<FlowGraph, FlowError> {
    config.validate()?;

    let bucket_count = config.buckets.len();
    let mut counts: BTreeMap<(usize, usize), u64> = BTreeMap::new();
    let mut excluded = 0usize;

    for record in records {
        let bucket = config
            .buckets
            .iter()
            .position(|b| b.contains(record.work_hours));
        let category = config
            .categories
            .iter()
            .position(|c| *c == record.stress_level);

        match (bucket, category) {
            (Some(b), Some(c)) => *counts.entry((b, c)).or_insert(0) += 1,
            _ => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!(excluded, "records outside the bucket table were excluded");
    }

    let mut graph = DiGraph::with_capacity(bucket_count + config.categories.len(), counts.len());

    for bucket in &config.buckets {
        graph.add_node(FlowNode {
            label: format!("{} Hours", bucket.label),
            color: config.bucket_color.clone(),
        });
    }
    for category in &config.categories {
        graph.add_node(FlowNode {
            label: format!("{} Stress", category.as_str()),
            // validate() guarantees both color lookups succeed
            color: config.category_colors[category].clone(),
        });
    }

    for ((bucket, category), value) in counts {
        let link_color = config.link_colors[&config.categories[category]].clone();
        graph.add_edge(
            NodeIndex::new(bucket),
            NodeIndex::new(bucket_count + category),
            FlowLink {
                value,
                color: link_color,
            },
        );
    }

    Ok(FlowGraph {
        graph,
        bucket_count,
    })
}
