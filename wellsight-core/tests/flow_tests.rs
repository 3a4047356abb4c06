// Tests for flow-graph construction

use wellsight_core::flow::{
    Bucket, FlowConfig, FlowError, build_flow_graph, decile_buckets, distinct_hour_buckets,
};
use wellsight_ingest::records::{StressLevel, WorklifeRecord};

fn rec(work_hours: f64, stress_level: StressLevel) -> WorklifeRecord {
    WorklifeRecord {
        work_hours,
        stress_level,
    }
}

fn two_bucket_config() -> FlowConfig {
    FlowConfig::with_buckets(vec![
        Bucket::new(0.0, 10.0, "0-10"),
        Bucket::new(11.0, 20.0, "11-20"),
    ])
}

// ============================================================================
// Bucket Table Tests
// ============================================================================

#[test]
fn test_decile_bucket_table() {
    let buckets = decile_buckets();

    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[0].label, "0-10");
    assert_eq!(buckets[0].lower, 0.0);
    assert_eq!(buckets[0].upper, 10.0);
    assert_eq!(buckets[1].label, "11-20");
    assert_eq!(buckets[1].lower, 11.0);
    assert_eq!(buckets[9].label, "91-100");
    assert_eq!(buckets[9].upper, 100.0);
}

#[test]
fn test_bucket_contains_is_closed_on_both_ends() {
    let bucket = Bucket::new(0.0, 10.0, "0-10");

    assert!(bucket.contains(0.0));
    assert!(bucket.contains(10.0));
    assert!(bucket.contains(5.5));
    assert!(!bucket.contains(10.5));
    assert!(!bucket.contains(-0.1));
}

#[test]
fn test_distinct_hour_buckets_sorted_and_deduped() {
    let records = vec![
        rec(40.0, StressLevel::Low),
        rec(35.0, StressLevel::High),
        rec(40.0, StressLevel::Medium),
        rec(52.0, StressLevel::Low),
    ];

    let buckets = distinct_hour_buckets(&records);

    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].label, "35");
    assert_eq!(buckets[1].label, "40");
    assert_eq!(buckets[2].label, "52");
    assert_eq!(buckets[1].lower, 40.0);
    assert_eq!(buckets[1].upper, 40.0);
}

// ============================================================================
// Graph Construction Tests
// ============================================================================

#[test]
fn test_two_bucket_example() {
    let records = vec![
        rec(5.0, StressLevel::Low),
        rec(5.0, StressLevel::Low),
        rec(15.0, StressLevel::Low),
    ];

    let graph = build_flow_graph(&records, &two_bucket_config()).unwrap();

    // 2 bucket nodes + 3 category nodes
    assert_eq!(graph.node_count(), 5);
    let labels: Vec<&str> = graph.nodes().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "0-10 Hours",
            "11-20 Hours",
            "Low Stress",
            "Medium Stress",
            "High Stress"
        ]
    );

    let edges = graph.edges();
    assert_eq!(edges.len(), 2);
    assert_eq!((edges[0].source, edges[0].target, edges[0].value), (0, 2, 2));
    assert_eq!((edges[1].source, edges[1].target, edges[1].value), (1, 2, 1));
}

#[test]
fn test_unused_categories_produce_no_edges() {
    let records = vec![rec(5.0, StressLevel::Low), rec(15.0, StressLevel::Low)];

    let graph = build_flow_graph(&records, &two_bucket_config()).unwrap();

    // Medium and High nodes exist but carry no edges
    assert_eq!(graph.node_count(), 5);
    assert!(graph.edges().iter().all(|e| e.target == 2));
}

#[test]
fn test_every_observed_pair_gets_one_edge() {
    let records = vec![
        rec(5.0, StressLevel::Low),
        rec(5.0, StressLevel::High),
        rec(15.0, StressLevel::Low),
    ];

    let graph = build_flow_graph(&records, &two_bucket_config()).unwrap();

    let edges = graph.edges();
    assert_eq!(edges.len(), 3);
    assert_eq!((edges[0].source, edges[0].target, edges[0].value), (0, 2, 1));
    assert_eq!((edges[1].source, edges[1].target, edges[1].value), (0, 4, 1));
    assert_eq!((edges[2].source, edges[2].target, edges[2].value), (1, 2, 1));
}

#[test]
fn test_edge_indices_stay_in_their_ranges() {
    let records: Vec<WorklifeRecord> = (0..100)
        .map(|i| {
            rec(
                (i % 95) as f64,
                StressLevel::ALL[(i % 3) as usize],
            )
        })
        .collect();
    let config = FlowConfig::grouped_hours();
    let bucket_count = config.buckets.len();

    let graph = build_flow_graph(&records, &config).unwrap();

    assert_eq!(graph.bucket_count(), bucket_count);
    assert_eq!(graph.node_count(), bucket_count + StressLevel::ALL.len());
    for edge in graph.edges() {
        assert!(edge.source < bucket_count);
        assert!(edge.target >= bucket_count);
        assert!(edge.target < graph.node_count());
    }
}

#[test]
fn test_weight_sum_equals_in_bucket_record_count() {
    let records = vec![
        rec(5.0, StressLevel::Low),
        rec(42.0, StressLevel::Medium),
        rec(88.0, StressLevel::High),
        rec(150.0, StressLevel::Low), // outside every bucket
    ];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();

    assert_eq!(graph.total_flow(), 3);
}

#[test]
fn test_upper_bound_belongs_to_lower_bucket() {
    let records = vec![rec(10.0, StressLevel::Low)];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();

    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].source, 0);
}

#[test]
fn test_domain_floor_is_inclusive() {
    let records = vec![rec(0.0, StressLevel::Medium)];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();

    assert_eq!(graph.edges()[0].source, 0);
    assert_eq!(graph.total_flow(), 1);
}

#[test]
fn test_gap_value_is_excluded_not_an_error() {
    // 10.5 sits between the "0-10" and "11-20" integer bounds
    let records = vec![rec(10.5, StressLevel::Low)];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();

    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.total_flow(), 0);
    // Nodes still emitted in full
    assert_eq!(graph.node_count(), 13);
}

#[test]
fn test_build_is_idempotent() {
    let records = vec![
        rec(5.0, StressLevel::Low),
        rec(37.0, StressLevel::Medium),
        rec(61.0, StressLevel::High),
        rec(61.0, StressLevel::High),
    ];
    let config = FlowConfig::grouped_hours();

    let first = build_flow_graph(&records, &config).unwrap();
    let second = build_flow_graph(&records, &config).unwrap();

    assert_eq!(first.sankey_data(), second.sankey_data());
}

#[test]
fn test_empty_records_build_nodes_only() {
    let graph = build_flow_graph(&[], &FlowConfig::grouped_hours()).unwrap();

    assert_eq!(graph.node_count(), 13);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.total_flow(), 0);
}

// ============================================================================
// Configuration Error Tests
// ============================================================================

#[test]
fn test_missing_category_color_fails_fast() {
    let mut config = FlowConfig::grouped_hours();
    config.category_colors.remove(&StressLevel::High);

    let result = build_flow_graph(&[rec(5.0, StressLevel::Low)], &config);

    assert!(matches!(result, Err(FlowError::MissingCategoryColor(_))));
}

#[test]
fn test_missing_link_color_fails_fast() {
    let mut config = FlowConfig::grouped_hours();
    config.link_colors.remove(&StressLevel::Medium);

    let result = build_flow_graph(&[], &config);

    match result {
        Err(FlowError::MissingLinkColor(category)) => assert_eq!(category, "Medium"),
        other => panic!("expected MissingLinkColor, got {:?}", other.map(|g| g.node_count())),
    }
}

// ============================================================================
// Sankey Handoff Tests
// ============================================================================

#[test]
fn test_sankey_arrays_are_parallel() {
    let records = vec![
        rec(5.0, StressLevel::Low),
        rec(25.0, StressLevel::Medium),
        rec(45.0, StressLevel::High),
    ];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();
    let data = graph.sankey_data();

    assert_eq!(data.labels.len(), graph.node_count());
    assert_eq!(data.node_colors.len(), graph.node_count());
    assert_eq!(data.source.len(), graph.edge_count());
    assert_eq!(data.target.len(), graph.edge_count());
    assert_eq!(data.value.len(), graph.edge_count());
    assert_eq!(data.link_colors.len(), graph.edge_count());
}

#[test]
fn test_default_palette_applied() {
    let records = vec![rec(5.0, StressLevel::Low)];

    let graph = build_flow_graph(&records, &FlowConfig::grouped_hours()).unwrap();
    let data = graph.sankey_data();

    // Every bucket node carries the shared hours color
    assert!(data.node_colors[..10].iter().all(|c| c == "#4A90E2"));
    assert_eq!(data.node_colors[10], "#7ED957");
    assert_eq!(data.node_colors[11], "#FFC107");
    assert_eq!(data.node_colors[12], "#FF4C4C");
    assert_eq!(data.link_colors[0], "rgba(126,217,87,0.5)");
}

#[test]
fn test_ungrouped_flow_graph() {
    let records = vec![
        rec(35.0, StressLevel::Low),
        rec(40.0, StressLevel::Medium),
        rec(40.0, StressLevel::High),
    ];

    let config = FlowConfig::raw_hours(&records);
    let graph = build_flow_graph(&records, &config).unwrap();

    assert_eq!(graph.bucket_count(), 2);
    assert_eq!(graph.node_count(), 5);
    let labels: Vec<&str> = graph.nodes().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels[0], "35 Hours");
    assert_eq!(labels[1], "40 Hours");
    assert_eq!(graph.total_flow(), 3);
}

#[test]
fn test_ungrouped_counts_fractional_hours() {
    let records = vec![
        rec(37.5, StressLevel::Medium),
        rec(37.5, StressLevel::Medium),
        rec(37.0, StressLevel::Low),
    ];

    let config = FlowConfig::raw_hours(&records);
    let graph = build_flow_graph(&records, &config).unwrap();

    // 37.0 and 37.5 are distinct buckets even though both display as "37"
    assert_eq!(graph.bucket_count(), 2);
    let labels: Vec<&str> = graph.nodes().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels[0], "37 Hours");
    assert_eq!(labels[1], "37 Hours");
    assert_eq!(graph.total_flow(), 3);

    let edges = graph.edges();
    assert_eq!(edges.len(), 2);
    assert_eq!((edges[0].source, edges[0].target, edges[0].value), (0, 2, 1));
    assert_eq!((edges[1].source, edges[1].target, edges[1].value), (1, 3, 2));
}
