// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Batch search example.
//!
//! Demonstrates:
//! 1. Declaring an index
//! 2. Building an extended-syntax query with the fluent builder
//! 3. Adding filters, grouping and limits
//! 4. Running two queries in one batch
//! 5. Reading results and the captured metrics
//!
//! The in-memory connection stands in for searchd, so no server is needed.
//!
//! # Run
//!
//! ```bash
//! cargo run --example batch_search
//! ```

use std::collections::BTreeMap;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use serde_json::json;
use sphinx_search::connection::memory::MemoryConnection;
use sphinx_search::connection::SettingsProvider;
use sphinx_search::filter::{FilterAttribute, FilterRange};
use sphinx_search::query::{GroupFunction, SortMode};
use sphinx_search::result::{RawMatch, RawResult, WordStats};
use sphinx_search::{SearchIndex, SearchManager, SearchQuery, ServerSettings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_target(false)
        .compact()
        .init();

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Index definition
    // ─────────────────────────────────────────────────────────────────────────
    let people = SearchIndex::new("people")
        .fields(["name", "address"])
        .attributes(["age", "gender_id", "tags"])
        .with_wildcard_support(true)
        .shared();

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Keyword query via the builder
    // ─────────────────────────────────────────────────────────────────────────
    let mut named = SearchQuery::new(&people);
    named
        .create_query_builder()
        .in_field(Some("name,address"), None)?
        .where_field()
        .contains_one_of(["jim alex", "bob"])
        .contains_strict_order_of(["bob", "alex smith"])
        .end()
        .end()
        .not_in(Some("address"), Some(30))?
        .where_field()
        .contains(["plymouth"]);

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Filters, grouping, sorting, limits
    // ─────────────────────────────────────────────────────────────────────────
    named
        .add_filter(FilterRange::new("age", 18, 65))
        .add_filter(FilterAttribute::new("gender_id", vec![1, 2]))
        .add_sort_by(SortMode::Advanced, "@weight DESC, age ASC")
        .limit(0, 20, 1000);

    let mut wildcard = SearchQuery::new(&people);
    wildcard.create_wildcard_query_string("bob smith");
    wildcard.add_group_by("gender_id", GroupFunction::Attribute, None)?;

    println!("query 1: {named}");
    println!("query 2: {wildcard}");

    // ─────────────────────────────────────────────────────────────────────────
    // 4. One batch, one round trip
    // ─────────────────────────────────────────────────────────────────────────
    let provider = SettingsProvider::new(ServerSettings::default(), || {
        Ok(MemoryConnection::new()
            .with_result(1, sample_payload())
            .with_result(2, RawResult { total_found: Some(0), ..Default::default() }))
    });
    let mut manager = SearchManager::new(provider);

    let named_id = manager.add_query(named)?;
    let wildcard_id = manager.add_query(wildcard)?;
    let results = manager.search()?;

    // ─────────────────────────────────────────────────────────────────────────
    // 5. Results
    // ─────────────────────────────────────────────────────────────────────────
    if let Some(set) = results.get(&named_id) {
        println!(
            "\n{} of {} matches in {}ms",
            set.len(),
            set.total_results(),
            set.execution_time()
        );
        for record in set.iter() {
            let age = record.attribute("age").cloned().unwrap_or(json!(null));
            println!("  #{} weight={} age={}", record.id(), record.weight(), age);
        }
        println!("  tags: {:?}", set.flattened_attribute("tags"));
        for (word, stats) in set.match_statistics() {
            println!("  '{word}' in {} docs, {} hits", stats.docs, stats.hits);
        }
    }
    if let Some(set) = results.get(&wildcard_id) {
        println!("\nwildcard query matched {} documents", set.total_results());
    }

    dump_metrics(&snapshotter);
    Ok(())
}

fn sample_payload() -> RawResult {
    RawResult {
        matches: Some(vec![
            RawMatch::new(12, 2400).with_attr("age", 34).with_attr("tags", json!([1, 3])),
            RawMatch::new(7, 1700).with_attr("age", 29).with_attr("tags", json!([3, 5])),
        ]),
        time: Some(4),
        total_found: Some(2),
        words: Some(BTreeMap::from([
            ("bob".to_string(), WordStats { docs: 2, hits: 3 }),
            ("plymouth".to_string(), WordStats { docs: 1, hits: 1 }),
        ])),
    }
}

/// Print captured metrics
fn dump_metrics(snapshotter: &Snapshotter) {
    println!("\nmetrics:");
    for (composite_key, _, _, value) in snapshotter.snapshot().into_vec() {
        let (_, key) = composite_key.into_parts();
        let labels: Vec<_> = key.labels().map(|l| format!("{}={}", l.key(), l.value())).collect();
        let labels = if labels.is_empty() { String::new() } else { format!("{{{}}}", labels.join(",")) };

        match value {
            DebugValue::Counter(v) => println!("  {}{} = {}", key.name(), labels, v),
            DebugValue::Gauge(v) => println!("  {}{} = {:.2}", key.name(), labels, v.into_inner()),
            DebugValue::Histogram(samples) => {
                let sum: f64 = samples.iter().map(|v| v.into_inner()).sum();
                println!("  {}{} count={} sum={:.4}", key.name(), labels, samples.len(), sum);
            }
        }
    }
}
