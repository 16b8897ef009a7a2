//! Benchmarks for model derivations.
//!
//! Run with: cargo bench --bench graph_benchmarks

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use garden::domain::{Note, NoteId};
use garden::model::{
    BacklinkOptions, NoteCollection, build_graph, build_tree, compute_backlinks, extract_links,
};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Sample words for generating realistic note titles and content
const WORDS: &[&str] = &[
    "compost",
    "seedling",
    "pruning",
    "mulch",
    "trellis",
    "perennial",
    "cutting",
    "grafting",
    "watering",
    "harvest",
    "soil",
    "nitrogen",
    "pollinator",
    "rootstock",
    "canopy",
    "hedgerow",
    "greenhouse",
    "raised-bed",
    "drip-line",
    "cold-frame",
];

fn title_of(index: usize) -> String {
    format!("Note {} {}", index, WORDS[index % WORDS.len()])
}

/// Builds a collection of `count` notes with a branching hierarchy and a
/// deterministic spread of wikilinks.
fn generate_collection(count: usize) -> NoteCollection {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let ids: Vec<NoteId> = (0..count).map(|_| NoteId::new()).collect();

    let notes: Vec<Note> = (0..count)
        .map(|i| {
            // Roughly 10 children per parent; note 0 is the sole root
            let parent = if i == 0 {
                None
            } else {
                Some(ids[(i - 1) / 10].clone())
            };

            // Three outbound links per note, one of which dangles
            let content = format!(
                "Notes on {}. See [[{}]] and [[{}]], also [[Missing {}]].",
                WORDS[i % WORDS.len()],
                title_of((i * 7) % count),
                title_of((i * 13) % count),
                i,
            );

            Note::builder(ids[i].clone(), title_of(i), now, now)
                .content(content)
                .parent(parent)
                .build()
                .expect("generated note is valid")
        })
        .collect();

    NoteCollection::from_notes(notes)
}

// =============================================================================
// Derivation Benchmarks
// =============================================================================

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");

    for size in [100, 500, 1000] {
        let collection = generate_collection(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| build_tree(&collection));
        });
    }

    group.finish();
}

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");

    for size in [100, 500, 1000] {
        let collection = generate_collection(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| build_graph(&collection));
        });
    }

    group.finish();
}

fn bench_compute_backlinks(c: &mut Criterion) {
    let collection = generate_collection(1000);
    let target = collection.notes()[0].id().clone();

    let mut group = c.benchmark_group("compute_backlinks");

    group.bench_function("single_target", |b| {
        b.iter(|| compute_backlinks(&collection, &target, BacklinkOptions::default()));
    });

    group.bench_function("all_targets", |b| {
        b.iter(|| {
            for note in collection.iter() {
                let _ = compute_backlinks(&collection, note.id(), BacklinkOptions::default());
            }
        });
    });

    group.finish();
}

fn bench_extract_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_links");

    let sparse = "A paragraph with no links at all, just prose about the garden.".repeat(20);
    group.bench_function("no_links", |b| b.iter(|| extract_links(&sparse)));

    let dense: String = (0..50)
        .map(|i| format!("See [[Note {i}]] for more. "))
        .collect();
    group.bench_function("dense_links", |b| b.iter(|| extract_links(&dense)));

    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    model_benches,
    bench_build_tree,
    bench_build_graph,
    bench_compute_backlinks,
    bench_extract_links,
);

criterion_main!(model_benches);
