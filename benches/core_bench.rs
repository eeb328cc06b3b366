//! Benchmarks für die Core-Hotpaths:
//! - Rumpfgenerierung bei steigender Schichtdichte
//! - ObjectBuffer: Hinzufügen, Deaktivieren, Entfernen (Wand-Tool pro Frame)
//! - Zusammenfassen der Bodenplatten beim Export
//! - Stückpforten-Schnitt über alle Rumpfsektionen

use airship_hull_editor::core::identifiers::WallSegmentKey;
use airship_hull_editor::core::packager::concat_deck_plates;
use airship_hull_editor::core::vertex::generate_cube;
use airship_hull_editor::core::{generate_from_profiles, HullProfiles};
use airship_hull_editor::{HullDataManager, HullDefinition, HullOptions, ObjectBuffer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;

fn default_profiles(options: &HullOptions) -> HullProfiles {
    HullDefinition::default()
        .build(options)
        .expect("Standard-Rumpf muss sich bauen lassen")
}

fn bench_hull_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull_generation");
    group.sample_size(20);

    for &primitives in &[3usize, 5, 8] {
        let options = HullOptions {
            primitives_per_deck: primitives,
            ..HullOptions::default()
        };
        let profiles = default_profiles(&options);

        group.bench_with_input(
            BenchmarkId::new("primitives_per_deck", primitives),
            &profiles,
            |b, profiles| {
                b.iter(|| {
                    let geometry = generate_from_profiles(black_box(profiles), &options);
                    black_box(geometry.hull_meshes.len())
                })
            },
        );
    }

    group.finish();
}

fn wall_keys(count: usize) -> Vec<(WallSegmentKey, Vec3)> {
    (0..count)
        .map(|i| {
            let p = Vec3::new((i % 100) as f32 * 0.5, 0.0, (i / 100) as f32 * 0.5);
            (WallSegmentKey::new(p, p + Vec3::X * 0.5), p)
        })
        .collect()
}

fn bench_object_buffer_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_buffer");

    for &count in &[100usize, 1_000, 5_000] {
        let walls = wall_keys(count);

        group.bench_with_input(BenchmarkId::new("add_manual", count), &walls, |b, walls| {
            b.iter(|| {
                let mut buffer = ObjectBuffer::new_manual();
                for (key, p) in walls {
                    buffer.add_mesh(*key, &generate_cube(*p, 0.5, 2.0, 0.1));
                }
                buffer.update_buffers();
                black_box(buffer.len())
            })
        });

        let mut filled = ObjectBuffer::new();
        for (key, p) in &walls {
            filled.add_mesh(*key, &generate_cube(*p, 0.5, 2.0, 0.1));
        }

        group.bench_with_input(
            BenchmarkId::new("toggle_tenth", count),
            &walls,
            |b, walls| {
                b.iter(|| {
                    filled.set_update_manually(true);
                    for (key, _) in walls.iter().step_by(10) {
                        filled.disable_object(key);
                    }
                    for (key, _) in walls.iter().step_by(10) {
                        filled.enable_object(key);
                    }
                    filled.set_update_manually(false);
                    black_box(filled.active_objects())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("remove_tenth", count),
            &walls,
            |b, walls| {
                b.iter(|| {
                    let mut buffer = filled.clone();
                    for (key, _) in walls.iter().step_by(10) {
                        buffer.remove_object(key);
                    }
                    black_box(buffer.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_deck_plate_packing(c: &mut Criterion) {
    let options = HullOptions::default();
    let data = HullDataManager::new(
        generate_from_profiles(&default_profiles(&options), &options),
        &options,
    );
    let plates = data.decks()[0].plates.dump_object_data();

    c.bench_function("concat_deck_plates_deck0", |b| {
        b.iter(|| {
            let mesh = concat_deck_plates(black_box(&plates), options.bounding_box_width);
            black_box(mesh.indices.len())
        })
    });
}

fn bench_hull_cut(c: &mut Criterion) {
    let options = HullOptions::default();
    let mut data = HullDataManager::new(
        generate_from_profiles(&default_profiles(&options), &options),
        &options,
    );
    let port = Vec3::new(25.5, -options.deck_height * 0.5, 0.5);

    c.bench_function("cut_restore_hull", |b| {
        b.iter(|| {
            let cut = data.cut_hull(black_box(port));
            let restored = data.restore_hull(black_box(port));
            black_box(cut + restored)
        })
    });
}

criterion_group!(
    benches,
    bench_hull_generation,
    bench_object_buffer_churn,
    bench_deck_plate_packing,
    bench_hull_cut
);
criterion_main!(benches);
