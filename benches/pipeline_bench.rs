//! Full-pipeline cost for a single fit and for a batch, sequential vs parallel.
//!
//! Run with: `cargo bench --bench pipeline`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dogma_engine::data::{
    AttributeDefinition, EffectDefinition, MemoryCatalog, ModifierDomain, ModifierFunc,
    ModifierRule, SlotKind,
};
use dogma_engine::dogma::{ActivationState, CalculationRequest};
use dogma_engine::parallel::{calculate_all, calculate_batch, WorkerPool};
use dogma_engine::{calculate, EngineConfig, Fit, Skills};

const HULL: i32 = 1;
const MODULE_BASE: i32 = 100;
const SKILL_BASE: i32 = 1000;
const STATS: i32 = 24;

/// Synthetic catalog: every module boosts every hull stat, every skill boosts every module.
fn catalog() -> MemoryCatalog {
    let config = EngineConfig::default();
    let mut catalog = MemoryCatalog::new()
        .with_group(10, 6)
        .with_group(20, 7)
        .with_group(30, 16)
        .with_type(HULL, 10)
        .with_type_attributes(HULL, &[(config.capacitor_peak_delta, -1.0)]);

    let hull_stats: Vec<(i32, f64)> = (0..STATS).map(|stat| (stat, 100.0)).collect();
    catalog = catalog.with_type_attributes(HULL, &hull_stats);
    for stat in 0..STATS {
        catalog = catalog.with_attribute(
            stat,
            AttributeDefinition {
                stackable: stat % 2 == 0,
                ..AttributeDefinition::default()
            },
        );
    }

    for module in 0..8 {
        let type_id = MODULE_BASE + module;
        let rules = (0..STATS)
            .map(|stat| {
                ModifierRule::new(ModifierFunc::ItemModifier, ModifierDomain::Ship, 6, 500, stat)
            })
            .collect();
        catalog = catalog
            .with_type(type_id, 20)
            .with_type_attributes(type_id, &[(500, 5.0 + module as f64), (600, 1.0)])
            .with_type_effects(type_id, &[12, type_id])
            .with_effect(type_id, EffectDefinition::new(0, rules));
    }

    for skill in 0..16 {
        let type_id = SKILL_BASE + skill;
        catalog = catalog
            .with_type(type_id, 30)
            .with_type_attributes(type_id, &[(280, 0.0), (700, 2.0)])
            .with_type_effects(type_id, &[type_id])
            .with_effect(
                type_id,
                EffectDefinition::new(
                    0,
                    vec![ModifierRule::new(
                        ModifierFunc::LocationGroupModifier,
                        ModifierDomain::Ship,
                        2,
                        700,
                        500,
                    )
                    .with_group(20)],
                ),
            );
    }
    catalog
}

fn fit() -> Fit {
    (0..8).fold(Fit::new(HULL), |fit, module| {
        fit.with_module(
            MODULE_BASE + module,
            SlotKind::High,
            module as usize,
            ActivationState::Active,
            None,
        )
    })
}

fn skills() -> Skills {
    (0..16).map(|skill| (SKILL_BASE + skill, 5)).collect()
}

fn bench_single_fit(c: &mut Criterion) {
    let catalog = catalog();
    let fit = fit();
    let skills = skills();
    let config = EngineConfig::default();

    c.bench_function("calculate_fit", |b| {
        b.iter(|| black_box(calculate(&catalog, &fit, &skills, &config)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let catalog = catalog();
    let config = EngineConfig::default();
    let requests: Vec<CalculationRequest> = (0..64)
        .map(|_| CalculationRequest::new(fit(), skills()))
        .collect();

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(calculate_all(&catalog, &requests, &config)))
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            black_box(calculate_batch(
                &catalog,
                &requests,
                &config,
                &WorkerPool::default_workers(),
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_fit, bench_batch);
criterion_main!(benches);
