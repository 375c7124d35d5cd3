//! End-to-end engine behavior: caching, batch semantics, persistence.

use std::time::Duration;

use approx::assert_abs_diff_eq;

use hue_engine::{
    AnalyzeOptions, BatchOptions, CacheConfig, CancelToken, Converted, DeltaE, Engine,
    EngineConfig, TargetSpace,
};

fn memory_engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

#[test]
fn repeated_analysis_is_idempotent_and_cached() {
    let engine = memory_engine();
    let options = AnalyzeOptions::default();

    let first = engine.analyze_color("#4682B4", &options).unwrap();
    assert!(!first.cached);

    let second = engine.analyze_color("4682b4", &options).unwrap();
    assert!(second.cached, "second identical request must hit the cache");

    // Identical payload apart from the cached flag, including float bits
    assert_eq!(first.matches, second.matches);
    assert_eq!(first.input, second.input);
    assert_eq!(first.confidence, second.confidence);

    let stats = engine.health().cache;
    assert!(stats.hits >= 1);
}

#[test]
fn algorithms_produce_distinct_cache_entries() {
    let engine = memory_engine();
    for algorithm in [DeltaE::Cie76, DeltaE::Cie94, DeltaE::Ciede2000] {
        let options = AnalyzeOptions {
            algorithm,
            ..AnalyzeOptions::default()
        };
        let analysis = engine.analyze_color("336699", &options).unwrap();
        assert!(!analysis.cached, "{algorithm}: unexpected cross-metric hit");
        assert_eq!(analysis.algorithm, algorithm);
    }
    assert_eq!(engine.health().cache.memory_entries, 3);
}

#[test]
fn persistent_tier_survives_engine_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = || EngineConfig {
        cache: CacheConfig {
            persistent_dir: Some(dir.path().to_path_buf()),
            ..CacheConfig::default()
        },
        ..EngineConfig::default()
    };

    let first = {
        let engine = Engine::new(config()).unwrap();
        engine
            .analyze_color("#B22222", &AnalyzeOptions::default())
            .unwrap()
    };

    // Fresh engine, cold memory tier: the persistent tier must answer
    let engine = Engine::new(config()).unwrap();
    let second = engine
        .analyze_color("#B22222", &AnalyzeOptions::default())
        .unwrap();
    assert!(second.cached);
    assert_eq!(first.matches, second.matches);
}

#[test]
fn batch_preserves_input_order() {
    let engine = memory_engine();
    let inputs: Vec<String> = ["4682B4", "FF0000", "00FF00", "0000FF", "B22222", "FFFFFF"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = engine
        .analyze_batch(&inputs, &BatchOptions::default(), &CancelToken::new())
        .unwrap();

    assert_eq!(report.completed, inputs.len());
    for (input, outcome) in inputs.iter().zip(&report.outcomes) {
        let analysis = outcome.analysis().unwrap();
        assert_eq!(analysis.input.hex, format!("#{input}"));
    }
}

#[test]
fn batch_failure_is_isolated_to_its_slot() {
    let engine = memory_engine();
    let inputs: Vec<String> = ["4682B4", "not-a-color", "00FF00"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = engine
        .analyze_batch(&inputs, &BatchOptions::default(), &CancelToken::new())
        .unwrap();

    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 1);
    assert!(report.outcomes[0].analysis().is_some());
    assert!(report.outcomes[1].analysis().is_none());
    assert!(report.outcomes[2].analysis().is_some());
}

#[test]
fn batch_and_single_paths_agree_bit_for_bit() {
    let engine = memory_engine();
    let options = AnalyzeOptions {
        use_cache: false,
        ..AnalyzeOptions::default()
    };
    let inputs: Vec<String> = ["4682B4", "7FFFD4", "DC143C", "2F4F4F"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = engine
        .analyze_batch(
            &inputs,
            &BatchOptions {
                analyze: options.clone(),
                ..BatchOptions::default()
            },
            &CancelToken::new(),
        )
        .unwrap();

    for (input, outcome) in inputs.iter().zip(&report.outcomes) {
        let from_batch = outcome.analysis().unwrap();
        let single = engine.analyze_color(input, &options).unwrap();
        assert_eq!(single.matches, from_batch.matches, "{input}");
        assert_eq!(single.input.lab, from_batch.input.lab, "{input}");
    }
}

#[test]
fn batch_reuses_cache_across_calls() {
    let engine = memory_engine();
    let inputs: Vec<String> = vec!["4682B4".into(), "FF0000".into()];
    let options = BatchOptions::default();

    engine
        .analyze_batch(&inputs, &options, &CancelToken::new())
        .unwrap();
    let report = engine
        .analyze_batch(&inputs, &options, &CancelToken::new())
        .unwrap();

    for outcome in &report.outcomes {
        assert!(outcome.analysis().unwrap().cached);
    }
}

#[test]
fn batch_deadline_does_not_fail_items() {
    // An elapsed budget only bypasses the persistent tier; items still
    // compute and complete.
    let engine = memory_engine();
    let options = BatchOptions {
        deadline: Some(Duration::ZERO),
        ..BatchOptions::default()
    };
    let inputs: Vec<String> = vec!["4682B4".into()];
    let report = engine
        .analyze_batch(&inputs, &options, &CancelToken::new())
        .unwrap();
    assert_eq!(report.completed, 1);
}

#[test]
fn convert_round_trip_through_lab() {
    let engine = memory_engine();
    let lab = match engine.convert("#4682B4", TargetSpace::Lab).unwrap() {
        Converted::Lab(lab) => lab,
        other => panic!("expected LAB, got {other:?}"),
    };
    assert_abs_diff_eq!(lab.l, 52.3, epsilon = 1.0);
    assert_abs_diff_eq!(lab.b, -32.2, epsilon = 1.0);
}

#[test]
fn custom_reference_set() {
    let entries = vec![
        hue_core::ReferenceEntry::new(
            0,
            "target",
            hue_core::Rgb::new(72, 118, 180),
            hue_convert::rgb_to_lab(hue_core::Rgb::new(72, 118, 180)),
        ),
        hue_core::ReferenceEntry::new(
            1,
            "navy",
            hue_core::Rgb::new(0, 0, 128),
            hue_convert::rgb_to_lab(hue_core::Rgb::new(0, 0, 128)),
        ),
    ];
    let engine = Engine::with_entries(EngineConfig::default(), entries).unwrap();
    let analysis = engine
        .analyze_color("#4682B4", &AnalyzeOptions::default())
        .unwrap();
    assert_eq!(analysis.matches[0].name, "target");
    assert!(analysis.matches[0].distance > 1.0 && analysis.matches[0].distance < 4.0);
}

#[test]
fn empty_reference_set_rejected() {
    let err = Engine::with_entries(EngineConfig::default(), Vec::new()).unwrap_err();
    assert!(err.is_misuse());
}

#[test]
fn cache_invalidation_forces_recompute() {
    let engine = memory_engine();
    let options = AnalyzeOptions::default();
    engine.analyze_color("4682B4", &options).unwrap();
    engine.invalidate_cache();
    let again = engine.analyze_color("4682B4", &options).unwrap();
    assert!(!again.cached);
}
