//! Integration tests for registration, activation and execution.

use hotswap_toggle::prelude::*;
use hotswap_toggle::sources::{ArgsSource, EnvSource, MapSource, SourceChain};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Variants that record which one ran.
fn recording_variants(count: usize) -> (Vec<Variant>, Arc<Vec<AtomicUsize>>) {
    let hits: Arc<Vec<AtomicUsize>> = Arc::new((0..count).map(|_| AtomicUsize::new(0)).collect());
    let variants = (0..count)
        .map(|index| {
            let hits = Arc::clone(&hits);
            variant(move || {
                hits[index].fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
        .collect();
    (variants, hits)
}

fn counts(hits: &[AtomicUsize]) -> Vec<usize> {
    hits.iter().map(|h| h.load(Ordering::SeqCst)).collect()
}

#[test]
fn test_feature_scenario() {
    let registry: ToggleRegistry = ToggleRegistry::new();
    let (variants, hits) = recording_variants(3);
    registry.add("feature", variants).unwrap();

    registry.execute("feature").unwrap().unwrap();
    assert_eq!(counts(&hits), vec![1, 0, 0]);

    registry.toggle("feature", 2).unwrap();
    registry.execute("feature").unwrap().unwrap();
    assert_eq!(counts(&hits), vec![1, 0, 1]);

    assert!(matches!(
        registry.toggle("feature", 5),
        Err(ToggleError::OutOfBounds { index: 5, len: 3, .. })
    ));
    registry.execute("feature").unwrap().unwrap();
    assert_eq!(counts(&hits), vec![1, 0, 2]);
}

#[test]
fn test_early_toggle_scenario() {
    let registry: ToggleRegistry = ToggleRegistry::new();
    registry.toggle("f2", 1).unwrap();

    let (variants, hits) = recording_variants(2);
    registry.add("f2", variants).unwrap();
    registry.execute("f2").unwrap().unwrap();

    assert_eq!(counts(&hits), vec![0, 1]);
}

#[test]
fn test_execute_and_toggle_sequence() {
    let registry = ToggleRegistry::new();
    assert_eq!(
        registry.execute("sequence"),
        Err(ToggleError::NotFound("sequence".to_string()))
    );

    // Out of bounds for the eventual three variants, accepted while unknown
    registry.toggle("sequence", 4).unwrap();
    registry
        .add(
            "sequence",
            [variant(|| "1"), variant(|| "2"), variant(|| "3")],
        )
        .unwrap();
    assert_eq!(registry.execute("sequence").unwrap(), "1");

    for (index, expected) in ["1", "2", "3"].into_iter().enumerate() {
        registry.toggle("sequence", index).unwrap();
        assert_eq!(registry.execute("sequence").unwrap(), expected);
    }

    assert!(registry.toggle("sequence", 3).is_err());
    assert_eq!(registry.execute("sequence").unwrap(), "3");
}

#[test]
fn test_variant_failures_are_not_wrapped() {
    #[derive(Debug, PartialEq)]
    struct Declined(u32);

    let registry = ToggleRegistry::new();
    registry
        .add(
            "payment",
            [variant(|| Ok("charged")), variant(|| Err(Declined(51)))],
        )
        .unwrap();
    registry.toggle("payment", 1).unwrap();

    assert_eq!(registry.execute("payment"), Ok(Err(Declined(51))));
    assert_eq!(registry.run("payment", Vec::new()), Ok(Err(Declined(51))));
}

#[test]
fn test_run_registers_then_reuses() {
    let registry = ToggleRegistry::new();

    assert_eq!(registry.run("run", [variant(|| 1), variant(|| 2)]), Ok(1));
    registry.toggle("run", 1).unwrap();
    assert_eq!(registry.run("run", [variant(|| 20), variant(|| 10)]), Ok(2));
    assert_eq!(registry.options("run"), Ok(2));
}

#[test]
fn test_run_with_arguments() {
    // `app -TExampleRun 1`
    let registry = ToggleRegistry::builder()
        .with_args(["-TExampleRun", "1"])
        .build()
        .unwrap();

    registry
        .add("ExampleRun", [variant(|| "1"), variant(|| "2")])
        .unwrap();
    assert_eq!(registry.execute("ExampleRun").unwrap(), "2");

    registry.toggle("ExampleRun", 0).unwrap();
    assert_eq!(registry.execute("ExampleRun").unwrap(), "1");

    // Already registered: the swapped variants are ignored
    assert_eq!(
        registry
            .run("ExampleRun", [variant(|| "2"), variant(|| "1")])
            .unwrap(),
        "1"
    );
}

#[test]
fn test_configuration_precedence() {
    let env = EnvSource::from_vars(
        "TOGGLEABLE",
        [
            ("TOGGLEABLE_BOTH", "1"),
            ("TOGGLEABLE_ENVONLY", "2"),
            ("TOGGLEABLE_GARBAGE", "many"),
        ],
    )
    .unwrap();
    let args = ArgsSource::parse(["-Tboth", "2"]);
    let defaults = MapSource::new().with_value("garbage", 1);

    let registry = ToggleRegistry::with_sources(
        SourceChain::new()
            .with_source(env)
            .with_source(args)
            .with_source(defaults),
    );

    let three = || [variant(|| 0), variant(|| 1), variant(|| 2)];
    registry.add("both", three()).unwrap();
    registry.add("envonly", three()).unwrap();
    registry.add("garbage", three()).unwrap();
    registry.add("unset", three()).unwrap();

    assert_eq!(registry.execute("both"), Ok(2));
    assert_eq!(registry.execute("envonly"), Ok(2));
    // Unparsable env value falls through to the lower-priority default
    assert_eq!(registry.execute("garbage"), Ok(1));
    assert_eq!(registry.execute("unset"), Ok(0));
}

#[test]
fn test_explicit_toggle_beats_configuration() {
    let registry = ToggleRegistry::builder()
        .with_args(["-Tfeature", "1"])
        .build()
        .unwrap();

    registry.toggle("feature", 2).unwrap();
    registry
        .add("feature", [variant(|| 0), variant(|| 1), variant(|| 2)])
        .unwrap();

    assert_eq!(registry.execute("feature"), Ok(2));
}

#[test]
fn test_independent_registries() {
    let first = ToggleRegistry::new();
    let second = ToggleRegistry::new();

    first.add("shared", [variant(|| 'a'), variant(|| 'b')]).unwrap();
    second.add("shared", [variant(|| 'a'), variant(|| 'b')]).unwrap();
    first.toggle("shared", 1).unwrap();

    assert_eq!(first.execute("shared"), Ok('b'));
    assert_eq!(second.execute("shared"), Ok('a'));
}

#[test]
fn test_global_registry_is_shared() {
    let registry = ToggleRegistry::global();
    registry
        .add(
            "test_global_registry_is_shared",
            [variant(|| Ok(())), variant(|| Err("second".into()))],
        )
        .unwrap();

    assert!(std::ptr::eq(registry, ToggleRegistry::global()));
    assert!(ToggleRegistry::global().contains("test_global_registry_is_shared"));
}

#[test]
fn test_snapshot_serializes() {
    let registry = ToggleRegistry::new();
    registry.add("on", [variant(|| ()), variant(|| ())]).unwrap();
    registry.toggle("on", 1).unwrap();
    registry.toggle("off", 0).unwrap();

    let json = serde_json::to_string(&registry.snapshot()).unwrap();
    assert_eq!(
        json,
        r#"{"toggleables":[{"name":"on","active":1,"options":2}],"pending":{"off":0}}"#
    );
}
