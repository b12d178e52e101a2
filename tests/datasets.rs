use ferrite_playground::data::{circles, moons, plane, sinc, spirals, xor};
use ferrite_playground::{DatasetKind, DatasetParams, SeededUniform, TaskKind};

#[test]
fn seeded_uniform_matches_park_miller() {
    let mut uniform = SeededUniform::new(1);
    // 16807^1 mod (2^31 - 1), then 16807^2.
    assert_eq!(uniform.next_f64(), 16807.0 / 2147483647.0);
    assert_eq!(uniform.next_f64(), 282475249.0 / 2147483647.0);
}

#[test]
fn xor_placement_is_reproducible_from_seed() {
    let a = xor(60, 0.0, Some(123));
    let b = xor(60, 0.0, Some(123));
    let c = xor(60, 0.0, Some(124));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn noisy_xor_is_still_reproducible() {
    assert_eq!(xor(30, 0.5, Some(9)), xor(30, 0.5, Some(9)));
    assert_eq!(xor(30, 0.5, None), xor(30, 0.5, Some(42)));
}

#[test]
fn circles_differ_between_calls_when_noisy() {
    let a = circles(50, 0.5, Some(1));
    let b = circles(50, 0.5, Some(1));
    assert_ne!(a, b);
}

#[test]
fn moons_emit_both_classes() {
    let ds = moons(50, 0.1, None);
    assert_eq!(ds.len(), 100);
    assert_eq!(ds.task, TaskKind::Classification);
    assert!(ds.points.iter().all(|p| p.target == 0.0 || p.target == 1.0));
    assert_eq!(ds.class_counts(), (50, 50));
}

#[test]
fn classification_sets_double_count_regression_sets_do_not() {
    assert_eq!(spirals(25, 0.0, None).len(), 50);
    assert_eq!(sinc(25, 0.0, None).len(), 25);
    assert_eq!(plane(25, 0.0, None).len(), 25);
}

#[test]
fn zero_count_yields_empty_sets() {
    for kind in DatasetKind::ALL {
        let ds = kind.generate(0, 0.2, Some(3));
        assert!(ds.is_empty(), "{kind} should be empty");
    }
}

#[test]
fn params_parse_from_json() {
    let params: DatasetParams =
        serde_json::from_str(r#"{"kind":"spirals","count":10,"noise":0.0}"#).unwrap();
    let ds = params.generate();
    assert_eq!(ds.name, "spirals");
    assert_eq!(ds.len(), 20);
}

#[test]
fn xor_is_balanced_for_seeds_that_wrap_to_zero() {
    let modulus = 2_147_483_647_i64;
    for seed in [-(modulus - 1), 1 - 2 * modulus, modulus] {
        let ds = xor(40, 0.2, Some(seed));
        assert_eq!(ds.len(), 80, "seed {seed}");
        assert_eq!(ds.class_counts(), (40, 40), "seed {seed}");
    }
}

#[test]
fn seeds_congruent_mod_the_modulus_share_a_sequence() {
    let modulus = 2_147_483_647_i64;
    let mut a = SeededUniform::new(-(modulus - 1));
    let mut b = SeededUniform::new(1);
    assert_eq!(a.next_f64(), b.next_f64());
}
