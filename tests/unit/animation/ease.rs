use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::Smoothstep, Ease::Smootherstep];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
    assert_eq!(smootherstep(3.0, 7.0, 3.0), 0.0);
    assert_eq!(smootherstep(3.0, 7.0, 7.0), 1.0);
    assert_eq!(smootherstep(-2.5, 10.0, -2.5), 0.0);
    assert_eq!(smootherstep(-2.5, 10.0, 10.0), 1.0);
}

#[test]
fn monotonic_non_decreasing_across_interval() {
    for (a, b) in [(0.0, 1.0), (0.0, 50.0), (-4.0, 9.5)] {
        let mut prev = smootherstep(a, b, a);
        for i in 1..=400 {
            let v = a + (b - a) * (i as f64) / 400.0;
            let cur = smootherstep(a, b, v);
            assert!(cur >= prev, "{cur} < {prev} at value {v} in [{a}, {b}]");
            prev = cur;
        }
    }
}

#[test]
fn clamped_outside_interval() {
    for v in [-1000.0, -0.001, 1.001, 42.0, f64::MAX] {
        let y = smootherstep(0.0, 1.0, v);
        assert!((0.0..=1.0).contains(&y));
    }
    assert_eq!(smootherstep(0.0, 1.0, -3.0), 0.0);
    assert_eq!(smootherstep(0.0, 1.0, 3.0), 1.0);
}

#[test]
fn midpoint_is_half_and_curve_is_symmetric() {
    for ease in ALL {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
        let lo = ease.apply(0.2);
        let hi = ease.apply(0.8);
        assert!((lo + hi - 1.0).abs() < 1e-12);
    }
}

#[test]
fn quintic_is_flatter_than_cubic_near_the_ends() {
    let t = 0.05;
    assert!(Ease::Smootherstep.apply(t) < Ease::Smoothstep.apply(t));
    assert!(Ease::Smoothstep.apply(t) < Ease::Linear.apply(t));
}

#[test]
fn zero_width_interval_is_a_step() {
    assert_eq!(smootherstep(2.0, 2.0, 1.0), 0.0);
    assert_eq!(smootherstep(2.0, 2.0, 2.0), 1.0);
    assert_eq!(smootherstep(2.0, 2.0, 3.0), 1.0);
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let a = smootherstep(0.0, 50.0, 17.0);
    let b = smootherstep(0.0, 50.0, 17.0);
    assert_eq!(a.to_bits(), b.to_bits());
}
