/// Integration tests for the distance and advisory core
///
/// Run with: cargo test --test integration_tests -- --nocapture

use glosa_advisor::{advise, distance, AdvisoryConfig, AdvisoryKind, Error, GeoPoint, Phase};

fn pt(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("valid coordinates")
}

#[test]
fn test_distance_coincident_points() {
    println!("\n=== Test: Coincident Points ===");
    let samples = [
        (28.6140, 77.2185),
        (0.0, 0.0),
        (90.0, 0.0),
        (-90.0, 180.0),
        (51.4778, -0.0015),
    ];
    for (lat, lng) in samples {
        let p = pt(lat, lng);
        assert_eq!(distance(&p, &p), 0.0, "distance({:?}, itself) not zero", p);
    }
    println!("✓ Coincident points give exactly 0 m");
}

#[test]
fn test_distance_symmetric_and_finite() {
    println!("\n=== Test: Symmetry ===");
    let points = [
        pt(28.6140, 77.2185),
        pt(28.6315, 77.2167),
        pt(-33.8688, 151.2093),
        pt(40.7128, -74.0060),
        pt(0.0, 180.0),
        pt(0.0, 0.0),
        pt(89.9, -45.0),
    ];
    for a in &points {
        for b in &points {
            let ab = distance(a, b);
            let ba = distance(b, a);
            assert!(ab.is_finite() && ab >= 0.0, "bad distance {}", ab);
            assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0), "asymmetric: {} vs {}", ab, ba);
        }
    }
    println!("✓ {} pairs symmetric, finite, non-negative", points.len() * points.len());
}

#[test]
fn test_distance_urban_scale() {
    println!("\n=== Test: Urban Scale ===");
    // Connaught Place to India Gate, roughly 2.4 km
    let d = distance(&pt(28.6315, 77.2167), &pt(28.6129, 77.2295));
    println!("  CP -> India Gate: {:.1} m", d);
    assert!(d > 2_300.0 && d < 2_500.0);

    // 0.001 deg of latitude is about 111 m
    let d = distance(&pt(28.6140, 77.2185), &pt(28.6150, 77.2185));
    assert!((d - 111.19).abs() < 0.5, "got {}", d);
    println!("✓ Urban distances in the expected range");
}

#[test]
fn test_green_example() {
    println!("\n=== Test: Green, 500 m, 40 s ===");
    let a = advise(500.0, 40.0, Phase::Green, &AdvisoryConfig::default()).unwrap();
    println!("  {:.1} km/h: {}", a.recommended_speed_kmh, a.message);
    assert!((a.recommended_speed_kmh - 45.0).abs() < 0.01);
    assert_eq!(a.kind, AdvisoryKind::MaintainSpeed);
    assert!(a.message.starts_with("Maintain"));
}

#[test]
fn test_green_returns_required_speed_below_ceiling() {
    let cfg = AdvisoryConfig::default();
    for (d, t) in [(100.0, 30.0), (250.0, 20.0), (600.0, 30.0), (700.0, 35.0)] {
        let required = d / t * 3.6;
        assert!(required >= cfg.min_speed_kmh && required <= cfg.max_speed_kmh);
        let a = advise(d, t, Phase::Green, &cfg).unwrap();
        assert_eq!(a.kind, AdvisoryKind::MaintainSpeed);
        assert!((a.recommended_speed_kmh - required).abs() < 1e-6);
    }
}

#[test]
fn test_red_example_expects_wait() {
    println!("\n=== Test: Red, 100 m, 2 s ===");
    let cfg = AdvisoryConfig::default();
    let a = advise(100.0, 2.0, Phase::Red, &cfg).unwrap();
    println!("  {:.1} km/h: {}", a.recommended_speed_kmh, a.message);
    assert_eq!(a.recommended_speed_kmh, cfg.max_speed_kmh);
    assert_eq!(a.kind, AdvisoryKind::ExpectWait);
    assert!(a.message.contains("expect to wait"));
}

#[test]
fn test_red_near_zero_time_stays_bounded() {
    println!("\n=== Test: Red, time -> 0+ ===");
    let cfg = AdvisoryConfig::default();
    let mut t = 10.0;
    while t > 1e-12 {
        for d in [6.0, 50.0, 500.0, 5_000.0] {
            let a = advise(d, t, Phase::Red, &cfg).unwrap();
            assert!(a.recommended_speed_kmh.is_finite());
            assert!(a.recommended_speed_kmh >= cfg.min_speed_kmh);
            assert!(a.recommended_speed_kmh <= cfg.max_speed_kmh);
            assert!(!a.message.is_empty());
        }
        t /= 3.0;
    }
    println!("✓ No unbounded speeds as time-to-change shrinks");
}

#[test]
fn test_zero_distance_is_at_junction() {
    let cfg = AdvisoryConfig::default();
    for phase in [Phase::Red, Phase::Green, Phase::Amber] {
        for t in [0.0, 1.0, 30.0, 600.0] {
            let a = advise(0.0, t, phase, &cfg).unwrap();
            assert_eq!(a.kind, AdvisoryKind::AtJunction);
            assert!(a.message.starts_with("At junction"));
        }
    }
}

#[test]
fn test_negative_time_is_invalid_input() {
    let res = advise(100.0, -1.0, Phase::Red, &AdvisoryConfig::default());
    assert!(matches!(res, Err(Error::InvalidInput(_))));
}

#[test]
fn test_outputs_always_bounded_and_deterministic() {
    println!("\n=== Test: Sweep ===");
    let cfg = AdvisoryConfig {
        min_speed_kmh: 5.0,
        max_speed_kmh: 60.0,
        approach_speed_kmh: 20.0,
        ..Default::default()
    };
    let mut count = 0;
    for phase in [Phase::Red, Phase::Green, Phase::Amber] {
        for d in [0.0, 1.0, 5.0, 5.1, 40.0, 150.0, 900.0, 20_000.0] {
            for t in [0.0, 0.2, 0.99, 1.0, 4.0, 30.0, 120.0] {
                let a = advise(d, t, phase, &cfg).unwrap();
                let b = advise(d, t, phase, &cfg).unwrap();
                assert_eq!(a, b, "non-deterministic at d={} t={} {:?}", d, t, phase);
                assert!(
                    a.recommended_speed_kmh >= cfg.min_speed_kmh
                        && a.recommended_speed_kmh <= cfg.max_speed_kmh,
                    "out of bounds: {} at d={} t={} {:?}",
                    a.recommended_speed_kmh,
                    d,
                    t,
                    phase
                );
                assert!(!a.message.is_empty());
                count += 1;
            }
        }
    }
    println!("✓ {} combinations bounded and repeatable", count);
}

#[test]
fn test_end_to_end_from_coordinates() {
    // ~555 m south of a junction, light green for 50 s more: 40 km/h
    let junction = pt(28.6140, 77.2185);
    let vehicle = pt(28.6090, 77.2185);
    let d = distance(&vehicle, &junction);
    let a = advise(d, 50.0, Phase::Green, &AdvisoryConfig::default()).unwrap();
    assert_eq!(a.kind, AdvisoryKind::MaintainSpeed);
    assert!((a.recommended_speed_kmh - d / 50.0 * 3.6).abs() < 1e-9);
    assert!((a.recommended_speed_kmh - 40.0).abs() < 0.5);
}
