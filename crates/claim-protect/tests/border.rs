//! Border rendering against a scripted host.

mod common;

use claim_protect::prelude::*;
use claim_protect::{BorderConfig, BorderRenderer, RenderStats};
use claim_store::{ClaimRegistry, DEFAULT_CLAIMS_KEY, MemoryStore};
use common::{FakeHost, bounds};
use pretty_assertions::assert_eq;

fn renderer() -> BorderRenderer {
    BorderRenderer::new(BorderConfig::default())
}

fn square_claim(owner: &str) -> Claim {
    Claim::new(owner.into(), bounds(0, 10, 0, 10))
}

#[test]
fn test_no_observers_no_markers() {
    let mut host = FakeHost::new().with_player("far", 200.0, 64.0, 200.0);
    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);

    assert!(host.particles.is_empty());
    assert_eq!(stats.claims_skipped, 1);
    assert_eq!(stats.claims_rendered, 0);
}

#[test]
fn test_render_distance_edge() {
    // 64 blocks past maxX is still in range, a hair further is not
    let mut host = FakeHost::new().with_player("edge", 74.0, 64.0, 5.0);
    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);
    assert_eq!(stats.claims_rendered, 1);

    let mut host = FakeHost::new().with_player("outside", 74.01, 64.0, 5.0);
    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);
    assert_eq!(stats.claims_skipped, 1);
    assert!(host.particles.is_empty());
}

#[test]
fn test_close_observer_gets_dense_border() {
    let mut host = FakeHost::new().with_player("p1", 5.0, 64.0, 5.0);
    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);

    // dist 10 → spacing 2 → 6 samples per edge, 4 edges
    assert_eq!(stats.markers, 24);
    assert_eq!(host.particles.len(), 24);

    let expected: std::collections::HashSet<(i32, i32)> = [0, 2, 4, 6, 8, 10]
        .into_iter()
        .flat_map(|i| [(i, 0), (i, 10), (0, i), (10, i)])
        .collect();
    assert_eq!(host.marker_columns(), expected);

    for (particle, at) in &host.particles {
        assert_eq!(particle, "minecraft:basic_flame_particle");
        assert_eq!(at.y, 65.0);
    }
}

#[test]
fn test_spacing_follows_distance() {
    let cases = [
        // (observer x, observer z, markers)
        (5.0, 5.0, 24),  // dist 10 → spacing 2
        (45.0, 10.0, 12), // dist 35 → spacing 4: 0,4,8
        (60.0, 5.0, 8),  // dist 55 → spacing 6: 0,6
    ];

    for (x, z, markers) in cases {
        let mut host = FakeHost::new().with_player("watcher", x, 64.0, z);
        let stats = renderer().render_pass(&[square_claim("p1")], &mut host);
        assert_eq!(stats.markers, markers, "observer at ({x}, {z})");
    }
}

#[test]
fn test_marker_height_follows_observer() {
    let mut host = FakeHost::new().with_player("p1", 5.0, 70.4, 5.0);
    renderer().render_pass(&[square_claim("p1")], &mut host);

    assert!(!host.particles.is_empty());
    assert!(host.particles.iter().all(|(_, at)| (at.y - 71.4).abs() < 1e-9));
}

#[test]
fn test_observer_in_unloaded_terrain_is_skipped() {
    let mut host = FakeHost::new()
        .with_player("stuck", 20.0, 64.0, 20.0)
        .with_player("fine", 5.0, 64.0, 5.0);
    host.unload(bounds(20, 20, 20, 20));

    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);
    assert_eq!(stats.observers_unloaded, 1);
    assert_eq!(stats.markers, 24);
}

#[test]
fn test_unloaded_columns_are_skipped() {
    let mut host = FakeHost::new().with_player("p1", 5.0, 64.0, 5.0);
    // Whole z = 10 edge and the x = 10 edge beyond z = 5 are unloaded
    host.unload(bounds(0, 10, 10, 10));
    host.unload(bounds(10, 10, 6, 10));

    let stats = renderer().render_pass(&[square_claim("p1")], &mut host);

    assert!(host.marker_columns().iter().all(|&(_, z)| z != 10));
    assert!(!host.marker_columns().contains(&(10, 6)));
    assert!(host.marker_columns().contains(&(10, 4)));
    assert_eq!(stats.observers_failed, 0);
}

#[test]
fn test_failure_in_one_claim_does_not_stop_the_pass() {
    let mut host = FakeHost::new().with_player("watcher", 5.0, 64.0, 5.0);
    host.broken.insert((0, 0));

    let claims = [
        square_claim("p1"),
        Claim::new("p2".into(), bounds(20, 24, 0, 4)),
    ];
    let stats = renderer().render_pass(&claims, &mut host);

    assert_eq!(stats.claims_rendered, 2);
    assert_eq!(stats.observers_failed, 1);
    // The second claim is drawn in full: 3 samples per edge at spacing 2
    assert!(host.marker_columns().contains(&(24, 4)));
    assert_eq!(
        host.particles
            .iter()
            .filter(|(_, at)| at.x >= 20.0)
            .count(),
        12
    );
}

#[test]
fn test_service_renders_on_interval() {
    let registry = ClaimRegistry::load(Box::new(MemoryStore::new()), DEFAULT_CLAIMS_KEY).unwrap();
    let mut service = ClaimService::with_registry(ClaimConfig::default(), registry);
    let mut host = FakeHost::new().with_player("p1", 5.0, 64.0, 5.0);

    for point in [(0, 0), (10, 0), (10, 10), (0, 10)] {
        service
            .submit_point(&"p1".into(), ColumnPos::new(point.0, point.1), &mut host)
            .unwrap();
    }

    for _ in 0..9 {
        assert_eq!(service.tick(&mut host), None);
    }
    assert!(host.particles.is_empty());

    let stats = service.tick(&mut host).unwrap();
    assert_eq!(
        stats,
        RenderStats {
            claims_rendered: 1,
            markers: 24,
            ..RenderStats::default()
        }
    );

    for _ in 0..9 {
        assert_eq!(service.tick(&mut host), None);
    }
    assert!(service.tick(&mut host).is_some());
    assert_eq!(host.particles.len(), 48);
}
