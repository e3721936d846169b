//! The bundled demo scenarios replay to the documented outcome

use std::path::PathBuf;

use placekit::{EngineConfig, PlacementMode, PlaneExtent, Vec3};
use placekit_sim::{replay, HistoryChange, Scenario};

fn demo(name: &str) -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/scenarios")
        .join(name);
    Scenario::load(&path).unwrap()
}

#[test]
fn test_surface_drag_demo() {
    let report = replay(&demo("surface_drag.toml"), EngineConfig::default());

    assert_eq!(report.mode, PlacementMode::SurfaceConstrained);
    // Two chairs placed during the drag, one undone
    assert_eq!(report.history.len(), 1);
    assert_eq!(report.history[0].prototype, "chair");
    assert_eq!(report.scene_nodes, 1);

    assert_eq!(report.overlays.len(), 1);
    let floor = &report.overlays[0];
    assert_eq!(floor.extent, PlaneExtent::new(2.5, 3.5));
    assert_eq!(floor.center, Vec3::new(0.2, 0.0, 1.1));
    // Toggled off after the mode made it visible
    assert!(floor.hidden);
    assert!(!report.overlays_visible);
}

#[test]
fn test_image_trigger_demo() {
    let report = replay(&demo("image_trigger.toml"), EngineConfig::default());

    assert_eq!(report.mode, PlacementMode::ImageTriggered);
    assert!(report.history.is_empty());
    assert_eq!(report.scene_nodes, 0);

    let placed = report
        .changes
        .iter()
        .filter(|change| matches!(change, HistoryChange::Placed { .. }))
        .count();
    assert_eq!(placed, 1);
    assert!(matches!(
        report.changes.last(),
        Some(HistoryChange::Reset { removed: 1, .. })
    ));
    // start, set_mode, reset
    assert_eq!(report.tracking_runs, 3);
}
