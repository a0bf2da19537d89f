use std::path::PathBuf;
use std::sync::Arc;

use flightmap_core::config::OverlayConfig;
use flightmap_core::kml::KmlDocument;
use flightmap_core::layer::KmlLayer;
use flightmap_core::overlay::{OverlayKind, OverlaySlots};

fn layer(kind: OverlayKind, name: &str) -> Arc<KmlLayer> {
    let doc = KmlDocument {
        name: Some(name.to_string()),
        ..Default::default()
    };
    Arc::new(KmlLayer::new(kind, PathBuf::from(format!("{name}.kml")), doc))
}

#[test]
fn test_zoom_out_scales() {
    let config = OverlayConfig::default();
    assert_eq!(OverlayKind::FlightPath.zoom_out_scale(&config), 50_000_000.0);
    assert_eq!(OverlayKind::Coverage.zoom_out_scale(&config), 2_000_000.0);
}

#[test]
fn test_labels() {
    assert_eq!(OverlayKind::FlightPath.to_string(), "Flight Path");
    assert_eq!(OverlayKind::Coverage.label(), "Coverage");
}

#[test]
fn test_replace_returns_previous() {
    let mut slots = OverlaySlots::new();
    assert!(slots.is_empty());

    let first = layer(OverlayKind::FlightPath, "first");
    let second = layer(OverlayKind::FlightPath, "second");
    assert!(slots.replace(Arc::clone(&first)).is_none());
    let previous = slots.replace(Arc::clone(&second)).unwrap();
    assert_eq!(previous.id, first.id);
    assert_eq!(slots.get(OverlayKind::FlightPath).unwrap().name, "second");
    assert_eq!(slots.iter().count(), 1);
}

#[test]
fn test_slots_are_independent() {
    let mut slots = OverlaySlots::new();
    slots.replace(layer(OverlayKind::Coverage, "area"));
    slots.replace(layer(OverlayKind::FlightPath, "route"));
    assert_eq!(slots.get(OverlayKind::Coverage).unwrap().name, "area");
    assert_eq!(slots.get(OverlayKind::FlightPath).unwrap().name, "route");
    assert_eq!(slots.iter().count(), 2);

    assert_eq!(slots.take(OverlayKind::Coverage).unwrap().name, "area");
    assert!(slots.get(OverlayKind::Coverage).is_none());
    assert!(!slots.is_empty());
}

#[test]
fn test_layer_ids_are_unique_and_names_fall_back() {
    let a = layer(OverlayKind::Coverage, "a");
    let b = layer(OverlayKind::Coverage, "b");
    assert_ne!(a.id, b.id);
    assert!(b.id > a.id);

    let unnamed = KmlLayer::new(
        OverlayKind::Coverage,
        PathBuf::from("/tmp/footprint.kml"),
        KmlDocument::default(),
    );
    assert_eq!(unnamed.name, "footprint");
    assert!(unnamed.extent.is_none());
}
