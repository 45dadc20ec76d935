#![cfg(feature = "serde")]

#[test]
fn serialize_deserialize_tracker_settings() {
    let tracker_settings = egui_span_select::TrackerSettings::default();
    let serialized = serde_json::to_string(&tracker_settings).unwrap();
    let deserialized: egui_span_select::TrackerSettings =
        serde_json::from_str(&serialized).unwrap();
    assert_eq!(tracker_settings, deserialized);
}

#[test]
fn deserialize_partial_tracker_settings() {
    let deserialized: egui_span_select::TrackerSettings =
        serde_json::from_str(r#"{ "color": [0, 255, 0] }"#).unwrap();
    assert_eq!(deserialized.color, [0, 255, 0]);
    assert_eq!(
        deserialized.drag_radius,
        egui_span_select::DRAG_RADIUS_IN_PIXELS
    );
}
