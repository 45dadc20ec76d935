use egui::Vec2;

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub viewport: Vec2,
    /// UI scale override. `None` keeps the scale egui detects.
    pub pixels_per_point: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [900.0, 420.0].into(),
            pixels_per_point: None,
        }
    }
}
