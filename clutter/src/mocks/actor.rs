use crate::actors::Actor;

/// Mock [`Actor`] for testing purposes: records what behaviours did to it.
#[derive(Clone, Debug, PartialEq)]
pub struct MockActor {
    size: (f64, f64),
    anchor_point: (f64, f64),
    scale: (f64, f64),
    opacity: u8,
    anchor_calls: usize,
    scale_calls: usize,
    /// Every call to the actor, in order (`"anchor"`, `"scale"` or `"opacity"`).
    history: Vec<&'static str>,
}

impl MockActor {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: (width, height),
            anchor_point: (0.0, 0.0),
            scale: (1.0, 1.0),
            opacity: 255,
            anchor_calls: 0,
            scale_calls: 0,
            history: vec![],
        }
    }

    pub fn get_anchor_point(&self) -> (f64, f64) {
        self.anchor_point
    }

    pub fn get_scale(&self) -> (f64, f64) {
        self.scale
    }

    pub fn get_opacity(&self) -> u8 {
        self.opacity
    }

    /// Number of times the anchor point was set.
    pub fn get_anchor_calls(&self) -> usize {
        self.anchor_calls
    }

    /// Number of times the scale was set.
    pub fn get_scale_calls(&self) -> usize {
        self.scale_calls
    }

    pub fn get_history(&self) -> &[&'static str] {
        &self.history
    }
}

impl Actor for MockActor {
    fn get_size(&self) -> (f64, f64) {
        self.size
    }

    fn set_anchor_point(&mut self, anchor_x: f64, anchor_y: f64) {
        self.anchor_point = (anchor_x, anchor_y);
        self.anchor_calls += 1;
        self.history.push("anchor");
    }

    fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale = (scale_x, scale_y);
        self.scale_calls += 1;
        self.history.push("scale");
    }

    fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
        self.history.push("opacity");
    }
}
