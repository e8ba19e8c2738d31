use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub speed: i32,
    pub height: i32,
    pub horizon_pos: i32,
    pub scale_height: i32,
    // far clip, in grid cells
    pub max_dist: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 3,
            height: 100,
            horizon_pos: 120,
            scale_height: 200,
            max_dist: 700,
        }
    }
}

// Sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
}

impl Intents {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub height: i32,
    pub horizon_pos: i32,
    pub scale_height: i32,
    pub max_dist: i32,
    pub speed: i32,
}

impl Camera {
    // Camera over the center of a `width` x `height` terrain
    pub fn centered(width: usize, height: usize, config: &CameraConfig) -> Self {
        Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
            height: config.height,
            horizon_pos: config.horizon_pos,
            scale_height: config.scale_height,
            max_dist: config.max_dist,
            speed: config.speed,
        }
    }

    // Each active intent moves its field independently. Diagonal movement
    // is not normalized and nothing is clamped to the terrain; extreme
    // values wrap around.
    pub fn update(&mut self, intents: Intents) {
        let speed = self.speed;
        let pitch = speed.wrapping_mul(2);
        if intents.forward {
            self.y = self.y.wrapping_sub(speed);
        }
        if intents.back {
            self.y = self.y.wrapping_add(speed);
        }
        if intents.left {
            self.x = self.x.wrapping_sub(speed);
        }
        if intents.right {
            self.x = self.x.wrapping_add(speed);
        }

        if intents.ascend {
            self.height = self.height.wrapping_add(speed);
        }
        if intents.descend {
            self.height = self.height.wrapping_sub(speed);
        }

        if intents.pitch_up {
            self.horizon_pos = self.horizon_pos.wrapping_add(pitch);
        }
        if intents.pitch_down {
            self.horizon_pos = self.horizon_pos.wrapping_sub(pitch);
        }
    }
}
