//! Playback clock for the scene.

pub struct Playback {
    pub time_s: f64,
    pub is_playing: bool,
    pub speed: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            time_s: 0.0,
            is_playing: true,
            speed: 1.0,
        }
    }
}

impl Playback {
    /// Advance by `dt` wall-clock seconds; stops at the end of the scene.
    pub fn advance(&mut self, dt: f64, duration: f64) {
        if !self.is_playing {
            return;
        }
        self.time_s += dt.max(0.0) * self.speed.max(0.1);
        if self.time_s >= duration {
            self.time_s = duration;
            self.is_playing = false;
        }
    }

    /// Play/pause; playing from the end starts over.
    pub fn toggle(&mut self, duration: f64) {
        if !self.is_playing && self.time_s >= duration {
            self.time_s = 0.0;
        }
        self.is_playing = !self.is_playing;
    }

    pub fn restart(&mut self) {
        self.time_s = 0.0;
        self.is_playing = true;
    }
}
