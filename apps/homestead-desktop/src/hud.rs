use std::time::Duration;

/// Frames per second averaged over half-second windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: Duration,
    fps: f32,
}

const WINDOW: Duration = Duration::from_millis(500);

impl FpsCounter {
    pub fn tick(&mut self, dt: Duration) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= WINDOW {
            self.fps = self.frames as f32 / self.elapsed.as_secs_f32();
            self.frames = 0;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// What the overlay shows for one frame.
#[derive(Debug, Clone, Copy)]
pub struct HudStats {
    pub fps: f32,
    pub camera: [f32; 3],
    pub day_alpha: f32,
    pub particles: usize,
    pub models: usize,
    pub renderers: usize,
}

pub fn draw(ctx: &egui::Context, stats: &HudStats) {
    egui::Window::new("Homestead")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("FPS: {:.0}", stats.fps));
            ui.label(format!(
                "Camera: ({:.1}, {:.1}, {:.1})",
                stats.camera[0], stats.camera[1], stats.camera[2]
            ));
            ui.label(format!("Daylight: {:.0}%", stats.day_alpha * 100.0));
            ui.label(format!("Particles: {}", stats.particles));
            ui.label(format!(
                "Models: {}  Renderers: {}",
                stats.models, stats.renderers
            ));
            ui.separator();
            ui.small("F1: Toggle HUD | RMB: Look | WASD: Move | Space: Jump | Esc: Quit");
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_updates_after_window() {
        let mut counter = FpsCounter::default();
        for _ in 0..30 {
            counter.tick(Duration::from_millis(16));
        }
        assert_eq!(counter.fps(), 0.0);
        counter.tick(Duration::from_millis(20));
        // 31 frames over 500 ms
        assert!((counter.fps() - 62.0).abs() < 0.01);
    }
}
