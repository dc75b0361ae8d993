use std::fmt::Write;

use glam::Vec3;

use crate::Camera;
use crate::layout::{DrawTarget, SceneLayout};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Normalized view direction.
    pub forward: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Day/night blend: 1 is full day.
    pub day_alpha: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), 1.0)
    }
}

impl RenderView {
    pub fn from_camera(camera: &Camera, day_alpha: f32) -> Self {
        Self {
            eye: camera.position,
            forward: camera.forward(),
            fov_degrees: camera.fov.to_degrees(),
            day_alpha,
        }
    }
}

/// Renderer-agnostic interface.
///
/// A renderer consumes a frame's draw list and view and produces output. It
/// never edits the layout.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given layout and view.
    fn render(&self, layout: &SceneLayout, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable dump of a frame.
///
/// Used for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, layout: &SceneLayout, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame (draws={}, day={:.2}, night={:.2}) ===",
            layout.len(),
            view.day_alpha,
            1.0 - view.day_alpha
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) forward=({:.2}, {:.2}, {:.2}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z,
            view.fov_degrees
        );

        for cmd in &layout.commands {
            let kind = match cmd.target {
                DrawTarget::Renderer(_) => "renderer",
                DrawTarget::Model(_) => "model",
            };
            let p = cmd.placement;
            let _ = writeln!(
                out,
                "  {kind:<8} {:<14} pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) rot={:.0}",
                cmd.target.name(),
                p.position.x,
                p.position.y,
                p.position.z,
                p.scale.x,
                p.scale.y,
                p.scale.z,
                p.rotation_degrees
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::names;

    #[test]
    fn debug_renderer_empty_layout() {
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&SceneLayout::default(), &RenderView::default());

        assert!(output.contains("draws=0"));
        assert!(output.contains("fov=45"));
    }

    #[test]
    fn debug_renderer_lists_every_draw() {
        let layout = SceneLayout::homestead(None);
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&layout, &RenderView::default());

        assert_eq!(output.lines().count(), 2 + layout.len());
        assert_eq!(output.matches(names::FENCE).count(), 8);
        assert!(output.contains("pos=(7.00, 0.00, -43.00)"));
    }

    #[test]
    fn render_view_from_camera() {
        let view = RenderView::from_camera(&Camera::default(), 0.25);
        assert_eq!(view.eye, Vec3::new(0.0, 5.0, 0.0));
        assert!((view.fov_degrees - 45.0).abs() < 1e-4);
        assert_eq!(view.day_alpha, 0.25);
    }
}
