use std::path::PathBuf;
use std::time::Duration;

use homestead_assets::SceneManifest;
use homestead_input::{Action, HeldActions, Key, KeyBindings};
use homestead_render_wgpu::{
    Frame, FrameRenderer, GlobalUniforms, GpuContext, RenderError, RendererKind,
    ResourceManager, ShaderKind,
};
use homestead_scene::layout::names;
use homestead_scene::{Camera, DirectionalLight, DrawTarget, FARMHOUSE_POSITION, SceneLayout};

use crate::hud::{self, FpsCounter, HudStats};

/// Walking speed, units per second.
const MOVE_SPEED: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub assets: PathBuf,
    pub day_length: f32,
    pub width: u32,
    pub height: u32,
}

pub struct Game {
    resources: ResourceManager,
    bindings: KeyBindings,
    held: HeldActions,
    fps: FpsCounter,
    day_alpha: f32,
    show_hud: bool,
    quit: bool,
}

impl Game {
    /// Load every shader, texture, renderer and model of the scene.
    pub fn init(ctx: &GpuContext, settings: &GameSettings) -> Result<Self, RenderError> {
        let manifest = SceneManifest::homestead(&settings.assets);
        for path in manifest.missing() {
            tracing::warn!("missing asset: {}", path.display());
        }

        let mut resources = ResourceManager::new(ctx);
        resources.load_shader(ctx, ShaderKind::Mesh, names::MESH_SHADER);
        resources.load_shader(ctx, ShaderKind::Skybox, names::SKYBOX_SHADER);
        resources.load_shader(ctx, ShaderKind::Particle, names::PARTICLE_SHADER);

        resources.load_2d_texture(ctx, &manifest.grass, names::GRASS_TEXTURE)?;
        resources.load_box_texture(ctx, &manifest.day_sky, names::DAY_SKY_TEXTURE)?;
        resources.load_2d_texture(ctx, &manifest.smoke, names::SMOKE_TEXTURE)?;
        resources.load_box_texture(ctx, &manifest.night_sky, names::NIGHT_SKY_TEXTURE)?;

        resources.load_light(
            names::SUN_LIGHT,
            DirectionalLight::default().with_day_length(settings.day_length),
        );

        resources.load_renderer(
            ctx,
            RendererKind::Land,
            names::MESH_SHADER,
            names::GRASS_TEXTURE,
            names::LAND,
        )?;
        resources.load_renderer(
            ctx,
            RendererKind::Skybox,
            names::SKYBOX_SHADER,
            names::DAY_SKY_TEXTURE,
            names::DAY_SKYBOX,
        )?;
        resources.load_renderer(
            ctx,
            RendererKind::Skybox,
            names::SKYBOX_SHADER,
            names::NIGHT_SKY_TEXTURE,
            names::NIGHT_SKYBOX,
        )?;
        resources.load_particle_renderer(
            ctx,
            names::PARTICLE_SHADER,
            names::SMOKE_TEXTURE,
            &manifest.particle_fire,
            names::FIRE,
        )?;

        resources.load_model(ctx, &manifest.farmhouse, names::MESH_SHADER, names::FARMHOUSE)?;
        resources.load_model(ctx, &manifest.tree, names::MESH_SHADER, names::TREE)?;
        resources.load_model(ctx, &manifest.fence, names::MESH_SHADER, names::FENCE)?;
        resources
            .load_model(ctx, &manifest.sun, names::MESH_SHADER, names::SUN)?
            .set_emissive(1.0);

        let mut camera = Camera::default();
        camera.set_aspect(settings.width, settings.height);
        resources.load_camera(names::MAIN_CAMERA, camera);

        let counts = resources.counts();
        tracing::info!(
            "scene loaded: {} shaders, {} textures, {} renderers, {} models",
            counts.shaders,
            counts.textures,
            counts.renderers,
            counts.models
        );

        Ok(Self {
            resources,
            bindings: KeyBindings::default(),
            held: HeldActions::new(),
            fps: FpsCounter::default(),
            day_alpha: 1.0,
            show_hud: true,
            quit: false,
        })
    }

    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        self.held.handle(&self.bindings, key, pressed);
    }

    /// Forget held keys, e.g. after focus loss.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_looking(&self) -> bool {
        self.held.is_held(Action::Look)
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.is_looking() {
            return;
        }
        if let Ok(camera) = self.resources.camera_mut(names::MAIN_CAMERA) {
            camera.rotate(dx, dy);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Ok(camera) = self.resources.camera_mut(names::MAIN_CAMERA) {
            camera.set_aspect(width, height);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply held movement keys and one-shot actions.
    pub fn process_input(&mut self, dt: f32) -> Result<(), RenderError> {
        let distance = MOVE_SPEED * dt;
        let camera = self.resources.camera_mut(names::MAIN_CAMERA)?;
        if self.held.is_held(Action::MoveForward) {
            camera.move_forward_2d(distance);
        }
        if self.held.is_held(Action::MoveBack) {
            camera.move_back_2d(distance);
        }
        if self.held.is_held(Action::MoveLeft) {
            camera.move_left_2d(distance);
        }
        if self.held.is_held(Action::MoveRight) {
            camera.move_right_2d(distance);
        }
        if self.held.is_held(Action::Jump) {
            camera.jump();
        }

        for action in self.held.take_pressed() {
            match action {
                Action::Quit => self.quit = true,
                Action::ToggleHud => self.show_hud = !self.show_hud,
                _ => {}
            }
        }
        Ok(())
    }

    /// Advance the day cycle and particles by `dt`, then draw the scene.
    pub fn render(
        &mut self,
        ctx: &GpuContext,
        frames: &mut FrameRenderer,
        target: &wgpu::TextureView,
        dt: f32,
    ) -> Result<(), RenderError> {
        self.fps.tick(Duration::from_secs_f32(dt.max(0.0)));

        let camera = self.resources.camera_mut(names::MAIN_CAMERA)?;
        camera.update_jump(dt);
        let camera = camera.clone();

        let light = self.resources.light_mut(names::SUN_LIGHT)?;
        self.day_alpha = light.orbit(FARMHOUSE_POSITION, dt);
        let light = light.clone();

        // Night fades in over an opaque day sky.
        self.resources.skybox_mut(names::DAY_SKYBOX)?.set_alpha(1.0);
        self.resources
            .skybox_mut(names::NIGHT_SKYBOX)?
            .set_alpha(1.0 - self.day_alpha);

        let sun = light.is_above_horizon().then_some(light.position);
        let layout = SceneLayout::homestead(sun);

        if let Some(fire) = layout.placement_of(DrawTarget::Renderer(names::FIRE)) {
            let view_origin = camera.position - fire.position;
            self.resources
                .particles_mut(names::FIRE)?
                .update(&ctx.queue, dt, view_origin);
        }

        let mut frame = Frame::new(GlobalUniforms::new(&camera, &light, self.day_alpha));
        self.resources.record(&mut frame, &layout)?;
        tracing::trace!("frame: {} draws", frame.draw_count());
        frames.submit(ctx, frame, target);
        Ok(())
    }

    pub fn draw_hud(&self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }
        let camera = self
            .resources
            .camera(names::MAIN_CAMERA)
            .map(|c| c.position.to_array())
            .unwrap_or_default();
        let counts = self.resources.counts();
        let stats = HudStats {
            fps: self.fps.fps(),
            camera,
            day_alpha: self.day_alpha,
            particles: self.resources.particle_count(),
            models: counts.models,
            renderers: counts.renderers,
        };
        hud::draw(ctx, &stats);
    }
}
