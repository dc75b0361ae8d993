use glam::Vec3;
use homestead_common::Placement;

/// Resource names shared by the loader and the layout.
pub mod names {
    pub const MESH_SHADER: &str = "mesh";
    pub const SKYBOX_SHADER: &str = "skybox";
    pub const PARTICLE_SHADER: &str = "particle";

    pub const GRASS_TEXTURE: &str = "grass";
    pub const SMOKE_TEXTURE: &str = "smoke";
    pub const DAY_SKY_TEXTURE: &str = "skybox";
    pub const NIGHT_SKY_TEXTURE: &str = "nightSkybox";

    pub const SUN_LIGHT: &str = "light";
    pub const MAIN_CAMERA: &str = "main";

    pub const LAND: &str = "land";
    pub const DAY_SKYBOX: &str = "skybox";
    pub const NIGHT_SKYBOX: &str = "nightSkybox";
    pub const FIRE: &str = "particle_fire";

    pub const FARMHOUSE: &str = "farmhouse";
    pub const TREE: &str = "tree";
    pub const FENCE: &str = "woodenfence";
    pub const SUN: &str = "sun";
}

/// The day cycle orbits around the farmhouse.
pub const FARMHOUSE_POSITION: Vec3 = Vec3::new(7.0, 0.0, -43.0);

const FENCE_SCALE: Vec3 = Vec3::new(0.25, 0.15, 0.25);

/// What a draw command draws: a standalone renderer or a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTarget {
    Renderer(&'static str),
    Model(&'static str),
}

impl DrawTarget {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Renderer(name) | Self::Model(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub target: DrawTarget,
    pub placement: Placement,
}

/// Ordered list of draws for one frame.
#[derive(Debug, Clone, Default)]
pub struct SceneLayout {
    pub commands: Vec<DrawCommand>,
}

impl SceneLayout {
    /// The fixed homestead scene. `sun` is the light position while the sun
    /// is above the horizon.
    ///
    /// Opaque geometry comes first, then the two skyboxes, which test but do
    /// not write depth, and the blended particles last so the sky does not
    /// cover them.
    pub fn homestead(sun: Option<Vec3>) -> Self {
        let mut layout = Self::default();
        let upright = Vec3::Y;

        layout.renderer(
            names::LAND,
            Placement::default()
                .with_uniform_scale(1000.0)
                .rotated(Vec3::X, 90.0),
        );
        layout.model(
            names::FARMHOUSE,
            Placement::at(FARMHOUSE_POSITION)
                .with_uniform_scale(0.8)
                .rotated(upright, 180.0),
        );
        layout.model(names::TREE, Placement::at(Vec3::new(30.0, -2.0, -35.0)));

        let fences = [
            (Vec3::new(0.0, 0.0, -20.0), 90.0),
            (Vec3::new(30.0, 0.0, -20.0), 90.0),
            (Vec3::new(0.0, 0.0, -68.0), 90.0),
            (Vec3::new(30.0, 0.0, -68.0), 90.0),
            (Vec3::new(-13.0, 0.0, -33.0), 0.0),
            (Vec3::new(-13.0, 0.0, -57.0), 0.0),
            (Vec3::new(41.0, 0.0, -33.0), 0.0),
            (Vec3::new(41.0, 0.0, -57.0), 0.0),
        ];
        for (position, degrees) in fences {
            layout.model(
                names::FENCE,
                Placement::at(position)
                    .with_scale(FENCE_SCALE)
                    .rotated(upright, degrees),
            );
        }

        if let Some(sun) = sun {
            layout.model(names::SUN, Placement::at(sun).with_uniform_scale(3.0));
        }

        let sky = Placement::at(Vec3::new(0.0, -100.0, 0.0)).with_uniform_scale(500.0);
        layout.renderer(names::DAY_SKYBOX, sky);
        layout.renderer(names::NIGHT_SKYBOX, sky);

        layout.renderer(names::FIRE, Placement::at(Vec3::new(20.0, 0.0, -30.0)));
        layout
    }

    pub fn renderer(&mut self, name: &'static str, placement: Placement) {
        self.commands.push(DrawCommand {
            target: DrawTarget::Renderer(name),
            placement,
        });
    }

    pub fn model(&mut self, name: &'static str, placement: Placement) {
        self.commands.push(DrawCommand {
            target: DrawTarget::Model(name),
            placement,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn count_of(&self, target: DrawTarget) -> usize {
        self.commands.iter().filter(|c| c.target == target).count()
    }

    /// Placement of the first draw of `target`.
    pub fn placement_of(&self, target: DrawTarget) -> Option<Placement> {
        self.commands
            .iter()
            .find(|c| c.target == target)
            .map(|c| c.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homestead_has_eight_fences() {
        let layout = SceneLayout::homestead(None);
        assert_eq!(layout.count_of(DrawTarget::Model(names::FENCE)), 8);
        assert_eq!(layout.count_of(DrawTarget::Model(names::FARMHOUSE)), 1);
        assert_eq!(layout.count_of(DrawTarget::Model(names::SUN)), 0);
    }

    #[test]
    fn blended_draws_come_after_opaque_ones() {
        let layout = SceneLayout::homestead(Some(Vec3::Y * 100.0));
        let n = layout.len();
        assert_eq!(layout.commands[n - 3].target, DrawTarget::Renderer(names::DAY_SKYBOX));
        assert_eq!(layout.commands[n - 2].target, DrawTarget::Renderer(names::NIGHT_SKYBOX));
        assert_eq!(layout.commands[n - 1].target, DrawTarget::Renderer(names::FIRE));
        assert_eq!(layout.commands[0].target, DrawTarget::Renderer(names::LAND));
    }

    #[test]
    fn sun_follows_light() {
        let sun = Vec3::new(1.0, 90.0, 0.0);
        let layout = SceneLayout::homestead(Some(sun));
        let cmd = layout
            .commands
            .iter()
            .find(|c| c.target == DrawTarget::Model(names::SUN))
            .unwrap();
        assert_eq!(cmd.placement.position, sun);
    }

    #[test]
    fn fire_placement_is_found() {
        let layout = SceneLayout::homestead(None);
        let fire = layout.placement_of(DrawTarget::Renderer(names::FIRE)).unwrap();
        assert_eq!(fire.position, Vec3::new(20.0, 0.0, -30.0));
        assert!(layout.placement_of(DrawTarget::Model(names::SUN)).is_none());
    }

    #[test]
    fn half_the_fences_are_turned() {
        let layout = SceneLayout::homestead(None);
        let turned = layout
            .commands
            .iter()
            .filter(|c| c.target == DrawTarget::Model(names::FENCE))
            .filter(|c| c.placement.rotation_degrees == 90.0)
            .count();
        assert_eq!(turned, 4);
    }
}
