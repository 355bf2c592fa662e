use bevy::prelude::*;

use crate::ClippingConfig;

/// Materials shared by every clipping plane
#[derive(Resource, Clone, Debug)]
pub struct ClippingPlaneMaterials {
    /// Semi-transparent, double sided, unlit material of the visible plane quad
    pub plane: Handle<StandardMaterial>,
    /// Fully transparent material for hit volumes that must never be seen
    pub hidden: Handle<StandardMaterial>,
}

impl FromWorld for ClippingPlaneMaterials {
    fn from_world(world: &mut World) -> Self {
        let (color, opacity) = world
            .get_resource::<ClippingConfig>()
            .map(|config| (config.plane_color, config.plane_opacity))
            .unwrap_or_else(|| {
                let config = ClippingConfig::default();
                (config.plane_color, config.plane_opacity)
            });

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let plane = materials.add(StandardMaterial {
            base_color: Color::srgba(color[0], color[1], color[2], opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..Default::default()
        });
        let hidden = materials.add(StandardMaterial {
            base_color: Color::NONE,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..Default::default()
        });

        Self { plane, hidden }
    }
}
