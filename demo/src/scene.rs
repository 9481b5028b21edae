use parabox_physics::{
    PhysicsSimulation, Scalar,
    body::Body,
    components::{BodyKind, Mass},
    registry::BodyRegistry,
    shapes::{ellipse::EllipseShape, rectangle::RectangleShape, subtraction::SubtractionShape},
    third_party::vek::{Aabr, Vec2},
};
use serde::{Deserialize, Serialize};
use std::{error::Error, path::Path};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDescription {
    #[default]
    Rectangle,
    Ellipse,
    /// Ellipse with an ellipse hole, `thickness` is a fraction of the size.
    Ring { thickness: Scalar },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    pub position: [Scalar; 2],
    pub size: [Scalar; 2],
    #[serde(default)]
    pub velocity: [Scalar; 2],
    #[serde(default)]
    pub mass: Mass,
    #[serde(default)]
    pub kind: BodyKind,
    #[serde(default)]
    pub shape: ShapeDescription,
}

impl BodyDescription {
    pub fn build(&self) -> Body {
        let body = Body::new(self.position, self.size)
            .with_velocity(self.velocity)
            .with_mass(self.mass)
            .with_kind(self.kind);
        match self.shape {
            ShapeDescription::Rectangle => body.with_shape(RectangleShape),
            ShapeDescription::Ellipse => body.with_shape(EllipseShape),
            ShapeDescription::Ring { thickness } => {
                let thickness = thickness.clamp(0.0, 0.5);
                body.with_shape(SubtractionShape::new(EllipseShape).hole(
                    EllipseShape,
                    Aabr {
                        min: Vec2::broadcast(thickness),
                        max: Vec2::broadcast(1.0 - thickness),
                    },
                ))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub simulation: PhysicsSimulation,
    pub frames: usize,
    pub bodies: Vec<BodyDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            simulation: Default::default(),
            frames: 120,
            bodies: Default::default(),
        }
    }
}

impl SceneDescription {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Box with walls, few balls and a ring thrown into it.
    pub fn builtin() -> Self {
        let wall = |position: [Scalar; 2], size: [Scalar; 2]| BodyDescription {
            position,
            size,
            velocity: [0.0, 0.0],
            mass: Mass::immovable(),
            kind: BodyKind::Background,
            shape: ShapeDescription::Rectangle,
        };
        let ball = |position: [Scalar; 2], velocity: [Scalar; 2], mass: Scalar| BodyDescription {
            position,
            size: [20.0, 20.0],
            velocity,
            mass: Mass::new(mass).unwrap_or_default(),
            kind: BodyKind::Dynamic,
            shape: ShapeDescription::Ellipse,
        };

        Self {
            bodies: vec![
                wall([0.0, 0.0], [400.0, 10.0]),
                wall([0.0, 290.0], [400.0, 10.0]),
                wall([0.0, 10.0], [10.0, 280.0]),
                wall([390.0, 10.0], [10.0, 280.0]),
                ball([50.0, 50.0], [3.0, 2.0], 1.0),
                ball([200.0, 60.0], [-2.0, 1.5], 2.0),
                ball([120.0, 200.0], [1.0, -3.0], 1.0),
                ball([300.0, 150.0], [-3.0, -1.0], 4.0),
                BodyDescription {
                    position: [150.0, 120.0],
                    size: [40.0, 40.0],
                    velocity: [2.5, 0.5],
                    mass: Mass::new(3.0).unwrap_or_default(),
                    kind: BodyKind::Dynamic,
                    shape: ShapeDescription::Ring { thickness: 0.2 },
                },
            ],
            ..Default::default()
        }
    }

    pub fn registry(&self) -> BodyRegistry {
        self.bodies.iter().map(BodyDescription::build).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabox_physics::body::Collidable;

    #[test]
    fn test_scene_json() -> Result<(), Box<dyn Error>> {
        let scene = serde_json::from_str::<SceneDescription>(
            r#"{
                "frames": 10,
                "simulation": { "affection_expand": 1 },
                "bodies": [
                    { "position": [0, 0], "size": [100, 10], "kind": "background", "mass": 0 },
                    { "position": [40, 5], "size": [10, 10], "velocity": [0, -1], "shape": "ellipse" },
                    { "position": [60, 5], "size": [10, 10], "shape": { "ring": { "thickness": 0.25 } } }
                ]
            }"#,
        )?;
        assert_eq!(scene.frames, 10);
        assert_eq!(scene.simulation.affection_expand, 1);
        assert_eq!(scene.simulation.separation_step_limit, 1000);
        assert_eq!(scene.bodies[1].mass, Mass::unit());
        assert_eq!(scene.bodies[2].shape, ShapeDescription::Ring { thickness: 0.25 });

        let registry = scene.registry();
        assert_eq!(registry.len(), 3);
        let bodies = registry.iter().map(|(_, body)| body).collect::<Vec<_>>();
        assert!(!bodies[0].is_dynamic());
        assert!(bodies[0].mass().is_immovable());
        assert!(bodies[1].contains_point(Vec2::new(45.0, 10.0)));
        assert!(!bodies[1].contains_point(Vec2::new(40.0, 5.0)));
        // ring is hollow in the middle.
        assert!(!bodies[2].contains_point(Vec2::new(65.0, 10.0)));
        assert!(bodies[2].contains_point(Vec2::new(60.5, 10.0)));
        Ok(())
    }

    #[test]
    fn test_builtin_scene() {
        let scene = SceneDescription::builtin();
        let registry = scene.registry();
        assert_eq!(registry.len(), scene.bodies.len());
        assert_eq!(
            registry
                .iter()
                .filter(|(_, body)| body.is_dynamic())
                .count(),
            5
        );
    }
}
