use crate::Scalar;
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    InvalidMass(Scalar),
}

impl Error for PhysicsError {}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMass(value) => {
                write!(f, "Mass must be finite and non-negative, got: {}", value)
            }
        }
    }
}

/// Body mass.
///
/// Zero mass marks immovable bodies: they never gain velocity from elastic
/// exchange, like walls or floors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Scalar", into = "Scalar")]
pub struct Mass {
    value: Scalar,
    inverse: Scalar,
}

impl Mass {
    pub fn new(value: Scalar) -> Result<Self, PhysicsError> {
        if !value.is_finite() || value < 0.0 {
            return Err(PhysicsError::InvalidMass(value));
        }
        Ok(Self {
            value,
            inverse: if value != 0.0 { 1.0 / value } else { 0.0 },
        })
    }

    pub fn unit() -> Self {
        Self {
            value: 1.0,
            inverse: 1.0,
        }
    }

    pub fn immovable() -> Self {
        Self {
            value: 0.0,
            inverse: 0.0,
        }
    }

    pub fn value(&self) -> Scalar {
        self.value
    }

    pub fn inverse(&self) -> Scalar {
        self.inverse
    }

    pub fn is_immovable(&self) -> bool {
        self.value == 0.0
    }

    /// Ratio of this mass to `other`, zero when `other` is immovable.
    pub fn ratio_to(&self, other: Self) -> Scalar {
        self.value * other.inverse
    }
}

impl Default for Mass {
    fn default() -> Self {
        Self::unit()
    }
}

impl PartialEq for Mass {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl TryFrom<Scalar> for Mass {
    type Error = PhysicsError;

    fn try_from(value: Scalar) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mass> for Scalar {
    fn from(mass: Mass) -> Self {
        mass.value
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Moves on its own and takes part in two-body elastic exchange.
    #[default]
    Dynamic,
    /// Scenery other bodies bounce off. Never moved by the simulation.
    Background,
}

impl BodyKind {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }
}
