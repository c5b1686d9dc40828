// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use super::vec3::Vec3;

/// Signed world up direction.
///
/// The up-axis picks which two of the three world axes form the horizontal
/// plane that the broad-phase partitions (Y up uses X/Z, X up uses Y/Z,
/// Z up uses X/Y). The sign never changes the plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpAxis {
    /// +X is up.
    PosX,
    /// -X is up.
    NegX,
    /// +Y is up.
    #[default]
    PosY,
    /// -Y is up.
    NegY,
    /// +Z is up.
    PosZ,
    /// -Z is up.
    NegZ,
}

impl UpAxis {
    /// All six directions in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Index (`0 = X`, `1 = Y`, `2 = Z`) of the world axis this direction lies on.
    pub const fn axis_index(self) -> usize {
        match self {
            Self::PosX | Self::NegX => 0,
            Self::PosY | Self::NegY => 1,
            Self::PosZ | Self::NegZ => 2,
        }
    }

    /// The two axis indices orthogonal to the up-axis, in ascending order.
    pub const fn planar_axes(self) -> (usize, usize) {
        match self {
            Self::PosX | Self::NegX => (1, 2),
            Self::PosY | Self::NegY => (0, 2),
            Self::PosZ | Self::NegZ => (0, 1),
        }
    }

    /// Returns `true` for the positive directions.
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Signed unit vector for this direction.
    pub fn direction(self) -> Vec3 {
        let sign = if self.is_positive() { 1.0 } else { -1.0 };
        Vec3::ZERO.with_component(self.axis_index(), sign)
    }
}
