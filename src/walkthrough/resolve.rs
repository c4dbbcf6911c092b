use crate::collision::{min_translation, obb_overlap, Container, Obb};
use crate::math::Point2;

use super::doors::{DoorZone, Wall};

/// Tunables for the walkthrough resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkthroughConfig {
    /// Half-size of the square footprint standing in for the walker.
    pub radius: f64,
    /// Extra distance added to every push-out.
    pub push_epsilon: f64,
    /// Number of sweeps over the obstacle list during push-out. Later sweeps
    /// only run while the previous one still moved the walker.
    pub max_passes: usize,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            push_epsilon: 1e-3,
            max_passes: 4,
        }
    }
}

/// Keeps a walking camera inside the hall and out of obstacles, letting it
/// leave through doors.
#[derive(Debug, Clone, Copy)]
pub struct Walkthrough<'a> {
    container: Container,
    doors: &'a [DoorZone],
    obstacles: &'a [Obb],
    config: WalkthroughConfig,
}

impl<'a> Walkthrough<'a> {
    /// Creates a resolver over a static scene.
    #[must_use]
    pub fn new(
        container: Container,
        doors: &'a [DoorZone],
        obstacles: &'a [Obb],
        config: WalkthroughConfig,
    ) -> Self {
        Self {
            container,
            doors,
            obstacles,
            config,
        }
    }

    /// The walker's footprint at `position`.
    #[must_use]
    pub fn footprint(&self, position: Point2) -> Obb {
        Obb::square(position, self.config.radius)
    }

    /// Corrects a desired position: wall clamp, obstacle push-out, then the
    /// wall clamp again.
    #[must_use]
    pub fn resolve(&self, desired: Point2) -> Point2 {
        let desired = if desired.x.is_finite() && desired.y.is_finite() {
            desired
        } else {
            tracing::warn!(x = desired.x, z = desired.y, "non-finite walk target, using hall center");
            self.container.center()
        };
        let clamped = self.clamp_to_walls(desired);
        let pushed = self.push_out(clamped);
        self.clamp_to_walls(pushed)
    }

    fn door_admits(&self, wall: Wall, p: &Point2) -> bool {
        self.doors
            .iter()
            .any(|door| door.wall == wall && door.admits(p))
    }

    fn clamp_to_walls(&self, p: Point2) -> Point2 {
        let r = self.config.radius;
        let Container { width, length } = self.container;

        let beyond = [
            (Wall::West, p.x < -r),
            (Wall::East, p.x > width + r),
            (Wall::South, p.y < -r),
            (Wall::North, p.y > length + r),
        ];
        if beyond
            .iter()
            .any(|&(wall, out)| out && self.door_admits(wall, &p))
        {
            return p;
        }

        let x = clamp_axis(
            p.x,
            (!self.door_admits(Wall::West, &p)).then_some(r),
            (!self.door_admits(Wall::East, &p)).then_some(width - r),
            width,
        );
        let z = clamp_axis(
            p.y,
            (!self.door_admits(Wall::South, &p)).then_some(r),
            (!self.door_admits(Wall::North, &p)).then_some(length - r),
            length,
        );
        Point2::new(x, z)
    }

    fn push_out(&self, mut p: Point2) -> Point2 {
        for pass in 0..self.config.max_passes.max(1) {
            let mut moved = false;
            for (index, obstacle) in self.obstacles.iter().enumerate() {
                let entity = self.footprint(p);
                if !obb_overlap(&entity, obstacle) {
                    continue;
                }
                let Some(mtv) = min_translation(&entity, obstacle) else {
                    continue;
                };
                let depth = mtv.norm();
                p += mtv * ((depth + self.config.push_epsilon) / depth);
                moved = true;
                tracing::trace!(obstacle = index, pass, depth, "pushed out of obstacle");
            }
            if !moved {
                break;
            }
        }
        p
    }
}

/// Clamps to whichever bounds apply. A hall too narrow for the walker pins
/// it to the middle.
fn clamp_axis(value: f64, low: Option<f64>, high: Option<f64>, extent: f64) -> f64 {
    if let (Some(lo), Some(hi)) = (low, high) {
        if lo > hi {
            return extent * 0.5;
        }
    }
    let value = low.map_or(value, |lo| value.max(lo));
    high.map_or(value, |hi| value.min(hi))
}

/// Resolves one walkthrough step with the default configuration.
#[must_use]
pub fn resolve_walkthrough(
    desired: Point2,
    obstacles: &[Obb],
    container: &Container,
    doors: &[DoorZone],
) -> Point2 {
    Walkthrough::new(*container, doors, obstacles, WalkthroughConfig::default()).resolve(desired)
}
