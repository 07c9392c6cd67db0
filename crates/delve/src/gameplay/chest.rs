//! Chests: world objects that open once and grant one item.

use delve_economy::ObjectTemplate;
use delve_shared::{SpriteInstance, Vec3};

/// Interaction reach.
pub const INTERACT_RANGE: f32 = 2.5;

/// Side of the square chests are scattered in, centred on the boss spawn.
pub const CHEST_SCATTER: f32 = 20.0;

/// Tint of a closed chest.
const CLOSED_TINT: [f32; 4] = [1.0; 4];

/// Tint of an opened chest.
const OPEN_TINT: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

/// A chest placed in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Chest {
    /// Catalog index of the object template.
    pub template: usize,
    /// Billboard centre.
    pub position: Vec3,
    /// Billboard size.
    pub scale: f32,
    /// Opened chests stay in the world but can't be opened again.
    pub open: bool,
}

impl Chest {
    /// Places a closed chest on the floor at `(x, z)`.
    #[must_use]
    pub fn new(template_index: usize, template: &ObjectTemplate, x: f32, z: f32) -> Self {
        Self {
            template: template_index,
            position: Vec3::new(x, template.scale * 0.5, z),
            scale: template.scale,
            open: false,
        }
    }

    /// Billboard for the renderer. Opened chests are dimmed.
    #[must_use]
    pub fn sprite(&self) -> SpriteInstance {
        let tint = if self.open { OPEN_TINT } else { CLOSED_TINT };
        SpriteInstance::new(self.position, self.scale, tint, true, self.template as u32)
    }
}

/// First unopened chest, in list order, within reach of `player`.
#[must_use]
pub fn find_openable(chests: &[Chest], player: Vec3) -> Option<usize> {
    chests
        .iter()
        .position(|c| !c.open && c.position.horizontal_distance(player) < INTERACT_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_economy::GameCatalog;

    fn chest(x: f32, z: f32) -> Chest {
        let catalog = GameCatalog::default();
        Chest::new(0, &catalog.objects[0], x, z)
    }

    #[test]
    fn test_first_in_range_wins() {
        let chests = vec![chest(10.0, 0.0), chest(1.0, 0.0), chest(0.5, 0.0)];
        assert_eq!(find_openable(&chests, Vec3::new(0.0, 1.2, 0.0)), Some(1));
    }

    #[test]
    fn test_open_chests_skipped() {
        let mut chests = vec![chest(1.0, 0.0), chest(2.0, 0.0)];
        chests[0].open = true;
        assert_eq!(find_openable(&chests, Vec3::ZERO), Some(1));
        chests[1].open = true;
        assert_eq!(find_openable(&chests, Vec3::ZERO), None);
    }

    #[test]
    fn test_out_of_range() {
        let chests = vec![chest(2.5, 0.0)];
        assert_eq!(find_openable(&chests, Vec3::ZERO), None);
    }

    #[test]
    fn test_open_sprite_dims() {
        let mut c = chest(0.0, 0.0);
        let closed = c.sprite();
        c.open = true;
        assert_ne!(closed.color, c.sprite().color);
        assert!(c.sprite().is_visible());
    }
}
