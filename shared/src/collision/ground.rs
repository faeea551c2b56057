use super::{
    settings::{GROUND_CONTACT_HEIGHT, GROUND_NORMAL_LEVEL},
    types::ContactRecord,
};
use crate::character::CharacterState;

/// Thresholds used to decide whether a contact supports the character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSettings {
    /// Height above the character origin below which a contact may count as ground.
    pub contact_height: f32,
    /// Minimum `|normal.y|` (exclusive).
    pub normal_level: f32,
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            contact_height: GROUND_CONTACT_HEIGHT,
            normal_level: GROUND_NORMAL_LEVEL,
        }
    }
}

impl GroundSettings {
    /// Is this contact below the body midline with a near-vertical normal?
    #[inline]
    pub fn is_ground_contact(&self, contact: &ContactRecord, character_y: f32) -> bool {
        contact.position.y < character_y + self.contact_height
            && contact.normal.y.abs() > self.normal_level
    }

    /// Classify one contact event. Only ever sets `on_ground`, never clears it;
    /// the movement step resets the flag.
    pub fn classify(&self, state: &mut CharacterState, contacts: &[ContactRecord], character_y: f32) {
        for contact in contacts {
            if self.is_ground_contact(contact, character_y) {
                state.on_ground = true;
            }
        }
    }
}

/// Classify `contacts` with the default thresholds.
#[inline]
pub fn on_collision(state: &mut CharacterState, contacts: &[ContactRecord], character_y: f32) {
    GroundSettings::default().classify(state, contacts, character_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::{Point3, Vec3};

    const CHARACTER_Y: f32 = 2.0;

    fn contact(y_offset: f32, normal: Vec3) -> ContactRecord {
        ContactRecord::new(Point3::new(0.3, CHARACTER_Y + y_offset, -0.1), normal)
    }

    #[test]
    fn low_contact_with_vertical_normal_is_ground() {
        let mut state = CharacterState::default();
        on_collision(&mut state, &[contact(0.5, Vec3::y())], CHARACTER_Y);
        assert!(state.on_ground);
    }

    #[test]
    fn downward_normal_counts_by_magnitude() {
        let mut state = CharacterState::default();
        on_collision(&mut state, &[contact(0.0, -Vec3::y())], CHARACTER_Y);
        assert!(state.on_ground);
    }

    #[test]
    fn horizontal_normal_is_not_ground() {
        let mut state = CharacterState::default();
        on_collision(&mut state, &[contact(0.5, Vec3::x())], CHARACTER_Y);
        assert!(!state.on_ground);
    }

    #[test]
    fn contact_above_cutoff_is_not_ground() {
        let mut state = CharacterState::default();
        on_collision(&mut state, &[contact(1.5, Vec3::y())], CHARACTER_Y);
        assert!(!state.on_ground);

        // The cutoff itself is exclusive.
        on_collision(&mut state, &[contact(1.0, Vec3::y())], CHARACTER_Y);
        assert!(!state.on_ground);
    }

    #[test]
    fn steep_slope_is_not_ground() {
        // ~45 degrees: |n.y| = 0.707 < 0.75
        let mut state = CharacterState::default();
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        on_collision(&mut state, &[contact(0.2, n)], CHARACTER_Y);
        assert!(!state.on_ground);
    }

    #[test]
    fn later_contacts_do_not_clear_ground() {
        let mut state = CharacterState::default();
        let contacts = [
            contact(0.1, Vec3::y()),
            contact(0.5, Vec3::x()),
            contact(1.7, Vec3::y()),
        ];
        on_collision(&mut state, &contacts, CHARACTER_Y);
        assert!(state.on_ground);
    }

    #[test]
    fn empty_event_leaves_state_untouched() {
        let mut state = CharacterState::default();
        on_collision(&mut state, &[], CHARACTER_Y);
        assert_eq!(state, CharacterState::default());
    }

    #[test]
    fn custom_thresholds_apply() {
        let settings = GroundSettings {
            contact_height: 2.0,
            normal_level: 0.5,
        };
        let mut state = CharacterState::default();
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        settings.classify(&mut state, &[contact(1.5, n)], CHARACTER_Y);
        assert!(state.on_ground);
    }
}
