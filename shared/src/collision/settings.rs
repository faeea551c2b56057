/*!
Grounding thresholds.

Contacts are classified against the character's origin (its feet), so both
limits are expressed relative to that point.

Notes
- Distances are in meters.
- Override per character through [`super::GroundSettings`] when needed.
*/

/// Contacts at or above `character_y + GROUND_CONTACT_HEIGHT` never count as ground.
/// Excludes walls and obstacles touching the upper half of the body.
pub const GROUND_CONTACT_HEIGHT: f32 = 1.0;

/// Minimum `|normal.y|` of a ground contact.
/// 0.75 allows surfaces up to roughly 41 degrees from horizontal.
pub const GROUND_NORMAL_LEVEL: f32 = 0.75;
