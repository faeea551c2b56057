/*!
Contact handling root module.

- types:    contact data exchanged between the physics scene and the classifier
- settings: grounding thresholds
- ground:   classification of contact events into "grounded" or not
*/

pub mod ground;
pub mod settings;
pub mod types;

pub use ground::{GroundSettings, on_collision};
pub use types::{ContactEvent, ContactRecord, Point3, Quat, Vec3};
