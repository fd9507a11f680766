//! Body-against-boundary contact detection and response.

pub mod contact;
pub mod detection;
pub mod response;

pub use contact::{Contact, ContactFeature};
pub use detection::{check_edge, deepest_contact, find_contacts};
pub use response::{clamp_penetration, resolve_collisions, resolve_contact, Resolution};
