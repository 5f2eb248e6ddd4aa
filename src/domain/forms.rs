//! UI-side state for the graduates screens: the registration form, the
//! update dialog and the list. Nothing here is validated until submission.

pub mod fields;
pub mod list;
pub mod register;
pub mod update;

pub use fields::{Draft, ExperienceField, GraduateField};
pub use list::GraduateListState;
pub use register::RegisterForm;
pub use update::{decode_graduate_reply, UpdateForm, UpdateOutcome, FALLBACK_REVIEWER_ID};
