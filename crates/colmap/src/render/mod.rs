//! Preview rendering of template text.

mod substitute;

pub use substitute::{substitute_template_text, SubstitutionInput};
