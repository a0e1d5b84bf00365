//! Shared text utilities for scenario outline resolution.
//!
//! The crate exposes the placeholder codec used to substitute example values
//! into outline step text, together with the step-definition pattern compiler
//! used by the reference registry. Both live here so the runtime crate and
//! any tooling share one definition of the `<name>` and `{name}` syntaxes.

mod capture;
mod errors;
mod hint;
mod pattern;
mod placeholder;
mod specificity;

pub use capture::{CapturedValue, extract_captured_values};
pub use errors::{PatternError, SyntaxErrorKind};
pub use hint::get_type_pattern;
pub use pattern::{CompiledPattern, build_regex_from_pattern, compile_step_pattern};
pub use placeholder::{
    CLOSE_MARKER, OPEN_MARKER, Substitutions, delimit, placeholder_names, undelimit,
};
pub use specificity::SpecificityScore;
