//! Resolution of scenario outline steps.
//!
//! A scenario outline declares step [`Template`]s containing `<placeholder>`
//! tokens and one or more [`ExamplesTable`]s supplying values for them. This
//! crate binds templates to example [`Row`]s, producing
//! [`ResolvedInvocation`]s whose text and attached [`StepArgument`] have been
//! substituted with the same values, and finds the step definition a
//! template resolves to by probing rows in order until a [`StepMatcher`]
//! reports a match.
//!
//! ```
//! use outline_steps::{
//!     ExamplesTable, Location, OutlineContext, ScenarioOutline, StepRegistry, Template,
//! };
//!
//! let step = Template::new("en", Location::new("cukes.feature", 4), "Given ", "I have <n> cucumbers")
//!     .expect("valid template");
//! let examples = ExamplesTable::from_raw(vec![
//!     vec!["n".into()],
//!     vec!["five".into()],
//!     vec!["5".into()],
//! ])
//! .expect("valid examples");
//! let outline = ScenarioOutline::new("Scenario Outline", "eating", Location::new("cukes.feature", 3))
//!     .with_step(step)
//!     .with_examples(examples);
//!
//! let mut registry = StepRegistry::new();
//! registry.register("I have {n:u32} cucumbers").expect("valid pattern");
//!
//! let template = &outline.steps()[0];
//! let outcome = template.first_match(outline.example_rows(), &registry);
//! assert_eq!(outcome.step_match().map(|m| m.step_name()), Some("I have 5 cucumbers"));
//! ```
//!
//! Templates themselves are never executed. Presenting one on its own with
//! [`Template::present`] or [`Template::accept`] always yields a skipped
//! [`TemplateResult`].

pub mod argument;
pub mod config;
pub mod examples;
pub mod invocation;
pub mod matcher;
pub mod outline;
pub mod registry;
pub mod reporting;
pub mod resolver;
pub mod sexp;
pub mod template;
pub mod types;

pub use argument::{DataTable, DocString, StepArgument};
pub use config::{GUESS_ENV, MatchConfig};
pub use examples::{Cell, ExamplesError, ExamplesTable, Row};
pub use invocation::{ResolvedInvocation, consumed_cells};
pub use matcher::{MatchError, MatchLookup, MatchOutcome, NoStepMatch, StepMatch, StepMatcher};
pub use outline::{OutlineContext, OutlineError, ScenarioOutline, outlines_from_feature};
pub use outline_patterns::{Substitutions, delimit, undelimit};
pub use registry::{RegistryError, StepRegistry};
#[cfg(feature = "diagnostics")]
pub use reporting::json;
pub use reporting::pretty::PrettyRenderer;
pub use reporting::{RenderTarget, StepRenderer, StepStatus, TemplateResult};
pub use resolver::{first_match, first_resolved_match};
pub use sexp::Sexp;
pub use template::Template;
pub use types::{Language, Location, TemplateError};
