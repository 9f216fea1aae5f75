//! Diagnostic rendering of arbitrary values.
//!
//! Failure messages want the textual form of whatever the caller compared,
//! but the set of compared types is open-ended and most of them never opt
//! into anything harness-specific. [`render!`] therefore picks the best
//! available representation per call site, at compile time:
//!
//! - types implementing [`std::fmt::Display`] render through it verbatim;
//! - every other type renders as an opaque `<type name at address>`
//!   placeholder, which is non-empty and stable for the duration of a run.
//!
//! The dispatch is autoref specialization: both probe traits define a
//! by-value `render_value`, one on `&Probe<T>` (requiring `Display`) and one
//! on `Probe<T>` (unconstrained). Method resolution prefers the reference
//! impl when it applies, so the fallback only kicks in for types that cannot
//! be displayed.

use std::fmt;

#[doc(hidden)]
pub struct Probe<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> Clone for Probe<'_, T> {
    fn clone(&self) -> Self {
        Probe(self.0)
    }
}

impl<T: ?Sized> Copy for Probe<'_, T> {}

#[doc(hidden)]
pub trait RenderDisplay {
    fn render_value(self) -> String;
}

impl<T: fmt::Display + ?Sized> RenderDisplay for &Probe<'_, T> {
    fn render_value(self) -> String {
        self.0.to_string()
    }
}

#[doc(hidden)]
pub trait RenderOpaque {
    fn render_value(self) -> String;
}

impl<T: ?Sized> RenderOpaque for Probe<'_, T> {
    fn render_value(self) -> String {
        format!("<{} at {:p}>", std::any::type_name::<T>(), self.0)
    }
}

/// Renders a value for a diagnostic message.
///
/// Takes a reference: `render!(&value)`. Returns the `Display` form when the
/// type has one, and an opaque but deterministic placeholder otherwise.
///
/// ```
/// struct Blob([u8; 4]);
///
/// assert_eq!(mame_core::render!(&42), "42");
/// assert!(mame_core::render!(&Blob([0; 4])).contains("Blob"));
/// ```
#[macro_export]
macro_rules! render {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::render::{RenderDisplay as _, RenderOpaque as _};
        (&$crate::render::Probe($value)).render_value()
    }};
}
