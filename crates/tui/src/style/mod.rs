//! Visual styling.
//!
//! Themes map the render pipeline's semantic [`StyleTag`]s onto terminal
//! colors. Nothing outside the terminal host looks at colors.
//!
//! [`StyleTag`]: crate::render::StyleTag

mod theme;

pub use theme::{Theme, by_name, default_theme, names};
