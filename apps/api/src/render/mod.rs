// Page rendering: resolves the template for a stored page and composes its sections.
// Rendering never fails outward; errors degrade to a fallback view.

pub mod handlers;
pub mod page;

pub use page::{render_page, RenderedPage};
