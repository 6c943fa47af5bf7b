//! HTML template assembly.

use crate::ssr::render::RenderedPage;

/// Marker replaced by the preload `<link>` tags computed from the manifest.
pub const PRELOAD_LINKS_MARKER: &str = "<!--preload-links-->";

/// Marker replaced by the rendered application HTML.
pub const APP_HTML_MARKER: &str = "<!--app-html-->";

/// Substitute both markers in the template with the rendered fragments.
///
/// Each marker is replaced at its first occurrence only. A marker that does
/// not appear in the template is skipped silently; the rest of the template
/// is emitted unmodified.
pub fn assemble(template: &str, page: &RenderedPage) -> String {
    template
        .replacen(PRELOAD_LINKS_MARKER, &page.preload_links, 1)
        .replacen(APP_HTML_MARKER, &page.app_html, 1)
}
