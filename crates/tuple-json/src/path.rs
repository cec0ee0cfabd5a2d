//! JSON Pointer paths used to locate offending nodes in error reports.

/// Escapes one pointer token (`~` → `~0`, `/` → `~1`).
fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Formats path components as an RFC 6901 pointer. The root is `""`.
pub(crate) fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}
