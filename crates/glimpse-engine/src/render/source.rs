use super::style::StyleDescriptor;
use crate::parsing::FragmentMarker;

/// Placeholder emitted when the user has no configuration block.
pub const EMPTY_USER_CONFIG: &str = "// no user configuration";

/// Page setup: transparent, sized to the content, no margin.
const PAGE_SETUP: &str = "#set page(fill: none, width: auto, height: auto, margin: 0pt)";

/// Pin text edges to glyph bounds so the image is cropped tight.
const TEXT_EDGES: &str = r#"#set text(top-edge: "bounds", bottom-edge: "bounds")"#;

/// Builds the self-contained compiler source for one raw fragment.
///
/// `raw_fragment` is the text of a scanned span including its markers; the
/// first and last two bytes are dropped. `user_config` is passed through
/// verbatim between the styling directives and the fragment body.
pub fn build_source(raw_fragment: &str, style: &StyleDescriptor, user_config: &str) -> String {
    let user_config = if user_config.trim().is_empty() {
        EMPTY_USER_CONFIG
    } else {
        user_config.trim_end()
    };

    format!(
        "{PAGE_SETUP}\n{TEXT_EDGES}\n{styling}\n{user_config}\n{body}\n",
        styling = styling_directive(style),
        body = fragment_body(raw_fragment),
    )
}

/// The fragment text without its opening and closing markers.
///
/// Fragments too short to hold both markers have no body.
pub fn fragment_body(raw_fragment: &str) -> &str {
    let width = FragmentMarker::WIDTH;
    if raw_fragment.len() < 2 * width {
        return "";
    }
    raw_fragment
        .get(width..raw_fragment.len() - width)
        .unwrap_or("")
}

fn styling_directive(style: &StyleDescriptor) -> String {
    let c = style.foreground;
    format!(
        r#"#set text(fill: rgb({}, {}, {}), weight: "{}", size: {}pt)"#,
        c.r, c.g, c.b, style.font_weight, style.font_size_pt
    )
}
