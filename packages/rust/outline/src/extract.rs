//! Heading extraction from parsed markup.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use glean_shared::HeadingLine;

static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));

/// Edit-link affordance injected into wiki headings.
static EDIT_SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-editsection").expect("valid selector"));

/// Extract all headings in document order.
///
/// Edit-link artifacts are detached from the tree before any text is read.
pub fn extract_outline(html: &str) -> Vec<HeadingLine> {
    let mut doc = Html::parse_document(html);

    let artifacts: Vec<_> = doc.select(&EDIT_SECTION_SEL).map(|el| el.id()).collect();
    for id in artifacts {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    doc.select(&HEADING_SEL)
        .map(|el| HeadingLine {
            level: el.value().name()[1..].parse().unwrap_or(1),
            text: collapse_whitespace(&el.text().collect::<String>()),
        })
        .collect()
}

/// Render headings as `#`-prefixed lines joined by newlines.
pub fn render_outline(headings: &[HeadingLine]) -> String {
    headings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_levels() {
        let headings = extract_outline("<h1>A</h1><h2>B</h2>");
        assert_eq!(render_outline(&headings), "# A\n## B");
    }

    #[test]
    fn all_six_levels_in_document_order() {
        let html = "<h3>c</h3><h1>a</h1><h6>f</h6><h2>b</h2><h5>e</h5><h4>d</h4>";
        let levels: Vec<u8> = extract_outline(html).iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![3, 1, 6, 2, 5, 4]);
    }

    #[test]
    fn strips_edit_sections() {
        let html = r#"<div class="mw-heading mw-heading2">
            <h2 id="History">History</h2>
            <span class="mw-editsection"><span class="mw-editsection-bracket">[</span><a href="/w/index.php?action=edit&section=1">edit</a><span class="mw-editsection-bracket">]</span></span>
          </div>
          <h3>Early period<span class="mw-editsection">[<a>edit</a>]</span></h3>"#;

        let outline = render_outline(&extract_outline(html));
        assert_eq!(outline, "## History\n### Early period");
        assert!(!outline.contains("edit"));
    }

    #[test]
    fn nested_markup_and_whitespace() {
        let html = "<h2>\n  <span>Politics</span> and\n  <i>government</i>\n</h2>";
        let headings = extract_outline(html);
        assert_eq!(headings[0].text, "Politics and government");
    }

    #[test]
    fn empty_heading_is_kept() {
        let headings = extract_outline("<h1>Title</h1><h2>  </h2>");
        assert_eq!(render_outline(&headings), "# Title\n## ");
    }

    #[test]
    fn no_headings_renders_empty() {
        assert_eq!(render_outline(&extract_outline("<p>plain</p>")), "");
    }
}
