//! # Print Renderer
//!
//! Reproduces the on-screen preview as a standalone printable document.
//!
//! Printing is split in two:
//!
//! - [`PrintPlan`] is pure data: the rasterized template, the page size,
//!   and one text node per field. [`PrintPlan::to_html`] turns it into a
//!   self-contained HTML document.
//! - [`dispatch`] is the effectful shell that loads that document into a
//!   hidden frame and opens the print dialog.
//!
//! ## Coordinate Contract
//!
//! ```text
//! raster:  natural template pixels   (e.g. 1200 x 560)
//! page:    on-screen display size    (e.g.  600 x 280)
//! text:    left = x + 5, top = y + 5 (field position + TEXT_INSET)
//! ```
//!
//! The raster is stretched to fill the page, so the on-screen size must not
//! change between preview and print without re-measuring.

pub mod dispatch;
pub mod raster;

pub use dispatch::{DispatchReport, PrintFrame, PrintTimings, Readiness, dispatch};
pub use raster::{EMPTY_DATA_URI, FALLBACK_SIZE, Rasterized, rasterize};

use crate::form::ChequeFormData;
use crate::layout::{Field, FieldPositions, Orientation, TEXT_INSET};
use crate::markup;
use crate::template::{RenderedTemplate, Size};

/// An absolutely positioned line of text on the printed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub field: Field,
    pub text: String,
    pub left: i32,
    pub top: i32,
}

/// Everything needed to draw the printed cheque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPlan {
    /// Background image, stretched to the page size.
    pub image: Rasterized,
    /// On-screen size of the template, used as the page container size.
    pub page: Size,
    pub orientation: Orientation,
    pub nodes: Vec<TextNode>,
    pub timings: PrintTimings,
}

impl PrintPlan {
    /// Lay out the text nodes for `positions` over an already rasterized
    /// template.
    pub fn new(
        image: Rasterized,
        page: Size,
        form: &ChequeFormData,
        positions: &FieldPositions,
    ) -> Self {
        let nodes = positions
            .iter()
            .map(|(field, position)| TextNode {
                field,
                text: form.field_text(field).to_string(),
                left: position.x + TEXT_INSET,
                top: position.y + TEXT_INSET,
            })
            .collect();

        Self {
            image,
            page,
            orientation: form.orientation,
            nodes,
            timings: PrintTimings::default(),
        }
    }

    pub fn timings(mut self, timings: PrintTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn node(&self, field: Field) -> Option<&TextNode> {
        self.nodes.iter().find(|n| n.field == field)
    }

    /// The standalone print document.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Cheque</title>\n");
        html.push_str(&format!(
            "<meta name=\"chequebook-remove-after\" content=\"{}\">\n",
            self.timings.remove_after.as_millis()
        ));
        html.push_str("<style>\n");
        html.push_str("@page { size: landscape; margin: 0; }\n");
        html.push_str("html, body { margin: 0; padding: 0; }\n");
        html.push_str(&format!(
            ".cheque {{ position: relative; width: {}px; height: {}px; overflow: hidden; }}\n",
            self.page.width, self.page.height
        ));
        html.push_str(
            ".cheque img { position: absolute; left: 0; top: 0; width: 100%; height: 100%; }\n",
        );
        html.push_str(&format!(
            ".field {{ position: absolute; white-space: nowrap; {} }}\n",
            markup::FIELD_TEXT_STYLE.replace(';', "; ").trim_end()
        ));
        if self.orientation.is_vertical() {
            html.push_str(".field { writing-mode: vertical-rl; }\n");
        }
        html.push_str("</style>\n</head>\n<body>\n<div class=\"cheque\">\n");
        html.push_str(&format!(
            "<img id=\"cheque-template\" src=\"{}\" alt=\"\">\n",
            self.image.data_uri
        ));
        for node in &self.nodes {
            html.push_str(&format!(
                "<div class=\"field\" data-field=\"{}\" style=\"left:{}px;top:{}px\">{}</div>\n",
                node.field.id(),
                node.left,
                node.top,
                markup::escape(&node.text)
            ));
        }
        html.push_str("</div>\n");
        html.push_str(&print_script(self.timings));
        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Snapshot the current layout into a print plan.
///
/// A missing template prints on a blank 800×400 page.
pub fn plan(
    template: Option<&RenderedTemplate<'_>>,
    form: &ChequeFormData,
    positions: &FieldPositions,
) -> PrintPlan {
    let image = rasterize(template);
    let page = template.map(|t| t.display).unwrap_or(FALLBACK_SIZE);
    PrintPlan::new(image, page, form, positions)
}

/// Browser-side print trigger: prints once the page has loaded and the
/// template is decoded, or when the settle limit passes.
fn print_script(timings: PrintTimings) -> String {
    format!(
        r#"<script>
(function () {{
  var done = false;
  function go() {{
    if (done) return;
    done = true;
    window.focus();
    window.print();
  }}
  var limit = setTimeout(go, {settle});
  window.addEventListener("load", function () {{
    var img = document.getElementById("cheque-template");
    var decoded = img && img.decode ? img.decode() : Promise.resolve();
    decoded.then(go, go).then(function () {{ clearTimeout(limit); }});
  }});
}})();
</script>
"#,
        settle = timings.settle_limit.as_millis()
    )
}
