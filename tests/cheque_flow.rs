//! # End-to-End Cheque Flow
//!
//! Drives the editor the way the browser does: fill in the form, generate a
//! preview, drag a field, then compose the print document and check that
//! every printed text node sits exactly where the preview showed it.

use chequebook::editor::{ChequeEditor, DropOutcome};
use chequebook::form::{BankAccount, ChequeFormData};
use chequebook::layout::{Field, FieldPosition, FieldPositions, Orientation};
use chequebook::print::{self, Rasterized};
use chequebook::template::{RenderedTemplate, Size, TemplateImage};
use chequebook::ValidationError;
use image::{DynamicImage, Rgb, RgbImage};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// A plain 1200x560 template, twice the size it is shown at.
fn template() -> TemplateImage {
    TemplateImage::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        1200,
        560,
        Rgb([245, 240, 225]),
    )))
}

fn sample_form() -> ChequeFormData {
    let mut form = ChequeFormData::default();
    form.payee_name = "ABC Suppliers Ltd.".to_string();
    form.amount = "15000".to_string();
    form.currency = "KWD".to_string();
    form.date = "2025-11-01".to_string();
    form.orientation = Orientation::Horizontal;
    form
}

/// Pull `left:Npx;top:Npx` for a field out of the print document.
fn printed_offset(html: &str, field: Field) -> (i32, i32) {
    let marker = format!("data-field=\"{}\" style=\"left:", field.id());
    let start = html.find(&marker).expect("field node present") + marker.len();
    let rest = &html[start..];
    let left: i32 = rest[..rest.find("px").unwrap()].parse().unwrap();
    let rest = &rest[rest.find("top:").unwrap() + 4..];
    let top: i32 = rest[..rest.find("px").unwrap()].parse().unwrap();
    (left, top)
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_generate_preview_populates_words_and_defaults() {
    let mut editor = ChequeEditor::new(sample_form());
    let positions = *editor.generate_preview().unwrap();

    let words = editor.form().amount_in_words();
    assert!(!words.is_empty());
    assert!(words.chars().next().unwrap().is_uppercase());
    assert_eq!(words, "Fifteen thousand Kuwaiti Dinars");

    let fields = editor.fields();
    assert_eq!(fields.len(), 4);

    assert_eq!(positions.date, FieldPosition::new(360, 6));
    assert_eq!(positions.payee_name, FieldPosition::new(60, 80));
    assert_eq!(positions.amount, FieldPosition::new(380, 80));
    assert_eq!(positions.amount_in_words, FieldPosition::new(55, 100));
}

#[test]
fn test_drag_amount_moves_only_amount() {
    let mut editor = ChequeEditor::new(sample_form());
    editor.generate_preview().unwrap();

    let payload = editor.begin_drag(Field::Amount).unwrap();
    assert_eq!(payload.origin, FieldPosition::new(380, 80));
    assert_eq!(payload.text, "15000");

    let outcome = editor.drop_field(&payload, 20.0, -10.0);
    let expected = FieldPositions::HORIZONTAL.with(Field::Amount, FieldPosition::new(400, 70));
    assert_eq!(outcome, DropOutcome::Applied(expected));
    assert_eq!(editor.positions(), Some(&expected));
}

#[test]
fn test_print_offsets_match_positions() {
    let template = template();
    let mut editor = ChequeEditor::new(sample_form());
    editor.generate_preview().unwrap();
    let payload = editor.begin_drag(Field::Amount).unwrap();
    editor.drop_field(&payload, 20.0, -10.0);

    let rendered =
        RenderedTemplate::new(&template, Orientation::Horizontal).with_display(Size::new(600, 280));
    let html = editor.print_document(Some(&rendered));

    let positions = *editor.positions().unwrap();
    for (field, position) in positions.iter() {
        assert_eq!(
            printed_offset(&html, field),
            (position.x + 5, position.y + 5),
            "{} offset",
            field
        );
    }
    assert_eq!(printed_offset(&html, Field::Amount), (405, 75));

    // Page uses the on-screen size; the raster keeps natural pixels.
    assert!(html.contains("width: 600px; height: 280px;"));
    let plan = editor.print_plan(Some(&rendered));
    assert_eq!(plan.image.size, Size::new(1200, 560));
    assert!(plan.image.data_uri.starts_with("data:image/png;base64,"));
}

#[test]
fn test_print_without_template_is_blank() {
    let mut editor = ChequeEditor::new(sample_form());
    editor.generate_preview().unwrap();

    let plan = editor.print_plan(None);
    assert_eq!(plan.image, Rasterized::blank());
    assert_eq!(plan.page, print::FALLBACK_SIZE);
    assert!(plan.to_html().contains("Fifteen thousand Kuwaiti Dinars"));
}

#[test]
fn test_vertical_preview_and_print_share_frame() {
    let template = template();
    let mut form = sample_form();
    form.orientation = Orientation::Vertical;
    let mut editor = ChequeEditor::new(form);
    editor.generate_preview().unwrap();
    assert_eq!(editor.positions(), Some(&FieldPositions::VERTICAL));

    let rendered = RenderedTemplate::new(&template, Orientation::Vertical);
    assert_eq!(rendered.display, Size::new(560, 1200));

    let preview = editor.preview_html("/api/template?orientation=vertical", rendered.display);
    assert!(preview.contains("width:560px;height:1200px;"));

    let plan = editor.print_plan(Some(&rendered));
    assert_eq!(plan.image.size, Size::new(560, 1200));
    assert_eq!(plan.page, Size::new(560, 1200));
    let date = plan.node(Field::Date).unwrap();
    assert_eq!((date.left, date.top), (6 + 5, 360 + 5));
}

#[test]
fn test_validation_blocks_preview() {
    let mut form = sample_form();
    form.payee_name = "7".to_string();
    let mut editor = ChequeEditor::new(form);
    assert_eq!(
        editor.generate_preview().unwrap_err(),
        ValidationError::PayeeTooShort
    );
    assert!(editor.fields().is_empty());
}

#[test]
fn test_bank_selection_feeds_currency() {
    let mut form = sample_form();
    form.currency = String::new();
    form.amount = "12345.67".to_string();
    form.select_bank(&BankAccount {
        id: "emirates-1".to_string(),
        bank: "Emirates Bank".to_string(),
        branch: "Deira".to_string(),
        account_number: "0192-33".to_string(),
        current_cheque_number: "000501".to_string(),
        currency: "AED".to_string(),
    });

    let mut editor = ChequeEditor::new(form);
    editor.generate_preview().unwrap();
    assert_eq!(
        editor.form().amount_in_words(),
        "Twelve thousand three hundred forty five UAE Dirhams and Sixty seven Cents"
    );
}
