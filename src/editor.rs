//! # Cheque Editor
//!
//! Page-level owner of one cheque being laid out. It holds the form, the
//! single [`FieldPositions`] value, and the preview surface, and hands the
//! positions to the preview and the print renderer as plain arguments.
//!
//! ## Lifecycle
//!
//! ```text
//! generate_preview ──► positions = defaults(orientation), generation += 1
//!        │
//!        ▼
//! begin_drag ──► DragPayload { generation } ──► drop_field ──► positions'
//!        │
//!        ▼
//! print_plan (reads positions, never writes)
//! ```
//!
//! Regenerating or switching orientation replaces the positions wholesale
//! and bumps the generation, so a drag started before it is discarded on
//! drop rather than merged.

use crate::error::ValidationError;
use crate::form::ChequeFormData;
use crate::layout::{DragPayload, DraggableField, Field, FieldPositions, Orientation};
use crate::preview::ChequePreview;
use crate::print::{self, PrintPlan};
use crate::template::{RenderedTemplate, Size};

/// Result of dropping a dragged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The field moved; these are the new positions.
    Applied(FieldPositions),
    /// The drag began before the latest regenerate and was ignored.
    Stale,
    /// No preview has been generated yet.
    NoPreview,
}

/// One cheque's editing state.
#[derive(Debug, Clone, Default)]
pub struct ChequeEditor {
    form: ChequeFormData,
    positions: Option<FieldPositions>,
    generation: u64,
    preview: ChequePreview,
}

impl ChequeEditor {
    pub fn new(form: ChequeFormData) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn form(&self) -> &ChequeFormData {
        &self.form
    }

    /// Edit the form. Changes show up on the next generated preview.
    pub fn form_mut(&mut self) -> &mut ChequeFormData {
        &mut self.form
    }

    pub fn positions(&self) -> Option<&FieldPositions> {
        self.positions.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn preview(&self) -> &ChequePreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut ChequePreview {
        &mut self.preview
    }

    /// Validate the form, derive the amount in words, and lay the fields
    /// out at the orientation's defaults.
    pub fn generate_preview(&mut self) -> Result<&FieldPositions, ValidationError> {
        self.form.validate()?;
        self.form.refresh_amount_in_words();
        self.generation += 1;
        self.preview.reset();
        tracing::debug!(
            generation = self.generation,
            orientation = %self.form.orientation,
            "generated cheque preview"
        );
        Ok(self.positions.insert(FieldPositions::defaults(self.form.orientation)))
    }

    /// Switch orientation. An existing layout resets to the new defaults;
    /// drags made for the old orientation are dropped.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.form.orientation = orientation;
        if self.positions.is_some() {
            self.replace_positions();
        }
    }

    fn replace_positions(&mut self) {
        self.positions = Some(FieldPositions::defaults(self.form.orientation));
        self.generation += 1;
        self.preview.reset();
    }

    /// The fields currently shown on the preview.
    pub fn fields(&self) -> Vec<DraggableField> {
        match &self.positions {
            Some(positions) => self.preview.fields(&self.form, positions),
            None => Vec::new(),
        }
    }

    /// Start dragging a field. `None` while the field is not shown.
    pub fn begin_drag(&mut self, field: Field) -> Option<DragPayload> {
        let payload = self
            .fields()
            .into_iter()
            .find(|f| f.field == field)?
            .drag_start(self.generation);
        self.preview.drag_started(field);
        Some(payload)
    }

    /// Drop a dragged field after the pointer moved by `(dx, dy)`.
    pub fn drop_field(&mut self, payload: &DragPayload, dx: f64, dy: f64) -> DropOutcome {
        let Some(positions) = self.positions else {
            return DropOutcome::NoPreview;
        };
        if payload.generation != self.generation {
            tracing::debug!(
                field = %payload.field,
                payload_generation = payload.generation,
                current_generation = self.generation,
                "discarding drop from an earlier preview"
            );
            self.preview.reset();
            return DropOutcome::Stale;
        }

        let next = self.preview.drop(&positions, payload, dx, dy);
        self.positions = Some(next);
        DropOutcome::Applied(next)
    }

    /// Preview markup. Empty fields until a preview has been generated.
    pub fn preview_html(&self, template_src: &str, display: Size) -> String {
        self.preview
            .to_html(template_src, display, &self.form, self.positions.as_ref())
    }

    /// Snapshot the current layout for printing.
    pub fn print_plan(&self, template: Option<&RenderedTemplate<'_>>) -> PrintPlan {
        let positions = self
            .positions
            .unwrap_or_else(|| FieldPositions::defaults(self.form.orientation));
        print::plan(template, &self.form, &positions)
    }

    /// The standalone print document for the current layout.
    pub fn print_document(&self, template: Option<&RenderedTemplate<'_>>) -> String {
        self.print_plan(template).to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldPosition;

    fn editor() -> ChequeEditor {
        let mut form = ChequeFormData::default();
        form.payee_name = "ABC Suppliers Ltd.".to_string();
        form.amount = "15000".to_string();
        form.currency = "KWD".to_string();
        form.date = "2025-11-01".to_string();
        ChequeEditor::new(form)
    }

    #[test]
    fn test_no_fields_before_preview() {
        let mut editor = editor();
        assert!(editor.fields().is_empty());
        assert_eq!(editor.begin_drag(Field::Date), None);
    }

    #[test]
    fn test_invalid_form_does_not_start_preview() {
        let mut editor = editor();
        editor.form_mut().amount = "0".to_string();
        assert_eq!(editor.generate_preview(), Err(ValidationError::AmountZero));
        assert!(editor.positions().is_none());
        assert_eq!(editor.generation(), 0);
    }

    #[test]
    fn test_regenerate_resets_drags() {
        let mut editor = editor();
        editor.generate_preview().unwrap();
        let payload = editor.begin_drag(Field::Date).unwrap();
        editor.drop_field(&payload, 10.0, 10.0);
        assert_eq!(editor.positions().unwrap().date, FieldPosition::new(370, 16));

        editor.generate_preview().unwrap();
        assert_eq!(editor.positions(), Some(&FieldPositions::HORIZONTAL));
    }

    #[test]
    fn test_stale_drop_is_discarded() {
        let mut editor = editor();
        editor.generate_preview().unwrap();
        let payload = editor.begin_drag(Field::Amount).unwrap();
        editor.generate_preview().unwrap();
        assert_eq!(editor.drop_field(&payload, 20.0, -10.0), DropOutcome::Stale);
        assert_eq!(editor.positions(), Some(&FieldPositions::HORIZONTAL));
    }

    #[test]
    fn test_orientation_switch_discards_layout() {
        let mut editor = editor();
        editor.generate_preview().unwrap();
        let payload = editor.begin_drag(Field::PayeeName).unwrap();
        editor.drop_field(&payload, 3.0, 3.0);
        editor.set_orientation(Orientation::Vertical);
        assert_eq!(editor.positions(), Some(&FieldPositions::VERTICAL));
        assert_eq!(editor.drop_field(&payload, 1.0, 1.0), DropOutcome::Stale);
    }

    #[test]
    fn test_drop_without_preview() {
        let mut editor = editor();
        let payload = DragPayload {
            field: Field::Amount,
            origin: FieldPosition::new(0, 0),
            text: String::new(),
            generation: 0,
        };
        assert_eq!(editor.drop_field(&payload, 1.0, 1.0), DropOutcome::NoPreview);
    }

    #[test]
    fn test_preview_html_hides_fields_before_generate() {
        let editor = editor();
        let html = editor.preview_html("/api/template", Size::new(600, 280));
        assert!(!html.contains("cheque-field"));
    }
}
