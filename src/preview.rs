//! # Cheque Preview Surface
//!
//! The on-screen editor: the template image with the four draggable fields
//! laid over it. It is also the drop target, turning a drop into a new
//! [`FieldPositions`] value for its owner to keep.
//!
//! The preview never owns the positions. They are passed in on every call,
//! so the print renderer reads exactly the value the preview was drawn from.

use crate::form::ChequeFormData;
use crate::layout::{DragPayload, DraggableField, Field, FieldPositions, Orientation};
use crate::markup;
use crate::template::Size;

/// Drag state of the preview surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChequePreview {
    /// A drag is hovering over the surface. Affects the border only.
    drag_over: bool,
    /// Field currently being dragged, shown translucent.
    dragging: Option<Field>,
}

impl ChequePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn dragging(&self) -> Option<Field> {
        self.dragging
    }

    /// Forget any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn drag_started(&mut self, field: Field) {
        self.dragging = Some(field);
    }

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Handle a drop: add the pointer displacement since drag start to the
    /// payload's starting position, rounded to whole pixels, and return the
    /// updated positions. Only the dragged field changes.
    pub fn drop(
        &mut self,
        positions: &FieldPositions,
        payload: &DragPayload,
        dx: f64,
        dy: f64,
    ) -> FieldPositions {
        self.drag_over = false;
        self.dragging = None;
        positions.with(payload.field, payload.origin.offset(dx, dy))
    }

    /// The overlay fields to show. Empty until payee, amount and date are
    /// all present.
    pub fn fields(
        &self,
        form: &ChequeFormData,
        positions: &FieldPositions,
    ) -> Vec<DraggableField> {
        if !form.has_preview_content() {
            return Vec::new();
        }
        Field::ALL
            .into_iter()
            .map(|field| {
                DraggableField::new(field, form.field_text(field), positions.get(field))
                    .orientation(form.orientation)
                    .dragging(self.dragging == Some(field))
            })
            .collect()
    }

    /// Markup for the preview surface.
    ///
    /// `template_src` must point at the template already rotated for the
    /// form's orientation; `display` is the size it is shown at. Without
    /// positions only the template is drawn.
    pub fn to_html(
        &self,
        template_src: &str,
        display: Size,
        form: &ChequeFormData,
        positions: Option<&FieldPositions>,
    ) -> String {
        let border = if self.drag_over {
            "2px dashed #2563eb"
        } else {
            "2px solid #d1d5db"
        };
        let mut html = format!(
            r#"<div class="cheque-preview" data-orientation="{}" style="position:relative;display:inline-block;width:{}px;height:{}px;border:{};">"#,
            orientation_attr(form.orientation),
            display.width,
            display.height,
            border
        );
        html.push_str(&format!(
            r#"<img class="cheque-template" src="{}" alt="Cheque template" draggable="false" style="display:block;width:{}px;height:{}px;">"#,
            markup::escape(template_src),
            display.width,
            display.height
        ));
        if let Some(positions) = positions {
            for field in self.fields(form, positions) {
                html.push_str(&field.to_html());
            }
        }
        html.push_str("</div>");
        html
    }
}

fn orientation_attr(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Horizontal => "horizontal",
        Orientation::Vertical => "vertical",
    }
}
