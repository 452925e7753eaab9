//! Draggable overlay fields.
//!
//! A field never decides where it ends up. On drag start it hands out a
//! [`DragPayload`] carrying everything the drop target needs; the drop
//! target computes the new position.

use serde::{Deserialize, Serialize};

use super::{Field, FieldPosition, Orientation, TEXT_INSET};
use crate::markup;

/// Snapshot taken when a drag starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// Which field is being dragged.
    pub field: Field,
    /// Position of the field when the drag started.
    pub origin: FieldPosition,
    /// Text shown while dragging.
    pub text: String,
    /// Preview generation the drag belongs to. A drop from an older
    /// generation is discarded.
    pub generation: u64,
}

/// One field's text and position as rendered on the preview surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableField {
    pub field: Field,
    pub text: String,
    pub position: FieldPosition,
    pub orientation: Orientation,
    pub dragging: bool,
}

impl DraggableField {
    pub fn new(field: Field, text: impl Into<String>, position: FieldPosition) -> Self {
        Self {
            field,
            text: text.into(),
            position,
            orientation: Orientation::Horizontal,
            dragging: false,
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    /// Capture the drag payload for this field.
    pub fn drag_start(&self, generation: u64) -> DragPayload {
        DragPayload {
            field: self.field,
            origin: self.position,
            text: self.text.clone(),
            generation,
        }
    }

    /// Inline CSS for the field element.
    pub fn style(&self) -> String {
        let mut style = format!(
            "position:absolute;left:{}px;top:{}px;padding:{}px;{}cursor:move;white-space:nowrap;opacity:{};",
            self.position.x,
            self.position.y,
            TEXT_INSET,
            markup::FIELD_TEXT_STYLE,
            if self.dragging { "0.5" } else { "1" }
        );
        if self.orientation.is_vertical() {
            style.push_str("writing-mode:vertical-rl;");
        }
        style
    }

    /// Markup for the field, wired for native HTML drag and drop.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="cheque-field" draggable="true" data-field="{}" data-x="{}" data-y="{}" style="{}">{}</div>"#,
            self.field.id(),
            self.position.x,
            self.position.y,
            self.style(),
            markup::escape(&self.text)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_start_captures_state() {
        let field = DraggableField::new(Field::Amount, "15000", FieldPosition::new(380, 80));
        let payload = field.drag_start(3);
        assert_eq!(payload.field, Field::Amount);
        assert_eq!(payload.origin, FieldPosition::new(380, 80));
        assert_eq!(payload.text, "15000");
        assert_eq!(payload.generation, 3);
    }

    #[test]
    fn test_style_follows_state() {
        let field = DraggableField::new(Field::Date, "2025-11-01", FieldPosition::new(360, 6));
        let idle = field.style();
        assert!(idle.contains("left:360px;top:6px;"));
        assert!(idle.contains("opacity:1;"));
        assert!(idle.contains("cursor:move;"));
        assert!(!idle.contains("writing-mode"));

        let dragged = field.orientation(Orientation::Vertical).dragging(true).style();
        assert!(dragged.contains("opacity:0.5;"));
        assert!(dragged.contains("writing-mode:vertical-rl;"));
    }

    #[test]
    fn test_html_escapes_text() {
        let field = DraggableField::new(Field::PayeeName, "A&B <Ltd>", FieldPosition::new(1, 2));
        let html = field.to_html();
        assert!(html.contains(r#"data-field="payeeName""#));
        assert!(html.contains("A&amp;B &lt;Ltd&gt;"));
    }
}
