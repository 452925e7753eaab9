//! # Chequebook - Cheque Layout and Print Library
//!
//! Chequebook lays out the variable text of a cheque (date, payee, amount,
//! amount in words) over a scanned cheque template and reproduces that
//! exact layout on paper. It provides:
//!
//! - **Amount to words**: English wording with currency names and cents
//! - **Field positions**: per-orientation default layouts and drag updates
//! - **Preview surface**: the on-screen editor and drop target
//! - **Print renderer**: a self-contained print document at identical offsets
//! - **Server**: a browser editor over HTTP
//!
//! ## Quick Start
//!
//! ```no_run
//! use chequebook::{
//!     editor::ChequeEditor,
//!     form::ChequeFormData,
//!     layout::Field,
//!     template::{RenderedTemplate, TemplateImage},
//! };
//!
//! # async fn example() -> Result<(), chequebook::ChequebookError> {
//! let template = TemplateImage::load("cheque.png").await?;
//!
//! let mut form = ChequeFormData::default();
//! form.payee_name = "ABC Suppliers Ltd.".to_string();
//! form.amount = "15000".to_string();
//! form.currency = "KWD".to_string();
//! form.date = "2025-11-01".to_string();
//!
//! let mut editor = ChequeEditor::new(form);
//! editor.generate_preview()?;
//!
//! // Nudge the amount 20px right and 10px up
//! let payload = editor.begin_drag(Field::Amount).unwrap();
//! editor.drop_field(&payload, 20.0, -10.0);
//!
//! let rendered = RenderedTemplate::new(&template, editor.form().orientation);
//! let html = editor.print_document(Some(&rendered));
//! # let _ = html;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`words`] | Amount-to-words converter and currency table |
//! | [`layout`] | Field positions and draggable fields |
//! | [`form`] | Cheque form data, validation, bank accounts |
//! | [`preview`] | Preview surface and drop handling |
//! | [`editor`] | Page-level owner of form, positions and preview |
//! | [`print`] | Print plan, HTML document, print dispatch |
//! | [`template`] | Template image loading and orientation |
//! | [`server`] | HTTP server for the browser editor |
//! | [`error`] | Error types |

pub mod editor;
pub mod error;
pub mod form;
pub mod layout;
pub mod markup;
pub mod preview;
pub mod print;
pub mod server;
pub mod template;
pub mod words;

// Re-exports for convenience
pub use editor::ChequeEditor;
pub use error::{ChequebookError, ValidationError};
pub use form::ChequeFormData;
pub use layout::{Field, FieldPosition, FieldPositions, Orientation};
