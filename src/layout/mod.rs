//! # Field Position Model
//!
//! Holds one `{x, y}` pixel coordinate per overlay field, measured from the
//! top-left corner of the template image as it is displayed.
//!
//! ## Default Layouts
//!
//! | Field | Horizontal | Vertical |
//! |-------|------------|----------|
//! | date | (360, 6) | (6, 360) |
//! | payeeName | (60, 80) | (80, 60) |
//! | amount | (380, 80) | (80, 380) |
//! | amountInWords | (55, 100) | (100, 55) |
//!
//! Updates never mutate in place: [`FieldPositions::apply_delta`] returns a
//! new value so the owner can swap it in wholesale.

pub mod drag;

pub use drag::{DragPayload, DraggableField};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Padding around field text on the preview. Print places each text node
/// this many pixels right of and below the field position, so the text
/// lands where the padded preview showed it.
pub const TEXT_INSET: i32 = 5;

/// One of the four text fields overlaid on the cheque template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "payeeName")]
    PayeeName,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "amountInWords")]
    AmountInWords,
}

impl Field {
    /// All fields, in render order.
    pub const ALL: [Field; 4] = [
        Field::Date,
        Field::PayeeName,
        Field::Amount,
        Field::AmountInWords,
    ];

    /// Identifier used in markup and the JSON API.
    pub fn id(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::PayeeName => "payeeName",
            Field::Amount => "amount",
            Field::AmountInWords => "amountInWords",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Cheque orientation. Decides the default layout and whether the template
/// is displayed rotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(format!("unknown orientation '{}'", other)),
        }
    }
}

/// Integer pixel offset from the template's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPosition {
    pub x: i32,
    pub y: i32,
}

impl FieldPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by a pointer displacement, rounding to whole pixels.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: (self.x as f64 + dx).round() as i32,
            y: (self.y as f64 + dy).round() as i32,
        }
    }
}

/// Positions of all four fields. Every field always has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPositions {
    pub date: FieldPosition,
    pub payee_name: FieldPosition,
    pub amount: FieldPosition,
    pub amount_in_words: FieldPosition,
}

impl FieldPositions {
    pub const HORIZONTAL: Self = Self {
        date: FieldPosition::new(360, 6),
        payee_name: FieldPosition::new(60, 80),
        amount: FieldPosition::new(380, 80),
        amount_in_words: FieldPosition::new(55, 100),
    };

    pub const VERTICAL: Self = Self {
        date: FieldPosition::new(6, 360),
        payee_name: FieldPosition::new(80, 60),
        amount: FieldPosition::new(80, 380),
        amount_in_words: FieldPosition::new(100, 55),
    };

    /// The canonical layout for an orientation.
    pub fn defaults(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::HORIZONTAL,
            Orientation::Vertical => Self::VERTICAL,
        }
    }

    /// Replace every entry with the orientation's defaults. Earlier drags
    /// are discarded.
    pub fn reset_to_default(&mut self, orientation: Orientation) {
        *self = Self::defaults(orientation);
    }

    pub fn get(&self, field: Field) -> FieldPosition {
        match field {
            Field::Date => self.date,
            Field::PayeeName => self.payee_name,
            Field::Amount => self.amount,
            Field::AmountInWords => self.amount_in_words,
        }
    }

    fn slot(&mut self, field: Field) -> &mut FieldPosition {
        match field {
            Field::Date => &mut self.date,
            Field::PayeeName => &mut self.payee_name,
            Field::Amount => &mut self.amount,
            Field::AmountInWords => &mut self.amount_in_words,
        }
    }

    /// Return a copy with `field` replaced by `position`.
    pub fn with(&self, field: Field, position: FieldPosition) -> Self {
        let mut next = *self;
        *next.slot(field) = position;
        next
    }

    /// Return a copy with `field` moved by `(dx, dy)` and rounded to whole
    /// pixels. No bounds checking: a field may land outside the template.
    ///
    /// ```
    /// use chequebook::layout::{Field, FieldPosition, FieldPositions, Orientation};
    ///
    /// let positions = FieldPositions::defaults(Orientation::Horizontal);
    /// let moved = positions.apply_delta(Field::Amount, 20.0, -10.0);
    /// assert_eq!(moved.amount, FieldPosition::new(400, 70));
    /// assert_eq!(moved.date, positions.date);
    /// ```
    pub fn apply_delta(&self, field: Field, dx: f64, dy: f64) -> Self {
        self.with(field, self.get(field).offset(dx, dy))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldPosition)> + '_ {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

impl Default for FieldPositions {
    fn default() -> Self {
        Self::defaults(Orientation::default())
    }
}
