//! # Filter Widgets
//!
//! One editor per attribute, chosen by [`AttributeKind`]:
//!
//! | Kind | Widget | Pending value |
//! |------|--------|---------------|
//! | `NUMBER` | [`RangeWidget`] | `Range(min, max)` |
//! | `BOOLEAN` | [`ToggleWidget`] | `Bool` |
//! | `ENUM`, `VARCHAR` with options | [`SelectWidget`] | `MultiSelect` or `Text` |
//! | `DATE` | [`DateRangeWidget`] | `DateRange(from, to)` |
//!
//! A `VARCHAR` attribute without options has no widget.
//!
//! ## Editing Rules
//!
//! - Widgets only ever write to `pending`.
//! - Each discrete action that changes `pending` yields exactly one
//!   [`Interaction`], and so does a range keystroke that only changes the
//!   widget's own text. An action with no net effect yields none. The session
//!   remembers the last interaction as the hint for the next availability
//!   refresh.
//! - Descriptor availability data is advisory. It marks options unavailable
//!   and supplies range extents, but never rewrites a value already in
//!   `pending`.

pub mod date;
pub mod range;
pub mod select;
pub mod toggle;

pub use date::DateRangeWidget;
pub use range::{Bound, RangeWidget};
pub use select::{OptionView, SelectWidget};
pub use toggle::ToggleWidget;

use crate::error::{ListingsError, Result};
use crate::filters::{FilterSet, FilterStore};
use crate::model::{AttributeDescriptor, AttributeKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// A user action that changed `pending` for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub code: String,
}

impl Interaction {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A discrete user action, routed to the widget for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    EditMin(String),
    EditMax(String),
    /// Leaving the range inputs; commits a one-sided range.
    FinishRange,
    Toggle(String),
    Set(bool),
    PickDates { from: String, to: Option<String> },
    Clear,
}

impl WidgetAction {
    fn name(&self) -> &'static str {
        match self {
            WidgetAction::EditMin(_) | WidgetAction::EditMax(_) | WidgetAction::FinishRange => {
                "range"
            }
            WidgetAction::Toggle(_) => "select",
            WidgetAction::Set(_) => "boolean",
            WidgetAction::PickDates { .. } => "date",
            WidgetAction::Clear => "clear",
        }
    }
}

/// What a UI needs to draw a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetView {
    Range {
        min_text: String,
        max_text: String,
        min_placeholder: f64,
        max_placeholder: f64,
    },
    Select {
        multiple: bool,
        options: Vec<OptionView>,
    },
    Toggle {
        state: Option<bool>,
        available: Option<BTreeSet<bool>>,
    },
    DateRange {
        from: Option<String>,
        to: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Range(RangeWidget),
    Select(SelectWidget),
    Toggle(ToggleWidget),
    DateRange(DateRangeWidget),
}

impl Widget {
    pub fn for_attribute(attr: &AttributeDescriptor, pending: &FilterSet) -> Option<Widget> {
        let code = attr.code.clone();
        match attr.kind {
            AttributeKind::Number => Some(Widget::Range(RangeWidget::new(code, pending))),
            AttributeKind::Boolean => Some(Widget::Toggle(ToggleWidget::new(code))),
            AttributeKind::Enum => Some(Widget::Select(SelectWidget::new(code))),
            AttributeKind::Varchar if !attr.options.is_empty() => {
                Some(Widget::Select(SelectWidget::new(code)))
            }
            AttributeKind::Varchar => None,
            AttributeKind::Date => Some(Widget::DateRange(DateRangeWidget::new(code))),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Widget::Range(w) => w.code(),
            Widget::Select(w) => w.code(),
            Widget::Toggle(w) => w.code(),
            Widget::DateRange(w) => w.code(),
        }
    }

    pub fn sync(&mut self, pending: &FilterSet) {
        if let Widget::Range(w) = self {
            w.sync(pending);
        }
    }

    pub fn handle(
        &mut self,
        action: WidgetAction,
        attr: &AttributeDescriptor,
        store: &mut FilterStore,
    ) -> Result<Option<Interaction>> {
        let hit = match (self, action) {
            (Widget::Range(w), WidgetAction::EditMin(text)) => w.edit(Bound::Min, text, store),
            (Widget::Range(w), WidgetAction::EditMax(text)) => w.edit(Bound::Max, text, store),
            (Widget::Range(w), WidgetAction::FinishRange) => w.finish_edit(attr, store),
            (Widget::Range(w), WidgetAction::Clear) => w.clear(store),
            (Widget::Select(w), WidgetAction::Toggle(option)) => w.toggle(&option, attr, store),
            (Widget::Select(w), WidgetAction::Clear) => w.clear(store),
            (Widget::Toggle(w), WidgetAction::Set(value)) => w.click(value, store),
            (Widget::Toggle(w), WidgetAction::Clear) => w.clear(store),
            (Widget::DateRange(w), WidgetAction::PickDates { from, to }) => {
                w.pick(&from, to.as_deref(), store)
            }
            (Widget::DateRange(w), WidgetAction::Clear) => w.clear(store),
            (widget, action) => {
                return Err(ListingsError::WidgetMismatch {
                    code: widget.code().to_string(),
                    expected: action.name().to_string(),
                })
            }
        };
        Ok(hit)
    }

    pub fn view(&self, attr: &AttributeDescriptor, pending: &FilterSet) -> WidgetView {
        match self {
            Widget::Range(w) => WidgetView::Range {
                min_text: w.min_text().to_string(),
                max_text: w.max_text().to_string(),
                min_placeholder: attr.lower_extent(),
                max_placeholder: attr.upper_extent(),
            },
            Widget::Select(w) => WidgetView::Select {
                multiple: attr.is_multiple,
                options: w.options_view(attr, pending),
            },
            Widget::Toggle(w) => WidgetView::Toggle {
                state: w.state(pending),
                available: attr.available_values.clone(),
            },
            Widget::DateRange(w) => {
                let range = w.range(pending);
                WidgetView::DateRange {
                    from: range.as_ref().map(|(from, _)| from.clone()),
                    to: range.map(|(_, to)| to),
                }
            }
        }
    }
}
