//! Transaction History Renderer - records in, labeled blocks out
//!
//! Pure transform. Anything that is not an array renders as an empty view.

use super::display::display_value;
use super::paths::class;
use serde_json::Value;

pub const FROM_LABEL: &str = "From: ";
pub const TO_LABEL: &str = "To: ";
pub const VALUE_LABEL: &str = "Value: ";

/// One labeled line of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub label: &'static str,
    /// CSS class of the value span
    pub class: &'static str,
    pub value: String,
}

/// One transaction: from, to, value rows in that order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBlock {
    pub rows: [HistoryRow; 3],
}

impl TransactionBlock {
    pub fn from(&self) -> &str { &self.rows[0].value }
    pub fn to(&self) -> &str { &self.rows[1].value }
    pub fn value(&self) -> &str { &self.rows[2].value }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryView {
    pub blocks: Vec<TransactionBlock>,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool { self.blocks.is_empty() }
    pub fn len(&self) -> usize { self.blocks.len() }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for row in &block.rows {
                out.push_str(row.label);
                out.push_str(&row.value);
                out.push('\n');
            }
        }
        out
    }
}

/// Build the view for whatever the server sent as `data`
pub fn render(data: Option<&Value>) -> HistoryView {
    let Some(Value::Array(records)) = data else {
        return HistoryView::default();
    };
    HistoryView { blocks: records.iter().map(block_for).collect() }
}

fn block_for(record: &Value) -> TransactionBlock {
    let field = |name: &str| record.get(name).map(display_value).unwrap_or_default();
    TransactionBlock {
        rows: [
            HistoryRow { label: FROM_LABEL, class: class::FROM, value: field("from") },
            HistoryRow { label: TO_LABEL, class: class::TO, value: field("to") },
            HistoryRow { label: VALUE_LABEL, class: class::VALUE, value: field("value") },
        ],
    }
}
