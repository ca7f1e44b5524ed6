/// One data record of the census export, cells kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Section the row belongs to, e.g. "Mother tongue".
    pub topic: String,
    /// Category name within the topic, possibly padded with whitespace.
    pub characteristic: String,
    /// The `Total` cell; numeric conversion happens downstream.
    pub total: String,
}

#[derive(Debug, Default)]
pub struct RawTable {
    /// Every data row, in file order.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
