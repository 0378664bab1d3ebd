// ============================================================
// ROW
// ============================================================
// One record of delimited fields, as produced by tokenization

/// Ordered fields of one record. Fields are untrimmed and untyped.
pub type Row = Vec<String>;
