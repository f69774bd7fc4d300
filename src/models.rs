use serde::{Deserialize, Serialize};

/// One row of the NaWallet `Record` table, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTransaction {
    pub id: i64,
    /// Minor units (fen).
    pub amount: i64,
    pub note: String,
    /// Epoch milliseconds.
    pub occurred_at: i64,
    /// Epoch milliseconds. Carried for completeness, never exported.
    #[allow(dead_code)]
    pub created_at: i64,
    pub category_id: i64,
    pub account_id: i64,
}

/// A NaWallet `RecordType` row.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDefinition {
    pub name: String,
    pub direction: i64,
}

impl CategoryDefinition {
    pub fn kind(&self) -> TransactionKind {
        if self.direction == 0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

/// Target label pair for a NaWallet category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
}

impl CategoryLabel {
    pub fn new(category: &str, subcategory: &str) -> Self {
        Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
    Transfer,
}

impl TransactionKind {
    /// The literal iCost uses in its `类型` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "支出",
            Self::Income => "收入",
            Self::Transfer => "转账",
        }
    }
}

/// One iCost CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub account_1: String,
    pub account_2: String,
    pub note: String,
    pub currency: String,
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_zero_is_expense() {
        let def = CategoryDefinition { name: "餐饮".into(), direction: 0 };
        assert_eq!(def.kind(), TransactionKind::Expense);
    }

    #[test]
    fn test_any_nonzero_direction_is_income() {
        for direction in [1, 2, -1, 99] {
            let def = CategoryDefinition { name: "工资".into(), direction };
            assert_eq!(def.kind(), TransactionKind::Income, "direction {direction}");
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TransactionKind::Expense.label(), "支出");
        assert_eq!(TransactionKind::Income.label(), "收入");
        assert_eq!(TransactionKind::Transfer.label(), "转账");
    }
}
