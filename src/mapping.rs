use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::models::CategoryLabel;

pub const MAPPING_VERSION: u32 = 1;

// (record_type_id, category, subcategory)
const DEFAULT_CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "餐饮", "三餐"),
    (2, "餐饮", "零食"),
    (3, "餐饮", "水果"),
    (4, "日用", ""),
    (5, "交通", ""),
    (7, "住房", "水电费"),
    (9, "购物", ""),
    (10, "娱乐", ""),
    (16, "医疗", ""),
    (17, "人情", "礼金"),
    (20, "通讯", ""),
    (21, "人情", ""),
    (22, "学习", ""),
    (24, "人情", "捐赠"),
    (27, "其他", ""),
    (28, "奖金", ""),
    (29, "红包", ""),
    (30, "投资", ""),
    (31, "餐饮", "三餐"),
    (32, "其他", ""),
    (33, "娱乐", ""),
    (34, "其他", ""),
    (35, "兼职", ""),
    (36, "其他", ""),
    (37, "其他", ""),
];

// (assets_id, account). -1 is NaWallet's implicit cash wallet.
const DEFAULT_ACCOUNTS: &[(i64, &str)] = &[
    (-1, "现金钱包"),
    (1, "储蓄卡中国银行1"),
    (2, "现金钱包"),
    (3, "现金钱包"),
    (4, "微信钱包1"),
    (5, "支付宝"),
    (6, "现金钱包"),
    (7, "现金钱包"),
    (8, "饭卡"),
    (9, "信用卡中国银行1"),
    (10, "现金钱包"),
];

/// The hand-curated NaWallet → iCost translation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingTables {
    pub version: u32,
    pub categories: BTreeMap<i64, CategoryLabel>,
    pub accounts: BTreeMap<i64, String>,
}

impl Default for MappingTables {
    fn default() -> Self {
        Self {
            version: MAPPING_VERSION,
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(id, cat, sub)| (*id, CategoryLabel::new(cat, sub)))
                .collect(),
            accounts: DEFAULT_ACCOUNTS
                .iter()
                .map(|(id, name)| (*id, name.to_string()))
                .collect(),
        }
    }
}

impl MappingTables {
    pub fn category(&self, category_id: i64) -> Option<&CategoryLabel> {
        self.categories.get(&category_id)
    }

    pub fn account(&self, account_id: i64) -> Option<&str> {
        self.accounts.get(&account_id).map(String::as_str)
    }

    fn parse(json: &str) -> std::result::Result<Self, String> {
        let tables: MappingTables = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if tables.version != MAPPING_VERSION {
            return Err(format!(
                "unsupported mapping version {} (expected {MAPPING_VERSION})",
                tables.version
            ));
        }
        Ok(tables)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConvertError::Mapping(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format!("{}\n", self.to_json()?))?;
        Ok(())
    }
}

/// The tables from `path` when given, otherwise the built-in defaults. A file
/// replaces the defaults wholesale.
pub fn load_tables(path: Option<&Path>) -> Result<MappingTables> {
    let Some(path) = path else {
        log::debug!("using built-in mapping tables");
        return Ok(MappingTables::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConvertError::Mapping(format!("{}: {e}", path.display())))?;
    let tables = MappingTables::parse(&content)
        .map_err(|e| ConvertError::Mapping(format!("{}: {e}", path.display())))?;
    log::info!(
        "loaded mapping tables from {} ({} categories, {} accounts)",
        path.display(),
        tables.categories.len(),
        tables.accounts.len()
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let t = MappingTables::default();
        assert_eq!(t.categories.len(), 25);
        assert_eq!(t.accounts.len(), 11);
        assert_eq!(t.category(1), Some(&CategoryLabel::new("餐饮", "三餐")));
        assert_eq!(t.category(28), Some(&CategoryLabel::new("奖金", "")));
        assert_eq!(t.account(5), Some("支付宝"));
    }

    #[test]
    fn test_default_accounts_include_cash_fallback() {
        assert_eq!(MappingTables::default().account(-1), Some("现金钱包"));
    }

    #[test]
    fn test_gaps_in_default_tables_stay_unmapped() {
        let t = MappingTables::default();
        assert!(t.category(6).is_none());
        assert!(t.category(38).is_none());
        assert!(t.account(11).is_none());
    }

    #[test]
    fn test_from_json_with_integer_keys() {
        let json = r#"{
            "version": 1,
            "categories": {"1": {"category": "Food", "subcategory": "Meals"}, "2": {"category": "Misc"}},
            "accounts": {"-1": "Cash", "5": "Alipay"}
        }"#;
        let t = MappingTables::parse(json).unwrap();
        assert_eq!(t.category(1), Some(&CategoryLabel::new("Food", "Meals")));
        assert_eq!(t.category(2).unwrap().subcategory, "");
        assert_eq!(t.account(-1), Some("Cash"));
        assert!(t.category(3).is_none(), "file replaces the defaults");
    }

    #[test]
    fn test_from_json_rejects_unknown_version() {
        let json = r#"{"version": 2, "categories": {}, "accounts": {}}"#;
        let err = MappingTables::parse(json).unwrap_err();
        assert!(err.contains("unsupported mapping version 2"));
    }

    #[test]
    fn test_from_json_rejects_non_integer_keys() {
        let json = r#"{"version": 1, "categories": {}, "accounts": {"cash": "Cash"}}"#;
        assert!(MappingTables::parse(json).is_err());
    }

    #[test]
    fn test_save_then_load_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mapping.json");
        MappingTables::default().save(&path).unwrap();
        let loaded = load_tables(Some(&path)).unwrap();
        assert_eq!(loaded, MappingTables::default());
    }

    #[test]
    fn test_load_tables_without_path_uses_defaults() {
        assert_eq!(load_tables(None).unwrap(), MappingTables::default());
    }

    #[test]
    fn test_load_tables_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_tables(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
