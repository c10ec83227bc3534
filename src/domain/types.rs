// ==========================================
// Seal Inventory - domain types
// ==========================================
// Enumerations shared by entities, repositories and the API layer.
// Database representation is the SCREAMING_SNAKE_CASE / lowercase string
// returned by `as_db_str`.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Transaction type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Purchase,   // material bought in
    Production, // material consumed / parts produced by a production run
    Assembly,   // parts consumed / products built by an assembly run
    Sale,       // products sold
    Adjustment, // manual correction or opening stock
}

impl TransactionType {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Production => "PRODUCTION",
            TransactionType::Assembly => "ASSEMBLY",
            TransactionType::Sale => "SALE",
            TransactionType::Adjustment => "ADJUSTMENT",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "PURCHASE" => Some(TransactionType::Purchase),
            "PRODUCTION" => Some(TransactionType::Production),
            "ASSEMBLY" => Some(TransactionType::Assembly),
            "SALE" => Some(TransactionType::Sale),
            "ADJUSTMENT" => Some(TransactionType::Adjustment),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

// ==========================================
// Reference type (which catalog a transaction touches)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    Material,
    Part,
    Product,
}

impl ReferenceType {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ReferenceType::Material => "material",
            ReferenceType::Part => "part",
            ReferenceType::Product => "product",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "material" => Some(ReferenceType::Material),
            "part" => Some(ReferenceType::Part),
            "product" => Some(ReferenceType::Product),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_db_roundtrip() {
        for t in [
            TransactionType::Purchase,
            TransactionType::Production,
            TransactionType::Assembly,
            TransactionType::Sale,
            TransactionType::Adjustment,
        ] {
            assert_eq!(TransactionType::from_db_str(t.as_db_str()), Some(t));
        }
        assert_eq!(TransactionType::from_db_str("REFUND"), None);
    }

    #[test]
    fn test_reference_type_parse_is_lenient() {
        assert_eq!(ReferenceType::from_db_str(" Part "), Some(ReferenceType::Part));
        assert_eq!(ReferenceType::from_db_str("MATERIAL"), Some(ReferenceType::Material));
        assert_eq!(ReferenceType::from_db_str("widget"), None);
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&TransactionType::Production).unwrap();
        assert_eq!(json, "\"PRODUCTION\"");
        let json = serde_json::to_string(&ReferenceType::Product).unwrap();
        assert_eq!(json, "\"product\"");
    }
}
