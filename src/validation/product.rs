use std::collections::BTreeMap;

use crate::models::{is_valid_category, ProductDraft};

pub const MAX_PRICE: f64 = 999_999_999.0;
pub const MAX_QUANTITY: f64 = 99_999.0;
pub const MIN_NAME_CHARS: usize = 3;
pub const MAX_NAME_CHARS: usize = 100;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Product fields in validation priority order; `first_error` reports the
/// lowest variant with a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Price,
    Quantity,
    Description,
    Category,
}

/// Outcome of validating a candidate record: at most one message per field,
/// the first violated rule for that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    fn push(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum NumericError {
    Missing,
    NotANumber,
}

/// Explicit parse of a raw form value; empty input and malformed input are
/// distinct failures so each can keep its own message. Non-finite values
/// ("NaN", "inf") count as malformed: they dodge every range comparison and
/// JSON-encode as null, so they must never reach the store.
pub fn parse_numeric(raw: &str) -> std::result::Result<f64, NumericError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NumericError::Missing);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(NumericError::NotANumber)
}

pub fn validate_product(draft: &ProductDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    let name = draft.name.trim();
    if name.is_empty() {
        report.push(Field::Name, "Tên sản phẩm không được để trống");
    } else if name.chars().count() < MIN_NAME_CHARS {
        report.push(Field::Name, "Tên sản phẩm phải có ít nhất 3 ký tự");
    } else if name.chars().count() > MAX_NAME_CHARS {
        report.push(Field::Name, "Tên sản phẩm không được vượt quá 100 ký tự");
    }

    match parse_numeric(&draft.price) {
        Err(NumericError::Missing) => {
            report.push(Field::Price, "Giá sản phẩm không được để trống");
        }
        Err(NumericError::NotANumber) => {
            report.push(Field::Price, "Giá sản phẩm phải là số");
        }
        Ok(price) if price < 0.0 => {
            report.push(Field::Price, "Giá sản phẩm không được âm");
        }
        Ok(price) if price == 0.0 => {
            report.push(Field::Price, "Giá sản phẩm phải lớn hơn 0");
        }
        Ok(price) if price > MAX_PRICE => {
            report.push(Field::Price, "Giá sản phẩm không được vượt quá 999,999,999");
        }
        Ok(_) => {}
    }

    match parse_numeric(&draft.quantity) {
        Err(NumericError::Missing) => {
            report.push(Field::Quantity, "Số lượng không được để trống");
        }
        Err(NumericError::NotANumber) => {
            report.push(Field::Quantity, "Số lượng phải là số");
        }
        Ok(quantity) if quantity.fract() != 0.0 => {
            report.push(Field::Quantity, "Số lượng phải là số nguyên");
        }
        Ok(quantity) if quantity < 0.0 => {
            report.push(Field::Quantity, "Số lượng không được âm");
        }
        Ok(quantity) if quantity > MAX_QUANTITY => {
            report.push(Field::Quantity, "Số lượng không được vượt quá 99,999");
        }
        Ok(_) => {}
    }

    let description = draft.description.trim();
    if description.is_empty() {
        report.push(Field::Description, "Mô tả không được để trống");
    } else if description.chars().count() < MIN_DESCRIPTION_CHARS {
        report.push(Field::Description, "Mô tả phải có ít nhất 10 ký tự");
    } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
        report.push(Field::Description, "Mô tả không được vượt quá 500 ký tự");
    }

    if draft.category.trim().is_empty() {
        report.push(Field::Category, "Danh mục không được để trống");
    } else if !is_valid_category(&draft.category) {
        report.push(Field::Category, "Danh mục không hợp lệ");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Laptop Dell".to_string(),
            price: "15000000".to_string(),
            quantity: "5".to_string(),
            category: "Điện tử".to_string(),
            description: "Laptop Dell mới với cấu hình cao".to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_product() {
        let report = validate_product(&valid_draft());
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn rejects_empty_name() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        let report = validate_product(&draft);
        assert_eq!(report.error(Field::Name), Some("Tên sản phẩm không được để trống"));
    }

    #[test]
    fn name_boundaries() {
        let mut draft = valid_draft();

        draft.name = "ab".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Name),
            Some("Tên sản phẩm phải có ít nhất 3 ký tự")
        );

        draft.name = "abc".to_string();
        assert!(validate_product(&draft).is_valid());

        draft.name = "a".repeat(100);
        assert!(validate_product(&draft).is_valid());

        draft.name = "a".repeat(101);
        assert_eq!(
            validate_product(&draft).error(Field::Name),
            Some("Tên sản phẩm không được vượt quá 100 ký tự")
        );
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut draft = valid_draft();
        draft.name = "ốổộ".to_string();
        assert!(validate_product(&draft).is_valid());
    }

    #[test]
    fn price_rules_in_order() {
        let mut draft = valid_draft();

        draft.price = String::new();
        assert_eq!(
            validate_product(&draft).error(Field::Price),
            Some("Giá sản phẩm không được để trống")
        );

        draft.price = "abc".to_string();
        assert_eq!(validate_product(&draft).error(Field::Price), Some("Giá sản phẩm phải là số"));

        draft.price = "NaN".to_string();
        assert_eq!(validate_product(&draft).error(Field::Price), Some("Giá sản phẩm phải là số"));

        draft.price = "inf".to_string();
        assert_eq!(validate_product(&draft).error(Field::Price), Some("Giá sản phẩm phải là số"));

        draft.price = "-1".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Price),
            Some("Giá sản phẩm không được âm")
        );

        draft.price = "0".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Price),
            Some("Giá sản phẩm phải lớn hơn 0")
        );

        draft.price = "0.01".to_string();
        assert!(validate_product(&draft).is_valid());

        draft.price = "999999999".to_string();
        assert!(validate_product(&draft).is_valid());

        draft.price = "1000000000".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Price),
            Some("Giá sản phẩm không được vượt quá 999,999,999")
        );
    }

    #[test]
    fn quantity_rules_in_order() {
        let mut draft = valid_draft();

        draft.quantity = String::new();
        assert_eq!(
            validate_product(&draft).error(Field::Quantity),
            Some("Số lượng không được để trống")
        );

        draft.quantity = "xyz".to_string();
        assert_eq!(validate_product(&draft).error(Field::Quantity), Some("Số lượng phải là số"));

        // Must not fall through to the integer rule.
        draft.quantity = "NaN".to_string();
        assert_eq!(validate_product(&draft).error(Field::Quantity), Some("Số lượng phải là số"));

        draft.quantity = "1.5".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Quantity),
            Some("Số lượng phải là số nguyên")
        );

        draft.quantity = "-1".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Quantity),
            Some("Số lượng không được âm")
        );

        draft.quantity = "0".to_string();
        assert!(validate_product(&draft).is_valid());

        draft.quantity = "99999".to_string();
        assert!(validate_product(&draft).is_valid());

        draft.quantity = "100000".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Quantity),
            Some("Số lượng không được vượt quá 99,999")
        );
    }

    #[test]
    fn description_boundaries() {
        let mut draft = valid_draft();

        draft.description = "  ".to_string();
        assert_eq!(
            validate_product(&draft).error(Field::Description),
            Some("Mô tả không được để trống")
        );

        draft.description = "a".repeat(9);
        assert_eq!(
            validate_product(&draft).error(Field::Description),
            Some("Mô tả phải có ít nhất 10 ký tự")
        );

        draft.description = "a".repeat(10);
        assert!(validate_product(&draft).is_valid());

        draft.description = "a".repeat(500);
        assert!(validate_product(&draft).is_valid());

        draft.description = "a".repeat(501);
        assert_eq!(
            validate_product(&draft).error(Field::Description),
            Some("Mô tả không được vượt quá 500 ký tự")
        );
    }

    #[test]
    fn category_must_belong_to_the_fixed_set() {
        let mut draft = valid_draft();

        draft.category = String::new();
        assert_eq!(
            validate_product(&draft).error(Field::Category),
            Some("Danh mục không được để trống")
        );

        draft.category = "Electronics".to_string();
        assert_eq!(validate_product(&draft).error(Field::Category), Some("Danh mục không hợp lệ"));

        for category in crate::models::CATEGORIES {
            draft.category = category.to_string();
            assert!(validate_product(&draft).is_valid(), "category {} should be valid", category);
        }
    }

    #[test]
    fn reports_every_invalid_field_at_once() {
        let draft = ProductDraft {
            name: "ab".to_string(),
            price: "-10".to_string(),
            quantity: "1.5".to_string(),
            description: "Short".to_string(),
            category: "InvalidCat".to_string(),
        };
        let report = validate_product(&draft);

        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 5);
        assert_eq!(report.error(Field::Name), Some("Tên sản phẩm phải có ít nhất 3 ký tự"));
        assert_eq!(report.error(Field::Price), Some("Giá sản phẩm không được âm"));
        assert_eq!(report.error(Field::Quantity), Some("Số lượng phải là số nguyên"));
        assert_eq!(report.error(Field::Description), Some("Mô tả phải có ít nhất 10 ký tự"));
        assert_eq!(report.error(Field::Category), Some("Danh mục không hợp lệ"));
    }

    #[test]
    fn first_error_follows_field_priority() {
        let draft = ProductDraft {
            name: String::new(),
            price: "abc".to_string(),
            quantity: "5".to_string(),
            description: "Mô tả đủ dài cho sản phẩm".to_string(),
            category: "Sách".to_string(),
        };
        let report = validate_product(&draft);
        assert_eq!(report.first_error(), Some("Tên sản phẩm không được để trống"));
    }

    #[test]
    fn parse_numeric_distinguishes_missing_from_malformed() {
        assert_eq!(parse_numeric(""), Err(NumericError::Missing));
        assert_eq!(parse_numeric("   "), Err(NumericError::Missing));
        assert_eq!(parse_numeric("12abc"), Err(NumericError::NotANumber));
        assert_eq!(parse_numeric(" 12.5 "), Ok(12.5));
    }

    #[test]
    fn parse_numeric_rejects_non_finite_values() {
        assert_eq!(parse_numeric("NaN"), Err(NumericError::NotANumber));
        assert_eq!(parse_numeric("nan"), Err(NumericError::NotANumber));
        assert_eq!(parse_numeric("inf"), Err(NumericError::NotANumber));
        assert_eq!(parse_numeric("-infinity"), Err(NumericError::NotANumber));
    }
}
