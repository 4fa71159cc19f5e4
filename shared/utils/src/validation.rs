use crate::error::{BuildCheckError, BuildCheckResult};
use buildcheck_models::ComponentsMap;
use validator::{Validate, ValidationErrors};

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, &*error.code) {
                (Some(message), _) => message.to_string(),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "range") => format!("Value out of range for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Checks every product in a components map before it is analyzed.
pub fn validate_components_map(components: &ComponentsMap) -> BuildCheckResult<()> {
    for (category, product) in components.iter() {
        if let Err(errors) = product.validate() {
            return Err(BuildCheckError::validation(
                category.as_str(),
                format_validation_errors(&errors),
            ));
        }
    }

    Ok(())
}

pub fn validate_uuid(uuid_str: &str) -> BuildCheckResult<uuid::Uuid> {
    uuid::Uuid::parse_str(uuid_str.trim()).map_err(|_| {
        BuildCheckError::validation("uuid", format!("Invalid UUID format: {}", uuid_str))
    })
}

/// Parses a list of product ids, rejecting duplicates.
pub fn validate_product_ids(raw: &[String]) -> BuildCheckResult<Vec<uuid::Uuid>> {
    if raw.is_empty() {
        return Err(BuildCheckError::validation(
            "product_ids",
            "At least one product id is required",
        ));
    }

    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        let id = validate_uuid(value)?;
        if ids.contains(&id) {
            return Err(BuildCheckError::validation(
                "product_ids",
                format!("Duplicate product id: {}", id),
            ));
        }
        ids.push(id);
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcheck_models::{ComponentCategory, Product, ProductSpecs};

    #[test]
    fn test_validate_components_map() {
        let ok = ComponentsMap::new()
            .with(ComponentCategory::Cpu, Product::new("Ryzen 5 7600", ProductSpecs::new()));
        assert!(validate_components_map(&ok).is_ok());

        let bad = ok.with(ComponentCategory::Ram, Product::new("", ProductSpecs::new()));
        match validate_components_map(&bad) {
            Err(BuildCheckError::Validation { field, message }) => {
                assert_eq!(field, "ram");
                assert!(message.contains("between 1 and 300"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
        assert!(validate_uuid(" 67e55044-10b1-426f-9247-bb680e5fe0c8 ").is_ok());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_product_ids() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8".to_string();
        assert_eq!(validate_product_ids(&[id.clone()]).unwrap().len(), 1);
        assert!(validate_product_ids(&[]).is_err());
        assert!(validate_product_ids(&[id.clone(), id]).is_err());
    }
}
