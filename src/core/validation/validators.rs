//! Reusable field validators
//!
//! Each validator is a closure taking the field name and the value, so rule
//! lists stay declarative in [`super::validate`].

/// Validator: text must not be empty
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.is_empty() {
            Err(format!("'{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: text must contain something other than whitespace
pub fn not_blank() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(format!("'{}' must not be blank", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: text length in characters must not exceed `max`
pub fn max_chars(max: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        let len = value.chars().count();
        if len > max {
            Err(format!(
                "'{}' must not exceed {} characters (currently: {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be zero or greater
pub fn non_negative() -> impl Fn(&str, i64) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: i64| {
        if value < 0 {
            Err(format!(
                "'{}' must not be negative (value: {})",
                field, value
            ))
        } else {
            Ok(())
        }
    }
}
