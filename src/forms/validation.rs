use std::fmt;

/// Inputs that can be rejected on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductName,
    Category,
    Supplier,
    Quantity,
    Unit,
    UnitPrice,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProductName => "product name",
            FormField::Category => "category",
            FormField::Supplier => "supplier",
            FormField::Quantity => "quantity",
            FormField::Unit => "unit",
            FormField::UnitPrice => "unit price",
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violation found in one submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn has(&self, field: FormField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.message.as_str()).collect()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn require_text(errors: &mut ValidationErrors, field: FormField, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{} is required", field.label()));
    }
}

pub(crate) fn require_positive(errors: &mut ValidationErrors, field: FormField, value: f64) {
    // NaN fails the comparison and is rejected too.
    if !(value > 0.0) {
        errors.push(field, format!("{} must be greater than 0", field.label()));
    }
}

/// Parses the leading number of a text input, so `"12kg"` reads as 12.
/// Input without a leading finite number becomes 0.
pub fn parse_number(input: &str) -> f64 {
    let input = input.trim_start();
    input[..numeric_prefix_len(input)]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}

/// Trimmed text, or `None` when nothing remains.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
