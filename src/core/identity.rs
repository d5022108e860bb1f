pub const UNKNOWN_USER: &str = "Unknown User";

/// Who is operating the screen; used for "created by" attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    name: Option<String>,
}

impl Identity {
    pub fn new(name: Option<String>) -> Self {
        let name = name
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { name }
    }

    pub fn anonymous() -> Self {
        Self { name: None }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_fall_back_to_placeholder() {
        assert_eq!(Identity::new(Some("   ".into())).display_name(), UNKNOWN_USER);
        assert_eq!(Identity::anonymous().display_name(), UNKNOWN_USER);
        assert_eq!(Identity::new(Some(" Ravi ".into())).display_name(), "Ravi");
    }
}
