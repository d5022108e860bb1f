use uuid::Uuid;

/// Open/closed lifecycle of a record form.
///
/// The form only exists while the modal is open; closing drops it.
#[derive(Debug, Clone, PartialEq)]
pub enum FormModal<F> {
    Closed,
    Open {
        form: F,
        /// Record being edited; `None` when adding a new one.
        editing: Option<Uuid>,
    },
}

impl<F> Default for FormModal<F> {
    fn default() -> Self {
        FormModal::Closed
    }
}

impl<F> FormModal<F> {
    pub fn open_new(form: F) -> Self {
        FormModal::Open {
            form,
            editing: None,
        }
    }

    pub fn open_edit(id: Uuid, form: F) -> Self {
        FormModal::Open {
            form,
            editing: Some(id),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormModal::Open { .. })
    }

    pub fn editing(&self) -> Option<Uuid> {
        match self {
            FormModal::Open { editing, .. } => *editing,
            FormModal::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            FormModal::Open { form, .. } => Some(form),
            FormModal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            FormModal::Open { form, .. } => Some(form),
            FormModal::Closed => None,
        }
    }

    pub fn close(&mut self) {
        *self = FormModal::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_moves_between_closed_and_open() {
        let mut modal: FormModal<String> = FormModal::default();
        assert!(!modal.is_open());
        assert!(modal.form_mut().is_none());

        modal = FormModal::open_new("draft".to_string());
        assert!(modal.is_open());
        assert_eq!(modal.editing(), None);
        if let Some(form) = modal.form_mut() {
            form.push('!');
        }
        assert_eq!(modal.form().map(String::as_str), Some("draft!"));

        let id = Uuid::new_v4();
        modal = FormModal::open_edit(id, "existing".to_string());
        assert_eq!(modal.editing(), Some(id));

        modal.close();
        assert_eq!(modal, FormModal::Closed);
    }
}
