use salary_core::{
    ComponentDefinition, Location, LocationAllowance, PayrollSettings, PtSlab, SalaryTemplate,
};

use crate::form::TemplateForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// Everything that belongs to one signed-in working session.
///
/// All of it lives here rather than in globals so that logging out is a
/// single state swap: [`Session::reset_on_logout`] discards the working
/// template, location selection, and fetched reference data together.
#[derive(Debug, Default)]
pub struct Session {
    pub settings: PayrollSettings,
    pub defaults: Vec<ComponentDefinition>,
    pub pt_slab: Option<PtSlab>,
    pub locations: Vec<Location>,
    pub selected_location: Option<i64>,
    pub allowance: Option<LocationAllowance>,
    pub form: TemplateForm,
    pub saved_templates: Vec<SalaryTemplate>,
    pub selected_template_id: Option<i64>,
    pub status_message: Option<(String, MessageType)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a location choice: remembers the selection and copies its
    /// allowance figures into the form, where they stay editable.
    pub fn select_location(
        &mut self,
        allowance: LocationAllowance,
    ) {
        self.selected_location = Some(allowance.location_id);
        self.form.per_day_allowance = allowance.per_day_allowance.to_string();
        self.form.pg_rent = allowance.pg_rent.to_string();
        self.allowance = Some(allowance);
    }

    pub fn show_message(
        &mut self,
        msg: impl Into<String>,
        msg_type: MessageType,
    ) {
        self.status_message = Some((msg.into(), msg_type));
    }

    pub fn clear_message(&mut self) {
        self.status_message = None;
    }

    /// Drops every piece of session-scoped state back to its defaults.
    pub fn reset_on_logout(&mut self) {
        *self = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn select_location_copies_allowance_into_form() {
        let mut session = Session::new();

        session.select_location(LocationAllowance {
            location_id: 3,
            per_day_allowance: dec!(150),
            pg_rent: dec!(8000),
        });

        assert_eq!(session.selected_location, Some(3));
        assert_eq!(session.form.per_day_allowance, "150");
        assert_eq!(session.form.pg_rent, "8000");
    }

    #[test]
    fn reset_on_logout_clears_everything() {
        let mut session = Session::new();
        session.form.template_name = "Standard".to_string();
        session.selected_template_id = Some(7);
        session.select_location(LocationAllowance {
            location_id: 3,
            per_day_allowance: dec!(150),
            pg_rent: dec!(8000),
        });
        session.show_message("saved", MessageType::Success);

        session.reset_on_logout();

        assert_eq!(session.selected_location, None);
        assert_eq!(session.allowance, None);
        assert_eq!(session.selected_template_id, None);
        assert_eq!(session.form.template_name, "");
        assert_eq!(session.form.per_day_allowance, "");
        assert!(session.status_message.is_none());
        assert!(session.saved_templates.is_empty());
    }
}
