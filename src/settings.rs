/// Options page form state

use crate::descriptor::{TargetDescriptor, default_value, descriptor_table};
use crate::preferences::{PreferenceError, Preferences};
use std::rc::Rc;
use yew::Reducible;

/// One checkbox per option, in descriptor order
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    entries: Vec<(&'static TargetDescriptor, bool)>,
}

impl SettingsForm {
    pub fn new() -> Self {
        let entries = descriptor_table()
            .iter()
            .map(|d| (d, default_value(d.option_name)))
            .collect();
        SettingsForm { entries }
    }

    /// Populate the inputs from storage; unset keys keep their default
    pub fn restore(&mut self, stored: &Preferences) {
        for (descriptor, checked) in self.entries.iter_mut() {
            if let Some(value) = stored.get(descriptor.option_name) {
                *checked = value;
            }
        }
    }

    pub fn is_checked(&self, option_name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(d, _)| d.option_name == option_name)
            .map(|(_, checked)| *checked)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static TargetDescriptor, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// Record a checkbox change and return the single-key write for storage
    pub fn change(
        &mut self,
        option_name: &str,
        checked: bool,
    ) -> Result<Preferences, PreferenceError> {
        let (descriptor, value) = self
            .entries
            .iter_mut()
            .find(|(d, _)| d.option_name == option_name)
            .ok_or_else(|| PreferenceError::UnknownOption(option_name.to_string()))?;
        *value = checked;

        let mut write = Preferences::new();
        write.set(descriptor.option_name, checked);
        Ok(write)
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Updates dispatched by the options page
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Restore(Preferences),
    Set(&'static str, bool),
}

impl Reducible for SettingsForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Restore(stored) => next.restore(&stored),
            FormAction::Set(option, checked) => {
                if let Err(e) = next.change(option, checked) {
                    log::warn!("{}", e);
                }
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::option_names;
    use serde_json::json;

    #[test]
    fn test_new_form_uses_defaults() {
        let form = SettingsForm::new();

        let names: Vec<&str> = form.entries().map(|(d, _)| d.option_name).collect();
        assert_eq!(names, option_names());
        assert!(form.entries().all(|(_, checked)| !checked));
    }

    #[test]
    fn test_restore_from_storage() {
        let mut form = SettingsForm::new();
        let stored = Preferences::from_value(&json!({
            "hideComments": true,
            "hideEndScreen": true,
        }))
        .unwrap();

        form.restore(&stored);

        assert_eq!(form.is_checked("hideComments"), Some(true));
        assert_eq!(form.is_checked("hideEndScreen"), Some(true));
        assert_eq!(form.is_checked("hideSuggestions"), Some(false));
    }

    #[test]
    fn test_restore_keeps_explicit_false() {
        let mut form = SettingsForm::new();
        form.change("hideDonation", true).unwrap();

        form.restore(&Preferences::from_value(&json!({ "hideDonation": false })).unwrap());

        assert_eq!(form.is_checked("hideDonation"), Some(false));
    }

    #[test]
    fn test_change_writes_only_changed_key() {
        let mut form = SettingsForm::new();
        form.restore(&Preferences::from_value(&json!({ "hideComments": true })).unwrap());

        let write = form.change("hideSuggestions", true).unwrap();

        assert_eq!(write.to_json(), json!({ "hideSuggestions": true }));
        assert_eq!(form.is_checked("hideSuggestions"), Some(true));
        assert_eq!(form.is_checked("hideComments"), Some(true));
    }

    #[test]
    fn test_change_unknown_option() {
        let mut form = SettingsForm::new();

        let result = form.change("hideEverything", true);

        assert_eq!(result, Err(PreferenceError::UnknownOption("hideEverything".to_string())));
        assert_eq!(form.is_checked("hideEverything"), None);
    }

    #[test]
    fn test_reduce_restore_and_set() {
        let stored = Preferences::from_value(&json!({ "hideEndScreen": true })).unwrap();

        let form = Rc::new(SettingsForm::new())
            .reduce(FormAction::Restore(stored))
            .reduce(FormAction::Set("hideComments", true));

        assert_eq!(form.is_checked("hideEndScreen"), Some(true));
        assert_eq!(form.is_checked("hideComments"), Some(true));
        assert_eq!(form.is_checked("hideSuggestions"), Some(false));
    }

    #[test]
    fn test_reverting_one_option_keeps_later_toggles() {
        let form = Rc::new(SettingsForm::new())
            .reduce(FormAction::Set("hideComments", true))
            .reduce(FormAction::Set("hideSuggestions", true));

        // the write for hideComments failed
        let form = form.reduce(FormAction::Set("hideComments", false));

        assert_eq!(form.is_checked("hideComments"), Some(false));
        assert_eq!(form.is_checked("hideSuggestions"), Some(true));
    }

    #[test]
    fn test_reduce_unknown_option_is_ignored() {
        let form = Rc::new(SettingsForm::new()).reduce(FormAction::Set("hideEverything", true));

        assert_eq!(*form, SettingsForm::new());
    }
}
