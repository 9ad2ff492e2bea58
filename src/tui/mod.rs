pub mod navigation;
pub mod screens;
pub mod wizard;

pub use navigation::{
    parse_scripted_wizard_keys, wizard_action_from_key, wizard_transition, WizardAction,
    WizardEffect, WizardNavState, WizardTransition, SCRIPT_KEYS_ENV,
};
pub use screens::{draw_wizard_ui, project_wizard_view_model, WizardViewModel};
pub use wizard::{cmd_run, run_wizard_scripted, WizardExit, WizardRunReport};
