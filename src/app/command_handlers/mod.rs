use crate::app::cli::{cli_help_lines, parse_cli_verb, CliVerb};
use crate::config::{default_state_root, load_flow_catalog, load_global_settings, Settings};
use crate::flow::FlowCatalog;
use crate::shared::logging::init_file_logging;
use std::sync::Arc;

pub mod catalog;

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Flows => {
            let settings = load_settings()?;
            let catalog = load_catalog(&settings)?;
            Ok(catalog::cmd_flows(&catalog))
        }
        CliVerb::Validate => catalog::cmd_validate(&args[1..]),
        CliVerb::Run => {
            let [flow_key] = &args[1..] else {
                return Err("usage: policyflow run <flow>".to_string());
            };
            let settings = load_settings()?;
            init_logging(&settings)?;
            let catalog = load_catalog(&settings)?;
            crate::tui::cmd_run(&settings, Arc::new(catalog), flow_key)
        }
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}

fn load_settings() -> Result<Settings, String> {
    load_global_settings().map_err(|err| err.to_string())
}

fn load_catalog(settings: &Settings) -> Result<FlowCatalog, String> {
    load_flow_catalog(settings).map_err(|err| err.to_string())
}

fn init_logging(settings: &Settings) -> Result<(), String> {
    let path = settings
        .resolve_log_path(default_state_root)
        .map_err(|err| err.to_string())?;
    init_file_logging(&path).map_err(|e| format!("failed to open log file {}: {e}", path.display()))
}
