#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Flows,
    Validate,
    Run,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "flows" => CliVerb::Flows,
        "validate" => CliVerb::Validate,
        "run" => CliVerb::Run,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  flows                                List the flows in the active catalog".to_string(),
        "  validate <path>                      Load and validate a flow catalog file".to_string(),
        "  run <flow>                           Walk a flow in the terminal wizard".to_string(),
        "  help                                 Show this help".to_string(),
        String::new(),
        "Environment:".to_string(),
        "  POLICYFLOW_CONFIG                    Settings file (default ~/.policyflow/config.yaml)"
            .to_string(),
        "  POLICYFLOW_LOG                       Log filter, e.g. `debug` (default `info`)"
            .to_string(),
        "  POLICYFLOW_SCRIPT_KEYS               Drive `run` with keys: up,down,enter,esc,x,q"
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_from_first_argument() {
        assert_eq!(parse_cli_verb("flows"), CliVerb::Flows);
        assert_eq!(parse_cli_verb("validate"), CliVerb::Validate);
        assert_eq!(parse_cli_verb("run"), CliVerb::Run);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("start"), CliVerb::Unknown);
    }

    #[test]
    fn help_mentions_every_verb() {
        let help = cli_help_lines().join("\n");
        for verb in ["flows", "validate <path>", "run <flow>", "help"] {
            assert!(help.contains(verb), "missing {verb}");
        }
    }
}
