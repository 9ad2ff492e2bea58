use crate::flow::FlowCatalog;
use std::path::Path;

pub fn cmd_flows(catalog: &FlowCatalog) -> String {
    let mut lines = Vec::with_capacity(catalog.len() + 1);
    lines.push(format!("{} flows:", catalog.len()));
    for flow in catalog.flows() {
        lines.push(format!(
            "  {} (initial: {}, frames: {})",
            flow.key(),
            flow.initial_frame(),
            flow.frames().count()
        ));
    }
    lines.join("\n")
}

pub fn cmd_validate(args: &[String]) -> Result<String, String> {
    let [path] = args else {
        return Err("usage: policyflow validate <path>".to_string());
    };
    let catalog = FlowCatalog::from_path(Path::new(path)).map_err(|err| err.to_string())?;
    Ok(format!("catalog {path} is valid: {} flows", catalog.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flows_lists_builtin_catalog() {
        let catalog = FlowCatalog::builtin().expect("builtin");
        let output = cmd_flows(&catalog);
        assert!(output.starts_with("7 flows:"));
        assert!(output.contains("  policy_creation (initial: label, frames: 3)"));
    }

    #[test]
    fn validate_requires_exactly_one_path() {
        assert!(cmd_validate(&[]).is_err());
        assert!(cmd_validate(&["a".to_string(), "b".to_string()]).is_err());
    }
}
