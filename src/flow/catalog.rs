use super::component::ComponentKey;
use super::error::FlowDefinitionError;
use super::model::{Flow, Frame};
use super::target::{classify_target, ClassifyError, RawTarget};
use crate::config::ConfigError;
use crate::shared::ids::{FlowKey, FrameKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_CATALOG: &str = include_str!("../../flows/calculator.yaml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    pub flows: BTreeMap<String, FlowFile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowFile {
    pub initial_frame: String,
    pub frames: BTreeMap<String, FrameFile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrameFile {
    pub component: ComponentKey,
    #[serde(default)]
    pub on: BTreeMap<String, RawTarget>,
}

/// Every flow a wizard session may enter, shared read-only between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowCatalog {
    flows: BTreeMap<FlowKey, Arc<Flow>>,
}

impl FlowCatalog {
    pub fn new(flows: impl IntoIterator<Item = Flow>) -> Result<Self, FlowDefinitionError> {
        let catalog = Self {
            flows: flows
                .into_iter()
                .map(|flow| (flow.key().clone(), Arc::new(flow)))
                .collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATALOG, "<builtin>")
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw, &path.display().to_string())
    }

    pub fn from_yaml_str(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        Self::from_file(&file).map_err(|source| ConfigError::Catalog {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_file(file: &CatalogFile) -> Result<Self, FlowDefinitionError> {
        let mut flow_keys = BTreeSet::new();
        for name in file.flows.keys() {
            let key = FlowKey::parse(name).map_err(|reason| FlowDefinitionError::InvalidKey {
                flow: name.clone(),
                reason,
            })?;
            flow_keys.insert(key);
        }

        let mut flows = Vec::with_capacity(file.flows.len());
        for (name, flow_file) in &file.flows {
            flows.push(build_flow(name, flow_file, &flow_keys)?);
        }
        Self::new(flows)
    }

    fn validate(&self) -> Result<(), FlowDefinitionError> {
        for flow in self.flows.values() {
            for (frame, event, target) in flow.referenced_flows() {
                if !self.flows.contains_key(target) {
                    return Err(FlowDefinitionError::UnknownFlowTarget {
                        flow: flow.key().to_string(),
                        frame: frame.key().to_string(),
                        event: event.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Flow>> {
        self.flows.get(key)
    }

    pub fn flows(&self) -> impl Iterator<Item = &Arc<Flow>> {
        self.flows.values()
    }

    pub fn keys(&self) -> Vec<String> {
        self.flows.keys().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

fn build_flow(
    name: &str,
    flow_file: &FlowFile,
    flow_keys: &BTreeSet<FlowKey>,
) -> Result<Flow, FlowDefinitionError> {
    let invalid = |reason: String| FlowDefinitionError::InvalidKey {
        flow: name.to_string(),
        reason,
    };
    let key = FlowKey::parse(name).map_err(invalid)?;
    let initial_frame = FrameKey::parse(&flow_file.initial_frame).map_err(invalid)?;
    let frame_keys = flow_file
        .frames
        .keys()
        .map(|frame| FrameKey::parse(frame))
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(invalid)?;

    let mut frames = Vec::with_capacity(flow_file.frames.len());
    for (frame_name, frame_file) in &flow_file.frames {
        let mut frame = Frame::new(FrameKey::parse(frame_name).map_err(invalid)?, frame_file.component);
        for (event, raw) in &frame_file.on {
            let target = classify_target(raw, flow_keys, &frame_keys).map_err(|err| match err {
                ClassifyError::InvalidKey(reason) => invalid(reason),
                ClassifyError::Ambiguous(target) => FlowDefinitionError::AmbiguousTarget {
                    flow: name.to_string(),
                    frame: frame_name.clone(),
                    event: event.clone(),
                    target,
                },
            })?;
            frame = frame.on(event, target);
        }
        frames.push(frame);
    }
    Flow::new(key, initial_frame, frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::TransitionTarget;

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = FlowCatalog::builtin().expect("builtin catalog");
        for key in [
            "policy_creation",
            "population_creation",
            "simulation_creation",
            "report_creation",
        ] {
            assert!(catalog.get(key).is_some(), "missing flow {key}");
        }
    }

    #[test]
    fn builtin_simulation_flow_enters_policy_creation_as_sub_flow() {
        let catalog = FlowCatalog::builtin().expect("builtin catalog");
        let flow = catalog.get("simulation_creation").expect("simulation flow");
        let frame = flow.frame("setup_policy").expect("setup policy frame");
        assert_eq!(
            frame.target("create_new"),
            Some(&TransitionTarget::sub_flow("policy_creation", Some("setup")).unwrap())
        );
    }

    #[test]
    fn catalog_rejects_unknown_sub_flow() {
        let raw = r#"
flows:
  outer:
    initial_frame: start
    frames:
      start:
        component: report_setup
        on:
          create: { flow: ghost, return_to: start }
"#;
        let err = FlowCatalog::from_yaml_str(raw, "inline").expect_err("unknown flow");
        assert!(matches!(err, ConfigError::Catalog { .. }), "{err}");
        assert!(err.to_string().contains("unknown flow `ghost`"), "{err}");
    }

    #[test]
    fn catalog_rejects_unknown_component() {
        let raw = r#"
flows:
  outer:
    initial_frame: start
    frames:
      start:
        component: not_a_component
"#;
        let err = FlowCatalog::from_yaml_str(raw, "inline").expect_err("unknown component");
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }
}
