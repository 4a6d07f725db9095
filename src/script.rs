//! Scripted gate scenarios.
//!
//! A scenario describes a gated element tree, an initial auth status and a
//! list of steps (clicks, dismissals, auth transitions). Replaying it drives a
//! real [`InteractionGate`] and records what happened at every step.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthStatus, IdentityProvider};
use crate::config::CopyConfig;
use crate::element::{Element, ElementTree, NodeId};
use crate::error::{GateError, GateResult};
use crate::gate::{GateMode, InteractionGate};
use crate::markers::{Classification, MarkerConfig};
use crate::prompt::PromptState;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub id: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Click(String),
    Dismiss,
    BannerSignIn,
    PromptSignIn,
    Auth(String),
    Render,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Click(id) => write!(f, "click {}", id),
            Step::Dismiss => write!(f, "dismiss"),
            Step::BannerSignIn => write!(f, "banner sign-in"),
            Step::PromptSignIn => write!(f, "prompt sign-in"),
            Step::Auth(state) => write!(f, "auth {}", state),
            Step::Render => write!(f, "render"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_auth")]
    pub auth: String,
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub markers: Option<MarkerConfig>,
    pub tree: NodeSpec,
    /// Steps are written as `- click: enroll` or a bare `- dismiss`
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

fn default_name() -> String {
    "scenario".to_string()
}

fn default_auth() -> String {
    "guest".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub mode: GateMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    pub suppressed: bool,
    /// Ids of the nodes whose handlers ran
    pub handlers: Vec<String>,
    pub prompt: PromptState,
    pub sign_in_requests: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub instance: Uuid,
    pub generated_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    pub fn suppressed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.suppressed).count()
    }
}

struct BuiltTree {
    tree: ElementTree,
    ids: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
}

fn build_tree(spec: &NodeSpec) -> GateResult<BuiltTree> {
    let mut built = BuiltTree {
        tree: ElementTree::new(element_of(spec)),
        ids: HashMap::new(),
        names: HashMap::new(),
    };
    let root = built.tree.root();
    register(&mut built, spec, root)?;
    add_children(&mut built, spec, root)?;
    Ok(built)
}

fn element_of(spec: &NodeSpec) -> Element {
    let element = Element::new(&spec.tag).with_classes(spec.classes.iter().cloned());
    match &spec.action {
        Some(action) => element.with_action(action),
        None => element,
    }
}

fn register(built: &mut BuiltTree, spec: &NodeSpec, node: NodeId) -> GateResult<()> {
    if let Some(id) = &spec.id {
        if built.ids.insert(id.clone(), node).is_some() {
            return Err(GateError::DuplicateNode(id.clone()));
        }
        built.names.insert(node, id.clone());
        built.tree.on_click(node, |_| {});
    }
    Ok(())
}

fn add_children(built: &mut BuiltTree, spec: &NodeSpec, parent: NodeId) -> GateResult<()> {
    for child in &spec.children {
        let node = built.tree.append(parent, element_of(child));
        register(built, child, node)?;
        add_children(built, child, node)?;
    }
    Ok(())
}

impl Scenario {
    pub fn from_yaml(raw: &str) -> GateResult<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> GateResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GateError::io(path.display().to_string(), e))?;
        Self::from_yaml(&raw)
    }

    /// Replay the scenario against a fresh gate
    pub fn run(&self, markers: &MarkerConfig, copy: &CopyConfig) -> GateResult<ScenarioReport> {
        let initial: AuthStatus = self.auth.parse()?;
        let mut built = build_tree(&self.tree)?;

        let provider = IdentityProvider::with_status(initial);
        let sign_ins = Arc::new(AtomicUsize::new(0));
        let counter = sign_ins.clone();
        let mut gate = InteractionGate::new(self.name.clone(), provider.view(), Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .with_markers(self.markers.clone().unwrap_or_else(|| markers.clone()))
        .with_copy(copy.clone());
        if let Some(fallback) = &self.fallback {
            gate = gate.with_fallback(fallback.clone());
        }

        tracing::info!(scenario = %self.name, instance = %gate.instance(), steps = self.steps.len(), "replaying scenario");

        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let mut classification = None;
            let mut suppressed = false;
            let mut handlers = Vec::new();

            match step {
                Step::Click(id) => {
                    let target = *built
                        .ids
                        .get(id)
                        .ok_or_else(|| GateError::unknown_node(id.clone()))?;
                    let outcome = gate.dispatch(&mut built.tree, target);
                    suppressed = outcome.suppressed();
                    classification = outcome.classification;
                    handlers = outcome
                        .event
                        .handled_by
                        .iter()
                        .filter_map(|node| built.names.get(node).cloned())
                        .collect();
                }
                Step::Dismiss => gate.dismiss_prompt(),
                Step::BannerSignIn => gate.banner_sign_in(),
                Step::PromptSignIn => gate.prompt_sign_in(),
                Step::Auth(state) => provider.set(state.parse()?),
                Step::Render => {}
            }

            let mode = gate.render().mode();
            steps.push(StepReport {
                step: step.to_string(),
                mode,
                classification,
                suppressed,
                handlers,
                prompt: gate.prompt().state().clone(),
                sign_in_requests: sign_ins.load(Ordering::SeqCst),
            });
        }

        Ok(ScenarioReport {
            name: self.name.clone(),
            instance: gate.instance(),
            generated_at: Utc::now(),
            steps,
        })
    }
}
