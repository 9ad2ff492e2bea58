use policyflow::callbacks::{create_policy_callbacks, CallbackError, Navigator};
use policyflow::ingredients::{
    initialize_report_state, ParameterChange, PolicyState, PopulationScope, PopulationState,
    ReportState, SimulationIndex, SimulationState, UserGeography, UserSimulation,
};
use policyflow::pathway::{
    resolve_gate, Availability, ChoiceState, ExistingData, PathwayError, ReportPathway,
    ReportViewMode, SimulationPathway, SimulationViewMode, SkipDecision,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StepLog(Vec<&'static str>);

impl Navigator<&'static str> for StepLog {
    fn navigate_to(&mut self, mode: &'static str) {
        self.0.push(mode);
    }
}

fn household(id: &str) -> PopulationState {
    PopulationState {
        label: Some(format!("Household {id}")),
        scope: Some(PopulationScope::Household),
        household_id: Some(id.to_string()),
        geography_id: None,
    }
}

fn saved_simulation(id: &str, household_id: &str) -> UserSimulation {
    UserSimulation {
        id: id.to_string(),
        label: Some(format!("Saved {id}")),
        policy: PolicyState {
            id: Some("cl-us".to_string()),
            label: Some("Current law".to_string()),
            parameters: Vec::new(),
        },
        population: household(household_id),
    }
}

/// Report pathway at the setup step with saved simulations available.
fn report_with_saved_simulations() -> ReportPathway {
    let mut pathway = ReportPathway::new("us", "cl-us").expect("pathway");
    pathway.set_existing_data(ExistingData::all_loaded(1, 1, 0, 3));
    pathway.continue_from_report_label().expect("to setup");
    pathway
}

fn pick_saved(pathway: &mut ReportPathway, index: SimulationIndex, saved: &UserSimulation) {
    pathway
        .navigate_to_simulation_selection(index)
        .expect("selection");
    pathway.load_existing_simulation().expect("load existing");
    assert_eq!(
        pathway.current_mode(),
        ReportViewMode::ReportSelectExistingSimulation
    );
    pathway.select_existing_simulation(saved).expect("pick saved");
}

fn reform_change() -> ParameterChange {
    ParameterChange {
        parameter: "gov.irs.credits.ctc.amount".to_string(),
        start_date: "2026-01-01".to_string(),
        end_date: "2100-12-31".to_string(),
        value: json!(3000),
    }
}

#[test]
fn given_report_wizard_when_both_simulations_are_built_then_submission_lists_both() {
    let mut pathway = ReportPathway::new("us", "cl-us").expect("pathway");
    pathway.set_existing_data(ExistingData::all_loaded(1, 1, 0, 0));

    pathway.update_report_label("Budget 2026").expect("label");
    pathway.update_year("2026").expect("year");
    pathway.continue_from_report_label().expect("to setup");

    // baseline: current law on a new household
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Baseline)
        .expect("baseline selection");
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSelectSimulation);
    pathway.create_new_simulation().expect("new baseline");
    assert_eq!(
        pathway.current_view().default_label.as_deref(),
        Some("Budget 2026 baseline simulation")
    );
    pathway.update_simulation_label("Baseline").expect("sim label");
    pathway.continue_from_simulation_label().expect("to sim setup");
    pathway.navigate_to_policy().expect("policy step");
    pathway.select_current_law().expect("current law");
    assert_eq!(pathway.current_mode(), ReportViewMode::SimulationSetup);
    pathway.navigate_to_population().expect("population step");
    assert_eq!(pathway.current_mode(), ReportViewMode::SetupPopulation);
    assert!(!pathway.is_population_locked());
    pathway.create_new_population().expect("new population");
    pathway
        .select_population_scope(PopulationScope::Household)
        .expect("scope");
    assert_eq!(
        pathway.current_view().default_label.as_deref(),
        Some("Custom Household")
    );
    pathway.continue_from_population_label().expect("to builder");
    assert_eq!(
        pathway.current_mode(),
        ReportViewMode::PopulationHouseholdBuilder
    );
    pathway.household_submitted("hh-1").expect("household");
    pathway.continue_to_simulation_submit().expect("to sim submit");
    pathway.simulation_submitted("sim-1").expect("baseline created");
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSetup);

    // reform: no saved simulations, so selection is skipped
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Reform)
        .expect("reform selection");
    assert_eq!(pathway.current_mode(), ReportViewMode::SimulationLabel);
    pathway.continue_from_simulation_label().expect("to sim setup");
    pathway.navigate_to_population().expect("population step");
    assert!(pathway.current_view().population_locked);
    assert_eq!(
        pathway.create_new_population(),
        Err(PathwayError::PopulationLocked {
            action: "create population"
        })
    );
    pathway.copy_population_from_other().expect("copy");
    assert_eq!(pathway.active_population().household_id.as_deref(), Some("hh-1"));

    pathway.navigate_to_policy().expect("policy step");
    pathway.create_new_policy().expect("new policy");
    pathway.update_policy_label("Bigger CTC").expect("policy label");
    pathway.continue_from_policy_label().expect("to parameters");
    pathway.update_policy(vec![reform_change()]).expect("parameters");
    pathway.continue_to_policy_submit().expect("to policy submit");
    pathway.policy_submitted("pol-9").expect("policy created");
    pathway.continue_to_simulation_submit().expect("to sim submit");
    pathway.simulation_submitted("sim-2").expect("reform created");

    pathway.continue_to_report_submit().expect("to report submit");
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSubmit);
    let submission = pathway.submit().expect("submission");
    assert_eq!(submission.country_id, "us");
    assert_eq!(submission.year, "2026");
    assert_eq!(submission.simulation_ids, vec!["sim-1", "sim-2"]);

    let report = pathway.report();
    assert_eq!(report.simulations[0].policy.id.as_deref(), Some("cl-us"));
    assert_eq!(report.simulations[1].policy.id.as_deref(), Some("pol-9"));
    assert_eq!(report.simulations[1].policy.parameters, vec![reform_change()]);
    assert_eq!(
        serde_json::to_value(&submission).expect("json")["simulation_ids"],
        json!(["sim-1", "sim-2"])
    );
}

#[test]
fn given_two_lenses_from_one_factory_when_first_label_changes_then_second_slot_is_untouched() {
    let baseline = create_policy_callbacks(
        ReportState::report_policy_lens(SimulationIndex::Baseline),
        "setup",
        None,
    );
    let reform = create_policy_callbacks(
        ReportState::report_policy_lens(SimulationIndex::Reform),
        "setup",
        None,
    );
    let mut report = initialize_report_state("uk");
    reform.update_label(&mut report, "Reform").expect("reform label");
    let reform_before = serde_json::to_string(&report.simulations[1]).expect("json");

    baseline.update_label(&mut report, "x").expect("baseline label");

    assert_eq!(report.simulations[0].policy.label.as_deref(), Some("x"));
    assert_eq!(
        serde_json::to_string(&report.simulations[1]).expect("json"),
        reform_before
    );
}

#[test]
fn given_failing_mutation_when_callback_runs_then_container_and_step_are_unchanged() {
    let callbacks = create_policy_callbacks(SimulationState::policy_lens(), "setup", None);
    let mut simulation = SimulationState::default();
    let mut steps = StepLog::default();

    let err = callbacks
        .handle_submit_success(&mut simulation, &mut steps, "")
        .expect_err("empty id");
    assert!(matches!(err, CallbackError::MissingId { .. }));
    assert_eq!(simulation, SimulationState::default());
    assert!(steps.0.is_empty());

    callbacks
        .handle_submit_success(&mut simulation, &mut steps, "pol-1")
        .expect("submit");
    assert_eq!(steps.0, vec!["setup"]);
}

#[test]
fn given_invalid_year_when_report_updates_then_report_is_unchanged() {
    let mut pathway = ReportPathway::new("ca", "cl-ca").expect("pathway");
    let before = pathway.report().clone();
    assert!(pathway.update_year("20x6").is_err());
    assert_eq!(pathway.report(), &before);
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportLabel);
}

#[test]
fn given_pending_policies_when_resolving_then_step_is_shown_with_primary_disabled() {
    let data = ExistingData::default();
    let gate = data.policy_gate();
    assert_eq!(gate.decision, SkipDecision::Show);
    assert_eq!(gate.load_existing, ChoiceState::Loading);
    assert!(!gate.primary_enabled);

    // households known empty, geographies still loading
    let gate = resolve_gate(&[Availability::Loaded(0), Availability::Pending]);
    assert_eq!(gate.decision, SkipDecision::Show);
    assert_eq!(gate.load_existing, ChoiceState::Loading);

    // households known non-empty while geographies load
    let gate = resolve_gate(&[Availability::Loaded(2), Availability::Pending]);
    assert_eq!(gate.load_existing, ChoiceState::Available);
    assert!(gate.primary_enabled);
}

#[test]
fn given_pending_policies_when_standalone_enters_policy_then_selection_is_not_skipped() {
    let mut pathway = SimulationPathway::new("us", "cl-us", None).expect("pathway");
    pathway.continue_from_label().expect("to setup");
    pathway.navigate_to_policy().expect("policy");
    assert_eq!(pathway.current_mode(), SimulationViewMode::SetupPolicy);
}

#[test]
fn given_saved_national_geography_when_standalone_loads_it_then_scope_is_national() {
    let finished: Arc<Mutex<Option<SimulationState>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&finished);
    let mut pathway = SimulationPathway::new(
        "us",
        "cl-us",
        Some(Arc::new(move |simulation: &SimulationState| {
            *sink.lock().expect("lock") = Some(simulation.clone());
        })),
    )
    .expect("pathway");
    pathway.set_existing_data(ExistingData::all_loaded(0, 0, 2, 0));

    pathway.update_label("Nationwide").expect("label");
    pathway.continue_from_label().expect("to setup");
    pathway.navigate_to_policy().expect("policy");
    assert_eq!(pathway.current_mode(), SimulationViewMode::PolicyLabel);
    pathway.update_policy_label("Flat tax").expect("policy label");
    pathway.continue_from_policy_label().expect("parameters");
    pathway.continue_to_policy_submit().expect("policy submit");
    pathway.policy_submitted("pol-1").expect("policy created");

    pathway.navigate_to_population().expect("population");
    assert_eq!(pathway.current_mode(), SimulationViewMode::SetupPopulation);
    pathway.load_existing_population().expect("load existing");
    pathway
        .select_existing_geography(&UserGeography {
            geography_id: "us".to_string(),
            country_id: "us".to_string(),
            label: None,
        })
        .expect("geography");
    assert_eq!(
        pathway.state().population.scope,
        Some(PopulationScope::Geography { region: None })
    );

    pathway.continue_to_submit().expect("submit step");
    pathway.simulation_submitted("sim-7").expect("created");
    let finished = finished.lock().expect("lock").clone().expect("hook ran");
    assert_eq!(finished.id.as_deref(), Some("sim-7"));
    assert!(pathway.is_complete());
}

#[test]
fn given_saved_simulations_when_both_are_picked_then_report_reuses_them() {
    let mut pathway = report_with_saved_simulations();
    pick_saved(&mut pathway, SimulationIndex::Baseline, &saved_simulation("s1", "hh-1"));
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSetup);
    assert_eq!(pathway.report().simulations[0].id.as_deref(), Some("s1"));
    assert_eq!(
        pathway.report().simulations[0].population,
        household("hh-1")
    );

    pick_saved(&mut pathway, SimulationIndex::Reform, &saved_simulation("s3", "hh-1"));
    pathway.continue_to_report_submit().expect("to submit");
    let submission = pathway.submit().expect("submission");
    assert_eq!(submission.simulation_ids, vec!["s1", "s3"]);
}

#[test]
fn given_locked_population_when_saved_simulation_uses_another_then_pick_is_rejected() {
    let mut pathway = report_with_saved_simulations();
    pick_saved(&mut pathway, SimulationIndex::Baseline, &saved_simulation("s1", "hh-1"));

    pathway
        .navigate_to_simulation_selection(SimulationIndex::Reform)
        .expect("reform selection");
    pathway.load_existing_simulation().expect("load existing");
    assert!(pathway.is_population_locked());
    let before = pathway.report().clone();

    let err = pathway
        .select_existing_simulation(&saved_simulation("s2", "hh-2"))
        .expect_err("incompatible");
    assert_eq!(
        err,
        PathwayError::IncompatiblePopulation {
            expected: "hh-1".to_string(),
            found: "hh-2".to_string(),
        }
    );
    assert_eq!(pathway.report(), &before);
    assert_eq!(
        pathway.current_mode(),
        ReportViewMode::ReportSelectExistingSimulation
    );

    pathway
        .select_existing_simulation(&saved_simulation("s3", "hh-1"))
        .expect("compatible pick");
    assert_eq!(pathway.report().simulations[1].id.as_deref(), Some("s3"));
}

#[test]
fn given_default_baseline_when_selected_then_report_returns_to_setup() {
    let mut pathway = report_with_saved_simulations();
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Baseline)
        .expect("baseline selection");
    let baseline = SimulationState {
        id: Some("sim-default".to_string()),
        label: Some("Current law, United States".to_string()),
        policy: PolicyState {
            id: Some("cl-us".to_string()),
            label: Some("Current law".to_string()),
            parameters: Vec::new(),
        },
        population: PopulationState {
            label: None,
            scope: Some(PopulationScope::Geography { region: None }),
            household_id: None,
            geography_id: Some("us".to_string()),
        },
    };

    let without_id = SimulationState {
        id: None,
        ..baseline.clone()
    };
    assert_eq!(
        pathway.select_default_baseline(without_id),
        Err(PathwayError::IncompleteSimulation { index: "baseline" })
    );
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSelectSimulation);

    pathway
        .select_default_baseline(baseline.clone())
        .expect("default baseline");
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSetup);
    assert_eq!(pathway.report().simulations[0], baseline);
}

#[test]
fn given_reform_slot_when_default_baseline_is_offered_then_it_is_rejected() {
    let mut pathway = report_with_saved_simulations();
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Reform)
        .expect("reform selection");
    let simulation = SimulationState {
        id: Some("sim-default".to_string()),
        ..SimulationState::default()
    };
    assert_eq!(
        pathway.select_default_baseline(simulation),
        Err(PathwayError::WrongStep {
            action: "select default baseline",
            mode: "report_select_simulation",
        })
    );
    assert_eq!(pathway.report().simulations[0], SimulationState::default());
}

#[test]
fn given_reform_on_other_population_when_default_baseline_is_offered_then_it_is_rejected() {
    let mut pathway = report_with_saved_simulations();
    pick_saved(&mut pathway, SimulationIndex::Reform, &saved_simulation("s2", "hh-2"));
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Baseline)
        .expect("baseline selection");
    let baseline = SimulationState {
        id: Some("sim-default".to_string()),
        population: household("hh-1"),
        ..SimulationState::default()
    };
    assert!(matches!(
        pathway.select_default_baseline(baseline),
        Err(PathwayError::IncompatiblePopulation { .. })
    ));
    assert_eq!(pathway.current_mode(), ReportViewMode::ReportSelectSimulation);
}

#[test]
fn given_baseline_population_when_prefilling_reform_then_reform_shares_it() {
    let mut pathway = report_with_saved_simulations();
    assert_eq!(
        pathway.prefill_reform_population(),
        Err(PathwayError::Callback(CallbackError::MissingPopulation {
            index: "baseline"
        }))
    );

    pick_saved(&mut pathway, SimulationIndex::Baseline, &saved_simulation("s1", "hh-1"));
    pathway.prefill_reform_population().expect("prefill");
    assert_eq!(
        pathway.report().simulations[1].population,
        pathway.report().simulations[0].population
    );
    assert_eq!(pathway.report().simulations[1].id, None);
}

#[test]
fn given_locked_population_when_loading_existing_then_it_is_rejected() {
    let mut pathway = report_with_saved_simulations();
    pick_saved(&mut pathway, SimulationIndex::Baseline, &saved_simulation("s1", "hh-1"));

    pathway
        .navigate_to_simulation_selection(SimulationIndex::Reform)
        .expect("reform selection");
    pathway.create_new_simulation().expect("new reform");
    pathway.continue_from_simulation_label().expect("to sim setup");
    pathway.navigate_to_population().expect("population step");
    assert_eq!(pathway.current_mode(), ReportViewMode::SetupPopulation);

    assert_eq!(
        pathway.load_existing_population(),
        Err(PathwayError::PopulationLocked {
            action: "load population"
        })
    );
    assert_eq!(pathway.current_mode(), ReportViewMode::SetupPopulation);
}

#[test]
fn given_empty_data_when_always_shown_steps_render_then_gate_says_show() {
    let mut pathway = ReportPathway::new("us", "cl-us").expect("pathway");
    pathway.set_existing_data(ExistingData::all_loaded(0, 0, 0, 0));
    pathway.continue_from_report_label().expect("to setup");
    pathway
        .navigate_to_simulation_selection(SimulationIndex::Baseline)
        .expect("baseline selection");

    let gate = pathway.current_view().gate.expect("selection gate");
    assert_eq!(gate.decision, SkipDecision::Show);
    assert_eq!(gate.load_existing, ChoiceState::Unavailable);
    assert!(gate.primary_enabled);

    pathway.create_new_simulation().expect("new baseline");
    pathway.continue_from_simulation_label().expect("to sim setup");
    pathway.navigate_to_policy().expect("policy step");
    assert_eq!(pathway.current_mode(), ReportViewMode::SetupPolicy);
    let gate = pathway.current_view().gate.expect("policy gate");
    assert_eq!(gate.decision, SkipDecision::Show);
    assert_eq!(gate.load_existing, ChoiceState::Unavailable);
    assert_eq!(
        pathway.load_existing_policy(),
        Err(PathwayError::NothingToLoad { what: "policies" })
    );
}
