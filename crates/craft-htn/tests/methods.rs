mod common;

use common::{standard_catalog, AGENT};
use craft_htn::{CraftTask, CraftingDomain, ItemId, OperatorName, TaskKey};

fn domain() -> CraftingDomain<&'static str> {
    CraftingDomain::with_defaults(&standard_catalog()).unwrap()
}

fn decompose(
    domain: &CraftingDomain<&'static str>,
    state: &craft_htn::CraftState<&'static str>,
    task: &CraftTask<&'static str>,
) -> Option<Vec<CraftTask<&'static str>>> {
    domain
        .htn()
        .methods(&task.task_key())
        .iter()
        .find_map(|method| method.decompose(state, task))
}

#[test]
fn have_enough_is_empty_and_repeatable_once_satisfied() {
    let domain = domain();
    let mut state = domain.initial_state(AGENT, 10);
    state.set("wood", &AGENT, 3).unwrap();
    let before = state.clone();
    let task = CraftTask::have_enough(AGENT, "wood", 3);

    assert_eq!(decompose(&domain, &state, &task), Some(vec![]));
    assert_eq!(decompose(&domain, &state, &task), Some(vec![]));
    assert_eq!(state, before);
}

#[test]
fn have_enough_produces_then_rechecks_when_short() {
    let domain = domain();
    let state = domain.initial_state(AGENT, 10);
    let task = CraftTask::have_enough(AGENT, "wood", 3);

    assert_eq!(
        decompose(&domain, &state, &task),
        Some(vec![
            CraftTask::produce(AGENT, "wood"),
            CraftTask::have_enough(AGENT, "wood", 3),
        ])
    );
    assert_eq!(
        domain.htn().method_names(&TaskKey::HaveEnough),
        vec!["check_enough", "produce_enough"]
    );
}

#[test]
fn produce_dispatches_only_for_craftable_items() {
    let domain = domain();
    let state = domain.initial_state(AGENT, 10);

    assert_eq!(
        decompose(&domain, &state, &CraftTask::produce(AGENT, "plank")),
        Some(vec![CraftTask::produce_item(AGENT, "plank")])
    );

    let catalog = craft_htn::Catalog::new()
        .item("wood")
        .tool("anvil")
        .recipe("chop", craft_htn::Recipe::new(1).produces("wood", 1));
    let bare = CraftingDomain::<&'static str>::with_defaults(&catalog).unwrap();
    let state = bare.initial_state(AGENT, 10);
    assert_eq!(decompose(&bare, &state, &CraftTask::produce(AGENT, "anvil")), None);
}

#[test]
fn recipe_methods_secure_requirements_then_ingredients_in_crafting_order() {
    let domain = domain();
    let methods = domain.recipe_methods("rail");
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name(), "produce_rail_via_craft_rail_at_bench");

    assert_eq!(
        methods[0].subtasks(&AGENT),
        vec![
            CraftTask::have_enough(AGENT, "bench", 1),
            CraftTask::have_enough(AGENT, "ingot", 6),
            CraftTask::have_enough(AGENT, "stick", 1),
            CraftTask::apply(AGENT, OperatorName::for_recipe("craft rail at bench")),
        ]
    );

    let smelt = &domain.recipe_methods("ingot")[0];
    let subtasks = smelt.subtasks(&AGENT);
    let items: Vec<Option<&str>> = subtasks
        .iter()
        .map(|task| task.item().map(ItemId::as_str))
        .collect();
    assert_eq!(items, vec![Some("furnace"), Some("coal"), Some("ore"), None]);
}

#[test]
fn wood_group_tries_fast_tools_before_punching() {
    let domain = domain();
    let names: Vec<&str> = domain.recipe_methods("wood").iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec![
            "produce_wood_via_stone_axe_for_wood",
            "produce_wood_via_iron_axe_for_wood",
            "produce_wood_via_wooden_axe_for_wood",
            "produce_wood_via_punch_for_wood",
        ]
    );
}

#[test]
fn every_recipe_has_an_operator_and_a_method() {
    let domain = domain();
    let catalog = standard_catalog();

    assert_eq!(domain.operators().len(), catalog.recipes.len());
    let grouped: usize = domain
        .products()
        .map(|item| domain.recipe_methods(item.as_str()).len())
        .sum();
    assert_eq!(grouped, catalog.recipes.len());

    for name in catalog.recipes.keys() {
        let op = OperatorName::for_recipe(name);
        assert!(domain.htn().is_known(&TaskKey::Operator(op.clone())), "{op}");
    }
    assert!(domain.htn().operator_names().contains(&"op_smelt_ore_in_furnace"));
}
