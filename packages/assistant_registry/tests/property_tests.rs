use proptest::prelude::*;

use assistant_registry::{
    AssistantDescriptor, Registry, SelectionState, apply_visibility, render_page,
};

fn arb_registry() -> impl Strategy<Value = Registry> {
    prop::collection::btree_set("[A-Za-z][A-Za-z ]{0,15}", 1..8).prop_map(|names| {
        let assistants = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                AssistantDescriptor::new(
                    name,
                    format!("https://hub.example.com/w/chat/{i}"),
                    "🤖",
                    "",
                )
            })
            .collect();
        Registry::new(assistants).expect("generated registry is valid")
    })
}

/// A registry plus a sequence of indices into it to select in turn.
fn arb_session() -> impl Strategy<Value = (Registry, Vec<usize>)> {
    arb_registry().prop_flat_map(|registry| {
        let len = registry.assistants().len();
        (Just(registry), prop::collection::vec(0..len, 0..20))
    })
}

proptest! {
    #[test]
    fn initialize_selects_first((registry, _) in arb_session()) {
        let state = SelectionState::initialize(&registry, None);
        prop_assert_eq!(state.selected(), registry.first().name.as_str());

        let map = apply_visibility(&registry, state.selected());
        prop_assert_eq!(map.visible_count(), 1);
        prop_assert_eq!(
            map.visible_region().map(|r| r.assistant.clone()),
            Some(registry.first().name.clone())
        );
    }

    #[test]
    fn exactly_one_visible_after_any_selects((registry, picks) in arb_session()) {
        let mut state = SelectionState::initialize(&registry, None);
        for pick in picks {
            let name = registry.assistants()[pick].name.clone();
            state = state.select(&registry, &name).unwrap();

            let page = render_page(&registry, &state);
            prop_assert_eq!(page.visibility.visible_count(), 1);
            prop_assert_eq!(page.regions.len(), registry.assistants().len());
            prop_assert_eq!(page.regions.iter().filter(|r| r.visible).count(), 1);
            let visible = page.regions.iter().find(|r| r.visible).unwrap();
            prop_assert_eq!(&visible.assistant, &name);
        }
    }

    #[test]
    fn regions_are_stable_across_selects((registry, picks) in arb_session()) {
        let state = SelectionState::initialize(&registry, None);
        let first = render_page(&registry, &state);
        let mut state = state;
        for pick in picks {
            let name = registry.assistants()[pick].name.clone();
            state = state.select(&registry, &name).unwrap();
            let page = render_page(&registry, &state);
            for (before, after) in first.regions.iter().zip(page.regions.iter()) {
                prop_assert_eq!(&before.id, &after.id);
                prop_assert_eq!(&before.url, &after.url);
            }
        }
    }

    #[test]
    fn select_idempotent((registry, picks) in arb_session()) {
        let state = SelectionState::initialize(&registry, None);
        for pick in picks {
            let name = &registry.assistants()[pick].name;
            let once = state.select(&registry, name).unwrap();
            let twice = once.select(&registry, name).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(render_page(&registry, &once), render_page(&registry, &twice));
        }
    }

    #[test]
    fn unknown_name_leaves_state_unchanged(
        (registry, picks) in arb_session(),
        bogus in "[0-9]{1,6}",
    ) {
        // Generated names start with a letter, so digits never collide.
        let mut state = SelectionState::initialize(&registry, None);
        if let Some(&pick) = picks.first() {
            state = state.select(&registry, &registry.assistants()[pick].name).unwrap();
        }
        let before = render_page(&registry, &state);

        prop_assert!(state.select(&registry, &bogus).is_err());
        prop_assert_eq!(render_page(&registry, &state), before);
    }
}
