use super::*;
use shared::domain::StoryId;

fn story(id: &str, num_comments: u32) -> StoryRecord {
    StoryRecord {
        object_id: StoryId::from(id),
        url: Some(format!("https://example.com/{id}")),
        title: format!("title {id}"),
        author: format!("author {id}"),
        num_comments,
        points: 1,
    }
}

fn success(ids: &[&str], page: u32) -> StoriesAction {
    StoriesAction::FetchSuccess {
        list: ids.iter().map(|id| story(id, 1)).collect(),
        page,
    }
}

fn ids(state: &StoriesState) -> Vec<&str> {
    state.items().iter().map(|s| s.object_id.as_str()).collect()
}

#[test]
fn initial_state_is_empty_and_idle() {
    let state = StoriesState::new();
    assert!(state.items().is_empty());
    assert_eq!(state.current_page(), 0);
    assert!(!state.is_loading());
    assert!(!state.is_error());
}

#[test]
fn fetch_init_sets_loading_and_clears_error() {
    let failed = reduce(StoriesState::new(), StoriesAction::FetchFailure);
    let loading = reduce(failed, StoriesAction::FetchInit);
    assert!(loading.is_loading());
    assert!(!loading.is_error());
}

#[test]
fn end_to_end_fetch_append_remove_cycle() {
    let mut state = StoriesState::new();

    state.dispatch(StoriesAction::FetchInit);
    assert!(state.items().is_empty());
    assert_eq!(state.current_page(), 0);
    assert!(state.is_loading());
    assert!(!state.is_error());

    state.dispatch(success(&["A", "B"], 0));
    assert_eq!(ids(&state), vec!["A", "B"]);
    assert!(!state.is_loading());

    state.dispatch(success(&["C"], 1));
    assert_eq!(ids(&state), vec!["A", "B", "C"]);
    assert_eq!(state.current_page(), 1);

    state.dispatch(StoriesAction::RemoveItem(story("B", 1)));
    assert_eq!(ids(&state), vec!["A", "C"]);
}

#[test]
fn page_zero_success_replaces_previous_items() {
    let mut state = StoriesState::new();
    for batch in [&["a", "b"][..], &["c"][..], &["d", "e", "f"][..]] {
        state.dispatch(success(batch, 0));
        assert_eq!(ids(&state), batch.to_vec());
    }
}

#[test]
fn later_pages_concatenate_in_call_order() {
    let mut state = StoriesState::new();
    state.dispatch(success(&["a"], 0));
    state.dispatch(success(&["b", "c"], 1));
    state.dispatch(success(&["d"], 2));
    state.dispatch(success(&["a"], 3));

    assert_eq!(ids(&state), vec!["a", "b", "c", "d", "a"]);
    assert_eq!(state.current_page(), 3);
}

#[test]
fn failure_keeps_items_from_before_the_cycle() {
    let mut state = StoriesState::new();
    state.dispatch(success(&["a", "b"], 0));
    state.dispatch(StoriesAction::FetchInit);
    state.dispatch(StoriesAction::FetchFailure);

    assert_eq!(ids(&state), vec!["a", "b"]);
    assert!(state.is_error());
    assert!(!state.is_loading());
}

#[test]
fn remove_matches_on_identifier_only() {
    let mut state = StoriesState::new();
    state.dispatch(success(&["a", "b"], 0));

    let mut stale_copy = story("a", 999);
    stale_copy.title = "edited elsewhere".into();
    state.dispatch(StoriesAction::RemoveItem(stale_copy));

    assert_eq!(ids(&state), vec!["b"]);
}

#[test]
fn remove_is_idempotent_and_absent_is_noop() {
    let mut state = StoriesState::new();
    state.dispatch(success(&["a", "b", "c"], 0));

    let once = reduce(state.clone(), StoriesAction::RemoveItem(story("b", 1)));
    let twice = reduce(once.clone(), StoriesAction::RemoveItem(story("b", 1)));
    assert_eq!(once, twice);

    let untouched = reduce(state.clone(), StoriesAction::RemoveItem(story("zzz", 1)));
    assert_eq!(untouched, state);
}

#[test]
fn sum_comments_tracks_item_changes() {
    let mut state = StoriesState::new();
    state.dispatch(StoriesAction::FetchSuccess {
        list: vec![story("a", 3), story("b", 4)],
        page: 0,
    });
    assert_eq!(state.sum_comments(), 7);

    state.dispatch(StoriesAction::RemoveItem(story("a", 0)));
    assert_eq!(state.sum_comments(), 4);
    assert_eq!(sum_comments(&[]), 0);
}

#[test]
fn decodes_tagged_actions() {
    let action = StoriesAction::decode(
        r#"{"type":"FETCH_SUCCESS","payload":{"list":[{"object_id":"1","url":null,"title":"t","author":"a","num_comments":2,"points":3}],"page":1}}"#,
    )
    .expect("decode");
    assert_eq!(action.name(), "FETCH_SUCCESS");

    assert_eq!(
        StoriesAction::decode(r#"{"type":"FETCH_INIT"}"#).expect("init"),
        StoriesAction::FetchInit
    );
}

#[test]
fn unknown_action_tag_is_rejected() {
    let err = StoriesAction::decode(r#"{"type":"STORIES_RESET"}"#).expect_err("must fail");
    assert!(err.to_string().contains("invalid stories action"));
}
