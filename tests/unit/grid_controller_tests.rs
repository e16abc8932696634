/*!
 * Tests for the interactive selection controller
 */

use subsel::app_config::SelectionConfig;
use subsel::errors::SelectionError;
use subsel::selection::SelectionController;

use crate::common::{
    always_notify_config, as_listener, grid_with_config_and_recorder, grid_with_recorder,
    selection, AddRecorder, Grid, RecordingListener, SelectionEvent,
};

/// Setting the same active line twice notifies once
#[test]
fn test_setActiveLine_twiceWithSameLine_shouldNotifyOnce() {
    let (grid, recorder) = grid_with_recorder(3);

    grid.set_active_line(Some(2));
    grid.set_active_line(Some(2));

    assert_eq!(grid.active_line(), Some(2));
    assert_eq!(recorder.events(), vec![SelectionEvent::Active(Some(2))]);
}

#[test]
fn test_setActiveLine_clearingAndClearingAgain_shouldNotifyOnce() {
    let (grid, recorder) = grid_with_recorder(3);

    grid.set_active_line(None);
    assert_eq!(recorder.count(), 0);

    grid.set_active_line(Some(1));
    grid.set_active_line(None);
    grid.set_active_line(None);

    assert_eq!(grid.active_line(), None);
    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(Some(1)), SelectionEvent::Active(None)]
    );
}

#[test]
fn test_setActiveLine_shouldNotTouchSelection() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_selected_set(selection([1, 3]));
    recorder.clear();

    grid.set_active_line(Some(2));

    assert_eq!(grid.selected_set(), selection([1, 3]));
    assert_eq!(recorder.events(), vec![SelectionEvent::Active(Some(2))]);
}

/// Selected set round-trips exactly
#[test]
fn test_setSelectedSet_thenGet_shouldReturnSameSet() {
    let (grid, recorder) = grid_with_recorder(5);

    grid.set_selected_set(selection([5, 1, 3]));

    assert_eq!(grid.selected_set(), selection([1, 3, 5]));
    assert_eq!(recorder.events(), vec![SelectionEvent::Selected(vec![1, 3, 5])]);
}

#[test]
fn test_setSelectedSet_withIdenticalSet_shouldNotNotify() {
    let (grid, recorder) = grid_with_recorder(5);

    grid.set_selected_set(selection([2, 4]));
    grid.set_selected_set(selection([4, 2]));

    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_setSelectedSet_emptyOnEmpty_shouldNotNotify() {
    let (grid, recorder) = grid_with_recorder(5);

    grid.set_selected_set(selection([]));

    assert!(grid.selected_set().is_empty());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_setSelectedSet_withAlwaysPolicy_shouldNotifyIdenticalSets() {
    let (grid, recorder) = grid_with_config_and_recorder(5, always_notify_config());

    grid.set_selected_set(selection([2, 4]));
    grid.set_selected_set(selection([4, 2]));

    assert_eq!(
        recorder.events(),
        vec![
            SelectionEvent::Selected(vec![2, 4]),
            SelectionEvent::Selected(vec![2, 4]),
        ]
    );
}

/// Successful navigation moves the active line and resets the selection
#[test]
fn test_nextLine_fromMiddle_shouldMoveAndSelectOnlyNewLine() {
    let (grid, recorder) = grid_with_recorder(4);
    grid.set_active_line(Some(2));
    grid.set_selected_set(selection([1, 2]));
    recorder.clear();

    grid.next_line();

    assert_eq!(grid.active_line(), Some(3));
    assert_eq!(grid.selected_set(), selection([3]));
    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(Some(3)), SelectionEvent::Selected(vec![3])]
    );
}

#[test]
fn test_prevLine_fromMiddle_shouldMoveAndSelectOnlyNewLine() {
    let (grid, recorder) = grid_with_recorder(4);
    grid.set_active_line(Some(3));
    recorder.clear();

    grid.prev_line();

    assert_eq!(grid.active_line(), Some(2));
    assert_eq!(grid.selected_set(), selection([2]));
    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(Some(2)), SelectionEvent::Selected(vec![2])]
    );
}

/// Navigation past the end leaves everything alone
#[test]
fn test_nextLine_atLastLine_shouldChangeNothing() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(3));
    grid.set_selected_set(selection([1, 3]));
    recorder.clear();

    grid.next_line();

    assert_eq!(grid.active_line(), Some(3));
    assert_eq!(grid.selected_set(), selection([1, 3]));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_prevLine_atFirstLine_shouldChangeNothing() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(1));
    recorder.clear();

    grid.prev_line();

    assert_eq!(grid.active_line(), Some(1));
    assert!(grid.selected_set().is_empty());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_navigation_withoutActiveLine_shouldChangeNothing() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_selected_set(selection([2]));
    recorder.clear();

    grid.next_line();
    grid.prev_line();

    assert_eq!(grid.active_line(), None);
    assert_eq!(grid.selected_set(), selection([2]));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_navigation_onEmptyDocument_shouldChangeNothing() {
    let grid = Grid::new(Vec::new());
    let recorder = RecordingListener::new();
    grid.add_listener_for_test(&recorder);

    grid.next_line();
    grid.prev_line();

    assert_eq!(grid.active_line(), None);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_nextLine_whenSelectionAlreadyMatches_shouldOnlyAnnounceActiveLine() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(1));
    grid.set_selected_set(selection([2]));
    recorder.clear();

    grid.next_line();

    assert_eq!(grid.selected_set(), selection([2]));
    assert_eq!(recorder.events(), vec![SelectionEvent::Active(Some(2))]);
}

#[test]
fn test_nextLine_whenSelectionAlreadyMatchesWithAlwaysPolicy_shouldAnnounceBoth() {
    let (grid, recorder) = grid_with_config_and_recorder(3, always_notify_config());
    grid.set_active_line(Some(1));
    grid.set_selected_set(selection([2]));
    recorder.clear();

    grid.next_line();

    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(Some(2)), SelectionEvent::Selected(vec![2])]
    );
}

/// A listener added twice is notified once per change
#[test]
fn test_addSelectionListener_twice_shouldDeliverOnce() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.add_listener_for_test(&recorder);
    assert_eq!(grid.listener_count(), 1);

    grid.set_active_line(Some(1));
    grid.set_selected_set(selection([1]));

    assert_eq!(recorder.count(), 2);
}

#[test]
fn test_removeSelectionListener_shouldStopNotifications() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(1));

    grid.remove_selection_listener(&as_listener(&recorder));
    grid.set_active_line(Some(2));

    assert_eq!(grid.listener_count(), 0);
    assert_eq!(recorder.events(), vec![SelectionEvent::Active(Some(1))]);
}

#[test]
fn test_removeSelectionListener_neverAdded_shouldBeNoOp() {
    let (grid, recorder) = grid_with_recorder(3);
    let stranger = RecordingListener::<u32>::new();

    grid.remove_selection_listener(&as_listener(&stranger));
    grid.set_active_line(Some(1));

    assert_eq!(grid.listener_count(), 1);
    assert_eq!(recorder.count(), 1);
    assert_eq!(stranger.count(), 0);
}

#[test]
fn test_droppedListener_shouldBeForgotten() {
    let (grid, recorder) = grid_with_recorder(3);
    drop(recorder);

    grid.set_active_line(Some(1));

    assert_eq!(grid.listener_count(), 0);
}

#[test]
fn test_multipleListeners_shouldAllBeNotified() {
    let (grid, first) = grid_with_recorder(3);
    let second = RecordingListener::new();
    grid.add_listener_for_test(&second);

    grid.set_active_line(Some(3));

    assert_eq!(first.events(), second.events());
    assert_eq!(first.count(), 1);
}

/// Line validation refuses foreign lines without touching state
#[test]
fn test_trySetActiveLine_withUnknownLine_shouldRefuse() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(1));
    recorder.clear();

    let result = grid.try_set_active_line(Some(9));

    assert_eq!(result, Err(SelectionError::UnknownLine("9".to_string())));
    assert_eq!(grid.active_line(), Some(1));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_setSelectedSet_withOneUnknownLine_shouldLeaveSetUntouched() {
    let (grid, recorder) = grid_with_recorder(3);
    grid.set_selected_set(selection([1]));
    recorder.clear();

    grid.set_selected_set(selection([2, 3, 9]));

    assert_eq!(grid.selected_set(), selection([1]));
    assert_eq!(recorder.count(), 0);
    assert!(grid.try_set_selected_set(selection([9])).is_err());
}

#[test]
fn test_trySetSelectedSet_withWholeLargeDocument_shouldValidateEveryLine() {
    let grid = Grid::new((1..=20_000).collect());
    let mut all = selection(1..=20_000);

    assert_eq!(grid.try_set_selected_set(all.clone()), Ok(true));

    all.insert(20_001);
    assert_eq!(
        grid.try_set_selected_set(all),
        Err(SelectionError::UnknownLine("20001".to_string()))
    );
    assert_eq!(grid.selected_set().len(), 20_000);
}

#[test]
fn test_trySetSelectedSet_shouldReportWhetherNotified() {
    let (grid, _recorder) = grid_with_recorder(3);

    assert_eq!(grid.try_set_selected_set(selection([1, 2])), Ok(true));
    assert_eq!(grid.try_set_selected_set(selection([2, 1])), Ok(false));
}

#[test]
fn test_trySetActiveLine_clearing_shouldNeverBeRefused() {
    let (grid, _recorder) = grid_with_recorder(3);
    grid.set_active_line(Some(2));

    assert_eq!(grid.try_set_active_line(None), Ok(true));
}

/// Session start state
#[test]
fn test_resetSession_withFirstPolicy_shouldActivateAndSelectFirstLine() {
    let (grid, recorder) = grid_with_recorder(3);

    grid.reset_session();

    assert_eq!(grid.active_line(), Some(1));
    assert_eq!(grid.selected_set(), selection([1]));
    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(Some(1)), SelectionEvent::Selected(vec![1])]
    );
}

#[test]
fn test_resetSession_withNonePolicy_shouldClearState() {
    let config = SelectionConfig {
        initial_active_line: subsel::app_config::InitialActiveLine::None,
        ..SelectionConfig::default()
    };
    let (grid, recorder) = grid_with_config_and_recorder(3, config);
    grid.set_active_line(Some(2));
    grid.set_selected_set(selection([2, 3]));
    recorder.clear();

    grid.reset_session();

    assert_eq!(grid.active_line(), None);
    assert!(grid.selected_set().is_empty());
    assert_eq!(
        recorder.events(),
        vec![SelectionEvent::Active(None), SelectionEvent::Selected(vec![])]
    );
}

#[test]
fn test_resetSession_onEmptyDocument_shouldNotNotify() {
    let grid = Grid::new(Vec::new());
    let recorder = RecordingListener::new();
    grid.add_listener_for_test(&recorder);

    grid.reset_session();

    assert_eq!(grid.active_line(), None);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_controller_asTraitObject_shouldBehaveTheSame() {
    let (grid, recorder) = grid_with_recorder(3);
    let controller: &dyn SelectionController<u32> = &grid;

    controller.set_active_line(Some(1));
    controller.next_line();

    assert_eq!(controller.active_line(), Some(2));
    assert_eq!(recorder.count(), 3);
}
