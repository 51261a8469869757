//! Behavioural tests for `SelectionCoordinator` ETA handling.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use waypost_core::test_support::{RecordingDispatcher, ScriptedLocationSource};
use waypost_core::{
    AuthorizationStatus, CoordinatorConfig, EtaError, EtaState, EtaTicket, LocationEvent,
    LocationProvider, MapView, PoiCatalog, SelectionCoordinator, TransportMode, UserLocation,
};

type Coordinator = SelectionCoordinator<ScriptedLocationSource, RecordingDispatcher>;

/// World state shared by the selection scenarios.
#[derive(Debug)]
struct SelectionWorld {
    coordinator: RefCell<Coordinator>,
    earlier: RefCell<Option<EtaTicket>>,
}

#[fixture]
fn world() -> SelectionWorld {
    let mut coordinator = SelectionCoordinator::new(
        PoiCatalog::toronto(),
        LocationProvider::new(ScriptedLocationSource::default()),
        RecordingDispatcher::default(),
        CoordinatorConfig::default(),
    );
    coordinator.start();
    SelectionWorld {
        coordinator: RefCell::new(coordinator),
        earlier: RefCell::new(None),
    }
}

fn latest_ticket(world: &SelectionWorld) -> EtaTicket {
    *world
        .coordinator
        .borrow()
        .dispatcher()
        .last()
        .expect("a request should have been dispatched")
}

fn select(world: &SelectionWorld, name: &str) {
    if world.coordinator.borrow().dispatcher().last().is_some() {
        world.earlier.replace(Some(latest_ticket(world)));
    }
    let mut coordinator = world.coordinator.borrow_mut();
    let id = coordinator
        .catalog()
        .find_by_name(name)
        .map(|poi| poi.id)
        .expect("POI should be in the catalogue");
    coordinator.select_poi(Some(id)).expect("selection should succeed");
}

// --- Given steps ---

#[given("a user standing at Union Station")]
fn given_user_at_union(world: &SelectionWorld) {
    let mut coordinator = world.coordinator.borrow_mut();
    coordinator.handle_location_event(LocationEvent::AuthorizationChanged(
        AuthorizationStatus::AuthorizedWhenInUse,
    ));
    coordinator.handle_location_event(LocationEvent::Updated(UserLocation::new(
        43.6452, -79.3806,
    )));
}

#[given("a user who denied location access")]
fn given_user_denied(world: &SelectionWorld) {
    world
        .coordinator
        .borrow_mut()
        .handle_location_event(LocationEvent::AuthorizationChanged(
            AuthorizationStatus::Denied,
        ));
}

// --- When steps ---

#[when("I select CN Tower")]
fn when_select_tower(world: &SelectionWorld) {
    select(world, "CN Tower");
}

#[when("I select Toronto Zoo")]
fn when_select_zoo(world: &SelectionWorld) {
    select(world, "Toronto Zoo");
}

#[when("I switch to walking")]
fn when_switch_walking(world: &SelectionWorld) {
    world
        .coordinator
        .borrow_mut()
        .set_transport_mode(TransportMode::Walking);
}

#[when("an estimate of {seconds} seconds arrives for the latest request")]
fn when_latest_answers(world: &SelectionWorld, seconds: u64) {
    let ticket = latest_ticket(world);
    let applied = world
        .coordinator
        .borrow_mut()
        .complete_eta(ticket.complete(Ok(Duration::from_secs(seconds))));
    assert!(applied, "latest completion should be applied");
}

#[when("the earlier request answers with {seconds} seconds")]
fn when_earlier_answers(world: &SelectionWorld, seconds: u64) {
    let ticket = world
        .earlier
        .borrow()
        .expect("an earlier request should have been recorded");
    let applied = world
        .coordinator
        .borrow_mut()
        .complete_eta(ticket.complete(Ok(Duration::from_secs(seconds))));
    assert!(!applied, "stale completion should be discarded");
}

#[when("the latest request fails with no route")]
fn when_latest_fails(world: &SelectionWorld) {
    let ticket = latest_ticket(world);
    world
        .coordinator
        .borrow_mut()
        .complete_eta(ticket.complete(Err(EtaError::NoRoute)));
}

// --- Then steps ---

#[then("the ETA reads {expected}")]
fn then_eta_reads(world: &SelectionWorld, expected: String) {
    let eta = world.coordinator.borrow().state().eta;
    assert_eq!(eta.to_string(), expected.trim_matches('"'));
}

#[then("the distance reads {expected}")]
fn then_distance_reads(world: &SelectionWorld, expected: String) {
    let panel = world
        .coordinator
        .borrow()
        .detail_panel()
        .expect("a POI should be selected");
    assert_eq!(
        panel.distance_line().as_deref(),
        Some(expected.trim_matches('"'))
    );
}

#[then("the ETA is pending")]
fn then_eta_pending(world: &SelectionWorld) {
    assert_eq!(world.coordinator.borrow().state().eta, EtaState::Pending);
}

#[then("{count} requests have been dispatched")]
fn then_request_count(world: &SelectionWorld, count: usize) {
    assert_eq!(
        world.coordinator.borrow().dispatcher().tickets().len(),
        count
    );
}

#[then("the map shows the no-location placeholder")]
fn then_placeholder(world: &SelectionWorld) {
    assert_eq!(world.coordinator.borrow().map_view(), MapView::Placeholder);
}

// --- Scenario registrations ---

#[scenario(path = "tests/features/selection.feature", index = 0)]
fn resolves_matching_estimate(world: SelectionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/selection.feature", index = 1)]
fn discards_stale_estimate(world: SelectionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/selection.feature", index = 2)]
fn mode_change_requests_again(world: SelectionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/selection.feature", index = 3)]
fn failed_lookup_is_unavailable(world: SelectionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/selection.feature", index = 4)]
fn denied_permission_shows_placeholder(world: SelectionWorld) {
    let _ = world;
}
