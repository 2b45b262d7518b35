//! # Unit Proxy Behavior Tests
//!
//! End-to-end checks through a [`Session`]:
//!
//! 1. **Geometry**: edge distance symmetry and the box-to-box gap
//! 2. **Tick discipline**: orders never show up before the next frame
//! 3. **Identity**: one proxy per slot, across lookups and list walks
//! 4. **Build queue**: slot, empty and full stay consistent after a sync
//! 5. **Local state**: selection and visibility never touch the tables
//!
//! Run with: cargo test --test unit_proxy_test

use std::sync::Arc;

use tether::tables::{RecordLink, UnitRecord, UnitTable};
use tether::shared::{
    Command, CommandKind, OrderId, Position, UnitDimensions, UnitIndex, UnitType,
    BUILD_QUEUE_CAPACITY,
};
use tether::{Session, TetherConfig, UnitTypeEntry};

const CAPACITY: usize = 32;
const FACTORY: UnitType = UnitType(113);
const TANK: UnitType = UnitType(5);

fn session() -> Session {
    let config = TetherConfig {
        table_capacity: CAPACITY,
        command_capacity: 64,
        user_input: true,
        unit_types: vec![
            UnitTypeEntry {
                id: TANK.0,
                name: "Terran Siege Tank".into(),
                dimensions: UnitDimensions::square(32),
            },
            UnitTypeEntry {
                id: FACTORY.0,
                name: "Terran Factory".into(),
                dimensions: UnitDimensions::new(56, 40, 56, 40),
            },
        ],
    };
    Session::new(&config).unwrap()
}

fn unit(unit_type: UnitType, x: i16, y: i16) -> UnitRecord {
    UnitRecord {
        unit_type,
        hit_points: 150,
        max_hit_points: 150,
        position: Position::new(x, y),
        ..UnitRecord::empty()
    }
}

fn publish(session: &Session, records: &[(u16, UnitRecord)]) {
    let mut frame = UnitTable::new(CAPACITY);
    for (index, record) in records {
        frame.set(UnitIndex(*index), *record);
    }
    let head = records
        .first()
        .map_or(RecordLink::NULL, |(index, _)| RecordLink::to(UnitIndex(*index)));
    session.advance(frame, head).unwrap();
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_edge_distance_between_32px_boxes() {
    let session = session();
    publish(&session, &[(0, unit(TANK, 100, 100)), (1, unit(TANK, 200, 100))]);

    let a = session.registry().proxy(UnitIndex(0));
    let b = session.registry().proxy(UnitIndex(1));

    assert_eq!(a.distance(&b), 68);
    assert_eq!(a.center_distance(&b), 100);
}

#[test]
fn test_distance_symmetry() {
    let session = session();
    let placements = [
        (0, unit(TANK, 10, 10)),
        (1, unit(FACTORY, 300, 40)),
        (2, unit(TANK, -50, 220)),
        (3, unit(FACTORY, 90, 60)),
    ];
    publish(&session, &placements);

    for (i, _) in &placements {
        let a = session.registry().proxy(UnitIndex(*i));
        assert_eq!(a.distance(&a), 0);
        assert_eq!(a.distance_to(a.position()), 0);
        for (j, _) in &placements {
            let b = session.registry().proxy(UnitIndex(*j));
            assert_eq!(a.distance(&b), b.distance(&a));
            assert_eq!(a.center_distance(&b), b.center_distance(&a));
        }
    }
}

// ============================================================================
// TICK DISCIPLINE
// ============================================================================

#[test]
fn test_right_click_does_not_change_same_tick_reads() {
    let session = session();
    let mut tank = unit(TANK, 0, 0);
    tank.order_target = RecordLink::to(UnitIndex(2));
    publish(&session, &[(0, tank), (1, unit(TANK, 40, 0)), (2, unit(TANK, 80, 0))]);

    let tank = session.registry().proxy(UnitIndex(0));
    let enemy = session.registry().proxy(UnitIndex(1));
    let before = tank.order_target().unwrap();

    tank.order_right_click_unit(&enemy);

    let after = tank.order_target().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.index(), UnitIndex(2));
    assert_eq!(session.commands().pending_count(), 2);
}

#[test]
fn test_mirror_trails_by_one_tick() {
    let session = session();
    publish(&session, &[(0, unit(TANK, 0, 0))]);
    publish(&session, &[(0, unit(TANK, 16, 0))]);

    let tank = session.registry().proxy(UnitIndex(0));
    assert_eq!(tank.position(), Position::new(16, 0));
    assert_eq!(tank.mirror_raw_data().position, Position::new(0, 0));
    assert_eq!(tank.raw_data_local().position, Position::new(16, 0));
}

#[test]
fn test_orders_arrive_in_issue_order() {
    let session = session();
    publish(&session, &[(0, unit(FACTORY, 0, 0))]);
    let factory = session.registry().proxy(UnitIndex(0));

    factory.order_right_click(Position::new(10, 10));
    factory.train_unit(TANK);
    factory.order_attack_location(Position::new(5, 5), OrderId::ATTACK_MOVE);

    let kinds: Vec<_> = session.commands().drain().iter().map(Command::kind).collect();
    assert_eq!(
        kinds,
        vec![
            CommandKind::Select,
            CommandKind::RightClickPosition,
            CommandKind::Select,
            CommandKind::Train,
            CommandKind::Select,
            CommandKind::AttackLocation,
        ]
    );
}

// ============================================================================
// IDENTITY
// ============================================================================

#[test]
fn test_registry_returns_same_proxy() {
    let session = session();
    let registry = session.registry();
    let handle = RecordLink::to(UnitIndex(7));

    let first = registry.resolve(handle);
    let second = registry.resolve(handle);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &registry.proxy(UnitIndex(7))));
}

#[test]
fn test_proxy_survives_death() {
    let session = session();
    publish(&session, &[(4, unit(TANK, 0, 0))]);
    let tank = session.registry().proxy(UnitIndex(4));
    assert!(tank.is_valid());

    publish(&session, &[]);
    assert!(!tank.is_valid());
    assert!(!tank.is_ready());
    assert!(Arc::ptr_eq(&tank, &session.registry().proxy(UnitIndex(4))));
}

#[test]
fn test_unit_list_walk_matches_next() {
    let session = session();
    let mut a = unit(TANK, 0, 0);
    a.next = RecordLink::to(UnitIndex(9));
    let mut b = unit(TANK, 0, 0);
    b.next = RecordLink::to(UnitIndex(2));
    publish(&session, &[(5, a), (9, b), (2, unit(FACTORY, 0, 0))]);

    let walked: Vec<_> = session.registry().iter_units().collect();
    assert_eq!(walked.len(), 3);
    for pair in walked.windows(2) {
        assert!(Arc::ptr_eq(&pair[0].next().unwrap(), &pair[1]));
    }
    assert!(walked[2].next().is_none());
}

// ============================================================================
// BUILD QUEUE
// ============================================================================

#[test]
fn test_queue_with_two_items() {
    let session = session();
    let mut factory = unit(FACTORY, 0, 0);
    factory.build_queue[0] = TANK;
    factory.build_queue[1] = TANK;
    publish(&session, &[(0, factory)]);

    let factory = session.registry().proxy(UnitIndex(0));
    assert_eq!(factory.build_queue_slot(), 2);
    assert!(!factory.has_empty_build_queue());
    assert!(!factory.has_full_build_queue());
}

#[test]
fn test_queue_flags_follow_slot() {
    let session = session();
    let factory = session.registry().proxy(UnitIndex(0));

    for queued in 0..=BUILD_QUEUE_CAPACITY {
        let mut record = unit(FACTORY, 0, 0);
        for entry in record.build_queue.iter_mut().take(queued) {
            *entry = TANK;
        }
        publish(&session, &[(0, record)]);

        let state = factory.sync_build_queue();
        assert_eq!(state.empty, state.slot == 0);
        assert_eq!(state.full, usize::from(state.slot) == BUILD_QUEUE_CAPACITY);

        let slot = factory.build_queue_slot();
        assert_eq!(usize::from(slot), queued);
        assert_eq!(factory.has_empty_build_queue(), slot == 0);
        assert_eq!(factory.has_full_build_queue(), usize::from(slot) == BUILD_QUEUE_CAPACITY);
        assert_eq!(factory.build_queue().len(), queued);
    }
}

// ============================================================================
// LOCAL STATE
// ============================================================================

#[test]
fn test_selection_does_not_touch_tables() {
    let session = session();
    publish(&session, &[(0, unit(TANK, 30, 30))]);
    let tank = session.registry().proxy(UnitIndex(0));
    let raw = tank.raw_data_local();
    let mirror = tank.mirror_raw_data();

    tank.set_selected(true);
    tank.set_visible(true);

    assert!(tank.is_selected());
    assert!(tank.is_visible());
    assert_eq!(tank.raw_data_local(), raw);
    assert_eq!(tank.mirror_raw_data(), mirror);
    assert!(!session.commands().has_commands());

    session.input().set_user_input(false);
    assert!(!tank.is_selected());
}

#[test]
fn test_dead_unit_production_is_dropped() {
    let session = session();
    let ghost = session.registry().proxy(UnitIndex(12));
    ghost.train_unit(TANK);
    assert!(!session.commands().has_commands());

    // Forwarded regardless; the host decides
    ghost.order_right_click(Position::new(1, 1));
    assert_eq!(session.commands().pending_count(), 2);
}
