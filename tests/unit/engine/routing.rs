//! Tests for the tile contract: connectivity, acceptance, accept, release and dispose

#[cfg(test)]
mod tests {
    use marbletrack::io::error::ErrorKind;
    use marbletrack::tiles::{Nexus, NexusContext, SpawningNexus};
    use marbletrack::{
        Direction, Grid, ListenerId, Marble, MarbleType, Orientation, Position, Receptor,
        TileEvent, Track,
    };

    const WATCHER: ListenerId = ListenerId(1);

    fn blue() -> Marble {
        Marble::new(MarbleType::Blue)
    }

    fn horizontal() -> Track {
        Track::straight(Orientation::Horizontal)
    }

    fn vertical() -> Track {
        Track::straight(Orientation::Vertical)
    }

    // Receptor, horizontal track, receptor
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 1).expect("valid dimensions");
        grid.place(0, 0, Receptor::new()).expect("placed");
        grid.place(1, 0, horizontal()).expect("placed");
        grid.place(2, 0, Receptor::new()).expect("placed");
        grid
    }

    // Nexus, nexus, spawner on row 0 with vertical tracks below
    fn chain() -> Grid {
        let mut grid = Grid::new(3, 2).expect("valid dimensions");
        let context = grid.add_nexus_context(
            NexusContext::new([MarbleType::Pink, MarbleType::Green], 0.0, 5)
                .expect("valid context"),
        );
        grid.place(0, 0, Nexus::new(context)).expect("placed");
        grid.place(1, 0, Nexus::new(context)).expect("placed");
        grid.place(2, 0, SpawningNexus::new(context, Direction::Right))
            .expect("placed");
        for x in 0..3 {
            grid.place(x, 1, vertical()).expect("placed");
        }
        grid
    }

    fn occupied(grid: &Grid) -> bool {
        grid.tiles()
            .find_map(|tile| tile.tileable().nexus_context())
            .and_then(|context| grid.nexus_context(context))
            .is_some_and(NexusContext::is_occupied)
    }

    // Tests connectivity needs matching ports on both sides
    // Verified by skipping the neighbour's inverse check
    #[test]
    fn test_is_connected() {
        let mut grid = Grid::new(3, 1).expect("valid dimensions");
        grid.place(0, 0, horizontal()).expect("placed");
        grid.place(1, 0, horizontal()).expect("placed");
        grid.place(2, 0, vertical()).expect("placed");

        assert!(grid.is_connected(0, 0, Direction::Right).expect("on grid"));
        assert!(grid.is_connected(1, 0, Direction::Left).expect("on grid"));
        assert!(!grid.is_connected(1, 0, Direction::Right).expect("on grid"));
        assert!(!grid.is_connected(0, 0, Direction::Left).expect("on grid"));
        assert!(!grid.is_connected(0, 0, Direction::Top).expect("on grid"));
    }

    // Tests horizontal tracks refuse vertical entries and accept horizontal ones once each
    // Verified by letting accept skip the port check
    #[test]
    fn test_horizontal_track_accept() {
        let mut grid = Grid::new(1, 1).expect("valid dimensions");
        grid.place(0, 0, horizontal()).expect("placed");
        grid.add_listener(0, 0, WATCHER).expect("registered");

        for direction in [Direction::Top, Direction::Bottom] {
            assert!(!grid.accepts(0, 0, direction, &blue()).expect("on grid"));
            let result = grid.accept(0, 0, direction, blue()).map_err(|e| e.kind());
            assert_eq!(result, Err(ErrorKind::InvalidArgument));
        }
        assert_eq!(grid.pending_notifications(), 0);

        for direction in [Direction::Left, Direction::Right] {
            grid.accept(0, 0, direction, blue()).expect("accepted");
            let events = grid.drain_for(WATCHER);
            assert_eq!(
                events,
                vec![TileEvent::BallAccepted {
                    position: Position::new(0, 0),
                    direction,
                    marble: blue(),
                }]
            );
        }
    }

    // Tests empty tiles take nothing
    #[test]
    fn test_empty_tile_refuses() {
        let mut grid = Grid::new(1, 1).expect("valid dimensions");
        assert!(!grid.accepts(0, 0, Direction::Left, &blue()).expect("on grid"));
        let result = grid.accept(0, 0, Direction::Left, blue()).map_err(|e| e.kind());
        assert_eq!(result, Err(ErrorKind::InvalidArgument));
    }

    // Tests the engine never moves a marble on its own
    // Verified by forwarding accepted marbles in accept
    #[test]
    fn test_corridor_requires_explicit_releases() {
        let mut grid = corridor();
        grid.accept(0, 0, Direction::Left, blue()).expect("accepted");

        let first = grid.get(0, 0).expect("on grid").tileable().as_receptor();
        assert_eq!(first.and_then(|r| r.slot(Direction::Left)), Some(&blue()));
        let second = grid.get(2, 0).expect("on grid").tileable().as_receptor();
        assert!(second.is_some_and(|r| r.slots().iter().all(Option::is_none)));

        grid.rotate_receptor(0, 0, 2).expect("rotated");
        let released = grid.release_slot(0, 0, Direction::Right).expect("released");
        assert_eq!(released, blue());
        grid.release(1, 0, Direction::Right, blue()).expect("released");

        let second = grid.get(2, 0).expect("on grid").tileable().as_receptor();
        assert_eq!(second.and_then(|r| r.slot(Direction::Left)), Some(&blue()));
        let first = grid.get(0, 0).expect("on grid").tileable().as_receptor();
        assert!(first.is_some_and(|r| r.slots().iter().all(Option::is_none)));
    }

    // Tests release fails when the neighbour cannot take the marble
    #[test]
    fn test_release_requires_connection() {
        let mut grid = corridor();
        let off_edge = grid.release(2, 0, Direction::Right, blue()).map_err(|e| e.kind());
        assert_eq!(off_edge, Err(ErrorKind::IllegalState));

        let wrong_side = grid.release(1, 0, Direction::Top, blue()).map_err(|e| e.kind());
        assert_eq!(wrong_side, Err(ErrorKind::IllegalState));

        grid.accept(2, 0, Direction::Left, blue()).expect("accepted");
        assert!(!grid.is_releasable(1, 0, Direction::Right, &blue()).expect("on grid"));
        let full_slot = grid.release(1, 0, Direction::Right, blue()).map_err(|e| e.kind());
        assert_eq!(full_slot, Err(ErrorKind::IllegalState));
    }

    // Tests the receiving tile reports before the releasing tile
    // Verified by emitting BallReleased before forwarding
    #[test]
    fn test_release_notification_order() {
        let mut grid = corridor();
        grid.add_listener(1, 0, WATCHER).expect("registered");
        grid.add_listener(2, 0, WATCHER).expect("registered");

        grid.release(1, 0, Direction::Right, blue()).expect("released");
        let positions: Vec<Position> = grid
            .drain_notifications()
            .iter()
            .map(|n| n.event.position())
            .collect();
        assert_eq!(positions, vec![Position::new(2, 0), Position::new(1, 0)]);
    }

    // Tests releasing a receptor marble checks the slot contents
    #[test]
    fn test_receptor_release_checks_slot() {
        let mut grid = corridor();
        let empty = grid.release(2, 0, Direction::Left, blue()).map_err(|e| e.kind());
        assert_eq!(empty, Err(ErrorKind::IllegalState));

        grid.accept(2, 0, Direction::Left, blue()).expect("accepted");
        let wrong = grid
            .release(2, 0, Direction::Left, Marble::new(MarbleType::Pink))
            .map_err(|e| e.kind());
        assert_eq!(wrong, Err(ErrorKind::InvalidArgument));

        grid.release(2, 0, Direction::Left, blue()).expect("released");
        let receptor = grid.get(2, 0).expect("on grid").tileable().as_receptor();
        assert!(receptor.is_some_and(|r| r.slot(Direction::Left).is_none()));
    }

    // Tests a full matching set marks once, scores once and empties the receptor
    // Verified by resetting the marked flag on every completion
    #[test]
    fn test_mark_scores_once() {
        let mut grid = Grid::new(3, 3).expect("valid dimensions");
        grid.place(1, 1, Receptor::new()).expect("placed");
        grid.attach_progress();
        grid.add_listener(1, 1, WATCHER).expect("registered");

        for direction in Direction::ALL {
            grid.accept(1, 1, direction, blue()).expect("accepted");
        }
        let events = grid.drain_for(WATCHER);
        let marks = events
            .iter()
            .filter(|e| matches!(e, TileEvent::ReceptorMarked { .. }))
            .count();
        let disposed = events
            .iter()
            .filter(|e| matches!(e, TileEvent::BallDisposed { .. }))
            .count();
        assert_eq!((marks, disposed), (1, 4));
        assert!(matches!(events.last(), Some(TileEvent::ReceptorMarked { .. })));
        assert_eq!(grid.progress().map(|p| p.score()), Some(100));
        assert!(grid.progress().is_some_and(|p| p.is_won()));

        let green = Marble::new(MarbleType::Green);
        for direction in Direction::ALL {
            grid.accept(1, 1, direction, green).expect("accepted");
        }
        let events = grid.drain_for(WATCHER);
        assert!(!events.iter().any(|e| matches!(e, TileEvent::ReceptorMarked { .. })));
        assert_eq!(grid.progress().map(|p| p.score()), Some(100));

        let receptor = grid.get(1, 1).expect("on grid").tileable().as_receptor();
        assert!(receptor.is_some_and(|r| r.is_marked()));
        assert!(receptor.is_some_and(|r| r.slots().iter().all(Option::is_none)));
    }

    // Tests disposal removes the marble from a receptor slot and notifies
    #[test]
    fn test_inform_dispose_clears_receptor_slot() {
        let mut grid = corridor();
        grid.accept(0, 0, Direction::Left, blue()).expect("accepted");
        grid.add_listener(0, 0, WATCHER).expect("registered");

        grid.inform_dispose(0, 0, Direction::Left, blue()).expect("disposed");
        let receptor = grid.get(0, 0).expect("on grid").tileable().as_receptor();
        assert!(receptor.is_some_and(|r| r.slot(Direction::Left).is_none()));
        assert!(matches!(
            grid.drain_for(WATCHER).as_slice(),
            [TileEvent::BallDisposed { .. }]
        ));
    }

    // Tests locked receptors refuse accept and release
    #[test]
    fn test_locked_receptor() {
        let mut grid = corridor();
        grid.accept(0, 0, Direction::Right, blue()).expect("accepted");
        grid.lock_receptor(0, 0).expect("locked");

        assert!(!grid.accepts(0, 0, Direction::Left, &blue()).expect("on grid"));
        let accept = grid.accept(0, 0, Direction::Left, blue()).map_err(|e| e.kind());
        assert_eq!(accept, Err(ErrorKind::IllegalState));
        let release = grid.release_slot(0, 0, Direction::Right).map_err(|e| e.kind());
        assert_eq!(release, Err(ErrorKind::IllegalState));

        grid.unlock_receptor(0, 0).expect("unlocked");
        assert!(grid.release_slot(0, 0, Direction::Right).is_ok());
    }

    // Tests the chain token stays taken along the chain and frees on leaving it
    // Verified by clearing occupancy on every release
    #[test]
    fn test_nexus_chain_occupancy() {
        let mut grid = chain();
        let marble = grid.spawn(2, 0).expect("spawner").expect("chain free");
        assert!(occupied(&grid));

        grid.release(2, 0, Direction::Left, marble).expect("moved along chain");
        assert!(occupied(&grid));
        grid.release(1, 0, Direction::Bottom, marble).expect("dropped");
        assert!(!occupied(&grid));

        let next = grid.spawn(2, 0).expect("spawner").expect("chain free");
        assert_eq!(next.marble_type(), MarbleType::Green);
        assert!(!grid.is_releasable(1, 1, Direction::Top, &marble).expect("on grid"));
        let blocked = grid.release(1, 1, Direction::Top, marble).map_err(|e| e.kind());
        assert_eq!(blocked, Err(ErrorKind::IllegalState));

        grid.inform_dispose(2, 0, Direction::Right, next).expect("disposed");
        assert!(!occupied(&grid));
        grid.release(1, 1, Direction::Top, marble).expect("returned to chain");
        assert!(occupied(&grid));
    }

    // Tests a nexus only has ports along the chain and downwards
    #[test]
    fn test_nexus_ports() {
        let grid = chain();
        assert!(!grid.is_connected(1, 0, Direction::Top).expect("on grid"));
        assert!(grid.is_connected(1, 0, Direction::Left).expect("on grid"));
        assert!(grid.is_connected(1, 0, Direction::Bottom).expect("on grid"));
        assert!(!grid.is_connected(0, 0, Direction::Left).expect("on grid"));
    }

    // Tests coordinates off the grid fail on every contract call
    #[test]
    fn test_contract_out_of_bounds() {
        let mut grid = corridor();
        assert_eq!(
            grid.is_connected(3, 0, Direction::Left).map_err(|e| e.kind()),
            Err(ErrorKind::OutOfBounds)
        );
        assert_eq!(
            grid.accept(0, -1, Direction::Left, blue()).map_err(|e| e.kind()),
            Err(ErrorKind::OutOfBounds)
        );
        assert_eq!(
            grid.release(-1, 0, Direction::Left, blue()).map_err(|e| e.kind()),
            Err(ErrorKind::OutOfBounds)
        );
    }
}
