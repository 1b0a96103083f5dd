//! Tests for the tile arena, coordinate checks, neighbours and listeners

#[cfg(test)]
mod tests {
    use marbletrack::io::error::ErrorKind;
    use marbletrack::tiles::{Nexus, NexusContext, NexusId};
    use marbletrack::{
        Direction, Grid, ListenerId, MarbleType, Orientation, Position, Receptor, Tileable, Track,
    };

    // Tests a new grid is filled with empty tiles that know their coordinates
    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2).expect("valid dimensions");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tiles().count(), 6);
        for tile in grid.tiles() {
            assert_eq!(*tile.tileable(), Tileable::Empty);
            assert!(!tile.is_occupied());
        }
        let tile = grid.get(2, 1).expect("on grid");
        assert_eq!(tile.position(), Position::new(2, 1));
    }

    // Tests non-positive dimensions are rejected
    // Verified by accepting zero width
    #[test]
    fn test_new_grid_rejects_bad_dimensions() {
        for (w, h) in [(0, 3), (3, 0), (-1, 2)] {
            let result = Grid::new(w, h).map(|_| ()).map_err(|e| e.kind());
            assert_eq!(result, Err(ErrorKind::InvalidArgument), "{w}x{h}");
        }
    }

    // Tests bounds checking on every coordinate edge
    #[test]
    fn test_out_of_bounds_coordinates() {
        let grid = Grid::new(2, 2).expect("valid dimensions");
        assert!(grid.on_grid(0, 0));
        assert!(grid.on_grid(1, 1));
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
            assert!(!grid.on_grid(x, y));
            let kind = grid.get(x, y).map(|_| ()).map_err(|e| e.kind());
            assert_eq!(kind, Err(ErrorKind::OutOfBounds));
        }
    }

    // Tests neighbours follow the direction offsets and stop at the edge
    // Verified by swapping the TOP and BOTTOM offsets
    #[test]
    fn test_neighbors() {
        let grid = Grid::new(3, 3).expect("valid dimensions");
        let centre = Position::new(1, 1);
        assert_eq!(grid.neighbor_position(centre, Direction::Top), Some(Position::new(1, 0)));
        assert_eq!(grid.neighbor_position(centre, Direction::Right), Some(Position::new(2, 1)));
        assert_eq!(grid.neighbor_position(centre, Direction::Bottom), Some(Position::new(1, 2)));
        assert_eq!(grid.neighbor_position(centre, Direction::Left), Some(Position::new(0, 1)));

        let corner = Position::new(0, 0);
        assert!(grid.neighbor(corner, Direction::Top).is_none());
        assert!(grid.neighbor(corner, Direction::Left).is_none());
        assert!(grid.neighbor(Position::new(2, 2), Direction::Right).is_none());
        assert!(grid.neighbor(Position::new(2, 2), Direction::Bottom).is_none());
    }

    // Tests placing replaces the behaviour and drops old listener registrations
    #[test]
    fn test_place_replaces_and_clears_listeners() {
        let mut grid = Grid::new(2, 1).expect("valid dimensions");
        grid.place(0, 0, Track::straight(Orientation::Horizontal))
            .expect("placed");
        grid.add_listener(0, 0, ListenerId(1)).expect("registered");
        assert_eq!(grid.listeners(0, 0).expect("on grid"), &[ListenerId(1)]);

        grid.place(0, 0, Receptor::new()).expect("placed");
        assert!(grid.get(0, 0).expect("on grid").tileable().as_receptor().is_some());
        assert!(grid.listeners(0, 0).expect("on grid").is_empty());
        assert_eq!(grid.receptor_positions(), vec![Position::new(0, 0)]);
    }

    // Tests placement off the grid or with an unknown chain context fails
    #[test]
    fn test_place_validation() {
        let mut grid = Grid::new(2, 1).expect("valid dimensions");
        let off = grid.place(5, 0, Receptor::new()).map_err(|e| e.kind());
        assert_eq!(off, Err(ErrorKind::OutOfBounds));

        let unknown = grid.place(0, 0, Nexus::new(NexusId(3))).map_err(|e| e.kind());
        assert_eq!(unknown, Err(ErrorKind::InvalidArgument));

        let context = grid.add_nexus_context(NexusContext::new([MarbleType::Pink], 0.0, 1).expect("valid context"));
        assert!(grid.place(0, 0, Nexus::new(context)).is_ok());
        assert!(grid.nexus_context(context).is_some());
    }

    // Tests duplicate listeners are kept and removal takes one registration at a time
    // Verified by using retain in remove_listener
    #[test]
    fn test_listener_registration() {
        let mut grid = Grid::new(1, 1).expect("valid dimensions");
        grid.add_listener(0, 0, ListenerId(7)).expect("registered");
        grid.add_listener(0, 0, ListenerId(7)).expect("registered");
        grid.add_listener(0, 0, ListenerId(8)).expect("registered");

        assert!(grid.remove_listener(0, 0, ListenerId(7)).expect("on grid"));
        assert_eq!(grid.listeners(0, 0).expect("on grid"), &[ListenerId(7), ListenerId(8)]);
        assert!(!grid.remove_listener(0, 0, ListenerId(9)).expect("on grid"));
    }

    // Tests progress is absent until attached and tracks receptors present at that time
    #[test]
    fn test_attach_progress() {
        let mut grid = Grid::new(2, 1).expect("valid dimensions");
        assert!(grid.progress().is_none());
        grid.place(1, 0, Receptor::new()).expect("placed");
        grid.attach_progress();

        let progress = grid.progress().expect("attached");
        assert_eq!(progress.tracked(), 1);
        assert_eq!(progress.score(), 0);

        if let Some(progress) = grid.progress_mut() {
            progress.set_score(250);
        }
        assert_eq!(grid.progress().map(|p| p.score()), Some(250));
    }

    // Tests position display
    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 4).to_string(), "(3, 4)");
    }
}
