//! Unit tests for wh-grid.

#[cfg(test)]
mod tile {
    use wh_core::AgentId;

    use crate::Tile;

    #[test]
    fn static_codes() {
        assert_eq!(Tile::Empty.code(), 0);
        assert_eq!(Tile::Wall.code(), 1);
        assert_eq!(Tile::Box.code(), 2);
    }

    #[test]
    fn agent_codes_carry_sign() {
        let idle = Tile::idle(AgentId(3));
        assert_eq!(idle.code(), 7);
        assert_eq!(idle.with_carrying(true).code(), -7);
    }

    #[test]
    fn agent_id_recoverable_from_code() {
        for id in [0u32, 1, 17] {
            for carrying in [false, true] {
                let tile = Tile::Agent { id: AgentId(id), carrying };
                assert_eq!(Tile::from_code(tile.code()), Some(tile));
            }
        }
    }

    #[test]
    fn unused_codes_decode_to_none() {
        assert_eq!(Tile::from_code(3), None);
        assert_eq!(Tile::from_code(-1), None);
        assert_eq!(Tile::from_code(-3), None);
    }

    #[test]
    fn with_carrying_ignores_non_agents() {
        assert_eq!(Tile::Box.with_carrying(true), Tile::Box);
        assert_eq!(Tile::Empty.agent(), None);
    }
}

#[cfg(test)]
mod grid {
    use wh_core::{AgentId, Cell};

    use crate::{Grid, GridError, Tile};

    #[test]
    fn border_is_wall() {
        let g = Grid::new(4, 6).unwrap();
        for (cell, tile) in g.iter() {
            assert_eq!(tile.is_wall(), g.is_border(cell), "at {cell}");
        }
        assert_eq!(g.count(Tile::is_wall), 2 * 6 + 2 * 2);
    }

    #[test]
    fn too_small_rejected() {
        assert_eq!(
            Grid::new(2, 5).unwrap_err(),
            GridError::TooSmall { height: 2, width: 5 }
        );
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let g = Grid::new(3, 3).unwrap();
        for cell in [Cell::new(-1, 0), Cell::new(0, 3), Cell::new(3, 1), Cell::new(1, -1)] {
            assert!(matches!(g.get(cell), Err(GridError::OutOfBounds { .. })));
        }
    }

    #[test]
    fn set_refuses_walls() {
        let mut g = Grid::new(3, 3).unwrap();
        assert_eq!(
            g.set(Cell::new(0, 0), Tile::Empty),
            Err(GridError::WallOverwrite(Cell::new(0, 0)))
        );
        assert_eq!(
            g.set(Cell::new(1, 1), Tile::Wall),
            Err(GridError::WallOverwrite(Cell::new(1, 1)))
        );
    }

    #[test]
    fn index_roundtrip() {
        let g = Grid::new(5, 7).unwrap();
        let c = Cell::new(3, 4);
        let i = g.index(c).unwrap();
        assert_eq!(i, 3 * 7 + 4);
        assert_eq!(g.cell_of(i), c);
    }

    #[test]
    fn clone_is_deep() {
        let mut a = Grid::new(4, 4).unwrap();
        let b = a.clone();
        a.set(Cell::new(1, 1), Tile::idle(AgentId(0))).unwrap();
        assert_eq!(b.get(Cell::new(1, 1)).unwrap(), Tile::Empty);
        assert_ne!(a, b);
    }

    #[test]
    fn codes_are_row_major() {
        let mut g = Grid::new(3, 4).unwrap();
        g.set(Cell::new(1, 2), Tile::Box).unwrap();
        let codes = g.codes();
        assert_eq!(codes.len(), 12);
        assert_eq!(codes[4 + 2], 2);
        assert_eq!(codes[4 + 1], 0);
        assert_eq!(codes[0], 1);
    }
}

#[cfg(test)]
mod layout {
    use wh_core::{AgentId, Cell};

    use crate::{ArenaSpec, GridError, LayoutBuilder, Tile};

    #[test]
    fn arena_dimension_formula() {
        let spec = ArenaSpec { wall_offset: 1, box_offset: 1, box_grid_size: 2, agent_count: 2 };
        assert_eq!(spec.dim(), 9);
        let spec = ArenaSpec { wall_offset: 2, box_offset: 3, box_grid_size: 3, agent_count: 0 };
        assert_eq!(spec.dim(), 2 + 4 + 6 + 6);
    }

    #[test]
    fn arena_places_boxes_and_agents() {
        let spec = ArenaSpec { wall_offset: 1, box_offset: 1, box_grid_size: 2, agent_count: 3 };
        let arena = spec.build().unwrap();
        let g = &arena.grid;

        assert_eq!(g.count(Tile::is_box), 16);
        for cell in [Cell::new(2, 2), Cell::new(3, 3), Cell::new(5, 5), Cell::new(6, 6)] {
            assert_eq!(g.get(cell).unwrap(), Tile::Box, "at {cell}");
        }
        assert_eq!(g.get(Cell::new(4, 4)).unwrap(), Tile::Empty);

        assert_eq!(arena.agents, vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3)]);
        for (i, &cell) in arena.agents.iter().enumerate() {
            assert_eq!(g.get(cell).unwrap(), Tile::idle(AgentId(i as u32)));
        }
    }

    #[test]
    fn zero_wall_offset_has_no_agent_row() {
        let spec = ArenaSpec { wall_offset: 0, box_offset: 0, box_grid_size: 1, agent_count: 1 };
        assert_eq!(spec.build().unwrap_err(), GridError::NoAgentRow);
    }

    #[test]
    fn too_many_agents_rejected() {
        let spec = ArenaSpec { wall_offset: 1, box_offset: 0, box_grid_size: 1, agent_count: 5 };
        assert_eq!(
            spec.build().unwrap_err(),
            GridError::TooManyAgents { requested: 5, capacity: 4 }
        );
    }

    #[test]
    fn builder_assigns_ids_in_order() {
        let arena = LayoutBuilder::new(4, 5)
            .agent(Cell::new(2, 3))
            .agent(Cell::new(1, 1))
            .boxed(Cell::new(2, 2))
            .wall(Cell::new(1, 3))
            .build()
            .unwrap();
        assert_eq!(arena.grid.get(Cell::new(2, 3)).unwrap().agent(), Some(AgentId(0)));
        assert_eq!(arena.grid.get(Cell::new(1, 1)).unwrap().agent(), Some(AgentId(1)));
        assert!(arena.grid.get(Cell::new(1, 3)).unwrap().is_wall());
    }

    #[test]
    fn builder_rejects_overlap_and_border() {
        let overlap = LayoutBuilder::new(4, 4)
            .boxed(Cell::new(1, 1))
            .agent(Cell::new(1, 1))
            .build();
        assert_eq!(overlap.unwrap_err(), GridError::Occupied(Cell::new(1, 1)));

        let on_border = LayoutBuilder::new(4, 4).agent(Cell::new(0, 2)).build();
        assert_eq!(on_border.unwrap_err(), GridError::Occupied(Cell::new(0, 2)));

        let outside = LayoutBuilder::new(4, 4).boxed(Cell::new(9, 9)).build();
        assert!(matches!(outside, Err(GridError::OutOfBounds { .. })));
    }
}

#[cfg(test)]
mod render {
    use wh_core::{AgentId, Cell};

    use crate::{LayoutBuilder, Tile, render};

    #[test]
    fn glyphs() {
        let mut arena = LayoutBuilder::new(3, 6)
            .agent(Cell::new(1, 1))
            .agent(Cell::new(1, 2))
            .boxed(Cell::new(1, 3))
            .build()
            .unwrap();
        arena
            .grid
            .set(Cell::new(1, 2), Tile::Agent { id: AgentId(1), carrying: true })
            .unwrap();

        let text = render(&arena.grid, &[Cell::new(1, 4)], false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  X  X  X  X  X  X");
        assert_eq!(lines[1], "  X  0 1*  #  D  X");
    }

    #[test]
    fn redraw_prefix_only_when_requested() {
        let arena = LayoutBuilder::new(3, 3).build().unwrap();
        assert!(render(&arena.grid, &[], true).starts_with("\x1b[2J"));
        assert!(!render(&arena.grid, &[], false).starts_with('\x1b'));
        assert_eq!(arena.grid.to_string(), render(&arena.grid, &[], false));
    }
}
