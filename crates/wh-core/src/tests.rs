//! Unit tests for wh-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod cell {
    use crate::{Action, Cell};

    #[test]
    fn step_offsets() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Action::Stand), c);
        assert_eq!(c.step(Action::Up), Cell::new(2, 3));
        assert_eq!(c.step(Action::Down), Cell::new(4, 3));
        assert_eq!(c.step(Action::Left), Cell::new(3, 2));
        assert_eq!(c.step(Action::Right), Cell::new(3, 4));
    }

    #[test]
    fn step_off_the_top_is_representable() {
        assert_eq!(Cell::new(0, 0).step(Action::Up), Cell::new(-1, 0));
    }

    #[test]
    fn action_codes() {
        for (code, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code() as usize, code);
            assert_eq!(Action::try_from(code as u8).unwrap(), *action);
        }
        assert!(Action::try_from(5).is_err());
    }

    #[test]
    fn manhattan() {
        assert_eq!(Cell::new(1, 1).manhattan(Cell::new(4, 3)), 5);
        assert_eq!(Cell::new(4, 3).manhattan(Cell::new(1, 1)), 5);
        assert!(Action::MOVES.iter().all(|a| Cell::new(2, 2).step(*a).manhattan(Cell::new(2, 2)) == 1));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn ticks_advance_by_one() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick(10).next(), Tick(11));
        assert_eq!(Tick(3).to_string(), "T3");
    }
}

#[cfg(test)]
mod cost {
    use crate::{CostModel, Tick};

    #[test]
    fn defaults_follow_sign_convention() {
        let c = CostModel::default();
        assert!(c.step > 0.0);
        assert!(c.pickup <= 0.0);
        assert!(c.drop_off < c.pickup);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn discount_is_closed_form() {
        let c = CostModel::default();
        assert_eq!(c.discount_at(Tick(0)), 1.0);
        let ratio = c.collision_at(Tick(7)) / c.collision_at(Tick(0));
        assert!((ratio - 0.99f64.powi(7)).abs() < 1e-12);
    }

    #[test]
    fn discount_has_no_ceiling() {
        let c = CostModel::default();
        let late = c.collision_at(Tick(100_000));
        assert!(late >= 0.0 && late.is_finite());
    }

    #[test]
    fn positive_pickup_rejected() {
        let c = CostModel { pickup: 100.0, ..CostModel::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn discount_out_of_range_rejected() {
        let c = CostModel { discount: 1.5, ..CostModel::default() };
        assert!(c.validate().is_err());
        let c = CostModel { discount: 0.0, ..CostModel::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::rng::mix_seed;
    use crate::{AgentId, AgentRng, SimRng};

    fn picks(rng: &mut AgentRng) -> Vec<u32> {
        let options: Vec<u32> = (0..1000).collect();
        (0..20).map(|_| *rng.choose(&options).unwrap()).collect()
    }

    #[test]
    fn same_seed_same_stream() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        assert_eq!(picks(&mut r1), picks(&mut r2));
    }

    #[test]
    fn agents_get_distinct_streams() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        assert_ne!(picks(&mut r0), picks(&mut r1));
    }

    #[test]
    fn index_zero_keeps_the_seed() {
        assert_eq!(mix_seed(77, 0), 77);
        assert_ne!(mix_seed(77, 1), mix_seed(77, 2));
    }

    #[test]
    fn choose_from_nothing_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(-3.0));
        assert!(rng.gen_bool(7.0));
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut rng = SimRng::new(5);
        assert!((0..200).all(|_| rng.gen_range(0..3usize) < 3));
    }
}
