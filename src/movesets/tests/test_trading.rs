#[cfg(test)]
mod tests {
    use crate::movesets::tests::common::{action_kinds, actions, cheapest_path, request, DexBuilder};
    use crate::movesets::Action;
    use crate::pokedex::Pokedex;
    use ordered_float::OrderedFloat;
    use pretty_assertions::assert_eq;
    use schema::{LearnMethod, VersionGroupId};

    // Aipom is in every game; Psych Up is only a machine in Diamond/Pearl (8).
    fn aipom_dex() -> Pokedex {
        DexBuilder::new()
            .version_group(5, 3)
            .version_group(8, 4)
            .version_group(11, 5)
            .egg_group(5, "field")
            .move_(10, "scratch", 1)
            .move_(244, "psych-up", 2)
            .species(190, "aipom", 190, None, &[5])
            .learn(190, 10, 5, LearnMethod::LevelUp, 1)
            .learn(190, 10, 8, LearnMethod::LevelUp, 1)
            .learn(190, 10, 11, LearnMethod::LevelUp, 1)
            .learn(190, 244, 8, LearnMethod::Machine, 0)
            .build()
    }

    #[test]
    fn test_learn_elsewhere_and_transfer_forward() {
        let dex = aipom_dex();
        let path = cheapest_path(&dex, &request(190, 11, &[244])).expect("moveset is legal");

        assert_eq!(action_kinds(&path), vec!["start", "learn", "trade", "grow"]);
        // A single-use machine, then trade plus transfer.
        assert_eq!(path.cost(), OrderedFloat(2000.0 + 400.0));
        assert_eq!(
            actions(&path)[2],
            &Action::Trade {
                from: VersionGroupId(8),
                to: VersionGroupId(11),
            }
        );
    }

    #[test]
    fn test_excluded_release_is_never_visited() {
        let dex = aipom_dex();
        let request = request(190, 11, &[244]).excluding_version_group(VersionGroupId(8));
        assert_eq!(cheapest_path(&dex, &request), None);
    }

    #[test]
    fn test_no_trading_backwards() {
        let dex = aipom_dex();
        assert_eq!(cheapest_path(&dex, &request(190, 5, &[244])), None);
    }

    // Gold/Silver (3) trades with Red/Blue (1), but only things Red/Blue knows about.
    fn time_capsule_dex() -> Pokedex {
        DexBuilder::new()
            .version_group(1, 1)
            .version_group(3, 2)
            .egg_group(1, "monster")
            .move_(33, "tackle", 1)
            .move_(34, "body-slam", 1)
            .move_(174, "curse", 2)
            .species(143, "snorlax", 143, None, &[1])
            .learn(143, 33, 1, LearnMethod::LevelUp, 1)
            .learn(143, 33, 3, LearnMethod::LevelUp, 1)
            .learn(143, 34, 3, LearnMethod::Machine, 0)
            .learn(143, 174, 3, LearnMethod::Machine, 0)
            .build()
    }

    #[test]
    fn test_trade_back_to_generation_one() {
        let dex = time_capsule_dex();
        let path = cheapest_path(&dex, &request(143, 1, &[34])).expect("moveset is legal");
        assert_eq!(action_kinds(&path), vec!["start", "learn", "trade", "grow"]);
        // No transfer cost between generations 1 and 2.
        assert_eq!(path.cost(), OrderedFloat(2000.0 + 200.0));
    }

    #[test]
    fn test_newer_move_cannot_travel_back() {
        let dex = time_capsule_dex();
        assert_eq!(cheapest_path(&dex, &request(143, 1, &[174])), None);
    }

    // Each tutor move exists in a single release; there are no egg moves to
    // carry either one around.
    fn tutor_dex(with_diamond_pearl: bool) -> Pokedex {
        let mut builder = DexBuilder::new()
            .version_group(5, 3)
            .version_group(11, 5)
            .egg_group(15, "no-eggs")
            .move_(33, "tackle", 1)
            .move_(20, "dynamic-punch", 2)
            .move_(21, "drain-punch", 4)
            .species(236, "tyrogue", 236, None, &[15])
            .learn(236, 33, 5, LearnMethod::LevelUp, 1)
            .learn(236, 33, 11, LearnMethod::LevelUp, 1)
            .learn(236, 20, 5, LearnMethod::Tutor, 0)
            .learn(236, 21, 11, LearnMethod::Tutor, 0);
        if with_diamond_pearl {
            builder = builder
                .version_group(8, 4)
                .learn(236, 33, 8, LearnMethod::LevelUp, 1);
        }
        builder.build()
    }

    #[test]
    fn test_tutor_moves_in_releases_that_cannot_trade() {
        let dex = tutor_dex(false);
        assert_eq!(cheapest_path(&dex, &request(236, 11, &[20, 21])), None);

        let path = cheapest_path(&dex, &request(236, 11, &[21])).expect("moveset is legal");
        assert_eq!(action_kinds(&path), vec!["start", "learn", "grow"]);
        assert_eq!(path.cost(), OrderedFloat(60.0));
    }

    #[test]
    fn test_tutor_moves_joined_through_an_intermediate_release() {
        let dex = tutor_dex(true);
        let path = cheapest_path(&dex, &request(236, 11, &[20, 21])).expect("moveset is legal");
        assert_eq!(
            action_kinds(&path),
            vec!["start", "learn", "trade", "trade", "learn", "grow"]
        );
        // A single-use generation 3 tutor, two trades with transfers, a tutor.
        assert_eq!(path.cost(), OrderedFloat(2100.0 + 400.0 + 400.0 + 60.0));
    }
}
