#[cfg(test)]
mod tests {
    use crate::errors::{DataError, MovesetError};
    use crate::movesets::tests::common::{request, DexBuilder};
    use crate::movesets::{MovesetSearch, SearchRequest};
    use crate::pokedex::Pokedex;
    use rstest::rstest;
    use schema::{EvolutionTrigger, LearnMethod, MoveId, SpeciesId, VersionGroupId};

    fn dex() -> Pokedex {
        DexBuilder::new()
            .version_group(11, 5)
            .egg_group(1, "monster")
            .move_(1, "pound", 1)
            .move_(2, "growl", 1)
            .move_(3, "bite", 1)
            .move_(4, "leer", 1)
            .move_(5, "roar", 1)
            .species(1, "cubone", 1, None, &[1])
            .species(2, "marowak", 1, Some(1), &[1])
            .species(3, "kangaskhan", 3, None, &[1])
            .evolution(2, EvolutionTrigger::LevelUp, Some(28))
            .learn(1, 1, 11, LearnMethod::LevelUp, 1)
            .learn(2, 1, 11, LearnMethod::LevelUp, 1)
            .learn(3, 1, 11, LearnMethod::LevelUp, 1)
            .build()
    }

    fn validate(request: &SearchRequest) -> Result<(), MovesetError> {
        let dex = dex();
        MovesetSearch::new(&dex, request).map(|_| ())
    }

    #[test]
    fn test_no_moves() {
        assert!(matches!(validate(&request(1, 11, &[])), Err(MovesetError::NoMoves)));
    }

    #[test]
    fn test_too_many_moves() {
        assert!(matches!(
            validate(&request(1, 11, &[1, 2, 3, 4, 5])),
            Err(MovesetError::TooManyMoves(5))
        ));
    }

    #[test]
    fn test_duplicate_moves() {
        assert!(matches!(
            validate(&request(1, 11, &[2, 1, 2])),
            Err(MovesetError::DuplicateMoves(MoveId(2)))
        ));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    fn test_excluding_any_family_member_excludes_the_target(#[case] excluded: u16) {
        let request = request(2, 11, &[1]).excluding_species(SpeciesId(excluded));
        assert!(matches!(
            validate(&request),
            Err(MovesetError::TargetExcluded(SpeciesId(2)))
        ));
    }

    #[test]
    fn test_excluding_another_family_is_fine() {
        let request = request(2, 11, &[1]).excluding_species(SpeciesId(3));
        assert!(validate(&request).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn test_invalid_level(#[case] level: u8) {
        assert!(matches!(
            validate(&request(1, 11, &[1]).with_level(level)),
            Err(MovesetError::InvalidLevel(l)) if l == level
        ));
    }

    #[test]
    fn test_unknown_ids() {
        assert!(matches!(
            validate(&request(99, 11, &[1])),
            Err(MovesetError::UnknownSpecies(SpeciesId(99)))
        ));
        assert!(matches!(
            validate(&request(1, 11, &[77])),
            Err(MovesetError::UnknownMove(MoveId(77)))
        ));
        assert!(matches!(
            validate(&request(1, 12, &[1])),
            Err(MovesetError::UnknownVersionGroup(VersionGroupId(12)))
        ));
    }

    #[test]
    fn test_corrupt_evolution_data() {
        let dex = DexBuilder::new()
            .version_group(11, 5)
            .move_(1, "pound", 1)
            .species(1, "cubone", 1, None, &[1])
            .evolution(1, EvolutionTrigger::LevelUp, Some(28))
            .learn(1, 1, 11, LearnMethod::LevelUp, 1)
            .build();
        assert!(matches!(
            MovesetSearch::new(&dex, &request(1, 11, &[1])),
            Err(MovesetError::NoParent { species: SpeciesId(1) })
        ));
    }

    #[test]
    fn test_identifiers_resolve_or_report_not_found() {
        let dex = dex();
        let request = SearchRequest::from_identifiers(&dex, "Marowak", "version-11", &["pound"])
            .expect("identifiers exist");
        assert_eq!(request.species, SpeciesId(2));
        assert_eq!(request.version_group, VersionGroupId(11));
        assert_eq!(request.moves, vec![MoveId(1)]);

        let missing = SearchRequest::from_identifiers(&dex, "marowak", "version-11", &["splash"]);
        assert!(matches!(
            missing,
            Err(MovesetError::Data(DataError::NotFound { kind: "Move", .. }))
        ));
    }

    #[test]
    fn test_empty_move_list_by_identifier() {
        let dex = dex();
        let no_moves: &[&str] = &[];
        let request = SearchRequest::from_identifiers(&dex, "cubone", "version-11", no_moves)
            .expect("identifiers exist");
        let err = MovesetSearch::new(&dex, &request).map(|_| ()).unwrap_err();
        assert!(matches!(err, MovesetError::NoMoves));
        assert_eq!(err.to_string(), "No moves specified.");
    }
}
