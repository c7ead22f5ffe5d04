//! Property tests for derangement generation.
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use trustee_core::{DerangeOptions, Roster, derange, derange_with, is_derangement};

fn roster_of(n: usize) -> Roster {
    Roster::new((0..n).map(|i| format!("Guest {i}"))).unwrap()
}

proptest! {
    #[test]
    fn every_roster_gets_a_derangement(n in 2usize..48, seed in any::<u64>()) {
        let roster = roster_of(n);
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment = derange(&roster, &mut rng).unwrap();

        prop_assert_eq!(assignment.len(), n);
        prop_assert!(is_derangement(assignment.recipients()));
        for (giver, recipient) in assignment.pairs() {
            prop_assert_ne!(giver, recipient);
        }
    }

    #[test]
    fn rejection_gets_a_derangement(n in 2usize..24, seed in any::<u64>()) {
        let roster = roster_of(n);
        let options = DerangeOptions::default()
            .with_strategy(trustee_core::Strategy::Rejection);
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment = derange_with(&roster, &mut rng, &options).unwrap();
        prop_assert!(is_derangement(assignment.recipients()));
    }

    #[test]
    fn seeded_runs_repeat(n in 2usize..48, seed in any::<u64>()) {
        let roster = roster_of(n);
        let first = derange(&roster, &mut StdRng::seed_from_u64(seed)).unwrap();
        let second = derange(&roster, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn case_variants_are_duplicates(name in "[a-z]{1,12}") {
        let upper = name.to_uppercase();
        let result = Roster::new([name.as_str(), "Somebody Else", upper.as_str()]);
        let is_dup = matches!(result, Err(trustee_core::CoreError::DuplicateName { .. }));
        prop_assert!(is_dup);
    }
}
