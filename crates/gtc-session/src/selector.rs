use crate::{
    error::{Result, SessionError},
    model::FlavorProfile,
};

/// Picks the flavor with the largest `width * height * bitrate * frame_rate`.
/// On equal scores the earliest profile wins.
pub fn select_best(profiles: &[FlavorProfile]) -> Result<&FlavorProfile> {
    let mut iter = profiles.iter();
    let mut best = iter.next().ok_or(SessionError::EmptyCatalog)?;
    for profile in iter {
        if profile.score() > best.score() {
            best = profile;
        }
    }
    Ok(best)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn profiles() -> impl Strategy<Value = Vec<FlavorProfile>> {
        prop::collection::vec(
            (0u32..4096, 0u32..2160, 0.0f64..20_000.0, 1.0f64..120.0),
            1..12,
        )
        .prop_map(|dims| {
            dims.into_iter()
                .enumerate()
                .map(|(i, (width, height, bitrate, frame_rate))| FlavorProfile {
                    width,
                    height,
                    bitrate,
                    frame_rate,
                    id: format!("flavor-{i}"),
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_best_score_dominates(profiles in profiles()) {
            let best = select_best(&profiles).unwrap();
            for profile in &profiles {
                prop_assert!(best.score() >= profile.score());
            }
        }

        #[test]
        fn prop_first_maximum_wins(profiles in profiles()) {
            let best = select_best(&profiles).unwrap();
            let first_max = profiles
                .iter()
                .position(|p| p.score() == best.score())
                .unwrap();
            prop_assert_eq!(&best.id, &profiles[first_max].id);
        }
    }
}
