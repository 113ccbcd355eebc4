use std::collections::HashSet;

use proptest::prelude::*;

use skills_profile::taxonomy::{SkillRecord, normalize};

/// Small alphabets so records collide on every level.
fn arb_record() -> impl Strategy<Value = SkillRecord> {
    (
        "[A-C]",
        "[a-c]",
        "[p-r]",
        "[x-z]{1,2}",
        prop::option::of(1i64..1000),
    )
        .prop_map(
            |(platform, segment, product_portfolio, speciality_area, skill_id)| SkillRecord {
                platform,
                segment,
                product_portfolio,
                speciality_area,
                skill_id,
            },
        )
}

fn arb_records() -> impl Strategy<Value = Vec<SkillRecord>> {
    prop::collection::vec(arb_record(), 0..40)
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}

proptest! {
    #[test]
    fn normalize_is_deterministic(records in arb_records()) {
        prop_assert_eq!(normalize(&records), normalize(&records));
    }

    #[test]
    fn platforms_keep_first_seen_order(records in arb_records()) {
        let taxonomy = normalize(&records);
        let expected = first_seen(records.iter().map(|r| r.platform.as_str()));
        let actual: Vec<&str> = taxonomy.platforms.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn segments_keep_first_seen_order_per_platform(records in arb_records()) {
        let taxonomy = normalize(&records);
        for platform in &taxonomy.platforms {
            let expected = first_seen(
                records
                    .iter()
                    .filter(|r| r.platform == platform.id)
                    .map(|r| r.segment.as_str()),
            );
            let actual: Vec<&str> = platform.segments.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn every_record_becomes_one_leaf(records in arb_records()) {
        let taxonomy = normalize(&records);
        prop_assert_eq!(taxonomy.leaf_count(), records.len());
        prop_assert_eq!(taxonomy.is_empty(), records.is_empty());
    }

    #[test]
    fn leaves_sit_under_their_record_path(records in arb_records()) {
        let taxonomy = normalize(&records);
        for record in &records {
            let leaves = taxonomy.specialties_for_portfolio(
                &record.platform,
                &record.segment,
                &record.product_portfolio,
            );
            prop_assert!(leaves
                .iter()
                .any(|leaf| leaf.id == record.speciality_area && leaf.skill_id == record.skill_id));
        }
    }
}
