use std::collections::BTreeMap;
use crate::models::{ClubRecord, ConditionGrade};

/// Share of the release price a used club keeps, by condition grade
#[inline]
pub fn depreciation_factor(grade: ConditionGrade) -> f64 {
    match grade {
        ConditionGrade::S => 0.85,
        ConditionGrade::A => 0.70,
        ConditionGrade::B => 0.55,
        ConditionGrade::C => 0.40,
    }
}

/// Used price for a grade: the club's own guide first, then a depreciated
/// release price rounded down to the nearest 1,000.
pub fn estimate_used_price(club: &ClubRecord, grade: ConditionGrade) -> Option<u64> {
    if let Some(price) = club.used_price_guide.get(&grade) {
        return Some(*price);
    }

    club.release_price.map(|release| {
        let estimate = (release as f64 * depreciation_factor(grade)).round() as u64;
        estimate - estimate % 1000
    })
}

/// Used price for every grade that can be resolved
pub fn resolved_price_guide(club: &ClubRecord) -> BTreeMap<ConditionGrade, u64> {
    ConditionGrade::ALL
        .into_iter()
        .filter_map(|grade| estimate_used_price(club, grade).map(|price| (grade, price)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClubType;

    fn create_club(release_price: Option<u64>) -> ClubRecord {
        serde_json::from_value(serde_json::json!({
            "id": "c1",
            "name": "Test",
            "clubType": ClubType::Iron,
            "releasePrice": release_price,
        }))
        .unwrap()
    }

    #[test]
    fn test_guide_takes_priority() {
        let mut club = create_club(Some(1_000_000));
        club.used_price_guide.insert(ConditionGrade::A, 640_000);

        assert_eq!(estimate_used_price(&club, ConditionGrade::A), Some(640_000));
        assert_eq!(estimate_used_price(&club, ConditionGrade::B), Some(550_000));
    }

    #[test]
    fn test_depreciation_rounds_down() {
        let club = create_club(Some(799_000));
        assert_eq!(estimate_used_price(&club, ConditionGrade::S), Some(679_000));
    }

    #[test]
    fn test_no_price_information() {
        let club = create_club(None);
        assert!(resolved_price_guide(&club).is_empty());
    }

    #[test]
    fn test_resolved_guide_is_ordered_by_grade() {
        let club = create_club(Some(1_000_000));
        let guide = resolved_price_guide(&club);
        let prices: Vec<u64> = guide.values().copied().collect();

        assert_eq!(prices, vec![850_000, 700_000, 550_000, 400_000]);
    }
}
