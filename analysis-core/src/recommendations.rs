use crate::model::DisasterCategory;

const COMMON: &[&str] = &[
    "Ensure emergency services have been notified",
    "Keep a safe distance from the affected area",
    "Follow instructions from local authorities",
    "Check on vulnerable people nearby if it is safe to do so",
];

const EARTHQUAKE: &[&str] = &[
    "Drop, cover, and hold on until the shaking stops",
    "Stay away from windows, glass, and heavy furniture",
    "Expect aftershocks and avoid damaged buildings",
    "Check for gas leaks and shut off utilities if damaged",
];

const FOG: &[&str] = &[
    "Reduce speed and use low-beam headlights",
    "Increase following distance between vehicles",
    "Avoid unnecessary travel until visibility improves",
];

const HEAVY_RAIN: &[&str] = &[
    "Avoid driving or walking through floodwaters",
    "Move to higher ground if water levels are rising",
    "Be alert for downed power lines and electrical hazards",
    "Monitor weather alerts for flash flood warnings",
];

const ON_FIRE: &[&str] = &[
    "Evacuate the area immediately and stay upwind of smoke",
    "Do not re-enter burning structures",
    "Keep access clear for fire department vehicles",
    "Watch for falling debris and structural collapse",
];

fn specific(category: DisasterCategory) -> &'static [&'static str] {
    match category {
        DisasterCategory::Earthquake => EARTHQUAKE,
        DisasterCategory::Fog => FOG,
        DisasterCategory::HeavyRain => HEAVY_RAIN,
        DisasterCategory::OnFire => ON_FIRE,
    }
}

pub fn common_recommendations() -> Vec<String> {
    COMMON.iter().map(|s| s.to_string()).collect()
}

/// Category-specific advice followed by the common list.
pub fn recommendations_for_category(category: Option<DisasterCategory>) -> Vec<String> {
    let head = category.map(specific).unwrap_or_default();
    head.iter().chain(COMMON).map(|s| s.to_string()).collect()
}

pub fn recommendations_for(primary: Option<&str>) -> Vec<String> {
    recommendations_for_category(primary.and_then(DisasterCategory::from_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_advice_precedes_common_list() {
        let recs = recommendations_for(Some("on_fire"));
        assert_eq!(recs.len(), ON_FIRE.len() + COMMON.len());
        assert_eq!(recs[0], ON_FIRE[0]);
        assert_eq!(&recs[ON_FIRE.len()..], common_recommendations().as_slice());
    }

    #[test]
    fn unknown_or_missing_category_falls_back_to_common() {
        assert_eq!(recommendations_for(Some("volcano")), common_recommendations());
        assert_eq!(recommendations_for(None), common_recommendations());
        assert_eq!(recommendations_for(Some("")), common_recommendations());
    }

    #[test]
    fn every_category_has_specific_advice() {
        for category in DisasterCategory::ALL {
            let recs = recommendations_for_category(Some(category));
            assert!(recs.len() > COMMON.len(), "{category:?}");
        }
    }
}
