//! Planting estimator (spec.md §4.2 row "Planting").

use crate::clock::Season;
use crate::entities::Vineyard;
use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;
use crate::work::modifiers::{
    combine_overgrowth_years, overgrowth_modifier_default, planting_seasonal_modifier, soil_average,
    OvergrowthFields,
};

use crate::activity::WorkCategory;

pub fn calculate_planting_work(
    vineyard: &Vineyard,
    target_density: f64,
    grape_fragility: f64,
    season: Season,
    params: &GameParameters,
) -> Estimate {
    let altitude = params.altitude_rating(&vineyard.country, &vineyard.region, vineyard.altitude);
    let soil = soil_average(params, &vineyard.soils);
    let seasonal = planting_seasonal_modifier(season);
    let overgrowth_years = combine_overgrowth_years(
        &vineyard.overgrowth,
        Some(OvergrowthFields {
            vegetation: true,
            debris: true,
            uproot: false,
            replant: false,
        }),
        None,
    );
    let overgrowth = overgrowth_modifier_default(overgrowth_years);

    let modifiers = vec![grape_fragility, altitude, soil, seasonal, overgrowth];

    let inputs = WorkCostInputs {
        amount: vineyard.hectares,
        rate: params.rate(WorkCategory::Planting),
        initial_work: params.initial(WorkCategory::Planting),
        density: Some(target_density),
        use_density_adjustment: true,
        reference_density: crate::params::DEFAULT_VINE_DENSITY,
        modifiers: modifiers.clone(),
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Hectares to plant", vineyard.hectares, "ha"),
        WorkFactor::modifier("Grape fragility", grape_fragility),
        WorkFactor::modifier("Altitude", altitude),
        WorkFactor::modifier("Soil average", soil),
        WorkFactor::modifier("Season", seasonal),
        WorkFactor::modifier("Overgrowth", overgrowth),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::VineyardStatus;
    use crate::ids::VineyardId;
    use crate::work::modifiers::OvergrowthYears;
    use slotmap::SlotMap;

    #[test]
    fn happy_path_matches_worked_example() {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let mut vineyard = Vineyard::new(id, 1.0);
        vineyard.status = VineyardStatus::Barren;
        vineyard.overgrowth = OvergrowthYears::default();
        let params = GameParameters::default();

        let estimate = calculate_planting_work(&vineyard, 5000.0, 0.0, Season::Spring, &params);
        assert_eq!(estimate.total_work, 189);
    }

    #[test]
    fn fragility_increases_work() {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let vineyard = Vineyard::new(id, 1.0);
        let params = GameParameters::default();

        let base = calculate_planting_work(&vineyard, 5000.0, 0.0, Season::Spring, &params);
        let fragile = calculate_planting_work(&vineyard, 5000.0, 0.5, Season::Spring, &params);
        assert!(fragile.total_work > base.total_work);
    }

    #[test]
    fn estimator_is_pure_and_idempotent() {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let vineyard = Vineyard::new(id, 2.5);
        let params = GameParameters::default();

        let a = calculate_planting_work(&vineyard, 4500.0, 0.2, Season::Summer, &params);
        let b = calculate_planting_work(&vineyard, 4500.0, 0.2, Season::Summer, &params);
        assert_eq!(a.total_work, b.total_work);
    }
}
