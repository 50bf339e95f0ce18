//! Harvesting estimator (spec.md §4.2 row "Harvesting").

use crate::entities::Vineyard;
use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;
use crate::work::modifiers::{combine_overgrowth_years, overgrowth_modifier, soil_average, OvergrowthFields};

use crate::activity::WorkCategory;

pub fn calculate_harvesting_work(
    vineyard: &Vineyard,
    expected_yield_kg: f64,
    grape_fragility: f64,
    params: &GameParameters,
) -> Estimate {
    let altitude = params.altitude_rating(&vineyard.country, &vineyard.region, vineyard.altitude);
    let soil = soil_average(params, &vineyard.soils);
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
    // Capped at 0.6 for harvesting specifically (spec.md §4.2).
    let overgrowth = overgrowth_modifier(overgrowth_years, 0.10, 0.5, 0.6);

    let modifiers = vec![grape_fragility, altitude, soil, overgrowth];

    let inputs = WorkCostInputs {
        amount: expected_yield_kg,
        rate: params.rate(WorkCategory::Harvesting),
        initial_work: params.initial(WorkCategory::Harvesting),
        modifiers: modifiers.clone(),
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Expected yield", expected_yield_kg, "kg"),
        WorkFactor::modifier("Grape fragility", grape_fragility),
        WorkFactor::modifier("Altitude", altitude),
        WorkFactor::modifier("Soil average", soil),
        WorkFactor::modifier("Overgrowth (capped 0.6)", overgrowth),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VineyardId;
    use slotmap::SlotMap;

    #[test]
    fn overgrowth_never_exceeds_cap() {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let mut vineyard = Vineyard::new(id, 1.0);
        vineyard.overgrowth.vegetation = 1000.0;
        vineyard.overgrowth.debris = 1000.0;
        let params = GameParameters::default();

        let capped = calculate_harvesting_work(&vineyard, 1000.0, 0.0, &params);
        let baseline = calculate_harvesting_work(&Vineyard::new(id, 1.0), 1000.0, 0.0, &params);
        // Work with extreme overgrowth must not exceed what a 1+0.6 multiplier would give.
        assert!(capped.total_work as f64 <= baseline.total_work as f64 * 1.61);
    }

    #[test]
    fn zero_yield_still_costs_initial_work() {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let vineyard = Vineyard::new(id, 1.0);
        let params = GameParameters::default();

        let estimate = calculate_harvesting_work(&vineyard, 0.0, 0.0, &params);
        assert_eq!(estimate.total_work, params.initial(WorkCategory::Harvesting).ceil() as i64);
    }
}
