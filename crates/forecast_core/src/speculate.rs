//! Speculative apply/revert: try a scenario against the live ledger, observe
//! the cascading effects, then undo it exactly.
//!
//! `revert` subtracts the delta values recorded at simulate time, never a
//! recomputation, so repeated trials leave no drift in the shared state. Both
//! operations validate every touched segment before mutating anything; a
//! stale reference aborts with no partial application.

use bevy_ecs::prelude::World;

use crate::error::ForecastError;
use crate::network::Segment;
use crate::simulation::{ResultState, SimulationResult};

/// Add each recorded delta to its segment's live load and mark the result
/// `Applied`.
///
/// Fails with [ForecastError::AlreadyApplied] unless the result is in the
/// `Computed` state (a reverted result is spent; simulate again to retry),
/// and with [ForecastError::UnknownSegment] if any touched segment has been
/// despawned, in which case no load is changed.
pub fn apply(world: &mut World, result: &mut SimulationResult) -> Result<(), ForecastError> {
    match result.state {
        ResultState::Computed => {}
        ResultState::Applied | ResultState::Reverted => {
            return Err(ForecastError::AlreadyApplied)
        }
    }
    check_segments_alive(world, result)?;

    for entry in &result.entries {
        // Validated above; a &mut World cannot lose entities mid-loop.
        if let Some(mut segment) = world.get_mut::<Segment>(entry.entity) {
            segment.load += entry.additional;
        }
    }
    result.state = ResultState::Applied;
    Ok(())
}

/// Subtract each recorded delta from its segment's live load and mark the
/// result `Reverted`, restoring every touched load to its pre-apply value.
///
/// Fails with [ForecastError::NotApplied] if the result was never applied and
/// [ForecastError::AlreadyReverted] on a second revert. A stale segment fails
/// with [ForecastError::UnknownSegment] before any load is changed.
pub fn revert(world: &mut World, result: &mut SimulationResult) -> Result<(), ForecastError> {
    match result.state {
        ResultState::Applied => {}
        ResultState::Computed => return Err(ForecastError::NotApplied),
        ResultState::Reverted => return Err(ForecastError::AlreadyReverted),
    }
    check_segments_alive(world, result)?;

    for entry in &result.entries {
        if let Some(mut segment) = world.get_mut::<Segment>(entry.entity) {
            segment.load -= entry.additional;
        }
    }
    result.state = ResultState::Reverted;
    Ok(())
}

fn check_segments_alive(world: &World, result: &SimulationResult) -> Result<(), ForecastError> {
    for entry in &result.entries {
        if world.get::<Segment>(entry.entity).is_none() {
            return Err(ForecastError::UnknownSegment(entry.segment));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::EvenSplit;
    use crate::network::NetworkGraph;
    use crate::simulation::simulate;
    use crate::test_helpers::{disruption_on, load_of, test_world, SEG_A, SEG_B, SEG_C};

    #[test]
    fn apply_adds_deltas_to_live_loads() {
        let mut world = test_world();
        let event = disruption_on(SEG_A, 20);
        let mut result = simulate(&world, &event, &EvenSplit).expect("simulate");

        apply(&mut world, &mut result).expect("apply");

        assert_eq!(result.state(), ResultState::Applied);
        assert_eq!(load_of(&world, SEG_B), 30);
        assert_eq!(load_of(&world, SEG_C), 65);
    }

    #[test]
    fn revert_restores_loads_exactly() {
        let mut world = test_world();
        let event = disruption_on(SEG_A, 20);
        let before_b = load_of(&world, SEG_B);
        let before_c = load_of(&world, SEG_C);

        let mut result = simulate(&world, &event, &EvenSplit).expect("simulate");
        apply(&mut world, &mut result).expect("apply");
        revert(&mut world, &mut result).expect("revert");

        assert_eq!(result.state(), ResultState::Reverted);
        assert_eq!(load_of(&world, SEG_B), before_b);
        assert_eq!(load_of(&world, SEG_C), before_c);
    }

    #[test]
    fn repeated_trials_leave_no_drift() {
        let mut world = test_world();
        let event = disruption_on(SEG_A, 17);
        let before_b = load_of(&world, SEG_B);
        let before_c = load_of(&world, SEG_C);

        for _ in 0..50 {
            let mut result = simulate(&world, &event, &EvenSplit).expect("simulate");
            apply(&mut world, &mut result).expect("apply");
            revert(&mut world, &mut result).expect("revert");
        }

        assert_eq!(load_of(&world, SEG_B), before_b);
        assert_eq!(load_of(&world, SEG_C), before_c);
    }

    #[test]
    fn overlapping_results_are_additive() {
        let mut world = test_world();
        let event = disruption_on(SEG_A, 20);

        let mut first = simulate(&world, &event, &EvenSplit).expect("simulate");
        apply(&mut world, &mut first).expect("apply first");
        let mut second = simulate(&world, &event, &EvenSplit).expect("simulate");
        apply(&mut world, &mut second).expect("apply second");

        assert_eq!(load_of(&world, SEG_B), 40);

        // Reverts subtract recorded deltas, in either order.
        revert(&mut world, &mut first).expect("revert first");
        revert(&mut world, &mut second).expect("revert second");
        assert_eq!(load_of(&world, SEG_B), 20);
        assert_eq!(load_of(&world, SEG_C), 55);
    }

    #[test]
    fn revert_before_apply_fails() {
        let mut world = test_world();
        let mut result = simulate(&world, &disruption_on(SEG_A, 20), &EvenSplit).unwrap();

        assert_eq!(
            revert(&mut world, &mut result),
            Err(ForecastError::NotApplied)
        );
        assert_eq!(result.state(), ResultState::Computed);
    }

    #[test]
    fn double_apply_fails_and_mutates_nothing() {
        let mut world = test_world();
        let mut result = simulate(&world, &disruption_on(SEG_A, 20), &EvenSplit).unwrap();

        apply(&mut world, &mut result).expect("apply");
        assert_eq!(
            apply(&mut world, &mut result),
            Err(ForecastError::AlreadyApplied)
        );
        assert_eq!(load_of(&world, SEG_B), 30);
    }

    #[test]
    fn double_revert_fails() {
        let mut world = test_world();
        let mut result = simulate(&world, &disruption_on(SEG_A, 20), &EvenSplit).unwrap();

        apply(&mut world, &mut result).expect("apply");
        revert(&mut world, &mut result).expect("revert");
        assert_eq!(
            revert(&mut world, &mut result),
            Err(ForecastError::AlreadyReverted)
        );
        assert_eq!(load_of(&world, SEG_B), 20);
    }

    #[test]
    fn apply_on_reverted_result_fails() {
        let mut world = test_world();
        let mut result = simulate(&world, &disruption_on(SEG_A, 20), &EvenSplit).unwrap();

        apply(&mut world, &mut result).expect("apply");
        revert(&mut world, &mut result).expect("revert");
        assert_eq!(
            apply(&mut world, &mut result),
            Err(ForecastError::AlreadyApplied)
        );
    }

    #[test]
    fn stale_segment_aborts_apply_without_partial_mutation() {
        let mut world = test_world();
        let mut result = simulate(&world, &disruption_on(SEG_A, 20), &EvenSplit).unwrap();

        let entity = world
            .resource::<NetworkGraph>()
            .resolve(SEG_C)
            .expect("segment C");
        world.despawn(entity);

        assert_eq!(
            apply(&mut world, &mut result),
            Err(ForecastError::UnknownSegment(SEG_C))
        );
        // The surviving segment was not half-applied.
        assert_eq!(load_of(&world, SEG_B), 20);
        assert_eq!(result.state(), ResultState::Computed);
    }
}
