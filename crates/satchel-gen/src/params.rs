//! Parameter allocation.

use log::debug;

use satchel_spec::{slot_parameter_name, ExpressionParameters, Parameter};

use crate::error::{GenError, GenResult};
use crate::template::Template;

/// Builds the full parameter set: named basis parameters first, then one int
/// parameter per slot, then float placeholders up to `capacity`.
///
/// Fails with [`GenError::CapacityExceeded`] when the named basis parameters
/// plus `slot_count` do not fit.
pub fn allocate_parameters(
    basis: Template<ExpressionParameters>,
    slot_count: usize,
    capacity: usize,
) -> GenResult<ExpressionParameters> {
    let carried: Vec<Parameter> = basis
        .into_document()
        .parameters
        .into_iter()
        .filter(|p| !p.is_blank())
        .collect();

    if carried.len() + slot_count > capacity {
        return Err(GenError::capacity_exceeded(carried.len(), slot_count, capacity));
    }

    debug!(
        "allocating {} carried-over and {} slot parameter(s) of {}",
        carried.len(),
        slot_count,
        capacity
    );

    let mut parameters = carried;
    parameters.extend((0..slot_count).map(|i| Parameter::int(slot_parameter_name(i))));
    parameters.resize_with(capacity, Parameter::placeholder);

    Ok(ExpressionParameters::new(parameters))
}
