use burn::prelude::*;
use burn::tensor::TensorData;

use crate::env::{Observation, OBSERVATION_LEN, PLANES};
use crate::game::{COLS, ROWS};

/// Encode an observation as a tensor of shape [2, 6, 7].
///
/// Channel 0: Current player's pieces (1.0 where placed)
/// Channel 1: Opponent's pieces (1.0 where placed)
pub fn encode_observation<B: Backend>(
    observation: &Observation,
    device: &B::Device,
) -> Tensor<B, 3> {
    let data = observation.as_flat();
    Tensor::<B, 1>::from_data(TensorData::from(data.as_slice()), device)
        .reshape([PLANES, ROWS, COLS])
}

/// Encode multiple observations as a batched tensor of shape [batch, 2, 6, 7].
pub fn encode_observations_batch<B: Backend>(
    observations: &[Observation],
    device: &B::Device,
) -> Tensor<B, 4> {
    let batch_size = observations.len();
    let mut flat = Vec::with_capacity(batch_size * OBSERVATION_LEN);
    for observation in observations {
        flat.extend_from_slice(&observation.as_flat());
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([batch_size, PLANES, ROWS, COLS])
}
