//! Stacked-LSTM gesture classifier on candle.
//!
//! Three recurrent layers (64, 128, 64 units) read the frame sequence;
//! the last hidden state feeds two ReLU dense layers (64, 32) and a
//! logits head over the gesture classes.

use candle_core::{DType, Device, Tensor, D};
use candle_nn::{linear, lstm, LSTMConfig, Linear, Module, VarBuilder, VarMap, LSTM, RNN};

use gesture_core::GestureError;

/// Units in the three recurrent layers.
const LSTM_UNITS: [usize; 3] = [64, 128, 64];

/// Units in the two dense layers before the logits head.
const DENSE_UNITS: [usize; 2] = [64, 32];

/// Input and output dimensions of the classifier; the hidden topology
/// is fixed.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Values per frame.
    pub frame_width: usize,

    /// Classes in the logits head.
    pub num_classes: usize,
}

/// Gesture sequence classifier.
///
/// All parameters live in the caller's [`VarMap`], so the same map can
/// be trained, saved as safetensors, and reloaded into a fresh model.
///
/// # Example
///
/// ```ignore
/// use candle_core::Device;
/// use candle_nn::VarMap;
/// use gesture_learn::model::{GestureLstm, ModelConfig};
///
/// let var_map = VarMap::new();
/// let config = ModelConfig { frame_width: 126, num_classes: 5 };
/// let model = GestureLstm::new(&var_map, &config, &Device::Cpu).unwrap();
/// ```
pub struct GestureLstm {
    lstm1: LSTM,
    lstm2: LSTM,
    lstm3: LSTM,
    fc1: Linear,
    fc2: Linear,
    head: Linear,
    config: ModelConfig,
}

impl std::fmt::Debug for GestureLstm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GestureLstm({}→{}→{}→{}→{}→{}→{})",
            self.config.frame_width,
            LSTM_UNITS[0],
            LSTM_UNITS[1],
            LSTM_UNITS[2],
            DENSE_UNITS[0],
            DENSE_UNITS[1],
            self.config.num_classes
        )
    }
}

impl GestureLstm {
    /// Creates a classifier with all parameters tracked in `var_map`.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Training`] if parameter creation fails.
    pub fn new(
        var_map: &VarMap,
        config: &ModelConfig,
        device: &Device,
    ) -> Result<Self, GestureError> {
        let map_err = |e: candle_core::Error| GestureError::Training {
            message: format!("GestureLstm new: {e}"),
        };

        let vb = VarBuilder::from_varmap(var_map, DType::F32, device);

        let lstm1 = lstm(
            config.frame_width,
            LSTM_UNITS[0],
            LSTMConfig::default(),
            vb.pp("lstm1"),
        )
        .map_err(map_err)?;
        let lstm2 = lstm(
            LSTM_UNITS[0],
            LSTM_UNITS[1],
            LSTMConfig::default(),
            vb.pp("lstm2"),
        )
        .map_err(map_err)?;
        let lstm3 = lstm(
            LSTM_UNITS[1],
            LSTM_UNITS[2],
            LSTMConfig::default(),
            vb.pp("lstm3"),
        )
        .map_err(map_err)?;
        let fc1 = linear(LSTM_UNITS[2], DENSE_UNITS[0], vb.pp("fc1")).map_err(map_err)?;
        let fc2 = linear(DENSE_UNITS[0], DENSE_UNITS[1], vb.pp("fc2")).map_err(map_err)?;
        let head = linear(DENSE_UNITS[1], config.num_classes, vb.pp("head")).map_err(map_err)?;

        Ok(Self {
            lstm1,
            lstm2,
            lstm3,
            fc1,
            fc2,
            head,
            config: config.clone(),
        })
    }

    /// Batched forward pass.
    ///
    /// Input shape: `[batch, sequence_len, frame_width]`, F32.
    /// Output shape: `[batch, num_classes]` — unnormalized logits.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Training`] if tensor operations fail or
    /// the sequence dimension is empty.
    pub fn forward(&self, sequences: &Tensor) -> Result<Tensor, GestureError> {
        let map_err = |e: candle_core::Error| GestureError::Training {
            message: format!("GestureLstm forward: {e}"),
        };

        let states = self.lstm1.seq(sequences).map_err(map_err)?;
        let hidden = self.lstm1.states_to_tensor(&states).map_err(map_err)?;
        let states = self.lstm2.seq(&hidden).map_err(map_err)?;
        let hidden = self.lstm2.states_to_tensor(&states).map_err(map_err)?;
        let states = self.lstm3.seq(&hidden).map_err(map_err)?;
        let last = states.last().ok_or_else(|| GestureError::Training {
            message: "GestureLstm forward: empty sequence".to_string(),
        })?;

        let hidden = self
            .fc1
            .forward(last.h())
            .map_err(map_err)?
            .relu()
            .map_err(map_err)?;
        let hidden = self
            .fc2
            .forward(&hidden)
            .map_err(map_err)?
            .relu()
            .map_err(map_err)?;
        self.head.forward(&hidden).map_err(map_err)
    }

    /// Argmax class index for each batch row.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Training`] if tensor operations fail.
    pub fn predict(&self, sequences: &Tensor) -> Result<Vec<usize>, GestureError> {
        let map_err = |e: candle_core::Error| GestureError::Training {
            message: format!("GestureLstm predict: {e}"),
        };

        let logits = self.forward(sequences)?;
        let classes = logits
            .argmax(D::Minus1)
            .map_err(map_err)?
            .to_vec1::<u32>()
            .map_err(map_err)?;
        Ok(classes.into_iter().map(|class| class as usize).collect())
    }

    /// Returns the input/output dimensions this model was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}
