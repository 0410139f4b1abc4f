use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

/// Sentence encoder: BERT body followed by attention-masked mean pooling.
///
/// This is the pooling used by sentence-transformers' all-MiniLM-L6-v2, so
/// vectors from the safetensors export match the Python model up to float noise.
#[derive(Clone)]
pub struct BertSentenceEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl BertSentenceEncoder {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        // sentence-transformers exports store the encoder at the root; plain
        // transformers checkpoints nest it under `bert.`.
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Encodes one tokenized sequence (`[1, seq_len]` tensors) into `[hidden]`.
    pub fn encode(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Vec<f32>> {
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self
            .model
            .forward(input_ids, &token_type_ids, Some(attention_mask))?;

        // hidden: [1, seq_len, hidden_size]
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        pooled.squeeze(0)?.to_vec1::<f32>()
    }
}
