//! Text generation on Candle with deterministic decoding
//!
//! The summarization stage needs reproducible output, so decoding is greedy
//! (argmax) with a repetition penalty over a bounded window instead of
//! sampling. The engine runs the flan-t5 encoder/decoder family locally.

use crate::error::{JobInsightError, Result};
use async_trait::async_trait;
use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::t5;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenizers::Tokenizer;

/// Fixed decoding parameters for one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_new_tokens: usize,
    pub min_new_tokens: usize,
    /// Carried for engines that implement beam search; the Candle engine
    /// decodes greedily and ignores widths above 1
    pub beam_width: usize,
    pub repetition_penalty: f32,
    pub repeat_last_n: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 120,
            min_new_tokens: 50,
            beam_width: 3,
            repetition_penalty: 1.1,
            repeat_last_n: 64,
        }
    }
}

/// Result of one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
    pub token_count: usize,
    pub generation_time_ms: u64,
}

/// Narrow contract over the text-generation service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&mut self, prompt: &str, config: &GenerationConfig) -> Result<GeneratedText>;
}

/// Pick the best available device, falling back to CPU
pub fn select_device() -> Result<Device> {
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            log::info!("Using CUDA device for generation");
            return Ok(device);
        }
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            log::info!("Using Metal device for generation");
            return Ok(device);
        }
    }

    log::info!("Using CPU for generation");
    Ok(Device::Cpu)
}

/// Local flan-t5 generation engine
pub struct T5Generator {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token_id: u32,
    eos_token_id: u32,
    use_cache: bool,
}

impl T5Generator {
    /// Load a model directory containing `config.json`, `tokenizer.json`
    /// and `model.safetensors`
    pub fn load(model_path: &Path) -> Result<Self> {
        log::info!("Loading generation model from {}", model_path.display());
        let device = select_device()?;

        let tokenizer = Tokenizer::from_file(model_path.join("tokenizer.json"))
            .map_err(|e| JobInsightError::ModelLoading(format!("Failed to load tokenizer: {}", e)))?;

        let config_content = std::fs::read_to_string(model_path.join("config.json"))
            .map_err(|e| JobInsightError::ModelLoading(format!("Failed to read model config: {}", e)))?;
        let raw_config: serde_json::Value = serde_json::from_str(&config_content)
            .map_err(|e| JobInsightError::ModelLoading(format!("Failed to parse model config: {}", e)))?;

        let decoder_start_token_id = raw_config["decoder_start_token_id"].as_u64().unwrap_or(0) as u32;
        let use_cache = raw_config["use_cache"].as_bool().unwrap_or(true);
        let eos_token_id = tokenizer.token_to_id("</s>").unwrap_or(1);

        let t5_config: t5::Config = serde_json::from_value(raw_config)
            .map_err(|e| JobInsightError::ModelLoading(format!("Failed to parse T5 config: {}", e)))?;

        let weights_path = model_path.join("model.safetensors");
        if !weights_path.exists() {
            return Err(JobInsightError::ModelLoading(format!(
                "Model weights not found at {}",
                weights_path.display()
            )));
        }
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &t5_config)?;

        log::info!("Generation model loaded");
        Ok(Self {
            model,
            tokenizer,
            device,
            decoder_start_token_id,
            eos_token_id,
            use_cache,
        })
    }

    fn last_token_logits(logits: &Tensor) -> Result<Tensor> {
        let logits = match logits.dims().len() {
            3 => logits.i((0, logits.dims()[1] - 1))?,
            2 => logits.i(logits.dims()[0] - 1)?,
            _ => logits.clone(),
        };
        Ok(logits)
    }
}

#[async_trait]
impl TextGenerator for T5Generator {
    async fn generate(&mut self, prompt: &str, config: &GenerationConfig) -> Result<GeneratedText> {
        let start = std::time::Instant::now();
        self.model.clear_kv_cache();

        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| JobInsightError::Model(format!("Failed to tokenize prompt: {}", e)))?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input_ids)?;

        // Fixed seed plus argmax keeps decoding reproducible
        let mut logits_processor = LogitsProcessor::from_sampling(299792458, Sampling::ArgMax);
        let mut output_tokens = vec![self.decoder_start_token_id];

        for step in 0..config.max_new_tokens {
            let decoder_input = if step == 0 || !self.use_cache {
                Tensor::new(output_tokens.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = *output_tokens.last().expect("decoder tokens never empty");
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };

            let logits = self.model.decode(&decoder_input, &encoder_output)?;
            let logits = Self::last_token_logits(&logits)?;
            let logits = if (config.repetition_penalty - 1.0).abs() < f32::EPSILON {
                logits
            } else {
                let penalty_start = output_tokens.len().saturating_sub(config.repeat_last_n);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    config.repetition_penalty,
                    &output_tokens[penalty_start..],
                )?
            };

            let next = logits_processor.sample(&logits)?;
            if next == self.eos_token_id && output_tokens.len() - 1 >= config.min_new_tokens {
                break;
            }
            output_tokens.push(next);
        }

        let text = self
            .tokenizer
            .decode(&output_tokens[1..], true)
            .map_err(|e| JobInsightError::Model(format!("Failed to decode output: {}", e)))?;

        let elapsed = start.elapsed();
        let token_count = output_tokens.len() - 1;
        log::debug!(
            "Generated {} tokens in {}ms",
            token_count,
            elapsed.as_millis()
        );

        Ok(GeneratedText {
            text: text.trim().to_string(),
            token_count,
            generation_time_ms: elapsed.as_millis() as u64,
        })
    }
}
