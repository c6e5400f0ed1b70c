use serde::Deserialize;

/// Audio parameters advertised to the streaming backend when a channel is
/// established. Input is 16 kHz mono LPCM; synthesized output comes back at
/// 24 kHz.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioChannelConfig {
    #[serde(default = "default_input_sample_rate")]
    pub input_sample_rate_hz: u32,

    #[serde(default = "default_sample_size_bits")]
    pub sample_size_bits: u16,

    #[serde(default = "default_channel_count")]
    pub channel_count: u16,

    #[serde(default = "default_output_sample_rate")]
    pub output_sample_rate_hz: u32,

    #[serde(default = "default_voice_id")]
    pub voice_id: String,
}

impl Default for AudioChannelConfig {
    fn default() -> Self {
        Self {
            input_sample_rate_hz: default_input_sample_rate(),
            sample_size_bits: default_sample_size_bits(),
            channel_count: default_channel_count(),
            output_sample_rate_hz: default_output_sample_rate(),
            voice_id: default_voice_id(),
        }
    }
}

fn default_input_sample_rate() -> u32 {
    16000
}

fn default_sample_size_bits() -> u16 {
    16
}

fn default_channel_count() -> u16 {
    1
}

fn default_output_sample_rate() -> u32 {
    24000
}

fn default_voice_id() -> String {
    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_config_defaults() {
        let config = AudioChannelConfig::default();
        assert_eq!(config.input_sample_rate_hz, 16000);
        assert_eq!(config.sample_size_bits, 16);
        assert_eq!(config.channel_count, 1);
        assert_eq!(config.output_sample_rate_hz, 24000);
        assert_eq!(config.voice_id, "default");
    }

    #[test]
    fn test_audio_config_from_toml_partial() {
        let config: AudioChannelConfig = toml::from_str(
            r#"
output_sample_rate_hz = 48000
voice_id = "nova"
"#,
        )
        .unwrap();
        assert_eq!(config.input_sample_rate_hz, 16000);
        assert_eq!(config.output_sample_rate_hz, 48000);
        assert_eq!(config.voice_id, "nova");
    }
}
