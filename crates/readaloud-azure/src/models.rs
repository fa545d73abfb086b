//! Wire types for the Azure Speech REST API.

use readaloud_core::{AudioEncoding, Voice, VoiceGender, VoiceType};
use serde::Deserialize;

/// Value of the `X-Microsoft-OutputFormat` header for an encoding.
pub const fn output_format(encoding: AudioEncoding) -> &'static str {
    match encoding {
        AudioEncoding::Mp3 => "audio-16khz-32kbitrate-mono-mp3",
        AudioEncoding::Mp3At64Kbps => "audio-16khz-64kbitrate-mono-mp3",
        AudioEncoding::OggOpus => "ogg-16khz-16bit-mono-opus",
    }
}

/// One entry of `GET /cognitiveservices/voices/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceDto {
    pub name: String,
    pub short_name: String,
    pub locale: String,
    #[serde(default)]
    pub local_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub voice_type: String,
    #[serde(default)]
    pub style_list: Vec<String>,
}

impl From<VoiceDto> for Voice {
    fn from(dto: VoiceDto) -> Self {
        let gender = match dto.gender.as_str() {
            "Male" => VoiceGender::Male,
            "Female" => VoiceGender::Female,
            _ => VoiceGender::Neutral,
        };
        // Anything that is not explicitly standard is treated as neural
        let voice_type = if dto.voice_type.eq_ignore_ascii_case("standard") {
            VoiceType::Standard
        } else {
            VoiceType::Neural
        };

        Self {
            name: dto.name,
            short_name: dto.short_name,
            locale: dto.locale,
            local_name: dto.local_name,
            gender,
            voice_type,
            style_list: dto.style_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICES_JSON: &str = r#"[
        {
            "Name": "Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)",
            "DisplayName": "Jenny",
            "LocalName": "Jenny",
            "ShortName": "en-US-JennyNeural",
            "Gender": "Female",
            "Locale": "en-US",
            "StyleList": ["assistant", "chat"],
            "SampleRateHertz": "24000",
            "VoiceType": "Neural",
            "Status": "GA"
        },
        {
            "Name": "Microsoft Server Speech Text to Speech Voice (de-DE, Stefan)",
            "ShortName": "de-DE-Stefan",
            "Gender": "Male",
            "Locale": "de-DE",
            "VoiceType": "Standard"
        }
    ]"#;

    #[test]
    fn parses_voice_list() {
        let dtos: Vec<VoiceDto> = serde_json::from_str(VOICES_JSON).unwrap();
        let voices: Vec<Voice> = dtos.into_iter().map(Voice::from).collect();

        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].short_name, "en-US-JennyNeural");
        assert_eq!(voices[0].gender, VoiceGender::Female);
        assert_eq!(voices[0].voice_type, VoiceType::Neural);
        assert_eq!(voices[0].style_list, vec!["assistant", "chat"]);

        assert_eq!(voices[1].gender, VoiceGender::Male);
        assert_eq!(voices[1].voice_type, VoiceType::Standard);
        assert!(voices[1].local_name.is_empty());
        assert!(voices[1].style_list.is_empty());
    }

    #[test]
    fn unknown_gender_is_neutral() {
        let dto = VoiceDto {
            name: "n".into(),
            short_name: "s".into(),
            locale: "en-US".into(),
            local_name: String::new(),
            gender: "Unknown".into(),
            voice_type: String::new(),
            style_list: Vec::new(),
        };
        let voice = Voice::from(dto);
        assert_eq!(voice.gender, VoiceGender::Neutral);
        assert_eq!(voice.voice_type, VoiceType::Neural);
    }

    #[test]
    fn every_encoding_has_an_output_format() {
        for encoding in AudioEncoding::ALL {
            assert!(!output_format(encoding).is_empty());
        }
        assert!(output_format(AudioEncoding::OggOpus).starts_with("ogg-"));
    }
}
