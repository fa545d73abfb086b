//! Endpoint URLs for the Azure Speech REST API.

use url::Url;

use crate::error::{AzureError, AzureResult};

const SYNTHESIS_PATH: &str = "cognitiveservices/v1";
const VOICES_PATH: &str = "cognitiveservices/voices/list";

/// `https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
pub fn synthesis_url(endpoint: Option<&Url>, region: &str) -> AzureResult<Url> {
    Ok(base_url(endpoint, region)?.join(SYNTHESIS_PATH)?)
}

/// `https://{region}.tts.speech.microsoft.com/cognitiveservices/voices/list`
pub fn voices_url(endpoint: Option<&Url>, region: &str) -> AzureResult<Url> {
    Ok(base_url(endpoint, region)?.join(VOICES_PATH)?)
}

fn base_url(endpoint: Option<&Url>, region: &str) -> AzureResult<Url> {
    let Some(endpoint) = endpoint else {
        let region = normalize_region(region)?;
        return Ok(Url::parse(&format!("https://{region}.tts.speech.microsoft.com/"))?);
    };

    // `join` replaces the last segment unless the path ends with a slash
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Region names are interpolated into the host, so only `[a-z0-9]` is allowed.
fn normalize_region(region: &str) -> AzureResult<String> {
    let region = region.trim();
    if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AzureError::InvalidRegion(region.to_string()));
    }
    Ok(region.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regional_urls() {
        assert_eq!(
            synthesis_url(None, "eastus").unwrap().as_str(),
            "https://eastus.tts.speech.microsoft.com/cognitiveservices/v1"
        );
        assert_eq!(
            voices_url(None, " WestEurope ").unwrap().as_str(),
            "https://westeurope.tts.speech.microsoft.com/cognitiveservices/voices/list"
        );
    }

    #[test]
    fn rejects_regions_that_are_not_bare_names() {
        for region in ["", "east us", "evil.com/x", "eastus#"] {
            assert!(
                matches!(synthesis_url(None, region), Err(AzureError::InvalidRegion(_))),
                "accepted {region:?}"
            );
        }
    }

    #[test]
    fn endpoint_override_ignores_region() {
        let endpoint = Url::parse("http://localhost:5000/speech").unwrap();
        assert_eq!(
            synthesis_url(Some(&endpoint), "anything at all").unwrap().as_str(),
            "http://localhost:5000/speech/cognitiveservices/v1"
        );
    }
}
