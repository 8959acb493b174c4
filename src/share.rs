//! Lookbook export and share links
//!
//! Read-only views of the outfit on display. A share link encodes the ids
//! of the worn garments, bottom first, as base64 in an `outfit` query
//! parameter. The token is percent-encoded in the link.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use url::Url;

use crate::error::{StudioError, StudioResult};
use crate::state::data::{GarmentDescriptor, ImageRef};

/// Snapshot of the current look
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Lookbook {
    /// The image on display, if any
    pub image: Option<ImageRef>,
    /// Worn garments, bottom of the stack first
    pub garments: Vec<Arc<GarmentDescriptor>>,
}

impl Lookbook {
    pub fn garment_ids(&self) -> Vec<&str> {
        self.garments.iter().map(|g| g.id.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Token identifying the worn garments
    pub fn share_token(&self) -> StudioResult<String> {
        if self.garments.is_empty() {
            return Err(StudioError::NothingToShare);
        }
        Ok(encode_outfit(&self.garment_ids()))
    }

    /// `base_url` with an `outfit={token}` query pair added
    ///
    /// Any query already on `base_url` is kept.
    pub fn share_url(&self, base_url: &str) -> StudioResult<String> {
        let token = self.share_token()?;
        let mut url = Url::parse(base_url)
            .map_err(|e| StudioError::invalid_input(format!("Invalid share base URL: {}", e)))?;
        url.query_pairs_mut().append_pair("outfit", &token);
        Ok(url.into())
    }
}

pub fn encode_outfit(ids: &[&str]) -> String {
    BASE64.encode(ids.join(","))
}

/// Recover garment ids from a share token
pub fn decode_outfit(token: &str) -> StudioResult<Vec<String>> {
    let bytes = BASE64
        .decode(token.trim())
        .map_err(|e| StudioError::invalid_input(format!("Invalid outfit token: {}", e)))?;
    let joined = String::from_utf8(bytes)
        .map_err(|_| StudioError::invalid_input("Outfit token is not valid UTF-8"))?;
    Ok(joined
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Category;

    fn look(ids: &[&str]) -> Lookbook {
        Lookbook {
            image: Some(ImageRef::from("data:image/png;base64,AAAA")),
            garments: ids
                .iter()
                .map(|id| {
                    Arc::new(GarmentDescriptor::new(
                        *id,
                        *id,
                        Category::Tops,
                        "https://example.com/x.png",
                    ))
                })
                .collect(),
        }
    }

    #[test]
    fn test_share_url_encodes_ids_in_order() {
        let url = look(&["adat-1", "acc-hat-1"]).share_url("https://studio.local/").unwrap();
        assert_eq!(url, "https://studio.local/?outfit=YWRhdC0xLGFjYy1oYXQtMQ%3D%3D");
    }

    #[test]
    fn test_share_url_keeps_existing_query() {
        let look = look(&["adat-1", "acc-hat-1"]);
        let url = look.share_url("https://studio.local/app?lang=id").unwrap();
        assert_eq!(
            url,
            "https://studio.local/app?lang=id&outfit=YWRhdC0xLGFjYy1oYXQtMQ%3D%3D"
        );

        let parsed = Url::parse(&url).unwrap();
        let token = parsed
            .query_pairs()
            .find(|(key, _)| key == "outfit")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(decode_outfit(&token).unwrap(), vec!["adat-1", "acc-hat-1"]);
    }

    #[test]
    fn test_token_with_url_unsafe_characters_survives_the_link() {
        // ids chosen so the base64 form contains '+' and '/'
        let look = look(&["~~~", "???"]);
        let token = look.share_token().unwrap();
        assert!(token.contains('+') || token.contains('/'));

        let url = Url::parse(&look.share_url("https://studio.local/").unwrap()).unwrap();
        let (_, value) = url.query_pairs().next().unwrap();
        assert_eq!(value, token);
    }

    #[test]
    fn test_share_url_rejects_bad_base() {
        assert!(matches!(
            look(&["a"]).share_url("not a url"),
            Err(StudioError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_token_decodes_back() {
        let token = look(&["a", "b", "c"]).share_token().unwrap();
        assert_eq!(decode_outfit(&token).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_outfit_cannot_be_shared() {
        assert_eq!(look(&[]).share_token(), Err(StudioError::NothingToShare));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_outfit("%%%"),
            Err(StudioError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_json_snapshot() {
        let json = look(&["a"]).to_json().unwrap();
        assert!(json.contains("\"id\":\"a\""));
        assert!(json.contains("data:image/png;base64,AAAA"));
    }
}
