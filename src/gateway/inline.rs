//! Inline image payloads
//!
//! The model takes images as base64 parts tagged with a MIME type. This
//! module converts between those parts, `data:` URLs and raw uploads, and
//! fetches remote garment shots when a reference is a plain URL.

use std::io::Read;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GatewayError, StudioError, StudioResult};
use crate::state::data::ImageRef;

/// Formats the model accepts as input
const ACCEPTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// An image as the model exchanges it: MIME type plus base64 payload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Split a `data:{mime};base64,{payload}` URL
    pub fn parse_data_url(url: &str) -> StudioResult<Self> {
        let (header, data) = url
            .split_once(',')
            .ok_or_else(|| StudioError::invalid_input("Invalid data URL"))?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .filter(|mime| !mime.is_empty())
            .ok_or_else(|| StudioError::invalid_input("Could not parse MIME type from data URL"))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Encode raw upload bytes, rejecting anything the model cannot read
    ///
    /// The format is sniffed from the bytes, never trusted from a file name.
    pub fn from_bytes(bytes: &[u8]) -> StudioResult<Self> {
        let format = image::guess_format(bytes)
            .map_err(|_| StudioError::UnsupportedMediaType(String::new()))?;
        if !ACCEPTED_FORMATS.contains(&format) {
            return Err(StudioError::UnsupportedMediaType(
                format.to_mime_type().to_string(),
            ));
        }

        Ok(Self {
            mime_type: format.to_mime_type().to_string(),
            data: BASE64.encode(bytes),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn to_image_ref(&self) -> ImageRef {
        ImageRef::from(self.to_data_url())
    }

    pub fn decode(&self) -> StudioResult<Vec<u8>> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| StudioError::invalid_input(format!("Invalid base64 payload: {}", e)))
    }
}

/// Validate an uploaded photo and turn it into an image reference
pub fn image_ref_from_upload(bytes: &[u8]) -> StudioResult<ImageRef> {
    Ok(InlineImage::from_bytes(bytes)?.to_image_ref())
}

/// Resolve any image reference into an inline payload
///
/// Blocking: remote references are downloaded with `agent`.
pub fn resolve_blocking(
    agent: &ureq::Agent,
    image: &ImageRef,
    max_bytes: u64,
) -> StudioResult<InlineImage> {
    if image.is_inline() {
        InlineImage::parse_data_url(image.as_str())
    } else if image.is_remote() {
        fetch_remote_blocking(agent, image.as_str(), max_bytes)
    } else {
        Err(StudioError::invalid_input(format!(
            "Unsupported image reference: {}",
            image
        )))
    }
}

/// Download a remote image, retrying once with a cache-busting query
fn fetch_remote_blocking(
    agent: &ureq::Agent,
    url: &str,
    max_bytes: u64,
) -> StudioResult<InlineImage> {
    match download(agent, url, max_bytes) {
        Ok(bytes) => InlineImage::from_bytes(&bytes),
        Err(first) => {
            warn!(url, error = %first, "image fetch failed, retrying with cache-bust");
            let retry_url = cache_bust(url, chrono::Utc::now().timestamp_millis());
            let bytes = download(agent, &retry_url, max_bytes)?;
            InlineImage::from_bytes(&bytes)
        }
    }
}

fn download(agent: &ureq::Agent, url: &str, max_bytes: u64) -> StudioResult<Vec<u8>> {
    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => GatewayError::Transport(format!("Fetch failed: {}", code)),
        ureq::Error::Transport(t) => GatewayError::Transport(t.to_string()),
    })?;

    // One byte past the cap tells an oversized body apart from one that fits exactly
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| GatewayError::Transport(format!("Failed to read image body: {}", e)))?;
    if bytes.len() as u64 > max_bytes {
        return Err(GatewayError::Transport(format!("Image exceeds {} bytes", max_bytes)).into());
    }
    Ok(bytes)
}

fn cache_bust(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    // 1x1 transparent PNG
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn test_parse_data_url() {
        let url = format!("data:image/png;base64,{}", PNG_1X1);
        let inline = InlineImage::parse_data_url(&url).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, PNG_1X1);
        assert_eq!(inline.to_data_url(), url);
    }

    #[test]
    fn test_parse_data_url_rejects_garbage() {
        assert!(matches!(
            InlineImage::parse_data_url("not a data url"),
            Err(StudioError::InvalidInput(_))
        ));
        assert!(matches!(
            InlineImage::parse_data_url("data:;base64,AAAA"),
            Err(StudioError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_bytes_sniffs_png() {
        let bytes = BASE64.decode(PNG_1X1).unwrap();
        let inline = InlineImage::from_bytes(&bytes).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.decode().unwrap(), bytes);
    }

    #[test]
    fn test_from_bytes_rejects_unsupported_formats() {
        // GIF header
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        match InlineImage::from_bytes(gif) {
            Err(StudioError::UnsupportedMediaType(mime)) => assert_eq!(mime, "image/gif"),
            other => panic!("expected unsupported media type, got {:?}", other),
        }

        assert!(matches!(
            InlineImage::from_bytes(b"plain text"),
            Err(StudioError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_cache_bust_appends_query() {
        assert_eq!(cache_bust("https://a/x.png", 7), "https://a/x.png?t=7");
        assert_eq!(cache_bust("https://a/x.png?w=400", 7), "https://a/x.png?w=400&t=7");
    }

    /// Serve `body` as an HTTP response to the next `connections` requests
    fn serve(body: Vec<u8>, connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request);
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                stream.write_all(head.as_bytes()).unwrap();
                stream.write_all(&body).unwrap();
            }
        });
        format!("http://{}/shirt.png", addr)
    }

    #[test]
    fn test_remote_image_is_fetched_whole() {
        let bytes = BASE64.decode(PNG_1X1).unwrap();
        let url = serve(bytes.clone(), 1);
        let agent = ureq::AgentBuilder::new().build();

        let inline = resolve_blocking(&agent, &ImageRef::from(url), bytes.len() as u64).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.decode().unwrap(), bytes);
    }

    #[test]
    fn test_oversized_remote_image_is_rejected() {
        let bytes = BASE64.decode(PNG_1X1).unwrap();
        // the first attempt and the cache-busting retry both see the large body
        let url = serve(bytes, 2);
        let agent = ureq::AgentBuilder::new().build();

        match resolve_blocking(&agent, &ImageRef::from(url), 20) {
            Err(StudioError::Gateway(GatewayError::Transport(msg))) => {
                assert_eq!(msg, "Image exceeds 20 bytes")
            }
            other => panic!("expected a transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_inline_needs_no_network() {
        let agent = ureq::AgentBuilder::new().build();
        let image = ImageRef::from(format!("data:image/png;base64,{}", PNG_1X1));
        let inline = resolve_blocking(&agent, &image, 1024).unwrap();
        assert_eq!(inline.mime_type, "image/png");

        assert!(resolve_blocking(&agent, &ImageRef::from("blob:xyz"), 1024).is_err());
    }
}
