//! Test fixtures: canned API responses and SSE transcripts under
//! `src/fixtures/`.

use bytes::Bytes;
use std::path::PathBuf;

/// Get the path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("fixtures")
        .join(relative_path)
}

/// Load a fixture file as a string.
pub fn load_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", relative_path, e))
}

/// Load a JSON fixture and parse it.
pub fn load_json_fixture<T: serde::de::DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse JSON fixture {}: {}", relative_path, e))
}

/// Load an SSE transcript split into chunks of at most `chunk_size` bytes,
/// ignoring line and code-point boundaries.
pub fn load_sse_chunks(relative_path: &str, chunk_size: usize) -> Vec<Bytes> {
    load_fixture(relative_path)
        .into_bytes()
        .chunks(chunk_size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("chat/stream_output.sse");
        assert!(path.to_string_lossy().contains("fixtures"));
    }

    #[test]
    fn test_load_json_fixture() {
        let json: serde_json::Value = load_json_fixture("document_parse/success.json");
        assert!(json.get("elements").is_some());
    }

    #[test]
    fn test_sse_chunks_rejoin() {
        let whole = load_fixture("chat/stream_output.sse");
        let joined: Vec<u8> = load_sse_chunks("chat/stream_output.sse", 7)
            .iter()
            .flat_map(|c| c.to_vec())
            .collect();
        assert_eq!(joined, whole.into_bytes());
    }
}
